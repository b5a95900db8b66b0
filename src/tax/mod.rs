//! Advisory tax estimates: TVA net due and URSSAF contributions.
//!
//! These are estimates for steering, not authoritative filings.

pub mod tva;
pub mod urssaf;
