//! Foundational domain types: identifiers, periods, money formatting,
//! missions, charges and invoices.

pub mod charge;
pub mod ids;
pub mod invoice;
pub mod mission;
pub mod money;
pub mod period;
pub mod refs;
