//! Deterministic aggregations over mission, charge and provision
//! collections: period totals, monthly breakdowns, treasury projection
//! and provision consumption.

pub mod charges;
pub mod missions;
pub mod treasury;
