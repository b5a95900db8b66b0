//! # cascade-engine
//!
//! Deterministic financial engine for a mission-based services
//! business: given a mission's raw inputs (generated revenue,
//! percentage splits, fee deductions, referral commission), it derives
//! the full chain of amounts down to each collaborator's share and the
//! final residual, then aggregates mission collections into monthly
//! breakdowns, treasury projections and TVA/URSSAF estimates.
//!
//! All computation is pure and synchronous over immutable snapshots;
//! amounts are `rust_decimal::Decimal` throughout, EUR only.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: ids, periods, money formatting,
//!   missions, charges, invoices
//! - **derivation** — The mission financial cascade and the commission
//!   distribution resolver
//! - **aggregation** — Period totals, monthly breakdowns, treasury
//!   rollup, provision-vs-charges rollup
//! - **tax** — Advisory TVA and URSSAF estimates
//! - **store** — Injected repository seam and in-memory implementation
//! - **simulation** — Random dataset generation for stress testing

pub mod aggregation;
pub mod core;
pub mod derivation;
pub mod simulation;
pub mod store;
pub mod tax;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::aggregation::charges::{mission_provisions, rollup_charges, ChargesRollup};
    pub use crate::aggregation::missions::{aggregate, AggregateResult, MonthAgg};
    pub use crate::aggregation::treasury::{rollup_treasury, TreasuryMonth};
    pub use crate::core::ids::{ApporteurId, ClientId, CollaborateurId, MissionId};
    pub use crate::core::mission::{Allocation, Frais, Mission, MissionDerived, MissionRawInput};
    pub use crate::core::money::{format_eur, format_eur_whole};
    pub use crate::core::period::{Month, Period};
    pub use crate::derivation::cascade::derive_mission;
    pub use crate::derivation::distribution::distribute;
    pub use crate::store::{MemoryRepository, Repository};
    pub use crate::tax::tva::{calculate_tva, TvaResult};
    pub use crate::tax::urssaf::{calculate_urssaf, UrssafResult};
}
