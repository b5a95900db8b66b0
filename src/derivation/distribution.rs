use crate::core::mission::{Allocation, CollaborateurPart};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Result of distributing a base amount across percentage allocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// Per-recipient shares, in the allocation list's insertion order.
    pub parts: Vec<CollaborateurPart>,
    /// What remains of the base after all shares: the reliquat.
    /// Negative when the allocations sum past 100%.
    pub residual: Decimal,
}

impl Distribution {
    /// Sum of all distributed amounts.
    pub fn total_distributed(&self) -> Decimal {
        self.parts.iter().map(|p| p.montant).sum()
    }

    /// Whether the roster claimed more than the whole base.
    pub fn is_over_allocated(&self) -> bool {
        self.residual < Decimal::ZERO
    }
}

/// Distribute `base` across `allocations` by percentage.
///
/// Each share is `base * pct / 100`; the residual is whatever the
/// shares leave of the base. The resolver performs no normalisation
/// and no validation: percentages above 100 or summing past 100 are
/// carried through arithmetically, yielding a negative residual that
/// downstream layers surface as an over-commitment signal.
///
/// Iteration order over `allocations` is preserved — order carries no
/// numeric meaning, but aggregation keys results by recipient id and
/// output must be reproducible.
///
/// # Examples
///
/// ```
/// use cascade_engine::core::mission::Allocation;
/// use cascade_engine::derivation::distribution::distribute;
/// use rust_decimal_macros::dec;
///
/// let parts = [
///     Allocation::new("fred", dec!(30)),
///     Allocation::new("eric", dec!(20)),
/// ];
/// let result = distribute(dec!(5000), &parts);
/// assert_eq!(result.parts[0].montant, dec!(1500));
/// assert_eq!(result.parts[1].montant, dec!(1000));
/// assert_eq!(result.residual, dec!(2500));
/// ```
pub fn distribute(base: Decimal, allocations: &[Allocation]) -> Distribution {
    let parts: Vec<CollaborateurPart> = allocations
        .iter()
        .map(|a| CollaborateurPart {
            collaborateur: a.collaborateur.clone(),
            pct: a.pct,
            montant: base * a.pct / dec!(100),
        })
        .collect();

    let distributed: Decimal = parts.iter().map(|p| p.montant).sum();

    Distribution {
        parts,
        residual: base - distributed,
    }
}
