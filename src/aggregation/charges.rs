use crate::core::charge::{Charge, Provision};
use crate::core::mission::Mission;
use crate::core::period::Month;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One month of the provision-vs-charges rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeMonth {
    pub annee: i32,
    pub mois: Month,
    /// Provisions set aside this month.
    pub provision: Decimal,
    /// Fixed-charge load this month: recurring total plus any one-offs.
    pub charges_fixes: Decimal,
    pub provision_cumul: Decimal,
    pub charges_cumul: Decimal,
    /// `provision_cumul - charges_cumul`: what the provisions still
    /// cover (negative when charges have outrun them).
    pub reliquat: Decimal,
}

/// Rollup of provisions against fixed charges over a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargesRollup {
    /// Twelve entries, janvier through décembre.
    pub par_mois: Vec<ChargeMonth>,
    /// Sum of monthly amounts over recurring charges only.
    pub total_charges_fixes: Decimal,
    /// Annual total: recurring charges twelve times, one-offs of the
    /// target year once.
    pub total_annuel: Decimal,
    pub total_provisions: Decimal,
    /// Year-end residual, equal to the last month's `reliquat`.
    pub reliquat_final: Decimal,
}

/// Extract the provision entries carried by a mission collection.
///
/// Each mission's `provision_charges` fee is a reserve set aside for
/// the mission's month.
pub fn mission_provisions(missions: &[Mission]) -> Vec<Provision> {
    missions
        .iter()
        .map(|m| Provision::new(m.annee(), m.mois(), m.raw().frais.provision_charges))
        .collect()
}

/// Fold provisions and fixed charges over the twelve months of `annee`.
///
/// Same cumulative-sum discipline as the treasury rollup: a single
/// accumulator pair walked in calendar order. Provisions and one-off
/// charges dated outside the target year are ignored.
pub fn rollup_charges(
    annee: i32,
    fixed_charges: &[Charge],
    provisions: &[Provision],
) -> ChargesRollup {
    let total_charges_fixes: Decimal = fixed_charges
        .iter()
        .filter(|c| c.is_recurring())
        .map(|c| c.montant_mensuel)
        .sum();

    let mut provision_cumul = Decimal::ZERO;
    let mut charges_cumul = Decimal::ZERO;

    let par_mois: Vec<ChargeMonth> = Month::ALL
        .iter()
        .map(|&mois| {
            let provision: Decimal = provisions
                .iter()
                .filter(|p| p.annee == annee && p.mois == mois)
                .map(|p| p.montant)
                .sum();
            let ponctuelles: Decimal = fixed_charges
                .iter()
                .filter(|c| !c.is_recurring() && c.applies_to(annee, mois))
                .map(|c| c.montant_mensuel)
                .sum();
            let charges_fixes = total_charges_fixes + ponctuelles;

            provision_cumul += provision;
            charges_cumul += charges_fixes;

            ChargeMonth {
                annee,
                mois,
                provision,
                charges_fixes,
                provision_cumul,
                charges_cumul,
                reliquat: provision_cumul - charges_cumul,
            }
        })
        .collect();

    let total_annuel: Decimal = fixed_charges
        .iter()
        .filter(|c| c.is_recurring() || c.annee == Some(annee))
        .map(Charge::montant_annuel)
        .sum();

    ChargesRollup {
        total_charges_fixes,
        total_annuel,
        total_provisions: provision_cumul,
        reliquat_final: par_mois.last().map(|m| m.reliquat).unwrap_or(Decimal::ZERO),
        par_mois,
    }
}
