use crate::aggregation::missions::MonthAgg;
use crate::core::period::{Month, MonthKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One month of the treasury projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreasuryMonth {
    pub annee: i32,
    pub mois: Month,
    /// Cash actually received: subvention + paid client shares.
    pub encaissements: Decimal,
    /// Received plus still-outstanding client shares.
    pub total_revenus: Decimal,
    /// Commissions going out plus the fixed-charges load.
    pub total_decaissements: Decimal,
    /// `encaissements - total_decaissements` for the month.
    pub solde: Decimal,
    /// Running balance since the first month of the sequence.
    pub solde_cumule: Decimal,
}

/// Fold a monthly breakdown into a treasury projection with a running
/// cumulative balance.
///
/// The fold is strictly left-to-right with a single accumulator —
/// order is the entire meaning of "cumulative". Input is defensively
/// re-sorted by `(annee, mois)` first, so a store handing months back
/// out of order cannot silently corrupt the running balance;
/// correctly ordered input is unaffected.
///
/// `fixed_charges_total` is the recurring monthly charge load,
/// precomputed by summing fixed charges, and is applied to every
/// month. An empty breakdown yields an empty projection.
pub fn rollup_treasury(
    breakdown: &[MonthAgg],
    fixed_charges_total: Decimal,
) -> Vec<TreasuryMonth> {
    let mut ordered: Vec<&MonthAgg> = breakdown.iter().collect();
    ordered.sort_by_key(|m| MonthKey::new(m.annee, m.mois));

    let mut cumul = Decimal::ZERO;
    ordered
        .into_iter()
        .map(|m| {
            let encaissements = m.subvention + m.client;
            let total_revenus = encaissements + m.en_attente;
            let total_decaissements = m.commissions() + fixed_charges_total;
            let solde = encaissements - total_decaissements;
            cumul += solde;
            TreasuryMonth {
                annee: m.annee,
                mois: m.mois,
                encaissements,
                total_revenus,
                total_decaissements,
                solde,
                solde_cumule: cumul,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn month_agg(annee: i32, mois: Month, subvention: Decimal) -> MonthAgg {
        MonthAgg {
            subvention,
            ..MonthAgg::zero(annee, mois)
        }
    }

    #[test]
    fn test_empty_input_empty_output() {
        assert!(rollup_treasury(&[], Decimal::ZERO).is_empty());
    }

    #[test]
    fn test_running_balance() {
        let breakdown = vec![
            month_agg(2025, Month::Janvier, dec!(1000)),
            month_agg(2025, Month::Fevrier, dec!(2000)),
        ];
        let rollup = rollup_treasury(&breakdown, Decimal::ZERO);
        assert_eq!(rollup[0].solde, dec!(1000));
        assert_eq!(rollup[0].solde_cumule, dec!(1000));
        assert_eq!(rollup[1].solde, dec!(2000));
        assert_eq!(rollup[1].solde_cumule, dec!(3000));
    }

    #[test]
    fn test_fixed_charges_hit_every_month() {
        let breakdown = vec![
            month_agg(2025, Month::Janvier, dec!(1000)),
            month_agg(2025, Month::Fevrier, dec!(1000)),
        ];
        let rollup = rollup_treasury(&breakdown, dec!(300));
        assert_eq!(rollup[0].total_decaissements, dec!(300));
        assert_eq!(rollup[0].solde, dec!(700));
        assert_eq!(rollup[1].solde_cumule, dec!(1400));
    }

    #[test]
    fn test_unsorted_input_is_resorted() {
        let breakdown = vec![
            month_agg(2025, Month::Fevrier, dec!(2000)),
            month_agg(2024, Month::Decembre, dec!(500)),
            month_agg(2025, Month::Janvier, dec!(1000)),
        ];
        let rollup = rollup_treasury(&breakdown, Decimal::ZERO);
        assert_eq!(rollup[0].mois, Month::Decembre);
        assert_eq!(rollup[0].annee, 2024);
        assert_eq!(rollup[0].solde_cumule, dec!(500));
        assert_eq!(rollup[1].solde_cumule, dec!(1500));
        assert_eq!(rollup[2].solde_cumule, dec!(3500));
    }

    #[test]
    fn test_en_attente_counts_in_revenus_not_solde() {
        let mut m = month_agg(2025, Month::Janvier, dec!(1000));
        m.en_attente = dec!(400);
        m.client = dec!(100);
        let rollup = rollup_treasury(&[m], Decimal::ZERO);
        assert_eq!(rollup[0].encaissements, dec!(1100));
        assert_eq!(rollup[0].total_revenus, dec!(1500));
        assert_eq!(rollup[0].solde, dec!(1100));
    }

    #[test]
    fn test_negative_balance_possible() {
        let breakdown = vec![month_agg(2025, Month::Janvier, dec!(100))];
        let rollup = rollup_treasury(&breakdown, dec!(500));
        assert_eq!(rollup[0].solde, dec!(-400));
        assert_eq!(rollup[0].solde_cumule, dec!(-400));
    }
}
