use crate::core::charge::Depense;
use crate::core::invoice::Invoice;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// TVA position for a declaration period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvaResult {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// TVA collected on issued invoices.
    pub tva_collectee: Decimal,
    /// TVA deductible from TVA-liable expenses.
    pub tva_deductible: Decimal,
    /// `collectee - deductible`; negative means a TVA credit.
    pub tva_net_due: Decimal,
    /// Invoices that entered the computation.
    pub invoice_count: usize,
    /// Expenses that entered the computation.
    pub depense_count: usize,
}

impl TvaResult {
    /// Whether the period closes on a TVA credit rather than an amount
    /// due.
    pub fn is_credit(&self) -> bool {
        self.tva_net_due < Decimal::ZERO
    }
}

/// Compute the TVA position over `[start, end]` inclusive.
///
/// TVA is due on issuance, not on payment: draft invoices don't yet
/// exist fiscally and cancelled ones never existed, so both are
/// excluded; every other status counts. Malformed invoice lines
/// (non-positive quantity or unit price) are skipped with a warning,
/// never an error.
///
/// Deductible TVA comes from expenses flagged TVA-liable in the
/// period; see [`Depense::tva_deductible`] for the pre-stored versus
/// backed-out rules.
pub fn calculate_tva(
    start: NaiveDate,
    end: NaiveDate,
    invoices: &[Invoice],
    depenses: &[Depense],
) -> TvaResult {
    let mut tva_collectee = Decimal::ZERO;
    let mut invoice_count = 0usize;

    for invoice in invoices {
        if !invoice.dated_within(start, end) || !invoice.counts_for_tva() {
            continue;
        }
        invoice_count += 1;
        for item in &invoice.items {
            if !item.is_valid() {
                log::warn!(
                    "skipping malformed item on invoice {}: quantity={} unit_price={}",
                    invoice.id,
                    item.quantity,
                    item.unit_price
                );
                continue;
            }
            tva_collectee += item.tva();
        }
    }

    let mut tva_deductible = Decimal::ZERO;
    let mut depense_count = 0usize;

    for depense in depenses {
        if depense.date < start || depense.date > end || !depense.soumise_tva {
            continue;
        }
        depense_count += 1;
        tva_deductible += depense.tva_deductible();
    }

    TvaResult {
        start,
        end,
        tva_collectee,
        tva_deductible,
        tva_net_due: tva_collectee - tva_deductible,
        invoice_count,
        depense_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::invoice::{InvoiceItem, InvoiceStatus};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice_with_item(day: u32, status: InvoiceStatus, item: InvoiceItem) -> Invoice {
        let mut invoice = Invoice::new(date(2025, 3, day), status);
        invoice.add_item(item);
        invoice
    }

    #[test]
    fn test_collected_tva_single_invoice() {
        let invoices = vec![invoice_with_item(
            10,
            InvoiceStatus::Sent,
            InvoiceItem::new(dec!(2), dec!(100), dec!(0), dec!(20)),
        )];
        let result = calculate_tva(date(2025, 3, 1), date(2025, 3, 31), &invoices, &[]);
        assert_eq!(result.tva_collectee, dec!(40));
        assert_eq!(result.tva_deductible, Decimal::ZERO);
        assert_eq!(result.tva_net_due, dec!(40));
        assert!(!result.is_credit());
    }

    #[test]
    fn test_draft_and_cancelled_excluded() {
        let invoices = vec![
            invoice_with_item(
                10,
                InvoiceStatus::Draft,
                InvoiceItem::new(dec!(1), dec!(100), dec!(0), dec!(20)),
            ),
            invoice_with_item(
                11,
                InvoiceStatus::Cancelled,
                InvoiceItem::new(dec!(1), dec!(100), dec!(0), dec!(20)),
            ),
            invoice_with_item(
                12,
                InvoiceStatus::Overdue,
                InvoiceItem::new(dec!(1), dec!(100), dec!(0), dec!(20)),
            ),
        ];
        let result = calculate_tva(date(2025, 3, 1), date(2025, 3, 31), &invoices, &[]);
        assert_eq!(result.invoice_count, 1);
        assert_eq!(result.tva_collectee, dec!(20));
    }

    #[test]
    fn test_date_range_inclusive() {
        let invoices = vec![
            invoice_with_item(1, InvoiceStatus::Sent, InvoiceItem::new(dec!(1), dec!(100), dec!(0), dec!(20))),
            invoice_with_item(31, InvoiceStatus::Sent, InvoiceItem::new(dec!(1), dec!(100), dec!(0), dec!(20))),
        ];
        let result = calculate_tva(date(2025, 3, 1), date(2025, 3, 31), &invoices, &[]);
        assert_eq!(result.invoice_count, 2);
        let result = calculate_tva(date(2025, 3, 2), date(2025, 3, 30), &invoices, &[]);
        assert_eq!(result.invoice_count, 0);
    }

    #[test]
    fn test_malformed_items_skipped() {
        let mut invoice = Invoice::new(date(2025, 3, 10), InvoiceStatus::Sent);
        invoice.add_item(InvoiceItem::new(dec!(0), dec!(100), dec!(0), dec!(20)));
        invoice.add_item(InvoiceItem::new(dec!(2), dec!(100), dec!(0), dec!(20)));
        let result = calculate_tva(date(2025, 3, 1), date(2025, 3, 31), &[invoice], &[]);
        assert_eq!(result.tva_collectee, dec!(40));
    }

    #[test]
    fn test_deductible_yields_credit() {
        let depenses = vec![Depense {
            nom: "Serveur".to_string(),
            date: date(2025, 3, 5),
            montant_ttc: dec!(1200),
            soumise_tva: true,
            taux_tva: dec!(20),
            montant_ht: None,
            montant_tva: None,
        }];
        let result = calculate_tva(date(2025, 3, 1), date(2025, 3, 31), &[], &depenses);
        assert_eq!(result.tva_deductible, dec!(200));
        assert_eq!(result.tva_net_due, dec!(-200));
        assert!(result.is_credit());
    }

    #[test]
    fn test_non_tva_liable_depense_ignored() {
        let depenses = vec![Depense {
            nom: "Timbres".to_string(),
            date: date(2025, 3, 5),
            montant_ttc: dec!(100),
            soumise_tva: false,
            taux_tva: dec!(20),
            montant_ht: None,
            montant_tva: None,
        }];
        let result = calculate_tva(date(2025, 3, 1), date(2025, 3, 31), &[], &depenses);
        assert_eq!(result.depense_count, 0);
        assert_eq!(result.tva_deductible, Decimal::ZERO);
    }
}
