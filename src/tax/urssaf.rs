use crate::core::invoice::{Invoice, InvoiceStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Micro-entrepreneur annual revenue ceiling for service activities,
/// in euros. Informational only — crossing it never blocks anything.
pub const PLAFOND_SERVICES: Decimal = dec!(77_700);

/// URSSAF contribution estimate for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrssafResult {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Gross receipts of the period, TTC.
    pub total_encaisse: Decimal,
    /// Contribution rate applied, as a percentage.
    pub taux: Decimal,
    pub cotisations: Decimal,
    /// Paid invoices that entered the computation.
    pub invoice_count: usize,
}

impl UrssafResult {
    /// Whether the period's receipts alone already cross the services
    /// ceiling. Informational summary, not a failure condition.
    pub fn plafond_depasse(&self) -> bool {
        self.total_encaisse > PLAFOND_SERVICES
    }
}

/// Estimate URSSAF contributions over `[start, end]` inclusive.
///
/// Unlike TVA, contributions are due only on cash actually received:
/// only `Paid` invoices count. Revenue is summed TTC — contributions
/// are computed on gross receipts including the tax passed through,
/// and all revenue is treated as the services category.
pub fn calculate_urssaf(
    start: NaiveDate,
    end: NaiveDate,
    invoices: &[Invoice],
    taux: Decimal,
) -> UrssafResult {
    let mut total_encaisse = Decimal::ZERO;
    let mut invoice_count = 0usize;

    for invoice in invoices {
        if !invoice.dated_within(start, end) || invoice.status != InvoiceStatus::Paid {
            continue;
        }
        invoice_count += 1;
        total_encaisse += invoice.total_ttc();
    }

    UrssafResult {
        start,
        end,
        total_encaisse,
        taux,
        cotisations: total_encaisse * taux / dec!(100),
        invoice_count,
    }
}
