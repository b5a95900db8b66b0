use crate::core::ids::ClientId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoice lifecycle status.
///
/// TVA is due on issuance: drafts don't yet exist fiscally and
/// cancelled invoices never existed. URSSAF contributions are due on
/// cash received, so only `Paid` counts there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Cancelled,
    Overdue,
}

/// One invoice line.
///
/// A line with a non-positive quantity or unit price is malformed and
/// is skipped by every total, never summed and never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    #[serde(default)]
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Discount percentage applied to the line.
    #[serde(default)]
    pub discount: Decimal,
    /// TVA rate percentage for the line.
    #[serde(default)]
    pub tax_rate: Decimal,
}

impl InvoiceItem {
    pub fn new(quantity: Decimal, unit_price: Decimal, discount: Decimal, tax_rate: Decimal) -> Self {
        Self {
            description: String::new(),
            quantity,
            unit_price,
            discount,
            tax_rate,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.quantity > Decimal::ZERO && self.unit_price > Decimal::ZERO
    }

    /// Line amount excluding tax: `quantity * unit_price * (1 - discount/100)`.
    pub fn ht(&self) -> Decimal {
        self.quantity * self.unit_price * (Decimal::ONE - self.discount / dec!(100))
    }

    /// TVA carried by the line.
    pub fn tva(&self) -> Decimal {
        self.ht() * self.tax_rate / dec!(100)
    }

    /// Line amount including tax.
    pub fn ttc(&self) -> Decimal {
        self.ht() + self.tva()
    }
}

/// A client invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    #[serde(default)]
    pub client: Option<ClientId>,
    pub date: NaiveDate,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
}

impl Invoice {
    pub fn new(date: NaiveDate, status: InvoiceStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            client: None,
            date,
            status,
            items: Vec::new(),
        }
    }

    /// Create an invoice with a specific id (useful for testing / determinism).
    pub fn with_id(id: Uuid, date: NaiveDate, status: InvoiceStatus) -> Self {
        Self {
            id,
            client: None,
            date,
            status,
            items: Vec::new(),
        }
    }

    pub fn with_client(mut self, client: ClientId) -> Self {
        self.client = Some(client);
        self
    }

    pub fn add_item(&mut self, item: InvoiceItem) {
        self.items.push(item);
    }

    /// Valid lines only.
    pub fn valid_items(&self) -> impl Iterator<Item = &InvoiceItem> {
        self.items.iter().filter(|i| i.is_valid())
    }

    pub fn total_ht(&self) -> Decimal {
        self.valid_items().map(InvoiceItem::ht).sum()
    }

    pub fn total_tva(&self) -> Decimal {
        self.valid_items().map(InvoiceItem::tva).sum()
    }

    pub fn total_ttc(&self) -> Decimal {
        self.valid_items().map(InvoiceItem::ttc).sum()
    }

    /// Whether this invoice exists fiscally for TVA purposes.
    pub fn counts_for_tva(&self) -> bool {
        !matches!(self.status, InvoiceStatus::Draft | InvoiceStatus::Cancelled)
    }

    /// Whether the invoice date falls inside `[start, end]` inclusive.
    pub fn dated_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date >= start && self.date <= end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_item_amounts() {
        let item = InvoiceItem::new(dec!(2), dec!(100), dec!(10), dec!(20));
        assert_eq!(item.ht(), dec!(180));
        assert_eq!(item.tva(), dec!(36));
        assert_eq!(item.ttc(), dec!(216));
    }

    #[test]
    fn test_invalid_items_excluded_from_totals() {
        let mut invoice = Invoice::new(date(2025, 3, 1), InvoiceStatus::Sent);
        invoice.add_item(InvoiceItem::new(dec!(2), dec!(100), dec!(0), dec!(20)));
        invoice.add_item(InvoiceItem::new(dec!(0), dec!(100), dec!(0), dec!(20)));
        invoice.add_item(InvoiceItem::new(dec!(1), dec!(-5), dec!(0), dec!(20)));
        assert_eq!(invoice.total_ht(), dec!(200));
        assert_eq!(invoice.total_tva(), dec!(40));
        assert_eq!(invoice.total_ttc(), dec!(240));
    }

    #[test]
    fn test_tva_status_filter() {
        assert!(Invoice::new(date(2025, 1, 1), InvoiceStatus::Sent).counts_for_tva());
        assert!(Invoice::new(date(2025, 1, 1), InvoiceStatus::Paid).counts_for_tva());
        assert!(Invoice::new(date(2025, 1, 1), InvoiceStatus::Overdue).counts_for_tva());
        assert!(!Invoice::new(date(2025, 1, 1), InvoiceStatus::Draft).counts_for_tva());
        assert!(!Invoice::new(date(2025, 1, 1), InvoiceStatus::Cancelled).counts_for_tva());
    }

    #[test]
    fn test_dated_within_is_inclusive() {
        let invoice = Invoice::new(date(2025, 3, 31), InvoiceStatus::Sent);
        assert!(invoice.dated_within(date(2025, 1, 1), date(2025, 3, 31)));
        assert!(!invoice.dated_within(date(2025, 4, 1), date(2025, 6, 30)));
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&InvoiceStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }
}
