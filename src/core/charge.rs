use crate::core::period::Month;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How a fixed charge recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeKind {
    /// Recurring every month.
    Mensuelle,
    /// One-off, dated by `mois`/`annee` on the charge.
    Ponctuelle,
}

/// A fixed or one-off operating expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub nom: String,
    pub montant_mensuel: Decimal,
    #[serde(rename = "type")]
    pub kind: ChargeKind,
    /// Month of a one-off charge. Ignored for recurring charges.
    #[serde(default)]
    pub mois: Option<Month>,
    /// Year of a one-off charge. Ignored for recurring charges.
    #[serde(default)]
    pub annee: Option<i32>,
}

impl Charge {
    /// A charge recurring every month.
    pub fn mensuelle(nom: impl Into<String>, montant_mensuel: Decimal) -> Self {
        Self {
            nom: nom.into(),
            montant_mensuel,
            kind: ChargeKind::Mensuelle,
            mois: None,
            annee: None,
        }
    }

    /// A one-off charge for a specific month.
    pub fn ponctuelle(
        nom: impl Into<String>,
        montant: Decimal,
        mois: Month,
        annee: i32,
    ) -> Self {
        Self {
            nom: nom.into(),
            montant_mensuel: montant,
            kind: ChargeKind::Ponctuelle,
            mois: Some(mois),
            annee: Some(annee),
        }
    }

    pub fn is_recurring(&self) -> bool {
        self.kind == ChargeKind::Mensuelle
    }

    /// Annual total: twelve months for a recurring charge, the amount
    /// itself for a one-off.
    pub fn montant_annuel(&self) -> Decimal {
        match self.kind {
            ChargeKind::Mensuelle => self.montant_mensuel * dec!(12),
            ChargeKind::Ponctuelle => self.montant_mensuel,
        }
    }

    /// Whether a one-off charge lands on the given month. Recurring
    /// charges land on every month.
    pub fn applies_to(&self, annee: i32, mois: Month) -> bool {
        match self.kind {
            ChargeKind::Mensuelle => true,
            ChargeKind::Ponctuelle => self.annee == Some(annee) && self.mois == Some(mois),
        }
    }
}

/// A per-mission amount reserved against future fixed charges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provision {
    pub mois: Month,
    pub annee: i32,
    pub montant: Decimal,
}

impl Provision {
    pub fn new(annee: i32, mois: Month, montant: Decimal) -> Self {
        Self {
            mois,
            annee,
            montant,
        }
    }
}

/// A dated business expense, as the TVA calculator sees it.
///
/// When the HT amount and TVA were captured at entry time they are
/// taken as-is; otherwise the deductible TVA is backed out of the TTC
/// amount using the stored rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depense {
    pub nom: String,
    pub date: NaiveDate,
    pub montant_ttc: Decimal,
    #[serde(default)]
    pub soumise_tva: bool,
    #[serde(default)]
    pub taux_tva: Decimal,
    #[serde(default)]
    pub montant_ht: Option<Decimal>,
    #[serde(default)]
    pub montant_tva: Option<Decimal>,
}

impl Depense {
    /// The deductible TVA carried by this expense.
    ///
    /// Pre-stored HT/TVA amounts win over back-computation; a zero rate
    /// with no pre-stored amounts means no deductible TVA.
    pub fn tva_deductible(&self) -> Decimal {
        if self.montant_ht.is_some() {
            return self.montant_tva.unwrap_or(Decimal::ZERO);
        }
        if self.taux_tva > Decimal::ZERO {
            let ht = self.montant_ttc / (Decimal::ONE + self.taux_tva / dec!(100));
            self.montant_ttc - ht
        } else {
            Decimal::ZERO
        }
    }
}
