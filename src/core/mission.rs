use crate::core::ids::{ApporteurId, ClientId, CollaborateurId, MissionId};
use crate::core::period::Month;
use crate::derivation::cascade::derive_mission;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One collaborator's percentage allocation on a mission.
///
/// Percentages are raw user input: nothing constrains them to [0, 100]
/// and nothing requires the roster to sum to 100. Over-allocation is a
/// meaningful state, surfaced as a negative final residual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub collaborateur: CollaborateurId,
    pub pct: Decimal,
}

impl Allocation {
    pub fn new(collaborateur: impl Into<CollaborateurId>, pct: Decimal) -> Self {
        Self {
            collaborateur: collaborateur.into(),
            pct,
        }
    }
}

/// The five independent fee deductions taken off the distributable base.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frais {
    #[serde(default)]
    pub provision_charges: Decimal,
    #[serde(default)]
    pub frais_supp_fred: Decimal,
    #[serde(default)]
    pub frais_gestion: Decimal,
    #[serde(default)]
    pub frais_ml: Decimal,
    #[serde(default)]
    pub frais_lt: Decimal,
}

impl Frais {
    pub fn total(&self) -> Decimal {
        self.provision_charges
            + self.frais_supp_fred
            + self.frais_gestion
            + self.frais_ml
            + self.frais_lt
    }
}

/// Raw, user-entered mission inputs.
///
/// All numeric fields are taken as already-validated numbers; the
/// derivation engine does not range-check them. Missing numeric inputs
/// default to zero at the serde boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionRawInput {
    pub client: ClientId,
    #[serde(default)]
    pub apporteur: Option<ApporteurId>,
    pub nom_mission: String,
    pub mois: Month,
    pub annee: i32,
    #[serde(default)]
    pub ca_genere: Decimal,
    #[serde(default)]
    pub pct_sub: Decimal,
    #[serde(default)]
    pub pct_client: Decimal,
    #[serde(default)]
    pub reduction_base: Decimal,
    #[serde(default)]
    pub frais: Frais,
    /// Referral commission, as an absolute amount (not a percentage).
    #[serde(default)]
    pub commission_apporteur: Decimal,
    /// Display label only: the residual's share of the base as the user
    /// chose to present it. Never used in computation and never checked
    /// against the actual residual.
    #[serde(default)]
    pub pct_reliquat: Decimal,
    #[serde(default)]
    pub allocations: Vec<Allocation>,
}

/// One collaborator's resolved share of a mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborateurPart {
    pub collaborateur: CollaborateurId,
    pub pct: Decimal,
    pub montant: Decimal,
}

/// The full chain of amounts derived from a mission's raw inputs.
///
/// Computed once at creation or edit time and persisted verbatim; never
/// recomputed lazily on read. Any intermediate may be negative — the
/// cascade never clamps, and a negative `reliquat_final` is the signal
/// of an over-allocated roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionDerived {
    /// `ca_genere * pct_sub / 100`.
    pub montant_sub: Decimal,
    /// What the client share would be: `ca_genere * pct_client / 100`.
    /// Preview only — the persisted `montant_client` starts at zero.
    pub montant_client_apercu: Decimal,
    /// The persisted client share. Zero until the mission is marked
    /// paid; payment is a separate unpaid→paid transition, not an
    /// immediate derived fact.
    pub montant_client: Decimal,
    /// `montant_sub - reduction_base`. The distributable base is taken
    /// from the subsidy portion only, not from total CA — the governing
    /// business rule of the whole cascade.
    pub base_distribuable: Decimal,
    pub total_frais: Decimal,
    pub restant_apres_frais: Decimal,
    pub restant_apres_apporteur: Decimal,
    pub parts_collaborateurs: Vec<CollaborateurPart>,
    pub reliquat_final: Decimal,
}

/// A persisted mission: raw inputs plus the derived block and the
/// payment flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    id: MissionId,
    #[serde(flatten)]
    raw: MissionRawInput,
    derived: MissionDerived,
    is_paid: bool,
}

impl Mission {
    /// Create a mission from raw inputs, running the cascade once.
    pub fn new(id: MissionId, raw: MissionRawInput) -> Self {
        let derived = derive_mission(&raw);
        Self {
            id,
            raw,
            derived,
            is_paid: false,
        }
    }

    // --- Accessors ---

    pub fn id(&self) -> &MissionId {
        &self.id
    }

    pub fn raw(&self) -> &MissionRawInput {
        &self.raw
    }

    pub fn derived(&self) -> &MissionDerived {
        &self.derived
    }

    pub fn client(&self) -> &ClientId {
        &self.raw.client
    }

    pub fn apporteur(&self) -> Option<&ApporteurId> {
        self.raw.apporteur.as_ref()
    }

    pub fn mois(&self) -> Month {
        self.raw.mois
    }

    pub fn annee(&self) -> i32 {
        self.raw.annee
    }

    pub fn is_paid(&self) -> bool {
        self.is_paid
    }

    /// Replace the raw inputs and re-derive the whole derived block.
    ///
    /// The payment flag survives the edit; if the mission was already
    /// paid, the stored client share is refreshed from the new inputs.
    pub fn update_raw(&mut self, raw: MissionRawInput) {
        self.raw = raw;
        self.derived = derive_mission(&self.raw);
        if self.is_paid {
            self.derived.montant_client = self.derived.montant_client_apercu;
        }
    }

    /// Toggle the payment flag without re-running derivation.
    ///
    /// Marking paid stores the live-recomputed client share; marking
    /// unpaid resets it to zero, so `montant_client == 0` holds exactly
    /// while the mission is outstanding.
    pub fn set_paid(&mut self, paid: bool) {
        self.is_paid = paid;
        self.derived.montant_client = if paid {
            self.derived.montant_client_apercu
        } else {
            Decimal::ZERO
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_raw() -> MissionRawInput {
        MissionRawInput {
            client: ClientId::new("acme"),
            apporteur: None,
            nom_mission: "Audit Q1".to_string(),
            mois: Month::Janvier,
            annee: 2025,
            ca_genere: dec!(10000),
            pct_sub: dec!(50),
            pct_client: dec!(30),
            reduction_base: Decimal::ZERO,
            frais: Frais::default(),
            commission_apporteur: Decimal::ZERO,
            pct_reliquat: Decimal::ZERO,
            allocations: vec![Allocation::new("fred", dec!(30))],
        }
    }

    #[test]
    fn test_new_mission_starts_unpaid_with_zero_client_share() {
        let mission = Mission::new(MissionId::new("m1"), sample_raw());
        assert!(!mission.is_paid());
        assert_eq!(mission.derived().montant_client, Decimal::ZERO);
        assert_eq!(mission.derived().montant_client_apercu, dec!(3000));
    }

    #[test]
    fn test_set_paid_stores_live_client_share() {
        let mut mission = Mission::new(MissionId::new("m1"), sample_raw());
        mission.set_paid(true);
        assert_eq!(mission.derived().montant_client, dec!(3000));
        mission.set_paid(false);
        assert_eq!(mission.derived().montant_client, Decimal::ZERO);
    }

    #[test]
    fn test_update_raw_rederives_everything() {
        let mut mission = Mission::new(MissionId::new("m1"), sample_raw());
        let mut raw = sample_raw();
        raw.ca_genere = dec!(20000);
        mission.update_raw(raw);
        assert_eq!(mission.derived().montant_sub, dec!(10000));
        assert_eq!(mission.derived().montant_client_apercu, dec!(6000));
        // Still unpaid: stored client share remains zero
        assert_eq!(mission.derived().montant_client, Decimal::ZERO);
    }

    #[test]
    fn test_update_raw_refreshes_paid_client_share() {
        let mut mission = Mission::new(MissionId::new("m1"), sample_raw());
        mission.set_paid(true);
        let mut raw = sample_raw();
        raw.ca_genere = dec!(20000);
        mission.update_raw(raw);
        assert!(mission.is_paid());
        assert_eq!(mission.derived().montant_client, dec!(6000));
    }

    #[test]
    fn test_frais_total() {
        let frais = Frais {
            provision_charges: dec!(100),
            frais_supp_fred: dec!(50),
            frais_gestion: dec!(25),
            frais_ml: dec!(10),
            frais_lt: dec!(5),
        };
        assert_eq!(frais.total(), dec!(190));
    }
}
