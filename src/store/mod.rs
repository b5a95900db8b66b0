//! Persistence seam for the engines.
//!
//! Every engine in this crate takes fully materialized, immutable
//! snapshots of its inputs. [`Repository`] is the injected boundary
//! that supplies those snapshots and owns the mission lifecycle
//! (create runs the cascade once, edit re-derives in full, the payment
//! flag toggles without re-derivation). [`MemoryRepository`] is the
//! in-memory implementation backing the CLI and tests.

use crate::core::charge::{Charge, Depense};
use crate::core::ids::{ApporteurId, ClientId, CollaborateurId, MissionId};
use crate::core::invoice::Invoice;
use crate::core::mission::{Mission, MissionRawInput};
use crate::core::refs::{Apporteur, Client, Collaborateur};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("mission not found: {0}")]
    MissionNotFound(MissionId),
}

/// Read and lifecycle access to the persisted dataset.
pub trait Repository {
    fn missions(&self) -> &[Mission];
    fn charges(&self) -> &[Charge];
    fn depenses(&self) -> &[Depense];
    fn invoices(&self) -> &[Invoice];

    fn mission(&self, id: &MissionId) -> Option<&Mission>;

    /// Create a mission from raw inputs, running derivation once.
    fn create_mission(&mut self, raw: MissionRawInput) -> MissionId;

    /// Replace a mission's raw inputs, re-deriving everything.
    fn update_mission(&mut self, id: &MissionId, raw: MissionRawInput) -> Result<(), StoreError>;

    /// Toggle a mission's payment flag without re-derivation.
    fn set_paid(&mut self, id: &MissionId, paid: bool) -> Result<(), StoreError>;
}

/// A mission as it appears in a JSON dataset file: raw inputs plus an
/// optional id and payment flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionEntry {
    #[serde(default)]
    pub id: Option<MissionId>,
    #[serde(flatten)]
    pub raw: MissionRawInput,
    #[serde(default)]
    pub is_paid: bool,
}

/// JSON schema of a dataset file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub apporteurs: Vec<Apporteur>,
    #[serde(default)]
    pub collaborateurs: Vec<Collaborateur>,
    #[serde(default)]
    pub missions: Vec<MissionEntry>,
    #[serde(default)]
    pub charges: Vec<Charge>,
    #[serde(default)]
    pub depenses: Vec<Depense>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

/// In-memory repository.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    missions: Vec<Mission>,
    clients: Vec<Client>,
    apporteurs: Vec<Apporteur>,
    collaborateurs: Vec<Collaborateur>,
    charges: Vec<Charge>,
    depenses: Vec<Depense>,
    invoices: Vec<Invoice>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize a dataset: every mission entry goes through the
    /// cascade, then paid entries get their payment flag applied.
    pub fn from_dataset(dataset: Dataset) -> Self {
        let mut repo = Self {
            clients: dataset.clients,
            apporteurs: dataset.apporteurs,
            collaborateurs: dataset.collaborateurs,
            charges: dataset.charges,
            depenses: dataset.depenses,
            invoices: dataset.invoices,
            missions: Vec::with_capacity(dataset.missions.len()),
        };
        for entry in dataset.missions {
            let id = entry
                .id
                .unwrap_or_else(|| MissionId::new(Uuid::new_v4().to_string()));
            let mut mission = Mission::new(id, entry.raw);
            if entry.is_paid {
                mission.set_paid(true);
            }
            repo.missions.push(mission);
        }
        repo
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn apporteurs(&self) -> &[Apporteur] {
        &self.apporteurs
    }

    pub fn collaborateurs(&self) -> &[Collaborateur] {
        &self.collaborateurs
    }

    /// Display label for a client id, falling back to the id itself.
    pub fn client_nom<'a>(&'a self, id: &'a ClientId) -> &'a str {
        self.clients
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.nom.as_str())
            .unwrap_or(id.as_str())
    }

    /// Display label for a collaborator id, falling back to the id.
    pub fn collaborateur_nom<'a>(&'a self, id: &'a CollaborateurId) -> &'a str {
        self.collaborateurs
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.nom.as_str())
            .unwrap_or(id.as_str())
    }

    /// Display label for an apporteur id, falling back to the id.
    pub fn apporteur_nom<'a>(&'a self, id: &'a ApporteurId) -> &'a str {
        self.apporteurs
            .iter()
            .find(|a| &a.id == id)
            .map(|a| a.nom.as_str())
            .unwrap_or(id.as_str())
    }

    fn mission_mut(&mut self, id: &MissionId) -> Result<&mut Mission, StoreError> {
        self.missions
            .iter_mut()
            .find(|m| m.id() == id)
            .ok_or_else(|| StoreError::MissionNotFound(id.clone()))
    }
}

impl Repository for MemoryRepository {
    fn missions(&self) -> &[Mission] {
        &self.missions
    }

    fn charges(&self) -> &[Charge] {
        &self.charges
    }

    fn depenses(&self) -> &[Depense] {
        &self.depenses
    }

    fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    fn mission(&self, id: &MissionId) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id() == id)
    }

    fn create_mission(&mut self, raw: MissionRawInput) -> MissionId {
        let id = MissionId::new(Uuid::new_v4().to_string());
        self.missions.push(Mission::new(id.clone(), raw));
        id
    }

    fn update_mission(&mut self, id: &MissionId, raw: MissionRawInput) -> Result<(), StoreError> {
        self.mission_mut(id)?.update_raw(raw);
        Ok(())
    }

    fn set_paid(&mut self, id: &MissionId, paid: bool) -> Result<(), StoreError> {
        self.mission_mut(id)?.set_paid(paid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mission::Frais;
    use crate::core::period::Month;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample_raw() -> MissionRawInput {
        MissionRawInput {
            client: ClientId::new("acme"),
            apporteur: None,
            nom_mission: "Conseil".to_string(),
            mois: Month::Avril,
            annee: 2025,
            ca_genere: dec!(8000),
            pct_sub: dec!(50),
            pct_client: dec!(25),
            reduction_base: Decimal::ZERO,
            frais: Frais::default(),
            commission_apporteur: Decimal::ZERO,
            pct_reliquat: Decimal::ZERO,
            allocations: vec![],
        }
    }

    #[test]
    fn test_create_derives_once() {
        let mut repo = MemoryRepository::new();
        let id = repo.create_mission(sample_raw());
        let mission = repo.mission(&id).unwrap();
        assert_eq!(mission.derived().montant_sub, dec!(4000));
        assert!(!mission.is_paid());
    }

    #[test]
    fn test_update_rederives() {
        let mut repo = MemoryRepository::new();
        let id = repo.create_mission(sample_raw());
        let mut raw = sample_raw();
        raw.pct_sub = dec!(100);
        repo.update_mission(&id, raw).unwrap();
        assert_eq!(repo.mission(&id).unwrap().derived().montant_sub, dec!(8000));
    }

    #[test]
    fn test_set_paid_round_trip() {
        let mut repo = MemoryRepository::new();
        let id = repo.create_mission(sample_raw());
        repo.set_paid(&id, true).unwrap();
        assert_eq!(
            repo.mission(&id).unwrap().derived().montant_client,
            dec!(2000)
        );
        repo.set_paid(&id, false).unwrap();
        assert_eq!(
            repo.mission(&id).unwrap().derived().montant_client,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_unknown_mission_errors() {
        let mut repo = MemoryRepository::new();
        let missing = MissionId::new("nope");
        assert!(repo.set_paid(&missing, true).is_err());
        assert!(repo.update_mission(&missing, sample_raw()).is_err());
    }

    #[test]
    fn test_from_dataset_applies_payment_flags() {
        let dataset = Dataset {
            missions: vec![MissionEntry {
                id: Some(MissionId::new("m1")),
                raw: sample_raw(),
                is_paid: true,
            }],
            ..Dataset::default()
        };
        let repo = MemoryRepository::from_dataset(dataset);
        let mission = repo.mission(&MissionId::new("m1")).unwrap();
        assert!(mission.is_paid());
        assert_eq!(mission.derived().montant_client, dec!(2000));
    }

    #[test]
    fn test_label_fallback_to_id() {
        let repo = MemoryRepository::new();
        assert_eq!(repo.client_nom(&ClientId::new("ghost")), "ghost");
    }
}
