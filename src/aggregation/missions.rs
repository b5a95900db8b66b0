use crate::core::ids::{ApporteurId, ClientId, CollaborateurId};
use crate::core::mission::Mission;
use crate::core::period::{Month, Period};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated figures for one month of the target year.
///
/// Always present for all twelve months, zero-filled when no mission
/// landed there, so chart rendering downstream stays stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthAgg {
    pub annee: i32,
    pub mois: Month,
    pub ca: Decimal,
    pub subvention: Decimal,
    pub client: Decimal,
    pub encaisse: Decimal,
    pub en_attente: Decimal,
    pub commissions_collaborateurs: Decimal,
    pub commissions_apporteurs: Decimal,
    /// Per-collaborator commission breakdown for the month.
    pub par_collaborateur: BTreeMap<CollaborateurId, Decimal>,
    /// Per-apporteur commission breakdown for the month.
    pub par_apporteur: BTreeMap<ApporteurId, Decimal>,
}

impl MonthAgg {
    pub fn zero(annee: i32, mois: Month) -> Self {
        Self {
            annee,
            mois,
            ca: Decimal::ZERO,
            subvention: Decimal::ZERO,
            client: Decimal::ZERO,
            encaisse: Decimal::ZERO,
            en_attente: Decimal::ZERO,
            commissions_collaborateurs: Decimal::ZERO,
            commissions_apporteurs: Decimal::ZERO,
            par_collaborateur: BTreeMap::new(),
            par_apporteur: BTreeMap::new(),
        }
    }

    /// Total commissions going out this month, collaborators plus
    /// apporteurs.
    pub fn commissions(&self) -> Decimal {
        self.commissions_collaborateurs + self.commissions_apporteurs
    }
}

/// One client's revenue total, for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientCa {
    pub client: ClientId,
    pub ca: Decimal,
}

/// Result of aggregating a mission collection over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub ca_total: Decimal,
    pub total_subvention: Decimal,
    pub total_client: Decimal,
    /// Cash actually received: subvention plus paid client shares.
    pub total_encaisse: Decimal,
    /// Hypothetical client shares of still-unpaid missions.
    pub total_en_attente: Decimal,
    /// Exactly twelve entries, janvier through décembre of the target
    /// year, zero-filled where empty.
    pub par_mois: Vec<MonthAgg>,
    /// Clients ranked by generated revenue, descending.
    pub top_clients: Vec<ClientCa>,
    /// Year-level per-collaborator commission rollup.
    pub commissions_collaborateurs: BTreeMap<CollaborateurId, Decimal>,
    /// Year-level per-apporteur commission rollup.
    pub commissions_apporteurs: BTreeMap<ApporteurId, Decimal>,
}

/// The hypothetical client share a still-unpaid mission would bring in.
///
/// Deliberately recomputes `ca_genere * pct_client / 100` instead of
/// reading a stored field: the persisted `montant_client` is frozen at
/// zero for unpaid missions by construction, so the live formula is the
/// only source of the outstanding amount.
fn en_attente(mission: &Mission) -> Decimal {
    if mission.derived().montant_client == Decimal::ZERO {
        mission.raw().ca_genere * mission.raw().pct_client / dec!(100)
    } else {
        Decimal::ZERO
    }
}

/// Aggregate missions over a period, optionally narrowed to one client.
///
/// Filtering keeps a mission iff its year matches, its month matches
/// when the period names one, and its client matches when a filter is
/// given. An empty filtered set yields all-zero totals and a fully
/// zero-filled twelve-month breakdown, never an error.
pub fn aggregate(
    missions: &[Mission],
    period: &Period,
    client: Option<&ClientId>,
) -> AggregateResult {
    let filtered: Vec<&Mission> = missions
        .iter()
        .filter(|m| period.contains(m.annee(), m.mois()))
        .filter(|m| client.map_or(true, |c| m.client() == c))
        .collect();

    let mut par_mois: Vec<MonthAgg> = Month::ALL
        .iter()
        .map(|&mois| MonthAgg::zero(period.annee, mois))
        .collect();

    let mut ca_total = Decimal::ZERO;
    let mut total_subvention = Decimal::ZERO;
    let mut total_client = Decimal::ZERO;
    let mut total_en_attente = Decimal::ZERO;

    let mut clients: BTreeMap<ClientId, Decimal> = BTreeMap::new();
    let mut commissions_collaborateurs: BTreeMap<CollaborateurId, Decimal> = BTreeMap::new();
    let mut commissions_apporteurs: BTreeMap<ApporteurId, Decimal> = BTreeMap::new();

    for mission in &filtered {
        let derived = mission.derived();
        let attente = en_attente(mission);

        ca_total += mission.raw().ca_genere;
        total_subvention += derived.montant_sub;
        total_client += derived.montant_client;
        total_en_attente += attente;

        *clients.entry(mission.client().clone()).or_insert(Decimal::ZERO) +=
            mission.raw().ca_genere;

        let bucket = &mut par_mois[mission.mois().index()];
        bucket.ca += mission.raw().ca_genere;
        bucket.subvention += derived.montant_sub;
        bucket.client += derived.montant_client;
        bucket.encaisse += derived.montant_sub + derived.montant_client;
        bucket.en_attente += attente;

        for part in &derived.parts_collaborateurs {
            bucket.commissions_collaborateurs += part.montant;
            *bucket
                .par_collaborateur
                .entry(part.collaborateur.clone())
                .or_insert(Decimal::ZERO) += part.montant;
            *commissions_collaborateurs
                .entry(part.collaborateur.clone())
                .or_insert(Decimal::ZERO) += part.montant;
        }

        if let Some(apporteur) = mission.apporteur() {
            bucket.commissions_apporteurs += mission.raw().commission_apporteur;
            *bucket
                .par_apporteur
                .entry(apporteur.clone())
                .or_insert(Decimal::ZERO) += mission.raw().commission_apporteur;
            *commissions_apporteurs
                .entry(apporteur.clone())
                .or_insert(Decimal::ZERO) += mission.raw().commission_apporteur;
        }
    }

    // Ranking: descending CA; the BTreeMap walk makes ties resolve by
    // client id, keeping output reproducible.
    let mut top_clients: Vec<ClientCa> = clients
        .into_iter()
        .map(|(client, ca)| ClientCa { client, ca })
        .collect();
    top_clients.sort_by(|a, b| b.ca.cmp(&a.ca));

    AggregateResult {
        ca_total,
        total_subvention,
        total_client,
        total_encaisse: total_subvention + total_client,
        total_en_attente,
        par_mois,
        top_clients,
        commissions_collaborateurs,
        commissions_apporteurs,
    }
}
