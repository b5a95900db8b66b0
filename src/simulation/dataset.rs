use crate::core::charge::Charge;
use crate::core::ids::{ApporteurId, ClientId, CollaborateurId, MissionId};
use crate::core::invoice::{Invoice, InvoiceItem, InvoiceStatus};
use crate::core::mission::{Allocation, Frais, MissionRawInput};
use crate::core::period::Month;
use crate::core::refs::{Apporteur, Client, Collaborateur};
use crate::store::{Dataset, MissionEntry};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Configuration for generating a random dataset.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Target year for all generated records.
    pub annee: i32,
    pub mission_count: usize,
    pub client_count: usize,
    pub collaborateur_count: usize,
    pub invoice_count: usize,
    /// Seed for reproducible output; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            annee: 2025,
            mission_count: 30,
            client_count: 8,
            collaborateur_count: 5,
            invoice_count: 20,
            seed: None,
        }
    }
}

fn random_amount(rng: &mut StdRng, min: u32, max: u32) -> Decimal {
    Decimal::from(rng.gen_range(min..=max))
}

/// Generate a random but plausible dataset for the target year.
///
/// Deterministic when a seed is given. Roughly half the missions are
/// marked paid and one mission in four has a referral commission.
pub fn generate_dataset(config: &DatasetConfig) -> Dataset {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let clients: Vec<Client> = (0..config.client_count)
        .map(|i| Client {
            id: ClientId::new(format!("client-{i:03}")),
            nom: format!("Client {i:03}"),
            note: None,
        })
        .collect();

    let collaborateurs: Vec<Collaborateur> = (0..config.collaborateur_count)
        .map(|i| Collaborateur {
            id: CollaborateurId::new(format!("collab-{i:02}")),
            nom: format!("Collaborateur {i:02}"),
            note: None,
        })
        .collect();

    let apporteurs = vec![
        Apporteur {
            id: ApporteurId::new("apporteur-00"),
            nom: "Apporteur 00".to_string(),
            note: None,
        },
        Apporteur {
            id: ApporteurId::new("apporteur-01"),
            nom: "Apporteur 01".to_string(),
            note: None,
        },
    ];

    let missions: Vec<MissionEntry> = (0..config.mission_count)
        .map(|_| {
            let client = &clients[rng.gen_range(0..clients.len())];
            let mois = Month::from_index(rng.gen_range(0..12)).unwrap();
            let with_apporteur = rng.gen_bool(0.25);

            // Two or three collaborators, 10-30% each
            let max_roster = collaborateurs.len().min(3);
            let roster_size = rng.gen_range(max_roster.min(2)..=max_roster);
            let allocations: Vec<Allocation> = (0..roster_size)
                .map(|i| {
                    Allocation::new(
                        collaborateurs[i].id.clone(),
                        Decimal::from(rng.gen_range(10..=30u32)),
                    )
                })
                .collect();

            let raw = MissionRawInput {
                client: client.id.clone(),
                apporteur: with_apporteur.then(|| apporteurs[0].id.clone()),
                nom_mission: format!("Mission {}", Uuid::new_v4()),
                mois,
                annee: config.annee,
                ca_genere: random_amount(&mut rng, 2_000, 50_000),
                pct_sub: Decimal::from(rng.gen_range(30..=70u32)),
                pct_client: Decimal::from(rng.gen_range(0..=40u32)),
                reduction_base: random_amount(&mut rng, 0, 500),
                frais: Frais {
                    provision_charges: random_amount(&mut rng, 0, 800),
                    frais_gestion: random_amount(&mut rng, 0, 300),
                    ..Frais::default()
                },
                commission_apporteur: if with_apporteur {
                    random_amount(&mut rng, 100, 1_000)
                } else {
                    Decimal::ZERO
                },
                pct_reliquat: Decimal::ZERO,
                allocations,
            };

            MissionEntry {
                id: Some(MissionId::new(Uuid::new_v4().to_string())),
                raw,
                is_paid: rng.gen_bool(0.5),
            }
        })
        .collect();

    let charges = vec![
        Charge::mensuelle("Loyer", random_amount(&mut rng, 400, 1_200)),
        Charge::mensuelle("Assurance", random_amount(&mut rng, 50, 200)),
        Charge::ponctuelle(
            "Matériel",
            random_amount(&mut rng, 500, 2_000),
            Month::from_index(rng.gen_range(0..12)).unwrap(),
            config.annee,
        ),
    ];

    let statuses = [
        InvoiceStatus::Paid,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
        InvoiceStatus::Draft,
    ];
    let invoices: Vec<Invoice> = (0..config.invoice_count)
        .map(|_| {
            let month = rng.gen_range(1..=12u32);
            let day = rng.gen_range(1..=28u32);
            let date = NaiveDate::from_ymd_opt(config.annee, month, day).unwrap();
            let status = statuses[rng.gen_range(0..statuses.len())];
            // Ids come from the rng, not from entropy, so a seeded run
            // reproduces the same invoices byte for byte.
            let mut invoice = Invoice::with_id(Uuid::from_u128(rng.gen()), date, status)
                .with_client(clients[rng.gen_range(0..clients.len())].id.clone());
            for _ in 0..rng.gen_range(1..=3) {
                invoice.add_item(InvoiceItem::new(
                    Decimal::from(rng.gen_range(1..=10u32)),
                    random_amount(&mut rng, 100, 2_000),
                    Decimal::ZERO,
                    dec!(20),
                ));
            }
            invoice
        })
        .collect();

    Dataset {
        clients,
        apporteurs,
        collaborateurs,
        missions,
        charges,
        depenses: Vec::new(),
        invoices,
    }
}
