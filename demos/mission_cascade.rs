//! Walkthrough of the mission financial cascade.
//!
//! Derives one mission step by step, shows what over-allocation does to
//! the reliquat, then aggregates a small year into a treasury
//! projection.

use cascade_engine::aggregation::missions::aggregate;
use cascade_engine::aggregation::treasury::rollup_treasury;
use cascade_engine::core::ids::{ClientId, MissionId};
use cascade_engine::core::mission::{Allocation, Frais, Mission, MissionRawInput};
use cascade_engine::core::money::format_eur;
use cascade_engine::core::period::{Month, Period};
use cascade_engine::derivation::cascade::derive_mission;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn raw_mission(mois: Month, ca: Decimal, allocations: Vec<Allocation>) -> MissionRawInput {
    MissionRawInput {
        client: ClientId::new("acme"),
        apporteur: None,
        nom_mission: "Accompagnement".to_string(),
        mois,
        annee: 2025,
        ca_genere: ca,
        pct_sub: dec!(50),
        pct_client: dec!(30),
        reduction_base: Decimal::ZERO,
        frais: Frais::default(),
        commission_apporteur: Decimal::ZERO,
        pct_reliquat: Decimal::ZERO,
        allocations,
    }
}

fn main() {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  cascade-engine: Mission Cascade Walkthrough  ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    // --- Scenario 1: the reference cascade ---
    println!("━━━ Scenario 1: 10 000 € at 50% subsidy, fred 30% / eric 20% ━━━\n");

    let raw = raw_mission(
        Month::Janvier,
        dec!(10_000),
        vec![
            Allocation::new("fred", dec!(30)),
            Allocation::new("eric", dec!(20)),
        ],
    );
    let d = derive_mission(&raw);

    println!("CA généré:               {}", format_eur(raw.ca_genere));
    println!("Subvention (50%):        {}", format_eur(d.montant_sub));
    println!("Base distribuable:       {}", format_eur(d.base_distribuable));
    println!("Restant après frais:     {}", format_eur(d.restant_apres_frais));
    println!("Restant après apporteur: {}", format_eur(d.restant_apres_apporteur));
    for part in &d.parts_collaborateurs {
        println!(
            "  {:<8} ({:>5} %)       {}",
            part.collaborateur,
            part.pct,
            format_eur(part.montant)
        );
    }
    println!("Reliquat final:          {}\n", format_eur(d.reliquat_final));

    // --- Scenario 2: over-allocation ---
    println!("━━━ Scenario 2: the roster claims 120% ━━━\n");

    let raw = raw_mission(
        Month::Janvier,
        dec!(10_000),
        vec![
            Allocation::new("fred", dec!(70)),
            Allocation::new("eric", dec!(50)),
        ],
    );
    let d = derive_mission(&raw);

    for part in &d.parts_collaborateurs {
        println!(
            "  {:<8} ({:>5} %)       {}",
            part.collaborateur,
            part.pct,
            format_eur(part.montant)
        );
    }
    println!(
        "Reliquat final:          {}  ← négatif: sur-engagement\n",
        format_eur(d.reliquat_final)
    );

    // --- Scenario 3: a small year rolled into treasury ---
    println!("━━━ Scenario 3: three months, treasury projection ━━━\n");

    let mut missions = vec![
        Mission::new(
            MissionId::new("jan"),
            raw_mission(Month::Janvier, dec!(8_000), vec![Allocation::new("fred", dec!(25))]),
        ),
        Mission::new(
            MissionId::new("fev"),
            raw_mission(Month::Fevrier, dec!(12_000), vec![Allocation::new("fred", dec!(25))]),
        ),
        Mission::new(
            MissionId::new("mar"),
            raw_mission(Month::Mars, dec!(6_000), vec![Allocation::new("eric", dec!(40))]),
        ),
    ];
    // The January client has settled their share
    missions[0].set_paid(true);

    let result = aggregate(&missions, &Period::year(2025), None);
    println!("CA total:    {}", format_eur(result.ca_total));
    println!("Encaissé:    {}", format_eur(result.total_encaisse));
    println!("En attente:  {}\n", format_eur(result.total_en_attente));

    let rollup = rollup_treasury(&result.par_mois, dec!(900));
    for month in rollup.iter().take(4) {
        println!(
            "  {:<10} solde {:>14}  cumul {:>14}",
            month.mois.to_string(),
            format_eur(month.solde),
            format_eur(month.solde_cumule),
        );
    }
}
