//! cascade-engine CLI
//!
//! Run mission aggregation, treasury projection and tax estimates over
//! a JSON dataset from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Yearly report with monthly breakdown and top clients
//! cascade-engine report --input dataset.json --year 2025
//!
//! # Treasury projection
//! cascade-engine treasury --input dataset.json --year 2025
//!
//! # TVA position for a quarter
//! cascade-engine tva --input dataset.json --start 2025-01-01 --end 2025-03-31
//!
//! # Generate a random dataset for testing
//! cascade-engine generate --missions 40 --year 2025 --output dataset.json
//! ```

use cascade_engine::aggregation::charges::{mission_provisions, rollup_charges};
use cascade_engine::aggregation::missions::aggregate;
use cascade_engine::aggregation::treasury::rollup_treasury;
use cascade_engine::core::ids::ClientId;
use cascade_engine::core::money::format_eur;
use cascade_engine::core::period::{Month, Period};
use cascade_engine::simulation::dataset::{generate_dataset, DatasetConfig};
use cascade_engine::store::{Dataset, MemoryRepository, Repository};
use cascade_engine::tax::tva::calculate_tva;
use cascade_engine::tax::urssaf::calculate_urssaf;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"cascade-engine — mission revenue cascade and treasury aggregation

USAGE:
    cascade-engine <COMMAND> [OPTIONS]

COMMANDS:
    report      Aggregate missions for a period (totals, monthly breakdown, top clients)
    treasury    Monthly treasury projection with cumulative balance
    charges     Provision vs fixed-charges rollup for a year
    tva         TVA position for a date range
    urssaf      URSSAF contribution estimate for a date range
    generate    Generate a random dataset (for testing)
    help        Show this message

OPTIONS (report, treasury, charges):
    --input <FILE>      Path to JSON dataset file
    --year <YYYY>       Target year (default: 2025)
    --month <NAME>      Narrow to one French month name (report only)
    --client <ID>       Narrow to one client (report only)
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (tva, urssaf):
    --input <FILE>      Path to JSON dataset file
    --start <DATE>      Period start, YYYY-MM-DD
    --end <DATE>        Period end, YYYY-MM-DD
    --rate <PCT>        Contribution rate (urssaf only, default: 21.2)
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --missions <N>      Number of missions (default: 30)
    --clients <N>       Number of clients (default: 8)
    --year <YYYY>       Target year (default: 2025)
    --seed <N>          RNG seed for reproducible output
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    cascade-engine report --input dataset.json --year 2025
    cascade-engine report --input dataset.json --year 2025 --month juin --format json
    cascade-engine treasury --input dataset.json --year 2025
    cascade-engine tva --input dataset.json --start 2025-01-01 --end 2025-03-31
    cascade-engine generate --missions 40 --seed 42 --output dataset.json"#
    );
}

/// Common options shared by the reporting commands.
#[derive(Default)]
struct Options {
    input: Option<String>,
    year: Option<i32>,
    month: Option<Month>,
    client: Option<ClientId>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    rate: Option<Decimal>,
    seed: Option<u64>,
    missions: Option<usize>,
    clients_count: Option<usize>,
    output: Option<String>,
    json: bool,
}

fn required(value: Option<String>, flag: &str) -> String {
    value.unwrap_or_else(|| {
        eprintln!("{flag} requires a value");
        process::exit(1);
    })
}

fn parse_options(args: &[String]) -> Options {
    let mut opts = Options::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                opts.input = Some(required(args.get(i).cloned(), "--input"));
            }
            "--year" => {
                i += 1;
                opts.year = Some(
                    required(args.get(i).cloned(), "--year")
                        .parse()
                        .unwrap_or_else(|e| {
                            eprintln!("Invalid year: {e}");
                            process::exit(1);
                        }),
                );
            }
            "--month" => {
                i += 1;
                opts.month = Some(
                    required(args.get(i).cloned(), "--month")
                        .parse()
                        .unwrap_or_else(|e| {
                            eprintln!("{e}");
                            process::exit(1);
                        }),
                );
            }
            "--client" => {
                i += 1;
                opts.client = Some(ClientId::new(required(args.get(i).cloned(), "--client")));
            }
            "--start" => {
                i += 1;
                opts.start = Some(parse_date(&required(args.get(i).cloned(), "--start")));
            }
            "--end" => {
                i += 1;
                opts.end = Some(parse_date(&required(args.get(i).cloned(), "--end")));
            }
            "--rate" => {
                i += 1;
                opts.rate = Some(
                    required(args.get(i).cloned(), "--rate")
                        .parse()
                        .unwrap_or_else(|e| {
                            eprintln!("Invalid rate: {e}");
                            process::exit(1);
                        }),
                );
            }
            "--seed" => {
                i += 1;
                opts.seed = Some(
                    required(args.get(i).cloned(), "--seed")
                        .parse()
                        .unwrap_or_else(|e| {
                            eprintln!("Invalid seed: {e}");
                            process::exit(1);
                        }),
                );
            }
            "--missions" => {
                i += 1;
                opts.missions = Some(
                    required(args.get(i).cloned(), "--missions")
                        .parse()
                        .unwrap_or_else(|e| {
                            eprintln!("Invalid mission count: {e}");
                            process::exit(1);
                        }),
                );
            }
            "--clients" => {
                i += 1;
                opts.clients_count = Some(
                    required(args.get(i).cloned(), "--clients")
                        .parse()
                        .unwrap_or_else(|e| {
                            eprintln!("Invalid client count: {e}");
                            process::exit(1);
                        }),
                );
            }
            "--output" => {
                i += 1;
                opts.output = Some(required(args.get(i).cloned(), "--output"));
            }
            "--format" => {
                i += 1;
                let format = required(args.get(i).cloned(), "--format");
                match format.as_str() {
                    "json" => opts.json = true,
                    "text" => opts.json = false,
                    other => {
                        eprintln!("Unknown format '{other}': expected 'text' or 'json'");
                        process::exit(1);
                    }
                }
            }
            other => {
                eprintln!("Unknown option: {other}");
                process::exit(1);
            }
        }
        i += 1;
    }
    opts
}

fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_else(|e| {
        eprintln!("Invalid date '{s}': {e} (expected YYYY-MM-DD)");
        process::exit(1);
    })
}

fn load_repository(opts: &Options) -> MemoryRepository {
    let path = opts.input.clone().unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    let content = fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        process::exit(1);
    });
    let dataset: Dataset = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON dataset: {e}");
        process::exit(1);
    });
    MemoryRepository::from_dataset(dataset)
}

fn period_of(opts: &Options) -> Period {
    let annee = opts.year.unwrap_or(2025);
    match opts.month {
        Some(mois) => Period::month(annee, mois),
        None => Period::year(annee),
    }
}

fn date_range(opts: &Options) -> (NaiveDate, NaiveDate) {
    match (opts.start, opts.end) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            eprintln!("Error: --start and --end are required");
            process::exit(1);
        }
    }
}

fn cmd_report(args: &[String]) {
    let opts = parse_options(args);
    let repo = load_repository(&opts);
    let period = period_of(&opts);
    let result = aggregate(repo.missions(), &period, opts.client.as_ref());

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&result).unwrap());
        return;
    }

    println!("=== Rapport {} ===", period.annee);
    println!("CA total:        {}", format_eur(result.ca_total));
    println!("Subventions:     {}", format_eur(result.total_subvention));
    println!("Part client:     {}", format_eur(result.total_client));
    println!("Encaissé:        {}", format_eur(result.total_encaisse));
    println!("En attente:      {}", format_eur(result.total_en_attente));

    println!("\n--- Par mois ---");
    for month in &result.par_mois {
        if month.ca == Decimal::ZERO && month.commissions() == Decimal::ZERO {
            continue;
        }
        println!(
            "  {:<10} CA {:>14}  encaissé {:>14}  commissions {:>14}",
            month.mois.to_string(),
            format_eur(month.ca),
            format_eur(month.encaisse),
            format_eur(month.commissions()),
        );
    }

    println!("\n--- Top clients ---");
    for entry in &result.top_clients {
        println!(
            "  {:<24} {:>14}",
            repo.client_nom(&entry.client),
            format_eur(entry.ca)
        );
    }

    if !result.commissions_collaborateurs.is_empty() {
        println!("\n--- Commissions collaborateurs ---");
        for (id, montant) in &result.commissions_collaborateurs {
            println!(
                "  {:<24} {:>14}",
                repo.collaborateur_nom(id),
                format_eur(*montant)
            );
        }
    }
    if !result.commissions_apporteurs.is_empty() {
        println!("\n--- Commissions apporteurs ---");
        for (id, montant) in &result.commissions_apporteurs {
            println!(
                "  {:<24} {:>14}",
                repo.apporteur_nom(id),
                format_eur(*montant)
            );
        }
    }
}

fn cmd_treasury(args: &[String]) {
    let opts = parse_options(args);
    let repo = load_repository(&opts);
    let period = period_of(&opts);
    let result = aggregate(repo.missions(), &period, None);

    let fixed_total: Decimal = repo
        .charges()
        .iter()
        .filter(|c| c.is_recurring())
        .map(|c| c.montant_mensuel)
        .sum();

    let rollup = rollup_treasury(&result.par_mois, fixed_total);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&rollup).unwrap());
        return;
    }

    println!("=== Trésorerie {} ===", period.annee);
    println!("Charges fixes mensuelles: {}", format_eur(fixed_total));
    for month in &rollup {
        println!(
            "  {:<10} encaissements {:>14}  décaissements {:>14}  solde {:>14}  cumul {:>14}",
            month.mois.to_string(),
            format_eur(month.encaissements),
            format_eur(month.total_decaissements),
            format_eur(month.solde),
            format_eur(month.solde_cumule),
        );
    }
}

fn cmd_charges(args: &[String]) {
    let opts = parse_options(args);
    let repo = load_repository(&opts);
    let annee = opts.year.unwrap_or(2025);

    let provisions = mission_provisions(repo.missions());
    let rollup = rollup_charges(annee, repo.charges(), &provisions);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&rollup).unwrap());
        return;
    }

    println!("=== Charges {annee} ===");
    println!(
        "Charges fixes mensuelles: {}",
        format_eur(rollup.total_charges_fixes)
    );
    println!("Total annuel:             {}", format_eur(rollup.total_annuel));
    for month in &rollup.par_mois {
        println!(
            "  {:<10} provision {:>12}  charges {:>12}  reliquat {:>12}",
            month.mois.to_string(),
            format_eur(month.provision),
            format_eur(month.charges_fixes),
            format_eur(month.reliquat),
        );
    }
    println!("Reliquat final:           {}", format_eur(rollup.reliquat_final));
}

fn cmd_tva(args: &[String]) {
    let opts = parse_options(args);
    let repo = load_repository(&opts);
    let (start, end) = date_range(&opts);

    let result = calculate_tva(start, end, repo.invoices(), repo.depenses());

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&result).unwrap());
        return;
    }

    println!("=== TVA {start} → {end} ===");
    println!("TVA collectée:   {}", format_eur(result.tva_collectee));
    println!("TVA déductible:  {}", format_eur(result.tva_deductible));
    println!("TVA nette due:   {}", format_eur(result.tva_net_due));
    if result.is_credit() {
        println!("(crédit de TVA)");
    }
}

fn cmd_urssaf(args: &[String]) {
    let opts = parse_options(args);
    let repo = load_repository(&opts);
    let (start, end) = date_range(&opts);
    let rate = opts.rate.unwrap_or(dec!(21.2));

    let result = calculate_urssaf(start, end, repo.invoices(), rate);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&result).unwrap());
        return;
    }

    println!("=== URSSAF {start} → {end} ===");
    println!("CA encaissé TTC: {}", format_eur(result.total_encaisse));
    println!("Taux:            {} %", result.taux);
    println!("Cotisations:     {}", format_eur(result.cotisations));
    if result.plafond_depasse() {
        println!("Attention: plafond de CA services dépassé");
    }
}

fn cmd_generate(args: &[String]) {
    let opts = parse_options(args);
    let config = DatasetConfig {
        annee: opts.year.unwrap_or(2025),
        mission_count: opts.missions.unwrap_or(30),
        client_count: opts.clients_count.unwrap_or(8),
        seed: opts.seed,
        ..DatasetConfig::default()
    };

    let dataset = generate_dataset(&config);
    let json = serde_json::to_string_pretty(&dataset).unwrap();

    if let Some(path) = opts.output {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{path}': {e}");
            process::exit(1);
        });
        eprintln!(
            "Generated {} missions across {} clients → {}",
            config.mission_count, config.client_count, path
        );
    } else {
        println!("{json}");
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "report" => cmd_report(rest),
        "treasury" => cmd_treasury(rest),
        "charges" => cmd_charges(rest),
        "tva" => cmd_tva(rest),
        "urssaf" => cmd_urssaf(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {command}");
            print_usage();
            process::exit(1);
        }
    }
}
