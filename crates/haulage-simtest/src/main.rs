//! Haulage Headless Tick Driver
//!
//! Seeds a world from a config file (or defaults), runs the fixed tick
//! loop and checks the economy's bookkeeping after every tick.
//! Runs entirely in-process: no rendering, no persistence.
//!
//! Usage:
//!   cargo run -p haulage-simtest
//!   cargo run -p haulage-simtest -- --size small --ticks 250 --verbose
//!   cargo run -p haulage-simtest -- --config run.json --json

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use haulage_core::config::LoadError;
use haulage_core::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about = "Haulage food economy tick driver")]
struct Cli {
    /// JSON config file; defaults are used for anything it omits
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of ticks to run
    #[arg(long)]
    ticks: Option<u32>,

    /// Override the world size (small, typical, large, very_large)
    #[arg(long, value_parser = parse_size)]
    size: Option<WorldSize>,

    /// Override the placement seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final snapshot as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Show passing checks too
    #[arg(long)]
    verbose: bool,
}

fn parse_size(name: &str) -> Result<WorldSize, String> {
    WorldSize::from_name(name).ok_or_else(|| format!("unknown world size '{}'", name))
}

// ── Check harness ───────────────────────────────────────────────────────

struct CheckResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("Haulage tick driver starting");

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut engine = match SimulationEngine::from_config(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !cli.json {
        println!("=== Haulage Tick Driver ===\n");
        println!(
            "  {:?} world, {} farms, {} settlements, seed {}, {} ticks",
            config.world_size, config.farms, config.settlements, config.seed, config.ticks
        );
    }

    let mut results = Vec::new();
    let mut totals = TickReport::default();
    let start_population = engine.total_population();

    for _ in 0..config.ticks {
        let report = match engine.advance_tick(config.dt) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("error at tick {}: {}", engine.tick() + 1, e);
                return ExitCode::FAILURE;
            }
        };
        totals.absorb(&report);
        results.extend(check_tick(&engine, &totals));
    }

    results.extend(check_run(&engine, &totals, start_population));

    let failed = results.iter().filter(|r| !r.passed).count();

    if cli.json {
        match serde_json::to_string_pretty(&engine.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_report(&engine, &totals, &results, cli.verbose);
    }

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn load_config(cli: &Cli) -> Result<SimConfig, LoadError> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }
    if let Some(size) = cli.size {
        config.world_size = size;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.validated()
}

// ── Per-tick checks ─────────────────────────────────────────────────────

/// Only failures are recorded per tick; a long clean run stays quiet.
fn check_tick(engine: &SimulationEngine, totals: &TickReport) -> Vec<CheckResult> {
    let mut results = Vec::new();
    let tick = engine.tick();
    let world = engine.world();

    // Food is neither created nor lost outside production and consumption
    let held = engine.food_on_tiles() + engine.food_in_transit();
    if totals.food_produced != totals.food_consumed + held {
        results.push(CheckResult {
            name: format!("tick_{}_food_conserved", tick),
            passed: false,
            detail: format!(
                "produced {} != consumed {} + held {}",
                totals.food_produced, totals.food_consumed, held
            ),
        });
    }

    let empty = world
        .query(&[FactKind::Population], &[])
        .into_iter()
        .filter(|&e| world.fact::<Population>(e).map_or(true, |p| p.is_empty()))
        .count();
    if empty > 0 {
        results.push(CheckResult {
            name: format!("tick_{}_no_empty_settlements", tick),
            passed: false,
            detail: format!("{} settlements with nobody left", empty),
        });
    }

    let broken = world
        .query(&[FactKind::Shipment, FactKind::Route, FactKind::Location], &[])
        .into_iter()
        .filter(|&e| {
            let (Ok(here), Ok(cargo), Ok(route)) = (
                world.fact::<Location>(e),
                world.fact::<Shipment>(e),
                world.get::<Route>(e),
            ) else {
                return true;
            };
            !route.is_intact(here.tile, cargo.destination)
        })
        .count();
    if broken > 0 {
        results.push(CheckResult {
            name: format!("tick_{}_routes_intact", tick),
            passed: false,
            detail: format!("{} shipments off their route", broken),
        });
    }

    results
}

// ── End-of-run checks ───────────────────────────────────────────────────

fn check_run(
    engine: &SimulationEngine,
    totals: &TickReport,
    start_population: u64,
) -> Vec<CheckResult> {
    let mut results = Vec::new();

    results.push(CheckResult {
        name: "population_accounted".into(),
        passed: engine.total_population() + totals.population_lost == start_population,
        detail: format!(
            "{} started, {} remain, {} lost",
            start_population,
            engine.total_population(),
            totals.population_lost
        ),
    });

    results.push(CheckResult {
        name: "shipments_accounted".into(),
        passed: totals.shipments_created
            == totals.shipments_delivered + engine.shipment_count() as u64,
        detail: format!(
            "{} created, {} delivered, {} in transit",
            totals.shipments_created,
            totals.shipments_delivered,
            engine.shipment_count()
        ),
    });

    results.push(CheckResult {
        name: "single_board".into(),
        passed: engine.world().count(&[FactKind::Board], &[]) == 1,
        detail: "board entity present".into(),
    });

    results
}

fn print_report(
    engine: &SimulationEngine,
    totals: &TickReport,
    results: &[CheckResult],
    verbose: bool,
) {
    let snapshot = engine.snapshot();

    println!("\n--- After {} ticks ---", snapshot.tick);
    println!(
        "  settlements: {}  population: {}  farms: {}",
        snapshot.settlements, snapshot.population, snapshot.farms
    );
    println!(
        "  food on tiles: {}  in transit: {} ({} shipments)",
        snapshot.food_on_tiles, snapshot.food_in_transit, snapshot.shipments
    );
    println!(
        "  produced: {}  consumed: {}  unmet: {}",
        totals.food_produced, totals.food_consumed, totals.food_unmet
    );
    println!(
        "  shipped: {} in {}  delivered: {} in {}",
        totals.food_shipped,
        totals.shipments_created,
        totals.food_delivered,
        totals.shipments_delivered
    );
    println!(
        "  routes planned: {}  unreachable: {}  dropped: {}",
        totals.routes_planned, totals.routes_unreachable, totals.routes_dropped
    );
    println!(
        "  people lost: {}  settlements abandoned: {}",
        totals.population_lost, totals.settlements_abandoned
    );

    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} checks passed, {} failed ===",
        passed,
        results.len(),
        failed
    );
}
