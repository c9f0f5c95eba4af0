//! vitals_sim - Headless encounter simulation for vitals_core
//!
//! Usage: `vitals_sim [encounter.toml] [catalog.toml]`
//!
//! Without arguments the bundled encounter runs against the default catalog.
//! A catalog file is layered over the built-in presets.

mod simulation;

use rand::SeedableRng;
use simulation::{build_world, EncounterSimulation};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use vitals_core::config::{load_catalog_config, load_encounter, parse_encounter, ConfigError, EncounterConfig};
use vitals_core::{Catalog, World};

const DEFAULT_ENCOUNTER: &str = include_str!("../config/encounter.toml");

#[derive(Error, Debug)]
enum SimError {
    #[error("Failed to load encounter: {0}")]
    Encounter(ConfigError),
    #[error("Failed to load catalog: {0}")]
    Catalog(ConfigError),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SimError> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let encounter = match args.first() {
        Some(path) => load_encounter(Path::new(path)).map_err(SimError::Encounter)?,
        None => parse_encounter(DEFAULT_ENCOUNTER).map_err(SimError::Encounter)?,
    };

    let catalog = match args.get(1) {
        Some(path) => {
            let config = load_catalog_config(Path::new(path)).map_err(SimError::Catalog)?;
            Catalog::builder()
                .presets()
                .config(&config)
                .map_err(SimError::Catalog)?
                .build()
        }
        None => Catalog::default_catalog().map_err(SimError::Catalog)?,
    };

    let mut world = build_world(&encounter, Arc::new(catalog));
    let mut rng = rand::rngs::StdRng::seed_from_u64(encounter.seed);
    let result = EncounterSimulation::run(&mut world, &encounter, &mut rng);

    print_summary(&encounter, &world, &result);
    Ok(())
}

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

fn print_summary(encounter: &EncounterConfig, world: &World, result: &EncounterSimulation) {
    separator("ENCOUNTER");
    println!("  Duration: {:.1}s ({} frames, {} tick passes)", result.total_time, result.frames, result.tick_passes);
    println!(
        "  Hits: {} resolved, {} rejected ({:.0}% success)",
        result.hits_resolved,
        result.hits_rejected,
        result.success_rate()
    );
    println!("  Damage: {} ({:.1} DPS)", result.total_damage, result.dps());
    println!("  Healing: {}", result.total_healing);
    println!("  Death saves: {}", result.saves);

    separator("ENTITIES");
    for spawn in &encounter.entities {
        let Some(entity) = world.get(&spawn.id) else {
            continue;
        };
        let state = if entity.is_alive() { "alive" } else { "dead" };
        println!(
            "  {}: {}/{} ({:.0}%) {}",
            entity.id(),
            entity.current_health(),
            entity.max_health(),
            entity.health_fraction() * 100.0,
            state
        );
        for applied in entity.applied_statuses() {
            println!("    - {} x{}", applied.status.name(), applied.stack_count);
        }
    }

    if !result.deaths.is_empty() {
        separator("DEATHS");
        for (id, at) in &result.deaths {
            println!("  {} at {:.1}s", id, at);
        }
    }
}
