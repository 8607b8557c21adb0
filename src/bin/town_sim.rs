//! Headless Town Simulation
//!
//! Founds one settlement, then plays a number of days: daily income, one
//! greedy build per day and weekly creature growth. Prints the persisted
//! record as JSON at the end.

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use town_core::catalog::GameCatalog;
use town_core::city::{try_build, ResourceLedger, Settlement, SettlementRecord, TurnClock, WeekModifiers};
use town_core::core::types::{BuildingId, Faction, PlayerColor, ResourceKind};
use town_core::core::{Result, TownConfig};

/// Headless Town Simulation - greedy builder over the building catalog
#[derive(Parser, Debug)]
#[command(name = "town_sim")]
#[command(about = "Found a settlement, simulate days of building and growth, dump the result")]
struct Args {
    /// Building, creature and spell catalog
    #[arg(long, default_value = "data/town_catalog.toml")]
    catalog: PathBuf,

    /// Optional rules override file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Faction: knight, barbarian, sorceress, warlock, wizard or necromancer
    #[arg(long, default_value = "knight", value_parser = parse_faction)]
    faction: Faction,

    /// Number of days to simulate
    #[arg(long, default_value_t = 28)]
    days: u32,

    /// Starting gold
    #[arg(long, default_value_t = 5000)]
    gold: u32,

    /// Gold granted at the start of every day
    #[arg(long, default_value_t = 1000)]
    income: u32,

    /// Wood and ore granted at the start of every day
    #[arg(long, default_value_t = 5)]
    materials: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Freelancer week modifier
    #[arg(long)]
    freelancer: bool,

    /// Call to arms week modifier
    #[arg(long)]
    call_to_arms: bool,

    /// Write the binary record to this path
    #[arg(long)]
    out: Option<PathBuf>,
}

fn parse_faction(value: &str) -> std::result::Result<Faction, String> {
    match value.to_ascii_lowercase().as_str() {
        "knight" => Ok(Faction::Knight),
        "barbarian" => Ok(Faction::Barbarian),
        "sorceress" => Ok(Faction::Sorceress),
        "warlock" => Ok(Faction::Warlock),
        "wizard" => Ok(Faction::Wizard),
        "necromancer" => Ok(Faction::Necromancer),
        other => Err(format!("unknown faction '{other}'")),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let catalog = GameCatalog::load_from_toml(&args.catalog)?;
    let config = match &args.config {
        Some(path) => TownConfig::load_from_toml(path)?,
        None => TownConfig::default(),
    };

    tracing::info!(seed, faction = ?args.faction, days = args.days, "Starting town simulation");

    let mut towns = vec![Settlement::new(0, args.faction, PlayerColor::Blue)];
    towns[0].found(&catalog, &config, &mut rng);

    let mut ledger = ResourceLedger::gold(args.gold);
    let income = ResourceLedger::gold(args.income)
        .with(ResourceKind::Wood, args.materials)
        .with(ResourceKind::Ore, args.materials);
    let modifiers = WeekModifiers {
        freelancer: args.freelancer,
        call_to_arms: args.call_to_arms,
    };
    let mut clock = TurnClock::new();
    let mut build_log: Vec<(u32, BuildingId)> = Vec::new();

    for _ in 0..args.days {
        ledger.grant(&income);

        let town = &mut towns[0];
        let candidates: Vec<BuildingId> = town
            .available()
            .iter()
            .copied()
            .filter(|b| !town.is_built(*b))
            .collect();
        for building in candidates {
            if try_build(building, town, &mut ledger, &catalog, &config, &mut rng).is_built() {
                build_log.push((clock.day(), building));
                break;
            }
        }

        clock.advance(&mut towns, &catalog, &config, modifiers);
    }

    let town = &towns[0];
    println!("\n=== {} ({:?}) after {} days ===", town.name, town.faction, clock.day());
    for (day, building) in &build_log {
        println!("  day {:>3}: {}", day, catalog.buildings.get(*building).name);
    }
    println!("  castle level: {}", town.castle_level(&catalog.buildings));
    println!("  turret multiplier: {:.1}", town.turret_damage_multiplier(&catalog.buildings));
    println!(
        "  gold left: {} ({} resources total)",
        ledger.get(ResourceKind::Gold),
        ledger.total()
    );
    for stack in town.available_troops() {
        println!("  {:>6} x {}", stack.count, catalog.creatures.get(stack.unit).name);
    }

    let record = SettlementRecord::from(town);
    println!("{}", record.to_json()?);

    if let Some(path) = &args.out {
        record.save(path)?;
        tracing::info!(path = %path.display(), "Settlement record written");
    }

    Ok(())
}
