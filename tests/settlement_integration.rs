//! Integration tests for the settlement core
//!
//! These tests drive the public API against the bundled catalog:
//! - Bootstrap of a freshly placed town (starter set, available set, spells)
//! - Construction rules (atomicity, daily cap, prerequisite gating)
//! - Weekly growth through the turn clock
//! - Persistence of a played settlement in both forms

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use town_core::catalog::GameCatalog;
use town_core::city::{
    attempt, populate_for_tier, try_build, weekly_growth, BuildOutcome, ResourceLedger, Settlement,
    SettlementRecord, TurnClock, WeekModifiers,
};
use town_core::core::types::{BuildingId, Faction, PlayerColor, ResourceKind, SpellId, UnitId};
use town_core::core::TownConfig;

const FORT: BuildingId = BuildingId(1);
const CASTLE: BuildingId = BuildingId(2);
const LEFT_TURRET: BuildingId = BuildingId(4);
const TAVERN: BuildingId = BuildingId(6);
const MARKETPLACE: BuildingId = BuildingId(8);
const MAGE_GUILD_1: BuildingId = BuildingId(21);
const MAGE_GUILD_2: BuildingId = BuildingId(22);
const THATCHED_HUT: BuildingId = BuildingId(30);
const ARCHERY_RANGE: BuildingId = BuildingId(31);
const PEASANT: UnitId = UnitId(1);

fn catalog() -> GameCatalog {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/town_catalog.toml");
    GameCatalog::load_from_toml(&path).unwrap()
}

fn no_tier_two() -> TownConfig {
    TownConfig {
        tier2_starter_chance: 0.0,
        ..TownConfig::default()
    }
}

fn founded_knight_town(catalog: &GameCatalog, config: &TownConfig, rng: &mut ChaCha8Rng) -> Settlement {
    let mut town = Settlement::new(1, Faction::Knight, PlayerColor::Blue);
    town.found(catalog, config, rng);
    town
}

// ============================================================================
// Bootstrap
// ============================================================================

#[test]
fn test_found_knight_town() {
    let catalog = catalog();
    let config = no_tier_two();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let town = founded_knight_town(&catalog, &config, &mut rng);

    let built: Vec<_> = town.built().iter().copied().collect();
    assert_eq!(built, vec![FORT, TAVERN, THATCHED_HUT]);
    assert_eq!(town.troop_count(PEASANT), 6);
    assert!(town.is_available(CASTLE));
    assert!(town.is_available(ARCHERY_RANGE));
    assert!(!town.is_available(BuildingId(40)));
    assert!(!town.name.is_empty());
    assert_eq!(town.castle_level(&catalog.buildings), 1);
}

#[test]
fn test_setup_buildings_twice_matches_once() {
    let catalog = catalog();
    let config = TownConfig::default();

    for seed in 0..16 {
        let mut once = Settlement::new(3, Faction::Sorceress, PlayerColor::Green);
        once.setup_buildings(&catalog, &config, &mut ChaCha8Rng::seed_from_u64(seed));

        let mut twice = Settlement::new(3, Faction::Sorceress, PlayerColor::Green);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        twice.setup_buildings(&catalog, &config, &mut rng);
        twice.setup_buildings(&catalog, &config, &mut rng);

        assert_eq!(once.built(), twice.built());
        assert_eq!(once.available(), twice.available());
    }
}

#[test]
fn test_allowed_spells_sorted_without_duplicates() {
    let catalog = catalog();
    let config = TownConfig::default();

    for faction in Faction::ALL {
        let mut town = Settlement::new(5, faction, PlayerColor::Orange);
        town.allow_spell(SpellId(12));
        town.allow_spell(SpellId(1));
        town.allow_spell(SpellId(12));
        town.setup_default_spells(&catalog, &config);
        town.setup_buildings(&catalog, &config, &mut ChaCha8Rng::seed_from_u64(1));

        let spells = town.allowed_spells();
        assert!(spells.windows(2).all(|w| w[0] < w[1]), "{faction:?}: {spells:?}");
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_failed_attempt_leaves_state_identical() {
    let catalog = catalog();
    let config = no_tier_two();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut town = founded_knight_town(&catalog, &config, &mut rng);
    let mut ledger = ResourceLedger::gold(900).with(ResourceKind::Wood, 3);

    let before = SettlementRecord::from(&town);
    let ledger_before = ledger;

    for building in [CASTLE, ARCHERY_RANGE, MAGE_GUILD_2, FORT, BuildingId(40), BuildingId(999)] {
        assert!(!attempt(building, &mut town, &mut ledger, &catalog, &config, &mut rng));
        assert_eq!(SettlementRecord::from(&town), before);
        assert_eq!(ledger, ledger_before);
    }
}

#[test]
fn test_one_build_per_day_until_day_advances() {
    let catalog = catalog();
    let config = no_tier_two();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut towns = vec![founded_knight_town(&catalog, &config, &mut rng)];
    let mut ledger = ResourceLedger::gold(10_000).with(ResourceKind::Wood, 20);
    let mut clock = TurnClock::new();

    assert!(attempt(MARKETPLACE, &mut towns[0], &mut ledger, &catalog, &config, &mut rng));
    assert_eq!(
        try_build(ARCHERY_RANGE, &mut towns[0], &mut ledger, &catalog, &config, &mut rng),
        BuildOutcome::AlreadyActedToday
    );

    clock.advance(&mut towns, &catalog, &config, WeekModifiers::default());
    assert!(attempt(ARCHERY_RANGE, &mut towns[0], &mut ledger, &catalog, &config, &mut rng));
    assert_eq!(ledger.get(ResourceKind::Gold), 10_000 - 500 - 1000);
}

#[test]
fn test_prerequisites_gate_regardless_of_resources() {
    let catalog = catalog();
    let config = TownConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut town = Settlement::new(9, Faction::Knight, PlayerColor::Red);
    town.make_available(CASTLE);
    town.make_available(MAGE_GUILD_2);
    let mut ledger = ResourceLedger::gold(1_000_000)
        .with(ResourceKind::Wood, 1000)
        .with(ResourceKind::Ore, 1000)
        .with(ResourceKind::Crystal, 1000)
        .with(ResourceKind::Gems, 1000)
        .with(ResourceKind::Mercury, 1000)
        .with(ResourceKind::Sulfur, 1000);

    assert_eq!(
        try_build(CASTLE, &mut town, &mut ledger, &catalog, &config, &mut rng),
        BuildOutcome::MissingPrerequisites(vec![FORT])
    );
    assert_eq!(
        try_build(MAGE_GUILD_2, &mut town, &mut ledger, &catalog, &config, &mut rng),
        BuildOutcome::MissingPrerequisites(vec![MAGE_GUILD_1])
    );
    assert!(town.built().is_empty());
}

#[test]
fn test_cost_exceeding_gold_by_one_unit() {
    let catalog = catalog();
    let config = TownConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut town = Settlement::new(9, Faction::Knight, PlayerColor::Red);
    town.make_available(THATCHED_HUT);
    let mut ledger = ResourceLedger::gold(199);

    assert!(!attempt(THATCHED_HUT, &mut town, &mut ledger, &catalog, &config, &mut rng));
    assert_eq!(ledger.get(ResourceKind::Gold), 199);
}

#[test]
fn test_covers_cost_boundary() {
    let ledger = ResourceLedger::gold(100);
    assert!(ledger.covers(&ResourceLedger::gold(100)));
    assert!(!ledger.covers(&ResourceLedger::gold(101)));
}

// ============================================================================
// Growth and spells
// ============================================================================

#[test]
fn test_weekly_growth_modifiers() {
    let config = TownConfig::default();
    let both = WeekModifiers {
        freelancer: true,
        call_to_arms: true,
    };
    assert_eq!(weekly_growth(10, 1, both, &config), 17);
    assert_eq!(weekly_growth(10, 3, both, &config), 12);
}

#[test]
fn test_week_of_turns_grows_dwellings() {
    let catalog = catalog();
    let config = no_tier_two();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut towns = vec![founded_knight_town(&catalog, &config, &mut rng)];
    let mut clock = TurnClock::new();

    for _ in 0..config.days_per_week {
        clock.advance(&mut towns, &catalog, &config, WeekModifiers::default());
    }
    assert_eq!(clock.week(&config), 1);
    assert_eq!(towns[0].troop_count(PEASANT), 6 + 12);
}

#[test]
fn test_short_spell_pool_leaves_guild_empty() {
    let catalog = catalog();
    let config = TownConfig::default();
    let mut town = Settlement::new(2, Faction::Wizard, PlayerColor::Red);
    for id in 1..=4 {
        town.allow_spell(SpellId(id));
    }

    let added = populate_for_tier(&mut town, 1, &catalog, &config, &mut ChaCha8Rng::seed_from_u64(5));
    assert_eq!(added, 0);
    assert!(town.mage_guild_spells().is_empty());
}

#[test]
fn test_mage_guild_offers_level_one_spells() {
    let catalog = catalog();
    let config = no_tier_two();
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let mut town = founded_knight_town(&catalog, &config, &mut rng);
    let mut ledger = ResourceLedger::gold(5000)
        .with(ResourceKind::Wood, 5)
        .with(ResourceKind::Ore, 5);

    assert!(attempt(MAGE_GUILD_1, &mut town, &mut ledger, &catalog, &config, &mut rng));
    let offered = town.mage_guild_spells();
    assert_eq!(offered.len(), 5);
    assert!(offered.iter().all(|&s| catalog.spells.get(s).level == 1));
    assert!(offered.iter().all(|s| town.allowed_spells().contains(s)));
}

// ============================================================================
// Full session
// ============================================================================

#[test]
fn test_fortify_then_persist() {
    let catalog = catalog();
    let config = no_tier_two();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut towns = vec![founded_knight_town(&catalog, &config, &mut rng)];
    let mut ledger = ResourceLedger::gold(20_000)
        .with(ResourceKind::Wood, 50)
        .with(ResourceKind::Ore, 50);
    let mut clock = TurnClock::new();

    assert!(attempt(CASTLE, &mut towns[0], &mut ledger, &catalog, &config, &mut rng));
    clock.advance(&mut towns, &catalog, &config, WeekModifiers::default());
    assert!(attempt(LEFT_TURRET, &mut towns[0], &mut ledger, &catalog, &config, &mut rng));

    let town = &towns[0];
    assert_eq!(town.castle_level(&catalog.buildings), 4);
    // Fort, tavern, hut and turret at 0.1 each, castle at 0.5
    assert!((town.turret_damage_multiplier(&catalog.buildings) - 1.9).abs() < 1e-9);
    assert_eq!(ledger.get(ResourceKind::Gold), 20_000 - 5000 - 1500);
    assert_eq!(ledger.get(ResourceKind::Ore), 50 - 20 - 5);

    let record = SettlementRecord::from(town);
    let bytes = record.encode().unwrap();
    let decoded = SettlementRecord::decode(&bytes).unwrap();
    assert_eq!(decoded, record);

    let restored = decoded.into_settlement();
    assert_eq!(restored.built(), town.built());
    assert_eq!(restored.available(), town.available());
    assert_eq!(restored.allowed_spells(), town.allowed_spells());
    assert!(restored.has_acted_today());
    assert_eq!(restored.garrison_hero_id(), None);

    let json = record.to_json().unwrap();
    assert!(json.contains("\"town_type\": \"Knight\""));
    assert_eq!(SettlementRecord::from_json(&json).unwrap(), record);
}

#[test]
fn test_save_and_load_file() {
    let catalog = catalog();
    let config = TownConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut town = Settlement::new(12, Faction::Necromancer, PlayerColor::Purple);
    town.found(&catalog, &config, &mut rng);

    let path = std::env::temp_dir().join(format!("town_core_save_{}.bin", std::process::id()));
    let record = SettlementRecord::from(&town);
    record.save(&path).unwrap();
    let loaded = SettlementRecord::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, record);
    assert!(!loaded.built_buildings.contains(&TAVERN));
}
