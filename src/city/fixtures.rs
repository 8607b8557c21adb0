//! Shared test fixtures for the city layer

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::GameCatalog;

const DEFAULT_CATALOG: &str = include_str!("../../data/town_catalog.toml");

/// Ids from `data/town_catalog.toml`
pub mod ids {
    use crate::core::types::{BuildingId, UnitId};

    pub const FORT: BuildingId = BuildingId(1);
    pub const CASTLE: BuildingId = BuildingId(2);
    pub const CAPTAINS_QUARTERS: BuildingId = BuildingId(3);
    pub const LEFT_TURRET: BuildingId = BuildingId(4);
    pub const RIGHT_TURRET: BuildingId = BuildingId(5);
    pub const TAVERN: BuildingId = BuildingId(6);
    pub const MARKETPLACE: BuildingId = BuildingId(8);
    pub const SHIPYARD: BuildingId = BuildingId(11);
    pub const WELL: BuildingId = BuildingId(12);
    pub const SHRINE: BuildingId = BuildingId(13);
    pub const MAGE_GUILD_1: BuildingId = BuildingId(21);
    pub const MAGE_GUILD_2: BuildingId = BuildingId(22);
    pub const MAGE_GUILD_3: BuildingId = BuildingId(23);
    pub const THATCHED_HUT: BuildingId = BuildingId(30);
    pub const ARCHERY_RANGE: BuildingId = BuildingId(31);
    pub const BLACKSMITH: BuildingId = BuildingId(32);
    pub const ARMORY: BuildingId = BuildingId(33);
    pub const HUT: BuildingId = BuildingId(40);
    pub const STICK_HUT: BuildingId = BuildingId(41);
    pub const EXCAVATION: BuildingId = BuildingId(50);

    pub const PEASANT: UnitId = UnitId(1);
    pub const ARCHER: UnitId = UnitId(2);
    pub const PIKEMAN: UnitId = UnitId(3);
    pub const GOBLIN: UnitId = UnitId(11);
    pub const ORC: UnitId = UnitId(12);
    pub const SKELETON: UnitId = UnitId(21);
}

pub fn catalog() -> GameCatalog {
    GameCatalog::parse_toml(DEFAULT_CATALOG).expect("bundled catalog parses")
}

pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
