//! Building definitions

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::city::ledger::ResourceLedger;
use crate::core::types::{BuildingId, Faction, UnitId};

/// Base type tag of a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    Fort,
    Castle,
    CaptainsQuarters,
    LeftTurret,
    RightTurret,
    Tavern,
    Moat,
    Marketplace,
    Well,
    Statue,
    Shipyard,
    ThievesGuild,
    MageGuild,
    Dwelling,
    Special,
}

impl BuildingKind {
    /// Position in the fortification chain, 0 for everything else
    pub fn castle_rank(self) -> u8 {
        match self {
            BuildingKind::Fort => 1,
            BuildingKind::Castle => 2,
            BuildingKind::CaptainsQuarters => 3,
            BuildingKind::LeftTurret => 4,
            BuildingKind::RightTurret => 5,
            _ => 0,
        }
    }
}

/// Which factions may build a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactionAffinity {
    Faction(Faction),
    All,
    AllExceptNecromancer,
    AllExceptBarbarian,
}

impl FactionAffinity {
    pub fn matches(self, faction: Faction) -> bool {
        match self {
            FactionAffinity::Faction(f) => f == faction,
            FactionAffinity::All => true,
            FactionAffinity::AllExceptNecromancer => faction != Faction::Necromancer,
            FactionAffinity::AllExceptBarbarian => faction != Faction::Barbarian,
        }
    }
}

/// Immutable catalog entry for one building
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingDefinition {
    pub id: BuildingId,
    pub name: String,
    pub kind: BuildingKind,
    /// Mage guild level (1-5); 0 for other kinds
    #[serde(default)]
    pub level: u8,
    pub affinity: FactionAffinity,
    #[serde(default)]
    pub prerequisites: Vec<BuildingId>,
    #[serde(default)]
    pub cost: ResourceLedger,
    #[serde(default)]
    pub creature: UnitId,
    #[serde(default)]
    pub weekly_growth: u32,
    /// Unimplemented buildings never become available
    #[serde(default = "default_implemented")]
    pub implemented: bool,
}

fn default_implemented() -> bool {
    true
}

impl BuildingDefinition {
    /// Guild tier when this is a mage guild of level 1-5
    pub fn mage_guild_tier(&self) -> Option<u8> {
        (self.kind == BuildingKind::MageGuild && (1..=5).contains(&self.level)).then_some(self.level)
    }

    pub fn generated_creature(&self) -> Option<UnitId> {
        (!self.creature.is_none()).then_some(self.creature)
    }
}

impl CatalogEntry for BuildingDefinition {
    type Id = BuildingId;

    fn id(&self) -> BuildingId {
        self.id
    }
}
