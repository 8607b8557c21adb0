//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Identifier of a building definition in the building catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingId(pub u32);

impl BuildingId {
    /// Sentinel meaning "no prerequisite"
    pub const NONE: BuildingId = BuildingId(0);

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// Identifier of a creature (unit) definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Unknown / no creature
    pub const NONE: UnitId = UnitId(0);

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// Identifier of a spell definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpellId(pub u32);

/// Handle to a hero owned elsewhere (see `city::hero::HeroRoster`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(pub u32);

/// Game day counter (day 0 is the first day of the first week)
pub type Day = u32;

/// Settlement faction ("town type")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Faction {
    Knight = 0,
    Barbarian = 1,
    Sorceress = 2,
    Warlock = 3,
    Wizard = 4,
    Necromancer = 5,
}

impl Faction {
    pub const ALL: [Faction; 6] = [
        Faction::Knight,
        Faction::Barbarian,
        Faction::Sorceress,
        Faction::Warlock,
        Faction::Wizard,
        Faction::Necromancer,
    ];

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
}

/// Owning player slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerColor {
    Blue = 0,
    Green = 1,
    Red = 2,
    Yellow = 3,
    Orange = 4,
    Purple = 5,
    #[default]
    Neutral = 6,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 7] = [
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Red,
        PlayerColor::Yellow,
        PlayerColor::Orange,
        PlayerColor::Purple,
        PlayerColor::Neutral,
    ];

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
}

/// The seven resource kinds tracked by a ledger, in ledger order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Wood,
    Mercury,
    Ore,
    Sulfur,
    Crystal,
    Gems,
    Gold,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Wood,
        ResourceKind::Mercury,
        ResourceKind::Ore,
        ResourceKind::Sulfur,
        ResourceKind::Crystal,
        ResourceKind::Gems,
        ResourceKind::Gold,
    ];

    /// Position of this kind inside a ledger
    pub fn index(self) -> usize {
        self as usize
    }
}
