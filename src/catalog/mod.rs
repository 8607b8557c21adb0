//! Catalog layer - read-only building, creature, and spell definitions
//!
//! Catalogs are loaded once (from TOML) and never mutated during a session.
//! Every catalog keeps an id -> dense index map for O(1) lookup. A lookup by
//! an unknown id returns the catalog's first entry, which serves as the
//! placeholder; use `try_get` when a miss must be observable.

pub mod building;
pub mod creature;
pub mod spell;

use std::fmt::Debug;
use std::hash::Hash;
use std::path::Path;

use ahash::AHashMap;
use serde::Deserialize;

use crate::core::error::{Result, TownError};
use crate::core::types::{BuildingId, Faction};

pub use building::{BuildingDefinition, BuildingKind, FactionAffinity};
pub use creature::CreatureDefinition;
pub use spell::{SchoolAccess, SpellAccessTable, SpellDefinition, SpellSchool};

/// An entry addressable by a stable identifier
pub trait CatalogEntry {
    type Id: Copy + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;
}

/// Arena of definitions with an id -> index map built at load time
#[derive(Debug, Clone)]
pub struct Catalog<T: CatalogEntry> {
    entries: Vec<T>,
    index: AHashMap<T::Id, usize>,
}

impl<T: CatalogEntry> Catalog<T> {
    /// Build a catalog; fails when empty or when an id repeats
    pub fn from_entries(
        name: &'static str,
        entries: Vec<T>,
        duplicate: impl Fn(T::Id) -> TownError,
    ) -> Result<Self> {
        if entries.is_empty() {
            return Err(TownError::EmptyCatalog(name));
        }

        let mut index = AHashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if index.insert(entry.id(), i).is_some() {
                return Err(duplicate(entry.id()));
            }
        }

        Ok(Self { entries, index })
    }

    /// Lookup with the placeholder fallback
    pub fn get(&self, id: T::Id) -> &T {
        match self.index.get(&id) {
            Some(&i) => &self.entries[i],
            None => self.placeholder(),
        }
    }

    pub fn try_get(&self, id: T::Id) -> Option<&T> {
        self.index.get(&id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.index.contains_key(&id)
    }

    /// The entry returned for unknown ids
    pub fn placeholder(&self) -> &T {
        // Non-empty by construction
        &self.entries[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub type BuildingCatalog = Catalog<BuildingDefinition>;
pub type CreatureCatalog = Catalog<CreatureDefinition>;
pub type SpellCatalog = Catalog<SpellDefinition>;

/// All catalogs a settlement reads, passed explicitly into every operation
#[derive(Debug, Clone)]
pub struct GameCatalog {
    pub buildings: BuildingCatalog,
    pub creatures: CreatureCatalog,
    pub spells: SpellCatalog,
}

impl GameCatalog {
    pub fn new(
        buildings: Vec<BuildingDefinition>,
        creatures: Vec<CreatureDefinition>,
        spells: Vec<SpellDefinition>,
    ) -> Result<Self> {
        Ok(Self {
            buildings: Catalog::from_entries("buildings", buildings, TownError::DuplicateBuilding)?,
            creatures: Catalog::from_entries("creatures", creatures, TownError::DuplicateCreature)?,
            spells: Catalog::from_entries("spells", spells, TownError::DuplicateSpell)?,
        })
    }

    /// Load all catalogs from a single TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse catalogs from a TOML string with `[[buildings]]`, `[[creatures]]`
    /// and `[[spells]]` arrays
    pub fn parse_toml(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        let catalog = Self::new(file.buildings, file.creatures, file.spells)?;
        tracing::debug!(
            buildings = catalog.buildings.len(),
            creatures = catalog.creatures.len(),
            spells = catalog.spells.len(),
            "Loaded game catalog"
        );
        Ok(catalog)
    }

    /// Tier of the creature a building generates, 0 when it generates none
    pub fn generated_tier(&self, building: BuildingId) -> u8 {
        let def = self.buildings.get(building);
        match def.generated_creature() {
            Some(unit) => self.creatures.get(unit).tier,
            None => 0,
        }
    }

    /// First implemented dwelling for `faction` whose creature has `tier`
    pub fn dwelling_for(&self, faction: Faction, tier: u8) -> Option<BuildingId> {
        self.buildings
            .iter()
            .filter(|b| b.kind == BuildingKind::Dwelling && b.implemented)
            .filter(|b| b.affinity.matches(faction))
            .find(|b| {
                b.generated_creature()
                    .is_some_and(|unit| self.creatures.get(unit).tier == tier)
            })
            .map(|b| b.id)
    }

    /// First implemented building of the given kind available to `faction`
    pub fn first_of_kind(&self, faction: Faction, kind: BuildingKind) -> Option<BuildingId> {
        self.buildings
            .iter()
            .find(|b| b.kind == kind && b.implemented && b.affinity.matches(faction))
            .map(|b| b.id)
    }
}

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    buildings: Vec<BuildingDefinition>,
    #[serde(default)]
    creatures: Vec<CreatureDefinition>,
    #[serde(default)]
    spells: Vec<SpellDefinition>,
}
