//! Settlement state - the town entity tracked by the core
//!
//! Holds the built/available building sets, troop stacks, spell lists, the
//! daily action flags and weak hero handles. Construction, growth, spell
//! allocation and bootstrap live in sibling modules and operate on this type.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{BuildingCatalog, BuildingKind};
use crate::city::hero::{Hero, HeroRoster};
use crate::core::config::TownConfig;
use crate::core::types::{BuildingId, Day, Faction, HeroId, PlayerColor, SpellId, UnitId};

/// Number of garrison troop slots
pub const GARRISON_SLOTS: usize = 5;

/// A count of one creature type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TroopStack {
    pub unit: UnitId,
    pub count: u32,
}

impl TroopStack {
    pub fn new(unit: UnitId, count: u32) -> Self {
        Self { unit, count }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.unit.is_none()
    }
}

/// A player-controlled town
#[derive(Debug, Clone)]
pub struct Settlement {
    pub town_id: i32,
    pub faction: Faction,
    pub owner: PlayerColor,
    pub reveal_radius: i32,
    pub observation_radius: i32,
    pub name: String,
    pub title: String,
    pub description: String,
    pub history: String,
    pub icon: u8,
    pub garrison: [TroopStack; GARRISON_SLOTS],
    pub(crate) available: BTreeSet<BuildingId>,
    pub(crate) built: BTreeSet<BuildingId>,
    pub(crate) has_acted_today: bool,
    pub(crate) has_researched_today: bool,
    pub(crate) allowed_spells: Vec<SpellId>,
    pub(crate) mage_guild_spells: Vec<SpellId>,
    pub(crate) available_troops: Vec<TroopStack>,
    garrison_hero: Option<HeroId>,
    visiting_hero: Option<HeroId>,
}

impl Settlement {
    pub fn new(town_id: i32, faction: Faction, owner: PlayerColor) -> Self {
        Self {
            town_id,
            faction,
            owner,
            reveal_radius: 5,
            observation_radius: 5,
            name: String::new(),
            title: String::new(),
            description: String::new(),
            history: String::new(),
            icon: 0,
            garrison: [TroopStack::default(); GARRISON_SLOTS],
            available: BTreeSet::new(),
            built: BTreeSet::new(),
            has_acted_today: false,
            has_researched_today: false,
            allowed_spells: Vec::new(),
            mage_guild_spells: Vec::new(),
            available_troops: Vec::new(),
            garrison_hero: None,
            visiting_hero: None,
        }
    }

    // === BUILDINGS ===

    pub fn is_built(&self, building: BuildingId) -> bool {
        self.built.contains(&building)
    }

    pub fn built(&self) -> &BTreeSet<BuildingId> {
        &self.built
    }

    pub fn available(&self) -> &BTreeSet<BuildingId> {
        &self.available
    }

    pub fn is_available(&self, building: BuildingId) -> bool {
        self.available.contains(&building)
    }

    /// Allow the player to attempt `building`; returns false if already allowed
    pub fn make_available(&mut self, building: BuildingId) -> bool {
        self.available.insert(building)
    }

    /// Insert into the built set without any checks; false if already present
    ///
    /// Player-issued construction goes through `construction::attempt`.
    pub fn mark_built(&mut self, building: BuildingId) -> bool {
        self.built.insert(building)
    }

    // === DAILY FLAGS ===

    pub fn has_acted_today(&self) -> bool {
        self.has_acted_today
    }

    pub fn has_researched_today(&self) -> bool {
        self.has_researched_today
    }

    /// Record today's research action; false if one already happened
    pub fn mark_researched(&mut self) -> bool {
        if self.has_researched_today {
            return false;
        }
        self.has_researched_today = true;
        true
    }

    /// Start of a new day: clears the daily flags
    pub fn advance_day(&mut self, day: Day, config: &TownConfig) {
        self.has_acted_today = false;
        self.has_researched_today = false;

        if config.is_week_start(day) {
            // Reserved for daily creature generation; weekly growth runs separately
            tracing::trace!(town = self.town_id, day, "Week boundary reached");
        }
    }

    // === SPELLS ===

    pub fn allowed_spells(&self) -> &[SpellId] {
        &self.allowed_spells
    }

    pub fn allow_spell(&mut self, spell: SpellId) {
        self.allowed_spells.push(spell);
    }

    /// Deduplicate and sort the allowed spell list
    pub fn normalize_allowed_spells(&mut self) {
        self.allowed_spells.sort_unstable();
        self.allowed_spells.dedup();
    }

    pub fn mage_guild_spells(&self) -> &[SpellId] {
        &self.mage_guild_spells
    }

    // === TROOPS ===

    pub fn available_troops(&self) -> &[TroopStack] {
        &self.available_troops
    }

    pub fn troop_count(&self, unit: UnitId) -> u32 {
        self.available_troops
            .iter()
            .find(|stack| stack.unit == unit)
            .map_or(0, |stack| stack.count)
    }

    /// Add to the stack for `unit`, creating it if absent
    pub fn add_troops(&mut self, unit: UnitId, count: u32) {
        match self.available_troops.iter_mut().find(|stack| stack.unit == unit) {
            Some(stack) => stack.count = stack.count.saturating_add(count),
            None => self.available_troops.push(TroopStack::new(unit, count)),
        }
    }

    // === HEROES ===

    pub fn garrison_hero_id(&self) -> Option<HeroId> {
        self.garrison_hero
    }

    pub fn visiting_hero_id(&self) -> Option<HeroId> {
        self.visiting_hero
    }

    pub fn set_garrison_hero(&mut self, hero: Option<HeroId>) {
        self.garrison_hero = hero;
    }

    pub fn set_visiting_hero(&mut self, hero: Option<HeroId>) {
        self.visiting_hero = hero;
    }

    /// Resolve the garrisoned hero; `None` when absent or no longer in the roster
    pub fn garrison_hero<'r>(&self, roster: &'r HeroRoster) -> Option<&'r Hero> {
        self.garrison_hero.and_then(|id| roster.get(id))
    }

    pub fn visiting_hero<'r>(&self, roster: &'r HeroRoster) -> Option<&'r Hero> {
        self.visiting_hero.and_then(|id| roster.get(id))
    }

    /// Drop every association with `hero`; returns true if one was cleared
    pub fn detach_hero(&mut self, hero: HeroId) -> bool {
        let mut detached = false;
        if self.garrison_hero == Some(hero) {
            self.garrison_hero = None;
            detached = true;
        }
        if self.visiting_hero == Some(hero) {
            self.visiting_hero = None;
            detached = true;
        }
        detached
    }

    /// Clear handles whose hero is no longer in the roster
    pub fn prune_missing_heroes(&mut self, roster: &HeroRoster) {
        if self.garrison_hero.is_some_and(|id| !roster.contains(id)) {
            self.garrison_hero = None;
        }
        if self.visiting_hero.is_some_and(|id| !roster.contains(id)) {
            self.visiting_hero = None;
        }
    }

    // === DERIVED QUERIES ===

    pub fn is_guarded(&self) -> bool {
        self.garrison_hero.is_some()
            || self.visiting_hero.is_some()
            || self.garrison.iter().any(|slot| !slot.is_empty())
    }

    /// Highest rank of the fort -> right turret chain, 0 if none built
    pub fn castle_level(&self, buildings: &BuildingCatalog) -> u8 {
        self.built
            .iter()
            .map(|&id| buildings.get(id).kind.castle_rank())
            .max()
            .unwrap_or(0)
    }

    /// Tower damage multiplier
    ///
    /// Every built building contributes, not only the fortifications.
    pub fn turret_damage_multiplier(&self, buildings: &BuildingCatalog) -> f64 {
        self.built.iter().fold(1.0, |multiplier, &id| {
            multiplier
                + match buildings.get(id).kind {
                    BuildingKind::Castle => 0.5,
                    BuildingKind::CaptainsQuarters => 0.3,
                    _ => 0.1,
                }
        })
    }
}
