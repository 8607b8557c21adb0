//! Settlement rules configuration with documented constants
//!
//! All tunable numbers of the settlement core live here. Defaults reproduce
//! the classic rules; a TOML file can override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::spell::{SpellAccessTable, SpellSchool};
use crate::core::error::{Result, TownError};
use crate::core::types::{Day, Faction};

/// Configuration for the settlement systems
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TownConfig {
    // === CALENDAR ===
    /// Days in a week. Weekly growth runs on the first day of every week.
    pub days_per_week: u32,

    // === GROWTH ===
    /// Multiplier applied to weekly growth of low-tier creatures while the
    /// freelancer's guild effect is active. The result is rounded.
    pub freelancer_multiplier: f64,

    /// Highest creature tier affected by the freelancer multiplier
    ///
    /// Tiers 1..=freelancer_max_tier are boosted.
    pub freelancer_max_tier: u8,

    /// Flat weekly bonus per creature tier while "call to arms" is active
    ///
    /// Index 0 is tier 1. Tiers beyond the end of the list get no bonus.
    pub call_to_arms_bonus: Vec<u32>,

    // === BOOTSTRAP ===
    /// Probability that a freshly founded town starts with its tier-2 dwelling
    pub tier2_starter_chance: f64,

    /// Towns are named from this pool when founded without a name
    pub town_names: Vec<String>,

    // === MAGE GUILD ===
    /// A mage guild of level `n` offers `mage_guild_slots - n` spells
    pub mage_guild_slots: u32,

    /// Spells of this level and above are filtered through `spell_access`
    pub advanced_spell_level: u8,

    /// Which spell schools each faction may learn at advanced levels
    pub spell_access: SpellAccessTable,
}

impl Default for TownConfig {
    fn default() -> Self {
        Self {
            days_per_week: 7,

            freelancer_multiplier: 1.15,
            freelancer_max_tier: 2,
            call_to_arms_bonus: vec![5, 3, 2],

            tier2_starter_chance: 0.5,
            town_names: [
                "Blackridge",
                "Stonehaven",
                "Greywatch",
                "Ashford",
                "Mirewood",
                "Highmoor",
                "Ravencrest",
                "Duskvale",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),

            mage_guild_slots: 6,
            advanced_spell_level: 3,
            spell_access: SpellAccessTable::default(),
        }
    }
}

impl TownConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; missing keys keep their defaults
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse and validate a config from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: TownConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.days_per_week == 0 {
            return Err(TownError::InvalidConfig("days_per_week must be positive".into()));
        }

        if !self.freelancer_multiplier.is_finite() || self.freelancer_multiplier < 0.0 {
            return Err(TownError::InvalidConfig(format!(
                "freelancer_multiplier ({}) must be a non-negative number",
                self.freelancer_multiplier
            )));
        }

        if !(0.0..=1.0).contains(&self.tier2_starter_chance) {
            return Err(TownError::InvalidConfig(format!(
                "tier2_starter_chance ({}) must be within [0, 1]",
                self.tier2_starter_chance
            )));
        }

        if self.mage_guild_slots == 0 {
            return Err(TownError::InvalidConfig("mage_guild_slots must be positive".into()));
        }

        Ok(())
    }

    /// Whether `day` opens a week; never true for a zero-length week
    pub fn is_week_start(&self, day: Day) -> bool {
        day.checked_rem(self.days_per_week).is_some_and(|r| r == 0)
    }

    /// 0-based week number of `day`; 0 for a zero-length week
    pub fn week_of(&self, day: Day) -> u32 {
        day.checked_div(self.days_per_week).unwrap_or(0)
    }

    /// Whether the freelancer multiplier applies to a creature tier
    pub fn freelancer_applies(&self, tier: u8) -> bool {
        (1..=self.freelancer_max_tier).contains(&tier)
    }

    /// Flat "call to arms" bonus for a creature tier
    pub fn call_to_arms_bonus_for(&self, tier: u8) -> u32 {
        if tier == 0 {
            return 0;
        }
        self.call_to_arms_bonus
            .get(tier as usize - 1)
            .copied()
            .unwrap_or(0)
    }

    /// Number of spells a mage guild of the given level offers
    pub fn spells_for_guild_level(&self, level: u8) -> usize {
        self.mage_guild_slots.saturating_sub(level as u32) as usize
    }

    /// Whether a faction may learn a spell of the given school and level
    pub fn spell_allowed(&self, faction: Faction, school: SpellSchool, level: u8) -> bool {
        level < self.advanced_spell_level || self.spell_access.allows(faction, school)
    }
}
