//! Weekly creature growth
//!
//! Every built dwelling adds its weekly growth to the matching recruitable
//! stack. Two weekly modifiers stack on top of the base rate:
//! - freelancer: low-tier growth is multiplied (then rounded)
//! - call to arms: a flat per-tier bonus is added after the multiplier

use serde::{Deserialize, Serialize};

use crate::catalog::GameCatalog;
use crate::city::settlement::Settlement;
use crate::core::config::TownConfig;
use crate::core::types::{BuildingId, UnitId};

/// Modifiers active for the current week
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekModifiers {
    pub freelancer: bool,
    pub call_to_arms: bool,
}

/// One stack addition made by the weekly tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthEntry {
    pub building: BuildingId,
    pub unit: UnitId,
    pub added: u32,
}

/// Growth for one creature of `tier` with base rate `base`
pub fn weekly_growth(base: u32, tier: u8, modifiers: WeekModifiers, config: &TownConfig) -> u32 {
    let mut growth = base;
    if modifiers.freelancer && config.freelancer_applies(tier) {
        growth = (growth as f64 * config.freelancer_multiplier).round() as u32;
    }
    if modifiers.call_to_arms {
        growth = growth.saturating_add(config.call_to_arms_bonus_for(tier));
    }
    growth
}

impl Settlement {
    /// Apply one week of creature growth; buildings without a creature are skipped
    pub fn advance_week(
        &mut self,
        catalog: &GameCatalog,
        config: &TownConfig,
        modifiers: WeekModifiers,
    ) -> Vec<GrowthEntry> {
        let mut entries = Vec::new();

        for &building in &self.built {
            let def = catalog.buildings.get(building);
            let Some(unit) = def.generated_creature() else {
                continue;
            };
            let tier = catalog.generated_tier(building);
            let added = weekly_growth(def.weekly_growth, tier, modifiers, config);
            entries.push(GrowthEntry { building, unit, added });
        }

        for entry in &entries {
            self.add_troops(entry.unit, entry.added);
        }

        tracing::debug!(
            town = self.town_id,
            stacks = entries.len(),
            total = entries.iter().map(|e| e.added as u64).sum::<u64>(),
            "Weekly growth applied"
        );
        entries
    }
}
