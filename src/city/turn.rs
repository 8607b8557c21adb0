//! Turn clock - drives day and week ticks over a set of settlements

use serde::{Deserialize, Serialize};

use crate::catalog::GameCatalog;
use crate::city::growth::{GrowthEntry, WeekModifiers};
use crate::city::settlement::Settlement;
use crate::core::config::TownConfig;
use crate::core::types::Day;

/// Day counter shared by all settlements of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnClock {
    day: Day,
}

impl TurnClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self) -> Day {
        self.day
    }

    /// 0-based week number of the current day
    pub fn week(&self, config: &TownConfig) -> u32 {
        config.week_of(self.day)
    }

    pub fn is_new_week(&self, config: &TownConfig) -> bool {
        config.is_week_start(self.day)
    }

    /// Move to the next day and tick every settlement
    ///
    /// Weekly growth runs when the new day starts a week. Returns the growth
    /// applied to each settlement (empty on ordinary days).
    pub fn advance(
        &mut self,
        settlements: &mut [Settlement],
        catalog: &GameCatalog,
        config: &TownConfig,
        modifiers: WeekModifiers,
    ) -> Vec<Vec<GrowthEntry>> {
        self.day += 1;
        let new_week = self.is_new_week(config);
        if new_week {
            tracing::info!(day = self.day, week = self.week(config), "New week");
        }

        settlements
            .iter_mut()
            .map(|settlement| {
                settlement.advance_day(self.day, config);
                if new_week {
                    settlement.advance_week(catalog, config, modifiers)
                } else {
                    Vec::new()
                }
            })
            .collect()
    }
}
