//! City layer - settlement state, construction, growth, and the mage guild

pub mod bootstrap;
pub mod construction;
pub mod growth;
pub mod hero;
pub mod ledger;
pub mod persistence;
pub mod prerequisites;
pub mod settlement;
pub mod spells;
pub mod turn;

#[cfg(test)]
pub(crate) mod fixtures;

pub use construction::{attempt, try_build, BuildOutcome};
pub use growth::{weekly_growth, GrowthEntry, WeekModifiers};
pub use hero::{Hero, HeroRoster};
pub use ledger::{ResourceLedger, RESOURCE_CAP};
pub use persistence::SettlementRecord;
pub use settlement::{Settlement, TroopStack, GARRISON_SLOTS};
pub use spells::populate_for_tier;
pub use turn::TurnClock;
