//! Construction system - validates and commits a player's build order
//!
//! A build either commits completely (ledger debited, building inserted,
//! daily flag set, guild spells and starter troops granted) or has no
//! effect at all.

use rand::Rng;

use crate::catalog::GameCatalog;
use crate::city::ledger::ResourceLedger;
use crate::city::prerequisites;
use crate::city::settlement::Settlement;
use crate::city::spells;
use crate::core::config::TownConfig;
use crate::core::types::BuildingId;

/// Result of a build attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Building committed
    Built,
    /// The settlement already built something today
    AlreadyActedToday,
    /// Building is not in the settlement's available set
    NotAvailable,
    /// Building is already in the built set
    AlreadyBuilt,
    /// The player's ledger does not cover the cost
    InsufficientResources,
    /// Some prerequisites are not built yet
    MissingPrerequisites(Vec<BuildingId>),
}

impl BuildOutcome {
    pub fn is_built(&self) -> bool {
        matches!(self, BuildOutcome::Built)
    }
}

/// Validate and commit construction of `building`
///
/// Preconditions are checked in order and the first failure is returned
/// with settlement and ledger untouched.
pub fn try_build<R: Rng + ?Sized>(
    building: BuildingId,
    settlement: &mut Settlement,
    ledger: &mut ResourceLedger,
    catalog: &GameCatalog,
    config: &TownConfig,
    rng: &mut R,
) -> BuildOutcome {
    let outcome = check(building, settlement, ledger, catalog);
    if outcome != BuildOutcome::Built {
        tracing::debug!(town = settlement.town_id, ?building, ?outcome, "Build rejected");
        return outcome;
    }

    let def = catalog.buildings.get(building);
    *ledger -= def.cost;
    settlement.mark_built(building);
    settlement.has_acted_today = true;

    if let Some(tier) = def.mage_guild_tier() {
        spells::populate_for_tier(settlement, tier, catalog, config, rng);
    }
    grant_starter_troops(settlement, building, catalog);

    tracing::info!(town = settlement.town_id, building = %def.name, "Building constructed");
    BuildOutcome::Built
}

/// Boolean form of [`try_build`]
pub fn attempt<R: Rng + ?Sized>(
    building: BuildingId,
    settlement: &mut Settlement,
    ledger: &mut ResourceLedger,
    catalog: &GameCatalog,
    config: &TownConfig,
    rng: &mut R,
) -> bool {
    try_build(building, settlement, ledger, catalog, config, rng).is_built()
}

fn check(
    building: BuildingId,
    settlement: &Settlement,
    ledger: &ResourceLedger,
    catalog: &GameCatalog,
) -> BuildOutcome {
    if settlement.has_acted_today {
        return BuildOutcome::AlreadyActedToday;
    }
    if !settlement.is_available(building) {
        return BuildOutcome::NotAvailable;
    }
    if settlement.is_built(building) {
        return BuildOutcome::AlreadyBuilt;
    }
    if !ledger.covers(&catalog.buildings.get(building).cost) {
        return BuildOutcome::InsufficientResources;
    }
    let missing = prerequisites::missing(&catalog.buildings, building, &settlement.built);
    if !missing.is_empty() {
        return BuildOutcome::MissingPrerequisites(missing);
    }
    BuildOutcome::Built
}

/// One-time starter stock of half a week's growth for a new dwelling
pub(crate) fn grant_starter_troops(settlement: &mut Settlement, building: BuildingId, catalog: &GameCatalog) {
    let def = catalog.buildings.get(building);
    let Some(unit) = def.generated_creature() else {
        return;
    };
    if catalog.generated_tier(building) == 0 {
        return;
    }
    settlement.add_troops(unit, def.weekly_growth / 2);
}
