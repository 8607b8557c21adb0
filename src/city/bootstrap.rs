//! Settlement bootstrap - starter buildings, available buildings, and names
//!
//! Runs once when a town is placed or claimed. Every step is guarded so a
//! second call leaves the settlement as the first call did.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{BuildingKind, GameCatalog};
use crate::city::construction::grant_starter_troops;
use crate::city::settlement::Settlement;
use crate::city::spells;
use crate::core::config::TownConfig;
use crate::core::types::BuildingId;

impl Settlement {
    /// Seed the starter buildings and derive the available set
    ///
    /// Starter buildings are only seeded while `built` is empty and the
    /// available set is only derived while it is empty.
    pub fn setup_buildings<R: Rng + ?Sized>(&mut self, catalog: &GameCatalog, config: &TownConfig, rng: &mut R) {
        if self.built.is_empty() {
            let starters = self.starter_buildings(catalog, config, rng);
            for building in starters {
                if !self.mark_built(building) {
                    continue;
                }
                grant_starter_troops(self, building, catalog);
                if let Some(tier) = catalog.buildings.get(building).mage_guild_tier() {
                    spells::populate_for_tier(self, tier, catalog, config, rng);
                }
            }
            tracing::debug!(town = self.town_id, built = self.built.len(), "Starter buildings seeded");
        }

        if self.available.is_empty() {
            let faction = self.faction;
            let matching = catalog
                .buildings
                .iter()
                .filter(|b| b.implemented && b.affinity.matches(faction))
                .map(|b| b.id);
            self.available.extend(matching);
            tracing::debug!(town = self.town_id, available = self.available.len(), "Available buildings derived");
        }

        self.normalize_allowed_spells();
    }

    /// Fort, tavern, the tier-1 dwelling and, by coin flip, the tier-2 dwelling
    fn starter_buildings<R: Rng + ?Sized>(
        &self,
        catalog: &GameCatalog,
        config: &TownConfig,
        rng: &mut R,
    ) -> Vec<BuildingId> {
        let faction = self.faction;
        let mut starters: Vec<BuildingId> = [
            catalog.first_of_kind(faction, BuildingKind::Fort),
            catalog.first_of_kind(faction, BuildingKind::Tavern),
            catalog.dwelling_for(faction, 1),
        ]
        .into_iter()
        .flatten()
        .collect();

        // gen_bool requires a probability in [0, 1]
        let chance = config.tier2_starter_chance;
        let chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
        if rng.gen_bool(chance) {
            starters.extend(catalog.dwelling_for(faction, 2));
        }
        starters
    }

    /// Populate the allowed spell list from the catalog
    pub fn setup_default_spells(&mut self, catalog: &GameCatalog, config: &TownConfig) {
        spells::setup_default_spells(self, catalog, config);
    }

    /// Assign a uniformly random name from `names`; no-op on an empty pool
    pub fn pick_random_name<R: Rng + ?Sized>(&mut self, names: &[String], rng: &mut R) {
        if let Some(name) = names.choose(rng) {
            self.name = name.clone();
        }
    }

    /// Full bootstrap of a freshly placed town
    pub fn found<R: Rng + ?Sized>(&mut self, catalog: &GameCatalog, config: &TownConfig, rng: &mut R) {
        self.setup_default_spells(catalog, config);
        self.setup_buildings(catalog, config, rng);
        if self.name.is_empty() {
            self.pick_random_name(&config.town_names, rng);
        }
        tracing::info!(town = self.town_id, name = %self.name, faction = ?self.faction, "Settlement founded");
    }
}
