//! Mage guild spell allocation
//!
//! When a guild tier is unlocked the settlement is offered a random subset of
//! its allowed spells of that level. A guild of level `n` offers
//! `mage_guild_slots - n` spells (5 at level 1, 1 at level 5 by default).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::GameCatalog;
use crate::city::settlement::Settlement;
use crate::core::config::TownConfig;
use crate::core::types::SpellId;

/// Append `need` random allowed spells of level `tier` to the mage guild
///
/// When fewer candidates than `need` exist nothing is added and 0 is
/// returned. Not idempotent: every call appends a fresh pick, so callers
/// invoke it once per guild-tier unlock.
pub fn populate_for_tier<R: Rng + ?Sized>(
    settlement: &mut Settlement,
    tier: u8,
    catalog: &GameCatalog,
    config: &TownConfig,
    rng: &mut R,
) -> usize {
    let mut candidates: Vec<SpellId> = settlement
        .allowed_spells
        .iter()
        .copied()
        .filter(|&spell| catalog.spells.get(spell).level == tier)
        .collect();
    candidates.sort_unstable();
    candidates.dedup();

    let need = config.spells_for_guild_level(tier);
    if candidates.len() < need {
        tracing::debug!(
            town = settlement.town_id,
            tier,
            candidates = candidates.len(),
            need,
            "Insufficient spell pool, guild tier left empty"
        );
        return 0;
    }

    candidates.shuffle(rng);
    settlement
        .mage_guild_spells
        .extend(candidates.iter().take(need).copied());

    tracing::debug!(town = settlement.town_id, tier, added = need, "Mage guild spells offered");
    need
}

/// Populate `allowed_spells` from the spell catalog
///
/// Spells below `advanced_spell_level` are always allowed; higher levels
/// are filtered through the faction x school access table.
pub fn setup_default_spells(settlement: &mut Settlement, catalog: &GameCatalog, config: &TownConfig) {
    let faction = settlement.faction;
    let allowed = catalog
        .spells
        .iter()
        .filter(|spell| config.spell_allowed(faction, spell.school, spell.level))
        .map(|spell| spell.id);
    settlement.allowed_spells.extend(allowed);
    settlement.normalize_allowed_spells();
}
