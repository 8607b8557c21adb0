//! Resource ledger - the per-player vector of resource quantities
//!
//! Every kind is an unsigned counter clamped to `[0, RESOURCE_CAP]`.
//! Additions saturate at the cap, subtractions floor at zero; no operation
//! panics.

use std::ops::{AddAssign, SubAssign};

use serde::{Deserialize, Serialize};

use crate::core::types::ResourceKind;

/// Upper bound of every resource counter
pub const RESOURCE_CAP: u32 = 2_000_000_000;

const KINDS: usize = ResourceKind::ALL.len();

/// A fixed-kind resource vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "LedgerFields", into = "LedgerFields")]
pub struct ResourceLedger {
    amounts: [u32; KINDS],
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger holding only gold
    pub fn gold(amount: u32) -> Self {
        Self::new().with(ResourceKind::Gold, amount)
    }

    /// Builder-style setter
    pub fn with(mut self, kind: ResourceKind, amount: u32) -> Self {
        self.set(kind, amount);
        self
    }

    /// Get current amount of a resource
    pub fn get(&self, kind: ResourceKind) -> u32 {
        self.amounts[kind.index()]
    }

    /// Set a resource, clamped to the cap
    pub fn set(&mut self, kind: ResourceKind, amount: u32) {
        self.amounts[kind.index()] = amount.min(RESOURCE_CAP);
    }

    /// Add to a resource, saturating at the cap (also on overflow)
    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        let slot = &mut self.amounts[kind.index()];
        *slot = slot.saturating_add(amount).min(RESOURCE_CAP);
    }

    /// Subtract from a resource, flooring at zero
    pub fn sub(&mut self, kind: ResourceKind, amount: u32) {
        let slot = &mut self.amounts[kind.index()];
        *slot = slot.saturating_sub(amount);
    }

    /// True iff every kind is at least the corresponding kind of `cost`
    pub fn covers(&self, cost: &ResourceLedger) -> bool {
        self.amounts
            .iter()
            .zip(cost.amounts.iter())
            .all(|(have, need)| have >= need)
    }

    /// New ledger with every kind multiplied and truncated toward zero
    pub fn scale(&self, factor: f64) -> ResourceLedger {
        let mut scaled = ResourceLedger::new();
        for (out, amount) in scaled.amounts.iter_mut().zip(self.amounts.iter()) {
            let value = (*amount as f64 * factor).trunc();
            // NaN and negative factors collapse to zero
            *out = if value.is_nan() || value <= 0.0 {
                0
            } else if value >= RESOURCE_CAP as f64 {
                RESOURCE_CAP
            } else {
                value as u32
            };
        }
        scaled
    }

    /// Credit income to this ledger
    pub fn grant(&mut self, income: &ResourceLedger) {
        *self += *income;
    }

    /// Debit `cost` if covered; returns false and leaves the ledger untouched otherwise
    pub fn spend(&mut self, cost: &ResourceLedger) -> bool {
        if !self.covers(cost) {
            return false;
        }
        *self -= *cost;
        true
    }

    /// Sum over all kinds (does not saturate at the cap)
    pub fn total(&self) -> u64 {
        self.amounts.iter().map(|&a| a as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.iter().all(|&a| a == 0)
    }

    /// Iterate `(kind, amount)` pairs in ledger order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        ResourceKind::ALL.iter().map(move |&kind| (kind, self.get(kind)))
    }
}

impl AddAssign for ResourceLedger {
    fn add_assign(&mut self, rhs: Self) {
        for kind in ResourceKind::ALL {
            self.add(kind, rhs.get(kind));
        }
    }
}

impl SubAssign for ResourceLedger {
    fn sub_assign(&mut self, rhs: Self) {
        for kind in ResourceKind::ALL {
            self.sub(kind, rhs.get(kind));
        }
    }
}

/// Named-field form used for TOML/JSON (`cost = { wood = 5, gold = 1500 }`)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
struct LedgerFields {
    wood: u32,
    mercury: u32,
    ore: u32,
    sulfur: u32,
    crystal: u32,
    gems: u32,
    gold: u32,
}

impl From<LedgerFields> for ResourceLedger {
    fn from(f: LedgerFields) -> Self {
        ResourceLedger::new()
            .with(ResourceKind::Wood, f.wood)
            .with(ResourceKind::Mercury, f.mercury)
            .with(ResourceKind::Ore, f.ore)
            .with(ResourceKind::Sulfur, f.sulfur)
            .with(ResourceKind::Crystal, f.crystal)
            .with(ResourceKind::Gems, f.gems)
            .with(ResourceKind::Gold, f.gold)
    }
}

impl From<ResourceLedger> for LedgerFields {
    fn from(l: ResourceLedger) -> Self {
        LedgerFields {
            wood: l.get(ResourceKind::Wood),
            mercury: l.get(ResourceKind::Mercury),
            ore: l.get(ResourceKind::Ore),
            sulfur: l.get(ResourceKind::Sulfur),
            crystal: l.get(ResourceKind::Crystal),
            gems: l.get(ResourceKind::Gems),
            gold: l.get(ResourceKind::Gold),
        }
    }
}
