//! Hero associations
//!
//! Settlements never own heroes. They hold `HeroId` handles and resolve them
//! through a `HeroRoster` owned by the game session; a handle whose hero is
//! gone simply resolves to `None`.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{HeroId, PlayerColor};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    pub owner: PlayerColor,
}

/// Session-owned hero storage
#[derive(Debug, Clone, Default)]
pub struct HeroRoster {
    heroes: AHashMap<HeroId, Hero>,
}

impl HeroRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hero: Hero) {
        self.heroes.insert(hero.id, hero);
    }

    pub fn remove(&mut self, id: HeroId) -> Option<Hero> {
        self.heroes.remove(&id)
    }

    pub fn get(&self, id: HeroId) -> Option<&Hero> {
        self.heroes.get(&id)
    }

    pub fn contains(&self, id: HeroId) -> bool {
        self.heroes.contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}
