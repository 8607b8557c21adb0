//! Creature definitions

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::core::types::{Faction, UnitId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureDefinition {
    pub id: UnitId,
    pub name: String,
    /// Strength/unlock rank; 0 marks a non-recruitable entry
    #[serde(default)]
    pub tier: u8,
    #[serde(default)]
    pub faction: Option<Faction>,
}

impl CatalogEntry for CreatureDefinition {
    type Id = UnitId;

    fn id(&self) -> UnitId {
        self.id
    }
}
