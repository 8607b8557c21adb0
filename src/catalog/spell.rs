//! Spell definitions and the faction x school access table

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::core::types::{Faction, SpellId};

/// School of magic a spell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellSchool {
    Neutral,
    WarCry,
    Holy,
    Nature,
    Death,
    Destruction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellDefinition {
    pub id: SpellId,
    pub name: String,
    pub school: SpellSchool,
    /// Mage guild level that teaches this spell (1-5)
    pub level: u8,
    #[serde(default)]
    pub description: String,
}

impl CatalogEntry for SpellDefinition {
    type Id = SpellId;

    fn id(&self) -> SpellId {
        self.id
    }
}

/// Schools one faction may learn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolAccess {
    pub faction: Faction,
    pub schools: Vec<SpellSchool>,
}

/// Declarative faction x school inclusion table for advanced spells
///
/// A faction missing from the table may only learn neutral spells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpellAccessTable(pub Vec<SchoolAccess>);

impl SpellAccessTable {
    pub fn allows(&self, faction: Faction, school: SpellSchool) -> bool {
        match self.0.iter().find(|entry| entry.faction == faction) {
            Some(entry) => entry.schools.contains(&school),
            None => school == SpellSchool::Neutral,
        }
    }
}

impl Default for SpellAccessTable {
    fn default() -> Self {
        use SpellSchool::*;

        let table = [
            (Faction::Knight, vec![Neutral, Holy, Destruction]),
            (Faction::Barbarian, vec![Neutral, WarCry, Destruction]),
            (Faction::Sorceress, vec![Neutral, Holy, Nature]),
            (Faction::Warlock, vec![Neutral, Nature, Destruction]),
            (Faction::Wizard, vec![Neutral, Holy, Nature, Destruction]),
            (Faction::Necromancer, vec![Neutral, Death, Destruction]),
        ];

        SpellAccessTable(
            table
                .into_iter()
                .map(|(faction, schools)| SchoolAccess { faction, schools })
                .collect(),
        )
    }
}
