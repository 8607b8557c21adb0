//! Prerequisite resolution over the building dependency graph
//!
//! Pure functions of catalog + built set; no hidden state.

use std::collections::BTreeSet;

use crate::catalog::BuildingCatalog;
use crate::core::types::BuildingId;

/// True iff every non-`NONE` prerequisite of `building` is in `built`
pub fn satisfied(catalog: &BuildingCatalog, building: BuildingId, built: &BTreeSet<BuildingId>) -> bool {
    catalog
        .get(building)
        .prerequisites
        .iter()
        .filter(|prereq| !prereq.is_none())
        .all(|prereq| built.contains(prereq))
}

/// Prerequisites of `building` not yet in `built`, in catalog order
pub fn missing(
    catalog: &BuildingCatalog,
    building: BuildingId,
    built: &BTreeSet<BuildingId>,
) -> Vec<BuildingId> {
    catalog
        .get(building)
        .prerequisites
        .iter()
        .copied()
        .filter(|prereq| !prereq.is_none() && !built.contains(prereq))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::fixtures::{self, ids};

    #[test]
    fn test_no_prerequisites_always_satisfied() {
        let catalog = fixtures::catalog();
        assert!(satisfied(&catalog.buildings, ids::FORT, &BTreeSet::new()));
        assert!(missing(&catalog.buildings, ids::FORT, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_none_sentinel_ignored() {
        let catalog = fixtures::catalog();
        // The well lists only the NONE sentinel
        assert_eq!(catalog.buildings.get(ids::WELL).prerequisites, vec![BuildingId::NONE]);
        assert!(satisfied(&catalog.buildings, ids::WELL, &BTreeSet::new()));
    }

    #[test]
    fn test_chain_of_prerequisites() {
        let catalog = fixtures::catalog();
        let mut built = BTreeSet::new();

        assert!(!satisfied(&catalog.buildings, ids::MAGE_GUILD_2, &built));
        assert_eq!(
            missing(&catalog.buildings, ids::MAGE_GUILD_2, &built),
            vec![ids::MAGE_GUILD_1]
        );

        built.insert(ids::MAGE_GUILD_1);
        assert!(satisfied(&catalog.buildings, ids::MAGE_GUILD_2, &built));
    }

    #[test]
    fn test_all_prerequisites_required() {
        let catalog = fixtures::catalog();
        let mut built = BTreeSet::new();
        built.insert(ids::BLACKSMITH);

        // Armory needs both the blacksmith and the tavern
        assert!(!satisfied(&catalog.buildings, ids::ARMORY, &built));
        assert_eq!(missing(&catalog.buildings, ids::ARMORY, &built), vec![ids::TAVERN]);

        built.insert(ids::TAVERN);
        assert!(satisfied(&catalog.buildings, ids::ARMORY, &built));
    }
}
