//! Badge definitions and the badge catalog

use crate::error::{Error, Result};
use crate::BadgeId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Definition of an achievement badge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    /// Unique identifier for this badge
    pub id: BadgeId,
    /// Display name
    pub name: String,
    /// Icon shown next to the name
    #[serde(default)]
    pub icon: String,
    /// Description
    #[serde(default)]
    pub description: String,
}

impl BadgeDefinition {
    /// Create a new badge definition
    pub fn new(
        id: impl Into<BadgeId>,
        name: impl Into<String>,
        icon: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            description: description.into(),
        }
    }
}

/// Immutable set of badge definitions, keyed by id
///
/// Insertion order is preserved so display listings stay stable across
/// runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BadgeCatalog {
    badges: IndexMap<BadgeId, BadgeDefinition>,
}

impl BadgeCatalog {
    /// Build a catalog from definitions, rejecting duplicate ids
    pub fn new(defs: Vec<BadgeDefinition>) -> Result<Self> {
        let mut badges = IndexMap::new();
        for def in defs {
            if badges.contains_key(&def.id) {
                return Err(Error::DuplicateDefinition(def.id.to_string()));
            }
            badges.insert(def.id.clone(), def);
        }
        Ok(Self { badges })
    }

    /// Look up a badge by id
    pub fn get(&self, id: &BadgeId) -> Option<&BadgeDefinition> {
        self.badges.get(id)
    }

    /// Whether the catalog defines the given id
    pub fn contains(&self, id: &BadgeId) -> bool {
        self.badges.contains_key(id)
    }

    /// Iterate definitions in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &BadgeDefinition> {
        self.badges.values()
    }

    /// Number of defined badges
    pub fn len(&self) -> usize {
        self.badges.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }

    /// The built-in badge set shipped with the platform
    pub fn builtin() -> Self {
        let defs = vec![
            BadgeDefinition::new("welcome", "Welcome", "👋", "Joined PNPtv"),
            BadgeDefinition::new("novice", "Novice", "🌱", "Reached level 2"),
            BadgeDefinition::new("social", "Social Butterfly", "🦋", "100 connections made"),
            BadgeDefinition::new("creator", "Content Creator", "🎨", "50 posts published"),
            BadgeDefinition::new("livestar", "Live Star", "⭐", "10 live streams completed"),
            BadgeDefinition::new("generous", "Generous Soul", "💎", "Sent 100 Stars in gifts"),
            BadgeDefinition::new("earlybird", "Early Bird", "🐦", "Early adopter"),
            BadgeDefinition::new("verified", "Verified", "✅", "Identity verified"),
            BadgeDefinition::new("golden", "Golden Member", "👑", "Golden tier subscriber"),
            BadgeDefinition::new("silver", "Silver Member", "🥈", "Silver tier subscriber"),
            BadgeDefinition::new("streak7", "7 Day Streak", "🔥", "7 consecutive days active"),
            BadgeDefinition::new("streak30", "30 Day Streak", "🔥🔥", "30 consecutive days active"),
            BadgeDefinition::new("topcontrib", "Top Contributor", "🏆", "Top 10 in monthly leaderboard"),
        ];
        let mut badges = IndexMap::new();
        for def in defs {
            badges.insert(def.id.clone(), def);
        }
        Self { badges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let catalog = BadgeCatalog::builtin();
        let badge = catalog.get(&BadgeId::from("streak7")).unwrap();
        assert_eq!(badge.name, "7 Day Streak");
        assert_eq!(badge.icon, "🔥");
        assert!(catalog.contains(&BadgeId::from("welcome")));
        assert!(!catalog.contains(&BadgeId::from("no_such_badge")));
    }

    #[test]
    fn test_catalog_preserves_order() {
        let catalog = BadgeCatalog::builtin();
        let first = catalog.iter().next().unwrap();
        assert_eq!(first.id.as_str(), "welcome");
        assert_eq!(catalog.len(), 13);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let defs = vec![
            BadgeDefinition::new("verified", "Verified", "✅", ""),
            BadgeDefinition::new("verified", "Verified Again", "✅", ""),
        ];
        assert!(matches!(
            BadgeCatalog::new(defs),
            Err(Error::DuplicateDefinition(id)) if id == "verified"
        ));
    }

    #[test]
    fn test_badge_def_ron() {
        let ron_str = r#"
        (
            id: "earlybird",
            name: "Early Bird",
            icon: "🐦",
            description: "Early adopter",
        )
        "#;

        let def: BadgeDefinition = ron::from_str(ron_str).unwrap();
        assert_eq!(def.id.as_str(), "earlybird");
        assert_eq!(def.name, "Early Bird");
    }
}
