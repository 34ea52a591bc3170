//! The catalog bundle
//!
//! Everything configurable about the engine lives here: the level table,
//! badge and quest catalogs, the XP action table, and the streak rules.
//! A bundle is constructed once at process start (built-in defaults or a
//! RON loader) and shared read-only by all concurrent operations.

use crate::action::ActionTable;
use crate::badge::BadgeCatalog;
use crate::error::{Error, Result};
use crate::level::LevelTable;
use crate::quest::QuestCatalog;
use crate::streak::StreakRules;

/// Immutable configuration bundle the engine is constructed with
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Level thresholds and level-up rewards
    pub levels: LevelTable,
    /// Badge definitions
    pub badges: BadgeCatalog,
    /// Daily quest templates
    pub quests: QuestCatalog,
    /// XP action table
    pub actions: ActionTable,
    /// Streak milestones
    pub streak: StreakRules,
}

impl Catalog {
    /// Assemble a bundle, checking cross-references between its parts
    pub fn new(
        levels: LevelTable,
        badges: BadgeCatalog,
        quests: QuestCatalog,
        actions: ActionTable,
        streak: StreakRules,
    ) -> Result<Self> {
        for badge in [&streak.week_badge, &streak.month_badge] {
            if !badges.contains(badge) {
                return Err(Error::UnknownBadgeReference {
                    referrer: "streak rules".to_string(),
                    badge: badge.to_string(),
                });
            }
        }
        Ok(Self {
            levels,
            badges,
            quests,
            actions,
            streak,
        })
    }

    /// The built-in configuration shipped with the platform
    pub fn builtin() -> Self {
        Self {
            levels: LevelTable::builtin(),
            badges: BadgeCatalog::builtin(),
            quests: QuestCatalog::builtin(),
            actions: ActionTable::builtin(),
            streak: StreakRules::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BadgeId;

    #[test]
    fn test_builtin_bundle_is_consistent() {
        let catalog = Catalog::builtin();
        assert!(catalog.badges.contains(&catalog.streak.week_badge));
        assert!(catalog.badges.contains(&catalog.streak.month_badge));
        assert!(!catalog.quests.is_empty());
        assert!(!catalog.actions.is_empty());
    }

    #[test]
    fn test_rejects_dangling_streak_badge() {
        let streak = StreakRules {
            week_badge: BadgeId::new("missing"),
            ..StreakRules::default()
        };
        let result = Catalog::new(
            LevelTable::builtin(),
            BadgeCatalog::builtin(),
            QuestCatalog::builtin(),
            ActionTable::builtin(),
            streak,
        );
        assert!(matches!(
            result,
            Err(Error::UnknownBadgeReference { badge, .. }) if badge == "missing"
        ));
    }
}
