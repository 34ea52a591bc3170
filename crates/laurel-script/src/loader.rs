//! RON catalog loader

use crate::error::{Error, Result};
use laurel_core::{
    ActionDef, ActionTable, BadgeCatalog, BadgeDefinition, Catalog, LevelTable, LevelThreshold,
    QuestCatalog, QuestTemplate, StreakRules,
};
use std::fs;
use std::path::Path;

/// Loader for RON catalog files
///
/// Accumulates definitions across any number of files and validates the
/// whole bundle in [`Loader::finish`]. Sections may be split across files
/// however the deployment likes, but each definition id appears once
/// overall. When no streak section is loaded the default milestone rules
/// apply, so the badge files must still define the badges those rules
/// reference.
#[derive(Debug, Default)]
pub struct Loader {
    levels: Vec<LevelThreshold>,
    badges: Vec<BadgeDefinition>,
    quests: Vec<QuestTemplate>,
    actions: Vec<ActionDef>,
    streak: Option<StreakRules>,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a single RON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        // Determine the section from the filename or the content
        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

        if filename.contains("level") || content.contains("levels:") {
            self.load_levels_str(&content)
        } else if filename.contains("badge") || content.contains("badges:") {
            self.load_badges_str(&content)
        } else if filename.contains("quest") || content.contains("quests:") {
            self.load_quests_str(&content)
        } else if filename.contains("action") || content.contains("actions:") {
            self.load_actions_str(&content)
        } else if filename.contains("streak") || content.contains("streak:") {
            self.load_streak_str(&content)
        } else {
            self.load_any_str(&content).map_err(|_| {
                Error::InvalidSchema(format!(
                    "no recognizable catalog section in {}",
                    path.display()
                ))
            })
        }
    }

    /// Load level thresholds from a RON string
    pub fn load_levels_str(&mut self, content: &str) -> Result<()> {
        #[derive(serde::Deserialize)]
        struct LevelFile {
            levels: Vec<LevelThreshold>,
        }

        let file: LevelFile = ron::from_str(content)?;
        for threshold in file.levels {
            if self.levels.iter().any(|t| t.level == threshold.level) {
                return Err(Error::DuplicateDefinition(format!(
                    "level {}",
                    threshold.level
                )));
            }
            self.levels.push(threshold);
        }
        Ok(())
    }

    /// Load badge definitions from a RON string
    pub fn load_badges_str(&mut self, content: &str) -> Result<()> {
        #[derive(serde::Deserialize)]
        struct BadgeFile {
            badges: Vec<BadgeDefinition>,
        }

        let file: BadgeFile = ron::from_str(content)?;
        for badge in file.badges {
            if self.badges.iter().any(|b| b.id == badge.id) {
                return Err(Error::DuplicateDefinition(badge.id.to_string()));
            }
            self.badges.push(badge);
        }
        Ok(())
    }

    /// Load quest templates from a RON string
    pub fn load_quests_str(&mut self, content: &str) -> Result<()> {
        #[derive(serde::Deserialize)]
        struct QuestFile {
            quests: Vec<QuestTemplate>,
        }

        let file: QuestFile = ron::from_str(content)?;
        for quest in file.quests {
            if self.quests.iter().any(|q| q.id == quest.id) {
                return Err(Error::DuplicateDefinition(quest.id.to_string()));
            }
            self.quests.push(quest);
        }
        Ok(())
    }

    /// Load XP action definitions from a RON string
    pub fn load_actions_str(&mut self, content: &str) -> Result<()> {
        #[derive(serde::Deserialize)]
        struct ActionFile {
            actions: Vec<ActionDef>,
        }

        let file: ActionFile = ron::from_str(content)?;
        for action in file.actions {
            if self.actions.iter().any(|a| a.key == action.key) {
                return Err(Error::DuplicateDefinition(action.key.to_string()));
            }
            self.actions.push(action);
        }
        Ok(())
    }

    /// Load streak rules from a RON string
    pub fn load_streak_str(&mut self, content: &str) -> Result<()> {
        #[derive(serde::Deserialize)]
        struct StreakFile {
            streak: StreakRules,
        }

        let file: StreakFile = ron::from_str(content)?;
        if self.streak.is_some() {
            return Err(Error::DuplicateDefinition("streak rules".to_string()));
        }
        self.streak = Some(file.streak);
        Ok(())
    }

    /// Try each section format in turn
    fn load_any_str(&mut self, content: &str) -> Result<()> {
        match self.load_levels_str(content) {
            Err(Error::Ron(_)) => {}
            other => return other,
        }
        match self.load_badges_str(content) {
            Err(Error::Ron(_)) => {}
            other => return other,
        }
        match self.load_quests_str(content) {
            Err(Error::Ron(_)) => {}
            other => return other,
        }
        match self.load_actions_str(content) {
            Err(Error::Ron(_)) => {}
            other => return other,
        }
        match self.load_streak_str(content) {
            Err(Error::Ron(_)) => {}
            other => return other,
        }
        Err(Error::InvalidSchema(
            "could not parse as any known catalog section".to_string(),
        ))
    }

    /// Load all RON files from a directory, recursively
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let file_path = entry.path();

            if file_path.extension().map(|e| e == "ron").unwrap_or(false) {
                self.load_file(&file_path)?;
            } else if file_path.is_dir() {
                self.load_directory(&file_path)?;
            }
        }

        Ok(())
    }

    /// Validate everything loaded and assemble the catalog
    pub fn finish(self) -> Result<Catalog> {
        let levels = LevelTable::new(self.levels)?;
        let badges = BadgeCatalog::new(self.badges)?;
        let quests = QuestCatalog::new(self.quests)?;
        let actions = ActionTable::new(self.actions)?;
        let streak = self.streak.unwrap_or_default();
        Ok(Catalog::new(levels, badges, quests, actions, streak)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use laurel_core::{ActionKey, ActivityCounter, BadgeId, EventData, QuestId, Value};

    const LEVELS: &str = r#"
    (
        levels: [
            (level: 1, xp_required: 0, reward: "Welcome Badge"),
            (level: 2, xp_required: 100, reward: "Novice Badge"),
            (level: 3, xp_required: 250),
        ]
    )
    "#;

    const BADGES: &str = r#"
    (
        badges: [
            (id: "welcome", name: "Welcome", icon: "👋"),
            (id: "streak7", name: "7 Day Streak", icon: "🔥"),
            (id: "streak30", name: "30 Day Streak", icon: "🔥🔥"),
        ]
    )
    "#;

    const QUESTS: &str = r##"
    (
        quests: [
            (
                id: "post_with_hashtag",
                name: "Hashtag Hero",
                description: "Post with the campaign hashtag",
                kind: "post",
                target: 1,
                reward: (xp: 15, bonus: 2),
                condition: Some(HashtagIs("#PNPtvLove")),
            ),
            (
                id: "comment_5_posts",
                name: "Social Commentator",
                kind: "comment",
                target: 5,
                reward: (xp: 20, bonus: 3),
            ),
        ]
    )
    "##;

    const ACTIONS: &str = r#"
    (
        actions: [
            (key: "post_content", xp: 10, counter: Some(Posts)),
            (key: "receive_like", xp: 2),
        ]
    )
    "#;

    const STREAK: &str = r#"
    (
        streak: (
            week_bonus: 5,
            month_bonus: 50,
            recurring_bonus: 3,
            week_badge: "streak7",
            month_badge: "streak30",
        )
    )
    "#;

    fn full_loader() -> Loader {
        let mut loader = Loader::new();
        loader.load_levels_str(LEVELS).unwrap();
        loader.load_badges_str(BADGES).unwrap();
        loader.load_quests_str(QUESTS).unwrap();
        loader.load_actions_str(ACTIONS).unwrap();
        loader.load_streak_str(STREAK).unwrap();
        loader
    }

    #[test]
    fn test_load_full_catalog() {
        let catalog = full_loader().finish().unwrap();

        assert_eq!(catalog.levels.level_for(0), 1);
        assert_eq!(catalog.levels.level_for(250), 3);
        assert_eq!(catalog.levels.reward_for(2), Some("Novice Badge"));
        assert!(catalog.badges.contains(&BadgeId::new("welcome")));
        assert_eq!(catalog.actions.xp_for(&ActionKey::new("post_content")), Some(10));
        assert_eq!(catalog.streak.week_bonus, 5);

        let action = catalog.actions.get(&ActionKey::new("post_content")).unwrap();
        assert_eq!(action.counter, Some(ActivityCounter::Posts));
    }

    #[test]
    fn test_quest_condition_survives_loading() {
        let catalog = full_loader().finish().unwrap();

        let quest = catalog.quests.get(&QuestId::new("post_with_hashtag")).unwrap();
        let condition = quest.condition.as_ref().unwrap();

        let mut event = EventData::new();
        event.insert("hashtag".to_string(), Value::from("#PNPtvLove"));
        assert!(condition.eval(&event));

        event.insert("hashtag".to_string(), Value::from("#Other"));
        assert!(!condition.eval(&event));
    }

    #[test]
    fn test_duplicate_badge_rejected() {
        let mut loader = Loader::new();
        loader.load_badges_str(BADGES).unwrap();

        let err = loader.load_badges_str(BADGES).unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition(_)));
    }

    #[test]
    fn test_duplicate_level_rejected() {
        let mut loader = Loader::new();
        loader.load_levels_str(LEVELS).unwrap();

        let err = loader.load_levels_str(LEVELS).unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition(_)));
    }

    #[test]
    fn test_unordered_levels_rejected_at_finish() {
        let content = r#"
        (
            levels: [
                (level: 1, xp_required: 0),
                (level: 2, xp_required: 300),
                (level: 3, xp_required: 250),
            ]
        )
        "#;

        let mut loader = Loader::new();
        loader.load_levels_str(content).unwrap();
        loader.load_badges_str(BADGES).unwrap();

        let err = loader.finish().unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }

    #[test]
    fn test_default_streak_rules_need_their_badges() {
        let mut loader = Loader::new();
        loader.load_levels_str(LEVELS).unwrap();
        loader
            .load_badges_str(r#"(badges: [(id: "welcome", name: "Welcome")])"#)
            .unwrap();

        let err = loader.finish().unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }

    #[test]
    fn test_custom_streak_rules() {
        let custom = r#"
        (
            streak: (
                week_bonus: 10,
                month_bonus: 100,
                recurring_bonus: 1,
                week_badge: "regular",
                month_badge: "veteran",
            )
        )
        "#;
        let badges = r#"
        (
            badges: [
                (id: "regular", name: "Regular"),
                (id: "veteran", name: "Veteran"),
            ]
        )
        "#;

        let mut loader = Loader::new();
        loader.load_levels_str(LEVELS).unwrap();
        loader.load_badges_str(badges).unwrap();
        loader.load_streak_str(custom).unwrap();

        let catalog = loader.finish().unwrap();
        assert_eq!(catalog.streak.month_bonus, 100);
        assert_eq!(catalog.streak.week_badge, BadgeId::new("regular"));
    }

    #[test]
    fn test_section_sniffing_without_hints() {
        let mut loader = Loader::new();
        loader.load_any_str(BADGES).unwrap();
        loader.load_any_str(LEVELS).unwrap();
        loader.load_any_str(STREAK).unwrap();

        let catalog = loader.finish().unwrap();
        assert!(catalog.badges.contains(&BadgeId::new("streak7")));
        assert_eq!(catalog.levels.level_for(120), 2);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let mut loader = Loader::new();
        let err = loader.load_any_str("(nonsense: 3)").unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }
}
