//! Daily quest templates and the quest catalog

use crate::condition::QuestCondition;
use crate::error::{Error, Result};
use crate::{QuestId, QuestKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reward granted once when a quest instance completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuestReward {
    /// XP applied through the ledger
    pub xp: u64,
    /// Platform-currency bonus credited to the user's balance
    #[serde(default)]
    pub bonus: u64,
}

impl QuestReward {
    /// Create a new reward
    pub fn new(xp: u64, bonus: u64) -> Self {
        Self { xp, bonus }
    }
}

/// Definition of a daily quest
///
/// Each calendar day every template is instantiated once per user; the
/// instance tracks progress toward `target` and completes at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestTemplate {
    /// Unique identifier for this template
    pub id: QuestId,
    /// Display name
    pub name: String,
    /// Description shown in the quest list
    #[serde(default)]
    pub description: String,
    /// Event category that advances this quest
    pub kind: QuestKind,
    /// Number of qualifying events needed to complete
    pub target: u32,
    /// Completion reward
    pub reward: QuestReward,
    /// Optional predicate an event must pass to count
    #[serde(default)]
    pub condition: Option<QuestCondition>,
}

impl QuestTemplate {
    /// Create a new template with no condition
    pub fn new(
        id: impl Into<QuestId>,
        name: impl Into<String>,
        kind: impl Into<QuestKind>,
        target: u32,
        reward: QuestReward,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind: kind.into(),
            target,
            reward,
            condition: None,
        }
    }

    /// Attach a completion condition
    pub fn with_condition(mut self, condition: QuestCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Immutable set of quest templates, keyed by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestCatalog {
    templates: IndexMap<QuestId, QuestTemplate>,
}

impl QuestCatalog {
    /// Build a catalog from templates, rejecting duplicates and zero targets
    pub fn new(defs: Vec<QuestTemplate>) -> Result<Self> {
        let mut templates = IndexMap::new();
        for def in defs {
            if def.target == 0 {
                return Err(Error::ZeroQuestTarget {
                    quest: def.id.to_string(),
                });
            }
            if templates.contains_key(&def.id) {
                return Err(Error::DuplicateDefinition(def.id.to_string()));
            }
            templates.insert(def.id.clone(), def);
        }
        Ok(Self { templates })
    }

    /// Look up a template by id
    pub fn get(&self, id: &QuestId) -> Option<&QuestTemplate> {
        self.templates.get(id)
    }

    /// Whether any template is advanced by the given event kind
    pub fn has_kind(&self, kind: &QuestKind) -> bool {
        self.templates.values().any(|t| &t.kind == kind)
    }

    /// Iterate templates in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &QuestTemplate> {
        self.templates.values()
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The built-in daily quest set shipped with the platform
    pub fn builtin() -> Self {
        let defs = vec![
            QuestTemplate::new(
                "post_with_hashtag",
                "Hashtag Hero",
                "post",
                1,
                QuestReward::new(15, 2),
            )
            .with_description("Post with #PNPtvLove")
            .with_condition(QuestCondition::hashtag("#PNPtvLove")),
            QuestTemplate::new(
                "comment_5_posts",
                "Social Commentator",
                "comment",
                5,
                QuestReward::new(20, 3),
            )
            .with_description("Comment on 5 posts"),
            QuestTemplate::new(
                "attend_live",
                "Live Enthusiast",
                "live",
                1,
                QuestReward::new(10, 1),
            )
            .with_description("Attend a live stream"),
            QuestTemplate::new(
                "make_connections",
                "Connector",
                "connection",
                3,
                QuestReward::new(25, 5),
            )
            .with_description("Connect with 3 new users"),
            QuestTemplate::new(
                "profile_update",
                "Profile Perfectionist",
                "profile",
                1,
                QuestReward::new(10, 2),
            )
            .with_description("Update your profile bio"),
        ];
        let mut templates = IndexMap::new();
        for def in defs {
            templates.insert(def.id.clone(), def);
        }
        Self { templates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates() {
        let catalog = QuestCatalog::builtin();
        assert_eq!(catalog.len(), 5);

        let hashtag = catalog.get(&QuestId::from("post_with_hashtag")).unwrap();
        assert_eq!(hashtag.target, 1);
        assert_eq!(hashtag.reward, QuestReward::new(15, 2));
        assert!(hashtag.condition.is_some());

        let comments = catalog.get(&QuestId::from("comment_5_posts")).unwrap();
        assert_eq!(comments.target, 5);
        assert!(comments.condition.is_none());
    }

    #[test]
    fn test_has_kind() {
        let catalog = QuestCatalog::builtin();
        assert!(catalog.has_kind(&QuestKind::from("post")));
        assert!(catalog.has_kind(&QuestKind::from("connection")));
        assert!(!catalog.has_kind(&QuestKind::from("checkin")));
    }

    #[test]
    fn test_rejects_zero_target() {
        let defs = vec![QuestTemplate::new(
            "impossible",
            "Impossible",
            "post",
            0,
            QuestReward::default(),
        )];
        assert!(matches!(
            QuestCatalog::new(defs),
            Err(Error::ZeroQuestTarget { quest }) if quest == "impossible"
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let defs = vec![
            QuestTemplate::new("dup", "One", "post", 1, QuestReward::default()),
            QuestTemplate::new("dup", "Two", "comment", 2, QuestReward::default()),
        ];
        assert!(matches!(
            QuestCatalog::new(defs),
            Err(Error::DuplicateDefinition(id)) if id == "dup"
        ));
    }

    #[test]
    fn test_quest_template_ron() {
        let ron_str = r##"
        (
            id: "post_with_hashtag",
            name: "Hashtag Hero",
            description: "Post with #PNPtvLove",
            kind: "post",
            target: 1,
            reward: (xp: 15, bonus: 2),
            condition: Some(HashtagIs("#PNPtvLove")),
        )
        "##;

        let def: QuestTemplate = ron::from_str(ron_str).unwrap();
        assert_eq!(def.id.as_str(), "post_with_hashtag");
        assert_eq!(def.kind.as_str(), "post");
        assert_eq!(def.reward.bonus, 2);
        assert!(def.condition.is_some());
    }
}
