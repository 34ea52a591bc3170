//! Stored document types
//!
//! Two document kinds back the whole engine: one engagement record per
//! user, and one quest set per user per calendar day. Both are plain
//! serde structs; the `Document` trait binds each to its collection and
//! primary key so stores can handle them generically.

use chrono::{DateTime, NaiveDate, Utc};
use laurel_core::{ActivityCounter, BadgeId, QuestId, QuestTemplate, UserId};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Collection holding one [`UserRecord`] per user
pub const USER_COLLECTION: &str = "users";

/// Collection holding one [`QuestSetRecord`] per user per day
pub const QUEST_SET_COLLECTION: &str = "daily_quests";

/// A value stored in a named collection under a string key
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection this document type is stored in
    const COLLECTION: &'static str;

    /// Primary key within the collection
    fn key(&self) -> String;

    /// Numeric value of a named ranking field, if this document has it
    ///
    /// Ordered queries sort on this; documents returning `None` for the
    /// requested field are left out of the result, as document stores do
    /// for missing fields.
    fn ranking_key(&self, field: &str) -> Option<u64> {
        let _ = field;
        None
    }
}

/// A badge attached to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardedBadge {
    /// Catalog id of the badge
    pub badge_id: BadgeId,
    /// When it was awarded
    pub awarded_at: DateTime<Utc>,
}

/// Per-user engagement state
///
/// Owned and exclusively mutated by the engine. `xp` only ever grows,
/// `level` is always the level derived from `xp`, and `badges` never
/// holds the same id twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Stable platform user id
    pub user_id: UserId,
    /// Cumulative experience points
    pub xp: u64,
    /// Level derived from `xp`
    pub level: u32,
    /// Badges awarded so far, in award order
    pub badges: Vec<AwardedBadge>,
    /// Consecutive-day login counter
    pub login_streak: u32,
    /// Calendar day of the last counted login
    pub last_login: Option<NaiveDate>,
    /// Posts published (leaderboard score field)
    pub total_posts: u64,
    /// Gifts received (leaderboard score field)
    pub total_gifts_received: u64,
    /// Accumulated platform-currency bonuses
    pub bonus_balance: u64,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the record was last written
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Fresh record for a user's first engagement event
    pub fn new(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            xp: 0,
            level: 1,
            badges: Vec::new(),
            login_streak: 0,
            last_login: None,
            total_posts: 0,
            total_gifts_received: 0,
            bonus_balance: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the user already holds the given badge
    pub fn has_badge(&self, id: &BadgeId) -> bool {
        self.badges.iter().any(|b| &b.badge_id == id)
    }

    /// Bump an activity counter
    pub fn bump_counter(&mut self, counter: ActivityCounter) {
        match counter {
            ActivityCounter::Posts => self.total_posts = self.total_posts.saturating_add(1),
            ActivityCounter::GiftsReceived => {
                self.total_gifts_received = self.total_gifts_received.saturating_add(1)
            }
        }
    }

    /// Refresh the modification timestamp
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

impl Document for UserRecord {
    const COLLECTION: &'static str = USER_COLLECTION;

    fn key(&self) -> String {
        self.user_id.to_string()
    }

    fn ranking_key(&self, field: &str) -> Option<u64> {
        match field {
            "xp" => Some(self.xp),
            "total_posts" => Some(self.total_posts),
            "total_gifts_received" => Some(self.total_gifts_received),
            _ => None,
        }
    }
}

/// One user's progress on one daily quest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestInstance {
    /// Catalog template this instance was materialized from
    pub template_id: QuestId,
    /// Qualifying events counted so far
    pub progress: u32,
    /// Events needed to complete (copied from the template)
    pub target: u32,
    /// Whether the instance has completed
    pub completed: bool,
}

impl QuestInstance {
    /// Fresh instance of a template
    pub fn from_template(template: &QuestTemplate) -> Self {
        Self {
            template_id: template.id.clone(),
            progress: 0,
            target: template.target,
            completed: false,
        }
    }
}

/// One user's quest set for one calendar day
///
/// Materialized lazily on first access; after that, only `progress` and
/// `completed` fields of its instances ever change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestSetRecord {
    /// Owning user
    pub user_id: UserId,
    /// Calendar day the set belongs to
    pub date: NaiveDate,
    /// Instances in catalog order
    pub quests: Vec<QuestInstance>,
    /// When the set was materialized
    pub created_at: DateTime<Utc>,
}

impl QuestSetRecord {
    /// Key for a user's set on a given day
    pub fn key_for(user_id: &UserId, date: NaiveDate) -> String {
        format!("{}_{}", user_id, date)
    }

    /// Materialize a fresh set from catalog templates
    pub fn materialize<'a>(
        user_id: UserId,
        date: NaiveDate,
        templates: impl Iterator<Item = &'a QuestTemplate>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            date,
            quests: templates.map(QuestInstance::from_template).collect(),
            created_at: now,
        }
    }

    /// Find the instance for a template id
    pub fn instance(&self, id: &QuestId) -> Option<&QuestInstance> {
        self.quests.iter().find(|q| &q.template_id == id)
    }
}

impl Document for QuestSetRecord {
    const COLLECTION: &'static str = QUEST_SET_COLLECTION;

    fn key(&self) -> String {
        Self::key_for(&self.user_id, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laurel_core::QuestCatalog;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_user_record_defaults() {
        let rec = UserRecord::new(UserId::new("77"), Utc::now());
        assert_eq!(rec.xp, 0);
        assert_eq!(rec.level, 1);
        assert_eq!(rec.login_streak, 0);
        assert!(rec.last_login.is_none());
        assert!(rec.badges.is_empty());
    }

    #[test]
    fn test_user_record_ranking_keys() {
        let mut rec = UserRecord::new(UserId::new("77"), Utc::now());
        rec.xp = 420;
        rec.total_posts = 9;
        assert_eq!(rec.ranking_key("xp"), Some(420));
        assert_eq!(rec.ranking_key("total_posts"), Some(9));
        assert_eq!(rec.ranking_key("total_gifts_received"), Some(0));
        assert_eq!(rec.ranking_key("no_such_field"), None);
    }

    #[test]
    fn test_bump_counter() {
        let mut rec = UserRecord::new(UserId::new("77"), Utc::now());
        rec.bump_counter(ActivityCounter::Posts);
        rec.bump_counter(ActivityCounter::Posts);
        rec.bump_counter(ActivityCounter::GiftsReceived);
        assert_eq!(rec.total_posts, 2);
        assert_eq!(rec.total_gifts_received, 1);
    }

    #[test]
    fn test_quest_set_key_format() {
        let key = QuestSetRecord::key_for(&UserId::new("42"), day("2024-03-10"));
        assert_eq!(key, "42_2024-03-10");
    }

    #[test]
    fn test_materialize_from_catalog() {
        let catalog = QuestCatalog::builtin();
        let set = QuestSetRecord::materialize(
            UserId::new("42"),
            day("2024-03-10"),
            catalog.iter(),
            Utc::now(),
        );
        assert_eq!(set.quests.len(), catalog.len());
        assert!(set.quests.iter().all(|q| q.progress == 0 && !q.completed));
        // Catalog order is preserved
        assert_eq!(set.quests[0].template_id.as_str(), "post_with_hashtag");
    }
}
