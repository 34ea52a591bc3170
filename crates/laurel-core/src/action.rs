//! XP action table
//!
//! Callers classify each engagement event into an action key; the table
//! resolves the key to a base XP amount and, for a few actions, the
//! activity counter the event also bumps.

use crate::error::{Error, Result};
use crate::ActionKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Activity counter kept on the user record
///
/// Counters feed the non-XP leaderboard score fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityCounter {
    /// Posts published
    Posts,
    /// Gifts received from other users
    GiftsReceived,
}

/// Definition of an XP-earning action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDef {
    /// Action key callers report
    pub key: ActionKey,
    /// Base XP granted per event
    pub xp: u64,
    /// Counter bumped alongside the XP, if any
    #[serde(default)]
    pub counter: Option<ActivityCounter>,
}

impl ActionDef {
    /// Create a new action definition
    pub fn new(key: impl Into<ActionKey>, xp: u64) -> Self {
        Self {
            key: key.into(),
            xp,
            counter: None,
        }
    }

    /// Bind an activity counter to this action
    pub fn with_counter(mut self, counter: ActivityCounter) -> Self {
        self.counter = Some(counter);
        self
    }
}

/// Immutable table of XP-earning actions, keyed by action key
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionTable {
    actions: IndexMap<ActionKey, ActionDef>,
}

impl ActionTable {
    /// Build a table from definitions, rejecting duplicate keys
    pub fn new(defs: Vec<ActionDef>) -> Result<Self> {
        let mut actions = IndexMap::new();
        for def in defs {
            if actions.contains_key(&def.key) {
                return Err(Error::DuplicateDefinition(def.key.to_string()));
            }
            actions.insert(def.key.clone(), def);
        }
        Ok(Self { actions })
    }

    /// Look up an action by key
    pub fn get(&self, key: &ActionKey) -> Option<&ActionDef> {
        self.actions.get(key)
    }

    /// XP amount for an action key, if defined
    pub fn xp_for(&self, key: &ActionKey) -> Option<u64> {
        self.actions.get(key).map(|def| def.xp)
    }

    /// Iterate definitions in table order
    pub fn iter(&self) -> impl Iterator<Item = &ActionDef> {
        self.actions.values()
    }

    /// Number of defined actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The built-in action table shipped with the platform
    pub fn builtin() -> Self {
        let defs = vec![
            ActionDef::new("post_content", 10).with_counter(ActivityCounter::Posts),
            ActionDef::new("receive_like", 2),
            ActionDef::new("attend_live", 5),
            ActionDef::new("complete_daily_quest", 15),
            ActionDef::new("comment", 3),
            ActionDef::new("share", 5),
            ActionDef::new("profile_complete", 50),
            ActionDef::new("first_post", 20).with_counter(ActivityCounter::Posts),
            ActionDef::new("invite_friend", 25),
            ActionDef::new("live_stream", 30),
            ActionDef::new("receive_gift", 8).with_counter(ActivityCounter::GiftsReceived),
        ];
        let mut actions = IndexMap::new();
        for def in defs {
            actions.insert(def.key.clone(), def);
        }
        Self { actions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_amounts() {
        let table = ActionTable::builtin();
        assert_eq!(table.xp_for(&ActionKey::from("post_content")), Some(10));
        assert_eq!(table.xp_for(&ActionKey::from("profile_complete")), Some(50));
        assert_eq!(table.xp_for(&ActionKey::from("receive_gift")), Some(8));
        assert_eq!(table.xp_for(&ActionKey::from("no_such_action")), None);
        assert_eq!(table.len(), 11);
    }

    #[test]
    fn test_counter_bindings() {
        let table = ActionTable::builtin();
        let post = table.get(&ActionKey::from("post_content")).unwrap();
        assert_eq!(post.counter, Some(ActivityCounter::Posts));

        let gift = table.get(&ActionKey::from("receive_gift")).unwrap();
        assert_eq!(gift.counter, Some(ActivityCounter::GiftsReceived));

        let like = table.get(&ActionKey::from("receive_like")).unwrap();
        assert_eq!(like.counter, None);
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let defs = vec![ActionDef::new("comment", 3), ActionDef::new("comment", 5)];
        assert!(matches!(
            ActionTable::new(defs),
            Err(Error::DuplicateDefinition(key)) if key == "comment"
        ));
    }
}
