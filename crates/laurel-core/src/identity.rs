//! Identity types for users and catalog definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a platform user
///
/// Chat platforms hand out numeric ids but callers pass them through as
/// strings, so the engine stores the string form verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Create a new user ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier for a badge definition in the badge catalog
///
/// Uses a string-based ID for easy reference from RON catalog files
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeId(pub String);

impl BadgeId {
    /// Create a new badge ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BadgeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for BadgeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier for a quest template in the quest catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestId(pub String);

impl QuestId {
    /// Create a new quest template ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QuestId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for QuestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Caller-side classification of an engagement event ("post_content",
/// "receive_gift", ...), resolved to an XP amount through the action table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionKey(pub String);

impl ActionKey {
    /// Create a new action key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActionKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ActionKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier for a quest event category ("post", "comment", "live", ...)
///
/// Quest templates declare which kind of event advances them; callers tag
/// each event with its kind when reporting progress.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestKind(pub String);

impl QuestKind {
    /// Create a new quest kind
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// Get the kind as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QuestKind {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for QuestKind {
    fn from(s: String) -> Self {
        Self(s)
    }
}
