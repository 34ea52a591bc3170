//! Laurel Core - Domain model for the engagement engine
//!
//! This crate provides the pure, storage-free half of the engine:
//! - Identifier newtypes (`UserId`, `BadgeId`, `QuestId`, `ActionKey`)
//! - Dynamic event payload values (`Value`, `EventData`)
//! - Quest completion conditions with a small evaluator
//! - The catalog bundle: level table, badge catalog, quest catalog,
//!   XP action table, and streak rules
//!
//! Catalogs are immutable once constructed. Build the defaults with
//! [`Catalog::builtin`] or load custom definitions from RON files with
//! the `laurel-script` crate.

mod action;
mod badge;
mod catalog;
mod condition;
mod error;
mod identity;
mod level;
mod quest;
pub mod streak;
mod value;

pub use action::{ActionDef, ActionTable, ActivityCounter};
pub use badge::{BadgeCatalog, BadgeDefinition};
pub use catalog::Catalog;
pub use condition::QuestCondition;
pub use error::{Error, Result};
pub use identity::{ActionKey, BadgeId, QuestId, QuestKind, UserId};
pub use level::{LevelTable, LevelThreshold};
pub use quest::{QuestCatalog, QuestReward, QuestTemplate};
pub use streak::{classify_login, StreakRules, StreakStep};
pub use value::{EventData, Value};
