//! Laurel Engine - Engagement operations over a document store
//!
//! This crate wires the `laurel-core` catalogs to a [`laurel_store`]
//! backend and exposes the engine's operations:
//! - XP accounting with level derivation (`add_xp`, `add_action_xp`)
//! - Idempotent badge awards (`award_badge`)
//! - Daily quest materialization and progress (`daily_quests`,
//!   `update_quest_progress`)
//! - Login streak continuity with milestone bonuses (`update_streak`)
//! - Score leaderboards (`leaderboard`)
//!
//! Every mutating operation is one atomic update over a single stored
//! record; the engine holds no state of its own beyond the shared
//! catalog, so it clones cheaply into concurrent tasks.

mod badges;
mod engine;
mod error;
mod leaderboard;
mod quests;
mod streak;
mod xp;

pub use badges::BadgeGrant;
pub use engine::EngagementEngine;
pub use error::{Error, Result};
pub use leaderboard::{LeaderboardEntry, ScoreField};
pub use quests::{CompletedQuest, QuestProgress};
pub use streak::{StreakReward, StreakUpdate};
pub use xp::XpAward;
