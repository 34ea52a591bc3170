//! XP ledger and level derivation
//!
//! All XP enters a user record through [`apply_xp`], inside a single
//! transactional update: read the current total, add, rederive the level,
//! write both. Quest and streak rewards ride the same path so the
//! level/XP invariant holds no matter where points come from.

use crate::engine::EngagementEngine;
use crate::error::{Error, Result};
use chrono::Utc;
use laurel_core::{ActionKey, LevelTable, QuestReward, UserId};
use laurel_store::{DocumentStore, UserRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Result of applying XP to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XpAward {
    /// Points added by this call
    pub xp_added: u64,
    /// Cumulative total after the write
    pub total_xp: u64,
    /// Level after the write
    pub level: u32,
    /// Whether the level rose in this call
    pub leveled_up: bool,
    /// Reward text for the new level, when it changed
    pub reward: Option<String>,
}

/// Add XP to a record in place and rederive its level
///
/// Called inside a store transaction. The stored level is trusted only as
/// the "before" for level-up detection; if it disagrees with the level
/// derived from XP, the divergence is logged and the write heals it.
pub(crate) fn apply_xp(record: &mut UserRecord, amount: u64, levels: &LevelTable) -> XpAward {
    let old_level = record.level;
    let derived = levels.level_for(record.xp);
    if derived != old_level {
        warn!(
            user = %record.user_id,
            stored = old_level,
            derived,
            "stored level diverged from XP"
        );
    }

    record.xp = record.xp.saturating_add(amount);
    let new_level = levels.level_for(record.xp);
    record.level = new_level;

    let leveled_up = new_level > old_level;
    XpAward {
        xp_added: amount,
        total_xp: record.xp,
        level: new_level,
        leveled_up,
        reward: if leveled_up {
            levels.reward_for(new_level).map(str::to_string)
        } else {
            None
        },
    }
}

impl<S: DocumentStore> EngagementEngine<S> {
    /// Add an explicit XP amount to a user
    ///
    /// Callers resolve action keys through the catalog first (or use
    /// [`EngagementEngine::add_action_xp`]); quest and streak code passes
    /// reward amounts directly.
    pub async fn add_xp(&self, user_id: &UserId, amount: u64) -> Result<XpAward> {
        let award = self
            .store
            .transactional_update(user_id.as_str(), |rec: &mut UserRecord| -> Result<XpAward> {
                let award = apply_xp(rec, amount, &self.catalog.levels);
                rec.touch(Utc::now());
                Ok(award)
            })
            .await?;

        debug!(user = %user_id, amount, total = award.total_xp, "xp added");
        if award.leveled_up {
            info!(user = %user_id, level = award.level, "level up");
        }
        Ok(award)
    }

    /// Resolve an action key and apply its XP and activity counter
    ///
    /// Fails with [`Error::UnknownAction`] when the key is not in the
    /// action table. The XP and the counter bump land in one atomic
    /// update.
    pub async fn add_action_xp(&self, user_id: &UserId, action: &ActionKey) -> Result<XpAward> {
        let def = self
            .catalog
            .actions
            .get(action)
            .ok_or_else(|| Error::UnknownAction(action.clone()))?;

        let award = self
            .store
            .transactional_update(user_id.as_str(), |rec: &mut UserRecord| -> Result<XpAward> {
                let award = apply_xp(rec, def.xp, &self.catalog.levels);
                if let Some(counter) = def.counter {
                    rec.bump_counter(counter);
                }
                rec.touch(Utc::now());
                Ok(award)
            })
            .await?;

        debug!(user = %user_id, action = %action, total = award.total_xp, "action xp added");
        if award.leveled_up {
            info!(user = %user_id, level = award.level, "level up");
        }
        Ok(award)
    }

    /// Apply a quest reward: XP plus bonus credit, one atomic update
    pub(crate) async fn apply_reward(&self, user_id: &UserId, reward: QuestReward) -> Result<XpAward> {
        self.store
            .transactional_update(user_id.as_str(), |rec: &mut UserRecord| -> Result<XpAward> {
                let award = apply_xp(rec, reward.xp, &self.catalog.levels);
                rec.bonus_balance = rec.bonus_balance.saturating_add(reward.bonus);
                rec.touch(Utc::now());
                Ok(award)
            })
            .await
    }
}

// ============================================================================
// Tests
// ============================================================================
