//! Login streak continuity
//!
//! One atomic update per login: classify against the stored `last_login`,
//! adjust the counter, stamp today, and credit any milestone bonus in the
//! same write. Milestone badges ride on the regular award path afterwards,
//! so a badge the user already holds is absorbed rather than re-granted.

use crate::engine::EngagementEngine;
use crate::error::{Error, Result};
use chrono::{NaiveDate, Utc};
use laurel_core::{classify_login, StreakStep, UserId};
use laurel_store::{DocumentStore, UserRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Bonus issued when a streak lands on a milestone day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakReward {
    /// Streak length that triggered the bonus
    pub milestone: u32,
    /// Amount credited to the bonus balance
    pub bonus: u64,
}

/// Result of registering a login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakUpdate {
    /// Streak length after this login
    pub streak: u32,
    /// False when the user had already logged in today
    pub continued: bool,
    /// Milestone bonus issued by this login, if any
    pub reward: Option<StreakReward>,
}

impl<S: DocumentStore> EngagementEngine<S> {
    /// Register a login for `today`
    ///
    /// A repeat login on the same day reports the current streak and
    /// changes nothing. A login on the day after `last_login` extends the
    /// streak; any longer gap, or a first login, restarts it at 1. The
    /// counter, `last_login`, and any milestone bonus all land in one
    /// write, so a crash between them cannot be observed.
    pub async fn update_streak(&self, user_id: &UserId, today: NaiveDate) -> Result<StreakUpdate> {
        let rules = &self.catalog.streak;
        let update = self
            .store
            .transactional_update(
                user_id.as_str(),
                |rec: &mut UserRecord| -> Result<StreakUpdate> {
                    match classify_login(rec.last_login, today) {
                        StreakStep::SameDay => {
                            return Ok(StreakUpdate {
                                streak: rec.login_streak,
                                continued: false,
                                reward: None,
                            });
                        }
                        StreakStep::Continued => {
                            rec.login_streak = rec.login_streak.saturating_add(1);
                        }
                        StreakStep::Restarted => rec.login_streak = 1,
                    }
                    rec.last_login = Some(today);
                    let reward = rules.bonus_for(rec.login_streak).map(|bonus| {
                        rec.bonus_balance = rec.bonus_balance.saturating_add(bonus);
                        StreakReward {
                            milestone: rec.login_streak,
                            bonus,
                        }
                    });
                    rec.touch(Utc::now());
                    Ok(StreakUpdate {
                        streak: rec.login_streak,
                        continued: true,
                        reward,
                    })
                },
            )
            .await?;

        if update.continued {
            match &update.reward {
                Some(reward) => info!(
                    user = %user_id,
                    streak = update.streak,
                    bonus = reward.bonus,
                    "streak milestone reached"
                ),
                None => debug!(user = %user_id, streak = update.streak, "login streak updated"),
            }
            if let Some(badge_id) = rules.badge_for(update.streak).cloned() {
                match self.award_badge(user_id, &badge_id).await {
                    Ok(_) | Err(Error::AlreadyAwarded(_)) => {}
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(update)
    }
}

// ============================================================================
// Tests
// ============================================================================
