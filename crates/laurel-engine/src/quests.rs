//! Daily quest lifecycle
//!
//! A user's quest set for a day is materialized lazily from the catalog
//! the first time anyone asks for it, then only its progress fields ever
//! change. Progress updates run inside one transaction over the set;
//! completion rewards are applied to the user record right after the set
//! commits, through the same ledger path as any other XP.

use crate::engine::EngagementEngine;
use crate::error::{Error, Result};
use crate::xp::XpAward;
use chrono::{NaiveDate, Utc};
use laurel_core::{EventData, QuestId, QuestKind, QuestReward, UserId};
use laurel_store::{DocumentStore, Error as StoreError, QuestSetRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// A quest that completed during one progress update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedQuest {
    /// Template the instance came from
    pub template_id: QuestId,
    /// Display name from the template
    pub name: String,
    /// Reward that was issued
    pub reward: QuestReward,
}

/// Result of reporting a quest event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestProgress {
    /// Whether this call completed at least one quest
    pub completed: bool,
    /// The first quest this call completed, if any
    pub quest: Option<CompletedQuest>,
    /// Ledger results for the rewards issued by this call
    pub awards: Vec<XpAward>,
}

impl<S: DocumentStore> EngagementEngine<S> {
    /// Fetch the user's quest set for a day, materializing it on first use
    ///
    /// Repeated calls within one day are idempotent reads: an existing
    /// set is returned as stored, never regenerated. When two tasks race
    /// to materialize the same day, `create` arbitrates and the loser
    /// returns the winner's set.
    pub async fn daily_quests(&self, user_id: &UserId, today: NaiveDate) -> Result<QuestSetRecord> {
        let key = QuestSetRecord::key_for(user_id, today);
        match self.store.get(&key).await {
            Ok(set) => return Ok(set),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let set = QuestSetRecord::materialize(
            user_id.clone(),
            today,
            self.catalog.quests.iter(),
            Utc::now(),
        );
        match self.store.create(&set).await {
            Ok(()) => {
                debug!(user = %user_id, date = %today, "daily quest set materialized");
                Ok(set)
            }
            Err(StoreError::AlreadyExists { .. }) => Ok(self.store.get(&key).await?),
            Err(e) => Err(e.into()),
        }
    }

    /// Advance the day's quests matching an event, issuing rewards for
    /// any that complete
    ///
    /// Every not-yet-completed instance whose template kind matches gets
    /// one step of progress, provided the template's condition passes for
    /// `event`. Completion is a one-time edge: an instance that reaches
    /// its target flips to completed and rewards exactly once; later
    /// matching events leave it untouched and `completed` in the result
    /// stays false.
    ///
    /// Fails with [`Error::UnknownQuestKind`] when no template uses the
    /// kind, and [`Error::QuestSetNotFound`] when the day's set has not
    /// been materialized yet.
    pub async fn update_quest_progress(
        &self,
        user_id: &UserId,
        today: NaiveDate,
        kind: &QuestKind,
        event: &EventData,
    ) -> Result<QuestProgress> {
        if !self.catalog.quests.has_kind(kind) {
            return Err(Error::UnknownQuestKind(kind.clone()));
        }

        let key = QuestSetRecord::key_for(user_id, today);
        let completed_ids = self
            .store
            .transactional_update(&key, |set: &mut QuestSetRecord| -> Result<Vec<QuestId>> {
                let mut completed = Vec::new();
                for quest in set.quests.iter_mut() {
                    let Some(template) = self.catalog.quests.get(&quest.template_id) else {
                        warn!(
                            template = %quest.template_id,
                            "stored quest instance has no catalog template"
                        );
                        continue;
                    };
                    if &template.kind != kind || quest.completed {
                        continue;
                    }
                    let passes = template.condition.as_ref().map_or(true, |c| c.eval(event));
                    if !passes {
                        continue;
                    }
                    quest.progress += 1;
                    if quest.progress >= quest.target {
                        quest.completed = true;
                        completed.push(quest.template_id.clone());
                    }
                }
                Ok(completed)
            })
            .await?;

        let mut progress = QuestProgress {
            completed: !completed_ids.is_empty(),
            quest: None,
            awards: Vec::new(),
        };
        for template_id in &completed_ids {
            let Some(template) = self.catalog.quests.get(template_id) else {
                continue;
            };
            match self.apply_reward(user_id, template.reward).await {
                Ok(award) => {
                    info!(
                        user = %user_id,
                        quest = %template_id,
                        xp = template.reward.xp,
                        bonus = template.reward.bonus,
                        "daily quest completed"
                    );
                    progress.awards.push(award);
                }
                Err(e) => {
                    // The completion flag is already committed; surface the gap
                    error!(
                        user = %user_id,
                        quest = %template_id,
                        error = %e,
                        "quest completed but reward was not applied"
                    );
                    return Err(e);
                }
            }
            if progress.quest.is_none() {
                progress.quest = Some(CompletedQuest {
                    template_id: template_id.clone(),
                    name: template.name.clone(),
                    reward: template.reward,
                });
            }
        }
        Ok(progress)
    }
}

// ============================================================================
// Tests
// ============================================================================
