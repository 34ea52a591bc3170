//! Idempotent badge awarding

use crate::engine::EngagementEngine;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use laurel_core::{BadgeDefinition, BadgeId, UserId};
use laurel_store::{AwardedBadge, DocumentStore, UserRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A badge successfully attached to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeGrant {
    /// The catalog definition of the awarded badge
    pub badge: BadgeDefinition,
    /// When it was attached
    pub awarded_at: DateTime<Utc>,
}

impl<S: DocumentStore> EngagementEngine<S> {
    /// Attach a catalog badge to a user, at most once
    ///
    /// The duplicate check runs inside the same transaction as the
    /// append, so racing callers cannot both add the badge: one gets the
    /// grant, every other gets [`Error::AlreadyAwarded`]. That error is
    /// the expected signal when level-up handlers, streak milestones, and
    /// admin actions all try to award the same badge.
    pub async fn award_badge(&self, user_id: &UserId, badge_id: &BadgeId) -> Result<BadgeGrant> {
        let def = self
            .catalog
            .badges
            .get(badge_id)
            .ok_or_else(|| Error::BadgeNotFound(badge_id.clone()))?;

        let grant = self
            .store
            .transactional_update(user_id.as_str(), |rec: &mut UserRecord| -> Result<BadgeGrant> {
                if rec.has_badge(&def.id) {
                    return Err(Error::AlreadyAwarded(def.id.clone()));
                }
                let awarded_at = Utc::now();
                rec.badges.push(AwardedBadge {
                    badge_id: def.id.clone(),
                    awarded_at,
                });
                rec.touch(awarded_at);
                Ok(BadgeGrant {
                    badge: def.clone(),
                    awarded_at,
                })
            })
            .await?;

        info!(user = %user_id, badge = %grant.badge.id, "badge awarded");
        Ok(grant)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use laurel_core::Catalog;
    use laurel_store::MemoryStore;

    async fn engine_with_user(id: &str) -> (EngagementEngine<MemoryStore>, UserId) {
        let engine = EngagementEngine::new(Catalog::builtin(), MemoryStore::new());
        let user = UserId::new(id);
        engine.create_user(&user).await.unwrap();
        (engine, user)
    }

    #[tokio::test]
    async fn test_award_badge_attaches_definition() {
        let (engine, user) = engine_with_user("1").await;

        let grant = engine
            .award_badge(&user, &BadgeId::new("welcome"))
            .await
            .unwrap();
        assert_eq!(grant.badge.name, "Welcome");
        assert_eq!(grant.badge.icon, "👋");

        let rec = engine.get_user(&user).await.unwrap();
        assert_eq!(rec.badges.len(), 1);
        assert_eq!(rec.badges[0].badge_id.as_str(), "welcome");
    }

    #[tokio::test]
    async fn test_second_award_is_already_awarded() {
        let (engine, user) = engine_with_user("1").await;
        let badge = BadgeId::new("earlybird");

        engine.award_badge(&user, &badge).await.unwrap();
        let err = engine.award_badge(&user, &badge).await.unwrap_err();
        assert!(err.is_already_awarded());

        // Exactly one entry survives
        let rec = engine.get_user(&user).await.unwrap();
        assert_eq!(rec.badges.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_badge_id() {
        let (engine, user) = engine_with_user("1").await;
        let err = engine
            .award_badge(&user, &BadgeId::new("participation_trophy"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadgeNotFound(_)));
    }

    #[tokio::test]
    async fn test_award_to_missing_user() {
        let engine = EngagementEngine::new(Catalog::builtin(), MemoryStore::new());
        let err = engine
            .award_badge(&UserId::new("ghost"), &BadgeId::new("welcome"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UserNotFound(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_racing_awards_produce_one_entry() {
        let (engine, user) = engine_with_user("1").await;
        let badge = BadgeId::new("verified");

        let mut handles = Vec::new();
        for _ in 0..8 {
            let engine = engine.clone();
            let user = user.clone();
            let badge = badge.clone();
            handles.push(tokio::spawn(
                async move { engine.award_badge(&user, &badge).await },
            ));
        }

        let mut grants = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => grants += 1,
                Err(e) if e.is_already_awarded() => duplicates += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(grants, 1);
        assert_eq!(duplicates, 7);

        let rec = engine.get_user(&user).await.unwrap();
        assert_eq!(rec.badges.len(), 1);
    }
}
