//! Leaderboard queries
//!
//! Read-only rankings over the user records. The store supplies the
//! candidates ordered by the raw score; the engine fixes the tie order
//! (ascending user id) and assigns 1-based ranks, so the same data always
//! produces the same board.

use crate::engine::EngagementEngine;
use crate::error::Result;
use laurel_core::UserId;
use laurel_store::{DocumentStore, UserRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which counter a leaderboard ranks by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreField {
    /// Lifetime XP
    Xp,
    /// Posts published
    Posts,
    /// Gifts received
    Gifts,
}

impl ScoreField {
    /// Name of the record field backing this board
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreField::Xp => "xp",
            ScoreField::Posts => "total_posts",
            ScoreField::Gifts => "total_gifts_received",
        }
    }

    fn score_of(&self, rec: &UserRecord) -> u64 {
        match self {
            ScoreField::Xp => rec.xp,
            ScoreField::Posts => rec.total_posts,
            ScoreField::Gifts => rec.total_gifts_received,
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position, never shared
    pub rank: u32,
    pub user_id: UserId,
    /// Value of the ranked field at query time
    pub score: u64,
}

impl<S: DocumentStore> EngagementEngine<S> {
    /// Rank users by a score field, highest first, truncated to `limit`
    ///
    /// Ties in score resolve by ascending user id, so repeated queries
    /// over unchanged data return identical boards.
    pub async fn leaderboard(
        &self,
        field: ScoreField,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>> {
        let mut records: Vec<UserRecord> = self.store.query(field.as_str(), limit).await?;
        records.sort_by(|a, b| {
            field
                .score_of(b)
                .cmp(&field.score_of(a))
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        Ok(records
            .into_iter()
            .enumerate()
            .map(|(i, rec)| LeaderboardEntry {
                rank: i as u32 + 1,
                score: field.score_of(&rec),
                user_id: rec.user_id,
            })
            .collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use laurel_core::{ActionKey, Catalog};
    use laurel_store::MemoryStore;

    async fn engine_with_scores(scores: &[(&str, u64)]) -> EngagementEngine<MemoryStore> {
        let engine = EngagementEngine::new(Catalog::builtin(), MemoryStore::new());
        for (id, xp) in scores {
            let user = UserId::new(*id);
            engine.create_user(&user).await.unwrap();
            if *xp > 0 {
                engine.add_xp(&user, *xp).await.unwrap();
            }
        }
        engine
    }

    #[tokio::test]
    async fn test_orders_by_xp_descending() {
        let engine = engine_with_scores(&[("a", 50), ("b", 200), ("c", 120)]).await;

        let board = engine.leaderboard(ScoreField::Xp, 10).await.unwrap();
        let rows: Vec<(u32, &str, u64)> = board
            .iter()
            .map(|e| (e.rank, e.user_id.as_str(), e.score))
            .collect();
        assert_eq!(rows, vec![(1, "b", 200), (2, "c", 120), (3, "a", 50)]);
    }

    #[tokio::test]
    async fn test_ties_resolve_by_user_id() {
        let engine = engine_with_scores(&[("30", 80), ("10", 80), ("20", 80), ("05", 90)]).await;

        let board = engine.leaderboard(ScoreField::Xp, 10).await.unwrap();
        let ids: Vec<&str> = board.iter().map(|e| e.user_id.as_str()).collect();
        assert_eq!(ids, vec!["05", "10", "20", "30"]);
        assert_eq!(
            board.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );

        let again = engine.leaderboard(ScoreField::Xp, 10).await.unwrap();
        assert_eq!(again, board);
    }

    #[tokio::test]
    async fn test_limit_truncates() {
        let engine =
            engine_with_scores(&[("a", 10), ("b", 20), ("c", 30), ("d", 40), ("e", 50)]).await;

        let board = engine.leaderboard(ScoreField::Xp, 3).await.unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board[0].user_id.as_str(), "e");
        assert_eq!(board[2].user_id.as_str(), "c");
    }

    #[tokio::test]
    async fn test_counter_backed_boards() {
        let engine = EngagementEngine::new(Catalog::builtin(), MemoryStore::new());
        let poster = UserId::new("poster");
        let receiver = UserId::new("receiver");
        engine.create_user(&poster).await.unwrap();
        engine.create_user(&receiver).await.unwrap();

        let post = ActionKey::new("post_content");
        let gift = ActionKey::new("receive_gift");
        for _ in 0..3 {
            engine.add_action_xp(&poster, &post).await.unwrap();
        }
        engine.add_action_xp(&receiver, &gift).await.unwrap();

        let posts = engine.leaderboard(ScoreField::Posts, 10).await.unwrap();
        assert_eq!(posts[0].user_id.as_str(), "poster");
        assert_eq!(posts[0].score, 3);

        let gifts = engine.leaderboard(ScoreField::Gifts, 10).await.unwrap();
        assert_eq!(gifts[0].user_id.as_str(), "receiver");
        assert_eq!(gifts[0].score, 1);
    }

    #[tokio::test]
    async fn test_empty_store_gives_empty_board() {
        let engine = EngagementEngine::new(Catalog::builtin(), MemoryStore::new());

        let board = engine.leaderboard(ScoreField::Xp, 10).await.unwrap();
        assert!(board.is_empty());
    }
}
