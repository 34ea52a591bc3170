//! Daily Loop Example
//!
//! Walks one user through a full day of engagement: the login streak,
//! XP actions, daily quests, and the leaderboard, all against the
//! in-memory store with the built-in catalog.

use chrono::Utc;
use laurel_core::{ActionKey, BadgeId, Catalog, EventData, QuestKind, UserId, Value};
use laurel_engine::{EngagementEngine, ScoreField};
use laurel_store::MemoryStore;

#[tokio::main]
async fn main() -> laurel_engine::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daily_loop=info,laurel_engine=info".into()),
        )
        .init();

    println!("=== Laurel Daily Loop Example ===\n");

    let engine = EngagementEngine::new(Catalog::builtin(), MemoryStore::new());
    let today = Utc::now().date_naive();

    // A new member joins
    let alice = UserId::new("1001");
    engine.create_user(&alice).await?;
    engine.award_badge(&alice, &BadgeId::new("welcome")).await?;
    println!("Created user {} with the welcome badge", alice);

    // First login of the day
    let streak = engine.update_streak(&alice, today).await?;
    println!(
        "Login registered: streak {} (continued: {})",
        streak.streak, streak.continued
    );

    // She posts with the campaign hashtag
    let award = engine
        .add_action_xp(&alice, &ActionKey::new("post_content"))
        .await?;
    println!(
        "\nPosted content: +{} XP (total {}, level {})",
        award.xp_added, award.total_xp, award.level
    );

    let quests = engine.daily_quests(&alice, today).await?;
    println!("Today's quests:");
    for quest in &quests.quests {
        println!("  {}: {}/{}", quest.template_id, quest.progress, quest.target);
    }

    let mut event = EventData::new();
    event.insert("hashtag".to_string(), Value::from("#PNPtvLove"));
    let progress = engine
        .update_quest_progress(&alice, today, &QuestKind::new("post"), &event)
        .await?;
    if let Some(done) = &progress.quest {
        println!(
            "Quest completed: {} (+{} XP, +{} bonus)",
            done.name, done.reward.xp, done.reward.bonus
        );
    }

    // She attends a live stream in the evening
    engine
        .add_action_xp(&alice, &ActionKey::new("attend_live"))
        .await?;
    let progress = engine
        .update_quest_progress(&alice, today, &QuestKind::new("live"), &EventData::new())
        .await?;
    if let Some(done) = &progress.quest {
        println!(
            "Quest completed: {} (+{} XP, +{} bonus)",
            done.name, done.reward.xp, done.reward.bonus
        );
    }

    // A couple of rivals to fill the board
    for (id, xp) in [("1002", 480u64), ("1003", 120)] {
        let user = UserId::new(id);
        engine.create_user(&user).await?;
        engine.add_xp(&user, xp).await?;
    }

    let record = engine.get_user(&alice).await?;
    println!(
        "\n{} ends the day at level {} with {} XP, {} bonus points, {} badges",
        alice,
        record.level,
        record.xp,
        record.bonus_balance,
        record.badges.len()
    );

    println!("\n=== XP Leaderboard ===");
    for entry in engine.leaderboard(ScoreField::Xp, 10).await? {
        println!("  #{} {} with {} XP", entry.rank, entry.user_id, entry.score);
    }

    Ok(())
}
