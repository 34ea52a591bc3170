//! Error types for laurel-core

use thiserror::Error;

/// Catalog validation error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Level table is empty")]
    EmptyLevelTable,

    #[error("Level table must start at level 1 with 0 XP required")]
    MissingBaseLevel,

    #[error("Level thresholds out of order at level {level}: {xp_required} XP")]
    ThresholdOutOfOrder { level: u32, xp_required: u64 },

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),

    #[error("Unknown badge referenced by {referrer}: {badge}")]
    UnknownBadgeReference { referrer: String, badge: String },

    #[error("Quest template {quest} has target 0")]
    ZeroQuestTarget { quest: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
