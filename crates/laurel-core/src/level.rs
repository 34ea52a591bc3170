//! Level table and level derivation
//!
//! Levels are never stored authoritatively; they are derived from XP
//! through an ordered threshold table. The table is part of the catalog
//! bundle and immutable once constructed.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One row of the level table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelThreshold {
    /// Level reached at this threshold
    pub level: u32,
    /// Cumulative XP required to reach it
    pub xp_required: u64,
    /// Display text for the perk unlocked at this level
    #[serde(default)]
    pub reward: String,
}

impl LevelThreshold {
    /// Create a new threshold row
    pub fn new(level: u32, xp_required: u64, reward: impl Into<String>) -> Self {
        Self {
            level,
            xp_required,
            reward: reward.into(),
        }
    }
}

/// Ordered list of level thresholds
///
/// Rows are sorted by level with strictly increasing XP requirements, and
/// the first row is always `(level 1, 0 XP)`, so every non-negative XP
/// total maps to exactly one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelTable {
    thresholds: Vec<LevelThreshold>,
}

impl LevelTable {
    /// Build a table from threshold rows, validating their ordering
    pub fn new(thresholds: Vec<LevelThreshold>) -> Result<Self> {
        let first = thresholds.first().ok_or(Error::EmptyLevelTable)?;
        if first.level != 1 || first.xp_required != 0 {
            return Err(Error::MissingBaseLevel);
        }
        for pair in thresholds.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.level <= prev.level || next.xp_required <= prev.xp_required {
                return Err(Error::ThresholdOutOfOrder {
                    level: next.level,
                    xp_required: next.xp_required,
                });
            }
        }
        Ok(Self { thresholds })
    }

    /// Derive the level for a cumulative XP total
    ///
    /// Returns the highest level whose requirement is within `xp`. Total
    /// for all inputs: anything below the second threshold is level 1.
    pub fn level_for(&self, xp: u64) -> u32 {
        for row in self.thresholds.iter().rev() {
            if xp >= row.xp_required {
                return row.level;
            }
        }
        1
    }

    /// Reward text for an exact table level, if that level has a row
    pub fn reward_for(&self, level: u32) -> Option<&str> {
        self.thresholds
            .iter()
            .find(|row| row.level == level)
            .map(|row| row.reward.as_str())
    }

    /// The next threshold strictly above the given XP total, if any
    pub fn next_threshold(&self, xp: u64) -> Option<&LevelThreshold> {
        self.thresholds.iter().find(|row| row.xp_required > xp)
    }

    /// All rows in table order
    pub fn rows(&self) -> &[LevelThreshold] {
        &self.thresholds
    }

    /// The built-in progression shipped with the platform
    pub fn builtin() -> Self {
        let thresholds = vec![
            LevelThreshold::new(1, 0, "Welcome Badge"),
            LevelThreshold::new(2, 100, "Novice Badge"),
            LevelThreshold::new(3, 250, "Custom Emoji Unlock"),
            LevelThreshold::new(5, 500, "Exclusive Emojis"),
            LevelThreshold::new(10, 1500, "Early Access to Features"),
            LevelThreshold::new(15, 3000, "VIP Shoutout in Channel"),
            LevelThreshold::new(20, 5000, "Golden Frame for Profile"),
            LevelThreshold::new(25, 8000, "Custom Badge Creator"),
            LevelThreshold::new(30, 12000, "Legendary Status"),
        ];
        // The built-in rows are well ordered
        Self { thresholds }
    }
}
