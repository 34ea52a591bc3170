//! Login streak rules
//!
//! The pure half of streak tracking: classifying a login date against the
//! previous one, and resolving milestone bonuses and badges. Applying the
//! result to a user record is the engine's job.

use crate::BadgeId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a login date relates to the previous recorded login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakStep {
    /// Already logged in today; nothing to count
    SameDay,
    /// Logged in yesterday; the streak continues
    Continued,
    /// Gap of two or more days, or first-ever login; the streak restarts
    Restarted,
}

/// Classify a login against the last recorded login date
pub fn classify_login(last: Option<NaiveDate>, today: NaiveDate) -> StreakStep {
    if last == Some(today) {
        StreakStep::SameDay
    } else if last.is_some() && last == today.pred_opt() {
        StreakStep::Continued
    } else {
        StreakStep::Restarted
    }
}

/// Milestone bonuses and badges for login streaks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakRules {
    /// Bonus credited at exactly 7 days
    pub week_bonus: u64,
    /// Bonus credited at exactly 30 days
    pub month_bonus: u64,
    /// Bonus credited at every other multiple of 7 days
    pub recurring_bonus: u64,
    /// Badge awarded at week milestones
    pub week_badge: BadgeId,
    /// Badge awarded at the 30-day milestone
    pub month_badge: BadgeId,
}

impl Default for StreakRules {
    fn default() -> Self {
        Self {
            week_bonus: 5,
            month_bonus: 50,
            recurring_bonus: 3,
            week_badge: BadgeId::new("streak7"),
            month_badge: BadgeId::new("streak30"),
        }
    }
}

impl StreakRules {
    /// Bonus for reaching the given streak length, if it is a milestone
    ///
    /// Checks run in fixed order: the 7-day milestone, the 30-day
    /// milestone, then the generic every-7-days clause.
    pub fn bonus_for(&self, streak: u32) -> Option<u64> {
        if streak == 7 {
            Some(self.week_bonus)
        } else if streak == 30 {
            Some(self.month_bonus)
        } else if streak > 0 && streak % 7 == 0 {
            Some(self.recurring_bonus)
        } else {
            None
        }
    }

    /// Badge for reaching the given streak length, if it is a milestone
    ///
    /// Week milestones past the first re-yield the week badge; awarding it
    /// again is absorbed by the badge awarder's idempotence.
    pub fn badge_for(&self, streak: u32) -> Option<&BadgeId> {
        if streak == 30 {
            Some(&self.month_badge)
        } else if streak > 0 && streak % 7 == 0 {
            Some(&self.week_badge)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_classify_same_day() {
        let today = day("2024-03-10");
        assert_eq!(classify_login(Some(today), today), StreakStep::SameDay);
    }

    #[test]
    fn test_classify_consecutive_day() {
        assert_eq!(
            classify_login(Some(day("2024-03-09")), day("2024-03-10")),
            StreakStep::Continued
        );
        // Month boundary
        assert_eq!(
            classify_login(Some(day("2024-02-29")), day("2024-03-01")),
            StreakStep::Continued
        );
    }

    #[test]
    fn test_classify_gap_and_first_login() {
        assert_eq!(
            classify_login(Some(day("2024-03-07")), day("2024-03-10")),
            StreakStep::Restarted
        );
        assert_eq!(classify_login(None, day("2024-03-10")), StreakStep::Restarted);
        // Clock skew backwards counts as a restart, not a panic
        assert_eq!(
            classify_login(Some(day("2024-03-11")), day("2024-03-10")),
            StreakStep::Restarted
        );
    }

    #[test]
    fn test_bonus_milestones() {
        let rules = StreakRules::default();
        assert_eq!(rules.bonus_for(7), Some(5));
        assert_eq!(rules.bonus_for(30), Some(50));
        assert_eq!(rules.bonus_for(14), Some(3));
        assert_eq!(rules.bonus_for(21), Some(3));
        assert_eq!(rules.bonus_for(35), Some(3));
        assert_eq!(rules.bonus_for(1), None);
        assert_eq!(rules.bonus_for(13), None);
        assert_eq!(rules.bonus_for(0), None);
    }

    #[test]
    fn test_badge_milestones() {
        let rules = StreakRules::default();
        assert_eq!(rules.badge_for(7), Some(&BadgeId::new("streak7")));
        assert_eq!(rules.badge_for(30), Some(&BadgeId::new("streak30")));
        assert_eq!(rules.badge_for(14), Some(&BadgeId::new("streak7")));
        assert_eq!(rules.badge_for(6), None);
        assert_eq!(rules.badge_for(0), None);
    }
}
