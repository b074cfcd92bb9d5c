//! Habit streak computation.
//!
//! The current streak is found by walking backward from today:
//! - non-target weekdays are skipped, they neither extend nor break a streak
//! - a completed target day extends the streak
//! - today's target day without a log is exempt, the user still has the
//!   rest of the day
//! - any earlier target day without a log ends the walk
//!
//! The walk is bounded by a lookback window so it terminates even for a
//! habit with no target days.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Habit;
use crate::recurrence::Warning;

/// Streak value plus an optional truncation warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakOutcome {
    pub streak: u32,
    /// Set when the lookback window ran out before the streak was broken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<Warning>,
}

/// Computes streaks against a per-habit weekday mask.
#[derive(Debug, Clone, Copy)]
pub struct HabitStreakCalculator {
    lookback_days: u32,
}

impl Default for HabitStreakCalculator {
    fn default() -> Self {
        Self { lookback_days: 365 }
    }
}

impl HabitStreakCalculator {
    /// Create a calculator with a 365-day lookback
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator with a custom lookback window
    pub fn with_lookback(lookback_days: u32) -> Self {
        Self { lookback_days }
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    /// Current consecutive streak as of `today`.
    pub fn current_streak(
        &self,
        habit: &Habit,
        completed: &HashSet<NaiveDate>,
        today: NaiveDate,
    ) -> u32 {
        self.current_streak_detailed(habit, completed, today).streak
    }

    /// Current streak, reporting whether the lookback bound cut it short.
    pub fn current_streak_detailed(
        &self,
        habit: &Habit,
        completed: &HashSet<NaiveDate>,
        today: NaiveDate,
    ) -> StreakOutcome {
        let mut streak = 0;
        let mut cursor = today;

        for _ in 0..self.lookback_days {
            if habit.is_target_day(cursor) {
                if completed.contains(&cursor) {
                    streak += 1;
                } else if cursor != today {
                    return StreakOutcome {
                        streak,
                        warning: None,
                    };
                }
            }

            match cursor.pred_opt() {
                Some(previous) => cursor = previous,
                None => break,
            }
        }

        // Walked the whole window without a break.
        let warning = if streak > 0 {
            tracing::warn!(
                habit = %habit.name,
                streak,
                limit = self.lookback_days,
                "habit streak reached lookback limit"
            );
            Some(Warning::BoundExceeded {
                limit: self.lookback_days,
            })
        } else {
            None
        };

        StreakOutcome { streak, warning }
    }

    /// Longest run of consecutive completed target days inside the lookback
    /// window ending at `today`, under the same skip and exemption rules.
    pub fn longest_streak(
        &self,
        habit: &Habit,
        completed: &HashSet<NaiveDate>,
        today: NaiveDate,
    ) -> u32 {
        if self.lookback_days == 0 {
            return 0;
        }
        let start = today
            .checked_sub_days(Days::new(u64::from(self.lookback_days - 1)))
            .unwrap_or(NaiveDate::MIN);

        let mut best = 0;
        let mut run = 0;
        for date in start.iter_days().take_while(|date| *date <= today) {
            if !habit.is_target_day(date) {
                continue;
            }
            if completed.contains(&date) {
                run += 1;
                best = best.max(run);
            } else if date != today {
                run = 0;
            }
        }
        best
    }
}
