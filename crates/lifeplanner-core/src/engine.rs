//! Facade over the three recurrence and continuity components.
//!
//! [`ContinuityEngine`] is what the surrounding application talks to. It
//! owns no state beyond its bounds, performs no I/O, and can be shared
//! freely between threads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::Result;
use crate::habit::streak::{HabitStreakCalculator, StreakOutcome};
use crate::habit::{Habit, HabitLog};
use crate::recurrence::expander::{BaseOccurrence, Expansion, ExpansionPolicy, RecurrenceExpander};
use crate::task::advancer::TaskRecurrenceAdvancer;
use crate::task::RepeatingTask;

/// Safety bounds for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub max_occurrences: u32,
    pub default_horizon_months: u32,
    pub lookback_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_occurrences: 365,
            default_horizon_months: 12,
            lookback_days: 365,
        }
    }
}

/// Entry points for plan expansion, task advancement and habit streaks.
#[derive(Debug, Clone, Default)]
pub struct ContinuityEngine {
    expander: RecurrenceExpander,
    advancer: TaskRecurrenceAdvancer,
    streaks: HabitStreakCalculator,
}

impl ContinuityEngine {
    pub fn new(config: EngineConfig) -> Self {
        let policy = ExpansionPolicy {
            max_occurrences: config.max_occurrences,
            default_horizon_months: config.default_horizon_months,
        };
        Self {
            expander: RecurrenceExpander::with_policy(policy),
            advancer: TaskRecurrenceAdvancer::new(),
            streaks: HabitStreakCalculator::with_lookback(config.lookback_days),
        }
    }

    /// Successor occurrences of a freshly saved repeating plan.
    pub fn expand_recurrence<P: Clone>(
        &self,
        base: &BaseOccurrence<P>,
        parent_id: &str,
    ) -> Result<Expansion<P>> {
        Ok(self.expander.expand(base, parent_id)?)
    }

    /// Zero or one successor for a completed repeating task.
    pub fn advance_task(
        &self,
        task: &RepeatingTask,
        today: Option<NaiveDate>,
    ) -> Result<Option<RepeatingTask>> {
        Ok(self.advancer.advance(task, today)?)
    }

    /// Current streak for a habit given its completed dates.
    pub fn habit_streak(
        &self,
        habit: &Habit,
        completed: &HashSet<NaiveDate>,
        today: NaiveDate,
    ) -> u32 {
        self.streaks.current_streak(habit, completed, today)
    }

    /// Current streak with the truncation warning, computed from raw logs.
    ///
    /// Logs for other habits are ignored when the habit has an id; without
    /// one every completed log is taken to belong to it.
    pub fn habit_streak_from_logs(
        &self,
        habit: &Habit,
        logs: &[HabitLog],
        today: NaiveDate,
    ) -> StreakOutcome {
        let completed = habit.completed_in(logs);
        self.streaks.current_streak_detailed(habit, &completed, today)
    }

    /// Longest streak inside the lookback window.
    pub fn longest_habit_streak(
        &self,
        habit: &Habit,
        completed: &HashSet<NaiveDate>,
        today: NaiveDate,
    ) -> u32 {
        self.streaks.longest_streak(habit, completed, today)
    }

    pub fn expander(&self) -> &RecurrenceExpander {
        &self.expander
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, RecurrenceError};
    use crate::recurrence::RecurrenceRule;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn config_bounds_flow_into_expander() {
        let engine = ContinuityEngine::new(EngineConfig {
            max_occurrences: 10,
            ..EngineConfig::default()
        });
        assert_eq!(engine.expander().policy().max_occurrences, 10);

        let base = BaseOccurrence {
            date: date(2024, 1, 1),
            rule: RecurrenceRule::daily(),
            payload: (),
        };
        let expansion = engine.expand_recurrence(&base, "plan-1").unwrap();
        assert_eq!(expansion.len(), 10);
        assert!(expansion.warning.is_some());
    }

    #[test]
    fn advance_task_wraps_errors() {
        let engine = ContinuityEngine::default();
        let task = RepeatingTask::new("Stretch", RecurrenceRule::daily());
        let err = engine.advance_task(&task, None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Recurrence(RecurrenceError::MissingAnchorDate)
        ));
    }

    #[test]
    fn streak_from_logs_filters_by_habit_id() {
        let engine = ContinuityEngine::default();
        let habit = Habit::every_day("Read").with_id("h1");
        let logs = vec![
            HabitLog::completed("h1", date(2024, 1, 9)),
            HabitLog::completed("h2", date(2024, 1, 8)),
            HabitLog::completed("h1", date(2024, 1, 8)),
            HabitLog::completed("h2", date(2024, 1, 7)),
        ];
        let outcome = engine.habit_streak_from_logs(&habit, &logs, date(2024, 1, 10));
        assert_eq!(outcome.streak, 2);
    }
}
