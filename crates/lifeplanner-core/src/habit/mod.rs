//! Habits tracked on specific weekdays.
//!
//! Weekdays use the same numbering as the rest of the crate:
//! 1 = Monday ... 7 = Sunday. Only completed logs carry meaning; a missing
//! log for a date is the same as "not completed".

pub mod streak;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::error::ValidationError;
use crate::recurrence::weekday_number;

pub const MONDAY: u8 = 1;
pub const SUNDAY: u8 = 7;

/// A recurring commitment tracked on a set of target weekdays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    /// Empty means no day can ever extend or break a streak.
    #[serde(default)]
    pub target_days: BTreeSet<u8>,
}

impl Habit {
    /// Create a habit, checking every target day is within 1..=7.
    pub fn new(
        name: impl Into<String>,
        target_days: impl IntoIterator<Item = u8>,
    ) -> Result<Self, ValidationError> {
        let target_days: BTreeSet<u8> = target_days.into_iter().collect();
        if let Some(&day) = target_days
            .iter()
            .find(|day| !(MONDAY..=SUNDAY).contains(*day))
        {
            return Err(ValidationError::InvalidTargetDay { day });
        }

        Ok(Self {
            id: None,
            name: name.into(),
            target_days,
        })
    }

    /// A habit targeted on all seven days.
    pub fn every_day(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            target_days: (MONDAY..=SUNDAY).collect(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn is_target_day(&self, date: NaiveDate) -> bool {
        self.target_days.contains(&weekday_number(date))
    }

    /// Completed dates among `logs` that belong to this habit.
    ///
    /// Without an id every completed log is taken to belong to the habit.
    pub fn completed_in(&self, logs: &[HabitLog]) -> HashSet<NaiveDate> {
        match &self.id {
            Some(id) => completed_dates(logs, id),
            None => logs
                .iter()
                .filter(|log| log.completed)
                .map(|log| log.date)
                .collect(),
        }
    }
}

/// One completion record. At most one per `(habit_id, date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitLog {
    pub habit_id: String,
    pub date: NaiveDate,
    #[serde(default = "default_completed")]
    pub completed: bool,
}

fn default_completed() -> bool {
    true
}

impl HabitLog {
    pub fn completed(habit_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            habit_id: habit_id.into(),
            date,
            completed: true,
        }
    }
}

/// Dates on which `habit_id` was completed.
pub fn completed_dates<'a, I>(logs: I, habit_id: &str) -> HashSet<NaiveDate>
where
    I: IntoIterator<Item = &'a HabitLog>,
{
    logs.into_iter()
        .filter(|log| log.completed && log.habit_id == habit_id)
        .map(|log| log.date)
        .collect()
}
