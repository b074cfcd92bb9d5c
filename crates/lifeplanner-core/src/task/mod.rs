//! Repeating tasks.
//!
//! A repeating task is a chain of instances: completing one instance asks
//! the [`TaskRecurrenceAdvancer`](advancer::TaskRecurrenceAdvancer) for its
//! single successor. Every successor points back to the first task of the
//! series through `original_task_id`.

pub mod advancer;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::recurrence::RecurrenceRule;

/// A task capable of advancing to a successor on completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatingTask {
    /// Assigned by the persistence layer; `None` for a successor that has
    /// not been saved yet.
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_important: bool,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub rule: RecurrenceRule,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Root of the series this instance belongs to.
    #[serde(default)]
    pub original_task_id: Option<String>,
}

impl RepeatingTask {
    /// Create an open, unsaved task.
    pub fn new(title: impl Into<String>, rule: RecurrenceRule) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
            is_important: false,
            is_urgent: false,
            due_date: None,
            rule,
            completed_at: None,
            original_task_id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Close this instance.
    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.completed_at = Some(at);
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// The id a successor should carry as `original_task_id`.
    pub fn chain_root(&self) -> Option<&str> {
        self.original_task_id.as_deref().or(self.id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn chain_root_prefers_original_task_id() {
        let first = RepeatingTask::new("Water plants", RecurrenceRule::weekly()).with_id("task-1");
        assert_eq!(first.chain_root(), Some("task-1"));

        let mut second = first.clone().with_id("task-2");
        second.original_task_id = Some("task-1".to_string());
        assert_eq!(second.chain_root(), Some("task-1"));

        let unsaved = RepeatingTask::new("Draft", RecurrenceRule::none());
        assert_eq!(unsaved.chain_root(), None);
    }

    #[test]
    fn complete_marks_task_closed() {
        let mut task = RepeatingTask::new("Review notes", RecurrenceRule::daily());
        assert!(!task.is_completed());

        let at = Utc.with_ymd_and_hms(2024, 1, 5, 18, 0, 0).unwrap();
        task.complete(at);
        assert!(task.is_completed());
        assert_eq!(task.completed_at, Some(at));
    }

    #[test]
    fn task_deserializes_with_defaults() {
        let task: RepeatingTask = serde_json::from_str(r#"{"title":"Pay rent"}"#).unwrap();
        assert_eq!(task.title, "Pay rent");
        assert_eq!(task.rule, RecurrenceRule::none());
        assert!(task.due_date.is_none());
        assert!(!task.is_important);
    }
}
