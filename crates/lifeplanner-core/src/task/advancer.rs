//! Lazy, one-step successor generation for repeating tasks.
//!
//! Unlike daily plans, task instances are not materialized ahead of time.
//! A task may be completed early, late or never, so the next instance is
//! derived from the completed one at completion time.

use chrono::NaiveDate;

use super::RepeatingTask;
use crate::error::RecurrenceError;

/// Computes the single successor of a completed repeating task.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskRecurrenceAdvancer;

impl TaskRecurrenceAdvancer {
    pub fn new() -> Self {
        Self
    }

    /// Next due date for `task`, or `None` when the series has ended.
    ///
    /// The rule is applied once to the task's due date, or to `today` when
    /// the task has no due date.
    ///
    /// # Errors
    /// - [`RecurrenceError::InvalidRule`] for a malformed rule
    /// - [`RecurrenceError::MissingAnchorDate`] when neither a due date nor
    ///   `today` is available
    pub fn next_due_date(
        &self,
        task: &RepeatingTask,
        today: Option<NaiveDate>,
    ) -> Result<Option<NaiveDate>, RecurrenceError> {
        task.rule.validate()?;
        if !task.rule.is_repeating() {
            return Ok(None);
        }

        let anchor = task
            .due_date
            .or(today)
            .ok_or(RecurrenceError::MissingAnchorDate)?;

        let Some(next) = task.rule.step(anchor)? else {
            return Ok(None);
        };

        if !task.rule.admits(next) {
            tracing::debug!(
                kind = task.rule.kind.as_str(),
                next = %next,
                "repeating task reached its end date"
            );
            return Ok(None);
        }

        Ok(Some(next))
    }

    /// Build the successor instance of `task`.
    ///
    /// The successor is unsaved (`id = None`), open, carries the same
    /// title, description, flags and rule, and points at the series root.
    /// The caller must request at most one successor per completion.
    pub fn advance(
        &self,
        task: &RepeatingTask,
        today: Option<NaiveDate>,
    ) -> Result<Option<RepeatingTask>, RecurrenceError> {
        let Some(next_due) = self.next_due_date(task, today)? else {
            return Ok(None);
        };

        tracing::debug!(
            kind = task.rule.kind.as_str(),
            from = ?task.due_date,
            next = %next_due,
            "advanced repeating task"
        );

        Ok(Some(RepeatingTask {
            id: None,
            title: task.title.clone(),
            description: task.description.clone(),
            is_important: task.is_important,
            is_urgent: task.is_urgent,
            due_date: Some(next_due),
            rule: task.rule.clone(),
            completed_at: None,
            original_task_id: task.chain_root().map(str::to_string),
        }))
    }
}
