//! Eager, bounded expansion of a repeating plan into future occurrences.
//!
//! When a daily plan is first saved with a repeating rule, every future
//! instance is materialized up front. Expansion starts at the first
//! successor of the base date (the base itself is persisted by the caller)
//! and stops at the first of:
//! - the rule's end date (exclusive),
//! - the default horizon when the rule has no end date (inclusive),
//! - the occurrence cap.
//!
//! # Usage
//! ```rust,ignore
//! use lifeplanner_core::recurrence::expander::{BaseOccurrence, RecurrenceExpander};
//!
//! let expander = RecurrenceExpander::new();
//! let expansion = expander.expand(&base, &saved_plan_id)?;
//! store.insert_all(expansion.occurrences);
//! ```

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{RecurrenceRule, Warning};
use crate::error::RecurrenceError;

/// Bounds applied to every expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionPolicy {
    /// Hard cap on emitted occurrences (default: 365)
    pub max_occurrences: u32,
    /// Horizon in calendar months used when the rule has no end date (default: 12)
    pub default_horizon_months: u32,
}

impl Default for ExpansionPolicy {
    fn default() -> Self {
        Self {
            max_occurrences: 365,
            default_horizon_months: 12,
        }
    }
}

impl ExpansionPolicy {
    pub fn with_max_occurrences(mut self, max: u32) -> Self {
        self.max_occurrences = max;
        self
    }

    pub fn with_default_horizon_months(mut self, months: u32) -> Self {
        self.default_horizon_months = months;
        self
    }
}

/// The originally saved plan: its date, its rule and the data copied into
/// every generated occurrence (title, time, color, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseOccurrence<P> {
    pub date: NaiveDate,
    #[serde(default)]
    pub rule: RecurrenceRule,
    pub payload: P,
}

/// One materialized future instance of a repeating plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence<P> {
    pub date: NaiveDate,
    /// Identity of the persisted base occurrence.
    pub parent_id: String,
    pub payload: P,
}

/// Result of an expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expansion<P> {
    /// Occurrences in strictly increasing date order
    pub occurrences: Vec<Occurrence<P>>,
    /// Set when the occurrence cap truncated the series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<Warning>,
}

impl<P> Expansion<P> {
    fn empty() -> Self {
        Self {
            occurrences: Vec::new(),
            warning: None,
        }
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.occurrences.iter().map(|o| o.date).collect()
    }
}

/// Expands a base occurrence into its bounded list of successors.
#[derive(Debug, Clone, Default)]
pub struct RecurrenceExpander {
    policy: ExpansionPolicy,
}

impl RecurrenceExpander {
    /// Create an expander with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an expander with a custom policy
    pub fn with_policy(policy: ExpansionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ExpansionPolicy {
        &self.policy
    }

    /// Generate every successor of `base` up to the applicable bound.
    ///
    /// `parent_id` is the identity the persistence layer assigned to the
    /// base record; it is stamped on each occurrence. A non-repeating rule
    /// yields an empty expansion.
    ///
    /// # Errors
    /// [`RecurrenceError::InvalidRule`] for a malformed rule, or
    /// [`RecurrenceError::DateOutOfRange`] if stepping overflows the calendar.
    pub fn expand<P: Clone>(
        &self,
        base: &BaseOccurrence<P>,
        parent_id: &str,
    ) -> Result<Expansion<P>, RecurrenceError> {
        let rule = &base.rule;
        rule.validate()?;

        if !rule.is_repeating() {
            return Ok(Expansion::empty());
        }

        let horizon = match rule.end_date {
            Some(_) => None,
            None => Some(
                base.date
                    .checked_add_months(Months::new(self.policy.default_horizon_months))
                    .ok_or(RecurrenceError::DateOutOfRange { date: base.date })?,
            ),
        };
        let within_bounds =
            |date: NaiveDate| rule.admits(date) && horizon.map_or(true, |limit| date <= limit);

        let mut expansion = Expansion::empty();
        let mut n: u32 = 1;

        while let Some(date) = rule.nth_after(base.date, n)? {
            if !within_bounds(date) {
                break;
            }
            if expansion.occurrences.len() >= self.policy.max_occurrences as usize {
                tracing::warn!(
                    kind = rule.kind.as_str(),
                    base = %base.date,
                    limit = self.policy.max_occurrences,
                    "recurrence stopped early at occurrence cap"
                );
                expansion.warning = Some(Warning::BoundExceeded {
                    limit: self.policy.max_occurrences,
                });
                break;
            }

            expansion.occurrences.push(Occurrence {
                date,
                parent_id: parent_id.to_string(),
                payload: base.payload.clone(),
            });
            n += 1;
        }

        tracing::debug!(
            kind = rule.kind.as_str(),
            base = %base.date,
            parent_id,
            generated = expansion.occurrences.len(),
            "expanded recurrence"
        );

        Ok(expansion)
    }
}
