//! Recurrence rules and the date-stepping primitive.
//!
//! A [`RecurrenceRule`] describes how a plan or task repeats. Both the
//! eager [`RecurrenceExpander`](expander::RecurrenceExpander) and the lazy
//! [`TaskRecurrenceAdvancer`](crate::task::advancer::TaskRecurrenceAdvancer)
//! step dates through the same [`RecurrenceRule::step`] /
//! [`RecurrenceRule::nth_after`] functions, so daily plans and tasks agree
//! on what "one month later" means.
//!
//! Month and year steps use calendar arithmetic: adding one month to
//! January 31st yields the last day of February.

pub mod expander;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::RecurrenceError;

/// How an event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceKind {
    /// Does not repeat
    None,
    /// Every day
    Daily,
    /// Every 7 days
    Weekly,
    /// Same day of the next calendar month (clamped to month end)
    Monthly,
    /// Same date of the next calendar year (Feb 29 clamps to Feb 28)
    Yearly,
    /// Every `custom_interval_days` days
    CustomDays,
}

impl Default for RecurrenceKind {
    fn default() -> Self {
        RecurrenceKind::None
    }
}

impl RecurrenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceKind::None => "none",
            RecurrenceKind::Daily => "daily",
            RecurrenceKind::Weekly => "weekly",
            RecurrenceKind::Monthly => "monthly",
            RecurrenceKind::Yearly => "yearly",
            RecurrenceKind::CustomDays => "custom_days",
        }
    }
}

/// A single unit of advancement derived from a validated rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Days(u64),
    Months(u32),
}

/// Structured description of how and until when an event repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub kind: RecurrenceKind,
    /// Only meaningful for [`RecurrenceKind::CustomDays`]; must be >= 1 when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_interval_days: Option<u32>,
    /// Exclusive upper bound: nothing is generated on or after this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl RecurrenceRule {
    fn of_kind(kind: RecurrenceKind) -> Self {
        Self {
            kind,
            custom_interval_days: None,
            end_date: None,
        }
    }

    pub fn none() -> Self {
        Self::of_kind(RecurrenceKind::None)
    }

    pub fn daily() -> Self {
        Self::of_kind(RecurrenceKind::Daily)
    }

    pub fn weekly() -> Self {
        Self::of_kind(RecurrenceKind::Weekly)
    }

    pub fn monthly() -> Self {
        Self::of_kind(RecurrenceKind::Monthly)
    }

    pub fn yearly() -> Self {
        Self::of_kind(RecurrenceKind::Yearly)
    }

    pub fn custom_days(interval_days: u32) -> Self {
        Self {
            custom_interval_days: Some(interval_days),
            ..Self::of_kind(RecurrenceKind::CustomDays)
        }
    }

    /// Set the exclusive end date.
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Whether the rule produces anything beyond the base occurrence.
    pub fn is_repeating(&self) -> bool {
        self.kind != RecurrenceKind::None
    }

    /// Check the rule's internal consistency.
    ///
    /// # Errors
    /// Returns [`RecurrenceError::InvalidRule`] when the custom interval is
    /// zero, or missing on a `custom_days` rule.
    pub fn validate(&self) -> Result<(), RecurrenceError> {
        self.step_unit().map(|_| ())
    }

    fn step_unit(&self) -> Result<Option<Step>, RecurrenceError> {
        if self.custom_interval_days == Some(0) {
            return Err(RecurrenceError::invalid_rule(
                "custom_interval_days must be at least 1",
            ));
        }

        let step = match self.kind {
            RecurrenceKind::None => return Ok(None),
            RecurrenceKind::Daily => Step::Days(1),
            RecurrenceKind::Weekly => Step::Days(7),
            RecurrenceKind::Monthly => Step::Months(1),
            RecurrenceKind::Yearly => Step::Months(12),
            RecurrenceKind::CustomDays => {
                let days = self.custom_interval_days.ok_or_else(|| {
                    RecurrenceError::invalid_rule("custom_days rule requires custom_interval_days")
                })?;
                Step::Days(u64::from(days))
            }
        };
        Ok(Some(step))
    }

    /// Advance `from` by exactly one step of this rule.
    ///
    /// Returns `Ok(None)` for a non-repeating rule. The end date is not
    /// consulted; use [`RecurrenceRule::admits`] for that.
    pub fn step(&self, from: NaiveDate) -> Result<Option<NaiveDate>, RecurrenceError> {
        self.nth_after(from, 1)
    }

    /// The date `n` steps after `anchor`, computed directly from the anchor.
    ///
    /// Month and year steps are multiplied rather than chained, so a series
    /// anchored on the 31st returns to the 31st after passing through a
    /// shorter month.
    pub fn nth_after(&self, anchor: NaiveDate, n: u32) -> Result<Option<NaiveDate>, RecurrenceError> {
        let Some(unit) = self.step_unit()? else {
            return Ok(None);
        };
        let out_of_range = || RecurrenceError::DateOutOfRange { date: anchor };

        let next = match unit {
            Step::Days(days) => {
                let total = days.checked_mul(u64::from(n)).ok_or_else(out_of_range)?;
                anchor.checked_add_days(Days::new(total))
            }
            Step::Months(months) => {
                let total = months.checked_mul(n).ok_or_else(out_of_range)?;
                anchor.checked_add_months(Months::new(total))
            }
        };
        next.map(Some).ok_or_else(out_of_range)
    }

    /// Whether `date` falls before the rule's end date (always true without one).
    pub fn admits(&self, date: NaiveDate) -> bool {
        self.end_date.map_or(true, |end| date < end)
    }
}

/// Non-fatal condition reported alongside a successful, truncated result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A safety cap stopped generation before the natural end of the series.
    BoundExceeded { limit: u32 },
}

/// Weekday number with 1 = Monday ... 7 = Sunday.
pub fn weekday_number(date: NaiveDate) -> u8 {
    // number_from_monday is 1..=7, always fits
    date.weekday().number_from_monday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn step_advances_by_kind() {
        let from = date(2024, 1, 1);
        assert_eq!(RecurrenceRule::daily().step(from).unwrap(), Some(date(2024, 1, 2)));
        assert_eq!(RecurrenceRule::weekly().step(from).unwrap(), Some(date(2024, 1, 8)));
        assert_eq!(RecurrenceRule::monthly().step(from).unwrap(), Some(date(2024, 2, 1)));
        assert_eq!(RecurrenceRule::yearly().step(from).unwrap(), Some(date(2025, 1, 1)));
        assert_eq!(
            RecurrenceRule::custom_days(10).step(from).unwrap(),
            Some(date(2024, 1, 11))
        );
    }

    #[test]
    fn none_rule_never_steps() {
        assert_eq!(RecurrenceRule::none().step(date(2024, 1, 1)).unwrap(), None);
    }

    #[test]
    fn monthly_step_clamps_to_month_end() {
        let rule = RecurrenceRule::monthly();
        assert_eq!(rule.step(date(2024, 1, 31)).unwrap(), Some(date(2024, 2, 29)));
        assert_eq!(rule.step(date(2023, 1, 31)).unwrap(), Some(date(2023, 2, 28)));
        assert_eq!(rule.step(date(2024, 3, 31)).unwrap(), Some(date(2024, 4, 30)));
    }

    #[test]
    fn yearly_step_clamps_leap_day() {
        let rule = RecurrenceRule::yearly();
        assert_eq!(rule.step(date(2024, 2, 29)).unwrap(), Some(date(2025, 2, 28)));
        assert_eq!(rule.nth_after(date(2024, 2, 29), 4).unwrap(), Some(date(2028, 2, 29)));
    }

    #[test]
    fn nth_after_does_not_drift_after_short_month() {
        let rule = RecurrenceRule::monthly();
        let anchor = date(2024, 1, 31);
        assert_eq!(rule.nth_after(anchor, 1).unwrap(), Some(date(2024, 2, 29)));
        assert_eq!(rule.nth_after(anchor, 2).unwrap(), Some(date(2024, 3, 31)));
        assert_eq!(rule.nth_after(anchor, 3).unwrap(), Some(date(2024, 4, 30)));
    }

    #[test]
    fn custom_days_without_interval_is_invalid() {
        let rule = RecurrenceRule {
            kind: RecurrenceKind::CustomDays,
            custom_interval_days: None,
            end_date: None,
        };
        assert!(matches!(
            rule.validate(),
            Err(RecurrenceError::InvalidRule { .. })
        ));
        assert!(rule.step(date(2024, 1, 1)).is_err());
    }

    #[test]
    fn zero_interval_is_invalid_on_any_kind() {
        assert!(RecurrenceRule::custom_days(0).validate().is_err());

        let weekly_with_zero = RecurrenceRule {
            custom_interval_days: Some(0),
            ..RecurrenceRule::weekly()
        };
        assert!(weekly_with_zero.validate().is_err());
    }

    #[test]
    fn step_reports_overflow() {
        let err = RecurrenceRule::daily().step(NaiveDate::MAX).unwrap_err();
        assert_eq!(err, RecurrenceError::DateOutOfRange { date: NaiveDate::MAX });
    }

    #[test]
    fn admits_is_exclusive_of_end_date() {
        let rule = RecurrenceRule::daily().with_end_date(date(2024, 1, 10));
        assert!(rule.admits(date(2024, 1, 9)));
        assert!(!rule.admits(date(2024, 1, 10)));
        assert!(RecurrenceRule::daily().admits(date(9999, 12, 31)));
    }

    #[test]
    fn weekday_number_starts_on_monday() {
        assert_eq!(weekday_number(date(2024, 1, 1)), 1);
        assert_eq!(weekday_number(date(2024, 1, 3)), 3);
        assert_eq!(weekday_number(date(2024, 1, 7)), 7);
    }

    #[test]
    fn rule_serializes_with_snake_case_kind() {
        let rule = RecurrenceRule::custom_days(3).with_end_date(date(2024, 6, 1));
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["kind"], "custom_days");
        assert_eq!(json["custom_interval_days"], 3);
        assert_eq!(json["end_date"], "2024-06-01");

        let parsed: RecurrenceRule = serde_json::from_str(r#"{"kind":"weekly"}"#).unwrap();
        assert_eq!(parsed, RecurrenceRule::weekly());
    }
}
