//! Source of "today".
//!
//! Engine components take `today` as a plain argument. Callers obtain it
//! from a [`Clock`] so tests and replays can pin the date.

use chrono::{Local, NaiveDate};

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_stable() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let clock: Box<dyn Clock> = Box::new(FixedClock(day));
        assert_eq!(clock.today(), day);
        assert_eq!(clock.today(), day);
    }
}
