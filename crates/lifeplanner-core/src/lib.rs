//! # Lifeplanner Core Library
//!
//! This library provides the date-driven logic behind the Lifeplanner
//! calendar, task and habit screens. Everything here is a pure function of
//! its inputs: the caller reads plans, tasks and logs from its own store,
//! passes them in along with "today", and persists whatever comes back.
//!
//! ## Architecture
//!
//! - **Recurrence**: one rule type and one date-stepping primitive shared by
//!   every feature
//! - **Expansion**: eager, bounded materialization of repeating daily plans
//! - **Task chaining**: lazy, one-successor-per-completion advancement of
//!   repeating tasks
//! - **Habits**: weekday-masked streak computation walking back from today
//!
//! ## Key Components
//!
//! - [`ContinuityEngine`]: Facade over the three components
//! - [`RecurrenceExpander`]: Bulk successor generation
//! - [`TaskRecurrenceAdvancer`]: Single successor on completion
//! - [`HabitStreakCalculator`]: Current and longest streaks
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod engine;
pub mod error;
pub mod habit;
pub mod recurrence;
pub mod storage;
pub mod task;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{ContinuityEngine, EngineConfig};
pub use error::{ConfigError, CoreError, RecurrenceError, Result, ValidationError};
pub use habit::streak::{HabitStreakCalculator, StreakOutcome};
pub use habit::{completed_dates, Habit, HabitLog};
pub use recurrence::expander::{
    BaseOccurrence, Expansion, ExpansionPolicy, Occurrence, RecurrenceExpander,
};
pub use recurrence::{weekday_number, RecurrenceKind, RecurrenceRule, Warning};
pub use storage::{data_dir, Config};
pub use task::advancer::TaskRecurrenceAdvancer;
pub use task::RepeatingTask;
