//! Core error types for lifeplanner-core.
//!
//! Every failure the engine can report is a caller contract violation
//! detected synchronously; none of them are retryable. Truncation by a
//! safety bound is not an error and is reported through
//! [`Warning`](crate::recurrence::Warning) instead.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for lifeplanner-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Recurrence rule or anchor errors
    #[error("Recurrence error: {0}")]
    Recurrence(#[from] RecurrenceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while applying a recurrence rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    /// The rule itself is malformed (e.g. missing custom interval).
    #[error("Invalid recurrence rule: {reason}")]
    InvalidRule { reason: String },

    /// A repeating task has neither a due date nor a supplied "today".
    #[error("Cannot advance a repeating task without a due date or a reference date")]
    MissingAnchorDate,

    /// Calendar arithmetic left the representable date range.
    #[error("Date arithmetic overflowed stepping from {date}")]
    DateOutOfRange { date: NaiveDate },
}

impl RecurrenceError {
    pub(crate) fn invalid_rule<M: Into<String>>(reason: M) -> Self {
        Self::InvalidRule {
            reason: reason.into(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Habit target day outside the 1 (Monday) ..= 7 (Sunday) range
    #[error("Invalid target day {day}: expected 1 (Monday) through 7 (Sunday)")]
    InvalidTargetDay { day: u8 },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
