mod config;

pub use config::{Config, HabitsConfig, LoggingConfig, RecurrenceConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/lifeplanner[-dev]/` based on LIFEPLANNER_ENV.
///
/// Set LIFEPLANNER_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LIFEPLANNER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("lifeplanner-dev")
    } else {
        base_dir.join("lifeplanner")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
