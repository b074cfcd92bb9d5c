pub mod config;
pub mod habit;
pub mod plan;
pub mod task;

use chrono::NaiveDate;
use lifeplanner_core::{Clock, Config, ContinuityEngine, SystemClock};
use std::io::Read;
use std::path::Path;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Read a JSON document from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// `--today` when given, otherwise the local date.
pub fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| SystemClock.today())
}

pub fn engine(config: &Config) -> ContinuityEngine {
    ContinuityEngine::new(config.engine_config())
}
