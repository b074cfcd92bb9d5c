use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use lifeplanner_core::{Config, RepeatingTask};
use std::path::PathBuf;

use super::{engine, read_input, resolve_today, CommandResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Complete a repeating task and print its successor (or null)
    Advance {
        /// JSON file with the task; reads stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
        /// Reference date for tasks without a due date (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Print the next due date only
    NextDue {
        /// JSON file with the task; reads stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
        /// Reference date for tasks without a due date (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

pub fn run(action: TaskAction, config: &Config) -> CommandResult {
    match action {
        TaskAction::Advance { input, today } => {
            let raw = read_input(input.as_deref())?;
            let mut task: RepeatingTask = serde_json::from_str(&raw)?;
            if !task.is_completed() {
                task.complete(Utc::now());
            }

            let successor = engine(config).advance_task(&task, Some(resolve_today(today)))?;
            let output = serde_json::json!({
                "completed": task,
                "successor": successor,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        TaskAction::NextDue { input, today } => {
            let raw = read_input(input.as_deref())?;
            let task: RepeatingTask = serde_json::from_str(&raw)?;
            let successor = engine(config).advance_task(&task, Some(resolve_today(today)))?;
            let next_due = successor.and_then(|t| t.due_date);
            println!("{}", serde_json::to_string(&next_due)?);
        }
    }
    Ok(())
}
