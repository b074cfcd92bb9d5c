use chrono::NaiveDate;
use clap::Subcommand;
use lifeplanner_core::{Config, Habit, HabitLog, Warning};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{engine, read_input, resolve_today, CommandResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Current and longest streak of a habit
    Streak {
        /// JSON file with {habit, logs}; reads stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
        /// Date to compute the streak as of (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

#[derive(Deserialize)]
struct StreakInput {
    habit: Habit,
    #[serde(default)]
    logs: Vec<HabitLog>,
}

#[derive(Serialize)]
struct StreakReport {
    habit: String,
    today: NaiveDate,
    current: u32,
    longest: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<Warning>,
}

pub fn run(action: HabitAction, config: &Config) -> CommandResult {
    match action {
        HabitAction::Streak { input, today } => {
            let raw = read_input(input.as_deref())?;
            let StreakInput { habit, logs } = serde_json::from_str(&raw)?;
            let today = resolve_today(today);
            let engine = engine(config);

            let outcome = engine.habit_streak_from_logs(&habit, &logs, today);
            let completed = habit.completed_in(&logs);
            let longest = engine.longest_habit_streak(&habit, &completed, today);

            let report = StreakReport {
                habit: habit.name,
                today,
                current: outcome.streak,
                longest,
                warning: outcome.warning,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
