use clap::Subcommand;
use lifeplanner_core::{BaseOccurrence, Config};
use std::path::PathBuf;

use super::{engine, read_input, CommandResult};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Generate the successor occurrences of a saved repeating plan
    Expand {
        /// Id the store assigned to the base plan
        #[arg(long)]
        parent_id: String,
        /// JSON file with {date, rule, payload}; reads stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
        /// Print only the dates
        #[arg(long)]
        dates_only: bool,
    },
}

pub fn run(action: PlanAction, config: &Config) -> CommandResult {
    match action {
        PlanAction::Expand {
            parent_id,
            input,
            dates_only,
        } => {
            let raw = read_input(input.as_deref())?;
            let base: BaseOccurrence<serde_json::Value> = serde_json::from_str(&raw)?;
            let expansion = engine(config).expand_recurrence(&base, &parent_id)?;

            if let Some(warning) = &expansion.warning {
                eprintln!("warning: recurrence stopped early ({warning:?})");
            }
            if dates_only {
                println!("{}", serde_json::to_string_pretty(&expansion.dates())?);
            } else {
                println!("{}", serde_json::to_string_pretty(&expansion)?);
            }
        }
    }
    Ok(())
}
