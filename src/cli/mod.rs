pub mod commands;
pub mod init;
pub mod micro;
pub mod task;

use std::path::PathBuf;

use crate::config::Config;
use crate::db::SqliteStore;
use crate::error::StepifyError;
use crate::models::{TaskPriority, TaskStatus};
use crate::output;

pub use commands::*;

/// Flags and settings every subcommand runs with.
pub struct Context {
    pub json: bool,
    pub db: Option<PathBuf>,
    pub config: Config,
}

impl Context {
    pub fn open_store(&self) -> Result<SqliteStore, StepifyError> {
        SqliteStore::open(self.db.as_deref(), &self.config.store())
    }

    /// Print a successful result as the JSON envelope, or run the text printer.
    pub fn emit(&self, data: impl FnOnce() -> serde_json::Value, text: impl FnOnce()) {
        if self.json {
            print_json(&output::json::success(data()));
        } else {
            text();
        }
    }

    /// Map a command result to an exit code, reporting errors on the way.
    pub fn finish(&self, result: Result<i32, StepifyError>) -> i32 {
        match result {
            Ok(code) => code,
            Err(e) => {
                self.report(&e);
                1
            }
        }
    }

    pub fn report(&self, e: &StepifyError) {
        if self.json {
            print_json(&output::json::error(e));
        } else {
            eprintln!("Error: {e}");
        }
    }
}

pub fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

pub fn parse_status(value: Option<&str>) -> Result<Option<TaskStatus>, StepifyError> {
    value
        .map(|s| {
            TaskStatus::from_str(s).ok_or_else(|| {
                StepifyError::validation(format!(
                    "Invalid status '{s}'. Expected one of: pending, in_progress, completed, cancelled"
                ))
            })
        })
        .transpose()
}

pub fn parse_priority(value: Option<&str>) -> Result<Option<TaskPriority>, StepifyError> {
    value
        .map(|s| {
            TaskPriority::from_str(s).ok_or_else(|| {
                StepifyError::validation(format!(
                    "Invalid priority '{s}'. Expected one of: low, medium, high, urgent"
                ))
            })
        })
        .transpose()
}
