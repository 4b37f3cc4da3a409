//! Output formatting for doing.
//!
//! One-shot commands render either colored text or JSON.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::DoingError;
use crate::pomodoro::{PomodoroSettings, TaskStore, TimerSnapshot};

pub use json::*;
pub use pretty::*;

/// Format a timer snapshot based on output format
///
/// # Errors
///
/// Returns `DoingError::Serialization` if JSON serialization fails.
pub fn format_status(snapshot: &TimerSnapshot, format: OutputFormat) -> Result<String, DoingError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(snapshot)),
        OutputFormat::Json => to_json(snapshot),
    }
}

/// Format timer settings based on output format
///
/// # Errors
///
/// Returns `DoingError::Serialization` if JSON serialization fails.
pub fn format_settings(
    settings: &PomodoroSettings,
    format: OutputFormat,
) -> Result<String, DoingError> {
    match format {
        OutputFormat::Pretty => Ok(format_settings_pretty(settings)),
        OutputFormat::Json => to_json(settings),
    }
}

/// Format the current task based on output format
///
/// # Errors
///
/// Returns `DoingError::Serialization` if JSON serialization fails.
pub fn format_task(task: &TaskStore, format: OutputFormat) -> Result<String, DoingError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task.task(), task.display_task())),
        OutputFormat::Json => format_task_json(task.task(), task.display_task()),
    }
}

/// Format the allowed durations based on output format
///
/// # Errors
///
/// Returns `DoingError::Serialization` if JSON serialization fails.
pub fn format_duration_options(
    settings: &PomodoroSettings,
    format: OutputFormat,
) -> Result<String, DoingError> {
    match format {
        OutputFormat::Pretty => Ok(format_options_pretty(settings)),
        OutputFormat::Json => format_options_json(settings),
    }
}
