//! JSON output formatting for doing.

use serde::Serialize;
use serde_json::json;

use crate::error::DoingError;
use crate::pomodoro::{PomodoroSettings, BREAK_OPTIONS, FOCUS_OPTIONS};

/// Format the current task as JSON.
///
/// # Errors
///
/// Returns `DoingError::Serialization` if JSON serialization fails.
pub fn format_task_json(task: &str, display_task: &str) -> Result<String, DoingError> {
    let output = json!({
        "task": task,
        "displayTask": display_task,
        "isEmpty": task.is_empty(),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the allowed durations as JSON.
///
/// # Errors
///
/// Returns `DoingError::Serialization` if JSON serialization fails.
pub fn format_options_json(settings: &PomodoroSettings) -> Result<String, DoingError> {
    let output = json!({
        "focusOptions": FOCUS_OPTIONS,
        "breakOptions": BREAK_OPTIONS,
        "current": settings,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value to pretty JSON.
///
/// # Errors
///
/// Returns `DoingError::Serialization` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, DoingError> {
    Ok(serde_json::to_string_pretty(value)?)
}
