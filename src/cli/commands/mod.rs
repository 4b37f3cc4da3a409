//! Command implementations for doing.
//!
//! One-shot commands operate on the loaded stores and return the text to
//! print. The drawer is launched from `main` instead.

mod completions;

pub use completions::{completion_install_instructions, completions, generate_completions};

use tracing::info;

use crate::cli::args::{OutputFormat, SettingsCommands, SoundMode, TaskCommands};
use crate::error::DoingError;
use crate::output::{format_duration_options, format_settings, format_status, format_task};
use crate::pomodoro::{SessionTimer, TaskStore};

/// Execute status command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn status(
    timer: &SessionTimer,
    task: &TaskStore,
    format: OutputFormat,
) -> Result<String, DoingError> {
    format_status(&timer.snapshot(task), format)
}

/// Execute task subcommands
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn task(
    store: &mut TaskStore,
    cmd: Option<TaskCommands>,
    format: OutputFormat,
) -> Result<String, DoingError> {
    match cmd.unwrap_or(TaskCommands::Show) {
        TaskCommands::Show => {}
        TaskCommands::Set { text } => {
            store.set(text.join(" "));
            info!(task = store.task(), "Task set");
        }
        TaskCommands::Clear => {
            store.clear();
            info!("Task cleared");
        }
    }
    format_task(store, format)
}

/// Execute settings subcommands
///
/// Changes go through the timer so the idle countdown follows a new
/// focus duration the same way it does in the drawer.
///
/// # Errors
///
/// Returns `DoingError::InvalidDuration` for a duration outside the allowed
/// options, or an error if output formatting fails.
pub fn settings(
    timer: &mut SessionTimer,
    cmd: Option<SettingsCommands>,
    format: OutputFormat,
) -> Result<String, DoingError> {
    match cmd.unwrap_or(SettingsCommands::Show) {
        SettingsCommands::Show => {}
        SettingsCommands::Focus { minutes } => timer.update_focus_duration(minutes)?,
        SettingsCommands::Break { minutes } => timer.update_break_duration(minutes)?,
        SettingsCommands::Sound { mode } => match mode.unwrap_or(SoundMode::Toggle) {
            SoundMode::On => timer.set_sound(true),
            SoundMode::Off => timer.set_sound(false),
            SoundMode::Toggle => {
                timer.toggle_sound();
            }
        },
    }
    format_settings(timer.settings(), format)
}

/// Execute options command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn options(timer: &SessionTimer, format: OutputFormat) -> Result<String, DoingError> {
    format_duration_options(timer.settings(), format)
}
