//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::DoingError;
use crate::tui::app::App;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start, pause or resume the timer.
    TogglePlayPause,
    /// Return to an idle focus session.
    Reset,
    /// Jump to the other session.
    Skip,
    /// Move to the next focus duration.
    CycleFocus,
    /// Move to the next break duration.
    CycleBreak,
    /// Flip the sound flag.
    ToggleSound,
    /// Start editing the task.
    EditTask,
    /// Clear the task.
    ClearTask,
    /// Expand or collapse the drawer.
    ToggleDrawer,
    /// Show key help.
    Help,
}

/// Handle terminal events, waiting at most `timeout` for one.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App, timeout: Duration) -> Result<Option<Action>, DoingError> {
    if !event::poll(timeout).map_err(|e| DoingError::Terminal(format!("Event poll failed: {e}")))? {
        return Ok(None);
    }

    match event::read().map_err(|e| DoingError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(handle_key(app, key)),
        _ => Ok(None),
    }
}

/// Map a key press to an action, editing the task in place while in edit mode.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if app.is_editing() {
        match key.code {
            KeyCode::Enter => app.commit_edit(),
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Backspace => app.edit_pop(),
            KeyCode::Char(c) => app.edit_push(c),
            _ => {}
        }
        return None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::TogglePlayPause),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('s') => Some(Action::Skip),
        KeyCode::Char('f') => Some(Action::CycleFocus),
        KeyCode::Char('b') => Some(Action::CycleBreak),
        KeyCode::Char('m') => Some(Action::ToggleSound),
        KeyCode::Char('e') => Some(Action::EditTask),
        KeyCode::Char('x') => Some(Action::ClearTask),
        KeyCode::Tab => Some(Action::ToggleDrawer),
        KeyCode::Char('?') => Some(Action::Help),
        _ => None,
    }
}
