//! Application state for the drawer.

use std::time::{Duration, Instant};

use crate::pomodoro::{SessionTimer, TaskStore};
use crate::tui::event::Action;

/// Longest the event loop waits for input when no tick is due sooner.
const MAX_POLL: Duration = Duration::from_millis(250);

/// Key help shown on `?`.
pub const HELP: &str =
    "space:play/pause | r:reset | s:skip | f/b:durations | m:sound | e:edit | x:clear | tab:drawer | q:quit";

/// Input mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Keys control the timer.
    Normal,
    /// Keys edit the task; holds the text being typed.
    EditingTask(String),
}

/// Application state.
pub struct App {
    /// The session timer.
    pub timer: SessionTimer,
    /// The current task.
    pub task: TaskStore,
    /// Whether the drawer shows controls and settings.
    pub expanded: bool,
    /// Current input mode.
    pub mode: Mode,
    /// Status message to display.
    pub status: Option<String>,
}

impl App {
    /// Create a new app instance around loaded stores.
    #[must_use]
    pub fn new(timer: SessionTimer, task: TaskStore) -> Self {
        Self {
            timer,
            task,
            expanded: true,
            mode: Mode::Normal,
            status: Some("Press ? for help".to_string()),
        }
    }

    /// Apply a timer or drawer action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::TogglePlayPause => {
                self.timer.toggle_play_pause();
                self.status = None;
            }
            Action::Reset => {
                self.timer.reset();
                self.status = Some("Reset".to_string());
            }
            Action::Skip => {
                self.timer.skip();
                self.status = Some(format!("Skipped to {}", self.timer.current_session()));
            }
            Action::CycleFocus => {
                self.status = Some(match self.timer.cycle_focus_duration() {
                    Ok(minutes) => format!("Focus: {minutes}m"),
                    Err(e) => e.to_string(),
                });
            }
            Action::CycleBreak => {
                self.status = Some(match self.timer.cycle_break_duration() {
                    Ok(minutes) => format!("Break: {minutes}m"),
                    Err(e) => e.to_string(),
                });
            }
            Action::ToggleSound => {
                let on = self.timer.toggle_sound();
                self.status = Some(format!("Sound {}", if on { "on" } else { "off" }));
            }
            Action::EditTask => self.begin_edit(),
            Action::ClearTask => {
                self.task.clear();
                self.status = Some("Task cleared".to_string());
            }
            Action::ToggleDrawer => self.expanded = !self.expanded,
            Action::Help => self.status = Some(HELP.to_string()),
            Action::Quit => {}
        }
    }

    /// Run due ticks and report a completed session in the status bar.
    pub fn tick(&mut self, now: Instant) {
        let before = self.timer.current_session();
        if self.timer.poll(now) > 0 {
            let after = self.timer.current_session();
            if after != before {
                self.status = Some(format!("{before} complete, {after} started"));
            }
        }
    }

    /// How long to wait for input before the next tick is due.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.timer
            .time_until_next_tick(now)
            .map_or(MAX_POLL, |d| d.min(MAX_POLL))
    }

    /// Start editing the task, seeded with the current text.
    pub fn begin_edit(&mut self) {
        self.expanded = true;
        self.mode = Mode::EditingTask(self.task.task().to_string());
        self.status = Some("Enter:save | Esc:cancel".to_string());
    }

    /// Append a character to the task being edited.
    pub fn edit_push(&mut self, c: char) {
        if let Mode::EditingTask(buffer) = &mut self.mode {
            buffer.push(c);
        }
    }

    /// Remove the last character of the task being edited.
    pub fn edit_pop(&mut self) {
        if let Mode::EditingTask(buffer) = &mut self.mode {
            buffer.pop();
        }
    }

    /// Save the edited task.
    pub fn commit_edit(&mut self) {
        if let Mode::EditingTask(buffer) = std::mem::replace(&mut self.mode, Mode::Normal) {
            self.task.set(buffer);
            self.status = Some("Task saved".to_string());
        }
    }

    /// Leave edit mode without saving.
    pub fn cancel_edit(&mut self) {
        self.mode = Mode::Normal;
        self.status = None;
    }

    /// Whether the task is being edited.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::EditingTask(_))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::pomodoro::{LogNotifier, SettingsStore, SilentSound, TimerState};
    use crate::storage::MemoryStore;

    fn app() -> App {
        let backend = Rc::new(MemoryStore::new());
        let timer = SessionTimer::new(
            SettingsStore::new(backend.clone()),
            Box::new(LogNotifier),
            Box::new(SilentSound),
        );
        App::new(timer, TaskStore::new(backend))
    }

    #[test]
    fn test_actions_drive_timer() {
        let mut app = app();

        app.apply(Action::TogglePlayPause);
        assert_eq!(app.timer.state(), TimerState::Focus);

        app.apply(Action::Skip);
        assert_eq!(app.timer.state(), TimerState::Break);
        assert_eq!(app.status.as_deref(), Some("Skipped to Break"));

        app.apply(Action::Reset);
        assert_eq!(app.timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_cycle_and_sound_actions() {
        let mut app = app();

        app.apply(Action::CycleFocus);
        assert_eq!(app.timer.settings().focus_duration_minutes, 30);
        assert_eq!(app.status.as_deref(), Some("Focus: 30m"));

        app.apply(Action::CycleBreak);
        assert_eq!(app.timer.settings().break_duration_minutes, 10);

        app.apply(Action::ToggleSound);
        assert!(!app.timer.settings().sound_enabled);
        assert_eq!(app.status.as_deref(), Some("Sound off"));
    }

    #[test]
    fn test_edit_task() {
        let mut app = app();

        app.apply(Action::EditTask);
        assert!(app.is_editing());
        for c in "Draft  ".chars() {
            app.edit_push(c);
        }
        app.edit_push('x');
        app.edit_pop();
        app.commit_edit();

        assert!(!app.is_editing());
        assert_eq!(app.task.task(), "Draft  ");
    }

    #[test]
    fn test_cancel_edit_keeps_task() {
        let mut app = app();
        app.task.set("Original");

        app.begin_edit();
        app.edit_push('!');
        app.cancel_edit();

        assert_eq!(app.task.task(), "Original");
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_clear_task() {
        let mut app = app();
        app.task.set("Something");
        app.apply(Action::ClearTask);
        assert!(app.task.is_empty());
    }

    #[test]
    fn test_toggle_drawer() {
        let mut app = app();
        assert!(app.expanded);
        app.apply(Action::ToggleDrawer);
        assert!(!app.expanded);
    }

    #[test]
    fn test_poll_timeout_is_capped() {
        let mut app = app();
        let now = Instant::now();
        assert_eq!(app.poll_timeout(now), MAX_POLL);

        app.apply(Action::TogglePlayPause);
        assert!(app.poll_timeout(Instant::now()) <= MAX_POLL);
    }
}
