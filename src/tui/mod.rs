//! Terminal User Interface (TUI) for doing.
//!
//! The drawer: a compact timer header that expands to show the task,
//! playback controls and duration settings. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, Mode};
pub use event::Action;

use std::io;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::DoingError;
use crate::pomodoro::{SessionTimer, TaskStore};

/// Run the drawer until the user quits.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(timer: SessionTimer, task: TaskStore) -> Result<(), DoingError> {
    enable_raw_mode()
        .map_err(|e| DoingError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| DoingError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| DoingError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(timer, task);
    tracing::info!(state = %app.timer.state(), "drawer opened");
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    tracing::info!("drawer closed");
    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), DoingError> {
    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| DoingError::Terminal(format!("Failed to draw: {e}")))?;

        let timeout = app.poll_timeout(Instant::now());
        match event::handle_events(app, timeout)? {
            Some(Action::Quit) => break,
            Some(action) => app.apply(action),
            None => {}
        }

        app.tick(Instant::now());
    }

    Ok(())
}
