//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::pomodoro::TimerState;
use crate::tui::app::{App, Mode};

const FOCUS_ACCENT: Color = Color::Rgb(0xe8, 0x7b, 0x5f);
const BREAK_ACCENT: Color = Color::Rgb(0x5e, 0xb8, 0x9e);
const PAUSED_ACCENT: Color = Color::Rgb(0xd4, 0xa9, 0x4d);

/// Accent color for a timer state.
pub const fn accent(state: TimerState) -> Color {
    match state {
        TimerState::Idle | TimerState::Focus => FOCUS_ACCENT,
        TimerState::Break => BREAK_ACCENT,
        TimerState::Paused => PAUSED_ACCENT,
    }
}

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let constraints: &[Constraint] = if app.expanded {
        &[
            Constraint::Length(3), // Header
            Constraint::Length(3), // Task input
            Constraint::Length(3), // Controls
            Constraint::Length(3), // Settings
            Constraint::Min(0),
            Constraint::Length(1), // Status bar
        ]
    } else {
        &[
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ]
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints.to_vec())
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    if app.expanded {
        render_task(frame, app, chunks[1]);
        render_controls(frame, app, chunks[2]);
        render_settings(frame, app, chunks[3]);
    }
    render_status_bar(frame, app, chunks[chunks.len() - 1]);
}

/// Render the collapsed header: time, task and chevron.
fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let state = app.timer.state();
    let color = accent(state);

    let mut time_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if state == TimerState::Paused {
        time_style = time_style.add_modifier(Modifier::SLOW_BLINK);
    }

    let task_style = if app.task.is_empty() {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    } else {
        Style::default()
    };

    let chevron = if app.expanded { "▴" } else { "▾" };

    let line = Line::from(vec![
        Span::styled(app.timer.formatted_time(), time_style),
        Span::raw("  "),
        Span::styled(app.task.display_task(), task_style),
        Span::raw("  "),
        Span::styled(chevron, Style::default().fg(Color::DarkGray)),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", state.label())),
    );

    frame.render_widget(header, area);
}

/// Render the task input.
fn render_task(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let (text, style) = match &app.mode {
        Mode::EditingTask(buffer) => (buffer.as_str(), Style::default()),
        Mode::Normal if app.task.is_empty() => (
            app.task.display_task(),
            Style::default().fg(Color::DarkGray),
        ),
        Mode::Normal => (app.task.task(), Style::default()),
    };

    let border = if app.is_editing() {
        Style::default().fg(accent(app.timer.state()))
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input = Paragraph::new(Span::styled(text, style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Task "),
    );
    frame.render_widget(input, area);

    if let Mode::EditingTask(buffer) = &app.mode {
        let width = u16::try_from(buffer.chars().count()).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(width)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

/// Render playback controls.
fn render_controls(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let color = accent(app.timer.state());
    let play = if app.timer.is_running() {
        "❚❚ pause"
    } else {
        "▶ start"
    };

    let key = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled("[r]", key),
        Span::raw(" reset    "),
        Span::styled("[space]", key),
        Span::raw(format!(" {play}    ")),
        Span::styled("[s]", key),
        Span::raw(" skip"),
    ]);

    let controls = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", app.timer.current_session())),
    );
    frame.render_widget(controls, area);
}

/// Render the duration and sound settings.
fn render_settings(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let settings = app.timer.settings();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled("FOCUS ", label),
        Span::styled(format!("{}m", settings.focus_duration_minutes), value),
        Span::styled(" [f]   ", label),
        Span::styled("BREAK ", label),
        Span::styled(format!("{}m", settings.break_duration_minutes), value),
        Span::styled(" [b]   ", label),
        Span::styled("SOUND ", label),
        Span::styled(if settings.sound_enabled { "On" } else { "Off" }, value),
        Span::styled(" [m]", label),
    ]);

    let row = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Settings "),
    );
    frame.render_widget(row, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status = app.status.as_deref().unwrap_or("");

    let status_bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status_bar, area);
}
