use colored::{ColoredString, Colorize};

use crate::pomodoro::{
    format_options, PomodoroSettings, TimerSnapshot, TimerState, BREAK_OPTIONS, FOCUS_OPTIONS,
};

/// Color a piece of text with the accent for `state`.
fn accent(text: &str, state: TimerState) -> ColoredString {
    match state {
        TimerState::Focus | TimerState::Idle => text.truecolor(0xe8, 0x7b, 0x5f),
        TimerState::Break => text.truecolor(0x5e, 0xb8, 0x9e),
        TimerState::Paused => text.truecolor(0xd4, 0xa9, 0x4d),
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "On"
    } else {
        "Off"
    }
}

fn task_line(task: &str, display_task: &str) -> String {
    if task.is_empty() {
        display_task.dimmed().italic().to_string()
    } else {
        display_task.bold().to_string()
    }
}

/// Format the timer snapshot.
pub fn format_status_pretty(snapshot: &TimerSnapshot) -> String {
    let mut output = Vec::new();

    output.push(format!(
        "{}  {}",
        accent(&snapshot.formatted_time, snapshot.state).bold(),
        snapshot.state_label
    ));
    output.push("─".repeat(40));
    output.push(format!(
        "Task:     {}",
        task_line(&snapshot.task, &snapshot.display_task)
    ));
    output.push(format!("Session:  {}", snapshot.session));
    output.push(settings_lines(&snapshot.settings));

    output.join("\n")
}

fn settings_lines(settings: &PomodoroSettings) -> String {
    [
        format!("Focus:    {}m", settings.focus_duration_minutes),
        format!("Break:    {}m", settings.break_duration_minutes),
        format!("Sound:    {}", on_off(settings.sound_enabled)),
    ]
    .join("\n")
}

/// Format the timer settings.
pub fn format_settings_pretty(settings: &PomodoroSettings) -> String {
    format!("{}\n{}\n{}", "Settings".bold(), "─".repeat(40), settings_lines(settings))
}

/// Format the current task.
pub fn format_task_pretty(task: &str, display_task: &str) -> String {
    task_line(task, display_task)
}

/// Format the allowed durations.
pub fn format_options_pretty(settings: &PomodoroSettings) -> String {
    let mark = |options: &[u32], current: u32| {
        options
            .iter()
            .map(|&o| {
                if o == current {
                    format!("[{o}]").bold().to_string()
                } else {
                    o.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    format!(
        "Focus:  {}\nBreak:  {}\n\n{}",
        mark(&FOCUS_OPTIONS, settings.focus_duration_minutes),
        mark(&BREAK_OPTIONS, settings.break_duration_minutes),
        format!(
            "Minutes. Focus accepts {}; break accepts {}.",
            format_options(&FOCUS_OPTIONS),
            format_options(&BREAK_OPTIONS)
        )
        .dimmed()
    )
}
