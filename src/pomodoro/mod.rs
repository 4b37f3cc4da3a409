//! Pomodoro timer core.
//!
//! - `SessionTimer`: focus/break state machine with one-second ticks
//! - `SettingsStore`: focus/break durations and sound flag
//! - `TaskStore`: the free-text current task
//! - `notify`: completion alert sinks

pub mod notify;
pub mod settings;
pub mod state;
pub mod task;
pub mod ticker;
pub mod timer;

pub use notify::{
    sinks_from_config, DesktopNotifier, LogNotifier, NotificationSink, SilentSound, SoundSink,
    TerminalBell,
};
pub use settings::{
    format_options, LoadOutcome, PomodoroSettings, SettingsStore, BREAK_OPTIONS, FOCUS_OPTIONS,
};
pub use state::{SessionType, TimerState};
pub use task::{TaskStore, TASK_PLACEHOLDER};
pub use ticker::{Ticker, TICK_PERIOD};
pub use timer::{format_mmss, SessionTimer, TimerSnapshot};
