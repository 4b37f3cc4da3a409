//! Timer and session state enums.

use serde::{Deserialize, Serialize};

/// What the timer is doing right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Nothing has started since launch or the last reset.
    #[default]
    Idle,
    /// A focus session is counting down.
    Focus,
    /// A break session is counting down.
    Break,
    /// A session is suspended mid-countdown.
    Paused,
}

impl TimerState {
    /// Short label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Focus => "Focus Time",
            Self::Break => "Break Time",
            Self::Paused => "Paused",
        }
    }

    /// Whether the countdown is live (`Focus` or `Break`).
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Focus | Self::Break)
    }
}

impl std::fmt::Display for TimerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which kind of interval is active, or queued to resume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    /// Work interval.
    #[default]
    Focus,
    /// Rest interval.
    Break,
}

impl SessionType {
    /// The other session type.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Focus => Self::Break,
            Self::Break => Self::Focus,
        }
    }

    /// The timer state that runs this session.
    #[must_use]
    pub const fn running_state(&self) -> TimerState {
        match self {
            Self::Focus => TimerState::Focus,
            Self::Break => TimerState::Break,
        }
    }

    /// Notification title and body sent when a session of this type ends.
    #[must_use]
    pub const fn completion_message(&self) -> (&'static str, &'static str) {
        match self {
            Self::Focus => ("Focus Complete!", "Time for a break."),
            Self::Break => ("Break Over!", "Ready to focus again?"),
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::Break => "Break",
        }
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
