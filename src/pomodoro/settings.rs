//! Timer settings and their persistence.
//!
//! Settings are stored as JSON under the `pomodoroSettings` key. A stored
//! record is applied whole or not at all: if either duration falls outside
//! its option set, the record is deleted and defaults are used.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::DoingError;
use crate::storage::KeyValueStore;

/// Allowed focus durations, in minutes.
pub const FOCUS_OPTIONS: [u32; 7] = [5, 10, 15, 20, 25, 30, 45];

/// Allowed break durations, in minutes.
pub const BREAK_OPTIONS: [u32; 4] = [3, 5, 10, 15];

const SETTINGS_KEY: &str = "pomodoroSettings";

/// User-chosen timer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSettings {
    /// Focus session length. Always one of [`FOCUS_OPTIONS`].
    pub focus_duration_minutes: u32,
    /// Break session length. Always one of [`BREAK_OPTIONS`].
    pub break_duration_minutes: u32,
    /// Play the alert sound on completion.
    pub sound_enabled: bool,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            focus_duration_minutes: 25,
            break_duration_minutes: 5,
            sound_enabled: true,
        }
    }
}

impl PomodoroSettings {
    /// Focus duration in seconds.
    #[must_use]
    pub const fn focus_seconds(&self) -> u32 {
        self.focus_duration_minutes * 60
    }

    /// Break duration in seconds.
    #[must_use]
    pub const fn break_seconds(&self) -> u32 {
        self.break_duration_minutes * 60
    }
}

/// Wire form of the stored record. Durations are signed so that any integer
/// decodes and out-of-range values land in validation instead of decoding.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSettings {
    focus_duration_minutes: i64,
    break_duration_minutes: i64,
    sound_enabled: bool,
}

impl TryFrom<StoredSettings> for PomodoroSettings {
    type Error = DoingError;

    fn try_from(stored: StoredSettings) -> Result<Self, Self::Error> {
        let focus = allowed(&FOCUS_OPTIONS, stored.focus_duration_minutes);
        let brk = allowed(&BREAK_OPTIONS, stored.break_duration_minutes);

        match (focus, brk) {
            (Some(focus_duration_minutes), Some(break_duration_minutes)) => Ok(Self {
                focus_duration_minutes,
                break_duration_minutes,
                sound_enabled: stored.sound_enabled,
            }),
            _ => Err(DoingError::PersistenceValidation {
                key: SETTINGS_KEY,
                reason: format!(
                    "focus={} break={} outside allowed options",
                    stored.focus_duration_minutes, stored.break_duration_minutes
                ),
            }),
        }
    }
}

fn allowed(options: &[u32], value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| options.contains(v))
}

/// Render an option set as "5, 10, 15".
#[must_use]
pub fn format_options(options: &[u32]) -> String {
    options
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The option after `current`, wrapping to the first.
///
/// If `current` is not in `options`, returns the first option.
#[must_use]
pub fn next_option(options: &[u32], current: u32) -> u32 {
    let next = options
        .iter()
        .position(|&o| o == current)
        .map_or(0, |i| (i + 1) % options.len());
    options.get(next).copied().unwrap_or(current)
}

/// Check a focus duration against [`FOCUS_OPTIONS`].
///
/// # Errors
///
/// Returns `DoingError::InvalidDuration` if `minutes` is not allowed.
pub fn validate_focus(minutes: u32) -> Result<u32, DoingError> {
    validate("Focus", &FOCUS_OPTIONS, minutes)
}

/// Check a break duration against [`BREAK_OPTIONS`].
///
/// # Errors
///
/// Returns `DoingError::InvalidDuration` if `minutes` is not allowed.
pub fn validate_break(minutes: u32) -> Result<u32, DoingError> {
    validate("Break", &BREAK_OPTIONS, minutes)
}

fn validate(kind: &'static str, options: &[u32], minutes: u32) -> Result<u32, DoingError> {
    if options.contains(&minutes) {
        Ok(minutes)
    } else {
        Err(DoingError::InvalidDuration {
            kind,
            minutes,
            allowed: format_options(options),
        })
    }
}

/// Which branch [`SettingsStore::load`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored; defaults in use.
    Missing,
    /// A valid record was applied.
    Loaded,
    /// The record could not be read or decoded; defaults in use, record kept.
    Unreadable,
    /// The record held invalid values; it was deleted and defaults are in use.
    Discarded,
}

/// Loads and saves [`PomodoroSettings`] through an injected backend.
pub struct SettingsStore {
    backend: Rc<dyn KeyValueStore>,
    settings: PomodoroSettings,
}

impl SettingsStore {
    /// Create a store and load whatever the backend holds.
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            backend,
            settings: PomodoroSettings::default(),
        };
        store.load();
        store
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    /// Reload from the backend, falling back to defaults on any failure.
    pub fn load(&mut self) -> LoadOutcome {
        match self.read() {
            Ok(Some(settings)) => {
                debug!(?settings, "Loaded settings");
                self.settings = settings;
                LoadOutcome::Loaded
            }
            Ok(None) => {
                debug!("No stored settings, using defaults");
                self.settings = PomodoroSettings::default();
                LoadOutcome::Missing
            }
            Err(e @ DoingError::PersistenceValidation { .. }) => {
                warn!(error = %e, "Discarding stored settings");
                if let Err(e) = self.backend.remove(SETTINGS_KEY) {
                    warn!(error = %e, "Failed to delete invalid settings");
                }
                self.settings = PomodoroSettings::default();
                LoadOutcome::Discarded
            }
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable settings");
                self.settings = PomodoroSettings::default();
                LoadOutcome::Unreadable
            }
        }
    }

    fn read(&self) -> Result<Option<PomodoroSettings>, DoingError> {
        let bytes = self
            .backend
            .get(SETTINGS_KEY)
            .map_err(|e| DoingError::PersistenceRead {
                key: SETTINGS_KEY,
                reason: e.to_string(),
            })?;

        let Some(bytes) = bytes else {
            return Ok(None);
        };

        let stored: StoredSettings =
            serde_json::from_slice(&bytes).map_err(|e| DoingError::PersistenceRead {
                key: SETTINGS_KEY,
                reason: e.to_string(),
            })?;

        PomodoroSettings::try_from(stored).map(Some)
    }

    /// Write the current settings, overwriting whatever is stored.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn save(&self) {
        if let Err(e) = self.write() {
            warn!(error = %e, "Settings not persisted");
        }
    }

    fn write(&self) -> Result<(), DoingError> {
        let bytes = serde_json::to_vec(&self.settings).map_err(|e| DoingError::PersistenceWrite {
            key: SETTINGS_KEY,
            reason: e.to_string(),
        })?;

        self.backend
            .set(SETTINGS_KEY, &bytes)
            .map_err(|e| DoingError::PersistenceWrite {
                key: SETTINGS_KEY,
                reason: e.to_string(),
            })
    }

    /// Set the focus duration and persist.
    ///
    /// # Errors
    ///
    /// Returns `DoingError::InvalidDuration` if `minutes` is not one of
    /// [`FOCUS_OPTIONS`]; nothing changes in that case.
    pub fn set_focus_duration(&mut self, minutes: u32) -> Result<(), DoingError> {
        self.settings.focus_duration_minutes = validate_focus(minutes)?;
        info!(minutes, "Focus duration changed");
        self.save();
        Ok(())
    }

    /// Set the break duration and persist.
    ///
    /// # Errors
    ///
    /// Returns `DoingError::InvalidDuration` if `minutes` is not one of
    /// [`BREAK_OPTIONS`]; nothing changes in that case.
    pub fn set_break_duration(&mut self, minutes: u32) -> Result<(), DoingError> {
        self.settings.break_duration_minutes = validate_break(minutes)?;
        info!(minutes, "Break duration changed");
        self.save();
        Ok(())
    }

    /// Set the sound flag and persist.
    pub fn set_sound(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
        info!(enabled, "Sound setting changed");
        self.save();
    }

    /// Flip the sound flag and persist. Returns the new value.
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = !self.settings.sound_enabled;
        self.set_sound(enabled);
        enabled
    }
}
