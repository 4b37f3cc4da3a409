//! Error types for doing.

use thiserror::Error;

/// Errors produced by the doing library.
///
/// The persistence and notification variants are recovered from inside the
/// stores and sinks (logged, then degraded to in-memory state); only setup
/// failures and invalid user input normally reach the command line.
#[derive(Debug, Error)]
pub enum DoingError {
    /// Configuration or path resolution failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The preferences database could not be opened or queried.
    #[error("Database error: {0}")]
    Database(String),

    /// The terminal could not be set up or driven.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A duration outside the allowed option set was requested.
    #[error("{kind} duration of {minutes} minutes is not allowed (choose one of {allowed})")]
    InvalidDuration {
        /// "Focus" or "Break".
        kind: &'static str,
        /// The rejected value.
        minutes: u32,
        /// Comma-separated allowed options.
        allowed: String,
    },

    /// Persisted bytes were missing or could not be decoded.
    #[error("Failed to read persisted {key}: {reason}")]
    PersistenceRead {
        /// Storage key.
        key: &'static str,
        /// What went wrong.
        reason: String,
    },

    /// Persisted settings decoded but held out-of-range values.
    #[error("Persisted {key} failed validation: {reason}")]
    PersistenceValidation {
        /// Storage key.
        key: &'static str,
        /// What went wrong.
        reason: String,
    },

    /// Serializing or writing a persisted value failed.
    #[error("Failed to write persisted {key}: {reason}")]
    PersistenceWrite {
        /// Storage key.
        key: &'static str,
        /// What went wrong.
        reason: String,
    },

    /// The notification service refused or could not deliver a notification.
    #[error("Notification unavailable: {0}")]
    NotificationPermission(String),

    /// JSON serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
