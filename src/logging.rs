//! Tracing subscriber setup.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, Paths};
use crate::error::DoingError;

/// File name prefix for the daily rolling log.
pub const LOG_FILE_PREFIX: &str = "doing.log";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Daily rolling file under the logs directory.
    File,
    /// Standard error.
    Stderr,
    /// No subscriber is installed.
    Disabled,
}

impl LogTarget {
    /// Pick the target for a run.
    ///
    /// The drawer owns the terminal, so it never logs to stderr; ephemeral
    /// runs never write files.
    #[must_use]
    pub const fn select(config: &LoggingConfig, interactive: bool, ephemeral: bool) -> Self {
        match (interactive, ephemeral, config.file) {
            (true, true, _) => Self::Disabled,
            (true, false, _) | (false, false, true) => Self::File,
            (false, true, _) | (false, false, false) => Self::Stderr,
        }
    }
}

/// Build the filter: `RUST_LOG` when set, otherwise the configured level.
///
/// # Errors
///
/// Returns `DoingError::Config` if the configured level is not a valid directive.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, DoingError> {
    let directive = config
        .level
        .parse()
        .map_err(|e| DoingError::Config(format!("Invalid logging.level '{}': {e}", config.level)))?;

    Ok(EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy())
}

/// Install the global subscriber.
///
/// Returns the appender guard for file logging; keep it alive until exit
/// so buffered lines are flushed.
///
/// # Errors
///
/// Returns an error if the logs directory cannot be created, the level is
/// invalid, or a subscriber is already installed.
pub fn init(
    paths: &Paths,
    config: &LoggingConfig,
    target: LogTarget,
) -> Result<Option<WorkerGuard>, DoingError> {
    match target {
        LogTarget::Disabled => Ok(None),
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(build_filter(config)?)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| DoingError::Config(format!("Failed to init logging: {e}")))?;
            Ok(None)
        }
        LogTarget::File => {
            paths.ensure_dirs()?;
            let appender = tracing_appender::rolling::daily(&paths.logs, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::fmt()
                .with_env_filter(build_filter(config)?)
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer)
                .try_init()
                .map_err(|e| DoingError::Config(format!("Failed to init logging: {e}")))?;

            tracing::debug!(dir = %paths.logs.display(), "Logging initialized");
            Ok(Some(guard))
        }
    }
}
