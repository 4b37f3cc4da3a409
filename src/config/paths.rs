//! Path resolution for doing configuration and data files.
//!
//! All doing data is stored in `~/.doing/`:
//! - `config.yaml` - Main configuration file
//! - `doing.db` - `SQLite` preferences store (settings, current task)
//! - `logs/` - Rolling log files

use std::path::PathBuf;

use crate::error::DoingError;

/// Paths to doing configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.doing/`
    pub root: PathBuf,
    /// Config file: `~/.doing/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.doing/doing.db`
    pub database: PathBuf,
    /// Logs directory: `~/.doing/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, DoingError> {
        let home = std::env::var("HOME")
            .map_err(|_| DoingError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".doing")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("doing.db"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Use `root` when given (from `--data-dir` / `DOING_HOME`), otherwise `~/.doing/`.
    ///
    /// # Errors
    ///
    /// Returns an error if no root is given and the home directory cannot be determined.
    pub fn resolve(root: Option<PathBuf>) -> Result<Self, DoingError> {
        root.map_or_else(Self::new, |root| Ok(Self::with_root(root)))
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), DoingError> {
        for dir in [&self.root, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    DoingError::Config(format!("Failed to create directory {}: {e}", dir.display()))
                })?;
            }
        }

        Ok(())
    }
}
