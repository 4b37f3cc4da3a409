//! Configuration settings for doing.
//!
//! Settings are loaded from `~/.doing/config.yaml`. Timer durations are not
//! configured here; they live in the preferences store next to the task.

use serde::Deserialize;

use crate::error::DoingError;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Notification channels.
    pub notifications: NotificationConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Color output setting.
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to the `colored` crate's global override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Which channels receive session-complete alerts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Show desktop notifications.
    #[serde(default = "default_true")]
    pub desktop: bool,
    /// Ring the terminal bell as the alert sound.
    #[serde(default = "default_true")]
    pub bell: bool,
    /// Application name shown on desktop notifications.
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive (overridden by `RUST_LOG`).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write logs to `~/.doing/logs/` instead of stderr.
    #[serde(default = "default_true")]
    pub file: bool,
}

// Default value functions for serde
const fn default_true() -> bool {
    true
}

fn default_app_name() -> String {
    "doing".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            desktop: default_true(),
            bell: default_true(),
            app_name: default_app_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, DoingError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            DoingError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            DoingError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.color, ColorSetting::Auto);
        assert!(config.notifications.desktop);
        assert!(config.notifications.bell);
        assert_eq!(config.notifications.app_name, "doing");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.general.color, ColorSetting::Auto);
    }

    #[test]
    fn test_load_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let yaml = r"
general:
  color: never
notifications:
  desktop: false
  bell: true
  app_name: focus
logging:
  level: debug
  file: false
";
        std::fs::write(&config_path, yaml).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.general.color, ColorSetting::Never);
        assert!(!loaded.notifications.desktop);
        assert_eq!(loaded.notifications.app_name, "focus");
        assert_eq!(loaded.logging.level, "debug");
        assert!(!loaded.logging.file);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
notifications:
  bell: false
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert!(!config.notifications.bell);
        // Defaults should be used for missing fields
        assert!(config.notifications.desktop);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "general: [not, a, map").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, DoingError::Config(_)));
    }
}
