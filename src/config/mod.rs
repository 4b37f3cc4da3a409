//! Configuration management for doing.
//!
//! This module handles loading configuration from `~/.doing/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, LoggingConfig, NotificationConfig};
