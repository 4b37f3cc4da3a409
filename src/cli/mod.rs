//! Command-line interface for doing.
//!
//! - `args`: clap argument definitions
//! - `commands`: one-shot command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, OutputFormat};
