//! doing - a terminal Pomodoro timer
//!
//! This crate provides a focus/break session timer with a persisted current
//! task, driven from an interactive drawer or one-shot commands.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod pomodoro;
pub mod storage;
pub mod tui;

pub use cli::{Cli, Commands, OutputFormat};
pub use error::DoingError;
