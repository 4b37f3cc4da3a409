use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "doing")]
#[command(about = "A Pomodoro timer that remembers what you are doing")]
#[command(long_about = "doing - a terminal Pomodoro timer

Alternates focus sessions and breaks, alerting you when each one ends.
Your current task, session durations and sound preference are kept
between runs.

QUICK START:
  doing                     Open the timer drawer
  doing task set \"Write report\"   Set what you are working on
  doing settings focus 45   Use 45-minute focus sessions
  doing status              Show the timer, task and settings

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  doing <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Directory holding config.yaml, the preferences database and logs
    ///
    /// Defaults to ~/.doing.
    #[arg(long, value_name = "DIR", env = "DOING_HOME", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep settings and task in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the timer drawer (default)
    ///
    /// An interactive view showing the countdown and your current task.
    /// Expand it with tab to reach the controls and duration settings.
    ///
    /// # Keys
    ///
    ///   space      Start, pause or resume
    ///   r          Reset to an idle focus session
    ///   s          Skip to the other session
    ///   f / b      Cycle focus / break duration
    ///   m          Toggle sound
    ///   e          Edit the task (Enter saves, Esc cancels)
    ///   x          Clear the task
    ///   tab        Expand or collapse the drawer
    ///   q          Quit
    #[command(alias = "d")]
    Drawer,

    /// Show the timer, task and settings
    ///
    /// Prints the time a new focus session would start from, the current
    /// task and the stored settings.
    #[command(alias = "st")]
    Status,

    /// Show, set or clear the current task
    ///
    /// # Examples
    ///
    ///   doing task show
    ///   doing task set Write the quarterly report
    ///   doing task clear
    #[command(alias = "t")]
    Task(TaskArgs),

    /// Show or change durations and sound
    ///
    /// Focus sessions accept 5, 10, 15, 20, 25, 30 or 45 minutes.
    /// Breaks accept 3, 5, 10 or 15 minutes.
    ///
    /// # Examples
    ///
    ///   doing settings show
    ///   doing settings focus 45
    ///   doing settings break 10
    ///   doing settings sound off
    Settings(SettingsArgs),

    /// List the allowed focus and break durations
    Options,

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   doing completions bash > ~/.bash_completion.d/doing
    ///   doing completions zsh > ~/.zfunc/_doing
    ///   doing completions fish --install
    Completions {
        /// Shell to generate completions for
        shell: Shell,

        /// Print installation instructions instead of the script
        #[arg(long)]
        install: bool,
    },
}

#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: Option<TaskCommands>,
}

/// Task subcommands.
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Show the current task (default)
    Show,

    /// Set the current task
    Set {
        /// Task text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Clear the current task
    Clear,
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsCommands>,
}

/// Settings subcommands.
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the current settings (default)
    Show,

    /// Set the focus duration in minutes
    Focus {
        /// One of 5, 10, 15, 20, 25, 30, 45
        minutes: u32,
    },

    /// Set the break duration in minutes
    Break {
        /// One of 3, 5, 10, 15
        minutes: u32,
    },

    /// Turn the completion sound on or off
    Sound {
        /// on, off or toggle (default: toggle)
        #[arg(value_enum)]
        mode: Option<SoundMode>,
    },
}

/// Sound switch for `settings sound`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundMode {
    On,
    Off,
    Toggle,
}
