use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use doing::cli::args::{Cli, Commands};
use doing::cli::commands;
use doing::config::{Config, Paths};
use doing::logging::{self, LogTarget};
use doing::pomodoro::{sinks_from_config, SessionTimer, SettingsStore, TaskStore};
use doing::storage::open_backend;
use doing::tui;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;
    let command = cli.command.unwrap_or(Commands::Drawer);

    if let Commands::Completions { shell, install } = command {
        print!("{}", commands::completions(shell, install)?);
        return Ok(());
    }

    let paths = Paths::resolve(cli.data_dir).context("Failed to resolve data directory")?;
    let config = Config::load_from_path(&paths.config_file)
        .with_context(|| format!("Failed to load {}", paths.config_file.display()))?;
    config.general.color.apply();

    let interactive = matches!(command, Commands::Drawer);
    let target = LogTarget::select(&config.logging, interactive, cli.ephemeral);
    let _guard = logging::init(&paths, &config.logging, target).context("Failed to set up logging")?;

    let backend = open_backend(&paths, cli.ephemeral)
        .with_context(|| format!("Failed to open {}", paths.database.display()))?;
    let (notifier, sound) = sinks_from_config(&config.notifications);
    let mut timer = SessionTimer::new(SettingsStore::new(backend.clone()), notifier, sound);
    let mut task = TaskStore::new(backend);

    let output = match command {
        Commands::Drawer => {
            tui::run(timer, task)?;
            String::new()
        }
        Commands::Status => commands::status(&timer, &task, format)?,
        Commands::Task(args) => commands::task(&mut task, args.command, format)?,
        Commands::Settings(args) => commands::settings(&mut timer, args.command, format)?,
        Commands::Options => commands::options(&timer, format)?,
        Commands::Completions { shell, install } => commands::completions(shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
