use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use pomodoro_timer::cli::args::{Cli, Commands, TimerArgs};
use pomodoro_timer::cli::commands;
use pomodoro_timer::config::{Config, Paths};
use pomodoro_timer::logging::{self, LogTarget};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::default();
    let command = cli.command.unwrap_or(Commands::Tui(TimerArgs::default()));

    let log_target = match (&command, cli.log_file) {
        (_, Some(path)) => LogTarget::File(path),
        (Commands::Tui(_), None) => LogTarget::File(paths.log_file.clone()),
        (_, None) => LogTarget::Stderr,
    };
    logging::init(&log_target, cli.verbose)?;

    let config_path = cli.config.unwrap_or_else(|| paths.config_file.clone());
    let config = Config::load_from_path(&config_path)?;

    let output = match command {
        Commands::Tui(args) => {
            let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
            let (work, break_time) = args.resolve(&config);
            pomodoro_timer::tui::run(runtime.handle(), &config, &work, &break_time)
                .context("timer interface failed")?;
            String::new()
        }
        Commands::Run(args) => {
            let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
            runtime.block_on(commands::run(&config, &args))?
        }
        Commands::Config { output } => commands::show_config(&config, output)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
