use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use elevator_core::AppConfig;

mod commands;

use commands::{simulate::SimulateOptions, RideArgs};

#[derive(Parser)]
#[command(name = "elevator")]
#[command(author, version, about = "Scroll to the bottom, then take the elevator back up")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run {
        #[command(flatten)]
        ride: RideArgs,
        /// Ride without muzak or the arrival ding
        #[arg(short, long)]
        mute: bool,
    },
    /// Ride once without a terminal UI and print the trajectory
    Simulate {
        /// Scroll offset the ride starts from
        #[arg(short, long, allow_negative_numbers = true)]
        from: f64,
        #[command(flatten)]
        ride: RideArgs,
        /// Frames per second to step at
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Print frames at the speed they would be shown
        #[arg(long)]
        realtime: bool,
    },
    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load().context("Failed to load configuration")?;

    let tui = matches!(cli.command, Some(Commands::Run { .. }) | None);
    init_logging(&config, tui)?;

    // Handle commands
    match cli.command {
        Some(Commands::Run { ride, mute }) => {
            ride.apply(&mut config.elevator);
            if mute {
                config.elevator.audio = false;
            }
            commands::run::run(config)
        }
        None => commands::run::run(config),
        Some(Commands::Simulate { from, ride, fps, json, realtime }) => {
            ride.apply(&mut config.elevator);
            let options = SimulateOptions { from, fps, json, realtime };
            commands::simulate::run(config.elevator, options).await
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(force),
        },
    }
}

/// RUST_LOG wins over `general.log_level`. The TUI owns the terminal, so it
/// logs to a file in the data directory instead of stderr.
fn init_logging(config: &AppConfig, tui: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if tui {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
