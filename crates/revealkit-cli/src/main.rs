use std::fs::{self, File};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use revealkit_core::{AppConfig, StrategyKind};

mod commands;

#[derive(Parser)]
#[command(name = "revealkit")]
#[command(author, version, about = "Animated visibility and hold-to-scroll in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive demo
    Run,
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Run a behavior headless and print what happened
    Simulate {
        #[command(subcommand)]
        target: SimulateTarget,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Write the default configuration to the config path
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum SimulateTarget {
    /// Hold a scroll trigger for a while and report the offset
    Scroll {
        /// How long the press is held, in milliseconds
        #[arg(long, default_value_t = 100)]
        hold_ms: u64,
        /// Tick strategy (defaults to the configured one)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        /// Step per tick (defaults to the configured one)
        #[arg(long)]
        step: Option<f64>,
        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
    /// Show then hide every effect and print the property timeline
    Reveal {
        /// Sampling interval in milliseconds
        #[arg(long, default_value_t = 50)]
        sample_ms: u64,
        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Interval,
    Frame,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Interval => StrategyKind::Interval,
            StrategyArg::Frame => StrategyKind::Frame,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration; `config init` must work even if the file is broken
    let config = match &cli.command {
        Some(Commands::Config {
            action: ConfigAction::Init { .. },
        }) => Arc::new(AppConfig::default()),
        _ => Arc::new(AppConfig::load()?),
    };

    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, interactive)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(force),
        },
        Some(Commands::Simulate { target }) => match target {
            SimulateTarget::Scroll {
                hold_ms,
                strategy,
                step,
                json,
            } => {
                commands::simulate::scroll(&config, hold_ms, strategy.map(Into::into), step, json)
                    .await
            }
            SimulateTarget::Reveal { sample_ms, json } => {
                commands::simulate::reveal(&config, sample_ms, json)
            }
        },
    }
}

/// `RUST_LOG` wins over `general.log_level`. The interactive demo logs to a
/// file so the terminal stays clean.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&log_path)?;
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
