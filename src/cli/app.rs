//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands;
use labup::config::{CONFIG_FILE, SetupConfig};
use labup::output::{Console, OutputMode};

/// labup - provision a containerized notebook environment
#[derive(Parser, Debug)]
#[command(
    name = "labup",
    version,
    about = "Provision a containerized notebook environment for coursework analysis",
    long_about = "Automates the setup of a Docker-hosted notebook environment.\n\n\
                  Checks prerequisites, builds and starts the environment, waits\n\
                  for the notebook service, extracts the data archive inside the\n\
                  container, and prints follow-up instructions."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the config file (defaults to ./labup.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full provisioning sequence (the default)
    Up,

    /// Check that the notebook is well-formed and its data files exist
    Validate {
        /// Notebook to check instead of the configured one
        #[arg(long)]
        notebook: Option<PathBuf>,
    },

    /// Stop the environment
    Down,

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let console = Console::new(cli.no_color, output_mode);

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let config = SetupConfig::load(&config_path)?;

    match cli.command {
        Some(Command::Up) | None => commands::up(&config, console, output_mode),
        Some(Command::Validate { notebook }) => commands::validate(&config, notebook, output_mode),
        Some(Command::Down) => commands::down(console, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("labup v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
    }
}
