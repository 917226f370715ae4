//! Bankledger CLI - in-memory bank ledger from the command line
//!
//! Usage:
//! ```bash
//! bankledger                                  # same as `bankledger demo`
//! bankledger demo --format markdown
//! bankledger run scenario.toml --keep-going --format csv --output ledger.csv
//! bankledger -vv run scenario.toml            # debug logging on stderr
//! ```

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

mod commands;
mod config;

use commands::run::{self, RunOptions};
use config::{ScenarioConfig, ScenarioLoader};

/// Bankledger - accounts, deposits, withdrawals and transfers held in memory
#[derive(Parser)]
#[command(name = "bankledger")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the built-in demonstration and print the resulting ledger
    Demo {
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
        /// Output file path
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Replay a TOML scenario against a fresh ledger
    Run {
        /// Scenario file path
        scenario: PathBuf,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
        /// Output file path
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Log and skip failing steps instead of aborting
        #[arg(long)]
        keep_going: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
    Markdown,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.unwrap_or(Commands::Demo {
        format: OutputFormat::Table,
        output: None,
    });

    match command {
        Commands::Demo { format, output } => {
            let options = RunOptions {
                title: "Demo Ledger".to_string(),
                format,
                output,
                keep_going: false,
            };
            run::execute(&ScenarioConfig::demo(), &options)?;
        }

        Commands::Run {
            scenario,
            format,
            output,
            keep_going,
        } => {
            let loader = ScenarioLoader::load_file(&scenario)?;
            let title = match loader.path().and_then(|p| p.file_stem()) {
                Some(stem) => format!("Ledger ({})", stem.to_string_lossy()),
                None => "Ledger".to_string(),
            };
            let options = RunOptions {
                title,
                format,
                output,
                keep_going,
            };
            run::execute(&loader.into_config(), &options)?;
        }
    }

    Ok(())
}
