//! CLI interface for mass-backtester
//!
//! Provides subcommands for:
//! - `run`: replay one symbol's whole weekly history through the engine
//! - `config`: show the resolved configuration

mod run;

pub use run::RunArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mass-backtester")]
#[command(about = "Batch driver that replays weekly FX rate history through an external backtesting engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay the full weekly history of one symbol
    Run(RunArgs),
    /// Show the resolved configuration
    Config,
}
