//! CLI interface for liquidity-terminal
//!
//! Provides subcommands for:
//! - `analyze`: run the pipeline and print the snapshot table
//! - `brief`: run the pipeline and print the narrative brief
//! - `config`: show the effective configuration

mod analyze;

pub use analyze::AnalyzeArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "liquidity-terminal")]
#[command(about = "Central-bank liquidity vs equity-index analytics terminal")]
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
    /// Run the pipeline and print the snapshot table
    Analyze(AnalyzeArgs),
    /// Run the pipeline and print the narrative brief
    Brief(AnalyzeArgs),
    /// Show the effective configuration
    Config,
}
