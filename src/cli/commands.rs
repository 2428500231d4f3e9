// src/cli/commands.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stratum Scout CLI - mining pool endpoint verification
#[derive(Parser, Debug)]
#[command(name = "stratum-scout-rs")]
#[command(version, about, long_about = None)]
pub struct Commands {
    /// The action to perform (run a scan or generate a config template)
    #[command(subcommand)]
    pub action: Action,
}

/// Top-level commands for the scanner
#[derive(Subcommand, Debug)]
pub enum Action {
    /// Run the resolve-and-probe pipeline over the configured lists
    Scan(ScanOptions),

    /// Generate a configuration file template
    Config(ConfigOptions),
}

/// Options for running a verification scan
#[derive(Parser, Debug)]
pub struct ScanOptions {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Number of worker threads per phase (overrides config, 0 = auto)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Output path for the verified endpoint list (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Options for generating configuration files
#[derive(Parser, Debug)]
pub struct ConfigOptions {
    /// Output file path
    #[arg(short, long, default_value = "config.toml")]
    pub output: PathBuf,
}
