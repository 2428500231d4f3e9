// src/main.rs
use clap::Parser;
use stratum_scout_rs::{self, *};

/// Main entry point for the scanner
///
/// # Returns
/// - `Ok(())` on successful execution
/// - `Err(ScoutError)` if any operation fails
///
/// # Flow
/// 1. Parses command line arguments
/// 2. Delegates to the appropriate subcommand handler
/// 3. Propagates any errors upward
fn main() -> Result<(), ScoutError> {
    let cli = cli::Commands::parse();

    match cli.action {
        cli::Action::Scan(opts) => run_scan(opts),
        cli::Action::Config(opts) => generate_config(opts),
    }
}

/// Runs a verification scan with the given options
///
/// # Arguments
/// * `opts` - Command line options for the scan
///
/// # Operations
/// 1. Initializes logging
/// 2. Loads configuration and applies CLI overrides
/// 3. Runs the resolve-and-probe pipeline
/// 4. Logs the final run summary
fn run_scan(opts: cli::ScanOptions) -> Result<(), ScoutError> {
    utils::init_logging();

    let mut config = config::load(&opts.config)?;
    // Apply CLI overrides
    if let Some(workers) = opts.workers {
        config.worker_threads = workers;
    }
    if let Some(output) = opts.output {
        config.output_path = output;
    }

    let summary = scanner::run(&config)?;

    log::info!("Time: {:?}", summary.elapsed);
    log::info!(
        "Pools: {}, candidates: {}, verified: {}",
        summary.pool_count,
        summary.candidate_count,
        summary.verified_count
    );
    log::info!(
        "IP Port count: {}, Written: {}",
        summary.verified_count,
        summary.written_bytes
    );

    Ok(())
}

/// Generates a configuration template file
///
/// # Arguments
/// * `opts` - Configuration generation options
///
/// # Operations
/// 1. Generates the commented template content
/// 2. Writes the template to the specified output file
fn generate_config(opts: cli::ConfigOptions) -> Result<(), ScoutError> {
    let template = config::generate_template();
    std::fs::write(opts.output, template)?;
    Ok(())
}
