//! # devindex
//!
//! **CLI Binary**
//!
//! This is the entry point for the `devindex` command-line application.
//! It orchestrates the other crates to perform the requested actions.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Resolve and load the dashboard configuration
//! * Install the log subscriber
//! * Dispatch commands to appropriate handlers
//! * Handle errors and exit codes
//!
//! This crate should contain minimal business logic.

mod commands;
mod config;
mod error_hints;

use anyhow::Result;
use clap::Parser;
use devindex_config::Cli;
use tracing_subscriber::EnvFilter;

/// Parse arguments from the process and run the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);
    commands::dispatch(cli)
}

/// Render an error with its context chain and any matching hints.
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
