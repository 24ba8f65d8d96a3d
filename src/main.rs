//! The main entry point for the `pathmig` command-line application.
//!
//! This file parses command-line arguments, installs logging, and hands the run
//! over to the `pathmig` library.

use anyhow::Context;
use pathmig::cli::{self, Args};
use pathmig::{OutputFormatter, RunConfig, walker};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    let args = cli::parse_args();
    setup_logging(&args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Validates the configuration, walks the tree and prints the report.
fn run(args: &Args) -> anyhow::Result<()> {
    let config = RunConfig::from_args(args)?;
    info!(
        old = %config.old_path,
        new = %config.new_path,
        dry_run = config.dry_run,
        "starting pathmig"
    );

    let mut formatter = OutputFormatter::stdio(args.format);
    formatter.write_header(&config)?;
    let counters =
        walker::walk_with(&config, &mut formatter).context("failed to write report")?;
    formatter.write_summary(&config, &counters)?;

    Ok(())
}

// Logs go to stderr; stdout carries the report.
fn setup_logging(args: &Args) {
    let filter = if args.quiet {
        EnvFilter::new("error")
    } else if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .with(filter)
        .init();
}
