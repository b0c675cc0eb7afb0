//! cssguard - Bidirectional CSS/HTML class validator
//!
//! Main entry point for the command-line tool.
//!
//! # Overview
//!
//! The binary parses arguments, initializes logging, loads the optional tool
//! settings and hands off to [`cssguard::commands::run`]:
//!
//! - `train`: learn patterns from stylesheets → `cssguard.json`
//! - `validate`: check markup against a trained config
//! - `direct`: exact comparison of markup and stylesheets
//! - `redundancy`: overlap between stylesheets
//! - `init`: write the effective settings to `cssguard.yaml`
//!
//! # Exit Status
//!
//! - `0`: success, or orphans found with `--fail false`
//! - `1`: orphans found (with `--fail`, the default), invalid arguments, or any
//!   load/parse failure

use anyhow::Result;
use clap::Parser;
use cssguard::cli::Cli;
use cssguard::commands::{self, CommandContext, Status};
use cssguard::config::{ConfigManager, DEFAULT_CONFIG_FILE};
use cssguard::logging::{LogOptions, setup_logging};
use cssguard::{APP_NAME, VERSION};
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are reported through the same path
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Hold the guard for the whole run so buffered log lines reach the file
    let _guard = match setup_logging(&LogOptions {
        verbose: cli.verbose,
        log_dir: cli.log_dir.as_deref(),
        json: cli.log_json,
    }) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!("Starting {} v{}", APP_NAME, VERSION);

    match run(&cli) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Status> {
    let settings = ConfigManager::new(DEFAULT_CONFIG_FILE, &cli.settings).load_settings()?;
    let ctx = CommandContext::new(settings, cli.settings.clone(), cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let status = commands::run(&cli.command, &ctx, &mut out)?;
    out.flush()?;

    Ok(status)
}
