use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Prefix of the daily log files written under `--log-dir`.
pub const LOG_FILE_PREFIX: &str = "cssguard";

/// How the binary wants its diagnostics.
#[derive(Debug, Clone, Default)]
pub struct LogOptions<'a> {
    /// Debug level instead of warn
    pub verbose: bool,
    /// Also write daily-rotated log files here
    pub log_dir: Option<&'a Utf8Path>,
    /// Write the log file as JSON lines
    pub json: bool,
}

/// Level filter: `RUST_LOG` when set, otherwise `debug` for verbose runs and `warn` for quiet ones.
pub fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }))
}

/// Setup logging: console diagnostics on stderr, plus an optional rotating file.
///
/// Reports go to stdout, so the console layer writes to stderr to keep `--json`
/// output machine-readable.
///
/// # Returns
/// The file appender's guard when `log_dir` is set. It must be held for the
/// duration of the program so buffered lines are flushed.
pub fn setup_logging(options: &LogOptions<'_>) -> Result<Option<WorkerGuard>> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false);

    let (file_layer, json_layer, guard) = match options.log_dir {
        Some(log_dir) => {
            if !log_dir.exists() {
                fs::create_dir_all(log_dir)
                    .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
            }

            let file_appender = rolling::daily(log_dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            if options.json {
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true);
                (None, Some(layer), Some(guard))
            } else {
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false) // No ANSI codes in log files
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true);
                (Some(layer), None, Some(guard))
            }
        }
        None => (None, None, None),
    };

    tracing_subscriber::registry()
        .with(build_filter(options.verbose))
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()
        .context("Logging was already initialized")?;

    tracing::debug!(
        "Logging initialized: verbose={}, log_dir={:?}, json={}",
        options.verbose,
        options.log_dir,
        options.json
    );

    Ok(guard)
}
