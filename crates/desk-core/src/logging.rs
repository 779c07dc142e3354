//! Log initialization.
//!
//! The TUI owns stdout/stderr while it runs, so logs always go to
//! `<DESK_HOME>/logs/desk.log`.
//! - Respects `DESK_LOG` (an `EnvFilter` directive) if set
//! - Falls back to `info`

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "DESK_LOG";

const DEFAULT_FILTER: &str = "info";

/// Keeps the background log writer alive. Drop it last to flush.
#[must_use = "dropping the guard stops log output"]
pub struct LogGuard {
    _worker: WorkerGuard,
}

/// Installs the global subscriber writing to `dir/desk.log`.
///
/// A second call is harmless: the first subscriber stays installed.
///
/// # Errors
/// Returns an error if the log directory or file cannot be created.
pub fn init_file_logging(dir: &Path) -> Result<LogGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("desk")
        .filename_suffix("log")
        .build(dir)
        .with_context(|| format!("Failed to open log file in {}", dir.display()))?;
    let (writer, worker) = tracing_appender::non_blocking(appender);

    let _ = fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer)
        .try_init();

    Ok(LogGuard { _worker: worker })
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
