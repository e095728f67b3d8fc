//! File logging.
//!
//! The terminal belongs to the child commands, so log records go to a
//! daily-rolling file under the config directory instead of stderr.

use std::path::Path;

use copyshell_infrastructure::CopyshellPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured log filter.
pub const LOG_ENV_VAR: &str = "COPYSHELL_LOG";

const DEFAULT_FILTER: &str = "info";
const LOG_FILE_PREFIX: &str = "copyshell.log";

/// Installs the global subscriber.
///
/// Returns the writer guard, which must be held until exit so buffered
/// records are flushed. `None` means logging is off, either because the
/// log directory is unavailable or a subscriber was already installed.
pub fn init(configured: Option<&str>) -> Option<WorkerGuard> {
    let logs_dir = CopyshellPaths::logs_dir().ok()?;
    init_in(&logs_dir, configured)
}

fn init_in(logs_dir: &Path, configured: Option<&str>) -> Option<WorkerGuard> {
    std::fs::create_dir_all(logs_dir).ok()?;

    let directive = filter_directive(std::env::var(LOG_ENV_VAR).ok(), configured);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Invalid log filter '{}': {}; using '{}'", directive, e, DEFAULT_FILTER);
        EnvFilter::new(DEFAULT_FILTER)
    });

    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;

    tracing::info!("[Logging] writing to {:?} at '{}'", logs_dir, directive);
    Some(guard)
}

/// Picks the filter: environment first, then config, then `info`.
fn filter_directive(from_env: Option<String>, configured: Option<&str>) -> String {
    from_env
        .filter(|value| !value.trim().is_empty())
        .or_else(|| {
            configured
                .filter(|value| !value.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}
