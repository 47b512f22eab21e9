//! Logging Infrastructure
//!
//! Structured logging to stdout, or to daily-rolling files when a log
//! directory is configured.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Log file prefix inside the log directory
const LOG_FILE_PREFIX: &str = "kiosk-edge";

/// Initialize the logger at `info`, writing to stdout
pub fn init_logger() -> std::io::Result<()> {
    init_logger_with_file(None, None)
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` takes precedence over `log_level` when set. Calling this
/// again after a subscriber is installed is a no-op.
pub fn init_logger_with_file(
    log_level: Option<&str>,
    log_dir: Option<&str>,
) -> std::io::Result<()> {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let installed = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(Path::new(dir))?;
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            subscriber
                .with_writer(file_appender)
                .with_ansi(false)
                .try_init()
        }
        None => subscriber.try_init(),
    };

    if installed.is_err() {
        tracing::debug!("Logger already initialized");
    }
    Ok(())
}
