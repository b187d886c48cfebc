//! Diagnostic logging
//!
//! Logs go to a daily file in the configured directory, optionally mirrored to
//! stderr. Stdout carries the JSON response and never receives log lines.
//!
//! Logging is best-effort: if the directory or file cannot be created, the
//! bridge keeps running without a file sink.

use crate::config::Config;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_PREFIX: &str = "print-bridge";
const LOG_FILE_SUFFIX: &str = "log";

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
        )
    }
}

/// Build the rolling file appender, `None` if the directory is unusable
pub fn file_appender(log_dir: &Path) -> Option<RollingFileAppender> {
    if std::fs::create_dir_all(log_dir).is_err() {
        return None;
    }

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(log_dir)
        .ok()
}

/// Initialize the logging system.
///
/// Returns the guard of the non-blocking file writer; keep it alive until
/// exit so buffered lines are flushed.
pub fn init_logger(config: &Config) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match file_appender(&config.log_dir) {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_timer(LocalTimer)
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = config.log_to_stderr.then(|| {
        fmt::layer()
            .with_timer(LocalTimer)
            .with_ansi(false)
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    // A subscriber may already be installed (tests); that is not an error here
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    std::panic::set_hook(Box::new(|info| {
        tracing::error!(target: "panic", message = %info, "panic occurred");
    }));

    tracing::debug!(path = %config.log_dir.display(), "Diagnostics initialized");
    guard
}
