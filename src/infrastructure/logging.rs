//! Centralized logging
//!
//! Console output always; when file logging is enabled, logs also go to the
//! configured directory, separated by log type:
//! - <dir>/main - All logs as JSON
//! - <dir>/error - Error and warning logs only
//! - <dir>/filter - Filter rejections

use crate::infrastructure::config::LoggingConfig;
use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing::Subscriber;
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};

/// Log target for filter rejections
pub const FILTER_TARGET: &str = "filter";

/// Initialize logging
///
/// Returns WorkerGuards which must be kept alive until the run ends, or
/// buffered file output is lost.
/// # Errors
/// Returns error if a log directory cannot be created.
pub fn init_logging(config: &LoggingConfig) -> io::Result<Vec<WorkerGuard>> {
    if !config.files {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(fmt::layer().with_target(true).with_level(true))
            .init();
        return Ok(Vec::new());
    }

    let (subscriber, guards) = file_subscriber(&config.dir)?;
    subscriber.init();

    tracing::info!("Logging initialized. Log files in {}", config.dir.display());

    Ok(guards)
}

/// RUST_LOG overrides the default level
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Console plus the main, error and filter log files under `dir`
fn file_subscriber(
    dir: &Path,
) -> io::Result<(impl Subscriber + Send + Sync + 'static, Vec<WorkerGuard>)> {
    let mut guards = Vec::new();

    // Main log - all logs
    let (main_appender, main_guard) = create_appender(dir, "main")?;
    guards.push(main_guard);

    // Error log - ERROR and WARN only
    let (error_appender, error_guard) = create_appender(dir, "error")?;
    guards.push(error_guard);

    // Filter log - rejected coins
    let (filter_appender, filter_guard) = create_appender(dir, FILTER_TARGET)?;
    guards.push(filter_guard);

    let main_layer = fmt::layer()
        .with_writer(main_appender)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .json();

    let error_layer = fmt::layer()
        .with_writer(error_appender)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_filter(LevelFilter::WARN);

    let filter_layer = fmt::layer()
        .with_writer(filter_appender)
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .with_filter(filter_fn(|metadata| metadata.target() == FILTER_TARGET));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(true).with_level(true))
        .with(main_layer)
        .with(error_layer)
        .with(filter_layer);

    Ok((subscriber, guards))
}

/// Create a rolling file appender in `<root>/<name>/`
fn create_appender(root: &Path, name: &str) -> io::Result<(NonBlocking, WorkerGuard)> {
    let dir = root.join(name);
    fs::create_dir_all(&dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, dir, name);
    Ok(tracing_appender::non_blocking(appender))
}

/// Log macro helpers for specific log types
#[macro_export]
macro_rules! log_filter {
    ($level:expr, $($arg:tt)+) => {
        tracing::event!(target: "filter", $level, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_main {
    ($level:expr, $($arg:tt)+) => {
        tracing::event!(target: "main", $level, $($arg)+)
    };
}
