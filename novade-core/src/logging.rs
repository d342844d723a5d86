//! Logging System for NovaDE components.
//!
//! Built on the `tracing` ecosystem: a console layer on stdout plus an optional
//! daily rolling file layer fed through `tracing-appender`'s non-blocking writer.

use crate::config::types::LOG_LEVELS;
use crate::config::LoggingConfig;
use crate::error::{CoreError, LoggingError};
use crate::utils;

use once_cell::sync::Lazy;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Keeps the file writer's worker alive so buffered lines are flushed at exit.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Initializes a minimal logging setup on `stderr`.
///
/// Used before configuration is available and as the fallback when full
/// initialization fails. Honors `RUST_LOG`, defaulting to `info`. A subscriber that
/// is already installed is left in place.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

/// Resolves the effective level: an explicit override beats the configuration.
pub fn effective_level(
    config: &LoggingConfig,
    level_override: Option<&str>,
) -> Result<String, LoggingError> {
    let level = level_override.unwrap_or(&config.level).to_lowercase();
    if LOG_LEVELS.contains(&level.as_str()) {
        Ok(level)
    } else {
        Err(LoggingError::InvalidLevel(level))
    }
}

fn create_file_layer(log_path: &Path, json: bool) -> Result<(BoxedLayer, WorkerGuard), CoreError> {
    utils::fs::ensure_parent_exists(log_path)?;

    let directory = log_path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("launcher.log"));
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(directory, file_name));

    let layer = if json {
        fmt::layer().json().with_writer(writer).with_ansi(false).boxed()
    } else {
        fmt::layer().with_writer(writer).with_ansi(false).boxed()
    };
    Ok((layer, guard))
}

/// Installs the global subscriber described by `config`.
///
/// `level_override` comes from the command line and wins over `config.level`.
/// `RUST_LOG` directives, when present, are added on top of the chosen level.
pub fn init_logging(config: &LoggingConfig, level_override: Option<&str>) -> Result<(), CoreError> {
    let level = effective_level(config, level_override)?;
    let json = config.format.eq_ignore_ascii_case("json");
    let filter = || {
        let directives = std::env::var("RUST_LOG").unwrap_or_default();
        if directives.is_empty() {
            EnvFilter::new(&level)
        } else {
            EnvFilter::new(format!("{},{}", level, directives))
        }
    };

    let console: BoxedLayer = if json {
        fmt::layer().json().with_writer(stdout).with_ansi(false).with_filter(filter()).boxed()
    } else {
        fmt::layer()
            .with_writer(stdout)
            .with_ansi(atty::is(atty::Stream::Stdout))
            .with_filter(filter())
            .boxed()
    };

    let mut layers = vec![console];
    let mut file_guard = None;
    if let Some(path) = &config.file_path {
        let (layer, guard) = create_file_layer(path, json)?;
        layers.push(layer.with_filter(filter()).boxed());
        file_guard = Some(guard);
    }

    Registry::default().with(layers).try_init().map_err(|e| {
        LoggingError::InitializationFailure(format!(
            "Failed to set global tracing subscriber. Was it already initialized? Error: {}",
            e
        ))
    })?;

    match LOG_WORKER_GUARD.lock() {
        Ok(mut slot) => *slot = file_guard,
        Err(e) => eprintln!(
            "[ERROR] Failed to store log worker guard: {}. Log flushing may be affected.",
            e
        ),
    }
    Ok(())
}
