//! Structured logging with tracing
//!
//! Installs the global subscriber for an application built on the engine.
//! The filter combines the configured level with a separate directive for
//! the engine target, so resolution and teardown events can be traced
//! without raising the level of everything else. `WIREBOX_LOG` replaces
//! the whole filter when set.

use crate::constants::{DEFAULT_LOG_FILE_STEM, ENGINE_LOG_TARGET, LOG_ENV_FILTER};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{Level, info, warn};
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use wirebox_domain::EngineOptions;
use wirebox_domain::error::{Error, Result};

// Re-export LoggingConfig for convenience
pub use crate::config::LoggingConfig;

/// Install the global subscriber described by `config`
///
/// Fails if a level is invalid or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let file_appender = config.file_output.as_deref().map(daily_appender);

    // The layer types differ per format, hence the separate branches
    let installed = if config.json_format {
        let stdout = fmt::layer().json().with_target(true).with_line_number(true);
        let file = file_appender.map(|appender| {
            fmt::layer()
                .json()
                .with_writer(appender)
                .with_ansi(false)
        });
        Registry::default()
            .with(filter)
            .with(stdout)
            .with(file)
            .try_init()
    } else {
        let stdout = fmt::layer().with_target(true).with_line_number(true);
        let file = file_appender.map(|appender| fmt::layer().with_writer(appender).with_ansi(false));
        Registry::default()
            .with(filter)
            .with(stdout)
            .with(file)
            .try_init()
    };
    installed.map_err(|e| {
        Error::configuration(format!("Failed to install the tracing subscriber: {e}"))
    })?;

    info!(
        level = %config.level,
        engine_level = config.engine_level.as_deref().unwrap_or(&config.level),
        json = config.json_format,
        "logging initialized"
    );
    Ok(())
}

/// Filter for `config`, or the `WIREBOX_LOG` override when it parses
///
/// Without an override the filter is `<level>,wirebox_engine=<engine_level>`.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let level = parse_log_level(&config.level)?;
    let engine_level = match &config.engine_level {
        Some(engine_level) => parse_log_level(engine_level)?,
        None => level,
    };

    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV_FILTER) {
        return Ok(filter);
    }
    let directives = format!(
        "{},{ENGINE_LOG_TARGET}={}",
        level.as_str().to_lowercase(),
        engine_level.as_str().to_lowercase()
    );
    EnvFilter::try_new(&directives)
        .map_err(|e| Error::configuration(format!("Invalid log filter {directives}: {e}")))
}

fn daily_appender(path: &Path) -> RollingFileAppender {
    tracing_appender::rolling::daily(
        path.parent().unwrap_or_else(|| Path::new(".")),
        path.file_stem()
            .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE_STEM)),
    )
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!(path = %config_path.display(), "configuration loaded");
    } else {
        warn!(path = %config_path.display(), "configuration file not found");
    }
}

/// Log the engine options an injector is about to be built with
pub fn log_engine_options(options: &EngineOptions) {
    info!(
        max_resolution_depth = options.max_resolution_depth,
        contain_teardown_panics = options.contain_teardown_panics,
        "engine options"
    );
}
