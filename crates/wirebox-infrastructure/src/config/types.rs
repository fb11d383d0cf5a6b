//! Configuration types

use crate::constants::DEFAULT_LOG_LEVEL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use wirebox_domain::EngineOptions;

/// Application configuration
///
/// ```toml
/// [engine]
/// max_resolution_depth = 256
/// contain_teardown_panics = true
///
/// [logging]
/// level = "info"
/// engine_level = "debug"
/// json_format = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Resolution engine options
    pub engine: EngineOptions,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Level for resolution and teardown events of the engine, `level` when unset
    pub engine_level: Option<String>,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily rolling file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            engine_level: None,
            json_format: false,
            file_output: None,
        }
    }
}
