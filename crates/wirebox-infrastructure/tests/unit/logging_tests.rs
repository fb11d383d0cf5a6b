//! Logging Tests

use tracing::Level;
use wirebox_infrastructure::constants::DEFAULT_LOG_LEVEL;
use wirebox_infrastructure::logging::{LoggingConfig, build_filter, init_logging, parse_log_level};

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);

    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
    assert!(config.engine_level.is_none());
}

#[test]
fn test_filter_carries_an_engine_directive() {
    let config = LoggingConfig {
        level: "warn".to_string(),
        engine_level: Some("debug".to_string()),
        ..LoggingConfig::default()
    };

    let filter = build_filter(&config).unwrap().to_string().to_lowercase();
    assert!(filter.contains("wirebox_engine=debug"));
    assert!(filter.contains("warn"));
}

#[test]
fn test_filter_engine_level_defaults_to_level() {
    let filter = build_filter(&LoggingConfig::default())
        .unwrap()
        .to_string()
        .to_lowercase();
    assert!(filter.contains("wirebox_engine=info"));
}

#[test]
fn test_filter_rejects_invalid_engine_level() {
    let config = LoggingConfig {
        engine_level: Some("chatty".to_string()),
        ..LoggingConfig::default()
    };

    let error = build_filter(&config).unwrap_err();
    assert!(error.to_string().contains("Invalid log level: chatty"));
}

#[test]
fn test_init_logging_rejects_invalid_level() {
    let config = LoggingConfig {
        level: "loud".to_string(),
        ..LoggingConfig::default()
    };

    let error = init_logging(&config).unwrap_err();
    assert!(error.to_string().contains("Invalid log level: loud"));
}
