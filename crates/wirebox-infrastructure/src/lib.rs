//! # wirebox infrastructure layer
//!
//! Cross-cutting concerns around the engine.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based configuration loading and validation |
//! | [`logging`] | Tracing subscriber setup |
//! | [`error_ext`] | Context extension trait for foreign errors |
//! | [`bootstrap`] | Configuration, logging and a configured builder in one call |
//! | [`constants`] | File names, environment prefixes and logging defaults |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigLoader, LoggingConfig};
pub use error_ext::ErrorContext;
