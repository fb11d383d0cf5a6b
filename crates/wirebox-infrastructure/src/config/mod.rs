//! Configuration management
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | `AppConfig` and its sections |
//! | [`loader`] | Figment-based loading, validation and saving |

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig};
