//! Application bootstrap
//!
//! Wires configuration and logging in front of the engine: load the
//! configuration, install the subscriber, hand back a builder that carries
//! the configured engine options.

use crate::config::{AppConfig, ConfigLoader};
use crate::logging::{init_logging, log_engine_options};
use wirebox_domain::error::Result;
use wirebox_engine::InjectorBuilder;

/// Load configuration, initialize logging and return a configured builder
///
/// Logging can only be installed once per process; a second call fails.
pub fn initialize<'a>(loader: &ConfigLoader) -> Result<(AppConfig, InjectorBuilder<'a>)> {
    let config = loader.load()?;
    init_logging(&config.logging)?;
    log_engine_options(&config.engine);
    let builder = configured_builder(&config);
    Ok((config, builder))
}

/// Builder carrying the engine options of `config`
pub fn configured_builder<'a>(config: &AppConfig) -> InjectorBuilder<'a> {
    InjectorBuilder::new().with_options(config.engine)
}
