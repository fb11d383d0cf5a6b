//! Domain Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`EngineOptions`] | Tunables for resolution and teardown |

use crate::constants::{DEFAULT_CONTAIN_TEARDOWN_PANICS, DEFAULT_MAX_RESOLUTION_DEPTH};
use serde::{Deserialize, Serialize};

/// Resolution engine options
///
/// Loaded as the `[engine]` section of the application configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Nested resolution depth after which a request fails
    pub max_resolution_depth: usize,

    /// Catch and log panicking destructors during teardown instead of unwinding
    pub contain_teardown_panics: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
            contain_teardown_panics: DEFAULT_CONTAIN_TEARDOWN_PANICS,
        }
    }
}
