//! Error handling types

use crate::component_id::ComponentId;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wirebox
///
/// Resolution failures carry the [`ComponentId`] involved so the message
/// names the offending type.
#[derive(Error, Debug)]
pub enum Error {
    /// A component was requested (directly or as a dependency) but never bound
    #[error("No binding registered for {id}")]
    UnboundIdentifier {
        /// The identifier that has no binding
        id: ComponentId,
    },

    /// A pointer-returning factory produced nothing
    #[error("Attempting to get an instance for the type {id} but the provider returned nothing")]
    NullProvidedInstance {
        /// The identifier whose factory returned nothing
        id: ComponentId,
    },

    /// The arena ran out of reserved space
    #[error("Arena exhausted while placing {id}: needed {requested} bytes, {remaining} remaining")]
    ArenaExhausted {
        /// The identifier being placed
        id: ComponentId,
        /// Bytes needed including alignment padding
        requested: usize,
        /// Bytes left in the region
        remaining: usize,
    },

    /// A component was requested while it was still being constructed
    #[error("Re-entrant resolution of {id}: the binding graph contains a cycle")]
    ReentrantResolution {
        /// The identifier resolved twice on the same path
        id: ComponentId,
    },

    /// The dependency chain is deeper than the configured limit
    #[error("Resolution of {id} exceeded the maximum depth of {limit}")]
    ResolutionDepthExceeded {
        /// The identifier at which the limit was hit
        id: ComponentId,
        /// The configured limit
        limit: usize,
    },

    /// Construction of the component failed on an earlier request
    #[error("Construction of {id} failed earlier and is not retried")]
    PoisonedBinding {
        /// The identifier whose construction failed
        id: ComponentId,
    },

    /// Two bindings were registered for the same identifier
    #[error("{id} is bound more than once")]
    DuplicateBinding {
        /// The identifier bound twice
        id: ComponentId,
    },

    /// The instance stored for an identifier is not of the requested type
    #[error("{id} was requested as {requested}")]
    TypeMismatch {
        /// The identifier that was looked up
        id: ComponentId,
        /// Printable name of the requested type
        requested: &'static str,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal consistency error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create an unbound identifier error
    pub fn unbound(id: ComponentId) -> Self {
        Self::UnboundIdentifier { id }
    }

    /// Create a null provided instance error
    pub fn null_provided(id: ComponentId) -> Self {
        Self::NullProvidedInstance { id }
    }

    /// Create an arena exhausted error
    pub fn arena_exhausted(id: ComponentId, requested: usize, remaining: usize) -> Self {
        Self::ArenaExhausted {
            id,
            requested,
            remaining,
        }
    }

    /// Create a re-entrant resolution error
    pub fn reentrant(id: ComponentId) -> Self {
        Self::ReentrantResolution { id }
    }

    /// Create a depth exceeded error
    pub fn depth_exceeded(id: ComponentId, limit: usize) -> Self {
        Self::ResolutionDepthExceeded { id, limit }
    }

    /// Create a poisoned binding error
    pub fn poisoned(id: ComponentId) -> Self {
        Self::PoisonedBinding { id }
    }

    /// Create a duplicate binding error
    pub fn duplicate(id: ComponentId) -> Self {
        Self::DuplicateBinding { id }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(id: ComponentId, requested: &'static str) -> Self {
        Self::TypeMismatch { id, requested }
    }

    /// The component identifier this error is about, if any
    pub fn component(&self) -> Option<ComponentId> {
        match self {
            Self::UnboundIdentifier { id }
            | Self::NullProvidedInstance { id }
            | Self::ArenaExhausted { id, .. }
            | Self::ReentrantResolution { id }
            | Self::ResolutionDepthExceeded { id, .. }
            | Self::PoisonedBinding { id }
            | Self::DuplicateBinding { id }
            | Self::TypeMismatch { id, .. } => Some(*id),
            Self::Configuration { .. } | Self::Io { .. } | Self::Internal { .. } => None,
        }
    }

    /// Whether the error signals a defect in the binding set rather than in user code
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::UnboundIdentifier { .. }
                | Self::ReentrantResolution { .. }
                | Self::DuplicateBinding { .. }
                | Self::ArenaExhausted { .. }
        )
    }
}

// Configuration and I/O error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
