//! Domain layer constants
//!
//! Defaults for the resolution engine. Infrastructure-specific constants
//! (file names, environment prefixes) remain in `wirebox_infrastructure`.

// ============================================================================
// RESOLUTION CONSTANTS
// ============================================================================

/// Maximum depth of nested dependency resolution before giving up
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 512;

/// Whether a panicking destructor is contained during teardown by default
pub const DEFAULT_CONTAIN_TEARDOWN_PANICS: bool = true;

// ============================================================================
// DIAGNOSTIC CONSTANTS
// ============================================================================

/// Separator between a component type name and its qualifier in messages
pub const QUALIFIER_SEPARATOR: &str = " @ ";
