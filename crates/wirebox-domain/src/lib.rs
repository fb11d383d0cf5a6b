//! # wirebox domain layer
//!
//! Pure value types shared by every wirebox crate. Nothing in here knows how
//! components are built; it only names them, hands them out and reports
//! failures.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`component_id`] | Ordered, hashable key for a (qualified) component type |
//! | [`dep`] | Dependency handle passed to constructors and factories |
//! | [`error`] | Domain error type and `Result` alias |
//! | [`value_objects`] | Engine options shared with configuration |
//! | [`constants`] | Domain defaults |

pub mod component_id;
pub mod constants;
pub mod dep;
pub mod error;
pub mod value_objects;

pub use component_id::ComponentId;
pub use dep::Dep;
pub use error::{Error, Result};
pub use value_objects::EngineOptions;
