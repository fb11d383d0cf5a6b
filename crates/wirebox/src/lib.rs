//! # wirebox
//!
//! An arena-backed dependency injection runtime. Bindings are registered up
//! front; components are built lazily on first request, exactly once, with
//! their dependencies constructed first. Everything an injector builds lives
//! in one fixed-capacity arena and is destroyed in reverse construction
//! order when the injector drops.
//!
//! ## Example
//!
//! ```
//! use wirebox::prelude::*;
//!
//! trait Greeter {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English {
//!     name: Dep<String>,
//! }
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         format!("Hello, {}", *self.name)
//!     }
//! }
//!
//! fn as_greeter(english: &English) -> &dyn Greeter {
//!     english
//! }
//!
//! let injector = InjectorBuilder::new()
//!     .register(Binding::factory(|(): ()| String::from("world")))
//!     .register(Binding::factory(|(name,): (Dep<String>,)| English { name }))
//!     .register(Binding::interface::<dyn Greeter, English>(as_greeter))
//!     .build()?;
//!
//! assert_eq!(injector.get::<dyn Greeter>()?.greet(), "Hello, world");
//! # Ok::<(), wirebox::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - `domain` - identifiers, dependency handles, errors and engine options
//! - `engine` - binding descriptors, graph store, arena and injector
//! - `infrastructure` - configuration, logging and bootstrap

/// Domain layer - identifiers, handles and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use wirebox_domain::*;
}

/// Engine - registration, resolution and lifetime
///
/// Re-exports from the engine crate for convenience
pub mod engine {
    pub use wirebox_engine::*;
}

/// Infrastructure layer - configuration, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use wirebox_infrastructure::*;
}

/// Everything needed to declare and resolve components
pub mod prelude {
    pub use wirebox_domain::{ComponentId, Dep, EngineOptions, Error, Result};
    pub use wirebox_engine::{
        Binding, Injectable, Injector, InjectorBuilder, Multibinding, Multibindings, Provider,
    };
}

// Re-export commonly used types at the crate root
pub use domain::{ComponentId, Dep, EngineOptions, Error, Result};
pub use engine::{Binding, Injectable, Injector, InjectorBuilder, Multibinding};
pub use infrastructure::bootstrap::{configured_builder, initialize};
