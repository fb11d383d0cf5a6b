//! # wirebox engine
//!
//! Runtime half of the container: it takes an already assembled set of
//! bindings and turns requests for components into constructed, memoized
//! object graphs backed by a fixed-capacity arena.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`binding`] | Binding descriptors and construction strategies |
//! | [`multibinding`] | Producers contributing to a shared collection |
//! | [`graph`] | Identifier-to-node store with pre-resolved edges |
//! | [`arena`] | Fixed-capacity allocator and teardown order |
//! | [`injector`] | Lifetime owner and request API |
//! | [`inject`] | `Injectable` constructors and dependency tuples |
//! | [`context`] | What a creation function sees |
//! | [`instance`] | Type-erased instance pointers |
//!
//! ## Example
//!
//! ```
//! use wirebox_domain::Dep;
//! use wirebox_engine::{Binding, Injectable, InjectorBuilder};
//!
//! struct Clock;
//!
//! impl Injectable for Clock {
//!     type Deps = ();
//!     fn inject((): ()) -> Self {
//!         Clock
//!     }
//! }
//!
//! struct Scheduler {
//!     clock: Dep<Clock>,
//! }
//!
//! impl Injectable for Scheduler {
//!     type Deps = (Dep<Clock>,);
//!     fn inject((clock,): Self::Deps) -> Self {
//!         Scheduler { clock }
//!     }
//! }
//!
//! let injector = InjectorBuilder::new()
//!     .register(Binding::constructor::<Clock>())
//!     .register(Binding::constructor::<Scheduler>())
//!     .build()
//!     .unwrap();
//!
//! let scheduler = injector.get::<Scheduler>().unwrap();
//! assert!(std::ptr::eq(&*scheduler.clock, injector.get::<Clock>().unwrap()));
//! ```

// The engine hands out raw component pointers; every unsafe block states
// the lifetime invariant it relies on.
#![allow(unsafe_code)]

pub mod arena;
pub mod binding;
pub mod context;
pub mod graph;
pub mod inject;
pub mod injector;
pub mod instance;
pub mod multibinding;
mod resolver;

pub use arena::{Arena, ArenaCapacity};
pub use binding::{Binding, BindingKind};
pub use context::{CreateContext, ResolvedDependency};
pub use graph::{Edge, GraphStore, Node, NodeId};
pub use inject::{Dependencies, Dependency, Injectable};
pub use injector::{Injector, InjectorBuilder, InjectorStats, Multibindings, Provider};
pub use instance::InstancePtr;
pub use multibinding::Multibinding;
