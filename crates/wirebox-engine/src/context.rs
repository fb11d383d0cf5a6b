//! Creation context
//!
//! What a creation function sees when the engine invokes it: the already
//! constructed dependency pointers, in declaration order, and the arena.

use crate::arena::Arena;
use crate::inject::Dependency;
use crate::instance::InstancePtr;
use std::any::type_name;
use std::ptr::NonNull;
use tracing::error;
use wirebox_domain::{ComponentId, Error, Result};

/// A constructed dependency, as handed to a creation function
#[derive(Debug, Clone)]
pub struct ResolvedDependency {
    /// Identifier the dependency was declared with
    pub id: ComponentId,
    /// Pointer to the constructed instance
    pub instance: InstancePtr,
}

/// Arguments of one invocation of a creation function
pub struct CreateContext<'r> {
    id: ComponentId,
    dependencies: &'r [ResolvedDependency],
    arena: &'r mut Arena,
}

impl<'r> CreateContext<'r> {
    pub(crate) fn new(
        id: ComponentId,
        dependencies: &'r [ResolvedDependency],
        arena: &'r mut Arena,
    ) -> Self {
        Self {
            id,
            dependencies,
            arena,
        }
    }

    /// Identifier of the component being created
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Number of declared dependencies
    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    /// Typed pointer to the dependency at `index`
    pub fn dependency_ptr<T: ?Sized + 'static>(&self, index: usize) -> Result<NonNull<T>> {
        let dependency = self.dependencies.get(index).ok_or_else(|| {
            Error::internal(format!(
                "{} declares {} dependencies, argument {index} requested",
                self.id,
                self.dependencies.len()
            ))
        })?;
        dependency.instance.downcast::<T>().ok_or_else(|| {
            error!(
                component = %self.id,
                dependency = %dependency.id,
                stored = dependency.instance.type_name(),
                "dependency has an unexpected type"
            );
            Error::type_mismatch(dependency.id, type_name::<T>())
        })
    }

    /// The dependency at `index`, as the handle type `D`
    pub fn dependency<D: Dependency>(&self, index: usize) -> Result<D> {
        D::from_context(self, index)
    }

    /// Move `value` into the arena
    pub fn place<T: 'static>(&mut self, value: T) -> Result<NonNull<T>> {
        self.arena.place(self.id, value)
    }

    /// Hand an externally allocated object to the arena for teardown
    pub fn register_external<T: ?Sized + 'static>(&mut self, object: Box<T>) -> NonNull<T> {
        self.arena.register_external(object)
    }
}
