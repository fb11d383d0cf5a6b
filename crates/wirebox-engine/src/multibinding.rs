//! Multibinding descriptors
//!
//! Several producers may contribute to one collection identifier. Each
//! [`Multibinding`] is one producer; the collection itself is assembled by
//! the typed `collect` function captured at registration, so the injector
//! can hand back `Vec<NonNull<T>>` without knowing `T` at build time.

use crate::binding::{BindingKind, Recipe};
use crate::inject::Dependencies;
use crate::instance::InstancePtr;
use std::any::{Any, type_name};
use std::fmt;
use std::ptr::NonNull;
use std::rc::Rc;
use tracing::error;
use wirebox_domain::{ComponentId, Error, Result};

/// Builds the shared collection from the constructed elements
pub(crate) type CollectFn = fn(ComponentId, &[InstancePtr]) -> Result<Rc<dyn Any>>;

fn collect<T: ?Sized + 'static>(id: ComponentId, instances: &[InstancePtr]) -> Result<Rc<dyn Any>> {
    let mut elements: Vec<NonNull<T>> = Vec::with_capacity(instances.len());
    for instance in instances {
        let Some(element) = instance.downcast::<T>() else {
            error!(
                multibinding = %id,
                stored = instance.type_name(),
                "multibinding element has an unexpected type"
            );
            return Err(Error::type_mismatch(id, type_name::<T>()));
        };
        elements.push(element);
    }
    Ok(Rc::new(elements))
}

/// One producer contributing to the collection of `T`
pub struct Multibinding<'a> {
    id: ComponentId,
    kind: BindingKind,
    recipe: Recipe<'a>,
    collect: CollectFn,
}

impl<'a> Multibinding<'a> {
    /// Contribute an instance owned by the caller
    pub fn instance<T: ?Sized + 'static>(instance: &'a T) -> Self {
        Self {
            id: ComponentId::of::<T>(),
            kind: BindingKind::Instance,
            recipe: Recipe::instance(instance),
            collect: collect::<T>,
        }
    }

    /// Contribute a value built by `factory` and placed in the arena
    pub fn factory<T, D, F>(factory: F) -> Self
    where
        T: 'static,
        D: Dependencies,
        F: FnOnce(D) -> T + 'a,
    {
        Self {
            id: ComponentId::of::<T>(),
            kind: BindingKind::Factory,
            recipe: Recipe::value_factory(factory),
            collect: collect::<T>,
        }
    }

    /// Contribute a boxed object, typically a `Box<dyn Trait>`
    ///
    /// Returning `None` fails the collection with `NullProvidedInstance`.
    pub fn boxed_factory<T, D, F>(factory: F) -> Self
    where
        T: ?Sized + 'static,
        D: Dependencies,
        F: FnOnce(D) -> Option<Box<T>> + 'a,
    {
        Self {
            id: ComponentId::of::<T>(),
            kind: BindingKind::BoxedFactory,
            recipe: Recipe::boxed_factory(factory),
            collect: collect::<T>,
        }
    }

    /// Contribute to the collection qualified by `A`
    pub fn annotated<A: 'static>(mut self) -> Self {
        self.id = self.id.with_qualifier::<A>();
        self
    }

    /// Collection identifier
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Construction strategy of this producer
    pub fn kind(&self) -> BindingKind {
        self.kind
    }

    /// Declared dependencies of this producer
    pub fn dependencies(&self) -> &[ComponentId] {
        self.recipe.dependencies()
    }

    pub(crate) fn into_parts(self) -> (ComponentId, BindingKind, Recipe<'a>, CollectFn) {
        (self.id, self.kind, self.recipe, self.collect)
    }
}

impl fmt::Debug for Multibinding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Multibinding")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("dependencies", &self.dependencies())
            .finish_non_exhaustive()
    }
}
