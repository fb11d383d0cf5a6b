//! Binding descriptors
//!
//! A [`Binding`] is the registered recipe for one component. The strategy is
//! picked once, here, and erased into a single creation function; the
//! resolver never branches on it again.
//!
//! | Strategy | Arena space | Produces |
//! |----------|-------------|----------|
//! | [`Binding::instance`] | no | the caller's reference |
//! | [`Binding::constructor`] | yes | `T::inject(deps)` placed in the arena |
//! | [`Binding::factory`] | yes | closure result placed in the arena |
//! | [`Binding::boxed_factory`] | no | closure's `Box`, owned by the arena |
//! | [`Binding::interface`] | no | the concrete instance seen as `I` |

use crate::context::CreateContext;
use crate::inject::{Dependencies, Injectable};
use crate::instance::InstancePtr;
use std::alloc::Layout;
use std::fmt;
use std::ptr::NonNull;
use tracing::error;
use wirebox_domain::{ComponentId, Error, Result};

/// Creation function stored in a descriptor, invoked at most once
pub(crate) type Creator<'a> =
    Box<dyn FnOnce(&mut CreateContext<'_>) -> Result<InstancePtr> + 'a>;

/// Construction strategy of a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// Externally owned instance
    Instance,
    /// `Injectable` constructor, placed in the arena
    Constructor,
    /// Value-returning factory, placed in the arena
    Factory,
    /// Box-returning factory, registered with the arena as external
    BoxedFactory,
    /// Concrete component re-exposed as an interface
    Interface,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Instance => "instance",
            Self::Constructor => "constructor",
            Self::Factory => "factory",
            Self::BoxedFactory => "boxed factory",
            Self::Interface => "interface",
        };
        f.write_str(name)
    }
}

/// How a descriptor yields its instance
pub(crate) enum Recipe<'a> {
    /// Already available, terminal from the start
    Instance(InstancePtr),
    /// Built on first use
    Create {
        create: Creator<'a>,
        dependencies: Vec<ComponentId>,
        allocation: Option<Layout>,
    },
}

impl<'a> Recipe<'a> {
    pub(crate) fn dependencies(&self) -> &[ComponentId] {
        match self {
            Self::Instance(_) => &[],
            Self::Create { dependencies, .. } => dependencies,
        }
    }

    pub(crate) fn allocation(&self) -> Option<Layout> {
        match self {
            Self::Instance(_) => None,
            Self::Create { allocation, .. } => *allocation,
        }
    }

    pub(crate) fn instance<T: ?Sized + 'static>(instance: &'a T) -> Self {
        Self::Instance(InstancePtr::from_ref(instance))
    }

    pub(crate) fn value_factory<T, D, F>(factory: F) -> Self
    where
        T: 'static,
        D: Dependencies,
        F: FnOnce(D) -> T + 'a,
    {
        Self::Create {
            create: Box::new(move |context: &mut CreateContext<'_>| -> Result<InstancePtr> {
                let deps = D::from_context(context)?;
                let ptr = context.place(factory(deps))?;
                Ok(InstancePtr::new(ptr))
            }),
            dependencies: D::component_ids(),
            allocation: Some(Layout::new::<T>()),
        }
    }

    pub(crate) fn boxed_factory<T, D, F>(factory: F) -> Self
    where
        T: ?Sized + 'static,
        D: Dependencies,
        F: FnOnce(D) -> Option<Box<T>> + 'a,
    {
        Self::Create {
            create: Box::new(move |context: &mut CreateContext<'_>| -> Result<InstancePtr> {
                let deps = D::from_context(context)?;
                let Some(object) = factory(deps) else {
                    error!(component = %context.id(), "factory returned no instance");
                    return Err(Error::null_provided(context.id()));
                };
                let ptr = context.register_external(object);
                Ok(InstancePtr::new(ptr))
            }),
            dependencies: D::component_ids(),
            allocation: None,
        }
    }
}

/// Registered recipe for one component
pub struct Binding<'a> {
    id: ComponentId,
    kind: BindingKind,
    recipe: Recipe<'a>,
}

impl<'a> Binding<'a> {
    /// Bind an instance owned by the caller
    ///
    /// The instance must outlive the injector; it is never destroyed by it.
    pub fn instance<T: ?Sized + 'static>(instance: &'a T) -> Self {
        Self {
            id: ComponentId::of::<T>(),
            kind: BindingKind::Instance,
            recipe: Recipe::instance(instance),
        }
    }

    /// Bind `T` to its [`Injectable`] constructor
    pub fn constructor<T: Injectable>() -> Self {
        Self {
            id: ComponentId::of::<T>(),
            kind: BindingKind::Constructor,
            recipe: Recipe::value_factory::<T, T::Deps, _>(T::inject),
        }
    }

    /// Bind `T` to a factory whose result is moved into the arena
    ///
    /// ```ignore
    /// Binding::factory(|(config,): (Dep<Config>,)| Pool::connect(&config.url))
    /// ```
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
        }
    }

    /// Bind `T` to a factory that allocates the object itself
    ///
    /// The box is owned by the arena afterwards. Returning `None` fails the
    /// request with `NullProvidedInstance`.
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
        }
    }

    /// Expose the unqualified concrete component `C` as the interface `I`
    ///
    /// `adjust` is the view of a `C` as an `I`, typically the unsizing
    /// coercion `fn as_greeter(c: &English) -> &dyn Greeter { c }` or the
    /// closure `|c| c`. It is applied to the concrete reference, so
    /// trait-object metadata is always the one of `C`'s implementation.
    pub fn interface<I, C>(adjust: fn(&'static C) -> &'static I) -> Self
    where
        I: ?Sized + 'static,
        C: ?Sized + 'static,
    {
        Self::interface_to(ComponentId::of::<C>(), adjust)
    }

    /// Expose the component bound under `target` as the interface `I`
    ///
    /// The reference handed to `adjust` is only valid while the injector
    /// lives; `adjust` must return a view of it and nothing else.
    pub fn interface_to<I, C>(target: ComponentId, adjust: fn(&'static C) -> &'static I) -> Self
    where
        I: ?Sized + 'static,
        C: ?Sized + 'static,
    {
        let create = move |context: &mut CreateContext<'_>| -> Result<InstancePtr> {
            let concrete = context.dependency_ptr::<C>(0)?;
            // SAFETY: the concrete component is alive for as long as the injector,
            // and the adjusted view is erased to a pointer before it can escape.
            let concrete: &'static C = unsafe { concrete.as_ref() };
            let adjusted = NonNull::from(adjust(concrete));
            Ok(InstancePtr::new(adjusted))
        };
        Self {
            id: ComponentId::of::<I>(),
            kind: BindingKind::Interface,
            recipe: Recipe::Create {
                create: Box::new(create),
                dependencies: vec![target],
                allocation: None,
            },
        }
    }

    /// Register under the qualifier `A` instead of the plain type
    pub fn annotated<A: 'static>(mut self) -> Self {
        self.id = self.id.with_qualifier::<A>();
        self
    }

    /// Identifier the binding is registered under
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Construction strategy
    pub fn kind(&self) -> BindingKind {
        self.kind
    }

    /// Declared dependencies, in argument order
    pub fn dependencies(&self) -> &[ComponentId] {
        self.recipe.dependencies()
    }

    /// Whether construction places an object in the arena
    pub fn needs_allocation(&self) -> bool {
        self.recipe.allocation().is_some()
    }

    pub(crate) fn into_parts(self) -> (ComponentId, BindingKind, Recipe<'a>) {
        (self.id, self.kind, self.recipe)
    }
}

impl fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("dependencies", &self.dependencies())
            .field("needs_allocation", &self.needs_allocation())
            .finish()
    }
}
