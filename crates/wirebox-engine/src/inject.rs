//! Injection traits
//!
//! [`Dependency`] turns one resolved pointer into a handle, [`Dependencies`]
//! does the same for a whole argument tuple, and [`Injectable`] marks a type
//! that can be built by the constructor strategy.

use crate::context::CreateContext;
use wirebox_domain::{ComponentId, Dep, Result};

/// A single injectable argument
pub trait Dependency: Sized {
    /// Identifier the argument is resolved from
    fn component_id() -> ComponentId;

    /// Build the argument from the dependency at `index`
    fn from_context(context: &CreateContext<'_>, index: usize) -> Result<Self>;
}

impl<T: ?Sized + 'static, A: 'static> Dependency for Dep<T, A> {
    fn component_id() -> ComponentId {
        Dep::<T, A>::component_id()
    }

    fn from_context(context: &CreateContext<'_>, index: usize) -> Result<Self> {
        let ptr = context.dependency_ptr::<T>(index)?;
        // SAFETY: a dependency is constructed before, and destroyed after, every
        // component it was injected into.
        Ok(unsafe { Dep::from_raw(ptr) })
    }
}

/// An ordered tuple of injectable arguments
///
/// Implemented for tuples of up to ten [`Dependency`] values, including `()`.
/// The tuple order is the declaration order of the dependency edges.
pub trait Dependencies: Sized {
    /// Identifiers of every argument, in order
    fn component_ids() -> Vec<ComponentId>;

    /// Build the tuple from the resolved dependencies
    fn from_context(context: &CreateContext<'_>) -> Result<Self>;
}

macro_rules! impl_dependencies {
    ($($dep:ident => $index:tt),*) => {
        impl<$($dep: Dependency),*> Dependencies for ($($dep,)*) {
            fn component_ids() -> Vec<ComponentId> {
                vec![$($dep::component_id()),*]
            }

            #[allow(unused_variables)]
            fn from_context(context: &CreateContext<'_>) -> Result<Self> {
                Ok(($(context.dependency::<$dep>($index)?,)*))
            }
        }
    };
}

impl_dependencies!();
impl_dependencies!(D0 => 0);
impl_dependencies!(D0 => 0, D1 => 1);
impl_dependencies!(D0 => 0, D1 => 1, D2 => 2);
impl_dependencies!(D0 => 0, D1 => 1, D2 => 2, D3 => 3);
impl_dependencies!(D0 => 0, D1 => 1, D2 => 2, D3 => 3, D4 => 4);
impl_dependencies!(D0 => 0, D1 => 1, D2 => 2, D3 => 3, D4 => 4, D5 => 5);
impl_dependencies!(D0 => 0, D1 => 1, D2 => 2, D3 => 3, D4 => 4, D5 => 5, D6 => 6);
impl_dependencies!(D0 => 0, D1 => 1, D2 => 2, D3 => 3, D4 => 4, D5 => 5, D6 => 6, D7 => 7);
impl_dependencies!(
    D0 => 0, D1 => 1, D2 => 2, D3 => 3, D4 => 4, D5 => 5, D6 => 6, D7 => 7, D8 => 8
);
impl_dependencies!(
    D0 => 0, D1 => 1, D2 => 2, D3 => 3, D4 => 4, D5 => 5, D6 => 6, D7 => 7, D8 => 8, D9 => 9
);

/// A component built by its own constructor
///
/// # Example
///
/// ```ignore
/// struct Repository {
///     pool: Dep<Pool>,
/// }
///
/// impl Injectable for Repository {
///     type Deps = (Dep<Pool>,);
///
///     fn inject((pool,): Self::Deps) -> Self {
///         Self { pool }
///     }
/// }
/// ```
pub trait Injectable: Sized + 'static {
    /// Constructor arguments
    type Deps: Dependencies;

    /// Build the component from its resolved arguments
    fn inject(deps: Self::Deps) -> Self;
}
