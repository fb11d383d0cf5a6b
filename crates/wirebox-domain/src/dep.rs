//! Dependency handles
//!
//! Constructors and factories receive their dependencies as [`Dep`] values.
//! A `Dep` points at an object owned by the injector that built it. The
//! injector destroys components in reverse construction order, so every
//! dependency outlives the components that hold a `Dep` to it.

#![allow(unsafe_code)]

use crate::component_id::ComponentId;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::ptr::NonNull;

/// Handle to an injected dependency of type `T`, qualified by `A`
///
/// `A = ()` is the unqualified form. The handle is neither `Clone` nor
/// `Send`: it is meant to be stored in the component that received it and
/// must not leave the injector that produced it.
///
/// ```ignore
/// struct Service {
///     store: Dep<dyn Store>,
///     replica: Dep<dyn Store, Replica>,
/// }
/// ```
pub struct Dep<T: ?Sized + 'static, A: 'static = ()> {
    ptr: NonNull<T>,
    _qualifier: PhantomData<fn() -> A>,
}

impl<T: ?Sized + 'static, A: 'static> Dep<T, A> {
    /// Wrap a pointer produced by an injector
    ///
    /// # Safety
    ///
    /// `ptr` must point to a live `T` that stays valid and is never mutably
    /// aliased for as long as the returned handle exists.
    pub unsafe fn from_raw(ptr: NonNull<T>) -> Self {
        Self {
            ptr,
            _qualifier: PhantomData,
        }
    }

    /// Identifier this handle is resolved from
    pub fn component_id() -> ComponentId {
        ComponentId::annotated::<A, T>()
    }

    /// Raw pointer to the dependency
    pub fn as_ptr(&self) -> NonNull<T> {
        self.ptr
    }
}

impl<T: ?Sized + 'static, A: 'static> Deref for Dep<T, A> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: `from_raw` requires the pointee to outlive the handle.
        unsafe { self.ptr.as_ref() }
    }
}

impl<T: ?Sized + fmt::Debug + 'static, A: 'static> fmt::Debug for Dep<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Dep").field(&&**self).finish()
    }
}
