//! Type-erased instance pointers
//!
//! Every node of the graph memoizes its instance as an [`InstancePtr`]. The
//! pointer keeps its full type (including trait object metadata) so a typed
//! read is a checked downcast, never a reinterpretation of an address.
//!
//! The pointer is stored inline: thin and wide pointers both fit in two
//! pointer-sized words, so erasing one allocates nothing.

use std::any::{TypeId, type_name};
use std::fmt;
use std::mem::{MaybeUninit, size_of};
use std::ptr::{self, NonNull};

/// Room for a thin or wide `NonNull<T>`
type Words = [*const (); 2];

/// Erased, typed pointer to a constructed component
///
/// Copying copies the pointer, not the pointee.
#[derive(Clone, Copy)]
pub struct InstancePtr {
    words: MaybeUninit<Words>,
    type_id: TypeId,
    type_name: &'static str,
}

impl InstancePtr {
    /// Erase a pointer to `T`
    pub fn new<T: ?Sized + 'static>(ptr: NonNull<T>) -> Self {
        const { assert!(size_of::<NonNull<T>>() <= size_of::<Words>()) };
        let mut words = MaybeUninit::<Words>::uninit();
        // SAFETY: `words` is pointer-aligned and large enough for `NonNull<T>`.
        unsafe { ptr::write(words.as_mut_ptr().cast::<NonNull<T>>(), ptr) };
        Self {
            words,
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// Erase a pointer to an externally owned instance
    pub fn from_ref<T: ?Sized + 'static>(instance: &T) -> Self {
        Self::new(NonNull::from(instance))
    }

    /// Recover the pointer, if it was erased from a `NonNull<T>`
    pub fn downcast<T: ?Sized + 'static>(&self) -> Option<NonNull<T>> {
        if self.type_id != TypeId::of::<T>() {
            return None;
        }
        // SAFETY: the type ids match, so `words` holds a `NonNull<T>` written
        // by `new::<T>`.
        Some(unsafe { ptr::read(self.words.as_ptr().cast::<NonNull<T>>()) })
    }

    /// Printable name of the pointee type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for InstancePtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstancePtr<{}>", self.type_name)
    }
}
