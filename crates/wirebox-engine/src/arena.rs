//! Fixed-capacity arena
//!
//! The arena owns one aligned byte region sized from the binding set before
//! anything is constructed. Components are written in place and never move.
//! Objects produced outside the region (boxed factory results) are recorded
//! in the same destroy list, so teardown runs in one reverse order over both.

use std::alloc::{self, Layout};
use std::any::type_name;
use std::fmt;
use std::mem;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::ptr::{self, NonNull};
use tracing::{debug, error};
use wirebox_domain::{ComponentId, Error, Result};

/// Space reserved for the arena-placed objects of one binding set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaCapacity {
    bytes: usize,
    align: usize,
    objects: usize,
}

impl ArenaCapacity {
    /// Empty reservation
    pub fn new() -> Self {
        Self {
            bytes: 0,
            align: 1,
            objects: 0,
        }
    }

    /// Reserve room for one object of the given layout
    ///
    /// The region is aligned to the largest alignment reserved, so at most
    /// `align - 1` padding bytes precede any object.
    pub fn reserve(&mut self, layout: Layout) {
        if layout.size() == 0 {
            self.objects += 1;
            return;
        }
        self.bytes += layout.size() + layout.align() - 1;
        self.align = self.align.max(layout.align());
        self.objects += 1;
    }

    /// Reserved bytes, padding included
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// Alignment of the region
    pub fn align(&self) -> usize {
        self.align
    }

    /// Number of objects the reservation was computed for
    pub fn objects(&self) -> usize {
        self.objects
    }
}

impl Default for ArenaCapacity {
    fn default() -> Self {
        Self::new()
    }
}

enum Teardown {
    Placed {
        ptr: NonNull<u8>,
        drop_fn: unsafe fn(NonNull<u8>),
    },
    External(Box<dyn FnOnce()>),
}

struct Destructor {
    type_name: &'static str,
    teardown: Teardown,
}

impl Destructor {
    fn run(self) {
        match self.teardown {
            // SAFETY: `ptr` was written by `place::<T>` with the matching `drop_fn`
            // and is dropped exactly once, here.
            Teardown::Placed { ptr, drop_fn } => unsafe { drop_fn(ptr) },
            Teardown::External(drop_boxed) => drop_boxed(),
        }
    }
}

unsafe fn drop_placed<T>(ptr: NonNull<u8>) {
    // SAFETY: guaranteed by the caller, see `Destructor::run`.
    unsafe { ptr::drop_in_place(ptr.cast::<T>().as_ptr()) }
}

/// Fixed-capacity allocator backing component lifetime
pub struct Arena {
    region: Option<NonNull<u8>>,
    layout: Layout,
    used: usize,
    placed: usize,
    external: usize,
    destructors: Vec<Destructor>,
    contain_panics: bool,
}

impl Arena {
    /// Allocate the region for `capacity`
    pub fn with_capacity(capacity: ArenaCapacity) -> Result<Self> {
        let layout = Layout::from_size_align(capacity.bytes(), capacity.align()).map_err(|e| {
            Error::internal(format!(
                "invalid arena layout ({} bytes, align {}): {e}",
                capacity.bytes(),
                capacity.align()
            ))
        })?;

        let region = if layout.size() == 0 {
            None
        } else {
            // SAFETY: the layout has a non-zero size.
            let raw = unsafe { alloc::alloc(layout) };
            match NonNull::new(raw) {
                Some(region) => Some(region),
                None => alloc::handle_alloc_error(layout),
            }
        };

        debug!(
            bytes = layout.size(),
            align = layout.align(),
            objects = capacity.objects(),
            "arena reserved"
        );

        Ok(Self {
            region,
            layout,
            used: 0,
            placed: 0,
            external: 0,
            destructors: Vec::with_capacity(capacity.objects()),
            contain_panics: true,
        })
    }

    /// Whether a panicking destructor is caught and logged during teardown
    ///
    /// When not contained, teardown still completes and the first panic is
    /// resumed once the region is released.
    pub fn contain_teardown_panics(mut self, contain: bool) -> Self {
        self.contain_panics = contain;
        self
    }

    /// Move `value` into the next free, aligned slot of the region
    pub fn place<T: 'static>(&mut self, id: ComponentId, value: T) -> Result<NonNull<T>> {
        let layout = Layout::new::<T>();
        let ptr = if layout.size() == 0 {
            NonNull::<T>::dangling()
        } else {
            self.claim(id, layout)?.cast::<T>()
        };
        // SAFETY: `ptr` is aligned for `T` and not yet initialized; for a
        // zero-sized `T` the dangling pointer is a valid write target.
        unsafe { ptr.as_ptr().write(value) };

        if mem::needs_drop::<T>() {
            self.destructors.push(Destructor {
                type_name: type_name::<T>(),
                teardown: Teardown::Placed {
                    ptr: ptr.cast(),
                    drop_fn: drop_placed::<T>,
                },
            });
        }
        self.placed += 1;
        Ok(ptr)
    }

    /// Take ownership of an object allocated outside the region
    ///
    /// The object is dropped during teardown, in order with the placed ones.
    pub fn register_external<T: ?Sized + 'static>(&mut self, object: Box<T>) -> NonNull<T> {
        let raw = Box::into_raw(object);
        self.destructors.push(Destructor {
            type_name: type_name::<T>(),
            teardown: Teardown::External(Box::new(move || {
                // SAFETY: `raw` came from `Box::into_raw` and is released once.
                drop(unsafe { Box::from_raw(raw) });
            })),
        });
        self.external += 1;
        // SAFETY: `Box::into_raw` never returns null.
        unsafe { NonNull::new_unchecked(raw) }
    }

    fn claim(&mut self, id: ComponentId, layout: Layout) -> Result<NonNull<u8>> {
        let remaining = self.layout.size() - self.used;
        let Some(region) = self.region else {
            error!(component = %id, "arena has no reserved region");
            return Err(Error::arena_exhausted(id, layout.size(), remaining));
        };

        // SAFETY: `used` never exceeds the region size.
        let cursor = unsafe { region.as_ptr().add(self.used) };
        let padding = cursor.align_offset(layout.align());
        let needed = padding.checked_add(layout.size()).unwrap_or(usize::MAX);
        if needed > remaining {
            error!(
                component = %id,
                needed,
                remaining,
                "arena capacity exhausted, the reservation is too small"
            );
            return Err(Error::arena_exhausted(id, needed, remaining));
        }

        self.used += needed;
        // SAFETY: `padding + size` fits in the remaining region.
        Ok(unsafe { NonNull::new_unchecked(cursor.add(padding)) })
    }

    /// Size of the reserved region in bytes
    pub fn capacity(&self) -> usize {
        self.layout.size()
    }

    /// Bytes consumed so far, padding included
    pub fn used(&self) -> usize {
        self.used
    }

    /// Objects written into the region
    pub fn placed_count(&self) -> usize {
        self.placed
    }

    /// Objects registered from outside the region
    pub fn external_count(&self) -> usize {
        self.external
    }

    /// Objects that still have to be destroyed
    pub fn pending_destructors(&self) -> usize {
        self.destructors.len()
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        let total = self.destructors.len();
        let mut failures = 0_usize;
        let mut first_panic: Option<Box<dyn Any + Send>> = None;

        while let Some(destructor) = self.destructors.pop() {
            let type_name = destructor.type_name;
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| destructor.run())) {
                failures += 1;
                error!(
                    component = type_name,
                    "destructor panicked during teardown, continuing"
                );
                if first_panic.is_none() {
                    first_panic = Some(payload);
                }
            }
        }

        if let Some(region) = self.region.take() {
            // SAFETY: `region` was allocated in `with_capacity` with `self.layout`.
            unsafe { alloc::dealloc(region.as_ptr(), self.layout) };
        }

        debug!(destroyed = total, failures, "arena torn down");

        if let Some(payload) = first_panic
            && !self.contain_panics
            && !thread::panicking()
        {
            panic::resume_unwind(payload);
        }
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity())
            .field("used", &self.used)
            .field("placed", &self.placed)
            .field("external", &self.external)
            .finish_non_exhaustive()
    }
}
