//! Injector
//!
//! The lifetime owner of one object graph. An [`Injector`] owns the graph
//! store and the arena together: components are created on first request
//! and destroyed, in reverse construction order, when the injector drops.
//!
//! ```ignore
//! let injector = InjectorBuilder::new()
//!     .register(Binding::constructor::<Database>())
//!     .register(Binding::interface::<dyn Store, Database>(as_store))
//!     .build()?;
//!
//! let store: &dyn Store = injector.get::<dyn Store>()?;
//! ```

use crate::arena::Arena;
use crate::binding::Binding;
use crate::graph::{GraphStore, NodeId};
use crate::multibinding::Multibinding;
use crate::resolver::Resolver;
use std::any::type_name;
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::rc::Rc;
use tracing::{debug, error, info};
use wirebox_domain::{ComponentId, EngineOptions, Error, Result};

/// Collects bindings before any component is resolved
pub struct InjectorBuilder<'a> {
    bindings: Vec<Binding<'a>>,
    multibindings: Vec<Multibinding<'a>>,
    options: EngineOptions,
}

impl<'a> InjectorBuilder<'a> {
    /// Empty builder with default options
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            multibindings: Vec::new(),
            options: EngineOptions::default(),
        }
    }

    /// Replace the engine options
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Options the injector will be built with
    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Add a binding
    pub fn register(mut self, binding: Binding<'a>) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Add every binding of `bindings`
    pub fn register_all<I>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = Binding<'a>>,
    {
        self.bindings.extend(bindings);
        self
    }

    /// Add a producer to a multibinding collection
    pub fn add_multibinding(mut self, multibinding: Multibinding<'a>) -> Self {
        self.multibindings.push(multibinding);
        self
    }

    /// Finish registration
    ///
    /// Builds the graph store and reserves the arena. Nothing is
    /// constructed yet.
    pub fn build(self) -> Result<Injector<'a>> {
        let (graph, capacity) = GraphStore::build(self.bindings, self.multibindings)?;
        let arena = Arena::with_capacity(capacity)?
            .contain_teardown_panics(self.options.contain_teardown_panics);
        info!(
            bindings = graph.len(),
            producers = graph.producer_count(),
            arena_bytes = arena.capacity(),
            "injector built"
        );
        Ok(Injector {
            storage: RefCell::new(InjectorStorage { graph, arena }),
            options: self.options,
        })
    }
}

impl Default for InjectorBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InjectorBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectorBuilder")
            .field("bindings", &self.bindings)
            .field("multibindings", &self.multibindings)
            .field("options", &self.options)
            .finish()
    }
}

// Field order matters: the graph (pending creators, cached pointers) goes
// before the arena runs the destructors.
struct InjectorStorage<'a> {
    graph: GraphStore<'a>,
    arena: Arena,
}

/// Owner of one resolved object graph
///
/// Returned references live as long as the injector borrow they came from.
/// The injector is single-threaded: it is neither `Send` nor `Sync`.
pub struct Injector<'a> {
    storage: RefCell<InjectorStorage<'a>>,
    options: EngineOptions,
}

impl<'a> Injector<'a> {
    /// Shorthand for [`InjectorBuilder::new`]
    pub fn builder() -> InjectorBuilder<'a> {
        InjectorBuilder::new()
    }

    /// The unqualified component `T`
    pub fn get<T: ?Sized + 'static>(&self) -> Result<&T> {
        self.get_by_id(ComponentId::of::<T>())
    }

    /// The component `T` qualified by `A`
    pub fn get_annotated<A: 'static, T: ?Sized + 'static>(&self) -> Result<&T> {
        self.get_by_id(ComponentId::annotated::<A, T>())
    }

    /// The component bound under `id`, read as `T`
    pub fn get_by_id<T: ?Sized + 'static>(&self, id: ComponentId) -> Result<&T> {
        let ptr = self.get_pointer_by_id::<T>(id)?;
        // SAFETY: the pointee lives until the injector drops, and the returned
        // reference borrows the injector.
        Ok(unsafe { ptr.as_ref() })
    }

    /// Raw pointer to the unqualified component `T`
    pub fn get_pointer<T: ?Sized + 'static>(&self) -> Result<NonNull<T>> {
        self.get_pointer_by_id(ComponentId::of::<T>())
    }

    /// Raw pointer to the component bound under `id`
    pub fn get_pointer_by_id<T: ?Sized + 'static>(&self, id: ComponentId) -> Result<NonNull<T>> {
        let node = self.storage.borrow().graph.lookup(id)?;
        self.resolve_node::<T>(node)
    }

    /// A copy of the unqualified component `T`
    pub fn get_cloned<T: Clone + 'static>(&self) -> Result<T> {
        self.get::<T>().map(T::clone)
    }

    /// The unqualified component `T`, or `None` if it was never bound
    ///
    /// Failures other than the missing binding itself are still errors.
    pub fn find<T: ?Sized + 'static>(&self) -> Result<Option<&T>> {
        let id = ComponentId::of::<T>();
        let Some(node) = self.storage.borrow().graph.find(id) else {
            debug!(component = %id, "optional component not bound");
            return Ok(None);
        };
        let ptr = self.resolve_node::<T>(node)?;
        // SAFETY: see `get_by_id`.
        Ok(Some(unsafe { ptr.as_ref() }))
    }

    /// Lazy handle to `T`: looked up now, constructed on first `get`
    pub fn provider<T: ?Sized + 'static>(&self) -> Result<Provider<'_, 'a, T>> {
        let id = ComponentId::of::<T>();
        let node = self.storage.borrow().graph.lookup(id)?;
        Ok(Provider {
            injector: self,
            node,
            _type: PhantomData,
        })
    }

    /// Every producer registered for the unqualified `T`
    pub fn get_collection<T: ?Sized + 'static>(&self) -> Result<Multibindings<'_, T>> {
        self.get_collection_by_id(ComponentId::of::<T>())
    }

    /// Every producer registered for `T` qualified by `A`
    pub fn get_collection_annotated<A: 'static, T: ?Sized + 'static>(
        &self,
    ) -> Result<Multibindings<'_, T>> {
        self.get_collection_by_id(ComponentId::annotated::<A, T>())
    }

    /// Every producer registered under `id`, read as `T`
    ///
    /// An identifier without producers yields an empty collection.
    pub fn get_collection_by_id<T: ?Sized + 'static>(
        &self,
        id: ComponentId,
    ) -> Result<Multibindings<'_, T>> {
        let collection = {
            let storage = &mut *self.storage.borrow_mut();
            Resolver::new(&mut storage.graph, &mut storage.arena, self.options)
                .resolve_collection(id)?
        };
        let elements = match collection {
            Some(collection) => collection.downcast::<Vec<NonNull<T>>>().map_err(|_| {
                error!(multibinding = %id, requested = type_name::<T>(), "collection type mismatch");
                Error::type_mismatch(id, type_name::<T>())
            })?,
            None => Rc::new(Vec::new()),
        };
        Ok(Multibindings {
            elements,
            _injector: PhantomData,
        })
    }

    /// Construct every binding and every multibinding collection now
    pub fn resolve_all(&self) -> Result<()> {
        let storage = &mut *self.storage.borrow_mut();
        let nodes: Vec<NodeId> = storage.graph.node_ids().collect();
        let collections = storage.graph.multibinding_ids();
        let mut resolver = Resolver::new(&mut storage.graph, &mut storage.arena, self.options);
        for node in nodes {
            resolver.resolve(node)?;
        }
        for id in collections {
            resolver.resolve_collection(id)?;
        }
        info!("all components constructed");
        Ok(())
    }

    /// Snapshot of the injector's current state
    pub fn stats(&self) -> InjectorStats {
        let storage = self.storage.borrow();
        InjectorStats {
            bindings: storage.graph.len(),
            constructed: storage.graph.constructed_count(),
            multibindings: storage.graph.multibinding_ids().len(),
            producers: storage.graph.producer_count(),
            arena_capacity: storage.arena.capacity(),
            arena_used: storage.arena.used(),
            placed: storage.arena.placed_count(),
            external: storage.arena.external_count(),
        }
    }

    /// Options the injector was built with
    pub fn options(&self) -> EngineOptions {
        self.options
    }

    fn resolve_node<T: ?Sized + 'static>(&self, node: NodeId) -> Result<NonNull<T>> {
        let storage = &mut *self.storage.borrow_mut();
        let instance = Resolver::new(&mut storage.graph, &mut storage.arena, self.options)
            .resolve(node)?;
        instance.downcast::<T>().ok_or_else(|| {
            let id = storage.graph.node(node).id();
            error!(
                component = %id,
                stored = instance.type_name(),
                requested = type_name::<T>(),
                "component requested with the wrong type"
            );
            Error::type_mismatch(id, type_name::<T>())
        })
    }
}

impl fmt::Debug for Injector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("stats", &self.stats())
            .field("options", &self.options)
            .finish()
    }
}

/// Lazily resolved handle to one component
pub struct Provider<'i, 'a, T: ?Sized + 'static> {
    injector: &'i Injector<'a>,
    node: NodeId,
    _type: PhantomData<fn() -> NonNull<T>>,
}

impl<'i, T: ?Sized + 'static> Provider<'i, '_, T> {
    /// The component, constructed on the first call
    pub fn get(&self) -> Result<&'i T> {
        let ptr = self.injector.resolve_node::<T>(self.node)?;
        // SAFETY: see `Injector::get_by_id`; `'i` borrows the injector.
        Ok(unsafe { ptr.as_ref() })
    }
}

impl<T: ?Sized + 'static> Clone for Provider<'_, '_, T> {
    fn clone(&self) -> Self {
        Self {
            injector: self.injector,
            node: self.node,
            _type: PhantomData,
        }
    }
}

impl<T: ?Sized + 'static> fmt::Debug for Provider<'_, '_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Provider<{}>({:?})", type_name::<T>(), self.node)
    }
}

/// Shared, cached collection of multibinding elements
///
/// Clones share the same cached storage.
pub struct Multibindings<'i, T: ?Sized + 'static> {
    elements: Rc<Vec<NonNull<T>>>,
    _injector: PhantomData<&'i ()>,
}

impl<'i, T: ?Sized + 'static> Multibindings<'i, T> {
    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no producer was registered
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at `index`, in registration order
    pub fn get(&self, index: usize) -> Option<&'i T> {
        // SAFETY: elements live as long as the injector borrowed by `'i`.
        self.elements.get(index).map(|ptr| unsafe { ptr.as_ref() })
    }

    /// Elements in registration order
    pub fn iter(&self) -> impl Iterator<Item = &'i T> + '_ {
        // SAFETY: see `get`.
        self.elements.iter().map(|ptr| unsafe { ptr.as_ref() })
    }

    /// Raw element pointers
    pub fn as_slice(&self) -> &[NonNull<T>] {
        &self.elements
    }

    /// Whether both handles point at the same cached collection
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.elements, &other.elements)
    }
}

impl<T: ?Sized + 'static> Clone for Multibindings<'_, T> {
    fn clone(&self) -> Self {
        Self {
            elements: Rc::clone(&self.elements),
            _injector: PhantomData,
        }
    }
}

impl<'m, 'i, T: ?Sized + 'static> IntoIterator for &'m Multibindings<'i, T> {
    type Item = &'i T;
    type IntoIter = Box<dyn Iterator<Item = &'i T> + 'm>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl<T: ?Sized + 'static> fmt::Debug for Multibindings<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Multibindings<{}>(len = {})", type_name::<T>(), self.len())
    }
}

/// Point-in-time counters of an [`Injector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InjectorStats {
    /// Registered bindings
    pub bindings: usize,
    /// Bindings whose instance is available, instance bindings included
    pub constructed: usize,
    /// Identifiers with at least one multibinding producer
    pub multibindings: usize,
    /// Multibinding producers across all identifiers
    pub producers: usize,
    /// Reserved arena bytes
    pub arena_capacity: usize,
    /// Arena bytes consumed, padding included
    pub arena_used: usize,
    /// Objects placed in the arena
    pub placed: usize,
    /// Externally allocated objects owned by the arena
    pub external: usize,
}
