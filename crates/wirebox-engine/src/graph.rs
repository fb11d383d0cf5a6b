//! Dependency graph store
//!
//! Built once from the registered descriptors. Every binding becomes a
//! [`Node`] addressed by a dense [`NodeId`]; every declared dependency
//! becomes an [`Edge`] whose target node is looked up here, at build time,
//! so traversal never hashes an identifier again.
//!
//! Multibinding producers are stored as nodes too. They are not reachable
//! through [`GraphStore::lookup`], only through their collection set.

use crate::arena::ArenaCapacity;
use crate::binding::{Binding, BindingKind, Creator, Recipe};
use crate::instance::InstancePtr;
use crate::multibinding::{CollectFn, Multibinding};
use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, error};
use wirebox_domain::{ComponentId, Error, Result};

/// Stable handle to a node of one [`GraphStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its store
    pub fn index(self) -> usize {
        self.0
    }
}

/// A declared dependency, with its target node resolved at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    target: ComponentId,
    node: Option<NodeId>,
}

impl Edge {
    /// Identifier the dependency was declared with
    pub fn target(&self) -> ComponentId {
        self.target
    }

    /// Target node, `None` when nothing was bound under the identifier
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }
}

/// Construction state of one node
pub(crate) enum NodeState<'a> {
    /// Not built yet; holds the creation function
    Pending(Creator<'a>),
    /// On the current resolution path
    InProgress,
    /// Terminal; the memoized instance
    Constructed(InstancePtr),
    /// The creation function failed and was consumed
    Poisoned,
}

impl NodeState<'_> {
    fn label(&self) -> &'static str {
        match self {
            Self::Pending(_) => "pending",
            Self::InProgress => "in progress",
            Self::Constructed(_) => "constructed",
            Self::Poisoned => "poisoned",
        }
    }
}

/// One binding or multibinding producer
pub struct Node<'a> {
    id: ComponentId,
    kind: BindingKind,
    edges: Box<[Edge]>,
    pub(crate) state: NodeState<'a>,
}

impl<'a> Node<'a> {
    fn new(
        id: ComponentId,
        kind: BindingKind,
        recipe: Recipe<'a>,
        index: &HashMap<ComponentId, NodeId>,
    ) -> Self {
        let edges = recipe
            .dependencies()
            .iter()
            .map(|&target| Edge {
                target,
                node: index.get(&target).copied(),
            })
            .collect();
        let state = match recipe {
            Recipe::Instance(instance) => NodeState::Constructed(instance),
            Recipe::Create { create, .. } => NodeState::Pending(create),
        };
        Self {
            id,
            kind,
            edges,
            state,
        }
    }

    /// Identifier the node was registered under
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Construction strategy
    pub fn kind(&self) -> BindingKind {
        self.kind
    }

    /// Whether the instance is memoized
    pub fn is_constructed(&self) -> bool {
        matches!(self.state, NodeState::Constructed(_))
    }

    /// Whether an earlier construction attempt failed
    pub fn is_poisoned(&self) -> bool {
        matches!(self.state, NodeState::Poisoned)
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("edges", &self.edges)
            .field("state", &self.state.label())
            .finish()
    }
}

/// Producers and cached collection of one multibinding identifier
pub(crate) struct MultibindingSet {
    pub(crate) elements: Vec<NodeId>,
    pub(crate) collect: CollectFn,
    pub(crate) cache: Option<Rc<dyn Any>>,
}

/// Identifier-to-node map plus the nodes themselves
pub struct GraphStore<'a> {
    nodes: Vec<Node<'a>>,
    bindings: usize,
    index: HashMap<ComponentId, NodeId>,
    multibindings: HashMap<ComponentId, MultibindingSet>,
}

impl<'a> GraphStore<'a> {
    /// Build the store and compute the arena reservation for it
    ///
    /// Fails with `DuplicateBinding` if two bindings share an identifier.
    /// Dependencies on unbound identifiers are accepted here and reported
    /// when a request actually walks the edge.
    pub fn build(
        bindings: Vec<Binding<'a>>,
        multibindings: Vec<Multibinding<'a>>,
    ) -> Result<(Self, ArenaCapacity)> {
        let mut capacity = ArenaCapacity::new();
        let mut index = HashMap::with_capacity(bindings.len());

        for (position, binding) in bindings.iter().enumerate() {
            match index.entry(binding.id()) {
                Entry::Occupied(_) => {
                    error!(component = %binding.id(), "component bound more than once");
                    return Err(Error::duplicate(binding.id()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(NodeId(position));
                }
            }
        }

        let mut nodes = Vec::with_capacity(bindings.len() + multibindings.len());
        for binding in bindings {
            let (id, kind, recipe) = binding.into_parts();
            if let Some(layout) = recipe.allocation() {
                capacity.reserve(layout);
            }
            nodes.push(Node::new(id, kind, recipe, &index));
        }
        let binding_count = nodes.len();

        let mut sets: HashMap<ComponentId, MultibindingSet> = HashMap::new();
        for multibinding in multibindings {
            let (id, kind, recipe, collect) = multibinding.into_parts();
            if let Some(layout) = recipe.allocation() {
                capacity.reserve(layout);
            }
            let node = NodeId(nodes.len());
            nodes.push(Node::new(id, kind, recipe, &index));
            sets.entry(id)
                .or_insert_with(|| MultibindingSet {
                    elements: Vec::new(),
                    collect,
                    cache: None,
                })
                .elements
                .push(node);
        }

        debug!(
            bindings = binding_count,
            multibindings = sets.len(),
            producers = nodes.len() - binding_count,
            arena_bytes = capacity.bytes(),
            "dependency graph built"
        );

        Ok((
            Self {
                nodes,
                bindings: binding_count,
                index,
                multibindings: sets,
            },
            capacity,
        ))
    }

    /// Node bound under `id`
    pub fn lookup(&self, id: ComponentId) -> Result<NodeId> {
        self.find(id).ok_or_else(|| {
            error!(component = %id, "no binding registered");
            Error::unbound(id)
        })
    }

    /// Node bound under `id`, if any
    pub fn find(&self, id: ComponentId) -> Option<NodeId> {
        self.index.get(&id).copied()
    }

    /// Declared dependencies of `node`, in declaration order
    pub fn neighbors(&self, node: NodeId) -> &[Edge] {
        &self.nodes[node.0].edges
    }

    /// Target node of `edge`, without hashing
    pub fn resolve_edge(&self, edge: &Edge) -> Result<NodeId> {
        edge.node.ok_or_else(|| {
            error!(dependency = %edge.target, "dependency has no binding");
            Error::unbound(edge.target)
        })
    }

    /// The node behind `id`
    ///
    /// # Panics
    ///
    /// If `id` was produced by a different store.
    pub fn node(&self, id: NodeId) -> &Node<'a> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<'a> {
        &mut self.nodes[id.0]
    }

    /// Number of bindings, multibinding producers excluded
    pub fn len(&self) -> usize {
        self.bindings
    }

    /// Whether no binding is registered
    pub fn is_empty(&self) -> bool {
        self.bindings == 0
    }

    /// Handles of every binding node, in registration order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.bindings).map(NodeId)
    }

    /// Identifiers that have at least one multibinding producer
    pub fn multibinding_ids(&self) -> Vec<ComponentId> {
        let mut ids: Vec<ComponentId> = self.multibindings.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Number of producers registered under `id`
    pub fn multibinding_len(&self, id: ComponentId) -> usize {
        self.multibindings.get(&id).map_or(0, |set| set.elements.len())
    }

    /// Total number of multibinding producers
    pub fn producer_count(&self) -> usize {
        self.nodes.len() - self.bindings
    }

    /// Bindings whose instance is memoized, instance bindings included
    pub fn constructed_count(&self) -> usize {
        self.nodes[..self.bindings]
            .iter()
            .filter(|node| node.is_constructed())
            .count()
    }

    pub(crate) fn multibinding_set(&self, id: ComponentId) -> Option<&MultibindingSet> {
        self.multibindings.get(&id)
    }

    pub(crate) fn multibinding_set_mut(&mut self, id: ComponentId) -> Option<&mut MultibindingSet> {
        self.multibindings.get_mut(&id)
    }
}

impl fmt::Debug for GraphStore<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphStore")
            .field("bindings", &self.bindings)
            .field("producers", &self.producer_count())
            .field("multibindings", &self.multibindings.len())
            .finish_non_exhaustive()
    }
}
