//! Resolution engine
//!
//! Walks the graph depth-first from a requested node. Dependencies are
//! resolved left to right before the node's own creation function runs, so
//! the arena records destructors in construction-completion order.
//!
//! State transitions of a node:
//!
//! ```text
//! Pending --resolve--> InProgress --ok--> Constructed
//!    ^                     |  \
//!    +--dependency error---+   +--own error--> Poisoned
//! ```
//!
//! A panic while a node is `InProgress` poisons it before unwinding further.

use crate::arena::Arena;
use crate::binding::Creator;
use crate::context::{CreateContext, ResolvedDependency};
use crate::graph::{Edge, GraphStore, NodeId, NodeState};
use crate::instance::InstancePtr;
use std::any::Any;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use tracing::{debug, error, trace};
use wirebox_domain::{ComponentId, EngineOptions, Error, Result};

/// One resolution pass over a graph and its arena
pub(crate) struct Resolver<'r, 'a> {
    graph: &'r mut GraphStore<'a>,
    arena: &'r mut Arena,
    max_depth: usize,
    depth: usize,
}

impl<'r, 'a> Resolver<'r, 'a> {
    pub(crate) fn new(
        graph: &'r mut GraphStore<'a>,
        arena: &'r mut Arena,
        options: EngineOptions,
    ) -> Self {
        Self {
            graph,
            arena,
            max_depth: options.max_resolution_depth,
            depth: 0,
        }
    }

    /// Memoized instance of `node`, constructing it and its dependencies first
    pub(crate) fn resolve(&mut self, node: NodeId) -> Result<InstancePtr> {
        let id = self.graph.node(node).id();
        match &self.graph.node(node).state {
            NodeState::Constructed(instance) => {
                trace!(component = %id, "memoized instance");
                return Ok(*instance);
            }
            NodeState::InProgress => {
                error!(component = %id, "re-entrant resolution, the binding graph has a cycle");
                debug_assert!(false, "re-entrant resolution of {id}");
                return Err(Error::reentrant(id));
            }
            NodeState::Poisoned => {
                error!(component = %id, "requested after a failed construction");
                return Err(Error::poisoned(id));
            }
            NodeState::Pending(_) => {}
        }

        if self.depth >= self.max_depth {
            error!(component = %id, limit = self.max_depth, "resolution depth exceeded");
            return Err(Error::depth_exceeded(id, self.max_depth));
        }

        let create = match mem::replace(&mut self.graph.node_mut(node).state, NodeState::InProgress)
        {
            NodeState::Pending(create) => create,
            other => {
                self.graph.node_mut(node).state = other;
                return Err(Error::internal(format!("{id} left the pending state unexpectedly")));
            }
        };

        let depth = self.depth;
        match panic::catch_unwind(AssertUnwindSafe(|| self.construct(node, id, create))) {
            Ok(result) => result,
            Err(payload) => {
                error!(component = %id, "creation panicked, binding poisoned");
                self.depth = depth;
                self.graph.node_mut(node).state = NodeState::Poisoned;
                panic::resume_unwind(payload)
            }
        }
    }

    fn construct(
        &mut self,
        node: NodeId,
        id: ComponentId,
        create: Creator<'a>,
    ) -> Result<InstancePtr> {
        let edges: Vec<Edge> = self.graph.neighbors(node).to_vec();
        self.depth += 1;
        let dependencies = self.resolve_dependencies(&edges);
        self.depth -= 1;
        let dependencies = match dependencies {
            Ok(dependencies) => dependencies,
            Err(e) => {
                self.graph.node_mut(node).state = NodeState::Pending(create);
                return Err(e);
            }
        };

        let result = create(&mut CreateContext::new(id, &dependencies, self.arena));
        match result {
            Ok(instance) => {
                debug!(
                    component = %id,
                    kind = %self.graph.node(node).kind(),
                    dependencies = dependencies.len(),
                    "component constructed"
                );
                self.graph.node_mut(node).state = NodeState::Constructed(instance);
                Ok(instance)
            }
            Err(e) => {
                error!(component = %id, error = %e, "component construction failed");
                self.graph.node_mut(node).state = NodeState::Poisoned;
                Err(e)
            }
        }
    }

    fn resolve_dependencies(&mut self, edges: &[Edge]) -> Result<Vec<ResolvedDependency>> {
        let mut resolved = Vec::with_capacity(edges.len());
        for edge in edges {
            let target = self.graph.resolve_edge(edge)?;
            let instance = self.resolve(target)?;
            resolved.push(ResolvedDependency {
                id: edge.target(),
                instance,
            });
        }
        Ok(resolved)
    }

    /// Cached collection of `id`, building it on first access
    ///
    /// `None` when no producer was registered under `id`.
    pub(crate) fn resolve_collection(&mut self, id: ComponentId) -> Result<Option<Rc<dyn Any>>> {
        let Some(set) = self.graph.multibinding_set(id) else {
            trace!(multibinding = %id, "no producers registered");
            return Ok(None);
        };
        if let Some(cache) = &set.cache {
            trace!(multibinding = %id, "cached collection");
            return Ok(Some(Rc::clone(cache)));
        }
        let producers = set.elements.clone();
        let collect = set.collect;

        let mut instances = Vec::with_capacity(producers.len());
        for producer in producers {
            instances.push(self.resolve(producer)?);
        }
        let collection = collect(id, &instances)?;

        if let Some(set) = self.graph.multibinding_set_mut(id) {
            set.cache = Some(Rc::clone(&collection));
        }
        debug!(multibinding = %id, elements = instances.len(), "collection cached");
        Ok(Some(collection))
    }
}
