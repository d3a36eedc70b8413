//! A small generic directed graph with payload-carrying edges.
//!
//! This crate is the "black box" directed-graph capability that
//! `concepts-core` treats as an external collaborator: nodes addressed
//! by a small integer index into an arena, edges carrying an arbitrary
//! payload, topological sort, strongly connected components,
//! transitive closure and transitive reduction, and subgraph
//! selection. Node payloads and edge payloads are kept in insertion
//! order inside the arena but are always indexed through a
//! [`std::collections::BTreeMap`], so iteration over nodes, edges and
//! components is deterministic and reproducible across runs given the
//! same insertion sequence and the same total order on the node
//! payload type.
#![warn(missing_docs)]

mod error;
mod reduce;
mod scc;

pub use error::GraphError;
pub use scc::{tarjan_scc, Condensation};

use fnv::FnvHashSet;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// An index into a [`DiGraph`]'s node arena.
///
/// Stable for the lifetime of the graph: node ids are never reused or
/// renumbered, even across [`DiGraph::subgraph`] or
/// [`DiGraph::condensation`] (those return fresh graphs with their own
/// id space).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A directed graph over node payloads `N` with edge payloads `E`.
///
/// `N` must be [`Ord`] so that looking a payload up by value (to avoid
/// inserting duplicate nodes) is deterministic; payload equality is
/// structural equality on `N`.
#[derive(Clone, Debug)]
pub struct DiGraph<N, E> {
    nodes: Vec<N>,
    index: BTreeMap<N, NodeId>,
    // outgoing[u] maps target node -> edge payload. A BTreeMap keeps
    // edge iteration order deterministic and gives upsert-by-target for
    // free.
    outgoing: Vec<BTreeMap<NodeId, E>>,
}

impl<N, E> Default for DiGraph<N, E> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: BTreeMap::new(),
            outgoing: Vec::new(),
        }
    }
}

impl<N: Ord + Clone, E> DiGraph<N, E> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(BTreeMap::len).sum()
    }

    /// Inserts `payload` as a node if it isn't already present and
    /// returns its id either way.
    pub fn add_node(&mut self, payload: N) -> NodeId {
        if let Some(id) = self.index.get(&payload) {
            return *id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(payload.clone());
        self.index.insert(payload, id);
        self.outgoing.push(BTreeMap::new());
        id
    }

    /// Looks up the id of a node by payload.
    pub fn node_id(&self, payload: &N) -> Option<NodeId> {
        self.index.get(payload).copied()
    }

    /// Returns the payload of a node.
    pub fn payload(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(id.idx())
    }

    /// Returns a mutable reference to the payload of a node.
    ///
    /// Mutating a payload does not update `index`, so callers must not
    /// change anything the graph uses for node identity in a way that
    /// would make two distinct nodes compare equal, or make
    /// `node_id` lookups for the old value stop resolving. This is
    /// safe for payloads like a lattice's `Concept`, whose identity
    /// lookups (`ConceptLattice::find_by_intent`) key off a field the
    /// lattice never mutates after insertion.
    pub fn payload_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.nodes.get_mut(id.idx())
    }

    /// Iterates over all node ids in arena (insertion) order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId(i as u32))
    }

    /// Iterates over `(id, payload)` pairs in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &N)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Adds an edge `src -> dst` with the given payload, overwriting
    /// any existing payload on that edge. Returns the previous
    /// payload, if any.
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId, payload: E) -> Option<E> {
        self.outgoing[src.idx()].insert(dst, payload)
    }

    /// Returns the payload of edge `src -> dst`, if it exists.
    pub fn edge(&self, src: NodeId, dst: NodeId) -> Option<&E> {
        self.outgoing.get(src.idx())?.get(&dst)
    }

    /// Returns a mutable reference to the payload of edge `src -> dst`,
    /// inserting `default()` first if the edge doesn't exist yet.
    pub fn edge_or_insert_with(&mut self, src: NodeId, dst: NodeId, default: impl FnOnce() -> E) -> &mut E {
        self.outgoing[src.idx()].entry(dst).or_insert_with(default)
    }

    /// Removes edge `src -> dst`, returning its payload if it existed.
    pub fn remove_edge(&mut self, src: NodeId, dst: NodeId) -> Option<E> {
        self.outgoing.get_mut(src.idx())?.remove(&dst)
    }

    /// True if edge `src -> dst` exists.
    pub fn has_edge(&self, src: NodeId, dst: NodeId) -> bool {
        self.edge(src, dst).is_some()
    }

    /// Iterates over `(dst, payload)` for all edges leaving `src`, in
    /// deterministic (target-id) order.
    pub fn out_edges(&self, src: NodeId) -> impl Iterator<Item = (NodeId, &E)> {
        self.outgoing[src.idx()].iter().map(|(d, e)| (*d, e))
    }

    /// Iterates over every edge in the graph as `(src, dst, payload)`,
    /// in deterministic (src id, then dst id) order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &E)> {
        self.outgoing.iter().enumerate().flat_map(|(u, out)| {
            out.iter().map(move |(v, e)| (NodeId(u as u32), *v, e))
        })
    }

    /// The set of nodes reachable from `from` by following edges,
    /// `from` itself included.
    pub fn reachable_from(&self, from: NodeId) -> BTreeSet<NodeId> {
        let mut seen: FnvHashSet<NodeId> = FnvHashSet::default();
        let mut queue = VecDeque::new();
        seen.insert(from);
        queue.push_back(from);
        while let Some(u) = queue.pop_front() {
            for (v, _) in self.out_edges(u) {
                if seen.insert(v) {
                    queue.push_back(v);
                }
            }
        }
        seen.into_iter().collect()
    }

    /// Returns the nodes in topological order, or [`GraphError::Cyclic`]
    /// if the graph has a cycle (Kahn's algorithm).
    pub fn topological_sort(&self) -> Result<Vec<NodeId>, GraphError> {
        let mut indegree = vec![0usize; self.nodes.len()];
        for (_, v, _) in self.edges() {
            indegree[v.idx()] += 1;
        }
        let mut ready: BTreeSet<NodeId> = self
            .node_ids()
            .filter(|n| indegree[n.idx()] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(&u) = ready.iter().next() {
            ready.remove(&u);
            order.push(u);
            for (v, _) in self.out_edges(u) {
                indegree[v.idx()] -= 1;
                if indegree[v.idx()] == 0 {
                    ready.insert(v);
                }
            }
        }
        if order.len() == self.nodes.len() {
            Ok(order)
        } else {
            Err(GraphError::Cyclic)
        }
    }

    /// Builds the induced subgraph on `keep`: edges whose endpoints are
    /// both in `keep` are carried over with their payload cloned; node
    /// ids are renumbered in ascending order of the original ids, so
    /// relative order among kept nodes is preserved.
    pub fn subgraph(&self, keep: &BTreeSet<NodeId>) -> DiGraph<N, E>
    where
        E: Clone,
    {
        let mut out = DiGraph::new();
        for &id in keep {
            if let Some(p) = self.payload(id) {
                out.add_node(p.clone());
            }
        }
        for &u in keep {
            for (v, payload) in self.out_edges(u) {
                if keep.contains(&v) {
                    let nu = out.node_id(self.payload(u).unwrap()).unwrap();
                    let nv = out.node_id(self.payload(v).unwrap()).unwrap();
                    out.add_edge(nu, nv, payload.clone());
                }
            }
        }
        out
    }
}
