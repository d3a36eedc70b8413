//! The dependency graph Bordat's algorithm builds alongside the
//! concept lattice: edges between not-yet-closed elements, labelled
//! by an antichain of the minimal generator sets that forced the
//! dependency.
use std::collections::BTreeSet;

use concepts_graph::{DiGraph, NodeId};

/// `v -> u` labelled by the antichain of minimal `W` such that adding
/// `v` to some frontier `F` with `W ⊆ F` puts `u` in `closure(F ∪
/// {v})`.
///
/// Insertion keeps each edge's label an antichain under inclusion: a
/// `W` dominated by (a superset of) an already-recorded, smaller `W'`
/// is refused, and inserting a `W` that dominates existing entries
/// drops them.
#[derive(Clone, Debug)]
pub struct DependencyGraph<T: Ord + Clone> {
    graph: DiGraph<T, BTreeSet<BTreeSet<T>>>,
}

impl<T: Ord + Clone> DependencyGraph<T> {
    /// A dependency graph over `ground_set`, with no edges yet.
    pub fn new(ground_set: impl IntoIterator<Item = T>) -> Self {
        let mut graph = DiGraph::new();
        for e in ground_set {
            graph.add_node(e);
        }
        Self { graph }
    }

    /// The node id of a ground-set element.
    pub fn node_id(&self, e: &T) -> Option<NodeId> {
        self.graph.node_id(e)
    }

    /// Records that reaching `v`'s inclusion in a frontier's closure
    /// (given the frontier already contains `w`) also forces `u` in,
    /// maintaining the antichain invariant described on [`Self`].
    pub fn insert(&mut self, v: NodeId, u: NodeId, w: BTreeSet<T>) {
        if let Some(existing) = self.graph.edge(v, u) {
            if existing.iter().any(|e| e.is_subset(&w)) {
                return;
            }
        }
        let payload = self.graph.edge_or_insert_with(v, u, BTreeSet::new);
        payload.retain(|e| !(w.is_subset(e) && *e != w));
        payload.insert(w);
    }

    /// Every edge, as `(v, u, antichain-of-minimal-generators)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &BTreeSet<BTreeSet<T>>)> {
        self.graph.edges()
    }

    /// The antichain labelling edge `v -> u`, if it exists.
    pub fn payload(&self, v: NodeId, u: NodeId) -> Option<&BTreeSet<BTreeSet<T>>> {
        self.graph.edge(v, u)
    }
}
