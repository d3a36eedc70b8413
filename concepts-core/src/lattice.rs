//! The concept lattice: a Hasse diagram whose nodes are
//! [`Concept`]s, plus the inclusion/irreducibles/join/meet reductions
//! over it.
use std::collections::{BTreeMap, BTreeSet};

use concepts_graph::{DiGraph, NodeId};

use crate::concept::Concept;

/// A unique, always-distinct node label: either a real ground-set
/// element or an anonymous placeholder. `get_join_reduction` and its
/// siblings hand back a lattice whose nodes carry one of these,
/// because [`DiGraph`] indexes nodes by payload value and a bare
/// `Option<T>` would collapse every anonymous node onto the single
/// `None` value.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Label<T: Ord> {
    /// The first element of a node's reduced intent or extent.
    Named(T),
    /// A node whose reduced intent and extent were both empty.
    Anonymous(u64),
}

/// The Hasse diagram of a concept lattice: a node per concept, an
/// edge `n -> successor` for every immediate upper cover.
#[derive(Clone, Debug)]
pub struct ConceptLattice<T: Ord + Clone> {
    graph: DiGraph<Concept<T>, ()>,
    bottom: Option<NodeId>,
}

impl<T: Ord + Clone> Default for ConceptLattice<T> {
    fn default() -> Self {
        Self {
            graph: DiGraph::new(),
            bottom: None,
        }
    }
}

impl<T: Ord + Clone> ConceptLattice<T> {
    /// An empty lattice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `concept` as a node if it isn't already present
    /// (matched by intent), returning its id and whether it was new.
    /// The first node ever added becomes the recorded bottom.
    pub fn add_node(&mut self, concept: Concept<T>) -> (NodeId, bool) {
        let before = self.graph.node_count();
        let id = self.graph.add_node(concept);
        let is_new = self.graph.node_count() > before;
        if self.bottom.is_none() {
            self.bottom = Some(id);
        }
        (id, is_new)
    }

    /// Looks a node up by its intent.
    pub fn find_by_intent(&self, intent: &BTreeSet<T>) -> Option<NodeId> {
        self.graph.node_id(&Concept::intent_only(intent.clone()))
    }

    /// Adds a Hasse edge `lower -> upper`.
    pub fn add_edge(&mut self, lower: NodeId, upper: NodeId) {
        self.graph.add_edge(lower, upper, ());
    }

    /// The bottom concept (`closure(∅)`), if any node has been added.
    pub fn bottom(&self) -> Option<NodeId> {
        self.bottom
    }

    /// The top concept: the unique sink of the Hasse diagram (a node
    /// with no outgoing edge). Arbitrary but deterministic (the
    /// lowest-id sink) if more than one node happens to be sink-like;
    /// a diagram built by [`crate::diagram_lattice`] always has
    /// exactly one.
    pub fn top(&self) -> Option<NodeId> {
        let succs = self.successors();
        self.node_ids().find(|n| !succs.contains_key(n))
    }

    /// The intent of a node.
    pub fn intent(&self, n: NodeId) -> Option<&BTreeSet<T>> {
        self.graph.payload(n)?.intent.as_ref()
    }

    /// The extent of a node.
    pub fn extent(&self, n: NodeId) -> Option<&BTreeSet<T>> {
        self.graph.payload(n)?.extent.as_ref()
    }

    /// Replaces a node's concept outright. Used by a formal-context
    /// caller to fill in the extent half that the generic diagram
    /// construction leaves `None`.
    pub fn set_concept(&mut self, n: NodeId, concept: Concept<T>) {
        if let Some(c) = self.graph.payload_mut(n) {
            *c = concept;
        }
    }

    fn set_intent(&mut self, n: NodeId, intent: BTreeSet<T>) {
        if let Some(c) = self.graph.payload_mut(n) {
            c.intent = Some(intent);
        }
    }

    fn set_extent(&mut self, n: NodeId, extent: BTreeSet<T>) {
        if let Some(c) = self.graph.payload_mut(n) {
            c.extent = Some(extent);
        }
    }

    /// Every node id.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_ids()
    }

    /// Every Hasse edge `(lower, upper)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.graph.edges().map(|(u, v, _)| (u, v))
    }

    fn predecessors(&self) -> BTreeMap<NodeId, Vec<NodeId>> {
        let mut preds: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        for (u, v, _) in self.graph.edges() {
            preds.entry(v).or_default().push(u);
        }
        preds
    }

    fn successors(&self) -> BTreeMap<NodeId, Vec<NodeId>> {
        let mut succs: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        for (u, v, _) in self.graph.edges() {
            succs.entry(u).or_default().push(v);
        }
        succs
    }

    /// Keeps only concepts whose extent is at least `threshold` times
    /// the size of the bottom concept's extent, preserving induced
    /// edges. A node with no extent recorded (the pure
    /// implicational-system case, where there is no object universe
    /// to support an extent) is always kept.
    ///
    /// If the original top concept fails the threshold, it is added
    /// back as a sentinel and every node newly left without a
    /// successor (because its only path upward went through a
    /// filtered-out node) is connected to it, so the result is still a
    /// lattice with a single top rather than a forest of maximal
    /// elements.
    pub fn iceberg(&self, threshold: f64) -> ConceptLattice<T> {
        let Some(bottom) = self.bottom else {
            return self.clone();
        };
        let bottom_size = self.extent(bottom).map(BTreeSet::len).unwrap_or(0).max(1);
        let keep: BTreeSet<NodeId> = self
            .node_ids()
            .filter(|&n| match self.extent(n) {
                Some(extent) => extent.len() as f64 / bottom_size as f64 >= threshold,
                None => true,
            })
            .collect();
        let original_top = self.top();

        let mut out = ConceptLattice::new();
        let mut map = BTreeMap::new();
        for &n in &keep {
            let (id, _) = out.add_node(self.graph.payload(n).unwrap().clone());
            map.insert(n, id);
        }
        for (u, v, _) in self.graph.edges() {
            if keep.contains(&u) && keep.contains(&v) {
                out.add_edge(map[&u], map[&v]);
            }
        }

        if let Some(top_id) = original_top {
            if !keep.contains(&top_id) {
                let (sentinel, _) = out.add_node(self.graph.payload(top_id).unwrap().clone());
                let out_succs = out.successors();
                let newly_exposed_sinks: Vec<NodeId> = out
                    .node_ids()
                    .filter(|&n| n != sentinel && !out_succs.contains_key(&n))
                    .collect();
                for sink in newly_exposed_sinks {
                    out.add_edge(sink, sentinel);
                }
            }
        }
        out
    }

    /// Reduces labels in place: each node's intent is replaced by
    /// what it adds beyond its predecessors' (original) intents,
    /// walking the diagram top-down; each node's extent is replaced
    /// by what it adds beyond its successors' (original) extents,
    /// walking bottom-up.
    ///
    /// A Hasse diagram produced by [`crate::diagram_lattice`] is
    /// always acyclic, so this convenience form silently no-ops on a
    /// cyclic graph; [`Self::try_make_inclusion_reduction`] is the
    /// fallible form for a lattice assembled by some other means.
    pub fn make_inclusion_reduction(&mut self) {
        let _ = self.try_make_inclusion_reduction();
    }

    /// As [`Self::make_inclusion_reduction`], but reports a cyclic
    /// diagram as [`crate::error::ConceptsError::Cyclic`] instead of
    /// silently leaving the lattice unchanged -- a structural
    /// precondition violation on a graph that isn't a valid Hasse
    /// diagram of anything.
    pub fn try_make_inclusion_reduction(&mut self) -> Result<(), crate::error::ConceptsError> {
        let topo = self
            .graph
            .topological_sort()
            .map_err(|_| crate::error::ConceptsError::Cyclic)?;
        let orig_intents: BTreeMap<NodeId, BTreeSet<T>> = topo
            .iter()
            .map(|&n| (n, self.intent(n).cloned().unwrap_or_default()))
            .collect();
        let orig_extents: BTreeMap<NodeId, BTreeSet<T>> = topo
            .iter()
            .map(|&n| (n, self.extent(n).cloned().unwrap_or_default()))
            .collect();
        let preds = self.predecessors();
        let succs = self.successors();

        for &n in topo.iter().rev() {
            let mut reduced = orig_intents[&n].clone();
            for p in preds.get(&n).into_iter().flatten() {
                reduced = reduced.difference(&orig_intents[p]).cloned().collect();
            }
            self.set_intent(n, reduced);
        }
        for &n in topo.iter() {
            let mut reduced = orig_extents[&n].clone();
            for s in succs.get(&n).into_iter().flatten() {
                reduced = reduced.difference(&orig_extents[s]).cloned().collect();
            }
            self.set_extent(n, reduced);
        }
        Ok(())
    }

    /// After [`Self::make_inclusion_reduction`], clears the intent of
    /// every node that isn't join-irreducible (doesn't have exactly
    /// one predecessor) and the extent of every node that isn't
    /// meet-irreducible (doesn't have exactly one successor).
    pub fn make_irreducibles_reduction(&mut self) {
        self.make_inclusion_reduction();
        let preds = self.predecessors();
        let succs = self.successors();
        let ids: Vec<NodeId> = self.node_ids().collect();
        for n in ids {
            if preds.get(&n).map(Vec::len).unwrap_or(0) != 1 {
                self.set_intent(n, BTreeSet::new());
            }
            if succs.get(&n).map(Vec::len).unwrap_or(0) != 1 {
                self.set_extent(n, BTreeSet::new());
            }
        }
    }

    fn relabelled(&self, pick: impl Fn(&Concept<T>) -> Option<T>) -> DiGraph<Label<T>, ()> {
        let mut out: DiGraph<Label<T>, ()> = DiGraph::new();
        let mut next_anon = 0u64;
        let mut map = BTreeMap::new();
        for (id, concept) in self.graph.nodes() {
            let label = match pick(concept) {
                Some(e) => Label::Named(e),
                None => {
                    let l = Label::Anonymous(next_anon);
                    next_anon += 1;
                    l
                }
            };
            map.insert(id, out.add_node(label));
        }
        for (u, v, _) in self.graph.edges() {
            out.add_edge(map[&u], map[&v], ());
        }
        out
    }

    /// A generic lattice whose nodes carry the first element of each
    /// node's [`Self::make_inclusion_reduction`]-reduced intent (or a
    /// fresh anonymous value if that intent is empty), with all edges
    /// preserved.
    pub fn get_join_reduction(&self) -> DiGraph<Label<T>, ()> {
        let mut reduced = self.clone();
        reduced.make_inclusion_reduction();
        reduced.relabelled(|c| c.intent.as_ref().and_then(|s| s.iter().next().cloned()))
    }

    /// As [`Self::get_join_reduction`], but on reduced extents.
    pub fn get_meet_reduction(&self) -> DiGraph<Label<T>, ()> {
        let mut reduced = self.clone();
        reduced.make_inclusion_reduction();
        reduced.relabelled(|c| c.extent.as_ref().and_then(|s| s.iter().next().cloned()))
    }

    /// As the join/meet reductions, but first applies
    /// [`Self::make_irreducibles_reduction`] and prefers a node's
    /// (now irreducibles-only) intent label, falling back to its
    /// extent label.
    pub fn get_irreducibles_reduction(&self) -> DiGraph<Label<T>, ()> {
        let mut reduced = self.clone();
        reduced.make_irreducibles_reduction();
        reduced.relabelled(|c| {
            c.intent
                .as_ref()
                .and_then(|s| s.iter().next().cloned())
                .or_else(|| c.extent.as_ref().and_then(|s| s.iter().next().cloned()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> ConceptLattice<char> {
        // bottom {} -- {a} -- {a,b} (top), extents decreasing the
        // other way: {o1,o2,o3} -- {o1,o2} -- {o1}
        let mut lat = ConceptLattice::new();
        let (bottom, _) = lat.add_node(Concept::new(
            BTreeSet::new(),
            ['1', '2', '3'].into_iter().collect(),
        ));
        let (mid, _) = lat.add_node(Concept::new(
            ['a'].into_iter().collect(),
            ['1', '2'].into_iter().collect(),
        ));
        let (top, _) = lat.add_node(Concept::new(
            ['a', 'b'].into_iter().collect(),
            ['1'].into_iter().collect(),
        ));
        lat.add_edge(bottom, mid);
        lat.add_edge(mid, top);
        lat
    }

    #[test]
    fn inclusion_reduction_leaves_only_the_incremental_label() {
        let mut lat = chain();
        lat.make_inclusion_reduction();
        let bottom = lat.bottom().unwrap();
        let mid = lat
            .node_ids()
            .find(|&n| lat.intent(n) == Some(&['a'].into_iter().collect()))
            .unwrap();
        assert_eq!(lat.intent(bottom), Some(&BTreeSet::new()));
        assert_eq!(lat.extent(bottom), Some(&BTreeSet::new()));
        assert_eq!(lat.intent(mid), Some(&['a'].into_iter().collect()));
    }

    #[test]
    fn iceberg_keeps_only_dense_enough_concepts() {
        // bottom {1,2,3,4} -- low {1} -- top {1,2}: `low`'s extent is
        // the only one under the 0.5 * 4 = 2 threshold, and it isn't
        // the top, so it is simply dropped, no sentinel involved.
        let mut lat = ConceptLattice::new();
        let (bottom, _) = lat.add_node(Concept::new(
            BTreeSet::new(),
            ['1', '2', '3', '4'].into_iter().collect(),
        ));
        let (low, _) = lat.add_node(Concept::new(
            ['a'].into_iter().collect(),
            ['1'].into_iter().collect(),
        ));
        let (top, _) = lat.add_node(Concept::new(
            ['a', 'b'].into_iter().collect(),
            ['1', '2'].into_iter().collect(),
        ));
        lat.add_edge(bottom, low);
        lat.add_edge(low, top);

        let filtered = lat.iceberg(0.5);
        assert_eq!(filtered.graph.node_count(), 2);
        assert!(filtered
            .node_ids()
            .all(|n| filtered.intent(n) != Some(&['a'].into_iter().collect())));
    }

    #[test]
    fn iceberg_re_adds_a_dropped_top_as_a_connected_sentinel() {
        let lat = chain();
        let filtered = lat.iceberg(0.5);
        // The dropped top comes back as a sentinel, and the node that
        // lost its only successor (mid) is wired up to it, so the
        // result is still a single-top lattice, not two unconnected
        // maximal elements.
        assert_eq!(filtered.graph.node_count(), lat.graph.node_count());
        let top = filtered.top().unwrap();
        assert_eq!(filtered.intent(top), Some(&['a', 'b'].into_iter().collect()));
        let mid = filtered
            .node_ids()
            .find(|&n| filtered.intent(n) == Some(&['a'].into_iter().collect()))
            .unwrap();
        assert!(filtered.edges().any(|(u, v)| u == mid && v == top));
    }

    #[test]
    fn top_is_the_sole_sink_of_a_chain() {
        let lat = chain();
        let top = lat.top().unwrap();
        assert_eq!(lat.intent(top), Some(&['a', 'b'].into_iter().collect()));
    }

    #[test]
    fn try_make_inclusion_reduction_reports_a_cycle() {
        let mut lat = ConceptLattice::new();
        let (a, _) = lat.add_node(Concept::intent_only(['a'].into_iter().collect()));
        let (b, _) = lat.add_node(Concept::intent_only(['b'].into_iter().collect()));
        lat.add_edge(a, b);
        lat.add_edge(b, a);
        assert_eq!(
            lat.try_make_inclusion_reduction(),
            Err(crate::error::ConceptsError::Cyclic)
        );
    }

    #[test]
    fn join_reduction_preserves_edge_count() {
        let lat = chain();
        let joined = lat.get_join_reduction();
        assert_eq!(joined.edge_count(), lat.graph.edge_count());
        assert_eq!(joined.node_count(), lat.graph.node_count());
    }
}
