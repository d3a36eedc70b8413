//! Transitive closure and transitive reduction.
use crate::scc::tarjan_scc;
use crate::{DiGraph, NodeId};
use std::collections::BTreeMap;

impl<N: Ord + Clone, E> DiGraph<N, E> {
    /// The transitive closure: an edge `u -> v` (payload `()`) exists
    /// in the result iff `v` is reachable from `u` along a path of
    /// length >= 1 in `self`.
    pub fn transitive_closure(&self) -> DiGraph<N, ()> {
        let mut out: DiGraph<N, ()> = DiGraph::new();
        for (_, n) in self.nodes() {
            out.add_node(n.clone());
        }
        for u in self.node_ids() {
            let nu = out.node_id(self.payload(u).unwrap()).unwrap();
            for v in self.reachable_from(u) {
                if v != u {
                    let nv = out.node_id(self.payload(v).unwrap()).unwrap();
                    out.add_edge(nu, nv, ());
                }
            }
        }
        out
    }

    /// The transitive reduction: the minimal edge set whose transitive
    /// closure equals that of `self`.
    ///
    /// For a DAG this is the textbook reduction (drop `u -> v` whenever
    /// some other out-neighbour `w` of `u` already reaches `v`). A
    /// general digraph is first condensed into its strongly connected
    /// components (cycles can't be reduced by dropping edges without
    /// breaking strong connectivity, so reduction only applies to the
    /// acyclic condensation); the condensation DAG is reduced, then
    /// each strongly connected component with more than one member is
    /// re-expanded into a single cycle through all its members (in
    /// arena order), which is the minimal edge set preserving that
    /// component's strong connectivity.
    pub fn transitive_reduction(&self) -> DiGraph<N, ()> {
        let cond = tarjan_scc(self);
        let cond_reduced = reduce_dag(&cond.graph);

        let mut out: DiGraph<N, ()> = DiGraph::new();
        for (_, n) in self.nodes() {
            out.add_node(n.clone());
        }

        // Cross-component edges: keep one representative original edge
        // per reduced condensation edge, choosing the lexicographically
        // smallest endpoint pair for determinism.
        for (cu, cv, _) in cond_reduced.edges() {
            let mut best: Option<(NodeId, NodeId)> = None;
            for (u, v, _) in self.edges() {
                if cond.component_of[&u] == *cond_reduced.payload(cu).unwrap()
                    && cond.component_of[&v] == *cond_reduced.payload(cv).unwrap()
                {
                    best = Some(match best {
                        None => (u, v),
                        Some((bu, bv)) if (u.0, v.0) < (bu.0, bv.0) => (u, v),
                        Some(b) => b,
                    });
                }
            }
            if let Some((u, v)) = best {
                let nu = out.node_id(self.payload(u).unwrap()).unwrap();
                let nv = out.node_id(self.payload(v).unwrap()).unwrap();
                out.add_edge(nu, nv, ());
            }
        }

        // Within-component edges: a minimal cycle through all members.
        for component in &cond.sccs {
            if component.len() < 2 {
                continue;
            }
            let mut members = component.clone();
            members.sort_by_key(|n| n.0);
            for i in 0..members.len() {
                let u = members[i];
                let v = members[(i + 1) % members.len()];
                let nu = out.node_id(self.payload(u).unwrap()).unwrap();
                let nv = out.node_id(self.payload(v).unwrap()).unwrap();
                out.add_edge(nu, nv, ());
            }
        }

        out
    }
}

/// Standard DAG transitive reduction: drop `u -> v` if some other
/// out-neighbour of `u` reaches `v`.
fn reduce_dag<N: Ord + Clone>(g: &DiGraph<N, ()>) -> DiGraph<N, ()> {
    let reach: BTreeMap<NodeId, std::collections::BTreeSet<NodeId>> =
        g.node_ids().map(|n| (n, g.reachable_from(n))).collect();
    let mut out: DiGraph<N, ()> = DiGraph::new();
    for (_, n) in g.nodes() {
        out.add_node(n.clone());
    }
    for u in g.node_ids() {
        let direct: Vec<NodeId> = g.out_edges(u).map(|(v, _)| v).collect();
        for &v in &direct {
            let redundant = direct.iter().any(|&w| w != v && reach[&w].contains(&v));
            if !redundant {
                let nu = out.node_id(g.payload(u).unwrap()).unwrap();
                let nv = out.node_id(g.payload(v).unwrap()).unwrap();
                out.add_edge(nu, nv, ());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduction_of_a_diamond_drops_the_shortcut() {
        // a -> b -> d, a -> c -> d, a -> d (shortcut)
        let mut g: DiGraph<char, ()> = DiGraph::new();
        let a = g.add_node('a');
        let b = g.add_node('b');
        let c = g.add_node('c');
        let d = g.add_node('d');
        g.add_edge(a, b, ());
        g.add_edge(a, c, ());
        g.add_edge(b, d, ());
        g.add_edge(c, d, ());
        g.add_edge(a, d, ());
        let reduced = g.transitive_reduction();
        assert!(!reduced.has_edge(a, d));
        assert!(reduced.has_edge(a, b));
        assert!(reduced.has_edge(b, d));
    }

    #[test]
    fn closure_of_a_chain_is_complete() {
        let mut g: DiGraph<char, ()> = DiGraph::new();
        let a = g.add_node('a');
        let b = g.add_node('b');
        let c = g.add_node('c');
        g.add_edge(a, b, ());
        g.add_edge(b, c, ());
        let closure = g.transitive_closure();
        assert!(closure.has_edge(a, c));
    }

    #[test]
    fn reduction_preserves_a_single_cycle() {
        let mut g: DiGraph<char, ()> = DiGraph::new();
        let a = g.add_node('a');
        let b = g.add_node('b');
        let c = g.add_node('c');
        g.add_edge(a, b, ());
        g.add_edge(b, c, ());
        g.add_edge(c, a, ());
        let reduced = g.transitive_reduction();
        assert_eq!(reduced.edge_count(), 3);
    }
}
