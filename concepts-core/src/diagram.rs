//! Bordat's algorithm: an incremental construction of the concept
//! lattice's Hasse diagram, built alongside the dependency graph that
//! records why each immediate successor needed the elements it did.
use std::collections::BTreeSet;

use concepts_graph::{tarjan_scc, DiGraph, NodeId};

use crate::closure::ClosureSystem;
use crate::concept::Concept;
use crate::dependency::DependencyGraph;
use crate::lattice::ConceptLattice;

/// Builds the concept lattice's Hasse diagram for any [`ClosureSystem`],
/// together with the dependency graph accumulated along the way.
///
/// Nodes carry intent only (`extent` is left `None`): a closure
/// system only knows closed subsets of its own ground set, not an
/// external object universe. A formal-context-backed caller derives
/// extents afterwards from its incidence relation.
pub fn diagram_lattice<CS>(cs: &CS) -> (ConceptLattice<CS::Elem>, DependencyGraph<CS::Elem>)
where
    CS: ClosureSystem,
    CS::Elem: Ord + Clone,
{
    let ground: BTreeSet<CS::Elem> = cs.ground_set();
    let mut lattice = ConceptLattice::new();
    let mut dep = DependencyGraph::new(ground.iter().cloned());

    let bottom_intent = cs.closure(&BTreeSet::new());
    let (bottom_id, _) = lattice.add_node(Concept::intent_only(bottom_intent));

    let mut stack = vec![bottom_id];
    let mut discovered: BTreeSet<NodeId> = [bottom_id].into_iter().collect();
    while let Some(n) = stack.pop() {
        let intent = lattice.intent(n).expect("node exists").clone();
        for successor_intent in immediate_successors(cs, &intent, &ground, &mut dep) {
            let (succ_id, _) = lattice.add_node(Concept::intent_only(successor_intent));
            lattice.add_edge(n, succ_id);
            if discovered.insert(succ_id) {
                stack.push(succ_id);
            }
        }
    }
    (lattice, dep)
}

/// The immediate successors (in the concept lattice order) of the
/// closed set `f`, per Bordat's precedence-graph contraction.
fn immediate_successors<CS>(
    cs: &CS,
    f: &BTreeSet<CS::Elem>,
    ground: &BTreeSet<CS::Elem>,
    dep: &mut DependencyGraph<CS::Elem>,
) -> Vec<BTreeSet<CS::Elem>>
where
    CS: ClosureSystem,
    CS::Elem: Ord + Clone,
{
    let prec = cs.precedence_graph();
    let cond = tarjan_scc(&prec);

    // newVal: F minus the elements lying in SCCs that are strict
    // minorants (in the precedence graph's condensation) of any SCC
    // containing an element of F -- those elements are forced by
    // something else already in F, so they don't count as "new" when
    // we label the dependency edges discovered at this step.
    let f_ids: Vec<NodeId> = f.iter().filter_map(|e| prec.node_id(e)).collect();
    let mut new_val = f.clone();
    for e in f {
        if let Some(eid) = prec.node_id(e) {
            if f_ids.iter().any(|&fid| cond.strict_minorant(eid, fid)) {
                new_val.remove(e);
            }
        }
    }

    let n_set: BTreeSet<CS::Elem> = ground.difference(f).cloned().collect();

    // For every v in N, the elements of N forced into closure(F ∪
    // {v}): feeds both the dependency graph (labelled by new_val) and
    // the delta graph whose sink SCCs become the successors below.
    let mut delta: DiGraph<CS::Elem, ()> = DiGraph::new();
    for e in &n_set {
        delta.add_node(e.clone());
    }
    for v in &n_set {
        let mut fv = f.clone();
        fv.insert(v.clone());
        let closed = cs.closure(&fv);
        for u in &n_set {
            if u != v && closed.contains(u) {
                let vv = delta.node_id(v).expect("just inserted");
                let uu = delta.node_id(u).expect("just inserted");
                delta.add_edge(vv, uu, ());

                let vv_dep = dep.node_id(v).expect("ground set node");
                let uu_dep = dep.node_id(u).expect("ground set node");
                dep.insert(vv_dep, uu_dep, new_val.clone());
            }
        }
    }

    let delta_cond = tarjan_scc(&delta);
    let mut successors = Vec::new();
    for (i, members) in delta_cond.sccs.iter().enumerate() {
        let comp_id = delta_cond
            .graph
            .node_id(&(i as u32))
            .expect("component node exists");
        let is_sink = delta_cond.graph.out_edges(comp_id).next().is_none();
        if is_sink {
            let mut successor = f.clone();
            for &member in members {
                successor.insert(delta.payload(member).expect("node has payload").clone());
            }
            successors.push(successor);
        }
    }
    successors
}
