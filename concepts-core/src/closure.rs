//! The `ClosureSystem` capability: anything that can answer "what is
//! the closure of this subset of my ground set" gets enumeration
//! (Next Closure), the precedence graph and reducible-element
//! detection for free.
use std::collections::{BTreeMap, BTreeSet};

use concepts_graph::DiGraph;

/// A closure operator over a finite ground set.
///
/// [`crate::ImplicationalSystem`] and a formal context (`FormalContext`
/// in the `concepts-context` crate) are the two implementations this
/// workspace ships; both get `precedence_graph`, `all_closures` and
/// `reducible_elements` from the same default-method algorithms here,
/// driven purely by `ground_set` and `closure`.
pub trait ClosureSystem {
    /// The element type of the ground set.
    type Elem: Ord + Clone;

    /// The finite ground set this closure operator is defined over.
    fn ground_set(&self) -> BTreeSet<Self::Elem>;

    /// The closure of `x`: the smallest closed superset of `x`.
    ///
    /// Must be monotone (`x ⊆ y ⟹ closure(x) ⊆ closure(y)`), extensive
    /// (`x ⊆ closure(x)`) and idempotent (`closure(closure(x)) ==
    /// closure(x)`); every implementation in this workspace is checked
    /// against those three laws by property tests.
    fn closure(&self, x: &BTreeSet<Self::Elem>) -> BTreeSet<Self::Elem>;

    /// The precedence graph: an edge `a -> b` for every pair of
    /// distinct ground-set elements with `b ∈ closure({a})`.
    ///
    /// Feeds Bordat's diagram construction (`crate::diagram`), which
    /// contracts this graph's strongly connected components to find
    /// the elements that are forced in lockstep.
    fn precedence_graph(&self) -> DiGraph<Self::Elem, ()> {
        let ground = self.ground_set();
        let mut g = DiGraph::new();
        for e in &ground {
            g.add_node(e.clone());
        }
        for a in &ground {
            let closure_a = self.closure(&std::iter::once(a.clone()).collect());
            for b in &ground {
                if b != a && closure_a.contains(b) {
                    let ida = g.node_id(a).expect("just inserted");
                    let idb = g.node_id(b).expect("just inserted");
                    g.add_edge(ida, idb, ());
                }
            }
        }
        g
    }

    /// Every closed set, in lectic (Ganter's Next Closure) order,
    /// starting from `closure(∅)` and ending at `ground_set()` itself.
    fn all_closures(&self) -> Vec<BTreeSet<Self::Elem>> {
        let ground: Vec<Self::Elem> = self.ground_set().into_iter().collect();
        let mut result = Vec::new();
        let mut current = self.closure(&BTreeSet::new());
        result.push(current.clone());
        while let Some(next) = next_closure(&ground, &current, |x| self.closure(x)) {
            result.push(next.clone());
            current = next;
        }
        result
    }

    /// Elements equivalent to a non-trivial subset of the others:
    /// groups ground-set elements by the closure of their singleton,
    /// maps the least element of each group of size > 1 to the rest
    /// of the group.
    ///
    /// `a` and `b` are equivalent exactly when `closure({a}) ==
    /// closure({b})`: closure is monotone, so `b ∈ closure({a})`
    /// implies `closure({b}) ⊆ closure({a})`, and the converse
    /// membership gives the reverse inclusion.
    fn reducible_elements(&self) -> BTreeMap<Self::Elem, BTreeSet<Self::Elem>> {
        let ground: Vec<Self::Elem> = self.ground_set().into_iter().collect();
        let mut groups: BTreeMap<BTreeSet<Self::Elem>, Vec<Self::Elem>> = BTreeMap::new();
        for e in &ground {
            let c = self.closure(&std::iter::once(e.clone()).collect());
            groups.entry(c).or_default().push(e.clone());
        }
        let mut result = BTreeMap::new();
        for members in groups.into_values() {
            if members.len() > 1 {
                let representative = members[0].clone();
                let rest: BTreeSet<Self::Elem> = members[1..].iter().cloned().collect();
                result.insert(representative, rest);
            }
        }
        result
    }
}

/// One step of Ganter's Next Closure algorithm: given the current
/// closed set `current` and the ground set in ascending order,
/// returns the lectically next closed set, or `None` if `current` is
/// already the top (`ground_set()` itself, or more generally nothing
/// qualifies).
fn next_closure<T: Ord + Clone>(
    ground: &[T],
    current: &BTreeSet<T>,
    mut closure_fn: impl FnMut(&BTreeSet<T>) -> BTreeSet<T>,
) -> Option<BTreeSet<T>> {
    for g in ground.iter().rev() {
        if current.contains(g) {
            continue;
        }
        let less_than_g: BTreeSet<T> = current.iter().filter(|e| *e < g).cloned().collect();
        let mut candidate = less_than_g.clone();
        candidate.insert(g.clone());
        let closed = closure_fn(&candidate);
        let closed_less_than_g: BTreeSet<T> = closed.iter().filter(|e| *e < g).cloned().collect();
        if closed_less_than_g == less_than_g {
            return Some(closed);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A tiny closure system hand-coded from the implications
    /// `ab -> cd`, `cd -> e`, over `{a,b,c,d,e}`.
    struct Toy;

    impl ClosureSystem for Toy {
        type Elem = char;
        fn ground_set(&self) -> BTreeSet<char> {
            ['a', 'b', 'c', 'd', 'e'].into_iter().collect()
        }
        fn closure(&self, x: &BTreeSet<char>) -> BTreeSet<char> {
            let mut cur = x.clone();
            loop {
                let mut changed = false;
                if cur.contains(&'a') && cur.contains(&'b') {
                    changed |= cur.insert('c');
                    changed |= cur.insert('d');
                }
                if cur.contains(&'c') && cur.contains(&'d') {
                    changed |= cur.insert('e');
                }
                if !changed {
                    return cur;
                }
            }
        }
    }

    #[test]
    fn all_closures_starts_at_bottom_and_ends_at_top() {
        let closures = Toy.all_closures();
        assert_eq!(closures.first().unwrap(), &BTreeSet::new());
        assert_eq!(closures.last().unwrap(), &Toy.ground_set());
    }

    #[test]
    fn all_closures_are_distinct_and_closed() {
        let closures = Toy.all_closures();
        let distinct: BTreeSet<_> = closures.iter().cloned().collect();
        assert_eq!(distinct.len(), closures.len());
        for c in &closures {
            assert_eq!(&Toy.closure(c), c);
        }
    }

    /// `Toy`'s rules both need two elements in hand before they fire,
    /// so no singleton closure ever grows: the precedence graph has
    /// every node but no edges.
    #[test]
    fn precedence_graph_of_a_two_premise_system_is_edgeless() {
        let g = Toy.precedence_graph();
        assert_eq!(g.node_count(), Toy.ground_set().len());
        assert_eq!(g.edge_count(), 0);
    }

    /// A closure system whose rules fire off a single element, so
    /// singleton closures actually grow and the precedence graph picks
    /// up the resulting edges.
    struct Chain;

    impl ClosureSystem for Chain {
        type Elem = char;
        fn ground_set(&self) -> BTreeSet<char> {
            ['a', 'b', 'c'].into_iter().collect()
        }
        fn closure(&self, x: &BTreeSet<char>) -> BTreeSet<char> {
            let mut cur = x.clone();
            loop {
                let mut changed = false;
                if cur.contains(&'a') {
                    changed |= cur.insert('b');
                }
                if cur.contains(&'b') {
                    changed |= cur.insert('c');
                }
                if !changed {
                    return cur;
                }
            }
        }
    }

    #[test]
    fn precedence_graph_has_an_edge_from_a_to_c() {
        let g = Chain.precedence_graph();
        let a = g.node_id(&'a').unwrap();
        let c = g.node_id(&'c').unwrap();
        assert!(g.has_edge(a, c));
    }
}
