//! A formal context: objects, attributes and an incidence relation
//! between them, exposed as a second implementation of
//! [`concepts_core::ClosureSystem`] alongside `ImplicationalSystem`.
//!
//! Where an implicational system's closure is the least fixpoint of
//! firing rules, a formal context's closure is the classical Galois
//! derivation `X ↦ X''`: derive the objects that have every attribute
//! in `X` (`X'`, the extent), then derive the attributes common to
//! every one of those objects (`X''`, back in attribute space). Both
//! implementations get `all_closures`, `precedence_graph` and
//! `reducible_elements` for free from `ClosureSystem`'s default
//! methods, driven only by `ground_set` and `closure` -- this crate
//! exists to demonstrate that genericity, not to reimplement it.
#![warn(missing_docs)]

use std::collections::{BTreeMap, BTreeSet};

use concepts_core::{diagram_lattice, Concept, ClosureSystem, ConceptLattice, DependencyGraph};

/// Objects `O`, attributes `A`, and which objects have which
/// attributes.
#[derive(Clone, Debug, Default)]
pub struct FormalContext<O: Ord + Clone, A: Ord + Clone> {
    attributes: BTreeSet<A>,
    incidence: BTreeMap<O, BTreeSet<A>>,
}

impl<O: Ord + Clone, A: Ord + Clone> FormalContext<O, A> {
    /// An empty context.
    pub fn new() -> Self {
        Self {
            attributes: BTreeSet::new(),
            incidence: BTreeMap::new(),
        }
    }

    /// Registers an attribute in the universe, even if no object has
    /// it yet.
    pub fn add_attribute(&mut self, a: A) {
        self.attributes.insert(a);
    }

    /// Adds an object with the given attribute set, registering any
    /// attribute not already in the universe.
    pub fn add_object(&mut self, o: O, attrs: BTreeSet<A>) {
        for a in &attrs {
            self.attributes.insert(a.clone());
        }
        self.incidence.insert(o, attrs);
    }

    /// Removes an object. No-op if it wasn't present.
    pub fn remove_object(&mut self, o: &O) {
        self.incidence.remove(o);
    }

    /// Every object in the context.
    pub fn objects(&self) -> impl Iterator<Item = &O> {
        self.incidence.keys()
    }

    /// The attribute set of a single object, if it exists.
    pub fn attributes_of(&self, o: &O) -> Option<&BTreeSet<A>> {
        self.incidence.get(o)
    }

    /// The extent of an attribute set: every object that has all of
    /// `attrs` (`X'` in the usual Galois-derivation notation).
    pub fn extent(&self, attrs: &BTreeSet<A>) -> BTreeSet<O> {
        self.incidence
            .iter()
            .filter(|(_, a)| attrs.is_subset(a))
            .map(|(o, _)| o.clone())
            .collect()
    }

    /// The intent of an object set: the attributes common to every
    /// object in `objs` (`Y'` on the object side). By convention the
    /// intent of the empty object set is the full attribute universe
    /// -- the intersection over an empty family of sets.
    pub fn intent(&self, objs: &BTreeSet<O>) -> BTreeSet<A> {
        let mut iter = objs.iter().filter_map(|o| self.incidence.get(o));
        match iter.next() {
            None => self.attributes.clone(),
            Some(first) => iter.fold(first.clone(), |acc, attrs| {
                acc.intersection(attrs).cloned().collect()
            }),
        }
    }

    /// Builds the concept lattice with both halves of every concept
    /// populated: runs the generic [`diagram_lattice`] to get the
    /// Hasse diagram over intents, then derives each node's extent
    /// from this context's own incidence relation.
    pub fn concept_lattice(&self) -> (ConceptLattice<A>, DependencyGraph<A>) {
        let (mut lattice, dep) = diagram_lattice(self);
        let ids: Vec<_> = lattice.node_ids().collect();
        for id in ids {
            let intent = lattice.intent(id).cloned().unwrap_or_default();
            let extent = self.extent(&intent);
            let concept = Concept::new(intent, extent);
            // find_by_intent indexed on Concept::intent_only at
            // insertion time; replace the node's payload directly so
            // the lookup key (which the lattice never uses again
            // after diagram construction) stays internally
            // consistent with what callers observe going forward.
            lattice.set_concept(id, concept);
        }
        (lattice, dep)
    }
}

impl<O: Ord + Clone, A: Ord + Clone> ClosureSystem for FormalContext<O, A> {
    type Elem = A;

    fn ground_set(&self) -> BTreeSet<A> {
        self.attributes.clone()
    }

    fn closure(&self, x: &BTreeSet<A>) -> BTreeSet<A> {
        self.intent(&self.extent(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn animal_context() -> FormalContext<String, String> {
        let mut ctx = FormalContext::new();
        ctx.add_object("dog".into(), attrs(&["has_fur", "barks"]));
        ctx.add_object("cat".into(), attrs(&["has_fur", "meows"]));
        ctx.add_object("snake".into(), attrs(&["scaly"]));
        ctx
    }

    #[test]
    fn closure_of_has_fur_includes_itself_and_is_idempotent() {
        let ctx = animal_context();
        let closed = ctx.closure(&attrs(&["has_fur"]));
        assert_eq!(closed, attrs(&["has_fur"]));
        assert_eq!(ctx.closure(&closed), closed);
    }

    #[test]
    fn extent_of_has_fur_is_dog_and_cat() {
        let ctx = animal_context();
        let extent = ctx.extent(&attrs(&["has_fur"]));
        assert_eq!(extent, ["cat".to_string(), "dog".to_string()].into_iter().collect());
    }

    #[test]
    fn intent_of_the_empty_object_set_is_the_full_attribute_universe() {
        let ctx = animal_context();
        let intent = ctx.intent(&BTreeSet::new());
        assert_eq!(intent, ctx.ground_set());
    }

    #[test]
    fn concept_lattice_populates_both_intent_and_extent() {
        let ctx = animal_context();
        let (lattice, _dep) = ctx.concept_lattice();
        let bottom = lattice.bottom().unwrap();
        assert!(lattice.extent(bottom).is_some());
        for id in lattice.node_ids() {
            let intent = lattice.intent(id).unwrap().clone();
            assert_eq!(lattice.extent(id).unwrap(), &ctx.extent(&intent));
        }
    }
}
