//! Implicational systems, closure operators and concept lattices.
//!
//! This is the facade crate of a small workspace built around one
//! idea: a **closure system** is anything that can answer "what is
//! the closure of this subset of my ground set", and everything else
//! -- enumerating every closed set, finding immediate successors in
//! the concept lattice, spotting redundant elements -- is generic
//! over that one capability.
//!
//! - [`concepts_core`] is the engine: [`ImplicationalSystem`], the
//!   nine `make_*` rule-set normalisations, [`diagram_lattice`] (an
//!   incremental, Bordat-style construction of the Hasse diagram), and
//!   [`ConceptLattice`]'s reductions.
//! - [`concepts_context`] is a second, independent implementation of
//!   the same [`ClosureSystem`] contract: a formal context (objects x
//!   attributes), whose closure is the classical Galois derivation
//!   `X -> X''` rather than rule-firing.
//! - [`concepts_graph`] is the directed-graph substrate both of the
//!   above build on: an arena-indexed digraph with payload edges,
//!   topological sort, Tarjan SCC and transitive closure/reduction.
//!
//! A rule-based system and a context-based one are both just
//! [`ClosureSystem`]s, so the same [`diagram_lattice`] call builds a
//! concept lattice from either:
//!
//! ```
//! use concepts::{ClosureSystem, ImplicationalSystem, Rule, diagram_lattice};
//!
//! let mut is = ImplicationalSystem::new();
//! is.add_all_elements(['a', 'b', 'c']);
//! is.add_rule(Rule::new(['a'].into_iter().collect(), ['b'].into_iter().collect()));
//! is.add_rule(Rule::new(['b'].into_iter().collect(), ['c'].into_iter().collect()));
//!
//! // {a,b,c} is reachable from {a} but it takes two closure passes:
//! assert!(!is.is_direct());
//! assert_eq!(is.closure(&['a'].into_iter().collect()), ['a', 'b', 'c'].into_iter().collect());
//!
//! let (lattice, _dependency_graph) = diagram_lattice(&is);
//! assert_eq!(lattice.node_ids().count(), 4); // {}, {c}, {b,c}, {a,b,c}
//! ```
#![warn(missing_docs)]

pub use concepts_context::FormalContext;
pub use concepts_core::{
    diagram_lattice, AssociationRule, AssociationRuleSet, ClosureSystem, Concept, ConceptLattice,
    ConceptsError, DependencyGraph, ImplicationalSystem, Label, Rule,
};
pub use concepts_graph::{tarjan_scc, Condensation, DiGraph, GraphError, NodeId};
