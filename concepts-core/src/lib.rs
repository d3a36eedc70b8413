//! Implicational systems, closure operators and concept lattices.
//!
//! An [`ImplicationalSystem`] is a finite ground set plus a set of
//! implications `P -> C`; its [`ClosureSystem::closure`] operator is
//! the least fixpoint of repeatedly firing every rule whose premise
//! already holds. The nine `make_*` rewrites on [`ImplicationalSystem`]
//! normalise a rule set into progressively stronger canonical forms
//! (proper, unary, compact, right-maximal, left-minimal, direct,
//! minimum, canonical basis, canonical direct basis) without ever
//! changing the closure operator itself; the matching `is_*`
//! predicates ask whether a system is already at one of those forms.
//!
//! [`diagram::diagram_lattice`] builds the Hasse diagram of every
//! closed set reachable from the empty set -- the concept lattice --
//! using Bordat's incremental, precedence-graph-contraction
//! algorithm, for *any* [`ClosureSystem`], not just implicational
//! systems: `concepts-context`'s formal context is the other
//! implementation this workspace ships.
#![warn(missing_docs)]

mod closure;
mod concept;
mod dependency;
mod diagram;
mod error;
mod is;
mod lattice;
#[cfg(test)]
mod props;
mod rule;

pub use closure::ClosureSystem;
pub use concept::Concept;
pub use dependency::DependencyGraph;
pub use diagram::diagram_lattice;
pub use error::ConceptsError;
pub use is::ImplicationalSystem;
pub use lattice::{ConceptLattice, Label};
pub use rule::{AssociationRule, AssociationRuleSet, Rule};
