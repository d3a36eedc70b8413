use thiserror::Error;

/// Failure modes of the core implication/closure engine.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ConceptsError {
    /// A rule referenced an element that isn't in the system's ground set.
    #[error("element {0:?} is not in the ground set")]
    UnknownElement(String),
    /// A rule with an empty premise or empty conclusion was rejected
    /// where the caller asked for a strict add (use `add_rule` which
    /// silently drops these instead, if that's the desired behaviour).
    #[error("rule has an empty conclusion")]
    EmptyConclusion,
    /// A structural operation that requires an acyclic Hasse diagram
    /// (e.g. [`crate::ConceptLattice::try_make_inclusion_reduction`])
    /// was given one with a cycle.
    #[error("lattice diagram contains a cycle")]
    Cyclic,
}
