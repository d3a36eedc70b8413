//! A formal concept: an (intent, extent) pair, either half of which
//! may be absent.
use std::collections::BTreeSet;
use std::fmt;

/// A node of a [`crate::lattice::ConceptLattice`].
///
/// The generic diagram construction (`crate::diagram::diagram_lattice`)
/// only ever knows about closed sets of the ground set it was handed,
/// so it always leaves `extent` as `None`; a formal-context-backed
/// caller (the `concepts-context` crate) fills it in afterwards by
/// deriving each intent's object set from its own incidence relation.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct Concept<T: Ord> {
    /// The closed attribute set.
    pub intent: Option<BTreeSet<T>>,
    /// The object set whose common attributes are exactly `intent`.
    pub extent: Option<BTreeSet<T>>,
}

impl<T: Ord + Clone> Concept<T> {
    /// A concept with only its intent known.
    pub fn intent_only(intent: BTreeSet<T>) -> Self {
        Self {
            intent: Some(intent),
            extent: None,
        }
    }

    /// A concept with both halves known.
    pub fn new(intent: BTreeSet<T>, extent: BTreeSet<T>) -> Self {
        Self {
            intent: Some(intent),
            extent: Some(extent),
        }
    }
}

impl<T: Ord + fmt::Display> fmt::Display for Concept<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |s: &Option<BTreeSet<T>>| match s {
            Some(set) => set.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(" "),
            None => "_".to_string(),
        };
        write!(f, "({}, {})", render(&self.intent), render(&self.extent))
    }
}
