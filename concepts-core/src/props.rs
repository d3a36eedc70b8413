//! `proptest` generators for small implicational systems, and the
//! universal properties any closure operator must satisfy.
use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::closure::ClosureSystem;
use crate::is::ImplicationalSystem;
use crate::rule::Rule;

const ALPHABET: [char; 6] = ['a', 'b', 'c', 'd', 'e', 'f'];

fn arb_subset(alphabet: &'static [char]) -> impl Strategy<Value = BTreeSet<char>> {
    prop::collection::vec(prop::bool::ANY, alphabet.len()).prop_map(move |mask| {
        alphabet
            .iter()
            .zip(mask)
            .filter_map(|(&e, keep)| keep.then_some(e))
            .collect()
    })
}

fn arb_rule(alphabet: &'static [char]) -> impl Strategy<Value = Rule<char>> {
    (arb_subset(alphabet), arb_subset(alphabet)).prop_map(|(p, c)| Rule::new(p, c))
}

/// A small implicational system over `a..=f`, with between 0 and 6
/// rules drawn from arbitrary (possibly overlapping, possibly
/// non-unary) premise/conclusion pairs.
pub fn arb_implicational_system() -> impl Strategy<Value = ImplicationalSystem<char>> {
    prop::collection::vec(arb_rule(&ALPHABET), 0..6).prop_map(|rules| {
        let mut is = ImplicationalSystem::new();
        is.add_all_elements(ALPHABET);
        for r in rules {
            is.add_rule(r);
        }
        is
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Closure is extensive: `x ⊆ closure(x)`.
    #[test]
    fn closure_is_extensive(is in arb_implicational_system(), x in arb_subset(&ALPHABET)) {
        let closed = is.closure(&x);
        prop_assert!(x.is_subset(&closed));
    }

    /// Closure is idempotent: `closure(closure(x)) == closure(x)`.
    #[test]
    fn closure_is_idempotent(is in arb_implicational_system(), x in arb_subset(&ALPHABET)) {
        let once = is.closure(&x);
        let twice = is.closure(&once);
        prop_assert_eq!(once, twice);
    }

    /// Closure is monotone: `x ⊆ y ⟹ closure(x) ⊆ closure(y)`.
    #[test]
    fn closure_is_monotone(is in arb_implicational_system(), x in arb_subset(&ALPHABET), extra in arb_subset(&ALPHABET)) {
        let y: BTreeSet<char> = x.union(&extra).cloned().collect();
        let cx = is.closure(&x);
        let cy = is.closure(&y);
        prop_assert!(cx.is_subset(&cy));
    }

    /// Every rewrite preserves the closure operator: applying any of
    /// them never changes what closure(x) is, for any x, because each
    /// is a sound transformation of the rule set (it only ever adds
    /// rules derivable from Σ, or removes rules that were redundant).
    #[test]
    fn make_proper_preserves_closure(is in arb_implicational_system(), x in arb_subset(&ALPHABET)) {
        let before = is.closure(&x);
        let mut after = is.clone();
        after.make_proper();
        prop_assert_eq!(before, after.closure(&x));
    }

    #[test]
    fn make_unary_preserves_closure(is in arb_implicational_system(), x in arb_subset(&ALPHABET)) {
        let before = is.closure(&x);
        let mut after = is.clone();
        after.make_unary();
        prop_assert_eq!(before, after.closure(&x));
    }

    #[test]
    fn make_compact_preserves_closure(is in arb_implicational_system(), x in arb_subset(&ALPHABET)) {
        let before = is.closure(&x);
        let mut after = is.clone();
        after.make_compact();
        prop_assert_eq!(before, after.closure(&x));
    }

    #[test]
    fn make_right_maximal_preserves_closure(is in arb_implicational_system(), x in arb_subset(&ALPHABET)) {
        let before = is.closure(&x);
        let mut after = is.clone();
        after.make_right_maximal();
        prop_assert_eq!(before, after.closure(&x));
    }

    #[test]
    fn make_left_minimal_preserves_closure(is in arb_implicational_system(), x in arb_subset(&ALPHABET)) {
        let before = is.closure(&x);
        let mut after = is.clone();
        after.make_left_minimal();
        prop_assert_eq!(before, after.closure(&x));
    }

    #[test]
    fn make_minimum_preserves_closure(is in arb_implicational_system(), x in arb_subset(&ALPHABET)) {
        let before = is.closure(&x);
        let mut after = is.clone();
        after.make_minimum();
        prop_assert_eq!(before, after.closure(&x));
    }

    #[test]
    fn make_canonical_basis_preserves_closure(is in arb_implicational_system(), x in arb_subset(&ALPHABET)) {
        let before = is.closure(&x);
        let mut after = is.clone();
        after.make_canonical_basis();
        prop_assert_eq!(before, after.closure(&x));
    }

    /// Rewrites are idempotent at the rule-set level: applying one
    /// twice in a row is the same as applying it once.
    #[test]
    fn make_proper_is_idempotent(is in arb_implicational_system()) {
        let mut once = is.clone();
        once.make_proper();
        let mut twice = once.clone();
        twice.make_proper();
        prop_assert_eq!(once.rules().clone(), twice.rules().clone());
    }

    #[test]
    fn make_compact_is_idempotent(is in arb_implicational_system()) {
        let mut once = is.clone();
        once.make_compact();
        let mut twice = once.clone();
        twice.make_compact();
        prop_assert_eq!(once.rules().clone(), twice.rules().clone());
    }

    /// The diagram's node count always matches `all_closures().len()`:
    /// two independent traversals of the same closure system (Ganter's
    /// lectic enumeration and Bordat's incremental construction) must
    /// agree on how many closed sets there are.
    #[test]
    fn diagram_node_count_matches_all_closures(is in arb_implicational_system()) {
        let (lattice, _dep) = crate::diagram::diagram_lattice(&is);
        let closures = is.all_closures();
        prop_assert_eq!(lattice.node_ids().count(), closures.len());
    }

    /// `is_X` is true exactly when applying `make_X` is a no-op.
    #[test]
    fn is_proper_agrees_with_make_proper_fixpoint(is in arb_implicational_system()) {
        let mut clone = is.clone();
        clone.make_proper();
        prop_assert_eq!(is.is_proper(), clone.rules() == is.rules());
    }

    #[test]
    fn is_compact_agrees_with_make_compact_fixpoint(is in arb_implicational_system()) {
        let mut clone = is.clone();
        clone.make_compact();
        prop_assert_eq!(is.is_compact(), clone.rules() == is.rules());
    }

    /// `iceberg` is monotone in its threshold: raising the threshold
    /// never adds nodes back.
    #[test]
    fn iceberg_is_monotone_in_threshold(is in arb_implicational_system()) {
        let (lattice, _dep) = crate::diagram::diagram_lattice(&is);
        let loose = lattice.iceberg(0.0);
        let strict = lattice.iceberg(0.9);
        prop_assert!(strict.node_ids().count() <= loose.node_ids().count());
    }

    /// Round trip: every closed set reported by `all_closures` is, in
    /// fact, a fixpoint of `closure`.
    #[test]
    fn all_closures_round_trips_through_closure(is in arb_implicational_system()) {
        for c in is.all_closures() {
            prop_assert_eq!(is.closure(&c).clone(), c);
        }
    }
}
