//! `ImplicationalSystem`: a ground set plus an ordered rule set, the
//! closure fixpoint operator, the nine normalisation rewrites and
//! their inverse predicates.
use std::collections::BTreeSet;

use crate::closure::ClosureSystem;
use crate::rule::Rule;

/// A finite ground set `S` together with an ordered, duplicate-free
/// rule set `Σ`.
///
/// Backed by a [`BTreeSet<Rule<T>>`]: insertion both deduplicates
/// rules and keeps them in lexicographic order, so there is no
/// separate bookkeeping to keep those two invariants in sync.
#[derive(Clone, Debug, Default)]
pub struct ImplicationalSystem<T: Ord + Clone> {
    elements: BTreeSet<T>,
    rules: BTreeSet<Rule<T>>,
}

impl<T: Ord + Clone> ImplicationalSystem<T> {
    /// An empty system over an empty ground set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The ground set `S`.
    pub fn elements(&self) -> &BTreeSet<T> {
        &self.elements
    }

    /// The rule set `Σ`, in its canonical lexicographic order.
    pub fn rules(&self) -> &BTreeSet<Rule<T>> {
        &self.rules
    }

    /// Adds `e` to the ground set. Returns `false` if it was already
    /// present.
    pub fn add_element(&mut self, e: T) -> bool {
        self.elements.insert(e)
    }

    /// Adds every element of `xs` to the ground set. Returns `true`
    /// only if all of them were new.
    pub fn add_all_elements(&mut self, xs: impl IntoIterator<Item = T>) -> bool {
        let mut all_new = true;
        for x in xs {
            all_new &= self.add_element(x);
        }
        all_new
    }

    /// Removes `e` from the ground set and from every rule that
    /// mentions it; a rule left with an empty conclusion is dropped
    /// entirely.
    pub fn delete_element(&mut self, e: &T) {
        self.elements.remove(e);
        let old = std::mem::take(&mut self.rules);
        for r in old {
            let (mut premise, mut conclusion) = r.into_parts();
            premise.remove(e);
            conclusion.remove(e);
            if !conclusion.is_empty() {
                self.rules.insert(Rule::new(premise, conclusion));
            }
        }
    }

    /// Adds `r` to `Σ`. Rejects (returns `false`, leaves `Σ`
    /// unchanged) a rule that mentions an element outside the ground
    /// set, or one already present.
    pub fn add_rule(&mut self, r: Rule<T>) -> bool {
        if self.rules.contains(&r) {
            return false;
        }
        if !r.elements().all(|x| self.elements.contains(x)) {
            return false;
        }
        self.rules.insert(r)
    }

    /// As [`Self::add_rule`], but distinguishes *why* nothing happened:
    /// `Ok(false)` for the ordinary "already present" query,
    /// [`ConceptsError::UnknownElement`] for a rule that mentions
    /// something outside the ground set. A caller building an `Σ` from
    /// data it has not already validated against `S` (unlike
    /// `conceptsc`'s parser, which validates by silently dropping
    /// unknown tokens) can use this to fail fast instead.
    pub fn try_add_rule(&mut self, r: Rule<T>) -> Result<bool, crate::error::ConceptsError>
    where
        T: std::fmt::Debug,
    {
        if let Some(bad) = r.elements().find(|x| !self.elements.contains(x)) {
            return Err(crate::error::ConceptsError::UnknownElement(format!("{bad:?}")));
        }
        Ok(self.add_rule(r))
    }

    /// Removes `r` from `Σ`. Returns `false` if it wasn't present.
    pub fn remove_rule(&mut self, r: &Rule<T>) -> bool {
        self.rules.remove(r)
    }

    /// Replaces `old` with `new` in one step. Returns `false` (leaving
    /// `Σ` unchanged) if `old` wasn't present.
    pub fn replace_rule(&mut self, old: &Rule<T>, new: Rule<T>) -> bool {
        if self.rules.remove(old) {
            self.rules.insert(new);
            true
        } else {
            false
        }
    }

    /// The closure fixpoint operator: starting from `x`, repeatedly
    /// apply every rule whose premise is a subset of the current set
    /// (an empty premise is always a subset), adding its conclusion,
    /// until a full pass over `Σ` adds nothing.
    pub fn closure(&self, x: &BTreeSet<T>) -> BTreeSet<T> {
        fixpoint(&self.rules, x)
    }

    /// Removes every element flagged by [`ClosureSystem::reducible_elements`]
    /// as equivalent to some other (kept) element, cascading the
    /// removal through [`Self::delete_element`] so `Σ` stays
    /// well-formed. Returns the mapping that was applied.
    pub fn reduce(&mut self) -> std::collections::BTreeMap<T, BTreeSet<T>> {
        let mapping = self.reducible_elements();
        for redundant in mapping.values().flatten() {
            self.delete_element(redundant);
        }
        mapping
    }

    /// Drops, from every rule's conclusion, any element already in
    /// that rule's premise; a rule left with an empty conclusion is
    /// dropped. Returns the signed rule-count delta `before - after`.
    pub fn make_proper(&mut self) -> i64 {
        let before = self.rules.len() as i64;
        let old = std::mem::take(&mut self.rules);
        for r in old {
            let (premise, mut conclusion) = r.into_parts();
            for e in &premise {
                conclusion.remove(e);
            }
            if !conclusion.is_empty() {
                self.rules.insert(Rule::new(premise, conclusion));
            }
        }
        self.delta(before)
    }

    /// Splits every rule `P -> C` into `|C|` rules `P -> {c}`, one per
    /// conclusion element. Returns the signed rule-count delta
    /// `before - after` (negative when the split grows `Σ`).
    pub fn make_unary(&mut self) -> i64 {
        let before = self.rules.len() as i64;
        let old = std::mem::take(&mut self.rules);
        for r in old {
            let (premise, conclusion) = r.into_parts();
            for c in conclusion {
                self.rules
                    .insert(Rule::new(premise.clone(), std::iter::once(c).collect()));
            }
        }
        self.delta(before)
    }

    /// Merges rules sharing a premise, replacing them with one rule
    /// whose conclusion is the union of theirs. Returns the signed
    /// rule-count delta `before - after`.
    pub fn make_compact(&mut self) -> i64 {
        let before = self.rules.len() as i64;
        let mut merged: std::collections::BTreeMap<BTreeSet<T>, BTreeSet<T>> =
            std::collections::BTreeMap::new();
        for r in self.rules.iter() {
            merged
                .entry(r.premise().clone())
                .or_default()
                .extend(r.conclusion().iter().cloned());
        }
        self.rules = merged
            .into_iter()
            .map(|(p, c)| Rule::new(p, c))
            .collect();
        self.delta(before)
    }

    /// `make_compact`, then replaces every rule's conclusion by
    /// `closure(premise)` under the (already compacted) `Σ`. Returns
    /// the signed rule-count delta `before - after`.
    pub fn make_right_maximal(&mut self) -> i64 {
        let before = self.rules.len() as i64;
        self.make_compact();
        let snapshot: Vec<Rule<T>> = self.rules.iter().cloned().collect();
        let mut new_rules = BTreeSet::new();
        for r in snapshot {
            let closed = self.closure(r.premise());
            new_rules.insert(Rule::new(r.premise().clone(), closed));
        }
        self.rules = new_rules;
        self.delta(before)
    }

    /// `make_unary`; then, among rules sharing a conclusion, drops any
    /// rule whose premise is a strict superset of another's; then
    /// `make_compact`. Returns the signed rule-count delta
    /// `before - after`.
    pub fn make_left_minimal(&mut self) -> i64 {
        let before = self.rules.len() as i64;
        self.make_unary();
        let snapshot: Vec<Rule<T>> = self.rules.iter().cloned().collect();
        let mut keep = vec![true; snapshot.len()];
        for i in 0..snapshot.len() {
            for j in 0..snapshot.len() {
                if i == j {
                    continue;
                }
                if snapshot[i].conclusion() == snapshot[j].conclusion()
                    && snapshot[j].premise() != snapshot[i].premise()
                    && snapshot[j].premise().is_subset(snapshot[i].premise())
                {
                    keep[i] = false;
                }
            }
        }
        self.rules = snapshot
            .into_iter()
            .zip(keep)
            .filter(|(_, k)| *k)
            .map(|(r, _)| r)
            .collect();
        self.make_compact();
        self.delta(before)
    }

    /// `make_unary`, `make_proper`; then repeats, until a full pass
    /// adds nothing new: for every ordered pair of rules `r1 = (P1,
    /// C1)`, `r2 = (P2, C2)` with `P1 ⊄ C2`, forms `Q = (P2 \ C1) ∪
    /// P1` and, if `Q ⊉ P2`, adds the rule `Q -> C2`. Finishes with
    /// `make_compact`.
    ///
    /// The fixpoint is not known to terminate in polynomial time in
    /// general; a generous iteration cap guards against a runaway loop
    /// from ever becoming a hang, logging a warning rather than
    /// looping forever.
    pub fn make_direct(&mut self) -> i64 {
        const MAX_ITERATIONS: usize = 100_000;
        let before = self.rules.len() as i64;
        self.make_unary();
        self.make_proper();
        let mut iterations = 0;
        loop {
            iterations += 1;
            if iterations > MAX_ITERATIONS {
                tracing::warn!(
                    iterations,
                    "make_direct: iteration cap reached without converging"
                );
                break;
            }
            let snapshot: Vec<Rule<T>> = self.rules.iter().cloned().collect();
            let mut added = false;
            for r1 in &snapshot {
                for r2 in &snapshot {
                    if r1 == r2 {
                        continue;
                    }
                    if r1.premise().is_subset(r2.conclusion()) {
                        continue;
                    }
                    let mut q: BTreeSet<T> = r2
                        .premise()
                        .difference(r1.conclusion())
                        .cloned()
                        .collect();
                    q.extend(r1.premise().iter().cloned());
                    if !r2.premise().is_subset(&q) {
                        let candidate = Rule::new(q, r2.conclusion().clone());
                        if self.rules.insert(candidate) {
                            added = true;
                        }
                    }
                }
            }
            if !added {
                break;
            }
        }
        self.make_compact();
        self.delta(before)
    }

    /// `make_right_maximal`; then drops any rule `r = (P, C)` such
    /// that `closure_{Σ \ {r}}(P) == closure_Σ(P)` -- removing it
    /// changes nothing, so it was redundant. Every candidate is
    /// checked against the full, pre-removal `Σ`, so this is a single
    /// pass, not an iterative greedy removal. Returns the signed
    /// rule-count delta `before - after`.
    pub fn make_minimum(&mut self) -> i64 {
        let before = self.rules.len() as i64;
        self.make_right_maximal();
        let snapshot: Vec<Rule<T>> = self.rules.iter().cloned().collect();
        let mut to_remove = Vec::new();
        for r in &snapshot {
            let mut without = self.rules.clone();
            without.remove(r);
            let reduced_closure = fixpoint(&without, r.premise());
            let full_closure = self.closure(r.premise());
            if reduced_closure == full_closure {
                to_remove.push(r.clone());
            }
        }
        for r in to_remove {
            self.rules.remove(&r);
        }
        self.delta(before)
    }

    /// `make_minimum`; then replaces each rule's premise `P` by
    /// `closure_{Σ \ {r}}(P)`; then `make_proper`. Returns the signed
    /// rule-count delta `before - after`.
    pub fn make_canonical_basis(&mut self) -> i64 {
        let before = self.rules.len() as i64;
        self.make_minimum();
        let snapshot: Vec<Rule<T>> = self.rules.iter().cloned().collect();
        let mut new_rules = BTreeSet::new();
        for r in &snapshot {
            let mut without = self.rules.clone();
            without.remove(r);
            let new_premise = fixpoint(&without, r.premise());
            new_rules.insert(Rule::new(new_premise, r.conclusion().clone()));
        }
        self.rules = new_rules;
        self.make_proper();
        self.delta(before)
    }

    /// `make_proper`, `make_left_minimal`, `make_direct`,
    /// `make_left_minimal`, `make_compact`. Returns the signed
    /// rule-count delta `before - after`.
    pub fn make_canonical_direct_basis(&mut self) -> i64 {
        let before = self.rules.len() as i64;
        self.make_proper();
        self.make_left_minimal();
        self.make_direct();
        self.make_left_minimal();
        self.make_compact();
        self.delta(before)
    }

    fn delta(&self, before: i64) -> i64 {
        before - self.rules.len() as i64
    }

    /// Each `is_*` predicate is the direct inversion of its rewrite's
    /// fixpoint condition: a system already at the fixpoint is left
    /// unchanged by applying the rewrite again, so cloning, rewriting
    /// the clone and comparing rule sets is exactly the predicate.
    fn fixed_under(&self, rewrite: impl FnOnce(&mut Self)) -> bool {
        let mut clone = self.clone();
        rewrite(&mut clone);
        clone.rules == self.rules
    }

    /// No rule has an element in both its premise and its conclusion.
    pub fn is_proper(&self) -> bool {
        self.fixed_under(|c| {
            c.make_proper();
        })
    }

    /// Every rule has a singleton conclusion.
    pub fn is_unary(&self) -> bool {
        self.fixed_under(|c| {
            c.make_unary();
        })
    }

    /// No two distinct rules share a premise.
    pub fn is_compact(&self) -> bool {
        self.fixed_under(|c| {
            c.make_compact();
        })
    }

    /// Compact, and every rule's conclusion already equals the
    /// closure of its premise.
    pub fn is_right_maximal(&self) -> bool {
        self.fixed_under(|c| {
            c.make_right_maximal();
        })
    }

    /// Unary, compact, and no rule's premise is a strict superset of
    /// another rule's premise when the two share a conclusion.
    pub fn is_left_minimal(&self) -> bool {
        self.fixed_under(|c| {
            c.make_left_minimal();
        })
    }

    /// No application of the direct-basis saturation step would add a
    /// new rule.
    pub fn is_direct(&self) -> bool {
        self.fixed_under(|c| {
            c.make_direct();
        })
    }

    /// Right-maximal, and no rule is redundant given the rest of `Σ`.
    pub fn is_minimum(&self) -> bool {
        self.fixed_under(|c| {
            c.make_minimum();
        })
    }

    /// Minimum, proper, and every premise is already the
    /// `Σ \ {r}`-closure of itself.
    pub fn is_canonical_basis(&self) -> bool {
        self.fixed_under(|c| {
            c.make_canonical_basis();
        })
    }

    /// Proper, left-minimal, direct and compact, all at once.
    pub fn is_canonical_direct_basis(&self) -> bool {
        self.fixed_under(|c| {
            c.make_canonical_direct_basis();
        })
    }

    /// Whether `self` is already in the canonical direct basis
    /// normal form -- the chosen meaning of "reduced" for a rule set.
    pub fn is_reduced(&self) -> bool {
        self.is_canonical_direct_basis()
    }

    /// Compares the proper-unary forms of `self` and `other` by
    /// rule-set inclusion: every unary, non-tautological implication
    /// `self` can derive, `other` can derive too.
    pub fn is_included_in(&self, other: &Self) -> bool {
        let mut a = self.clone();
        a.make_proper();
        a.make_unary();
        let mut b = other.clone();
        b.make_proper();
        b.make_unary();
        a.rules.is_subset(&b.rules)
    }
}

impl<T: Ord + Clone> ClosureSystem for ImplicationalSystem<T> {
    type Elem = T;

    fn ground_set(&self) -> BTreeSet<T> {
        self.elements.clone()
    }

    fn closure(&self, x: &BTreeSet<T>) -> BTreeSet<T> {
        fixpoint(&self.rules, x)
    }
}

/// The closure fixpoint operator, free of any `Self` so both the
/// inherent `closure` method and the rewrites that need to test
/// "closure under `Σ` minus one rule" can share it without borrowing
/// `self` mutably and immutably at once.
fn fixpoint<T: Ord + Clone>(rules: &BTreeSet<Rule<T>>, x: &BTreeSet<T>) -> BTreeSet<T> {
    let mut current = x.clone();
    loop {
        let mut changed = false;
        for r in rules {
            if r.premise().is_subset(&current) {
                for e in r.conclusion() {
                    if current.insert(e.clone()) {
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            tracing::trace!(size = current.len(), "closure fixpoint reached");
            return current;
        }
    }
}
