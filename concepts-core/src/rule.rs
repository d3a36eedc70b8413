//! Implications `P -> C` over a ground set of elements, and the
//! support/confidence-bearing variant used by `make_compact_association`.
use std::collections::BTreeSet;
use std::fmt;

/// An implication `premise -> conclusion`.
///
/// Ordered lexicographically by premise, then by conclusion -- the
/// field order below is exactly that order, so the derived [`Ord`]
/// gives that total order for free, and a [`BTreeSet<Rule<T>>`]
/// is at once deduplicated and kept in that order.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct Rule<T: Ord> {
    premise: BTreeSet<T>,
    conclusion: BTreeSet<T>,
}

impl<T: Ord + Clone> Rule<T> {
    /// Builds a rule from a premise and a conclusion.
    pub fn new(premise: BTreeSet<T>, conclusion: BTreeSet<T>) -> Self {
        Self { premise, conclusion }
    }

    /// The premise `P`.
    pub fn premise(&self) -> &BTreeSet<T> {
        &self.premise
    }

    /// The conclusion `C`.
    pub fn conclusion(&self) -> &BTreeSet<T> {
        &self.conclusion
    }

    /// Consumes the rule, returning `(premise, conclusion)`.
    pub fn into_parts(self) -> (BTreeSet<T>, BTreeSet<T>) {
        (self.premise, self.conclusion)
    }

    /// Every element mentioned by this rule, premise or conclusion.
    pub fn elements(&self) -> impl Iterator<Item = &T> {
        self.premise.iter().chain(self.conclusion.iter())
    }
}

impl<T: Ord + fmt::Display> fmt::Display for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p: Vec<String> = self.premise.iter().map(|e| e.to_string()).collect();
        let c: Vec<String> = self.conclusion.iter().map(|e| e.to_string()).collect();
        write!(f, "{} -> {}", p.join(" "), c.join(" "))
    }
}

/// A [`Rule`] extended with support and confidence, as mined by a
/// frequent-itemset pass upstream of this crate. Only
/// `make_compact_association` needs the extra fields, so they live on
/// a separate type rather than bloating every plain [`Rule`].
#[derive(Clone, Debug)]
pub struct AssociationRule<T: Ord> {
    /// The underlying implication.
    pub rule: Rule<T>,
    /// Fraction of the transaction universe this rule was observed in.
    pub support: f64,
    /// Fraction of premise-matching transactions that also matched the
    /// conclusion.
    pub confidence: f64,
}

impl<T: Ord + Clone> AssociationRule<T> {
    /// Builds an association rule.
    pub fn new(rule: Rule<T>, support: f64, confidence: f64) -> Self {
        Self { rule, support, confidence }
    }
}

/// A collection of [`AssociationRule`]s, kept only to provide
/// `make_compact_association` its natural home.
#[derive(Clone, Debug, Default)]
pub struct AssociationRuleSet<T: Ord> {
    rules: Vec<AssociationRule<T>>,
}

impl<T: Ord + Clone> AssociationRuleSet<T> {
    /// Wraps an already-mined rule list.
    pub fn new(rules: Vec<AssociationRule<T>>) -> Self {
        Self { rules }
    }

    /// The rules, in whatever order they were supplied.
    pub fn rules(&self) -> &[AssociationRule<T>] {
        &self.rules
    }

    /// Consumes the set, returning its rules.
    pub fn into_rules(self) -> Vec<AssociationRule<T>> {
        self.rules
    }

    /// Merges rules sharing a premise *and* matching support and
    /// confidence exactly, replacing them with one rule whose
    /// conclusion is the union of theirs. Rules that share a premise
    /// but disagree on support or confidence are left untouched --
    /// they describe the same antecedent under different evidence and
    /// can't be soundly combined into a single line.
    ///
    /// Returns the signed rule-count delta `before - after`.
    pub fn make_compact_association(&mut self) -> i64 {
        let before = self.rules.len() as i64;
        let mut merged: std::collections::BTreeMap<(BTreeSet<T>, u64, u64), (BTreeSet<T>, f64, f64)> =
            std::collections::BTreeMap::new();
        for r in self.rules.drain(..) {
            let key = (
                r.rule.premise().clone(),
                r.support.to_bits(),
                r.confidence.to_bits(),
            );
            let entry = merged
                .entry(key)
                .or_insert_with(|| (BTreeSet::new(), r.support, r.confidence));
            entry.0.extend(r.rule.conclusion().iter().cloned());
        }
        self.rules = merged
            .into_iter()
            .map(|((premise, _, _), (conclusion, support, confidence))| {
                AssociationRule::new(Rule::new(premise, conclusion), support, confidence)
            })
            .collect();
        let after = self.rules.len() as i64;
        before - after
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rules_order_lexicographically_by_premise_then_conclusion() {
        let r1 = Rule::new(set(&["a"]), set(&["b"]));
        let r2 = Rule::new(set(&["a"]), set(&["c"]));
        let r3 = Rule::new(set(&["b"]), set(&["a"]));
        assert!(r1 < r2);
        assert!(r2 < r3);
    }

    #[test]
    fn duplicate_rules_collapse_in_a_btreeset() {
        let mut rules: BTreeSet<Rule<String>> = BTreeSet::new();
        rules.insert(Rule::new(set(&["a"]), set(&["b"])));
        rules.insert(Rule::new(set(&["a"]), set(&["b"])));
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn compact_association_merges_matching_support_and_confidence() {
        let mut ruleset = AssociationRuleSet::new(vec![
            AssociationRule::new(Rule::new(set(&["a"]), set(&["b"])), 0.5, 0.9),
            AssociationRule::new(Rule::new(set(&["a"]), set(&["c"])), 0.5, 0.9),
            AssociationRule::new(Rule::new(set(&["a"]), set(&["d"])), 0.5, 0.8),
        ]);
        let delta = ruleset.make_compact_association();
        assert_eq!(delta, 1);
        assert_eq!(ruleset.rules().len(), 2);
        let merged = ruleset
            .rules()
            .iter()
            .find(|r| r.confidence == 0.9)
            .unwrap();
        assert_eq!(merged.rule.conclusion(), &set(&["b", "c"]));
    }
}
