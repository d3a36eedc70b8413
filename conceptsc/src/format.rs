//! The round-trippable, line-oriented IS text format:
//!
//! ```text
//! e1 e2 e3 ... en            ← ground set, whitespace-separated, one line
//! p1 p2 -> c1 c2             ← zero or more rule lines
//! ```
use std::collections::BTreeSet;

use concepts_core::{ImplicationalSystem, Rule};

use crate::error::ConceptsIoError;

/// Parses the ground set from the first line and a rule from every
/// following non-blank line.
///
/// A token in a rule line that wasn't on the ground-set line is
/// silently dropped from that rule; a rule left with an empty
/// conclusion after dropping is not added. A rule line missing the
/// literal `->` token is a [`ConceptsIoError::MalformedLine`].
pub fn parse_is(input: &str) -> Result<ImplicationalSystem<String>, ConceptsIoError> {
    let mut lines = input.lines();
    let mut is = ImplicationalSystem::new();
    if let Some(ground_line) = lines.next() {
        is.add_all_elements(ground_line.split_whitespace().map(str::to_owned));
    }
    for (offset, raw) in lines.enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let arrow = line.find("->").ok_or_else(|| ConceptsIoError::MalformedLine {
            line: offset + 2,
            text: raw.to_owned(),
        })?;
        let (premise_str, rest) = line.split_at(arrow);
        let conclusion_str = &rest["->".len()..];
        let premise = known_tokens(&is, premise_str);
        let conclusion = known_tokens(&is, conclusion_str);
        if conclusion.is_empty() {
            continue;
        }
        is.add_rule(Rule::new(premise, conclusion));
    }
    tracing::debug!(
        elements = is.elements().len(),
        rules = is.rules().len(),
        "parsed implicational system"
    );
    Ok(is)
}

fn known_tokens(is: &ImplicationalSystem<String>, text: &str) -> BTreeSet<String> {
    text.split_whitespace()
        .filter(|tok| is.elements().contains(&tok.to_string()))
        .map(str::to_owned)
        .collect()
}

/// Writes the ground set, then one rule per line, in that order.
///
/// Each element is written with its internal whitespace stripped --
/// defensive token concatenation, since the format is whitespace
/// delimited and an element whose own text contains a space would
/// otherwise split into multiple tokens on the next parse. Every line
/// ends with the platform newline.
pub fn write_is(is: &ImplicationalSystem<String>) -> String {
    let newline = if cfg!(windows) { "\r\n" } else { "\n" };
    let mut out = String::new();
    let elements: Vec<String> = is.elements().iter().map(|e| defensive_token(e)).collect();
    out.push_str(&elements.join(" "));
    out.push_str(newline);
    for rule in is.rules() {
        let premise: Vec<String> = rule.premise().iter().map(|e| defensive_token(e)).collect();
        let conclusion: Vec<String> = rule.conclusion().iter().map(|e| defensive_token(e)).collect();
        out.push_str(&premise.join(" "));
        out.push_str(" -> ");
        out.push_str(&conclusion.join(" "));
        out.push_str(newline);
    }
    out
}

fn defensive_token(s: &str) -> String {
    s.split_whitespace().collect()
}
