//! Phase 7: Label resolution.
//!
//! Each cluster label resolves to the majority tag of its members. A decision
//! table then combines a char's cluster class, its own tag, and whether its
//! regex and deriv weights moved, into a final label. Smoothing finally clears
//! any interior char flanked by `others` on both sides.

use cxn_core::types::{FeatureSet, Role};

/// Majority tag per cluster label, indexed by label.
///
/// Members are tallied in position order and a missing tag counts as
/// `others`. Ties go to the tag encountered first; empty labels resolve to
/// `others`.
pub fn resolve_classes(labels: &[usize], tags: &[Role], k: usize) -> Vec<Role> {
    let mut tallies: Vec<Vec<(Role, usize)>> = vec![Vec::new(); k];
    for (&label, &tag) in labels.iter().zip(tags) {
        let Some(tally) = tallies.get_mut(label) else {
            continue;
        };
        match tally.iter_mut().find(|(role, _)| *role == tag) {
            Some((_, count)) => *count += 1,
            None => tally.push((tag, 1)),
        }
    }

    tallies
        .iter()
        .map(|tally| {
            tally
                .iter()
                .fold(None, |best: Option<(Role, usize)>, &(role, count)| match best {
                    Some((_, best_count)) if best_count >= count => best,
                    _ => Some((role, count)),
                })
                .map_or(Role::Others, |(role, _)| role)
        })
        .collect()
}

/// Final label of one char.
pub fn decide(class: Role, tag: Role, regex_adjusted: bool, deriv_adjusted: bool) -> Role {
    use Role::*;

    let both = regex_adjusted && deriv_adjusted;
    let either = regex_adjusted || deriv_adjusted;

    match (class, tag) {
        (Others, Constant) | (Constant, Constant) if both => Constant,
        (Others, Constant) | (Constant, Constant) => Others,
        (Others, Variable) if either => Variable,
        (Others, Variable) => Others,
        (Others, Others) if regex_adjusted => Variable,
        (Others, Others) => Others,
        (Constant, Variable) if both => Variable,
        (Constant, Variable) | (Constant, Others) => Others,
        (Variable, Constant) => Constant,
        (Variable, _) if either => Variable,
        (Variable, _) => Others,
    }
}

/// Apply [`decide`] at every position.
pub fn label_characters(features: &FeatureSet, labels: &[usize], classes: &[Role]) -> Vec<Role> {
    features
        .iter()
        .zip(labels)
        .map(|(f, &label)| {
            let class = classes.get(label).copied().unwrap_or(Role::Others);
            decide(class, f.role(), f.regex_adjusted(), f.deriv_adjusted())
        })
        .collect()
}

/// Clear interior labels whose neighbours are both `others`.
///
/// Neighbours are read from the unsmoothed input.
pub fn smooth(labels: &[Role]) -> Vec<Role> {
    let mut smoothed = labels.to_vec();
    for i in 1..labels.len().saturating_sub(1) {
        if labels[i - 1] == Role::Others && labels[i + 1] == Role::Others {
            smoothed[i] = Role::Others;
        }
    }
    smoothed
}
