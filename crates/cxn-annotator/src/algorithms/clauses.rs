//! Clause splitting at non-word boundaries.
//!
//! A word character is alphanumeric (any script) or `_`; maximal runs of
//! anything else separate clauses. Empty clauses are dropped.

use std::ops::Range;

/// A clause with its character range in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub range: Range<usize>,
    pub text: String,
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split `chars` into clauses. Ranges are offset by `base`.
pub fn split_clauses(chars: &[char], base: usize) -> Vec<Clause> {
    let mut clauses = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &c) in chars.iter().enumerate() {
        match (is_word_char(c), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                clauses.push(make_clause(chars, s, i, base));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        clauses.push(make_clause(chars, s, chars.len(), base));
    }

    clauses
}

fn make_clause(chars: &[char], start: usize, end: usize, base: usize) -> Clause {
    Clause {
        range: base + start..base + end,
        text: chars[start..end].iter().collect(),
    }
}
