//! Row classification
//!
//! Decides which bucket a cost record belongs to. Rules are tried in
//! priority order; within a rule each substring is tried against every
//! searchable field before moving on to the next substring. The first hit
//! ends the search.

use crate::models::{RuleSet, FREE_BUCKET, SHARED_BUCKET};

/// Where a record's cost goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'r> {
    /// Matched the rule for this bucket
    Rule(&'r str),
    /// Non-zero cost that no rule matched
    Shared,
    /// Zero cost, tracked only in debug mode
    Free,
    /// Zero cost outside debug mode; counted in no bucket
    Ignored,
}

impl<'r> Classification<'r> {
    /// Bucket receiving the cost, if any
    pub fn bucket(&self) -> Option<&'r str> {
        match *self {
            Self::Rule(name) => Some(name),
            Self::Shared => Some(SHARED_BUCKET),
            Self::Free => Some(FREE_BUCKET),
            Self::Ignored => None,
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared)
    }
}

/// Classify one record by its cost and searchable field values
pub fn classify<'r, S: AsRef<str>>(
    cost: f64,
    fields: &[S],
    rules: &'r RuleSet,
    debug: bool,
) -> Classification<'r> {
    if cost == 0.0 {
        return if debug {
            Classification::Free
        } else {
            Classification::Ignored
        };
    }

    let lowered: Vec<String> = fields.iter().map(|f| f.as_ref().to_lowercase()).collect();

    for rule in rules {
        for substring in &rule.substrings {
            if lowered.iter().any(|field| field.contains(substring.as_str())) {
                return Classification::Rule(&rule.bucket);
            }
        }
    }

    Classification::Shared
}
