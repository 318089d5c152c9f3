//! Classification rules
//!
//! A rule pairs a bucket name with the substrings that route a row into it.
//! Rules are kept in declared order; the first one to match a row wins.

use serde::Serialize;

/// One bucket and the lowercase substrings that select it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationRule {
    /// Bucket that receives matching rows
    pub bucket: String,
    /// Lowercase substrings searched for in each searchable field
    pub substrings: Vec<String>,
}

impl ClassificationRule {
    /// Create a rule; substrings are lowercased so matching is case-insensitive
    pub fn new<I, S>(bucket: impl Into<String>, substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            bucket: bucket.into(),
            substrings: substrings
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }
}

/// Rules in priority order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleSet(Vec<ClassificationRule>);

impl RuleSet {
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self(rules)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassificationRule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bucket names in priority order
    pub fn bucket_names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|r| r.bucket.as_str())
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a ClassificationRule;
    type IntoIter = std::slice::Iter<'a, ClassificationRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
