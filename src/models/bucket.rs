//! Bucket totals
//!
//! Accumulated cost per bucket. Insertion order is kept so the report lists
//! buckets in rule priority order followed by the reserved buckets.

use serde::Serialize;

use super::rule::RuleSet;

/// Bucket for non-zero rows that no rule matched
pub const SHARED_BUCKET: &str = "Shared";

/// Bucket for zero-cost rows, only tracked in debug mode
pub const FREE_BUCKET: &str = "Free";

/// Names a configured rule may not use
pub const RESERVED_BUCKETS: [&str; 2] = [SHARED_BUCKET, FREE_BUCKET];

/// Running total for one bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketTotal {
    pub name: String,
    pub cost: f64,
    pub record_count: usize,
}

impl BucketTotal {
    fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cost: 0.0,
            record_count: 0,
        }
    }
}

/// Ordered bucket name -> total mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BucketTotals {
    entries: Vec<BucketTotal>,
}

impl BucketTotals {
    /// Zeroed totals for every configured bucket, then "Shared", then "Free"
    /// when debug output is on
    pub fn for_rules(rules: &RuleSet, debug: bool) -> Self {
        let mut entries: Vec<BucketTotal> = rules.bucket_names().map(BucketTotal::empty).collect();
        entries.push(BucketTotal::empty(SHARED_BUCKET));
        if debug {
            entries.push(BucketTotal::empty(FREE_BUCKET));
        }
        Self { entries }
    }

    /// Add `cost` to `bucket`, creating the bucket at the end if unknown
    pub fn add(&mut self, bucket: &str, cost: f64) {
        match self.entries.iter_mut().find(|e| e.name == bucket) {
            Some(entry) => {
                entry.cost += cost;
                entry.record_count += 1;
            }
            None => self.entries.push(BucketTotal {
                name: bucket.to_string(),
                cost,
                record_count: 1,
            }),
        }
    }

    pub fn get(&self, bucket: &str) -> Option<&BucketTotal> {
        self.entries.iter().find(|e| e.name == bucket)
    }

    /// Accumulated cost of `bucket`, zero when the bucket is unknown
    pub fn cost_of(&self, bucket: &str) -> f64 {
        self.get(bucket).map(|e| e.cost).unwrap_or(0.0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BucketTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every bucket's cost
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.cost).sum()
    }
}
