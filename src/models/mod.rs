//! Core data models for cost-splitter
//!
//! This module contains the data structures of the billing domain: billing
//! periods, cost records, classification rules and bucket totals.

pub mod bucket;
pub mod period;
pub mod record;
pub mod rule;

pub use bucket::{BucketTotal, BucketTotals, FREE_BUCKET, RESERVED_BUCKETS, SHARED_BUCKET};
pub use period::{BillingPeriod, PeriodParseError};
pub use record::CostRecord;
pub use rule::{ClassificationRule, RuleSet};
