//! Reports module for cost-splitter
//!
//! Provides the monthly cost split report and its exports.

pub mod cost_split;

pub use cost_split::{BucketReportRow, CostSplitReport, EXPORT_COST_DIVISOR};
