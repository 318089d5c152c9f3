//! Service layer for cost-splitter
//!
//! The pipeline stages: fetching and unpacking the monthly archive, reading
//! the export, classifying rows and aggregating their cost.

pub mod aggregate;
pub mod archive;
pub mod classify;
pub mod export;
pub mod fetch;
pub mod pipeline;

pub use aggregate::{Aggregation, Aggregator, AuditLine};
pub use archive::extract_entry;
pub use classify::{classify, Classification};
pub use export::{read_export, BillingExport, ColumnLayout, BLENDED_COST_HEADING, LINKED_ACCOUNT_HEADING};
pub use fetch::{ObjectSource, S3ObjectSource};
pub use pipeline::{run, RunOptions, RunOutcome};
