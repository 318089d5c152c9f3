//! cost-splitter - split a monthly cloud billing export into cost buckets
//!
//! This library downloads the previous month's detailed billing export,
//! unpacks it, and totals the cost of one linked account per bucket, where
//! buckets are chosen by matching configured substrings against selected
//! columns of each line item.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Settings file loading and archive/export path derivation
//! - `error`: Custom error types
//! - `models`: Billing periods, cost records, rules and bucket totals
//! - `services`: Fetch, extraction, export reading, classification, aggregation
//! - `reports`: The cost split report and its CSV/JSON exports
//! - `display`: Terminal formatting helpers
//! - `cli`: Command-line command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use cost_splitter::config::Settings;
//! use cost_splitter::services::{run, RunOptions, RunOutcome, S3ObjectSource};
//!
//! let settings = Settings::load("config.yml".as_ref())?;
//! if let RunOutcome::Completed(report) = run(&settings, &RunOptions::last_month(), &S3ObjectSource::new())? {
//!     print!("{}", report.format_terminal());
//! }
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{CostSplitError, CostSplitResult};
