//! Configuration module for cost-splitter
//!
//! This module provides configuration management including:
//! - YAML settings loading and validation
//! - Archive and export path derivation

pub mod paths;
pub mod settings;

pub use paths::{ExportPaths, DEFAULT_CONFIG_FILE};
pub use settings::Settings;
