//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod config;
pub mod run;

pub use config::handle_config_command;
pub use run::{handle_run_command, ReportFormat, RunArgs, RunStatus};
