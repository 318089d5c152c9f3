//! Path management for cost-splitter
//!
//! Derives the names and local locations of the monthly archive and the
//! export it contains.
//!
//! ## Naming
//!
//! - Export file: `<file_pattern>-<YYYY-MM>.csv`
//! - Archive (and remote object key): `<export file>.zip`
//! - Both live directly under `save_folder`

use std::path::{Path, PathBuf};

use super::settings::Settings;
use crate::error::CostSplitError;
use crate::models::BillingPeriod;

/// Settings file used when none is given on the command line
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Locations of everything one run reads or writes
#[derive(Debug, Clone)]
pub struct ExportPaths {
    save_folder: PathBuf,
    export_name: String,
}

impl ExportPaths {
    /// Resolve paths for the export of `period`
    pub fn new(settings: &Settings, period: BillingPeriod) -> Self {
        Self {
            save_folder: settings.save_folder.clone(),
            export_name: format!("{}-{}.csv", settings.file_pattern, period),
        }
    }

    /// Get the local working folder
    pub fn save_folder(&self) -> &Path {
        &self.save_folder
    }

    /// Get the export file name, as stored inside the archive
    pub fn export_name(&self) -> &str {
        &self.export_name
    }

    /// Get the archive file name, which is also the remote object key
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.export_name)
    }

    /// Get the path of the downloaded archive
    pub fn archive_path(&self) -> PathBuf {
        self.save_folder.join(self.archive_name())
    }

    /// Get the path of the extracted export
    pub fn export_path(&self) -> PathBuf {
        self.save_folder.join(&self.export_name)
    }

    /// Ensure the working folder exists
    pub fn ensure_save_folder(&self) -> Result<(), CostSplitError> {
        std::fs::create_dir_all(&self.save_folder).map_err(|e| {
            CostSplitError::Io(format!(
                "Failed to create save folder {}: {}",
                self.save_folder.display(),
                e
            ))
        })
    }
}
