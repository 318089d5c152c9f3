//! The monthly run
//!
//! fetch -> extract -> read -> aggregate -> report, strictly in that order.
//! Nothing is retried; any failure ends the run.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, warn};

use super::aggregate::Aggregator;
use super::archive::extract_entry;
use super::export::read_export;
use super::fetch::ObjectSource;
use crate::config::{ExportPaths, Settings};
use crate::error::{CostSplitError, CostSplitResult};
use crate::models::BillingPeriod;
use crate::reports::CostSplitReport;

/// Per-invocation choices layered over the settings file
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Billing month to report on
    pub period: BillingPeriod,
    /// Reuse an archive already in the save folder
    pub skip_download: bool,
    /// Force debug output on regardless of settings
    pub debug: bool,
}

impl RunOptions {
    /// Report on last month, downloading the archive
    pub fn last_month() -> Self {
        Self {
            period: BillingPeriod::last_month(),
            skip_download: false,
            debug: false,
        }
    }
}

/// How a run ended
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The export was processed; the report may still cover zero records
    Completed(CostSplitReport),
    /// No archive was found where the download should have put it
    ArchiveMissing(PathBuf),
}

/// Execute one run
pub fn run<S: ObjectSource + ?Sized>(
    settings: &Settings,
    options: &RunOptions,
    source: &S,
) -> CostSplitResult<RunOutcome> {
    let started = Instant::now();
    let paths = ExportPaths::new(settings, options.period);
    let debug = settings.debug || options.debug;

    paths.ensure_save_folder()?;

    if options.skip_download {
        info!(archive = %paths.archive_path().display(), "skipping download");
    } else {
        info!(
            bucket = %settings.bucket_name,
            key = %paths.archive_name(),
            "fetching archive"
        );
        source.fetch(
            &settings.bucket_name,
            &paths.archive_name(),
            &paths.archive_path(),
        )?;
    }

    let export_path = match extract_entry(
        &paths.archive_path(),
        paths.export_name(),
        paths.save_folder(),
    ) {
        Ok(path) => path,
        Err(CostSplitError::ArchiveMissing { path }) => {
            warn!(archive = %path.display(), "archive missing after fetch");
            return Ok(RunOutcome::ArchiveMissing(path));
        }
        Err(e) => return Err(e),
    };

    let export = read_export(&export_path, &settings.searchable_columns)?;
    let headings = export.layout.searchable_headings();
    let aggregation = Aggregator::new(
        &settings.linked_account_id,
        &settings.rules,
        &headings,
        debug,
    )
    .run(&export.records);

    Ok(RunOutcome::Completed(CostSplitReport::generate(
        options.period,
        settings.linked_account_id.clone(),
        aggregation,
        started.elapsed(),
    )))
}
