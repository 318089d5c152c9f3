//! CLI command for the monthly run
//!
//! Runs the pipeline, prints the report and optionally writes it to a file.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::config::Settings;
use crate::error::{CostSplitError, CostSplitResult};
use crate::models::BillingPeriod;
use crate::reports::CostSplitReport;
use crate::services::{run, ObjectSource, RunOptions, RunOutcome};

/// Report file format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One row per bucket plus a total row
    Csv,
    /// The full report, pretty-printed
    Json,
}

impl ReportFormat {
    /// Pick a format from the output file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Arguments of the `run` command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Billing month to report on (YYYY-MM, default: last month)
    #[arg(short, long, value_parser = BillingPeriod::parse)]
    pub period: Option<BillingPeriod>,

    /// Use the archive already in the save folder instead of downloading it
    #[arg(long)]
    pub skip_download: bool,

    /// Print unmatched rows and track zero-cost rows as "Free"
    #[arg(short, long)]
    pub debug: bool,

    /// Also write the report to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report file format (default: from the output file extension)
    #[arg(short, long, value_enum, requires = "output")]
    pub format: Option<ReportFormat>,
}

impl RunArgs {
    fn options(&self) -> RunOptions {
        RunOptions {
            period: self.period.unwrap_or_else(BillingPeriod::last_month),
            skip_download: self.skip_download,
            debug: self.debug,
        }
    }
}

/// Result of the `run` command, mapped to the process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The report was printed
    Reported,
    /// The archive was not found after the fetch step
    ArchiveMissing,
}

/// Handle the `run` command
pub fn handle_run_command<S: ObjectSource + ?Sized>(
    settings: &Settings,
    args: &RunArgs,
    source: &S,
) -> CostSplitResult<RunStatus> {
    match run(settings, &args.options(), source)? {
        RunOutcome::Completed(report) => {
            print!("{}", report.format_terminal());
            if let Some(path) = &args.output {
                let format = args.format.unwrap_or_else(|| ReportFormat::from_path(path));
                write_report(&report, path, format)?;
                println!("Report written to: {}", path.display());
            }
            Ok(RunStatus::Reported)
        }
        RunOutcome::ArchiveMissing(path) => {
            println!("Error: File {} not downloaded from bucket", path.display());
            println!("\tare you sure it is there?");
            Ok(RunStatus::ArchiveMissing)
        }
    }
}

fn write_report(report: &CostSplitReport, path: &Path, format: ReportFormat) -> CostSplitResult<()> {
    let file = File::create(path).map_err(|e| {
        CostSplitError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let writer = BufWriter::new(file);

    match format {
        ReportFormat::Csv => report.export_csv(writer),
        ReportFormat::Json => report.export_json(writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ReportFormat::from_path(Path::new("out.json")), ReportFormat::Json);
        assert_eq!(ReportFormat::from_path(Path::new("out.JSON")), ReportFormat::Json);
        assert_eq!(ReportFormat::from_path(Path::new("out.csv")), ReportFormat::Csv);
        assert_eq!(ReportFormat::from_path(Path::new("report")), ReportFormat::Csv);
    }

    #[test]
    fn test_explicit_period_wins() {
        let args = RunArgs {
            period: Some(BillingPeriod::monthly(2023, 7)),
            ..RunArgs::default()
        };
        assert_eq!(args.options().period, BillingPeriod::monthly(2023, 7));
        assert!(!args.options().skip_download);
    }
}
