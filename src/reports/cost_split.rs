//! Cost Split Report
//!
//! The per-run summary: total cost of the linked account and how it splits
//! across buckets for one billing month.

use std::io::Write;
use std::time::Duration;

use serde::Serialize;

use crate::display::{format_amount, format_percentage, separator};
use crate::error::{CostSplitError, CostSplitResult};
use crate::models::BillingPeriod;
use crate::services::aggregate::{Aggregation, AuditLine};

/// Every reported amount is divided by this before display.
///
/// The detailed line-item export appears to list each charge twice, so the
/// raw sums come out doubled. This has not been confirmed against the
/// billing export documentation; check before relying on absolute figures.
pub const EXPORT_COST_DIVISOR: f64 = 2.0;

/// One bucket line of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketReportRow {
    /// Bucket name
    pub name: String,
    /// Normalized cost
    pub cost: f64,
    /// Number of records that landed in the bucket
    pub record_count: usize,
    /// Share of the normalized total cost
    pub percentage: f64,
}

/// Cost Split Report
#[derive(Debug, Clone, Serialize)]
pub struct CostSplitReport {
    /// Billing month reported on
    pub period: BillingPeriod,
    /// Linked account the report covers
    pub linked_account_id: String,
    /// Normalized total cost of the linked account
    pub total_cost: f64,
    /// Buckets in rule order, then "Shared", then "Free"
    pub buckets: Vec<BucketReportRow>,
    /// Records billed to the linked account
    pub relevant_count: usize,
    /// Records in the whole export
    pub total_count: usize,
    /// Wall-clock time of the run
    pub elapsed_seconds: f64,
    /// Unmatched rows' searchable values (debug mode only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub audit: Vec<AuditLine>,
}

impl CostSplitReport {
    /// Build the report from a raw aggregation
    pub fn generate(
        period: BillingPeriod,
        linked_account_id: impl Into<String>,
        aggregation: Aggregation,
        elapsed: Duration,
    ) -> Self {
        let total_cost = aggregation.total_cost / EXPORT_COST_DIVISOR;

        let buckets = aggregation
            .totals
            .iter()
            .map(|bucket| {
                let cost = bucket.cost / EXPORT_COST_DIVISOR;
                let percentage = if total_cost == 0.0 {
                    0.0
                } else {
                    cost / total_cost * 100.0
                };
                BucketReportRow {
                    name: bucket.name.clone(),
                    cost,
                    record_count: bucket.record_count,
                    percentage,
                }
            })
            .collect();

        Self {
            period,
            linked_account_id: linked_account_id.into(),
            total_cost,
            buckets,
            relevant_count: aggregation.relevant_count,
            total_count: aggregation.total_count,
            elapsed_seconds: elapsed.as_secs_f64(),
            audit: aggregation.audit,
        }
    }

    /// Look up a bucket line by name
    pub fn bucket(&self, name: &str) -> Option<&BucketReportRow> {
        self.buckets.iter().find(|b| b.name == name)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        if !self.audit.is_empty() {
            output.push_str("Unmatched records:\n");
            for line in &self.audit {
                output.push_str(&format!("{} - {}\n", line.column, line.value));
            }
            output.push_str(&separator(40));
            output.push('\n');
        }

        output.push_str(&format!("For the month of {}\n", self.period));
        output.push_str(&format!("Total Cost: {}\n", format_amount(self.total_cost)));
        for bucket in &self.buckets {
            output.push_str(&format!(
                "{} cost is {} ({})\n",
                bucket.name,
                format_amount(bucket.cost),
                format_percentage(bucket.percentage)
            ));
        }
        output.push_str(&format!(
            "{} of {} records were relevant\n",
            self.relevant_count, self.total_count
        ));
        output.push_str(&format!(
            "completed in {} seconds\n",
            self.elapsed_seconds.round() as u64
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> CostSplitResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| CostSplitError::Export(e.to_string());

        csv.write_record(["Month", "Bucket", "Cost", "Records", "Percentage"])
            .map_err(export_err)?;

        let month = self.period.to_string();
        for bucket in &self.buckets {
            csv.write_record([
                month.as_str(),
                bucket.name.as_str(),
                &format!("{:.2}", bucket.cost),
                &bucket.record_count.to_string(),
                &format!("{:.2}", bucket.percentage),
            ])
            .map_err(export_err)?;
        }

        csv.write_record([
            month.as_str(),
            "TOTAL",
            &format!("{:.2}", self.total_cost),
            &self.relevant_count.to_string(),
            "100.00",
        ])
        .map_err(export_err)?;

        csv.flush()
            .map_err(|e| CostSplitError::Export(e.to_string()))?;
        Ok(())
    }

    /// Export the report as pretty-printed JSON
    pub fn export_json<W: Write>(&self, writer: W) -> CostSplitResult<()> {
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| CostSplitError::Export(e.to_string()))
    }
}
