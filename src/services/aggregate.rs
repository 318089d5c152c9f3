//! Cost aggregation
//!
//! Walks every record of the export, keeps the ones billed to the target
//! linked account, and accumulates their cost per bucket.

use serde::Serialize;
use tracing::{debug, warn};

use super::classify::classify;
use crate::models::{BucketTotals, CostRecord, RuleSet};

/// A non-empty searchable value of an unmatched row, kept for manual review
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditLine {
    pub row: usize,
    pub column: String,
    pub value: String,
}

/// Raw (un-normalized) aggregation result
#[derive(Debug, Clone, Serialize)]
pub struct Aggregation {
    /// Per-bucket totals
    pub totals: BucketTotals,
    /// Sum of every target-account record's cost
    pub total_cost: f64,
    /// Records billed to the target account
    pub relevant_count: usize,
    /// Records in the whole export
    pub total_count: usize,
    /// Unmatched rows' searchable values (debug mode only)
    pub audit: Vec<AuditLine>,
}

/// Inputs that stay fixed across one aggregation pass
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    account_id: &'a str,
    rules: &'a RuleSet,
    searchable_headings: &'a [String],
    debug: bool,
}

impl<'a> Aggregator<'a> {
    pub fn new(
        account_id: &'a str,
        rules: &'a RuleSet,
        searchable_headings: &'a [String],
        debug: bool,
    ) -> Self {
        Self {
            account_id,
            rules,
            searchable_headings,
            debug,
        }
    }

    /// Aggregate `records`
    ///
    /// The full list is scanned even though records are grouped by account.
    pub fn run(&self, records: &[CostRecord]) -> Aggregation {
        let mut totals = BucketTotals::for_rules(self.rules, self.debug);
        let mut audit = Vec::new();
        let mut total_cost = 0.0;
        let mut relevant_count = 0;

        for record in records.iter().filter(|r| r.belongs_to(self.account_id)) {
            relevant_count += 1;
            total_cost += record.cost;

            let classification = classify(record.cost, &record.fields, self.rules, self.debug);
            if let Some(bucket) = classification.bucket() {
                totals.add(bucket, record.cost);
            }

            if self.debug && classification.is_shared() {
                audit.extend(self.audit_lines(record));
            }
        }

        debug!(
            relevant = relevant_count,
            total = records.len(),
            "aggregated export"
        );
        if relevant_count == 0 {
            warn!(
                account = self.account_id,
                "no records in the export belong to the linked account"
            );
        }

        Aggregation {
            totals,
            total_cost,
            relevant_count,
            total_count: records.len(),
            audit,
        }
    }

    fn audit_lines<'r>(&'r self, record: &'r CostRecord) -> impl Iterator<Item = AuditLine> + 'r {
        self.searchable_headings
            .iter()
            .zip(&record.fields)
            .filter(|(_, value)| !value.is_empty())
            .map(move |(column, value)| AuditLine {
                row: record.row,
                column: column.clone(),
                value: value.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClassificationRule;

    const ACCOUNT: &str = "210987654321";

    fn rules() -> RuleSet {
        RuleSet::new(vec![
            ClassificationRule::new("Compute", ["ec2"]),
            ClassificationRule::new("Storage", ["s3"]),
        ])
    }

    fn headings() -> Vec<String> {
        vec!["ItemDescription".to_string(), "user:Project".to_string()]
    }

    fn record(row: usize, account: &str, cost: f64, desc: &str, project: &str) -> CostRecord {
        CostRecord::new(row, account, cost, vec![desc.to_string(), project.to_string()])
    }

    #[test]
    fn test_buckets_and_totals() {
        let rules = rules();
        let headings = headings();
        let records = vec![
            record(1, ACCOUNT, 40.0, "EC2-Instance", ""),
            record(2, ACCOUNT, 20.0, "S3-Bucket", ""),
            record(3, ACCOUNT, 7.0, "Route 53", "dns"),
            record(4, "999", 1000.0, "EC2-Instance", ""),
        ];

        let result = Aggregator::new(ACCOUNT, &rules, &headings, false).run(&records);

        assert_eq!(result.totals.cost_of("Compute"), 40.0);
        assert_eq!(result.totals.cost_of("Storage"), 20.0);
        assert_eq!(result.totals.cost_of("Shared"), 7.0);
        assert_eq!(result.total_cost, 67.0);
        assert_eq!(result.relevant_count, 3);
        assert_eq!(result.total_count, 4);
        assert!(result.audit.is_empty());
    }

    #[test]
    fn test_each_record_lands_in_one_bucket() {
        let rules = rules();
        let headings = headings();
        // Matches both rules; only the first receives it
        let records = vec![record(1, ACCOUNT, 9.0, "ec2 snapshot", "s3 copy")];

        let result = Aggregator::new(ACCOUNT, &rules, &headings, false).run(&records);
        assert_eq!(result.totals.cost_of("Compute"), 9.0);
        assert_eq!(result.totals.cost_of("Storage"), 0.0);
        assert_eq!(result.totals.cost_of("Shared"), 0.0);
        assert_eq!(result.totals.total(), 9.0);
    }

    #[test]
    fn test_zero_cost_blind_spot_without_debug() {
        let rules = rules();
        let headings = headings();
        let records = vec![
            record(1, ACCOUNT, 0.0, "EC2-Instance", ""),
            record(2, ACCOUNT, 0.0, "Route 53", ""),
        ];

        let result = Aggregator::new(ACCOUNT, &rules, &headings, false).run(&records);
        assert!(result.totals.iter().all(|b| b.record_count == 0));
        assert!(result.totals.get("Free").is_none());
        assert_eq!(result.relevant_count, 2);
    }

    #[test]
    fn test_debug_tracks_free_rows_and_audits_shared() {
        let rules = rules();
        let headings = headings();
        let records = vec![
            record(1, ACCOUNT, 0.0, "EC2-Instance", ""),
            record(2, ACCOUNT, 3.5, "Route 53", ""),
            record(3, ACCOUNT, -1.5, "Credit", "misc"),
        ];

        let result = Aggregator::new(ACCOUNT, &rules, &headings, true).run(&records);
        let free = result.totals.get("Free").unwrap();
        assert_eq!(free.record_count, 1);
        assert_eq!(free.cost, 0.0);
        assert_eq!(result.totals.cost_of("Shared"), 2.0);

        let audited: Vec<_> = result
            .audit
            .iter()
            .map(|a| (a.row, a.column.as_str(), a.value.as_str()))
            .collect();
        assert_eq!(
            audited,
            vec![
                (2, "ItemDescription", "Route 53"),
                (3, "ItemDescription", "Credit"),
                (3, "user:Project", "misc"),
            ]
        );
    }

    #[test]
    fn test_bucket_sum_matches_total_cost() {
        let rules = rules();
        let headings = headings();
        let records = vec![
            record(1, ACCOUNT, 100.0, "EC2", ""),
            record(2, ACCOUNT, 200.0, "something", ""),
            record(3, ACCOUNT, -50.0, "S3", ""),
            record(4, ACCOUNT, 0.0, "free tier", ""),
        ];

        let result = Aggregator::new(ACCOUNT, &rules, &headings, false).run(&records);
        assert_eq!(result.totals.total(), result.total_cost);
        assert_eq!(result.total_cost, 250.0);
    }

    #[test]
    fn test_no_relevant_records() {
        let rules = rules();
        let headings = headings();
        let records = vec![record(1, "999", 5.0, "EC2", "")];

        let result = Aggregator::new(ACCOUNT, &rules, &headings, false).run(&records);
        assert_eq!(result.relevant_count, 0);
        assert_eq!(result.total_count, 1);
        assert_eq!(result.total_cost, 0.0);
    }
}
