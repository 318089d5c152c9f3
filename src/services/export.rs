//! Billing export reader
//!
//! Reads the comma-delimited billing export, resolves the columns of
//! interest from the header row and turns each data row into a
//! [`CostRecord`]. Records come back sorted by linked account.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{CostSplitError, CostSplitResult};
use crate::models::CostRecord;

/// Header of the linked account column
pub const LINKED_ACCOUNT_HEADING: &str = "LinkedAccountId";

/// Header of the blended cost column
pub const BLENDED_COST_HEADING: &str = "BlendedCost";

/// Column positions resolved from the export header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Index of the linked account column
    pub linked_account_column: usize,
    /// Index of the blended cost column
    pub cost_column: usize,
    /// Searchable columns as (heading, index), in configured order
    pub searchable_columns: Vec<(String, usize)>,
}

impl ColumnLayout {
    /// Resolve column positions by heading name
    ///
    /// The first column carrying a heading wins when a heading repeats.
    pub fn from_headers(headers: &StringRecord, searchable: &[String]) -> CostSplitResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| CostSplitError::missing_column(name))
        };

        let linked_account_column = find(LINKED_ACCOUNT_HEADING)?;
        let cost_column = find(BLENDED_COST_HEADING)?;
        let searchable_columns = searchable
            .iter()
            .map(|name| find(name.as_str()).map(|idx| (name.clone(), idx)))
            .collect::<CostSplitResult<Vec<_>>>()?;

        Ok(Self {
            linked_account_column,
            cost_column,
            searchable_columns,
        })
    }

    /// Searchable column headings, in the same order as [`CostRecord::fields`]
    pub fn searchable_headings(&self) -> Vec<String> {
        self.searchable_columns
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Parsed contents of one export file
#[derive(Debug, Clone)]
pub struct BillingExport {
    /// Resolved column layout
    pub layout: ColumnLayout,
    /// All data rows, sorted by linked account
    pub records: Vec<CostRecord>,
}

impl BillingExport {
    /// Total number of data rows in the export
    pub fn total_rows(&self) -> usize {
        self.records.len()
    }
}

/// Read and sort the export at `path`
pub fn read_export(path: &Path, searchable: &[String]) -> CostSplitResult<BillingExport> {
    let file = File::open(path).map_err(|e| {
        CostSplitError::Io(format!("Failed to open export {}: {}", path.display(), e))
    })?;
    let mut reader = ReaderBuilder::new().delimiter(b',').from_reader(file);
    read_export_from_reader(&mut reader, searchable)
}

/// Read and sort an export from any CSV reader
pub fn read_export_from_reader<R: Read>(
    reader: &mut Reader<R>,
    searchable: &[String],
) -> CostSplitResult<BillingExport> {
    let headers = reader.headers()?.clone();
    let layout = ColumnLayout::from_headers(&headers, searchable)?;
    debug!(
        linked_account = layout.linked_account_column,
        cost = layout.cost_column,
        searchable = ?layout.searchable_columns,
        "resolved export columns"
    );

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        records.push(parse_record(&record, idx + 1, &layout)?);
    }

    records.sort_by(|a, b| a.linked_account_id.cmp(&b.linked_account_id));

    Ok(BillingExport { layout, records })
}

fn parse_record(
    record: &StringRecord,
    row: usize,
    layout: &ColumnLayout,
) -> CostSplitResult<CostRecord> {
    let cell = |idx: usize| {
        record.get(idx).ok_or_else(|| {
            CostSplitError::Csv(format!("row {} has no column {}", row, idx + 1))
        })
    };

    let linked_account_id = cell(layout.linked_account_column)?;
    let cost_text = cell(layout.cost_column)?;
    let cost = parse_amount(cost_text).ok_or_else(|| CostSplitError::InvalidAmount {
        row,
        value: cost_text.to_string(),
    })?;

    let fields = layout
        .searchable_columns
        .iter()
        .map(|(_, idx)| cell(*idx).map(str::to_string))
        .collect::<CostSplitResult<Vec<_>>>()?;

    Ok(CostRecord::new(row, linked_account_id, cost, fields))
}

fn parse_amount(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
