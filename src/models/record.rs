//! Cost record model
//!
//! One data row of the billing export, reduced to the parts classification
//! needs.

/// A single line item from the billing export
#[derive(Debug, Clone, PartialEq)]
pub struct CostRecord {
    /// 1-based data row number in the export (header excluded)
    pub row: usize,
    /// Linked (sub-)account the line item was billed to
    pub linked_account_id: String,
    /// Blended cost of the line item; may be zero or negative
    pub cost: f64,
    /// Searchable column values, in configured column order
    pub fields: Vec<String>,
}

impl CostRecord {
    pub fn new(
        row: usize,
        linked_account_id: impl Into<String>,
        cost: f64,
        fields: Vec<String>,
    ) -> Self {
        Self {
            row,
            linked_account_id: linked_account_id.into(),
            cost,
            fields,
        }
    }

    /// Check whether this record is billed to `account_id`
    pub fn belongs_to(&self, account_id: &str) -> bool {
        self.linked_account_id == account_id
    }
}
