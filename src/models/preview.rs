//! Preview models

use crate::utils::Table;

/// Result struct for the fetch-and-preview pipeline
#[derive(Debug)]
pub struct PreviewResult {
    /// Leading rows of the full table, all columns kept
    pub head: Table,
    /// Rows in the full table before the preview cut
    pub total_rows: usize,
    pub total_columns: usize,
}
