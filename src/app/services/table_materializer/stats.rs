//! Materialization result and statistics types

use serde::{Deserialize, Serialize};

use crate::app::models::DataTable;

/// A materialized table with the statistics gathered while building it
#[derive(Debug, Clone)]
pub struct MaterializeResult {
    pub table: DataTable,
    pub stats: MaterializeStats,
}

/// Counters collected while materializing a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializeStats {
    /// Data rows appended to the table
    pub rows: usize,

    /// Cells stored as NaN because the field was empty or unparseable
    pub missing_values: usize,

    /// Non-empty fields that were not numbers
    pub unparseable_fields: usize,

    /// Blank or comment-only lines skipped
    pub skipped_lines: usize,
}

impl MaterializeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of cells that ended up missing, as a percentage
    pub fn missing_rate(&self, width: usize) -> f64 {
        let cells = self.rows * width;
        if cells == 0 {
            0.0
        } else {
            (self.missing_values as f64 / cells as f64) * 100.0
        }
    }

    /// True when every non-empty field parsed as a number
    pub fn is_clean(&self) -> bool {
        self.unparseable_fields == 0
    }
}
