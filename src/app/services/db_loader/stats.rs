//! Load statistics

use serde::{Deserialize, Serialize};
use std::fmt;

/// How rows are sent to the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    /// One compiled parameterized INSERT, rebound per row
    Prepared,
    /// A freshly built INSERT statement per row
    Textual,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prepared => write!(f, "prepared"),
            Self::Textual => write!(f, "textual"),
        }
    }
}

/// Outcome of loading a text file into a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    pub table: String,

    /// Columns created, including the row-name column
    pub columns: usize,

    pub rows_inserted: usize,

    /// Rows skipped because their INSERT failed or their width was wrong
    pub rows_failed: usize,

    pub batches_committed: usize,

    pub strategy: StrategyKind,
}

impl LoadStats {
    pub fn new(table: impl Into<String>, columns: usize, strategy: StrategyKind) -> Self {
        Self {
            table: table.into(),
            columns,
            rows_inserted: 0,
            rows_failed: 0,
            batches_committed: 0,
            strategy,
        }
    }

    /// Data rows read, whether or not they were inserted
    pub fn rows_read(&self) -> usize {
        self.rows_inserted + self.rows_failed
    }

    pub fn is_complete(&self) -> bool {
        self.rows_failed == 0
    }
}
