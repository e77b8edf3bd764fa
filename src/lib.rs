//! textload Library
//!
//! Converts loosely formatted delimited or fixed-width text into structured
//! tabular data: either an in-memory numeric [`DataTable`] or rows inserted
//! into a relational database table.
//!
//! This library provides tools for:
//! - Tokenizing lines with quoting, escaping, comment stripping and
//!   whitespace-delimiter collapsing, or by fixed column-end offsets
//! - Resolving column names from the input, an explicit list, or defaults
//! - Materializing rows into a numeric table with optional row names
//! - Loading rows into a database table in committed batches
//!
//! ```rust
//! use std::io::Cursor;
//! use textload::{IngestConfig, materialize_reader};
//!
//! let input = Cursor::new("x,y\n1,2\n3,\n");
//! let result = materialize_reader(input, &IngestConfig::default()).unwrap();
//!
//! assert_eq!(result.table.column_names(), ["x", "y"]);
//! assert_eq!(result.table.get(0, 1), Some(2.0));
//! assert!(result.table.get(1, 1).unwrap().is_nan());
//! ```

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod db_loader;
        pub mod field_names;
        pub mod table_materializer;
        pub mod tokenizer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DataTable, RowBuffer};
pub use app::services::db_loader::{LoadStats, SqlBackend, SqliteBackend, load_reader, text_to_db};
pub use app::services::table_materializer::{
    MaterializeResult, materialize_reader, text_to_table, write_parquet,
};
pub use config::IngestConfig;

/// Result type alias for textload operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for text ingestion
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input stream could not be opened
    #[error("Failed to open input '{path}'")]
    OpenFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A data line disagrees with the established table width.
    ///
    /// The rows accumulated before the offending line are kept in `partial`.
    #[error("Line {line} (data row {row}) has {found} data fields, expected {expected}")]
    RowWidthMismatch {
        line: usize,
        row: usize,
        expected: usize,
        found: usize,
        partial: Box<DataTable>,
    },

    /// Table storage could not grow
    #[error("Allocation failed: {message}")]
    Allocation { message: String },

    /// A single field exceeded the configured size limit
    #[error("Field on line {line} exceeds the {limit}-byte limit")]
    FieldTooLong { line: usize, limit: usize },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Input held no data lines
    #[error("No data found in input '{path}'")]
    EmptyInput { path: String },

    /// Destination table is already present
    #[error("Table '{table}' already exists; not recreating it")]
    TableExists { table: String },

    /// CREATE TABLE did not produce the table
    #[error("Creating table '{table}' failed: {message}")]
    TableCreation { table: String, message: String },

    /// A statement failed
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<sqlx::Error>,
    },

    /// The database connection can no longer be used
    #[error("Database connection lost: {message}")]
    ConnectionLost { message: String },

    /// Writing an exported table failed
    #[error("Export error: {message}")]
    Export {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an open failure for the named input
    pub fn open_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::OpenFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an empty input error
    pub fn empty_input(path: impl Into<String>) -> Self {
        Self::EmptyInput { path: path.into() }
    }

    /// Create a table creation error
    pub fn table_creation(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TableCreation {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a database error without an underlying driver error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection lost error
    pub fn connection_lost(message: impl Into<String>) -> Self {
        Self::ConnectionLost {
            message: message.into(),
        }
    }

    /// True when the error means the database connection is unusable
    pub fn is_connection_lost(&self) -> bool {
        matches!(self, Self::ConnectionLost { .. })
    }

    /// Rows accumulated before a row-width mismatch stopped ingestion
    pub fn partial_table(&self) -> Option<&DataTable> {
        match self {
            Self::RowWidthMismatch { partial, .. } => Some(partial),
            _ => None,
        }
    }

    /// Take ownership of the partial table of a row-width mismatch
    pub fn into_partial_table(self) -> Option<DataTable> {
        match self {
            Self::RowWidthMismatch { partial, .. } => Some(*partial),
            _ => None,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Io(_) | sqlx::Error::WorkerCrashed | sqlx::Error::PoolClosed => {
                Self::ConnectionLost {
                    message: error.to_string(),
                }
            }
            other => Self::Database {
                message: other.to_string(),
                source: Some(other),
            },
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::Export {
            message: "Polars operation failed".to_string(),
            source: error,
        }
    }
}

impl From<regex::Error> for Error {
    fn from(error: regex::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid column-type pattern: {}", error),
        }
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(error: std::collections::TryReserveError) -> Self {
        Self::Allocation {
            message: error.to_string(),
        }
    }
}
