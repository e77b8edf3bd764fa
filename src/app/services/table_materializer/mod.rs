//! Table materializer for numeric text input
//!
//! Folds tokenized rows into a [`DataTable`](crate::app::models::DataTable):
//! optional row names split off the front of each line, every other field
//! parsed as a floating-point number, NaN standing in for missing values.
//!
//! ## Architecture
//!
//! - [`materializer`] - Row folding, numeric conversion and width checking
//! - [`stats`] - Result and statistics types
//! - [`export`] - Parquet output through polars
//!
//! A data line whose width disagrees with the first data line stops
//! ingestion with [`Error::RowWidthMismatch`](crate::Error::RowWidthMismatch),
//! which carries the rows read so far.

pub mod export;
pub mod materializer;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use export::{to_dataframe, write_parquet};
pub use materializer::{NumericField, materialize_reader, parse_numeric, text_to_table};
pub use stats::{MaterializeResult, MaterializeStats};
