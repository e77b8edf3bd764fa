//! Database loader for delimited and fixed-width text
//!
//! Creates a table named after the input and inserts one row per data line,
//! sharing tokenization and column-name resolution with the table
//! materializer.
//!
//! ## Architecture
//!
//! - [`backend`] - The [`SqlBackend`] trait, SQL dialects and bound values
//! - [`sqlite`] - sqlx-based SQLite implementation of the backend
//! - [`schema`] - CREATE TABLE and INSERT statement generation
//! - [`literal`] - NULL/number/text classification of fields
//! - [`strategy`] - Prepared versus textual INSERT, chosen once per load
//! - [`loader`] - Batching, commits and failure handling
//! - [`stats`] - Load statistics
//!
//! ## Failure handling
//!
//! A failing INSERT is logged and counted; loading continues. Losing the
//! connection, an unreadable input or a failed commit stops the load, rolls
//! back the open batch and leaves earlier committed batches in place.
//!
//! ```rust
//! use std::io::Cursor;
//! use textload::{IngestConfig, SqliteBackend, load_reader};
//!
//! let mut db = SqliteBackend::open_in_memory().unwrap();
//! let input = Cursor::new("name,score\n'ann',1.5\n'bob',NaN\n");
//! let stats = load_reader(&mut db, input, "scores", &IngestConfig::default()).unwrap();
//!
//! assert_eq!(stats.rows_inserted, 2);
//! assert_eq!(db.count_rows("scores").unwrap(), 2);
//! ```

pub mod backend;
pub mod literal;
pub mod loader;
pub mod schema;
pub mod sqlite;
pub mod stats;
pub mod strategy;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use backend::{BoundValue, Dialect, SqlBackend};
pub use literal::SqlLiteral;
pub use loader::{load_reader, text_to_db};
pub use schema::{ColumnDef, TableSchema, table_name_from_path};
pub use sqlite::SqliteBackend;
pub use stats::{LoadStats, StrategyKind};
pub use strategy::InsertStrategy;
