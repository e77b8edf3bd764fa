//! Row insertion strategies
//!
//! The strategy is picked once per load: a prepared statement when the
//! backend can bind one parameter per column, otherwise a textual INSERT
//! built for each row.

use tracing::{debug, warn};

use super::backend::{BoundValue, SqlBackend};
use super::literal::SqlLiteral;
use super::schema::TableSchema;
use super::stats::StrategyKind;
use crate::Result;
use crate::app::models::Field;

/// Per-load insertion strategy
#[derive(Debug, Clone, PartialEq)]
pub enum InsertStrategy {
    Prepared {
        sql: String,
        /// Reused between rows
        values: Vec<BoundValue>,
    },
    Textual {
        table: String,
    },
}

impl InsertStrategy {
    /// Choose and set up a strategy for `schema` on `backend`
    pub fn select<B: SqlBackend + ?Sized>(backend: &mut B, schema: &TableSchema) -> Self {
        let columns = schema.column_count();
        let supports_prepared = backend
            .max_bind_parameters()
            .is_some_and(|limit| columns > 0 && columns <= limit);

        if supports_prepared {
            let sql = schema.insert_statement();
            match backend.prepare(&sql) {
                Ok(()) => {
                    debug!("Using prepared INSERT for {} columns", columns);
                    return Self::Prepared {
                        sql,
                        values: Vec::with_capacity(columns),
                    };
                }
                Err(e) => warn!("Could not prepare INSERT, building statements per row: {}", e),
            }
        }

        debug!("Using textual INSERT for {} columns", columns);
        Self::Textual {
            table: schema.quoted_table(),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Prepared { .. } => StrategyKind::Prepared,
            Self::Textual { .. } => StrategyKind::Textual,
        }
    }

    /// Insert one row of fields
    pub fn insert<B: SqlBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        fields: &[Field],
        missing_marker: &str,
    ) -> Result<()> {
        match self {
            Self::Prepared { sql, values } => {
                values.clear();
                values.extend(
                    fields
                        .iter()
                        .map(|field| SqlLiteral::from_field(field, missing_marker).to_bound()),
                );
                backend.execute_prepared(sql, values)
            }
            Self::Textual { table } => {
                let dialect = backend.dialect();
                let literals: Vec<String> = fields
                    .iter()
                    .map(|field| SqlLiteral::from_field(field, missing_marker).to_sql(dialect))
                    .collect();
                let sql = format!("INSERT INTO {} VALUES ({})", table, literals.join(", "));
                backend.execute(&sql)
            }
        }
    }
}
