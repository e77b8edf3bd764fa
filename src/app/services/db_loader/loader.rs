//! Text-to-database loading
//!
//! Creates the destination table from the resolved column names (or from
//! the first data line when names are synthesized), then inserts every following row, committing in
//! batches of `batch_size` rows.

use std::io::BufRead;
use tracing::{debug, info, warn};

use super::backend::SqlBackend;
use super::schema::TableSchema;
use super::stats::LoadStats;
use super::strategy::InsertStrategy;
use crate::app::models::RowBuffer;
use crate::app::services::field_names::resolve_field_names;
use crate::app::services::tokenizer::{LineTokenizer, open_input};
use crate::config::IngestConfig;
use crate::{Error, Result};

/// Load a file (or stdin for `-`) into a new table
pub fn text_to_db<B: SqlBackend + ?Sized>(
    backend: &mut B,
    path: &str,
    table: &str,
    config: &IngestConfig,
) -> Result<LoadStats> {
    info!("Loading {} into table {}", path, table);
    config.validate()?;
    refuse_existing(backend, table)?;

    let input = open_input(path)?;
    load(backend, input, path, table, config)
}

/// Load text from any buffered reader into a new table
pub fn load_reader<B: SqlBackend + ?Sized, R: BufRead>(
    backend: &mut B,
    reader: R,
    table: &str,
    config: &IngestConfig,
) -> Result<LoadStats> {
    config.validate()?;
    refuse_existing(backend, table)?;
    load(backend, reader, "<reader>", table, config)
}

fn refuse_existing<B: SqlBackend + ?Sized>(backend: &mut B, table: &str) -> Result<()> {
    if backend.table_exists(table)? {
        warn!("Table {} exists; not recreating it", table);
        return Err(Error::TableExists {
            table: table.to_string(),
        });
    }
    Ok(())
}

fn load<B: SqlBackend + ?Sized, R: BufRead>(
    backend: &mut B,
    reader: R,
    source: &str,
    table: &str,
    config: &IngestConfig,
) -> Result<LoadStats> {
    let mut tokenizer = LineTokenizer::new(reader, config);
    let mut row = RowBuffer::new();
    let names = resolve_field_names(&mut tokenizer, &mut row, config)?;

    let first = tokenizer.read_nonblank(&mut row)?;
    let offset = usize::from(config.has_row_names);
    let bound = first.and_then(|parsed| {
        names.bind_to_width(parsed.fields.saturating_sub(offset), config.has_row_names)
    });
    let columns = match bound {
        Some(columns) => columns,
        None if names.is_empty() => return Err(Error::empty_input(source)),
        None => {
            if first.is_some() {
                warn!(
                    "Line {} does not fit {} column names; creating the table from the names",
                    row.line(),
                    names.len()
                );
            }
            names.into_names()
        }
    };

    let schema = TableSchema::build(
        table,
        &columns,
        config.has_row_names,
        &config.column_types,
        config.table_constraints.as_deref(),
        backend.dialect(),
    )?;
    create_table(backend, &schema)?;

    let mut strategy = InsertStrategy::select(backend, &schema);
    let mut stats = LoadStats::new(table, schema.column_count(), strategy.kind());

    backend.begin()?;
    let mut batch = BatchInserter {
        backend: &mut *backend,
        strategy: &mut strategy,
        stats: &mut stats,
        expected_fields: schema.column_count(),
        batch_size: config.batch_size,
        missing_marker: &config.missing_marker,
        pending: 0,
    };

    let outcome = match first {
        Some(parsed) => batch.run(&mut tokenizer, &mut row, parsed.eof),
        None => Ok(()),
    };

    match outcome.and_then(|()| batch.finish()) {
        Ok(()) => {
            info!(
                "Loaded {} rows into {} ({} failed, {} batches, {} inserts)",
                stats.rows_inserted,
                table,
                stats.rows_failed,
                stats.batches_committed,
                stats.strategy
            );
            Ok(stats)
        }
        Err(e) => {
            // Committed batches stay; the open one is discarded.
            if !e.is_connection_lost() {
                if let Err(rollback) = backend.rollback() {
                    warn!("Rollback after failed load also failed: {}", rollback);
                }
            }
            Err(e)
        }
    }
}

/// Run the CREATE TABLE statement and check that it took effect
fn create_table<B: SqlBackend + ?Sized>(backend: &mut B, schema: &TableSchema) -> Result<()> {
    let sql = schema.create_statement();
    debug!("{}", sql);

    if let Err(e) = backend.execute(&sql) {
        if e.is_connection_lost() {
            return Err(e);
        }
        return Err(Error::table_creation(schema.table(), e.to_string()));
    }
    if !backend.table_exists(schema.table())? {
        return Err(Error::table_creation(
            schema.table(),
            format!("table missing after \"{}\"", sql),
        ));
    }
    Ok(())
}

/// Inserts rows and commits every `batch_size` of them
struct BatchInserter<'a, B: SqlBackend + ?Sized> {
    backend: &'a mut B,
    strategy: &'a mut InsertStrategy,
    stats: &'a mut LoadStats,
    expected_fields: usize,
    batch_size: usize,
    missing_marker: &'a str,
    pending: usize,
}

impl<B: SqlBackend + ?Sized> BatchInserter<'_, B> {
    /// Insert the row already in `row`, then every remaining row
    fn run<R: BufRead>(
        &mut self,
        tokenizer: &mut LineTokenizer<R>,
        row: &mut RowBuffer,
        mut eof: bool,
    ) -> Result<()> {
        loop {
            self.insert(row)?;
            if eof {
                return Ok(());
            }
            match tokenizer.read_nonblank(row)? {
                Some(parsed) => eof = parsed.eof,
                None => return Ok(()),
            }
        }
    }

    fn insert(&mut self, row: &RowBuffer) -> Result<()> {
        if row.len() != self.expected_fields {
            warn!(
                "Line {}: {} fields for {} columns; row skipped",
                row.line(),
                row.len(),
                self.expected_fields
            );
            self.stats.rows_failed += 1;
        } else {
            match self
                .strategy
                .insert(&mut *self.backend, row.fields(), self.missing_marker)
            {
                Ok(()) => self.stats.rows_inserted += 1,
                Err(e) if e.is_connection_lost() => return Err(e),
                Err(e) => {
                    warn!("Line {}: insert failed: {}", row.line(), e);
                    self.stats.rows_failed += 1;
                }
            }
        }

        self.pending += 1;
        if self.pending >= self.batch_size {
            self.commit_batch()?;
            self.backend.begin()?;
        }
        Ok(())
    }

    fn commit_batch(&mut self) -> Result<()> {
        self.backend.commit()?;
        self.stats.batches_committed += 1;
        debug!(
            "Committed batch {} ({} rows so far)",
            self.stats.batches_committed,
            self.stats.rows_read()
        );
        self.pending = 0;
        Ok(())
    }

    /// Commit whatever is left in the open transaction
    fn finish(&mut self) -> Result<()> {
        if self.pending > 0 {
            self.commit_batch()
        } else {
            self.backend.commit()
        }
    }
}
