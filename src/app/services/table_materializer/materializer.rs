//! Numeric table materialization
//!
//! Reads rows from a [`LineTokenizer`] and converts each field to `f64`. The
//! table width comes from the column names when they were given or read from
//! a header line, and from the first data line otherwise.

use std::io::BufRead;
use tracing::{debug, info, warn};

use super::stats::{MaterializeResult, MaterializeStats};
use crate::app::models::{DataTable, RowBuffer};
use crate::app::services::field_names::{FieldNames, resolve_field_names};
use crate::app::services::tokenizer::{LineTokenizer, open_input};
use crate::config::IngestConfig;
use crate::{Error, Result};

/// Outcome of converting one field to a number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericField {
    Value(f64),
    /// Empty field
    Missing,
    /// Non-empty text that is not a number
    Unparseable,
}

impl NumericField {
    /// Stored cell value; anything but a number becomes NaN
    pub fn value(self) -> f64 {
        match self {
            Self::Value(v) => v,
            Self::Missing | Self::Unparseable => f64::NAN,
        }
    }
}

/// Parse a field as a float.
///
/// Surrounding ASCII whitespace is ignored and the rest must be consumed
/// entirely. `inf`, `-inf` and `nan` (any case) are accepted.
pub fn parse_numeric(text: &str) -> NumericField {
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
    if trimmed.is_empty() {
        return NumericField::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(value) => NumericField::Value(value),
        Err(_) => NumericField::Unparseable,
    }
}

/// Read a file (or stdin for `-`) into a numeric table
pub fn text_to_table(path: &str, config: &IngestConfig) -> Result<MaterializeResult> {
    info!("Materializing table from {}", path);
    let input = open_input(path)?;
    let result = materialize_reader(input, config)?;
    info!(
        "Read {} rows x {} columns from {}",
        result.table.rows(),
        result.table.width(),
        path
    );
    Ok(result)
}

/// Read delimited or fixed-width text from any buffered reader into a table
pub fn materialize_reader<R: BufRead>(reader: R, config: &IngestConfig) -> Result<MaterializeResult> {
    config.validate()?;

    let mut tokenizer = LineTokenizer::new(reader, config);
    let mut row = RowBuffer::new();
    let names = resolve_field_names(&mut tokenizer, &mut row, config)?;

    let mut builder = TableBuilder::new(names, config.has_row_names);
    while let Some(parsed) = tokenizer.read_nonblank(&mut row)? {
        builder.push(&row)?;
        if parsed.eof {
            break;
        }
    }

    let mut result = builder.finish();
    result.stats.skipped_lines = tokenizer.blank_lines();
    debug!("Materialization stats: {:?}", result.stats);
    Ok(result)
}

/// Accumulates rows into a table of fixed width
struct TableBuilder {
    names: Option<FieldNames>,
    table: Option<DataTable>,
    has_row_names: bool,
    values: Vec<f64>,
    stats: MaterializeStats,
}

impl TableBuilder {
    fn new(names: FieldNames, has_row_names: bool) -> Self {
        Self {
            names: Some(names),
            table: None,
            has_row_names,
            values: Vec::new(),
            stats: MaterializeStats::new(),
        }
    }

    fn name_offset(&self) -> usize {
        usize::from(self.has_row_names)
    }

    fn push(&mut self, row: &RowBuffer) -> Result<()> {
        let offset = self.name_offset();
        let found = row.len().saturating_sub(offset);

        if self.table.is_none() {
            let columns = self.first_columns(row, found)?;
            self.table = Some(DataTable::with_column_names(columns));
        }
        let table = self.table.get_or_insert_default();

        if found != table.width() {
            let expected = table.width();
            let partial = self.table.take().unwrap_or_default();
            warn!(
                "Line {} has {} data fields, expected {}; stopping after {} rows",
                row.line(),
                found,
                expected,
                partial.rows()
            );
            return Err(Error::RowWidthMismatch {
                line: row.line(),
                row: self.stats.rows + 1,
                expected,
                found,
                partial: Box::new(partial),
            });
        }

        self.values.clear();
        for field in &row.fields()[offset..] {
            let text = field.as_str();
            let parsed = parse_numeric(&text);
            match parsed {
                NumericField::Value(_) => {}
                NumericField::Missing => self.stats.missing_values += 1,
                NumericField::Unparseable => {
                    warn!(
                        "Line {}: {:?} is not a number; storing NaN",
                        row.line(),
                        text
                    );
                    self.stats.missing_values += 1;
                    self.stats.unparseable_fields += 1;
                }
            }
            self.values.push(parsed.value());
        }

        table.push_row(&self.values)?;
        if self.has_row_names {
            if let Some(name) = row.field(0) {
                table.push_row_name(name.as_str());
            }
        }
        self.stats.rows += 1;
        Ok(())
    }

    /// Bind the column names to the first data row
    fn first_columns(&mut self, row: &RowBuffer, found: usize) -> Result<Vec<String>> {
        let names = self.names.take().unwrap_or_else(FieldNames::synthesized);
        match names.bind_to_width(found, self.has_row_names) {
            Some(columns) => {
                debug!("Table width {} set by line {}", columns.len(), row.line());
                Ok(columns)
            }
            None => {
                let expected = names.declared_width().unwrap_or(found);
                warn!(
                    "Line {} has {} data fields but the column names give {}",
                    row.line(),
                    found,
                    expected
                );
                Err(Error::RowWidthMismatch {
                    line: row.line(),
                    row: 1,
                    expected,
                    found,
                    partial: Box::default(),
                })
            }
        }
    }

    fn finish(mut self) -> MaterializeResult {
        let table = match self.table.take() {
            Some(table) => table,
            // No data rows: keep whatever names were given.
            None => DataTable::with_column_names(
                self.names.take().map(FieldNames::into_names).unwrap_or_default(),
            ),
        };
        MaterializeResult {
            table,
            stats: self.stats,
        }
    }
}
