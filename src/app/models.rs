//! Data models for text ingestion
//!
//! This module contains the reusable row buffer produced by the tokenizers and
//! the growable numeric table produced by the table materializer.

use crate::constants::INITIAL_FIELD_CAPACITY;
use crate::{Error, Result};
use std::borrow::Cow;

// =============================================================================
// Row Buffer
// =============================================================================

/// One cell's raw text, built incrementally by a tokenizer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    bytes: Vec<u8>,
    quoted: bool,
}

impl Field {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            quoted: false,
        }
    }

    /// Raw bytes of the field
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Field text; invalid UTF-8 is replaced rather than rejected
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True when any part of the field came from a quoted span
    pub fn was_quoted(&self) -> bool {
        self.quoted
    }

    pub(crate) fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.bytes.truncate(len);
    }

    pub(crate) fn mark_quoted(&mut self) {
        self.quoted = true;
    }

    fn reset(&mut self) {
        self.bytes.clear();
        self.quoted = false;
    }
}

/// Ordered fields of one logical line.
///
/// The buffer is an arena: `clear` forgets the fields but keeps their
/// allocations, and the next line refills them in place.
#[derive(Debug, Clone, Default)]
pub struct RowBuffer {
    fields: Vec<Field>,
    len: usize,
    eof: bool,
    line: usize,
}

impl RowBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the current fields, keeping their storage allocated
    pub fn clear(&mut self) {
        self.len = 0;
        self.eof = false;
    }

    /// Number of fields on the line
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when reading this line hit the end of the input
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Physical line number (1-based) on which this row started
    pub fn line(&self) -> usize {
        self.line
    }

    /// Fields of the current line
    pub fn fields(&self) -> &[Field] {
        &self.fields[..self.len]
    }

    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields().get(index)
    }

    /// Copy the fields out as owned strings
    pub fn to_strings(&self) -> Vec<String> {
        self.fields().iter().map(|f| f.as_str().into_owned()).collect()
    }

    /// Number of field buffers held, including ones not in use
    pub fn allocated_fields(&self) -> usize {
        self.fields.len()
    }

    pub(crate) fn set_eof(&mut self, eof: bool) {
        self.eof = eof;
    }

    pub(crate) fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    /// Start a new empty field, reusing a previously allocated buffer if any
    pub(crate) fn open_field(&mut self) -> &mut Field {
        if self.len < self.fields.len() {
            self.fields[self.len].reset();
        } else {
            self.fields.push(Field::with_capacity(INITIAL_FIELD_CAPACITY));
        }
        self.len += 1;
        &mut self.fields[self.len - 1]
    }

    /// The most recently opened field
    pub(crate) fn last_field_mut(&mut self) -> Option<&mut Field> {
        match self.len {
            0 => None,
            n => self.fields.get_mut(n - 1),
        }
    }
}

// =============================================================================
// Numeric Table
// =============================================================================

/// Growable row-major numeric table with optional row and column names.
///
/// Missing values are stored as NaN.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    column_names: Vec<String>,
    row_names: Vec<String>,
    values: Vec<f64>,
    width: usize,
    rows: usize,
}

impl DataTable {
    /// Create an empty table with a fixed number of data columns
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Create an empty table whose width is the number of names
    pub fn with_column_names(column_names: Vec<String>) -> Self {
        Self {
            width: column_names.len(),
            column_names,
            ..Self::default()
        }
    }

    /// Number of data columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn row_names(&self) -> &[String] {
        &self.row_names
    }

    pub fn has_row_names(&self) -> bool {
        !self.row_names.is_empty()
    }

    /// Replace the column names; the count must match the width
    pub fn set_column_names(&mut self, names: Vec<String>) -> Result<()> {
        if names.len() != self.width {
            return Err(Error::configuration(format!(
                "{} column names given for a table of width {}",
                names.len(),
                self.width
            )));
        }
        self.column_names = names;
        Ok(())
    }

    /// Append one row of values, growing storage by exactly one row
    pub fn push_row(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.width {
            return Err(Error::configuration(format!(
                "Row of {} values pushed into a table of width {}",
                values.len(),
                self.width
            )));
        }
        self.values.try_reserve_exact(self.width)?;
        self.values.extend_from_slice(values);
        self.rows += 1;
        Ok(())
    }

    /// Name the next row
    pub fn push_row_name(&mut self, name: impl Into<String>) {
        self.row_names.push(name.into());
    }

    /// Value at (row, column)
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.rows || column >= self.width {
            return None;
        }
        self.values.get(row * self.width + column).copied()
    }

    /// All values of one row
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.width;
        self.values.get(start..start + self.width)
    }

    /// Copy of one column's values
    pub fn column(&self, column: usize) -> Option<Vec<f64>> {
        if column >= self.width {
            return None;
        }
        Some(
            (0..self.rows)
                .map(|row| self.values[row * self.width + column])
                .collect(),
        )
    }

    /// Serialize the table back to delimited text.
    ///
    /// The header lists column names only (no row-name slot); NaN is
    /// written as `NaN` so it reads back as missing.
    pub fn to_delimited(&self, delimiter: char) -> String {
        let mut out = String::new();

        if !self.column_names.is_empty() {
            let header: Vec<String> = self
                .column_names
                .iter()
                .map(|name| quote_if_needed(name, delimiter))
                .collect();
            out.push_str(&header.join(&delimiter.to_string()));
            out.push('\n');
        }

        for row in 0..self.rows {
            let mut cells = Vec::with_capacity(self.width + 1);
            if let Some(name) = self.row_names.get(row) {
                cells.push(quote_if_needed(name, delimiter));
            }
            if let Some(values) = self.row(row) {
                cells.extend(values.iter().map(|v| v.to_string()));
            }
            out.push_str(&cells.join(&delimiter.to_string()));
            out.push('\n');
        }

        out
    }
}

/// Wrap text in double quotes when it would not survive tokenizing bare
fn quote_if_needed(text: &str, delimiter: char) -> String {
    let needs_quotes = text.is_empty()
        || text.chars().any(|c| {
            c == delimiter || c.is_ascii_whitespace() || matches!(c, '#' | '\'' | '"' | '\\')
        });
    if !needs_quotes {
        return text.to_string();
    }

    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
