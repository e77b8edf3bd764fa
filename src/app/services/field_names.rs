//! Column name resolution
//!
//! Decides where a table's column names come from: an explicit list, the
//! first non-blank line of the input, or synthesized `col_N` defaults.
//! Only the second source reads from the input, and it reads exactly one line.

use std::io::BufRead;
use tracing::debug;

use crate::app::models::RowBuffer;
use crate::app::services::tokenizer::LineTokenizer;
use crate::config::IngestConfig;
use crate::constants::SYNTHESIZED_COLUMN_PREFIX;
use crate::Result;

/// Where a set of column names came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    Explicit,
    FromInput,
    Synthesized,
}

/// Resolved column names, before alignment to the data width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    names: Vec<String>,
    source: NameSource,
}

impl FieldNames {
    pub fn explicit(names: Vec<String>) -> Self {
        Self {
            names,
            source: NameSource::Explicit,
        }
    }

    pub fn from_input(names: Vec<String>) -> Self {
        Self {
            names,
            source: NameSource::FromInput,
        }
    }

    /// No names yet; all are generated once the width is known
    pub fn synthesized() -> Self {
        Self {
            names: Vec::new(),
            source: NameSource::Synthesized,
        }
    }

    pub fn source(&self) -> NameSource {
        self.source
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Width the names fix on their own; synthesized names have none
    pub fn declared_width(&self) -> Option<usize> {
        match self.source {
            NameSource::Synthesized => None,
            NameSource::Explicit | NameSource::FromInput => Some(self.names.len()),
        }
    }

    /// Column names for a first data row carrying `found` data fields.
    ///
    /// Synthesized names take their width from the row. Explicit names and a
    /// header line fix the width themselves. With row names enabled, a header
    /// may also carry a leading slot for them, which is dropped when the row
    /// is one field narrower than the header. `None` means the row does not
    /// fit the names.
    pub fn bind_to_width(&self, found: usize, has_row_names: bool) -> Option<Vec<String>> {
        match self.source {
            NameSource::Synthesized => Some((0..found).map(synthesized_name).collect()),
            _ if self.names.len() == found => Some(self.names.clone()),
            NameSource::FromInput if has_row_names && self.names.len() == found + 1 => {
                debug!("Dropped row-name header slot {:?}", self.names[0]);
                Some(self.names[1..].to_vec())
            }
            NameSource::Explicit | NameSource::FromInput => None,
        }
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

/// Default name for the column at `index`
pub fn synthesized_name(index: usize) -> String {
    format!("{}{}", SYNTHESIZED_COLUMN_PREFIX, index)
}

/// Resolve column names, consuming the header line when one is expected.
///
/// Explicit names win even when the input also has a header line; that line
/// is then left in the stream.
pub fn resolve_field_names<R: BufRead>(
    tokenizer: &mut LineTokenizer<R>,
    row: &mut RowBuffer,
    config: &IngestConfig,
) -> Result<FieldNames> {
    if let Some(names) = &config.field_names {
        debug!("Using {} explicit column names", names.len());
        return Ok(FieldNames::explicit(names.clone()));
    }

    if config.has_column_names {
        return match tokenizer.read_nonblank(row)? {
            Some(parsed) => {
                debug!("Read {} column names from line {}", parsed.fields, row.line());
                Ok(FieldNames::from_input(row.to_strings()))
            }
            None => {
                debug!("Input ended before a header line");
                Ok(FieldNames::from_input(Vec::new()))
            }
        };
    }

    Ok(FieldNames::synthesized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_header_line_is_consumed() {
        let config = IngestConfig::default();
        let mut tokenizer = LineTokenizer::new(Cursor::new("\na,b\n1,2\n"), &config);
        let mut row = RowBuffer::new();

        let resolved = resolve_field_names(&mut tokenizer, &mut row, &config).unwrap();
        assert_eq!(resolved.source(), NameSource::FromInput);
        assert_eq!(resolved.names(), names(&["a", "b"]).as_slice());

        tokenizer.read_nonblank(&mut row).unwrap();
        assert_eq!(row.to_strings(), names(&["1", "2"]));
    }

    #[test]
    fn test_explicit_names_consume_nothing() {
        let config = IngestConfig::default().with_field_names(names(&["x", "y"]));
        let mut tokenizer = LineTokenizer::new(Cursor::new("a,b\n"), &config);
        let mut row = RowBuffer::new();

        let resolved = resolve_field_names(&mut tokenizer, &mut row, &config).unwrap();
        assert_eq!(resolved.source(), NameSource::Explicit);
        assert_eq!(resolved.names(), names(&["x", "y"]).as_slice());

        tokenizer.read_nonblank(&mut row).unwrap();
        assert_eq!(row.to_strings(), names(&["a", "b"]));
    }

    #[test]
    fn test_synthesized_names() {
        let config = IngestConfig::default().with_column_names(false);
        let mut tokenizer = LineTokenizer::new(Cursor::new("1,2,3\n"), &config);
        let mut row = RowBuffer::new();

        let resolved = resolve_field_names(&mut tokenizer, &mut row, &config).unwrap();
        assert!(resolved.is_empty());
        assert_eq!(resolved.declared_width(), None);
        assert_eq!(
            resolved.bind_to_width(3, false),
            Some(names(&["col_0", "col_1", "col_2"]))
        );
        assert_eq!(tokenizer.line(), 1);
    }

    #[test]
    fn test_row_name_slot_dropped_only_when_present() {
        let with_slot = FieldNames::from_input(names(&["id", "a", "b"]));
        assert_eq!(with_slot.bind_to_width(2, true), Some(names(&["a", "b"])));

        let without_slot = FieldNames::from_input(names(&["a", "b"]));
        assert_eq!(without_slot.bind_to_width(2, true), Some(names(&["a", "b"])));
    }

    #[test]
    fn test_header_fixes_width() {
        let header = FieldNames::from_input(names(&["a", "b", "c"]));
        assert_eq!(header.declared_width(), Some(3));
        assert_eq!(header.bind_to_width(4, false), None);
        assert_eq!(header.bind_to_width(2, false), None);
        assert_eq!(header.bind_to_width(1, true), None);
    }

    #[test]
    fn test_explicit_names_used_verbatim() {
        let explicit = FieldNames::explicit(names(&["id", "a", "b"]));
        assert_eq!(explicit.bind_to_width(2, true), None);
        assert_eq!(
            explicit.bind_to_width(3, true),
            Some(names(&["id", "a", "b"]))
        );
    }
}
