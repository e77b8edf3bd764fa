//! Configuration management and validation.
//!
//! Provides the parser configuration shared by the table materializer and
//! the database loader, plus the database-only settings (missing marker,
//! batching, column types).

use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_DELIMITERS, DEFAULT_MISSING_MARKER};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Declared SQL type for columns whose name matches `pattern`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTypeRule {
    /// Regular expression searched for in the column name
    pub pattern: String,

    /// Type, constraint and/or key placed after the column name in CREATE TABLE
    pub sql_type: String,
}

impl ColumnTypeRule {
    pub fn new(pattern: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            sql_type: sql_type.into(),
        }
    }
}

/// Settings for one ingestion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Characters recognized as field separators (ASCII only)
    pub delimiters: String,

    /// Column-end byte offsets; enables fixed-width mode when set
    pub field_ends: Option<Vec<usize>>,

    /// First field of every data line is a row name
    pub has_row_names: bool,

    /// First non-blank line holds column names
    pub has_column_names: bool,

    /// Explicit column names, used verbatim when given
    pub field_names: Option<Vec<String>>,

    /// Text that loads as NULL (case-insensitive)
    pub missing_marker: String,

    /// Rows per committed transaction
    pub batch_size: usize,

    /// Column type rules, first match wins
    pub column_types: Vec<ColumnTypeRule>,

    /// Table-level constraint appended to CREATE TABLE
    pub table_constraints: Option<String>,

    /// Upper bound on a single field's length in bytes (None = unbounded)
    pub max_field_bytes: Option<usize>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            delimiters: DEFAULT_DELIMITERS.to_string(),
            field_ends: None,
            has_row_names: false,
            has_column_names: true,
            field_names: None,
            missing_marker: DEFAULT_MISSING_MARKER.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            column_types: Vec::new(),
            table_constraints: None,
            max_field_bytes: None,
        }
    }
}

impl IngestConfig {
    /// Use a custom delimiter set
    pub fn with_delimiters(mut self, delimiters: impl Into<String>) -> Self {
        self.delimiters = delimiters.into();
        self
    }

    /// Switch to fixed-width mode with the given column-end offsets
    pub fn with_field_ends(mut self, field_ends: Vec<usize>) -> Self {
        self.field_ends = Some(field_ends);
        self
    }

    /// Treat the first field of each data line as a row name
    pub fn with_row_names(mut self, has_row_names: bool) -> Self {
        self.has_row_names = has_row_names;
        self
    }

    /// Declare whether the first line holds column names
    pub fn with_column_names(mut self, has_column_names: bool) -> Self {
        self.has_column_names = has_column_names;
        self
    }

    /// Supply column names explicitly
    pub fn with_field_names(mut self, names: Vec<String>) -> Self {
        self.field_names = Some(names);
        self
    }

    /// Set the missing-value marker
    pub fn with_missing_marker(mut self, marker: impl Into<String>) -> Self {
        self.missing_marker = marker.into();
        self
    }

    /// Set the number of rows per transaction
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Append a column type rule
    pub fn with_column_type(mut self, rule: ColumnTypeRule) -> Self {
        self.column_types.push(rule);
        self
    }

    /// Set the table-level constraint clause
    pub fn with_table_constraints(mut self, constraints: impl Into<String>) -> Self {
        self.table_constraints = Some(constraints.into());
        self
    }

    /// Bound the length of a single field
    pub fn with_max_field_bytes(mut self, limit: usize) -> Self {
        self.max_field_bytes = Some(limit);
        self
    }

    /// True when column boundaries come from fixed offsets
    pub fn is_fixed_width(&self) -> bool {
        self.field_ends.is_some()
    }

    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        match &self.field_ends {
            Some(ends) => {
                if ends.is_empty() {
                    return Err(Error::configuration(
                        "Fixed-width mode needs at least one field end",
                    ));
                }
                if ends[0] == 0 {
                    return Err(Error::configuration("Field ends must be greater than 0"));
                }
                if let Some(pair) = ends.windows(2).find(|pair| pair[1] <= pair[0]) {
                    return Err(Error::configuration(format!(
                        "Field ends must be strictly increasing ({} then {})",
                        pair[0], pair[1]
                    )));
                }
            }
            None => {
                if self.delimiters.is_empty() {
                    return Err(Error::configuration(
                        "At least one delimiter is required outside fixed-width mode",
                    ));
                }
                if !self.delimiters.is_ascii() {
                    return Err(Error::configuration(format!(
                        "Delimiters must be ASCII characters: {:?}",
                        self.delimiters
                    )));
                }
            }
        }

        if self.batch_size == 0 {
            return Err(Error::configuration("Batch size must be greater than 0"));
        }

        if self.max_field_bytes == Some(0) {
            return Err(Error::configuration(
                "Field size limit must be greater than 0",
            ));
        }

        for rule in &self.column_types {
            regex::Regex::new(&rule.pattern)?;
        }

        debug!(
            "Validated configuration: delimiters={:?}, fixed_width={}, row_names={}, column_names={}",
            self.delimiters,
            self.is_fixed_width(),
            self.has_row_names,
            self.has_column_names
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IngestConfig::default();
        assert_eq!(config.delimiters, "|,\t");
        assert!(config.has_column_names);
        assert!(!config.has_row_names);
        assert_eq!(config.missing_marker, "NaN");
        assert!(!config.is_fixed_width());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_field_ends_must_increase() {
        let config = IngestConfig::default().with_field_ends(vec![3, 3, 7]);
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));

        let config = IngestConfig::default().with_field_ends(vec![0, 3]);
        assert!(config.validate().is_err());

        let config = IngestConfig::default().with_field_ends(vec![3, 5, 7]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_delimiters_and_patterns() {
        assert!(IngestConfig::default().with_delimiters("").validate().is_err());
        assert!(IngestConfig::default().with_delimiters("é").validate().is_err());
        assert!(IngestConfig::default().with_batch_size(0).validate().is_err());

        let config = IngestConfig::default().with_column_type(ColumnTypeRule::new("(", "text"));
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_empty_delimiters_allowed_in_fixed_width_mode() {
        let config = IngestConfig::default()
            .with_delimiters("")
            .with_field_ends(vec![2, 4]);
        assert!(config.validate().is_ok());
    }
}
