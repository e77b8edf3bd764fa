//! Destination table layout and DDL generation
//!
//! Column types come from the first matching [`ColumnTypeRule`] or fall back
//! to the dialect default. Dots in names become underscores.

use regex::Regex;
use std::path::Path;
use tracing::debug;

use super::backend::Dialect;
use crate::Result;
use crate::config::ColumnTypeRule;
use crate::constants::ROW_NAMES_COLUMN;

/// One column of the destination table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    /// Declared type and/or constraint; `None` leaves the column untyped
    pub sql_type: Option<String>,
}

/// Compiled column-type rules
#[derive(Debug, Clone)]
pub struct ColumnTypeMatcher {
    rules: Vec<(Regex, String)>,
    default_type: &'static str,
}

impl ColumnTypeMatcher {
    pub fn new(rules: &[ColumnTypeRule], dialect: Dialect) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| -> Result<(Regex, String)> {
                Ok((Regex::new(&rule.pattern)?, rule.sql_type.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            rules,
            default_type: dialect.default_column_type(),
        })
    }

    /// Type for a column name: first rule whose pattern occurs in the name
    pub fn type_for(&self, name: &str) -> &str {
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(name))
            .map(|(_, sql_type)| sql_type.as_str())
            .unwrap_or(self.default_type)
    }
}

/// Replace dots, which SQL reads as qualifiers, with underscores
pub fn sanitize_identifier(name: &str) -> String {
    name.replace('.', "_")
}

/// Default table name for an input file: its stem, dots replaced
pub fn table_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(sanitize_identifier)
}

/// Layout of the table a load creates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    table: String,
    columns: Vec<ColumnDef>,
    constraints: Option<String>,
    dialect: Dialect,
}

impl TableSchema {
    /// Lay out a table from resolved data-column names
    pub fn build(
        table: &str,
        names: &[String],
        has_row_names: bool,
        rules: &[ColumnTypeRule],
        constraints: Option<&str>,
        dialect: Dialect,
    ) -> Result<Self> {
        let matcher = ColumnTypeMatcher::new(rules, dialect)?;
        let mut columns = Vec::with_capacity(names.len() + 1);

        if has_row_names {
            columns.push(ColumnDef {
                name: ROW_NAMES_COLUMN.to_string(),
                sql_type: dialect.row_names_type().map(str::to_string),
            });
        }

        for name in names {
            let name = sanitize_identifier(name);
            let sql_type = matcher.type_for(&name).to_string();
            columns.push(ColumnDef {
                name,
                sql_type: Some(sql_type),
            });
        }

        debug!("Table {} will have {} columns", table, columns.len());
        Ok(Self {
            table: table.to_string(),
            columns,
            constraints: constraints.map(str::to_string),
            dialect,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn quoted_table(&self) -> String {
        self.dialect.quote_identifier(&self.table)
    }

    /// `CREATE TABLE` statement for this layout
    pub fn create_statement(&self) -> String {
        let mut parts: Vec<String> = self
            .columns
            .iter()
            .map(|column| {
                let name = self.dialect.quote_identifier(&column.name);
                match &column.sql_type {
                    Some(sql_type) => format!("{} {}", name, sql_type),
                    None => name,
                }
            })
            .collect();

        if let Some(constraints) = &self.constraints {
            parts.push(constraints.clone());
        }

        format!("CREATE TABLE {} ({})", self.quoted_table(), parts.join(", "))
    }

    /// Parameterized `INSERT` with one placeholder per column
    pub fn insert_statement(&self) -> String {
        let placeholders = vec!["?"; self.columns.len()].join(", ");
        format!("INSERT INTO {} VALUES ({})", self.quoted_table(), placeholders)
    }
}
