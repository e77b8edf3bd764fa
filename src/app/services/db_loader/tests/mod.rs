//! Test utilities and mock infrastructure for database loader testing

use std::collections::HashSet;

use super::backend::{BoundValue, Dialect, SqlBackend};
use crate::{Error, Result};


/// Backend that records every statement instead of running it
#[derive(Debug)]
pub struct MockBackend {
    pub dialect: Dialect,
    pub max_bind: Option<usize>,
    pub tables: HashSet<String>,
    pub statements: Vec<String>,
    pub prepared: Vec<String>,
    pub bound_rows: Vec<Vec<BoundValue>>,
    /// Statements containing this text fail with a database error
    pub fail_on: Option<String>,
    /// Statements containing this text report a lost connection
    pub disconnect_on: Option<String>,
    /// CREATE TABLE runs but the table never appears
    pub create_is_noop: bool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(Dialect::Sqlite)
    }
}

impl MockBackend {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            max_bind: Some(999),
            tables: HashSet::new(),
            statements: Vec::new(),
            prepared: Vec::new(),
            bound_rows: Vec::new(),
            fail_on: None,
            disconnect_on: None,
            create_is_noop: false,
        }
    }

    /// Mock without prepared-statement support
    pub fn textual() -> Self {
        Self {
            max_bind: None,
            ..Self::default()
        }
    }

    pub fn with_table(mut self, table: &str) -> Self {
        self.tables.insert(table.to_string());
        self
    }

    pub fn count(&self, statement: &str) -> usize {
        self.statements.iter().filter(|s| s.as_str() == statement).count()
    }

    pub fn inserts(&self) -> Vec<&String> {
        self.statements
            .iter()
            .filter(|s| s.starts_with("INSERT"))
            .collect()
    }

    fn check(&self, sql: &str) -> Result<()> {
        if let Some(marker) = &self.disconnect_on {
            if sql.contains(marker.as_str()) {
                return Err(Error::connection_lost("mock connection dropped"));
            }
        }
        if let Some(marker) = &self.fail_on {
            if sql.contains(marker.as_str()) {
                return Err(Error::database(format!("mock failure on {}", sql)));
            }
        }
        Ok(())
    }
}

impl SqlBackend for MockBackend {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn execute(&mut self, sql: &str) -> Result<()> {
        self.check(sql)?;
        self.statements.push(sql.to_string());
        if sql.starts_with("CREATE TABLE") && !self.create_is_noop {
            if let Some(name) = sql.split_whitespace().nth(2) {
                self.tables
                    .insert(name.trim_matches(|c| c == '"' || c == '`').to_string());
            }
        }
        Ok(())
    }

    fn table_exists(&mut self, table: &str) -> Result<bool> {
        Ok(self.tables.contains(table))
    }

    fn max_bind_parameters(&self) -> Option<usize> {
        self.max_bind
    }

    fn prepare(&mut self, sql: &str) -> Result<()> {
        self.check(sql)?;
        self.prepared.push(sql.to_string());
        Ok(())
    }

    fn execute_prepared(&mut self, sql: &str, values: &[BoundValue]) -> Result<()> {
        let rendered = format!("{} {:?}", sql, values);
        self.check(&rendered)?;
        self.bound_rows.push(values.to_vec());
        Ok(())
    }
}
