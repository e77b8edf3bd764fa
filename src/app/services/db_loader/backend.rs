//! Database backend abstraction
//!
//! The loader talks to a relational engine only through [`SqlBackend`], so
//! tests can substitute a recording mock for a real connection.

use crate::Result;
use crate::constants::column_types;

/// SQL flavour spoken by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    MySql,
}

impl Dialect {
    /// Column type used when no column-type rule matches
    pub fn default_column_type(self) -> &'static str {
        match self {
            Self::Sqlite => column_types::SQLITE_DEFAULT,
            Self::MySql => column_types::MYSQL_DEFAULT,
        }
    }

    /// Declared type of the row-name column, if the dialect needs one
    pub fn row_names_type(self) -> Option<&'static str> {
        match self {
            Self::Sqlite => None,
            Self::MySql => Some(column_types::MYSQL_DEFAULT),
        }
    }

    /// Quote an identifier, doubling any embedded quote character
    pub fn quote_identifier(self, name: &str) -> String {
        let quote = match self {
            Self::Sqlite => '"',
            Self::MySql => '`',
        };
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(quote);
        for c in name.chars() {
            if c == quote {
                quoted.push(quote);
            }
            quoted.push(c);
        }
        quoted.push(quote);
        quoted
    }

    pub fn begin_statement(self) -> &'static str {
        match self {
            Self::Sqlite => "BEGIN",
            Self::MySql => "START TRANSACTION",
        }
    }
}

/// A value bound to one positional parameter
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Null,
    Real(f64),
    Text(String),
}

/// Operations the loader needs from a relational engine
pub trait SqlBackend {
    fn dialect(&self) -> Dialect;

    /// Run a statement that returns no rows
    fn execute(&mut self, sql: &str) -> Result<()>;

    fn table_exists(&mut self, table: &str) -> Result<bool>;

    /// Most positional parameters one prepared statement may take;
    /// `None` means prepared statements are unavailable
    fn max_bind_parameters(&self) -> Option<usize>;

    /// Compile a parameterized statement for repeated execution
    fn prepare(&mut self, sql: &str) -> Result<()>;

    /// Execute a statement previously passed to [`SqlBackend::prepare`]
    fn execute_prepared(&mut self, sql: &str, values: &[BoundValue]) -> Result<()>;

    fn begin(&mut self) -> Result<()> {
        let sql = self.dialect().begin_statement();
        self.execute(sql)
    }

    fn commit(&mut self) -> Result<()> {
        self.execute("COMMIT")
    }

    fn rollback(&mut self) -> Result<()> {
        self.execute("ROLLBACK")
    }
}
