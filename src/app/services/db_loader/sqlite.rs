//! SQLite backend built on sqlx
//!
//! sqlx is async; the backend owns a current-thread tokio runtime and blocks
//! on each call so the loader itself stays synchronous.

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection, Executor};
use std::path::Path;
use std::str::FromStr;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use super::backend::{BoundValue, Dialect, SqlBackend};
use crate::constants::{SQLITE_MAX_BIND_PARAMETERS, SQLITE_MEMORY_URL};
use crate::{Error, Result};

/// A single SQLite connection
pub struct SqliteBackend {
    runtime: Runtime,
    conn: SqliteConnection,
}

impl std::fmt::Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend").finish_non_exhaustive()
    }
}

impl SqliteBackend {
    /// Connect using a sqlx URL such as `sqlite://data.db` or `sqlite::memory:`
    pub fn open(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        Self::connect(options, url)
    }

    /// Open (creating if needed) a database file
    pub fn open_path(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect(options, &path.display().to_string())
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::open(SQLITE_MEMORY_URL)
    }

    fn connect(options: SqliteConnectOptions, name: &str) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::io("Failed to start database runtime", e))?;
        let conn = runtime.block_on(options.connect())?;
        debug!("Connected to SQLite database {}", name);
        Ok(Self { runtime, conn })
    }

    /// Number of rows in a table
    pub fn count_rows(&mut self, table: &str) -> Result<i64> {
        let sql = format!(
            "SELECT count(*) FROM {}",
            Dialect::Sqlite.quote_identifier(table)
        );
        let count = self
            .runtime
            .block_on(sqlx::query_scalar::<_, i64>(&sql).fetch_one(&mut self.conn))?;
        Ok(count)
    }

    /// Run a one-column query and return each value as text.
    ///
    /// The query should `CAST(.. AS TEXT)` or use `typeof(..)` so every
    /// value decodes as a string; NULL comes back as `None`.
    pub fn query_text_column(&mut self, sql: &str) -> Result<Vec<Option<String>>> {
        let values = self
            .runtime
            .block_on(sqlx::query_scalar::<_, Option<String>>(sql).fetch_all(&mut self.conn))?;
        Ok(values)
    }

    /// Close the connection cleanly
    pub fn close(self) -> Result<()> {
        let Self { runtime, conn } = self;
        runtime.block_on(conn.close())?;
        Ok(())
    }
}

impl SqlBackend for SqliteBackend {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn execute(&mut self, sql: &str) -> Result<()> {
        self.runtime
            .block_on(sqlx::raw_sql(sql).execute(&mut self.conn))?;
        Ok(())
    }

    fn table_exists(&mut self, table: &str) -> Result<bool> {
        let count = self.runtime.block_on(
            sqlx::query_scalar::<_, i64>(
                "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            )
            .bind(table)
            .fetch_one(&mut self.conn),
        )?;
        Ok(count > 0)
    }

    fn max_bind_parameters(&self) -> Option<usize> {
        Some(SQLITE_MAX_BIND_PARAMETERS)
    }

    fn prepare(&mut self, sql: &str) -> Result<()> {
        // sqlx caches the compiled statement on the connection by its SQL text.
        self.runtime.block_on((&mut self.conn).prepare(sql))?;
        Ok(())
    }

    fn execute_prepared(&mut self, sql: &str, values: &[BoundValue]) -> Result<()> {
        let mut query = sqlx::query(sql);
        for value in values {
            query = match value {
                BoundValue::Null => query.bind(None::<f64>),
                BoundValue::Real(v) => query.bind(*v),
                BoundValue::Text(s) => query.bind(s.as_str()),
            };
        }
        self.runtime.block_on(query.execute(&mut self.conn))?;
        Ok(())
    }
}
