//! Command-line argument definitions for textload
//!
//! Defines the CLI using the clap derive API: a `table` command that reads
//! text into a numeric table and a `db` command that loads it into SQLite.

use crate::app::services::db_loader::table_name_from_path;
use crate::config::{ColumnTypeRule, IngestConfig};
use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_MISSING_MARKER, STDIN_INPUT};
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// CLI arguments for textload
///
/// Reads loosely formatted delimited or fixed-width text into a numeric
/// table or a database table.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "textload",
    version,
    about = "Load delimited or fixed-width text into numeric tables or SQLite",
    long_about = "Reads loosely formatted text (comments, quoting, escapes, mixed delimiters, \
                  or fixed-width columns) and either materializes it as a numeric table, \
                  optionally exported to Parquet, or loads it into a new SQLite table."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress output except errors"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Read text into a numeric table
    Table(TableArgs),
    /// Load text into a new database table
    Db(DbArgs),
}

/// Options shared by every command that parses text
#[derive(Debug, Clone, clap::Args)]
pub struct ParseOptions {
    /// Input file, or `-` for standard input
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Characters that separate fields
    #[arg(
        long = "delimiters",
        value_name = "CHARS",
        help = "Field delimiter characters (default: pipe, comma and tab)"
    )]
    pub delimiters: Option<String>,

    /// Column-end byte offsets; switches to fixed-width parsing
    #[arg(
        long = "field-ends",
        value_name = "LIST",
        value_delimiter = ',',
        help = "Comma-separated column-end offsets for fixed-width input"
    )]
    pub field_ends: Option<Vec<usize>>,

    /// First field of each line is a row name
    #[arg(long = "row-names", help = "Treat the first field of each line as a row name")]
    pub row_names: bool,

    /// The input has no header line
    #[arg(long = "no-header", help = "The first line is data, not column names")]
    pub no_header: bool,

    /// Explicit column names
    #[arg(
        long = "names",
        value_name = "LIST",
        value_delimiter = ',',
        help = "Comma-separated column names, used instead of any header line"
    )]
    pub names: Option<Vec<String>>,

    /// Largest accepted field, in bytes
    #[arg(
        long = "max-field-bytes",
        value_name = "BYTES",
        help = "Reject fields longer than this many bytes"
    )]
    pub max_field_bytes: Option<usize>,
}

/// Arguments for the table command
#[derive(Debug, Clone, Parser)]
pub struct TableArgs {
    #[command(flatten)]
    pub parse: ParseOptions,

    /// Write the table to a Parquet file
    #[arg(long = "parquet", value_name = "FILE", help = "Export the table as Parquet")]
    pub parquet: Option<PathBuf>,

    /// Print the parsed table to stdout
    #[arg(long = "print", help = "Print the table as comma-delimited text")]
    pub print: bool,
}

/// Arguments for the db command
#[derive(Debug, Clone, Parser)]
pub struct DbArgs {
    #[command(flatten)]
    pub parse: ParseOptions,

    /// SQLite database file, created if missing
    #[arg(short = 'd', long = "database", value_name = "FILE")]
    pub database: PathBuf,

    /// Destination table name
    ///
    /// Defaults to the input file name without its extension, with dots
    /// replaced by underscores. Required when reading standard input.
    #[arg(short = 't', long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// Text that loads as NULL
    #[arg(
        long = "missing-marker",
        value_name = "TEXT",
        default_value = DEFAULT_MISSING_MARKER,
        help = "Fields equal to this text (any case) load as NULL"
    )]
    pub missing_marker: String,

    /// Rows per committed transaction
    #[arg(
        long = "batch-size",
        value_name = "ROWS",
        default_value_t = DEFAULT_BATCH_SIZE,
        help = "Rows inserted per transaction"
    )]
    pub batch_size: usize,

    /// Column type rules
    #[arg(
        long = "column-type",
        value_name = "REGEX=TYPE",
        help = "Declare TYPE for columns whose name matches REGEX (repeatable, first match wins)"
    )]
    pub column_types: Vec<ColumnTypeArg>,

    /// Table-level constraint
    #[arg(
        long = "table-constraints",
        value_name = "SQL",
        help = "Constraint clause appended to CREATE TABLE, e.g. \"primary key (id)\""
    )]
    pub table_constraints: Option<String>,
}

/// A `REGEX=TYPE` column type rule from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTypeArg(pub ColumnTypeRule);

impl FromStr for ColumnTypeArg {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (pattern, sql_type) = s.split_once('=').ok_or_else(|| {
            Error::configuration(format!("Column type '{}' must look like REGEX=TYPE", s))
        })?;

        if pattern.is_empty() || sql_type.trim().is_empty() {
            return Err(Error::configuration(format!(
                "Column type '{}' needs both a pattern and a type",
                s
            )));
        }

        regex::Regex::new(pattern)?;
        Ok(Self(ColumnTypeRule::new(pattern, sql_type.trim())))
    }
}

impl Args {
    /// Get log level based on verbosity and quiet flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress indicators (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ParseOptions {
    /// Parser settings from the command line
    pub fn to_config(&self) -> IngestConfig {
        let mut config = IngestConfig::default()
            .with_row_names(self.row_names)
            .with_column_names(!self.no_header);

        if let Some(delimiters) = &self.delimiters {
            config = config.with_delimiters(delimiters.as_str());
        }
        if let Some(ends) = &self.field_ends {
            config = config.with_field_ends(ends.clone());
        }
        if let Some(names) = &self.names {
            config = config.with_field_names(names.clone());
        }
        if let Some(limit) = self.max_field_bytes {
            config = config.with_max_field_bytes(limit);
        }
        config
    }

    pub fn reads_stdin(&self) -> bool {
        self.input == STDIN_INPUT
    }
}

impl DbArgs {
    /// Full ingestion settings, including database options
    pub fn to_config(&self) -> IngestConfig {
        let mut config = self
            .parse
            .to_config()
            .with_missing_marker(self.missing_marker.as_str())
            .with_batch_size(self.batch_size);

        for rule in &self.column_types {
            config = config.with_column_type(rule.0.clone());
        }
        if let Some(constraints) = &self.table_constraints {
            config = config.with_table_constraints(constraints.as_str());
        }
        config
    }

    /// Destination table: `--table`, else derived from the input file name
    pub fn table_name(&self) -> Result<String> {
        if let Some(table) = &self.table {
            return Ok(table.clone());
        }
        if self.parse.reads_stdin() {
            return Err(Error::configuration(
                "A table name (--table) is required when reading standard input",
            ));
        }
        table_name_from_path(Path::new(&self.parse.input)).ok_or_else(|| {
            Error::configuration(format!(
                "Cannot derive a table name from '{}'; use --table",
                self.parse.input
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_command_parsing() {
        let args = Args::try_parse_from([
            "textload",
            "table",
            "data.txt",
            "--delimiters",
            ";",
            "--row-names",
            "--parquet",
            "out.parquet",
        ])
        .unwrap();

        match args.command {
            Commands::Table(table) => {
                let config = table.parse.to_config();
                assert_eq!(config.delimiters, ";");
                assert!(config.has_row_names);
                assert!(config.has_column_names);
                assert_eq!(table.parquet, Some(PathBuf::from("out.parquet")));
            }
            Commands::Db(_) => panic!("expected table command"),
        }
    }

    #[test]
    fn test_db_command_parsing() {
        let args = Args::try_parse_from([
            "textload",
            "-v",
            "db",
            "survey.2024.csv",
            "--database",
            "out.db",
            "--field-ends",
            "3,5,7",
            "--no-header",
            "--column-type",
            "^id$=integer primary key",
            "--batch-size",
            "100",
        ])
        .unwrap();

        assert_eq!(args.get_log_level(), "info");
        match args.command {
            Commands::Db(db) => {
                let config = db.to_config();
                assert_eq!(config.field_ends, Some(vec![3, 5, 7]));
                assert!(!config.has_column_names);
                assert_eq!(config.batch_size, 100);
                assert_eq!(
                    config.column_types,
                    vec![ColumnTypeRule::new("^id$", "integer primary key")]
                );
                assert_eq!(db.table_name().unwrap(), "survey_2024");
            }
            Commands::Table(_) => panic!("expected db command"),
        }
    }

    #[test]
    fn test_stdin_needs_table_name() {
        let args = Args::try_parse_from(["textload", "db", "-", "--database", "x.db"]).unwrap();
        match args.command {
            Commands::Db(db) => assert!(db.table_name().is_err()),
            Commands::Table(_) => panic!("expected db command"),
        }
    }

    #[test]
    fn test_column_type_arg() {
        assert!("name=text".parse::<ColumnTypeArg>().is_ok());
        assert!("notype".parse::<ColumnTypeArg>().is_err());
        assert!("(=text".parse::<ColumnTypeArg>().is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["textload", "-q", "-v", "table", "x"]).is_err());
        let args = Args::try_parse_from(["textload", "-q", "table", "x"]).unwrap();
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }
}
