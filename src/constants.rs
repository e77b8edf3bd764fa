//! Application constants for textload
//!
//! Default values for the parser configuration, the table materializer and
//! the database loader.

// =============================================================================
// Input
// =============================================================================

/// Input name that selects standard input instead of a file
pub const STDIN_INPUT: &str = "-";

/// Default field delimiters: pipe, comma and tab
pub const DEFAULT_DELIMITERS: &str = "|,\t";

/// Initial capacity of a freshly opened field buffer
pub const INITIAL_FIELD_CAPACITY: usize = 8;

// =============================================================================
// Tokenizer Characters
// =============================================================================

/// Starts a comment that runs to the end of the line
pub const COMMENT_MARKER: u8 = b'#';

/// Makes the following byte a regular character
pub const ESCAPE_CHAR: u8 = b'\\';

pub const SINGLE_QUOTE: u8 = b'\'';
pub const DOUBLE_QUOTE: u8 = b'"';

// =============================================================================
// Field Names
// =============================================================================

/// Prefix of synthesized column names (`col_0`, `col_1`, ...)
pub const SYNTHESIZED_COLUMN_PREFIX: &str = "col_";

/// Name of the leading column that holds row names in database tables
pub const ROW_NAMES_COLUMN: &str = "row_names";

// =============================================================================
// Missing Values
// =============================================================================

/// Default missing-value marker, matched case-insensitively (NaN, nan, NAN)
pub const DEFAULT_MISSING_MARKER: &str = "NaN";

// =============================================================================
// Database Loader
// =============================================================================

/// Rows inserted per transaction before committing
pub const DEFAULT_BATCH_SIZE: usize = 5_000;

/// Largest number of positional parameters SQLite accepts in one statement
pub const SQLITE_MAX_BIND_PARAMETERS: usize = 999;

/// Declared column type when no column-type rule matches
pub mod column_types {
    pub const SQLITE_DEFAULT: &str = "numeric";
    pub const MYSQL_DEFAULT: &str = "varchar(100)";
}

/// Literal expressions SQLite evaluates to IEEE-754 special values
pub mod sqlite_literals {
    pub const POSITIVE_INFINITY: &str = "9e999999";
    pub const NEGATIVE_INFINITY: &str = "-9e999999";
    pub const NAN: &str = "0.0/0.0";
}

/// In-memory SQLite connection string
pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";
