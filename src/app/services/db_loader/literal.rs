//! Field-to-SQL literal conversion
//!
//! Decides whether a field is NULL, a number or text, and renders it either
//! as literal SQL text or as a bound parameter.

use super::backend::{BoundValue, Dialect};
use crate::app::models::Field;
use crate::app::services::table_materializer::{NumericField, parse_numeric};
use crate::constants::sqlite_literals;

/// How one field will be written to the database
#[derive(Debug, Clone, PartialEq)]
pub enum SqlLiteral {
    Null,
    /// Numeric token; `text` is the normalized spelling
    Number { text: String, value: f64 },
    Text(String),
}

impl SqlLiteral {
    /// Classify a tokenized field.
    ///
    /// Empty fields and fields equal to `missing_marker` (ignoring ASCII
    /// case) are NULL. Quoted fields are always text.
    pub fn from_field(field: &Field, missing_marker: &str) -> Self {
        Self::classify(&field.as_str(), field.was_quoted(), missing_marker)
    }

    pub fn classify(text: &str, quoted: bool, missing_marker: &str) -> Self {
        if text.is_empty() || text.eq_ignore_ascii_case(missing_marker) {
            return Self::Null;
        }
        if quoted {
            return Self::Text(text.to_string());
        }
        match parse_numeric(text) {
            NumericField::Value(value) => Self::Number {
                text: normalize_number(text.trim()),
                value,
            },
            NumericField::Missing | NumericField::Unparseable => Self::Text(text.to_string()),
        }
    }

    /// Render as literal SQL for a textual INSERT
    pub fn to_sql(&self, dialect: Dialect) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Number { text, value } => match special_literal(*value, dialect) {
                Some(literal) => literal.to_string(),
                None => text.clone(),
            },
            Self::Text(text) => quote_text(text, dialect),
        }
    }

    /// Convert to a positional parameter.
    ///
    /// Finite numbers bind as their text so the column's declared type
    /// decides the stored type, as with a textual INSERT.
    pub fn to_bound(&self) -> BoundValue {
        match self {
            Self::Null => BoundValue::Null,
            Self::Number { text, value } => {
                if value.is_finite() {
                    BoundValue::Text(text.clone())
                } else {
                    BoundValue::Real(*value)
                }
            }
            Self::Text(text) => BoundValue::Text(text.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Give a bare leading decimal point a zero (`.5` -> `0.5`, `-.5` -> `-0.5`)
pub fn normalize_number(text: &str) -> String {
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') | Some(b'+') => text.split_at(1),
        _ => ("", text),
    };
    if digits.starts_with('.') {
        format!("{}0{}", sign, digits)
    } else {
        text.to_string()
    }
}

/// Expression for an IEEE special value, if `value` is one
fn special_literal(value: f64, dialect: Dialect) -> Option<&'static str> {
    if value.is_finite() {
        return None;
    }
    let literal = match dialect {
        Dialect::Sqlite if value.is_nan() => sqlite_literals::NAN,
        Dialect::Sqlite if value > 0.0 => sqlite_literals::POSITIVE_INFINITY,
        Dialect::Sqlite => sqlite_literals::NEGATIVE_INFINITY,
        // No portable spelling for these in MySQL.
        Dialect::MySql => "NULL",
    };
    Some(literal)
}

/// Quote text as a string literal.
///
/// SQLite only accepts single-quoted strings, so single quotes are doubled.
/// For MySQL, text containing a single quote is wrapped in double quotes
/// instead, unless it holds both kinds.
pub fn quote_text(text: &str, dialect: Dialect) -> String {
    match dialect {
        Dialect::MySql if text.contains('\'') && !text.contains('"') => format!("\"{}\"", text),
        Dialect::Sqlite | Dialect::MySql => format!("'{}'", text.replace('\'', "''")),
    }
}
