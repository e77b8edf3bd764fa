//! Text tokenizer for delimited and fixed-width input
//!
//! Turns a byte stream into rows of string fields, one logical line at a time.
//!
//! ## Architecture
//!
//! - [`classifier`] - Byte-to-category mapping for delimiter mode
//! - [`line_tokenizer`] - Per-line state machine and the [`LineTokenizer`] driver
//! - [`fixed_width`] - Column-offset splitting used instead of delimiters
//! - [`input`] - File/stdin opening and byte-level reading
//!
//! ## Delimiter-mode rules
//!
//! - Repeated hard delimiters (`1,,2`) produce empty fields; repeated
//!   whitespace delimiters (`1\t\t2`) collapse to one boundary.
//! - Leading and trailing whitespace around a field is dropped.
//! - `'...'` and `"..."` spans are read verbatim, quotes stripped.
//! - A backslash makes the next byte literal.
//! - `#` outside quotes starts a comment running to the end of the line.
//! - Blank and comment-only lines yield zero fields.
//!
//! ## Usage
//!
//! ```rust
//! use std::io::Cursor;
//! use textload::RowBuffer;
//! use textload::app::services::tokenizer::LineTokenizer;
//!
//! let mut tokenizer = LineTokenizer::delimited(Cursor::new("a,'b,c'\n"), ",");
//! let mut row = RowBuffer::new();
//! tokenizer.read_line(&mut row).unwrap();
//!
//! assert_eq!(row.to_strings(), vec!["a", "b,c"]);
//! ```

pub mod classifier;
pub mod fixed_width;
pub mod input;
pub mod line_tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use classifier::{Category, DelimiterSet, QuoteState, classify};
pub use input::{ByteReader, open_input};
pub use line_tokenizer::{LineParse, LineTokenizer, SplitMode};
