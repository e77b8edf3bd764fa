//! Test utilities for tokenizer testing
//!
//! Helpers that run a tokenizer over in-memory text and collect the
//! resulting rows as plain strings.

use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

use super::LineTokenizer;
use crate::app::models::RowBuffer;

mod fixed_width_tests;
mod input_tests;

/// Tokenize every non-blank line of `text` with the given delimiters
pub fn tokenize_all(text: &str, delimiters: &str) -> Vec<Vec<String>> {
    let tokenizer = LineTokenizer::delimited(Cursor::new(text.to_string()), delimiters);
    collect_rows(tokenizer)
}

/// Tokenize every non-blank line of `text` at fixed column ends
pub fn tokenize_fixed(text: &str, ends: &[usize]) -> Vec<Vec<String>> {
    let tokenizer = LineTokenizer::fixed_width(Cursor::new(text.to_string()), ends.to_vec());
    collect_rows(tokenizer)
}

fn collect_rows(mut tokenizer: LineTokenizer<Cursor<String>>) -> Vec<Vec<String>> {
    let mut row = RowBuffer::new();
    let mut rows = Vec::new();
    while let Some(parsed) = tokenizer.read_nonblank(&mut row).unwrap() {
        rows.push(row.to_strings());
        if parsed.eof {
            break;
        }
    }
    rows
}

/// Helper to create a temporary input file
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
