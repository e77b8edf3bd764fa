//! Line tokenizer
//!
//! Reads exactly one logical line per call and fills a [`RowBuffer`] with
//! its fields, using either delimiter scanning or fixed column offsets.

use std::io::BufRead;
use tracing::trace;

use super::classifier::{Category, DelimiterSet, QuoteState, classify};
use super::fixed_width::read_fixed_line;
use super::input::ByteReader;
use crate::app::models::RowBuffer;
use crate::config::IngestConfig;
use crate::{Error, Result};

/// Outcome of tokenizing one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineParse {
    /// Number of fields on the line (0 for blank or comment-only lines)
    pub fields: usize,

    /// The line ended at end of input rather than at a newline
    pub eof: bool,
}

/// How lines are split into fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitMode {
    Delimited(DelimiterSet),
    FixedWidth(Vec<usize>),
}

impl SplitMode {
    pub fn from_config(config: &IngestConfig) -> Self {
        match &config.field_ends {
            Some(ends) => Self::FixedWidth(ends.clone()),
            None => Self::Delimited(DelimiterSet::new(&config.delimiters)),
        }
    }
}

/// Splits an input stream into rows, one logical line per call
#[derive(Debug)]
pub struct LineTokenizer<R> {
    reader: ByteReader<R>,
    mode: SplitMode,
    max_field_bytes: Option<usize>,
    blank_lines: usize,
}

impl<R: BufRead> LineTokenizer<R> {
    /// Create a tokenizer using the split mode and limits of `config`
    pub fn new(reader: R, config: &IngestConfig) -> Self {
        Self {
            reader: ByteReader::new(reader),
            mode: SplitMode::from_config(config),
            max_field_bytes: config.max_field_bytes,
            blank_lines: 0,
        }
    }

    /// Create a delimiter-mode tokenizer
    pub fn delimited(reader: R, delimiters: &str) -> Self {
        Self::with_mode(reader, SplitMode::Delimited(DelimiterSet::new(delimiters)))
    }

    /// Create a fixed-width tokenizer from column-end offsets
    pub fn fixed_width(reader: R, field_ends: Vec<usize>) -> Self {
        Self::with_mode(reader, SplitMode::FixedWidth(field_ends))
    }

    fn with_mode(reader: R, mode: SplitMode) -> Self {
        Self {
            reader: ByteReader::new(reader),
            mode,
            max_field_bytes: None,
            blank_lines: 0,
        }
    }

    pub fn mode(&self) -> &SplitMode {
        &self.mode
    }

    /// Physical line number of the next unread byte
    pub fn line(&self) -> usize {
        self.reader.line()
    }

    /// Blank or comment-only lines skipped by [`Self::read_nonblank`]
    pub fn blank_lines(&self) -> usize {
        self.blank_lines
    }

    /// Tokenize the next logical line into `row`, replacing its contents
    pub fn read_line(&mut self, row: &mut RowBuffer) -> Result<LineParse> {
        row.clear();
        row.set_line(self.reader.line());

        let eof = match &self.mode {
            SplitMode::Delimited(delimiters) => {
                read_delimited_line(&mut self.reader, delimiters, row, self.max_field_bytes)?
            }
            SplitMode::FixedWidth(ends) => {
                read_fixed_line(&mut self.reader, ends, row, self.max_field_bytes)?
            }
        };
        row.set_eof(eof);

        trace!("Line {}: {} fields, eof={}", row.line(), row.len(), eof);
        Ok(LineParse {
            fields: row.len(),
            eof,
        })
    }

    /// Read lines until one has fields; `None` once input is exhausted
    pub fn read_nonblank(&mut self, row: &mut RowBuffer) -> Result<Option<LineParse>> {
        loop {
            let parsed = self.read_line(row)?;
            if parsed.fields > 0 {
                return Ok(Some(parsed));
            }
            if parsed.eof {
                return Ok(None);
            }
            self.blank_lines += 1;
        }
    }
}

/// Per-line tokenizer state
#[derive(Debug, Default)]
struct LineState {
    in_single_quote: bool,
    in_double_quote: bool,
    in_field: bool,
    last_was_whitespace: bool,
    last_nonwhite: usize,
    pending_quote: bool,
}

impl LineState {
    fn quotes(&self) -> QuoteState {
        if self.in_single_quote {
            QuoteState::Single
        } else if self.in_double_quote {
            QuoteState::Double
        } else {
            QuoteState::Unquoted
        }
    }
}

/// Tokenize one delimited line; returns true when it ended at end of input
fn read_delimited_line<R: BufRead>(
    reader: &mut ByteReader<R>,
    delimiters: &DelimiterSet,
    row: &mut RowBuffer,
    max_field_bytes: Option<usize>,
) -> Result<bool> {
    let mut state = LineState::default();

    let last = loop {
        let byte = reader.next_byte()?;
        let mut category = classify(byte, delimiters, state.quotes());
        let mut ch = byte.unwrap_or(0);

        if category == Category::Comment {
            category = skip_comment(reader)?;
        }

        if category == Category::Escape {
            match reader.next_byte()? {
                Some(next) => {
                    ch = next;
                    category = Category::Regular;
                }
                None => category = Category::EndOfInput,
            }
        }

        match category {
            Category::SingleQuote => {
                state.in_single_quote = !state.in_single_quote;
                note_quote(&mut state, row);
            }
            Category::DoubleQuote => {
                state.in_double_quote = !state.in_double_quote;
                note_quote(&mut state, row);
            }
            _ => {}
        }

        // Runs of whitespace delimiters count once.
        if category == Category::WhitespaceDelimiter && state.last_was_whitespace {
            continue;
        }
        state.last_was_whitespace = category == Category::WhitespaceDelimiter;

        if !state.in_field {
            if matches!(
                category,
                Category::WhitespacePlain | Category::WhitespaceDelimiter
            ) {
                // An empty quoted span does not mark the next field.
                state.pending_quote = false;
            }
            if category == Category::WhitespacePlain {
                continue;
            }
            // A newline or end of input only opens a (blank) field on a line
            // that already has data; otherwise the line is blank.
            let opens_field = matches!(category, Category::Regular | Category::Delimiter)
                || (matches!(category, Category::Newline | Category::EndOfInput)
                    && !row.is_empty());
            if opens_field {
                let field = row.open_field();
                if state.pending_quote {
                    field.mark_quoted();
                }
                state.pending_quote = false;
                state.in_field = true;
                state.last_nonwhite = 0;
            }
        }

        if state.in_field {
            match category {
                Category::Delimiter
                | Category::Newline
                | Category::EndOfInput
                | Category::WhitespaceDelimiter => {
                    if let Some(field) = row.last_field_mut() {
                        field.truncate(state.last_nonwhite);
                    }
                    state.in_field = false;
                    state.last_nonwhite = 0;
                }
                Category::WhitespacePlain | Category::Regular => {
                    if let Some(field) = row.last_field_mut() {
                        field.push(ch);
                        if category == Category::Regular {
                            state.last_nonwhite = field.len();
                        }
                        if let Some(limit) = max_field_bytes {
                            if field.len() > limit {
                                return Err(Error::FieldTooLong {
                                    line: reader.line(),
                                    limit,
                                });
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        if matches!(category, Category::Newline | Category::EndOfInput) {
            break category;
        }
    };

    Ok(last == Category::EndOfInput)
}

/// Record a quote character against the open field, or the next one
fn note_quote(state: &mut LineState, row: &mut RowBuffer) {
    if state.in_field {
        if let Some(field) = row.last_field_mut() {
            field.mark_quoted();
        }
    } else {
        state.pending_quote = true;
    }
}

/// Discard bytes through the next newline
fn skip_comment<R: BufRead>(reader: &mut ByteReader<R>) -> Result<Category> {
    loop {
        match reader.next_byte()? {
            Some(b'\n') => return Ok(Category::Newline),
            Some(_) => {}
            None => return Ok(Category::EndOfInput),
        }
    }
}
