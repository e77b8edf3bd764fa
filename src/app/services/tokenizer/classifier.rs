//! Byte classification for the delimited-mode tokenizer
//!
//! Maps each input byte to a token category given the active delimiter set
//! and the caller's quoting state. Classification is a pure function; all
//! state lives with the caller.

use crate::constants::{COMMENT_MARKER, DOUBLE_QUOTE, ESCAPE_CHAR, SINGLE_QUOTE};

/// Token category of one input byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Hard delimiter such as a comma or pipe
    Delimiter,
    /// Space, tab or NUL that is also in the delimiter set
    WhitespaceDelimiter,
    /// Whitespace that is not a delimiter
    WhitespacePlain,
    Newline,
    SingleQuote,
    DoubleQuote,
    /// Backslash; the next byte is taken literally
    Escape,
    /// `#` outside quotes; the rest of the line is discarded
    Comment,
    EndOfInput,
    Regular,
}

/// Which quoted span, if any, is currently open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteState {
    #[default]
    Unquoted,
    Single,
    Double,
}

/// Set of ASCII delimiter characters with constant-time membership
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterSet {
    members: [bool; 128],
}

impl DelimiterSet {
    /// Build a set from the ASCII characters of `delimiters`; other bytes are ignored
    pub fn new(delimiters: &str) -> Self {
        let mut members = [false; 128];
        for byte in delimiters.bytes().filter(u8::is_ascii) {
            members[byte as usize] = true;
        }
        Self { members }
    }

    pub fn contains(&self, byte: u8) -> bool {
        byte.is_ascii() && self.members[byte as usize]
    }
}

impl Default for DelimiterSet {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_DELIMITERS)
    }
}

/// Classify one byte, or end of input when `byte` is `None`
pub fn classify(byte: Option<u8>, delimiters: &DelimiterSet, quotes: QuoteState) -> Category {
    let Some(c) = byte else {
        return Category::EndOfInput;
    };

    if c == COMMENT_MARKER && quotes == QuoteState::Unquoted {
        return Category::Comment;
    }
    if c == ESCAPE_CHAR {
        return Category::Escape;
    }

    match quotes {
        QuoteState::Single if c == SINGLE_QUOTE => return Category::SingleQuote,
        QuoteState::Double if c == DOUBLE_QUOTE => return Category::DoubleQuote,
        QuoteState::Single | QuoteState::Double => return Category::Regular,
        QuoteState::Unquoted => {}
    }

    let is_delimiter = delimiters.contains(c);
    match c {
        b' ' | b'\t' | 0 if is_delimiter => Category::WhitespaceDelimiter,
        b' ' | b'\t' | 0 | b'\r' => Category::WhitespacePlain,
        _ if is_delimiter => Category::Delimiter,
        b'\n' => Category::Newline,
        SINGLE_QUOTE => Category::SingleQuote,
        DOUBLE_QUOTE => Category::DoubleQuote,
        _ => Category::Regular,
    }
}
