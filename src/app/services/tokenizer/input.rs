//! Input stream handling
//!
//! Opens files or standard input and hands bytes to the tokenizers one at a
//! time, counting physical lines for error messages.

use crate::constants::STDIN_INPUT;
use crate::{Error, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind};
use tracing::debug;

/// Open a named input for reading; `-` selects standard input
pub fn open_input(path: &str) -> Result<Box<dyn BufRead>> {
    if path == STDIN_INPUT {
        debug!("Reading from standard input");
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(path).map_err(|e| Error::open_failed(path, e))?;
    debug!("Opened input file {}", path);
    Ok(Box::new(BufReader::new(file)))
}

/// Byte-at-a-time view over a buffered reader
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,
    line: usize,
}

impl<R: BufRead> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, line: 1 }
    }

    /// Physical line number (1-based) of the next byte
    pub fn line(&self) -> usize {
        self.line
    }

    /// Read the next byte, or `None` at end of input
    pub fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = match self.peek_byte()? {
            Some(byte) => byte,
            None => return Ok(None),
        };
        self.inner.consume(1);
        if byte == b'\n' {
            self.line += 1;
        }
        Ok(Some(byte))
    }

    /// Look at the next byte without consuming it
    pub fn peek_byte(&mut self) -> Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::io("Failed to read input", e)),
            }
        }
    }
}
