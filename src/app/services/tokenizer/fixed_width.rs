//! Fixed-width line splitting
//!
//! Fields are cut at explicit column-end byte offsets. Quotes, escapes and
//! comment markers carry no special meaning in this mode.

use std::io::BufRead;

use super::input::ByteReader;
use crate::app::models::RowBuffer;
use crate::{Error, Result};

/// Split one line at the given column ends; returns true at end of input.
///
/// Bytes past the last offset form one final field.
pub(crate) fn read_fixed_line<R: BufRead>(
    reader: &mut ByteReader<R>,
    field_ends: &[usize],
    row: &mut RowBuffer,
    max_field_bytes: Option<usize>,
) -> Result<bool> {
    let mut ends = field_ends.iter().peekable();
    let mut position = 0usize;
    let mut need_field = true;

    loop {
        let byte = match reader.next_byte()? {
            None => return Ok(true),
            Some(b'\n') => return Ok(false),
            Some(b'\r') if reader.peek_byte()? == Some(b'\n') => continue,
            Some(byte) => byte,
        };
        position += 1;

        if need_field {
            row.open_field();
            need_field = false;
        }

        if let Some(field) = row.last_field_mut() {
            field.push(byte);
            if let Some(limit) = max_field_bytes {
                if field.len() > limit {
                    return Err(Error::FieldTooLong {
                        line: reader.line(),
                        limit,
                    });
                }
            }
        }

        if ends.peek() == Some(&&position) {
            ends.next();
            need_field = true;
        }
    }
}
