//! Tests for input opening and byte reading

use std::io::{Cursor, Read};

use super::super::input::{ByteReader, open_input};
use super::create_temp_file;
use crate::Error;

#[test]
fn test_byte_reader_counts_lines() {
    let mut reader = ByteReader::new(Cursor::new("a\nb\n"));
    assert_eq!(reader.line(), 1);
    assert_eq!(reader.peek_byte().unwrap(), Some(b'a'));
    assert_eq!(reader.next_byte().unwrap(), Some(b'a'));
    assert_eq!(reader.next_byte().unwrap(), Some(b'\n'));
    assert_eq!(reader.line(), 2);
    assert_eq!(reader.next_byte().unwrap(), Some(b'b'));
    assert_eq!(reader.next_byte().unwrap(), Some(b'\n'));
    assert_eq!(reader.next_byte().unwrap(), None);
    assert_eq!(reader.peek_byte().unwrap(), None);
}

#[test]
fn test_open_input_reads_file() {
    let file = create_temp_file("x\n");
    let mut input = open_input(file.path().to_str().unwrap()).unwrap();

    let mut text = String::new();
    input.read_to_string(&mut text).unwrap();
    assert_eq!(text, "x\n");
}

#[test]
fn test_open_missing_file_fails() {
    let result = open_input("/definitely/not/here.txt");
    assert!(matches!(result, Err(Error::OpenFailed { .. })));
}
