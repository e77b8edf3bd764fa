//! Tests for fixed-width splitting

use super::tokenize_fixed;

#[test]
fn test_fixed_width_splits_at_offsets() {
    let rows = tokenize_fixed("123AABB\n456CCDD\n", &[3, 5, 7]);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec!["123", "AA", "BB"]);
    assert_eq!(rows[1], vec!["456", "CC", "DD"]);
    assert!(rows.iter().all(|r| r.iter().map(String::len).eq([3, 2, 2])));
}

#[test]
fn test_bytes_past_last_offset_form_final_field() {
    let rows = tokenize_fixed("12345678\n", &[2, 4]);
    assert_eq!(rows, vec![vec!["12", "34", "5678"]]);
}

#[test]
fn test_short_line_yields_fewer_fields() {
    let rows = tokenize_fixed("1234\n", &[3, 6, 9]);
    assert_eq!(rows, vec![vec!["123", "4"]]);
}

#[test]
fn test_no_special_characters_in_fixed_mode() {
    let rows = tokenize_fixed("'a#\\,b\n", &[3, 6]);
    assert_eq!(rows, vec![vec!["'a#", "\\,b"]]);
}

#[test]
fn test_fixed_width_crlf_and_blank_lines() {
    let rows = tokenize_fixed("ab12\r\n\r\ncd34", &[2]);
    assert_eq!(rows, vec![vec!["ab", "12"], vec!["cd", "34"]]);
}
