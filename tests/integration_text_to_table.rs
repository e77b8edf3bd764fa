//! Integration tests for reading text files into numeric tables
//!
//! These tests write realistic input files to a temporary directory and run
//! them through the public API end to end.

use std::fs;
use tempfile::TempDir;
use textload::{Error, IngestConfig, text_to_table, write_parquet};

const READINGS: &str = "\
# Weather station export
# generated nightly
station|temp|rain|wind

LHR|12.5|0.0|4
EDI|9.25||7   # gusty
'St Ives'|inf|1e-2|-.5
CWL|nan|n/a|3
";

fn write_input(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

/// Full file with comments, blank lines, quoting and missing values
#[test]
fn test_weather_export_with_row_names() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, "readings.txt", READINGS);
    let config = IngestConfig::default().with_row_names(true);

    let result = text_to_table(&path, &config).unwrap();
    let table = &result.table;

    assert_eq!(table.column_names(), ["temp", "rain", "wind"]);
    assert_eq!(table.row_names(), ["LHR", "EDI", "St Ives", "CWL"]);
    assert_eq!(table.row(0), Some(&[12.5, 0.0, 4.0][..]));
    assert!(table.get(1, 1).unwrap().is_nan());
    assert_eq!(table.get(2, 0), Some(f64::INFINITY));
    assert_eq!(table.get(2, 2), Some(-0.5));
    assert!(table.get(3, 0).unwrap().is_nan());

    assert_eq!(result.stats.rows, 4);
    assert_eq!(result.stats.unparseable_fields, 1);
    assert_eq!(result.stats.missing_values, 2);
}

/// Re-serializing a table and reading it back gives the same values
#[test]
fn test_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let config = IngestConfig::default().with_row_names(true);
    let first = text_to_table(&write_input(&dir, "a.txt", READINGS), &config)
        .unwrap()
        .table;

    for delimiter in [',', '|', '\t'] {
        let text = first.to_delimited(delimiter);
        let path = write_input(&dir, "b.txt", &text);
        let second = text_to_table(&path, &config).unwrap().table;

        assert_eq!(second.column_names(), first.column_names());
        assert_eq!(second.row_names(), first.row_names());
        assert_eq!(second.rows(), first.rows());
        for row in 0..first.rows() {
            for (x, y) in first.row(row).unwrap().iter().zip(second.row(row).unwrap()) {
                assert!(x == y || (x.is_nan() && y.is_nan()), "{} vs {}", x, y);
            }
        }
    }
}

/// A wider line stops ingestion but keeps the earlier rows
#[test]
fn test_width_mismatch_keeps_partial_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, "bad.csv", "a,b,c\n1,2,3\n4,5,6\n7,8,9,10\n");

    let error = text_to_table(&path, &IngestConfig::default()).unwrap_err();
    assert!(matches!(error, Error::RowWidthMismatch { expected: 3, found: 4, .. }));

    let partial = error.into_partial_table().unwrap();
    assert_eq!(partial.rows(), 2);
    assert_eq!(partial.column_names(), ["a", "b", "c"]);
}

/// The header decides the width even for the first data line
#[test]
fn test_first_data_line_wider_than_header() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, "wide.csv", "a,b,c\n1,2,3,4\n");

    let error = text_to_table(&path, &IngestConfig::default()).unwrap_err();
    assert!(matches!(
        error,
        Error::RowWidthMismatch {
            line: 2,
            expected: 3,
            found: 4,
            ..
        }
    ));
    assert_eq!(error.into_partial_table().unwrap().rows(), 0);
}

/// Fixed-width columns with no header
#[test]
fn test_fixed_width_file() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, "fixed.dat", "123AABB\n456CCDD\n");
    let config = IngestConfig::default()
        .with_column_names(false)
        .with_field_ends(vec![3, 5, 7]);

    let result = text_to_table(&path, &config).unwrap();

    assert_eq!(result.table.rows(), 2);
    assert_eq!(result.table.width(), 3);
    assert_eq!(result.table.column(0), Some(vec![123.0, 456.0]));
    assert_eq!(result.stats.unparseable_fields, 4);
}

#[test]
fn test_missing_file_is_open_failure() {
    let result = text_to_table("/no/such/dir/data.csv", &IngestConfig::default());
    assert!(matches!(result, Err(Error::OpenFailed { .. })));
}

#[test]
fn test_parquet_export() {
    let dir = TempDir::new().unwrap();
    let config = IngestConfig::default().with_row_names(true);
    let table = text_to_table(&write_input(&dir, "r.txt", READINGS), &config)
        .unwrap()
        .table;

    let output = dir.path().join("readings.parquet");
    assert_eq!(write_parquet(&table, &output).unwrap(), 4);
    assert!(fs::metadata(&output).unwrap().len() > 0);
}
