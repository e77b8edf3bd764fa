//! Tests for Parquet export

use polars::prelude::{ParquetReader, SerReader};
use std::fs::File;
use tempfile::TempDir;

use super::{create_test_text, materialize};
use crate::app::services::table_materializer::{to_dataframe, write_parquet};
use crate::config::IngestConfig;

#[test]
fn test_dataframe_has_row_names_and_nulls() {
    let config = IngestConfig::default().with_row_names(true);
    let table = materialize(create_test_text(), &config).unwrap().table;

    let df = to_dataframe(&table).unwrap();
    let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();

    assert_eq!(names, vec!["row_names", "temp", "rain"]);
    assert_eq!(df.height(), 3);
    assert_eq!(df.column("rain").unwrap().null_count(), 1);
}

#[test]
fn test_write_parquet_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("table.parquet");
    let table = materialize("a,b\n1,2\n3,\n", &IngestConfig::default())
        .unwrap()
        .table;

    let rows = write_parquet(&table, &path).unwrap();
    assert_eq!(rows, 2);
    assert!(path.exists());

    let df = ParquetReader::new(File::open(&path).unwrap()).finish().unwrap();
    assert_eq!(df.shape(), (2, 2));
    assert_eq!(df.column("b").unwrap().null_count(), 1);
}
