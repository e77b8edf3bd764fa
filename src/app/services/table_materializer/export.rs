//! Parquet export for materialized tables
//!
//! Converts a [`DataTable`] into a polars `DataFrame` (NaN cells become
//! nulls, row names become a leading string column) and writes it with
//! Snappy compression.

use polars::prelude::{Column, DataFrame, ParquetCompression, ParquetWriter};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::app::models::DataTable;
use crate::constants::ROW_NAMES_COLUMN;
use crate::{Error, Result};

/// Build a DataFrame holding the table's columns
pub fn to_dataframe(table: &DataTable) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(table.width() + 1);

    if table.has_row_names() {
        columns.push(Column::new(ROW_NAMES_COLUMN.into(), table.row_names()));
    }

    for (index, name) in table.column_names().iter().enumerate() {
        let values: Vec<Option<f64>> = table
            .column(index)
            .unwrap_or_default()
            .into_iter()
            .map(|v| if v.is_nan() { None } else { Some(v) })
            .collect();
        columns.push(Column::new(name.as_str().into(), values));
    }

    Ok(DataFrame::new(columns)?)
}

/// Write the table to a Parquet file, returning the number of rows written
pub fn write_parquet(table: &DataTable, path: &Path) -> Result<usize> {
    info!("Writing {} rows to {}", table.rows(), path.display());

    let mut df = to_dataframe(table)?;
    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

    let bytes = ParquetWriter::new(file)
        .with_compression(ParquetCompression::Snappy)
        .finish(&mut df)?;

    debug!("Parquet file {} is {} bytes", path.display(), bytes);
    Ok(df.height())
}
