//! Test utilities for table materializer testing

use std::io::Cursor;

use super::{MaterializeResult, materialize_reader};
use crate::Result;
use crate::config::IngestConfig;

// Test modules
mod export_tests;
mod stats_tests;

/// Materialize in-memory text with the given configuration
pub fn materialize(text: &str, config: &IngestConfig) -> Result<MaterializeResult> {
    materialize_reader(Cursor::new(text.to_string()), config)
}

/// Small table with a header, row names and one missing value
pub fn create_test_text() -> &'static str {
    "# station readings\n\
     temp,rain\n\
     north,12.5,0.2\n\
     south,14.0,\n\
     \n\
     east,-3,1e-3\n"
}
