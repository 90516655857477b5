//! File system storage operations
//!
//! This module handles all I/O against the pipeline's source and outputs:
//! - CSV reading (the extractor) and writing (the flat export)
//! - SQLite table replacement (the relational load)

mod csv_file;
mod sqlite;

pub use csv_file::{CsvReader, CsvWriter};
pub use sqlite::SqliteWriter;
