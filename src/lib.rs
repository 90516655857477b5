//! Customer ETL
//!
//! A batch pipeline that cleans a raw customer CSV and persists the result
//! to a SQLite table and a flat CSV export.

pub mod cli;
pub mod config;
pub mod error;
pub mod etl;
pub mod record;
pub mod storage;
pub mod transform;

// Re-exports for convenience
pub use config::PipelineConfig;
pub use error::{EtlError, Result};
pub use etl::{Extractor, Loader, Pipeline, PipelineReport, PipelineState, Table, Transformer};
pub use record::{Columns, CustomerRecord};
pub use storage::{CsvReader, CsvWriter, SqliteWriter};
pub use transform::CustomerCleaner;
