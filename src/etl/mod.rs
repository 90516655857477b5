//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides trait definitions for building data pipelines
//! that extract a table from a source, transform its rows, and load the
//! result to one or more destinations.

mod extract;
mod load;
mod pipeline;
mod table;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::{LoadOutcome, Pipeline, PipelineReport, PipelineState};
pub use table::Table;
pub use transform::{Chain, Transformer};
