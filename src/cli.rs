//! CLI helper functions

use crate::{
    config::PipelineConfig,
    error::EtlError,
    etl::{Pipeline, PipelineReport},
    storage::{CsvReader, CsvWriter, SqliteWriter},
    transform::CustomerCleaner,
};
use eyre::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

/// Clean the configured source into SQLite and the flat export
///
/// Pipeline: CsvReader → CustomerCleaner → SqliteWriter, CsvWriter
///
/// # Errors
/// Returns the extraction error when the source cannot be read; no output
/// is written in that case. Load and export failures are in the report.
pub fn run_pipeline(config: &PipelineConfig) -> std::result::Result<PipelineReport, EtlError> {
    log::info!(
        "Cleaning {} as of {}",
        config.input.display().bright_black(),
        config.as_of.cyan()
    );

    let extractor = CsvReader::new(&config.input);
    let cleaner = CustomerCleaner::with_min_age(config.as_of, config.min_age);
    let database = SqliteWriter::new(&config.database, &config.table);
    let export = CsvWriter::new(&config.export);

    let mut pipeline = Pipeline::new(extractor, cleaner)
        .with_loader(database)
        .with_loader(export);

    let report = pipeline.run().inspect_err(|e| {
        log::error!("{}", e);
        log::error!("Pipeline aborted, no output written");
    })?;

    if report.is_success() {
        log::info!(
            "✓ ETL pipeline complete: {} clean record(s) loaded into table '{}'",
            report.cleaned,
            config.table.cyan()
        );
    } else {
        log::warn!(
            "ETL pipeline finished with {} failed output(s)",
            report.failures().count()
        );
    }

    Ok(report)
}

/// Write a pipeline report as pretty JSON
pub fn write_report(report: &PipelineReport, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, format!("{}\n", json))
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    log::info!("Report written to {}", path.display().bright_black());
    Ok(())
}
