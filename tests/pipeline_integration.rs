//! Integration tests for the customer cleaning pipeline
//!
//! These tests run the full Extract → Transform → Load → Export flow
//! against real files in temporary directories.

use chrono::NaiveDate;
use customer_etl::cli::run_pipeline;
use customer_etl::etl::{Extractor, Pipeline, PipelineState, Transformer};
use customer_etl::{
    CsvReader, CsvWriter, CustomerCleaner, EtlError, PipelineConfig, SqliteWriter,
};
use eyre::Result;
use rusqlite::Connection;
use std::path::Path;
use tempfile::TempDir;

const RAW_CUSTOMERS: &str = "\
ID_Cliente,Nombre,Monto_Compra,Email,Fecha_Nacimiento
1,Ana,150.5,ana@example.com,
2,Bruno,80,bruno@example.com,2006-06-16
3,Carla,,carla@example.com,1990-03-21
4,Diego,42.75,,1985-11-02
5,Elena,300,elena@example.com,2006-06-15
";

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn config(dir: &Path) -> PipelineConfig {
    PipelineConfig {
        input: dir.join("datos_clientes_raw.csv"),
        database: dir.join("clientes_limpios.db"),
        export: dir.join("clientes_limpios.csv"),
        ..PipelineConfig::defaults(as_of())
    }
}

fn row_count(database: &Path, table: &str) -> Result<i64> {
    let conn = Connection::open(database)?;
    let count = conn.query_row(&format!("SELECT COUNT(*) FROM \"{}\"", table), [], |r| r.get(0))?;
    Ok(count)
}

#[test]
fn test_five_row_scenario_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config(temp_dir.path());
    std::fs::write(&config.input, RAW_CUSTOMERS)?;

    let report = run_pipeline(&config)?;

    assert_eq!(report.extracted, 5);
    assert_eq!(report.cleaned, 3);
    assert!(report.is_success());

    let exported = std::fs::read_to_string(&config.export)?;
    assert_eq!(
        exported,
        "\
ID_Cliente,Nombre,Monto_Compra,Email,Fecha_Nacimiento,Edad
3,Carla,0.0,carla@example.com,1990-03-21,34
4,Diego,42.75,NO_PROVISTO,1985-11-02,38
5,Elena,300.0,elena@example.com,2006-06-15,18
"
    );

    assert_eq!(row_count(&config.database, "clientes_maestros")?, 3);
    let conn = Connection::open(&config.database)?;
    let mut stmt =
        conn.prepare("SELECT ID_Cliente, Monto_Compra, Email, Edad FROM clientes_maestros ORDER BY ID_Cliente")?;
    let rows = stmt
        .query_map([], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, f64>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, i64>(3)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    assert_eq!(
        rows,
        vec![
            ("3".to_string(), 0.0, "carla@example.com".to_string(), 34),
            ("4".to_string(), 42.75, "NO_PROVISTO".to_string(), 38),
            ("5".to_string(), 300.0, "elena@example.com".to_string(), 18),
        ]
    );
    Ok(())
}

#[test]
fn test_rerun_is_idempotent() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config(temp_dir.path());
    std::fs::write(&config.input, RAW_CUSTOMERS)?;

    run_pipeline(&config)?;
    let first_export = std::fs::read(&config.export)?;
    let first_count = row_count(&config.database, &config.table)?;

    run_pipeline(&config)?;
    let second_export = std::fs::read(&config.export)?;
    let second_count = row_count(&config.database, &config.table)?;

    assert_eq!(first_export, second_export);
    assert_eq!(first_count, 3);
    assert_eq!(second_count, 3);
    Ok(())
}

#[test]
fn test_missing_source_aborts_without_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config(temp_dir.path());

    let extractor = CsvReader::new(&config.input);
    let mut pipeline = Pipeline::new(extractor, CustomerCleaner::new(config.as_of))
        .with_loader(SqliteWriter::new(&config.database, &config.table))
        .with_loader(CsvWriter::new(&config.export));

    let err = pipeline.run().unwrap_err();
    assert!(matches!(err, EtlError::SourceNotFound { .. }));
    assert_eq!(pipeline.state(), PipelineState::Aborted);
    assert!(!config.database.exists());
    assert!(!config.export.exists());
    Ok(())
}

#[test]
fn test_load_failure_still_exports() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = PipelineConfig {
        database: temp_dir.path().join("missing/dir/clientes.db"),
        ..config(temp_dir.path())
    };
    std::fs::write(&config.input, RAW_CUSTOMERS)?;

    let report = run_pipeline(&config)?;

    assert!(!report.is_success());
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0], EtlError::LoadFailure { .. }));

    let exported = std::fs::read_to_string(&config.export)?;
    assert_eq!(exported.lines().count(), 4, "header plus three rows");
    Ok(())
}

#[test]
fn test_unparseable_birth_dates_are_dropped() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("raw.csv");
    std::fs::write(
        &input,
        "Monto_Compra,Email,Fecha_Nacimiento\n10,a@x.com,not-a-date\n20,b@x.com,1970-01-01\n",
    )?;

    let table = CsvReader::new(&input).extract()?;
    let cleaned = CustomerCleaner::new(as_of()).transform_table(table)?;

    assert_eq!(cleaned.len(), 1);
    assert_eq!(cleaned.rows[0].email.as_deref(), Some("b@x.com"));
    Ok(())
}

#[test]
fn test_short_row_is_dropped_and_batch_loads() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config(temp_dir.path());
    std::fs::write(
        &config.input,
        "ID,Monto_Compra,Email,Fecha_Nacimiento\n1,10,a@x.com,1980-01-01\n2,20,b@x.com\n",
    )?;

    let report = run_pipeline(&config)?;

    assert_eq!(report.extracted, 2);
    assert_eq!(report.cleaned, 1);
    assert!(report.is_success());
    assert_eq!(row_count(&config.database, &config.table)?, 1);
    Ok(())
}

#[test]
fn test_cells_pass_through_verbatim() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config(temp_dir.path());
    std::fs::write(
        &config.input,
        "ID,Nombre,Monto_Compra,Email,Fecha_Nacimiento\n1, Ana Maria , 12 ,a@x.com , 1980-01-01 \n2,NA,abc,NA,1981-01-01\n",
    )?;

    let report = run_pipeline(&config)?;
    assert_eq!(report.cleaned, 2);

    assert_eq!(
        std::fs::read_to_string(&config.export)?,
        "\
ID,Nombre,Monto_Compra,Email,Fecha_Nacimiento,Edad
1, Ana Maria ,12.0,a@x.com ,1980-01-01,44
2,,0.0,NO_PROVISTO,1981-01-01,43
"
    );
    Ok(())
}

#[test]
fn test_all_rows_filtered_still_replaces_outputs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config(temp_dir.path());
    std::fs::write(&config.input, RAW_CUSTOMERS)?;
    run_pipeline(&config)?;

    std::fs::write(
        &config.input,
        "ID_Cliente,Nombre,Monto_Compra,Email,Fecha_Nacimiento\n9,Zoe,1,z@x.com,2015-01-01\n",
    )?;
    let report = run_pipeline(&config)?;

    assert_eq!(report.cleaned, 0);
    assert_eq!(row_count(&config.database, &config.table)?, 0);
    assert_eq!(
        std::fs::read_to_string(&config.export)?,
        "ID_Cliente,Nombre,Monto_Compra,Email,Fecha_Nacimiento,Edad\n"
    );
    Ok(())
}
