use clap::{Parser, builder::styling};
use customer_etl::cli::{run_pipeline, write_report};
use customer_etl::config::{Overrides, PipelineConfig};
use eyre::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Customer ETL: clean a raw customer CSV into SQLite and a flat CSV export
#[derive(Parser)]
#[command(name = "cetl", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source settings from (ignored if missing)
    #[arg(short, long, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long)]
    debug: bool,

    /// Raw customer CSV to clean [env: ETL_INPUT_FILE] [default: datos_clientes_raw.csv]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// SQLite database to load into [env: ETL_DB_FILE] [default: clientes_limpios.db]
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Table to replace [env: ETL_TABLE_NAME] [default: clientes_maestros]
    #[arg(short, long)]
    table: Option<String>,

    /// Flat CSV export [env: ETL_EXPORT_FILE] [default: clientes_limpios.csv]
    #[arg(short = 'o', long)]
    export: Option<PathBuf>,

    /// Date to compute ages on, YYYY-MM-DD [env: ETL_AS_OF] [default: today]
    #[arg(long)]
    as_of: Option<String>,

    /// Youngest age to keep [default: 18]
    #[arg(long)]
    min_age: Option<u32>,

    /// Write a JSON run report to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(err) = dotenvy::from_filename(&cli.env) {
        if !err.not_found() {
            return Err(err.into());
        }
    }

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    let config = PipelineConfig::from_env(Overrides {
        input: cli.input,
        database: cli.database,
        table: cli.table,
        export: cli.export,
        as_of: cli.as_of,
        min_age: cli.min_age,
    })?;
    log::debug!("Configuration: {:?}", config);

    let report = run_pipeline(&config)?;

    if let Some(path) = &cli.report {
        write_report(&report, path)?;
    }

    let failed = report.failures().count();
    if failed > 0 {
        eyre::bail!("{} of {} output(s) failed", failed.red(), report.outcomes.len());
    }

    Ok(())
}
