//! Pipeline configuration
//!
//! Every setting has a built-in default, can be overridden by an environment
//! variable (optionally sourced from a dotenv file), and finally by a CLI flag.

use crate::transform::ADULT_AGE;
use chrono::NaiveDate;
use eyre::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_INPUT_FILE: &str = "datos_clientes_raw.csv";
pub const DEFAULT_DB_FILE: &str = "clientes_limpios.db";
pub const DEFAULT_TABLE_NAME: &str = "clientes_maestros";
pub const DEFAULT_EXPORT_FILE: &str = "clientes_limpios.csv";

pub const ENV_INPUT_FILE: &str = "ETL_INPUT_FILE";
pub const ENV_DB_FILE: &str = "ETL_DB_FILE";
pub const ENV_TABLE_NAME: &str = "ETL_TABLE_NAME";
pub const ENV_EXPORT_FILE: &str = "ETL_EXPORT_FILE";
pub const ENV_AS_OF: &str = "ETL_AS_OF";

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub table: Option<String>,
    pub export: Option<PathBuf>,
    pub as_of: Option<String>,
    pub min_age: Option<u32>,
}

/// Fully resolved settings for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Source CSV file
    pub input: PathBuf,
    /// SQLite database file
    pub database: PathBuf,
    /// Table replaced on every run
    pub table: String,
    /// Flat CSV export
    pub export: PathBuf,
    /// Date ages are computed on
    pub as_of: NaiveDate,
    /// Youngest age kept
    pub min_age: u32,
}

impl PipelineConfig {
    /// Built-in defaults, computing ages as of `as_of`
    pub fn defaults(as_of: NaiveDate) -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            database: PathBuf::from(DEFAULT_DB_FILE),
            table: DEFAULT_TABLE_NAME.to_string(),
            export: PathBuf::from(DEFAULT_EXPORT_FILE),
            as_of,
            min_age: ADULT_AGE,
        }
    }

    /// Resolve settings from CLI overrides, then the process environment,
    /// then defaults; the processing date defaults to today's local date
    pub fn from_env(overrides: Overrides) -> Result<Self> {
        Self::resolve(
            overrides,
            |key| std::env::var(key).ok(),
            chrono::Local::now().date_naive(),
        )
    }

    /// Resolve settings with an explicit variable lookup and current date
    pub fn resolve(
        overrides: Overrides,
        lookup: impl Fn(&str) -> Option<String>,
        today: NaiveDate,
    ) -> Result<Self> {
        let defaults = Self::defaults(today);
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let as_of = match overrides.as_of.or_else(|| env(ENV_AS_OF)) {
            Some(raw) => parse_as_of(&raw)?,
            None => defaults.as_of,
        };

        let table = overrides
            .table
            .or_else(|| env(ENV_TABLE_NAME))
            .unwrap_or(defaults.table);
        if table.trim().is_empty() {
            eyre::bail!("Table name must not be empty");
        }

        Ok(Self {
            input: overrides
                .input
                .or_else(|| env(ENV_INPUT_FILE).map(PathBuf::from))
                .unwrap_or(defaults.input),
            database: overrides
                .database
                .or_else(|| env(ENV_DB_FILE).map(PathBuf::from))
                .unwrap_or(defaults.database),
            table,
            export: overrides
                .export
                .or_else(|| env(ENV_EXPORT_FILE).map(PathBuf::from))
                .unwrap_or(defaults.export),
            as_of,
            min_age: overrides.min_age.unwrap_or(defaults.min_age),
        })
    }
}

/// Parse a processing date given as `YYYY-MM-DD`
pub fn parse_as_of(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid processing date '{}', expected YYYY-MM-DD", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::resolve(Overrides::default(), lookup(&[]), today()).unwrap();
        assert_eq!(config, PipelineConfig::defaults(today()));
        assert_eq!(config.input, PathBuf::from("datos_clientes_raw.csv"));
        assert_eq!(config.database, PathBuf::from("clientes_limpios.db"));
        assert_eq!(config.table, "clientes_maestros");
        assert_eq!(config.export, PathBuf::from("clientes_limpios.csv"));
        assert_eq!(config.min_age, 18);
    }

    #[test]
    fn test_env_overrides_defaults() {
        let vars = lookup(&[
            (ENV_INPUT_FILE, "in.csv"),
            (ENV_TABLE_NAME, "customers"),
            (ENV_AS_OF, "2020-01-31"),
            (ENV_DB_FILE, "  "),
        ]);
        let config = PipelineConfig::resolve(Overrides::default(), vars, today()).unwrap();

        assert_eq!(config.input, PathBuf::from("in.csv"));
        assert_eq!(config.table, "customers");
        assert_eq!(config.as_of, NaiveDate::from_ymd_opt(2020, 1, 31).unwrap());
        assert_eq!(config.database, PathBuf::from(DEFAULT_DB_FILE));
    }

    #[test]
    fn test_cli_overrides_env() {
        let overrides = Overrides {
            input: Some(PathBuf::from("cli.csv")),
            as_of: Some("2001-02-03".to_string()),
            min_age: Some(21),
            ..Default::default()
        };
        let vars = lookup(&[(ENV_INPUT_FILE, "env.csv"), (ENV_AS_OF, "2020-01-31")]);
        let config = PipelineConfig::resolve(overrides, vars, today()).unwrap();

        assert_eq!(config.input, PathBuf::from("cli.csv"));
        assert_eq!(config.as_of, NaiveDate::from_ymd_opt(2001, 2, 3).unwrap());
        assert_eq!(config.min_age, 21);
    }

    #[test]
    fn test_invalid_as_of() {
        let err = PipelineConfig::resolve(
            Overrides::default(),
            lookup(&[(ENV_AS_OF, "15/06/2024")]),
            today(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("15/06/2024"));
    }

    #[test]
    fn test_empty_table_name() {
        let overrides = Overrides {
            table: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(PipelineConfig::resolve(overrides, lookup(&[]), today()).is_err());
    }
}
