//! SQLite table writer
//!
//! Every load replaces the destination table: the previous table is dropped
//! and recreated from the cleaned table's columns inside one transaction.

use crate::error::{EtlError, Result};
use crate::etl::{Loader, Table};
use crate::record::{Cell, ColumnKind, CustomerRecord};
use rusqlite::Connection;
use rusqlite::types::Value;
use std::path::{Path, PathBuf};

/// Write customer records to a named SQLite table
pub struct SqliteWriter {
    database: PathBuf,
    table: String,
}

impl SqliteWriter {
    /// # Arguments
    /// * `database` - SQLite file, created if it does not exist
    /// * `table` - Table name, replaced on every load
    pub fn new(database: impl AsRef<Path>, table: impl Into<String>) -> Self {
        Self {
            database: database.as_ref().to_path_buf(),
            table: table.into(),
        }
    }

    /// Replace the table's contents with `table`
    ///
    /// The connection is opened and closed within this call.
    pub fn write(&self, table: &Table<CustomerRecord>) -> rusqlite::Result<usize> {
        let mut conn = Connection::open(&self.database)?;
        let name = quote_identifier(&self.table);
        let kinds = table.columns.kinds();

        let tx = conn.transaction()?;
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {}", name))?;

        let definitions = table
            .columns
            .names()
            .iter()
            .zip(&kinds)
            .map(|(column, kind)| format!("{} {}", quote_identifier(column), sql_type(*kind)))
            .collect::<Vec<_>>()
            .join(", ");
        tx.execute_batch(&format!("CREATE TABLE {} ({})", name, definitions))?;

        {
            let placeholders = (1..=kinds.len())
                .map(|i| format!("?{}", i))
                .collect::<Vec<_>>()
                .join(", ");
            let mut insert =
                tx.prepare(&format!("INSERT INTO {} VALUES ({})", name, placeholders))?;
            for row in &table.rows {
                let values = row.cells(&kinds).into_iter().map(sql_value);
                insert.execute(rusqlite::params_from_iter(values))?;
            }
        }
        tx.commit()?;

        conn.close().map_err(|(_, e)| e)?;
        Ok(table.len())
    }
}

impl Loader for SqliteWriter {
    type Item = CustomerRecord;

    fn destination(&self) -> String {
        format!("{}#{}", self.database.display(), self.table)
    }

    fn load(&self, table: &Table<Self::Item>) -> Result<usize> {
        log::info!(
            "Starting load into table '{}' in {}",
            self.table,
            self.database.display()
        );
        self.write(table).map_err(|source| EtlError::LoadFailure {
            destination: self.destination(),
            source,
        })
    }
}

/// Quote an SQL identifier, doubling embedded quotes
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn sql_type(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::PurchaseAmount => "REAL",
        ColumnKind::Age => "INTEGER",
        ColumnKind::Identity(_) | ColumnKind::Email | ColumnKind::BirthDate => "TEXT",
    }
}

fn sql_value(cell: Cell) -> Value {
    match cell {
        Cell::Null => Value::Null,
        Cell::Text(text) => Value::Text(text),
        Cell::Real(value) => Value::Real(value),
        Cell::Integer(value) => Value::Integer(value),
    }
}
