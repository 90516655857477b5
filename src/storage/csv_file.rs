//! CSV file operations

use crate::error::{EtlError, Result};
use crate::etl::{Extractor, Loader, Table};
use crate::record::{
    BirthDate, ColumnKind, Columns, CustomerRecord, PURCHASE_AMOUNT, REQUIRED_COLUMNS, non_null,
};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Read customer records from a CSV file with a header row
pub struct CsvReader {
    path: PathBuf,
}

impl CsvReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file into a table
    ///
    /// Header names are trimmed and stripped of a leading BOM. Data cells are
    /// kept as written; only purchase amounts and birth dates are trimmed, when
    /// they are parsed. Rows shorter than the header read their missing
    /// trailing cells as null.
    ///
    /// # Errors
    /// - [`EtlError::SourceNotFound`] if the file does not exist
    /// - [`EtlError::SourceRead`] for other I/O or CSV syntax errors
    /// - [`EtlError::MissingColumn`] if a required column is absent
    /// - [`EtlError::ExtraFields`] if a row has more cells than the header
    pub fn read(&self) -> Result<Table<CustomerRecord>> {
        let file = File::open(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EtlError::SourceNotFound {
                    path: self.path.clone(),
                }
            } else {
                self.read_error(e.into())
            }
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers = reader.headers().map_err(|e| self.read_error(e))?;
        let columns = Columns::new(
            headers
                .iter()
                .map(|h| h.trim_start_matches('\u{feff}').trim().to_string()),
        );

        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !columns.contains(c)) {
            return Err(EtlError::MissingColumn {
                column: missing.to_string(),
                path: self.path.clone(),
            });
        }

        let kinds = columns.kinds();
        let identity_count = columns.identity().count();
        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record.map_err(|e| self.read_error(e))?;
            if record.len() > kinds.len() {
                return Err(EtlError::ExtraFields {
                    path: self.path.clone(),
                    row: idx + 1,
                    expected: kinds.len(),
                    found: record.len(),
                });
            }
            rows.push(parse_row(idx + 1, &record, &kinds, identity_count));
        }

        Ok(Table::new(columns, rows))
    }

    fn read_error(&self, source: csv::Error) -> EtlError {
        EtlError::SourceRead {
            path: self.path.clone(),
            source,
        }
    }
}

/// Build a record from one CSV row; `row` is 1-based, excluding the header
fn parse_row(
    row: usize,
    record: &csv::StringRecord,
    kinds: &[ColumnKind],
    identity_count: usize,
) -> CustomerRecord {
    let mut customer = CustomerRecord {
        identity: vec![None; identity_count],
        ..Default::default()
    };

    for (kind, cell) in kinds.iter().zip(record.iter()) {
        match kind {
            ColumnKind::Identity(idx) => customer.identity[*idx] = non_null(cell),
            ColumnKind::PurchaseAmount => customer.purchase_amount = parse_amount(row, cell),
            ColumnKind::Email => customer.email = non_null(cell),
            ColumnKind::BirthDate => customer.birth_date = non_null(cell).map(BirthDate::Raw),
            // Derived; any source value is recomputed
            ColumnKind::Age => {}
        }
    }

    customer
}

/// Non-numeric amounts are read as null, like a missing value
fn parse_amount(row: usize, cell: &str) -> Option<f64> {
    let value = non_null(cell)?;
    match value.trim().parse::<f64>() {
        // A padded " NaN " parses to NaN, which is still missing
        Ok(amount) if amount.is_nan() => None,
        Ok(amount) => Some(amount),
        Err(_) => {
            log::warn!(
                "Row {}: {} value '{}' is not a number, treating it as missing",
                row,
                PURCHASE_AMOUNT,
                value
            );
            None
        }
    }
}

impl Extractor for CsvReader {
    type Item = CustomerRecord;

    fn extract(&self) -> Result<Table<Self::Item>> {
        log::info!("Starting extraction from {}", self.path.display());
        self.read()
    }
}

/// Write customer records to a CSV file, replacing any existing file
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Write the header and every row; no index column
    pub fn write(&self, table: &Table<CustomerRecord>) -> std::result::Result<usize, csv::Error> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(table.columns.names())?;

        let kinds = table.columns.kinds();
        for row in &table.rows {
            writer.write_record(row.cells(&kinds).iter().map(ToString::to_string))?;
        }
        writer.flush()?;

        Ok(table.len())
    }
}

impl Loader for CsvWriter {
    type Item = CustomerRecord;

    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self, table: &Table<Self::Item>) -> Result<usize> {
        let count = self.write(table).map_err(|source| EtlError::ExportFailure {
            path: self.path.clone(),
            source,
        })?;
        log::info!("Exported {} record(s) to CSV: {}", count, self.path.display());
        Ok(count)
    }
}
