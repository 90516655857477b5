//! Customer records and the column layout of a customer table

use chrono::NaiveDate;
use std::fmt;

/// Purchase amount column (numeric, defaults to 0)
pub const PURCHASE_AMOUNT: &str = "Monto_Compra";
/// Email column (text, defaults to [`EMAIL_SENTINEL`])
pub const EMAIL: &str = "Email";
/// Birth date column (mandatory)
pub const BIRTH_DATE: &str = "Fecha_Nacimiento";
/// Derived age column
pub const AGE: &str = "Edad";

/// Placeholder written when a customer did not provide an email
pub const EMAIL_SENTINEL: &str = "NO_PROVISTO";

/// Columns every source file must provide
pub const REQUIRED_COLUMNS: [&str; 3] = [PURCHASE_AMOUNT, EMAIL, BIRTH_DATE];

/// Cell contents read as missing values, in addition to the empty string
///
/// This is the default missing-value set of a dataframe CSV reader. Markers
/// match the whole cell exactly; `" NA "` is a value, not a null.
pub const NULL_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true if a raw CSV cell represents a missing value
pub fn is_null(cell: &str) -> bool {
    cell.is_empty() || NULL_MARKERS.contains(&cell)
}

/// Keep a raw CSV cell as written, or None if it is a missing value
pub fn non_null(cell: &str) -> Option<String> {
    if is_null(cell) {
        None
    } else {
        Some(cell.to_string())
    }
}

/// What a column holds, resolved against [`CustomerRecord`] fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Pass-through column, indexing into [`CustomerRecord::identity`]
    Identity(usize),
    PurchaseAmount,
    Email,
    BirthDate,
    Age,
}

/// Ordered column names of a table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    names: Vec<String>,
}

impl Columns {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Append a column if it is not already present
    pub fn with_column(mut self, name: &str) -> Self {
        if !self.contains(name) {
            self.names.push(name.to_string());
        }
        self
    }

    /// Names of the pass-through columns, in header order
    pub fn identity(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .map(String::as_str)
            .filter(|name| !is_known(name))
    }

    /// Resolve every column to the record field it reads from
    pub fn kinds(&self) -> Vec<ColumnKind> {
        let mut identity = 0;
        self.names
            .iter()
            .map(|name| match name.as_str() {
                PURCHASE_AMOUNT => ColumnKind::PurchaseAmount,
                EMAIL => ColumnKind::Email,
                BIRTH_DATE => ColumnKind::BirthDate,
                AGE => ColumnKind::Age,
                _ => {
                    identity += 1;
                    ColumnKind::Identity(identity - 1)
                }
            })
            .collect()
    }
}

fn is_known(name: &str) -> bool {
    matches!(name, PURCHASE_AMOUNT | EMAIL | BIRTH_DATE | AGE)
}

/// Birth date as read from the source, or after parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BirthDate {
    Raw(String),
    Date(NaiveDate),
}

impl BirthDate {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Raw(_) => None,
            Self::Date(date) => Some(*date),
        }
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(raw) => f.write_str(raw),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// One customer row
///
/// Fields are optional because a record lives through every cleaning step;
/// after [`CustomerCleaner`](crate::transform::CustomerCleaner) has run,
/// `purchase_amount`, `email`, `birth_date` (parsed) and `age` are all set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerRecord {
    /// Pass-through cells, aligned with [`Columns::identity`]
    pub identity: Vec<Option<String>>,
    pub purchase_amount: Option<f64>,
    pub email: Option<String>,
    pub birth_date: Option<BirthDate>,
    pub age: Option<u32>,
}

impl CustomerRecord {
    /// Read the value of a column
    pub fn cell(&self, kind: ColumnKind) -> Cell {
        match kind {
            ColumnKind::Identity(idx) => self
                .identity
                .get(idx)
                .cloned()
                .flatten()
                .map_or(Cell::Null, Cell::Text),
            ColumnKind::PurchaseAmount => self.purchase_amount.map_or(Cell::Null, Cell::Real),
            ColumnKind::Email => self.email.clone().map_or(Cell::Null, Cell::Text),
            ColumnKind::BirthDate => self
                .birth_date
                .as_ref()
                .map_or(Cell::Null, |b| Cell::Text(b.to_string())),
            ColumnKind::Age => self
                .age
                .map_or(Cell::Null, |age| Cell::Integer(i64::from(age))),
        }
    }

    /// Values of every column, in column order
    pub fn cells(&self, kinds: &[ColumnKind]) -> Vec<Cell> {
        kinds.iter().map(|kind| self.cell(*kind)).collect()
    }

    /// Parsed birth date, if the record has one
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date.as_ref().and_then(BirthDate::date)
    }
}

/// A single output value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Text(String),
    Real(f64),
    Integer(i64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Real(value) => f.write_str(&format_amount(*value)),
            Self::Integer(value) => write!(f, "{}", value),
        }
    }
}

/// Render a float with at least one decimal place (`0.0`, `150.5`)
pub fn format_amount(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
