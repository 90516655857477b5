//! Extractor trait for data extraction from various sources

use super::Table;
use crate::error::Result;

/// Extractor trait for extracting a table from a source
///
/// Implementors define how to read rows from sources like:
/// - CSV files
/// - Databases
/// - In-memory fixtures
///
/// # Example
/// ```
/// use customer_etl::etl::{Extractor, Table};
/// use customer_etl::record::Columns;
/// use customer_etl::Result;
///
/// struct Fixture(Vec<i32>);
///
/// impl Extractor for Fixture {
///     type Item = i32;
///
///     fn extract(&self) -> Result<Table<Self::Item>> {
///         Ok(Table::new(Columns::new(["n"]), self.0.clone()))
///     }
/// }
///
/// let table = Fixture(vec![1, 2]).extract().unwrap();
/// assert_eq!(table.len(), 2);
/// ```
pub trait Extractor {
    /// The type of rows extracted
    type Item;

    /// Extract all rows from the source
    ///
    /// # Errors
    /// Returns an error if the source is missing or cannot be parsed
    fn extract(&self) -> Result<Table<Self::Item>>;
}
