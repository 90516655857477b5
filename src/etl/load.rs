//! Loader trait for loading data to destinations

use super::Table;
use crate::error::Result;

/// Loader trait for writing a table to a destination
///
/// Implementors define how to persist rows to destinations:
/// - Relational tables
/// - Flat files
///
/// # Example
/// ```
/// use customer_etl::etl::{Loader, Table};
/// use customer_etl::record::Columns;
/// use customer_etl::Result;
///
/// struct CountingLoader;
///
/// impl Loader for CountingLoader {
///     type Item = i32;
///
///     fn destination(&self) -> String {
///         "memory".to_string()
///     }
///
///     fn load(&self, table: &Table<Self::Item>) -> Result<usize> {
///         Ok(table.len())
///     }
/// }
///
/// let table = Table::new(Columns::new(["n"]), vec![1, 2, 3]);
/// assert_eq!(CountingLoader.load(&table).unwrap(), 3);
/// ```
pub trait Loader {
    /// The type of rows to load
    type Item;

    /// Human-readable name of the destination, used in logs and reports
    fn destination(&self) -> String;

    /// Load the table to the destination
    ///
    /// Returns the number of rows written
    ///
    /// # Errors
    /// Returns an error if writing fails (I/O, constraint, etc.)
    fn load(&self, table: &Table<Self::Item>) -> Result<usize>;
}
