//! In-memory table: ordered columns plus ordered rows

use crate::record::Columns;

/// An ordered sequence of rows sharing one column layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table<R> {
    pub columns: Columns,
    pub rows: Vec<R>,
}

impl<R> Table<R> {
    pub fn new(columns: Columns, rows: Vec<R>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
