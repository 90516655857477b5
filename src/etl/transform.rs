//! Transformer trait for data transformation

use super::Table;
use crate::error::Result;
use crate::record::Columns;

/// Transformer trait for transforming rows
///
/// Implementors define one column operation:
/// - Filling defaults into missing values
/// - Dropping rows that lack a mandatory value
/// - Deriving new columns
/// - Filtering by a business rule
///
/// Each transformer is a pure function from one row sequence to another.
/// Returning `Ok(None)` from [`transform`](Transformer::transform) drops the
/// row from the output.
///
/// # Example
/// ```
/// use customer_etl::etl::Transformer;
/// use customer_etl::Result;
///
/// struct KeepEven;
///
/// impl Transformer for KeepEven {
///     type Input = i32;
///     type Output = i32;
///
///     fn transform(&self, input: Self::Input) -> Result<Option<Self::Output>> {
///         Ok((input % 2 == 0).then_some(input))
///     }
/// }
///
/// assert_eq!(KeepEven.transform_many(vec![1, 2, 3, 4]).unwrap(), vec![2, 4]);
/// ```
pub trait Transformer {
    /// Input row type
    type Input;

    /// Output row type after transformation
    type Output;

    /// Transform a single row, or drop it by returning `None`
    ///
    /// # Errors
    /// Returns an error if transformation fails
    fn transform(&self, input: Self::Input) -> Result<Option<Self::Output>>;

    /// Short name used in progress logs
    fn name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Column layout produced by this step
    ///
    /// Override this when the step derives a new column
    fn transform_columns(&self, columns: Columns) -> Columns {
        columns
    }

    /// Transform multiple rows, keeping their order
    fn transform_many(&self, inputs: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        let mut outputs = Vec::with_capacity(inputs.len());
        for input in inputs {
            if let Some(output) = self.transform(input)? {
                outputs.push(output);
            }
        }
        Ok(outputs)
    }

    /// Transform a whole table: columns and rows
    fn transform_table(&self, table: Table<Self::Input>) -> Result<Table<Self::Output>> {
        let before = table.len();
        let columns = self.transform_columns(table.columns);
        let rows = self.transform_many(table.rows)?;
        if rows.len() != before {
            log::debug!("{}: dropped {} of {} row(s)", self.name(), before - rows.len(), before);
        } else {
            log::debug!("{}: {} row(s)", self.name(), rows.len());
        }
        Ok(Table::new(columns, rows))
    }

    /// Run `next` on the output of this transformer
    fn then<T>(self, next: T) -> Chain<Self, T>
    where
        Self: Sized,
        T: Transformer<Input = Self::Output>,
    {
        Chain {
            first: self,
            second: next,
        }
    }
}

/// Two transformers applied in sequence, built with [`Transformer::then`]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Transformer for Chain<A, B>
where
    A: Transformer,
    B: Transformer<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn transform(&self, input: Self::Input) -> Result<Option<Self::Output>> {
        match self.first.transform(input)? {
            Some(intermediate) => self.second.transform(intermediate),
            None => Ok(None),
        }
    }

    fn transform_columns(&self, columns: Columns) -> Columns {
        self.second
            .transform_columns(self.first.transform_columns(columns))
    }

    // Step by step so every step logs its own drop count
    fn transform_table(&self, table: Table<Self::Input>) -> Result<Table<Self::Output>> {
        let intermediate = self.first.transform_table(table)?;
        self.second.transform_table(intermediate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Double;

    impl Transformer for Double {
        type Input = i32;
        type Output = i32;
        fn transform(&self, input: Self::Input) -> Result<Option<Self::Output>> {
            Ok(Some(input * 2))
        }
    }

    struct DropAbove(i32);

    impl Transformer for DropAbove {
        type Input = i32;
        type Output = i32;
        fn transform(&self, input: Self::Input) -> Result<Option<Self::Output>> {
            Ok((input <= self.0).then_some(input))
        }
        fn transform_columns(&self, columns: Columns) -> Columns {
            columns.with_column("checked")
        }
    }

    #[test]
    fn test_transform_many_keeps_order() {
        let output = DropAbove(3).transform_many(vec![5, 1, 4, 3, 2]).unwrap();
        assert_eq!(output, vec![1, 3, 2]);
    }

    #[test]
    fn test_chain_applies_in_order() {
        let chain = Double.then(DropAbove(4));
        assert_eq!(chain.transform_many(vec![1, 2, 3]).unwrap(), vec![2, 4]);

        let reversed = DropAbove(4).then(Double);
        assert_eq!(reversed.transform_many(vec![1, 2, 3, 5]).unwrap(), vec![2, 4, 6]);
    }

    #[test]
    fn test_chain_transforms_columns() {
        let chain = Double.then(DropAbove(10));
        let table = Table::new(Columns::new(["n"]), vec![1, 6]);

        let output = chain.transform_table(table).unwrap();
        assert_eq!(output.columns, Columns::new(["n", "checked"]));
        assert_eq!(output.rows, vec![2]);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(Columns::new(["n"]), Vec::new());
        let output = Double.then(DropAbove(1)).transform_table(table).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(Double.name(), "Double");
    }
}
