//! Column operations that clean raw customer records
//!
//! Each operation is a [`Transformer`](crate::etl::Transformer) over
//! [`CustomerRecord`](crate::record::CustomerRecord);
//! [`CustomerCleaner`] chains them in the order the cleaning rules require.

mod age;
mod birth_date;
mod cleaner;
mod fill_defaults;

pub use age::{ADULT_AGE, AdultFilter, DeriveAge, age_on};
pub use birth_date::{
    DATE_FORMATS, DATETIME_FORMATS, DropMissingBirthDate, ParseBirthDate, parse_birth_date,
};
pub use cleaner::CustomerCleaner;
pub use fill_defaults::{FillEmail, FillPurchaseAmount};
