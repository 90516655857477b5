//! Age derivation and the adult-only business rule

use crate::error::Result;
use crate::etl::Transformer;
use crate::record::{AGE, Columns, CustomerRecord};
use chrono::{Datelike, NaiveDate};

/// Minimum age a customer must have to be kept
pub const ADULT_AGE: u32 = 18;

/// Whole years between `birth` and `as_of`, by calendar
///
/// The year difference is reduced by one while the birthday has not yet
/// come around in `as_of`'s year. Someone born on 29 February turns a year
/// older on 1 March in non-leap years. Birth dates after `as_of` give 0.
///
/// ```
/// use chrono::NaiveDate;
/// use customer_etl::transform::age_on;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let birth = NaiveDate::from_ymd_opt(2006, 6, 16).unwrap();
/// assert_eq!(age_on(birth, today), 17);
/// ```
pub fn age_on(birth: NaiveDate, as_of: NaiveDate) -> u32 {
    let mut years = as_of.year() - birth.year();
    if (as_of.month(), as_of.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// Transformer that derives the `Edad` column from the parsed birth date
///
/// The processing date is injected rather than read from the clock, so a
/// run is reproducible for a given `as_of`.
pub struct DeriveAge {
    as_of: NaiveDate,
}

impl DeriveAge {
    pub fn new(as_of: NaiveDate) -> Self {
        Self { as_of }
    }
}

impl Transformer for DeriveAge {
    type Input = CustomerRecord;
    type Output = CustomerRecord;

    fn transform(&self, mut input: Self::Input) -> Result<Option<Self::Output>> {
        let Some(birth) = input.birth_date() else {
            return Ok(None);
        };
        input.age = Some(age_on(birth, self.as_of));
        Ok(Some(input))
    }

    fn transform_columns(&self, columns: Columns) -> Columns {
        columns.with_column(AGE)
    }
}

/// Transformer that keeps only customers at or above a minimum age
pub struct AdultFilter {
    min_age: u32,
}

impl AdultFilter {
    pub fn new(min_age: u32) -> Self {
        Self { min_age }
    }
}

impl Default for AdultFilter {
    fn default() -> Self {
        Self::new(ADULT_AGE)
    }
}

impl Transformer for AdultFilter {
    type Input = CustomerRecord;
    type Output = CustomerRecord;

    fn transform(&self, input: Self::Input) -> Result<Option<Self::Output>> {
        let adult = input.age.is_some_and(|age| age >= self.min_age);
        Ok(adult.then_some(input))
    }
}
