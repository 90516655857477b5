//! The full customer cleaning sequence

use super::{
    AdultFilter, DeriveAge, DropMissingBirthDate, FillEmail, FillPurchaseAmount, ParseBirthDate,
};
use crate::error::Result;
use crate::etl::{Chain, Table, Transformer};
use crate::record::{Columns, CustomerRecord};
use chrono::NaiveDate;

type Steps = Chain<
    Chain<
        Chain<Chain<Chain<FillPurchaseAmount, FillEmail>, DropMissingBirthDate>, ParseBirthDate>,
        DeriveAge,
    >,
    AdultFilter,
>;

/// Transformer that applies every cleaning rule, in order:
///
/// 1. Null purchase amount → 0
/// 2. Null email → `NO_PROVISTO`
/// 3. Drop rows with a null birth date
/// 4. Parse birth dates, dropping unparseable ones
/// 5. Derive `Edad` as of the processing date
/// 6. Keep only customers aged 18 or more
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use customer_etl::etl::Transformer;
/// use customer_etl::record::{BirthDate, CustomerRecord};
/// use customer_etl::transform::CustomerCleaner;
///
/// let cleaner = CustomerCleaner::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
/// let record = CustomerRecord {
///     birth_date: Some(BirthDate::Raw("1980-01-01".to_string())),
///     ..Default::default()
/// };
///
/// let cleaned = cleaner.transform(record).unwrap().unwrap();
/// assert_eq!(cleaned.age, Some(44));
/// assert_eq!(cleaned.email.as_deref(), Some("NO_PROVISTO"));
/// assert_eq!(cleaned.purchase_amount, Some(0.0));
/// ```
pub struct CustomerCleaner {
    steps: Steps,
}

impl CustomerCleaner {
    /// Cleaner computing ages as of `as_of`, keeping adults only
    pub fn new(as_of: NaiveDate) -> Self {
        Self::with_min_age(as_of, super::ADULT_AGE)
    }

    /// Cleaner with a custom minimum age
    pub fn with_min_age(as_of: NaiveDate, min_age: u32) -> Self {
        let steps = FillPurchaseAmount::default()
            .then(FillEmail::default())
            .then(DropMissingBirthDate)
            .then(ParseBirthDate)
            .then(DeriveAge::new(as_of))
            .then(AdultFilter::new(min_age));
        Self { steps }
    }
}

impl Transformer for CustomerCleaner {
    type Input = CustomerRecord;
    type Output = CustomerRecord;

    fn transform(&self, input: Self::Input) -> Result<Option<Self::Output>> {
        self.steps.transform(input)
    }

    fn transform_columns(&self, columns: Columns) -> Columns {
        self.steps.transform_columns(columns)
    }

    fn transform_table(&self, table: Table<Self::Input>) -> Result<Table<Self::Output>> {
        self.steps.transform_table(table)
    }
}
