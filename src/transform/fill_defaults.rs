//! Default fill-in for nullable columns
//!
//! Missing purchase amounts become 0 and missing emails become the
//! [`EMAIL_SENTINEL`] placeholder, so neither column is null downstream.

use crate::error::Result;
use crate::etl::Transformer;
use crate::record::{CustomerRecord, EMAIL_SENTINEL};

/// Transformer that replaces a null purchase amount with a default
///
/// # Example
/// ```
/// use customer_etl::etl::Transformer;
/// use customer_etl::record::CustomerRecord;
/// use customer_etl::transform::FillPurchaseAmount;
///
/// let record = CustomerRecord::default();
/// let filled = FillPurchaseAmount::default().transform(record).unwrap().unwrap();
/// assert_eq!(filled.purchase_amount, Some(0.0));
/// ```
pub struct FillPurchaseAmount {
    default: f64,
}

impl FillPurchaseAmount {
    pub fn new(default: f64) -> Self {
        Self { default }
    }
}

impl Default for FillPurchaseAmount {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Transformer for FillPurchaseAmount {
    type Input = CustomerRecord;
    type Output = CustomerRecord;

    fn transform(&self, mut input: Self::Input) -> Result<Option<Self::Output>> {
        input.purchase_amount.get_or_insert(self.default);
        Ok(Some(input))
    }
}

/// Transformer that replaces a null email with a sentinel string
pub struct FillEmail {
    sentinel: String,
}

impl FillEmail {
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }
}

impl Default for FillEmail {
    fn default() -> Self {
        Self::new(EMAIL_SENTINEL)
    }
}

impl Transformer for FillEmail {
    type Input = CustomerRecord;
    type Output = CustomerRecord;

    fn transform(&self, mut input: Self::Input) -> Result<Option<Self::Output>> {
        if input.email.is_none() {
            input.email = Some(self.sentinel.clone());
        }
        Ok(Some(input))
    }
}
