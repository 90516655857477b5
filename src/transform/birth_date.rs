//! Birth date validation
//!
//! The birth date is mandatory: rows without one have no sensible default
//! and are dropped. Present values are parsed into calendar dates; a value
//! that matches none of [`DATE_FORMATS`] or [`DATETIME_FORMATS`] is treated
//! the same as a missing one.

use crate::error::Result;
use crate::etl::Transformer;
use crate::record::{BirthDate, CustomerRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Accepted date-only layouts
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Accepted date-time layouts; the time part is ignored
pub const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a raw birth date cell
///
/// Also accepts RFC 3339 timestamps with an offset.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Transformer that drops rows with a null birth date
pub struct DropMissingBirthDate;

impl Transformer for DropMissingBirthDate {
    type Input = CustomerRecord;
    type Output = CustomerRecord;

    fn transform(&self, input: Self::Input) -> Result<Option<Self::Output>> {
        Ok(input.birth_date.is_some().then_some(input))
    }
}

/// Transformer that parses raw birth dates, dropping unparseable rows
///
/// # Example
/// ```
/// use customer_etl::etl::Transformer;
/// use customer_etl::record::{BirthDate, CustomerRecord};
/// use customer_etl::transform::ParseBirthDate;
///
/// let record = CustomerRecord {
///     birth_date: Some(BirthDate::Raw("1990-03-01".to_string())),
///     ..Default::default()
/// };
/// let parsed = ParseBirthDate.transform(record).unwrap().unwrap();
/// assert_eq!(parsed.birth_date().unwrap().to_string(), "1990-03-01");
/// ```
pub struct ParseBirthDate;

impl Transformer for ParseBirthDate {
    type Input = CustomerRecord;
    type Output = CustomerRecord;

    fn transform(&self, mut input: Self::Input) -> Result<Option<Self::Output>> {
        let parsed = match &input.birth_date {
            Some(BirthDate::Date(date)) => *date,
            Some(BirthDate::Raw(raw)) => match parse_birth_date(raw) {
                Some(date) => date,
                None => {
                    log::warn!("Dropping row with unparseable birth date '{}'", raw);
                    return Ok(None);
                }
            },
            None => return Ok(None),
        };
        input.birth_date = Some(BirthDate::Date(parsed));
        Ok(Some(input))
    }
}
