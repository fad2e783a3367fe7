//! Calendar dates (no time, no zone).

use chrono::NaiveDate;

use invoicing_core::{DomainError, DomainResult, ValueObject};

const ISO_8601_DATE: &str = "%Y-%m-%d";

/// An ISO 8601 `YYYY-MM-DD` date. Ordered chronologically.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn create(value: &str) -> DomainResult<Self> {
        if !has_iso_date_shape(value) {
            return Err(DomainError::InvalidDateFormat(value.to_string()));
        }
        NaiveDate::parse_from_str(value, ISO_8601_DATE)
            .map(Self)
            .map_err(|_| DomainError::InvalidDateFormat(value.to_string()))
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn equals(&self, other: &CalendarDate) -> bool {
        self == other
    }

    pub fn less_than(&self, other: &CalendarDate) -> bool {
        self < other
    }
}

impl ValueObject for CalendarDate {}

impl core::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format(ISO_8601_DATE))
    }
}

// chrono alone would accept "2024-1-5"; the wire format is strictly zero-padded.
fn has_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
