use crate::resolver::error::ResolveError;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// The calendar day a station's data was recorded on.
///
/// Only guarantees a real calendar date; the archive's supported range is
/// enforced by [`crate::PathResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ObservationDate(NaiveDate);

impl ObservationDate {
    /// Builds a date from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidDate`] when the parts do not form a calendar
    /// date (e.g. February 30th or month 13).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ResolveError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(ResolveError::InvalidDate { year, month, day })
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day of year, 1-based.
    pub fn ordinal(&self) -> u32 {
        self.0.ordinal()
    }

    /// Lower-case three-letter English month name, as used in archive filenames.
    pub(crate) fn month_abbreviation(&self) -> &'static str {
        MONTH_ABBREVIATIONS[self.0.month0() as usize]
    }

    /// Two-digit year, as used in archive filenames.
    pub(crate) fn short_year(&self) -> String {
        format!("{:02}", self.0.year().rem_euclid(100))
    }
}

impl From<NaiveDate> for ObservationDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for ObservationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
