use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Unknown station '{name}' (known stations: {known})")]
    UnknownStation { name: String, known: String },

    #[error("Date {date} is outside the supported range {earliest} to {latest}")]
    UnsupportedDate {
        date: NaiveDate,
        earliest: NaiveDate,
        latest: NaiveDate,
    },

    #[error("{year:04}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },
}
