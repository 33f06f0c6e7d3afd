//! Error type for the analytics core
//!
//! The pipeline itself never fails; errors only come from constructing
//! selections and parsing catalog names from user input.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SalesError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("date range {start} to {end} does not overlap the log ({min} to {max})")]
    OutsideLog {
        start: NaiveDate,
        end: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },

    #[error("unknown product '{0}'")]
    UnknownProduct(String),

    #[error("unknown region '{0}'")]
    UnknownRegion(String),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, SalesError>;
