//! Errors raised by the stats engine.
//!
//! Only structurally broken input is rejected. Empty or all-zero data is a
//! legitimate "no activity" state and never produces an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Invalid weekday {weekday} for {date}: expected 0-6")]
    InvalidWeekday { date: String, weekday: u8 },

    #[error("Invalid date {date:?}: expected YYYY-MM-DD")]
    InvalidDate {
        date: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type StatsResult<T> = std::result::Result<T, StatsError>;
