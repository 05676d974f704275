use std::ops::RangeInclusive;

use chrono::NaiveDate;
use thiserror::Error;

/// Failure of a calendar query.
///
/// `UnknownYear` is the only failure expected in a correctly deployed
/// calendar; the other variants signal a broken rule table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("holiday '{holiday}' has no date for year {year}")]
    UnknownYear { holiday: String, year: i32 },

    #[error("no working day found within {limit} days of {from}")]
    RunawayScan { from: NaiveDate, limit: u32 },

    #[error("holiday '{holiday}' falls outside the representable date range in year {year}")]
    DateOutOfRange { holiday: String, year: i32 },
}

impl CalendarError {
    pub fn unknown_year(holiday: &str, year: i32) -> CalendarError {
        CalendarError::UnknownYear { holiday: holiday.to_owned(), year }
    }

    pub fn date_out_of_range(holiday: &str, year: i32) -> CalendarError {
        CalendarError::DateOutOfRange { holiday: holiday.to_owned(), year }
    }

    pub fn is_unknown_year(&self) -> bool {
        matches!(self, CalendarError::UnknownYear { .. })
    }
}

/// Failure while loading or validating a calendar configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read calendar configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed calendar configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid holiday rule '{holiday}': {reason}")]
    InvalidRule { holiday: String, reason: String },

    #[error("holiday '{holiday}' has no entries for years {missing:?} (required {first}..={last})")]
    MissingYears {
        holiday: String,
        first: i32,
        last: i32,
        missing: Vec<i32>,
    },

    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl ConfigError {
    pub fn invalid_rule(holiday: &str, reason: impl Into<String>) -> ConfigError {
        ConfigError::InvalidRule {
            holiday: holiday.to_owned(),
            reason: reason.into(),
        }
    }

    pub fn missing_years(holiday: &str, years: &RangeInclusive<i32>, missing: Vec<i32>) -> ConfigError {
        ConfigError::MissingYears {
            holiday: holiday.to_owned(),
            first: *years.start(),
            last: *years.end(),
            missing,
        }
    }
}
