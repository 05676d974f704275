use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};

use super::recurringholiday::RecurringHoliday;
use crate::calendarerror::CalendarError;
use crate::time::utility::leap_day_of_year;

/// A movable feast with no closed-form rule, looked up by year.
///
/// The table has to be extended as years go by: any year without an entry
/// fails with `CalendarError::UnknownYear`.
#[derive(Clone, Debug)]
pub struct YearTableHoliday {
    name: String,
    table: BTreeMap<i32, NaiveDate>,
}

impl YearTableHoliday {
    /// Returns `None` if an entry's date does not lie in the year it is keyed by.
    pub fn new(name: impl Into<String>, table: BTreeMap<i32, NaiveDate>) -> Option<YearTableHoliday> {
        if table.iter().any(|(&year, d)| d.year() != year) {
            return None;
        }
        Some(YearTableHoliday { name: name.into(), table })
    }

    pub fn from_dates(name: impl Into<String>, dates: impl IntoIterator<Item = NaiveDate>) -> YearTableHoliday {
        YearTableHoliday {
            name: name.into(),
            table: dates.into_iter().map(|d| (d.year(), d)).collect(),
        }
    }

    pub fn table(&self) -> &BTreeMap<i32, NaiveDate> {
        &self.table
    }

    pub fn first_year(&self) -> Option<i32> {
        self.table.keys().next().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.table.keys().next_back().copied()
    }

    /// Years in `years` that have no entry.
    pub fn missing_years(&self, years: RangeInclusive<i32>) -> Vec<i32> {
        years.filter(|y| !self.table.contains_key(y)).collect()
    }

    pub fn covers(&self, years: RangeInclusive<i32>) -> bool {
        self.missing_years(years).is_empty()
    }
}

impl RecurringHoliday for YearTableHoliday {
    fn name(&self) -> &str {
        &self.name
    }

    fn nominal_date(&self, year: i32) -> Result<NaiveDate, CalendarError> {
        self.table
            .get(&year)
            .copied()
            .ok_or_else(|| CalendarError::unknown_year(&self.name, year))
    }

    /// Bounded by the tabulated dates, since no other year yields a date.
    fn latest_day_of_year(&self) -> Option<u32> {
        self.table
            .values()
            .map(|d| leap_day_of_year(d.month(), d.day()))
            .max()
    }
}
