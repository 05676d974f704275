use chrono::{
    Datelike,
    NaiveDate,
    Weekday
};

use super::recurringholiday::RecurringHoliday;
use crate::calendarerror::CalendarError;
use crate::time::utility::{leap_day_of_year, weekday_distance};

/// The n-th occurrence of a weekday within a month, e.g. the fourth Monday of October.
#[derive(Clone, Debug)]
pub struct NthWeekdayHoliday {
    name: String,
    month: u32,
    n: u8,
    weekday: Weekday,
}

impl NthWeekdayHoliday {
    /// `n` is limited to 1..=4 so that every month has an occurrence;
    /// use `LastWeekdayHoliday` for "last X of the month".
    pub fn new(name: impl Into<String>, month: u32, n: u8, weekday: Weekday) -> Option<NthWeekdayHoliday> {
        if !(1..=12).contains(&month) || !(1..=4).contains(&n) {
            None
        } else {
            Some(NthWeekdayHoliday { name: name.into(), month, n, weekday })
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn n(&self) -> u8 {
        self.n
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }
}

impl RecurringHoliday for NthWeekdayHoliday {
    fn name(&self) -> &str {
        &self.name
    }

    fn nominal_date(&self, year: i32) -> Result<NaiveDate, CalendarError> {
        let first_of_month = NaiveDate::from_ymd_opt(year, self.month, 1)
            .ok_or_else(|| CalendarError::date_out_of_range(&self.name, year))?;
        let day = 1
            + weekday_distance(first_of_month.weekday(), self.weekday)
            + 7 * (self.n as u32 - 1);
        NaiveDate::from_ymd_opt(year, self.month, day)
            .ok_or_else(|| CalendarError::date_out_of_range(&self.name, year))
    }

    fn latest_day_of_year(&self) -> Option<u32> {
        Some(leap_day_of_year(self.month, 7 * self.n as u32))
    }
}
