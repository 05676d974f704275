use chrono::NaiveDate;

use super::recurringholiday::RecurringHoliday;
use crate::calendarerror::CalendarError;
use crate::time::utility::{days_of_month, leap_day_of_year};

#[derive(Clone, Debug)]
pub struct FixedDateHoliday {
    name: String,
    month: u32,
    day: u32,
}

impl FixedDateHoliday {
    /// Returns `None` for month/day pairs that do not exist every year
    /// (including 29 February).
    pub fn new(name: impl Into<String>, month: u32, day: u32) -> Option<FixedDateHoliday> {
        if !(1..=12).contains(&month) || day == 0 || day > days_of_month(2001, month) {
            return None;
        }
        Some(FixedDateHoliday {
            name: name.into(),
            month,
            day,
        })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl RecurringHoliday for FixedDateHoliday {
    fn name(&self) -> &str {
        &self.name
    }

    fn nominal_date(&self, year: i32) -> Result<NaiveDate, CalendarError> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .ok_or_else(|| CalendarError::date_out_of_range(&self.name, year))
    }

    fn latest_day_of_year(&self) -> Option<u32> {
        Some(leap_day_of_year(self.month, self.day))
    }
}
