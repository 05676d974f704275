use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::recurringholiday::RecurringHoliday;
use crate::calendarerror::CalendarError;
use crate::time::utility::{days_of_month, leap_day_of_year, weekday_distance};

#[derive(Clone, Debug)]
pub struct LastWeekdayHoliday {
    name: String,
    month: u32,
    weekday: Weekday,
}

impl LastWeekdayHoliday {
    pub fn new(name: impl Into<String>, month: u32, weekday: Weekday) -> Option<LastWeekdayHoliday> {
        if !(1..=12).contains(&month) {
            None
        } else {
            Some(LastWeekdayHoliday { name: name.into(), month, weekday })
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }
}

impl RecurringHoliday for LastWeekdayHoliday {
    fn name(&self) -> &str {
        &self.name
    }

    fn nominal_date(&self, year: i32) -> Result<NaiveDate, CalendarError> {
        let end_of_month = NaiveDate::from_ymd_opt(year, self.month, days_of_month(year, self.month))
            .ok_or_else(|| CalendarError::date_out_of_range(&self.name, year))?;

        // Walk back from the end of the month to the target weekday
        let days_back = weekday_distance(self.weekday, end_of_month.weekday());
        end_of_month
            .checked_sub_days(Days::new(days_back as u64))
            .ok_or_else(|| CalendarError::date_out_of_range(&self.name, year))
    }

    fn latest_day_of_year(&self) -> Option<u32> {
        Some(leap_day_of_year(self.month, days_of_month(2000, self.month)))
    }
}
