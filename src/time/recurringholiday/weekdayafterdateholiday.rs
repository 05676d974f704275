use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::recurringholiday::RecurringHoliday;
use crate::calendarerror::CalendarError;
use crate::time::utility::{days_of_month, leap_day_of_year, weekday_distance};

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub enum AfterDateMode {
    /// The anchor date itself qualifies when it is the target weekday.
    #[default]
    OnOrAfter,
    /// The anchor date never qualifies; a week later is used instead.
    After,
}

/// The first given weekday on or after an anchor date,
/// e.g. Auckland Anniversary: the Monday after 29 January.
#[derive(Clone, Debug)]
pub struct WeekdayAfterDateHoliday {
    name: String,
    month: u32,
    day: u32,
    weekday: Weekday,
    mode: AfterDateMode,
}

impl WeekdayAfterDateHoliday {
    pub fn new(
        name: impl Into<String>,
        month: u32,
        day: u32,
        weekday: Weekday,
        mode: AfterDateMode,
    ) -> Option<WeekdayAfterDateHoliday> {
        if !(1..=12).contains(&month) || day == 0 || day > days_of_month(2001, month) {
            return None;
        }
        Some(WeekdayAfterDateHoliday { name: name.into(), month, day, weekday, mode })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn mode(&self) -> AfterDateMode {
        self.mode
    }
}

impl RecurringHoliday for WeekdayAfterDateHoliday {
    fn name(&self) -> &str {
        &self.name
    }

    fn nominal_date(&self, year: i32) -> Result<NaiveDate, CalendarError> {
        let anchor = NaiveDate::from_ymd_opt(year, self.month, self.day)
            .ok_or_else(|| CalendarError::date_out_of_range(&self.name, year))?;
        let mut shift = weekday_distance(anchor.weekday(), self.weekday);
        if shift == 0 && self.mode == AfterDateMode::After {
            shift = 7;
        }
        anchor
            .checked_add_days(Days::new(shift as u64))
            .ok_or_else(|| CalendarError::date_out_of_range(&self.name, year))
    }

    fn latest_day_of_year(&self) -> Option<u32> {
        // At most a week past the anchor, possibly into January.
        Some(leap_day_of_year(self.month, self.day) + 7)
    }
}
