use chrono::{Days, NaiveDate};

use super::recurringholiday::RecurringHoliday;
use crate::calendarerror::CalendarError;
use crate::time::utility::leap_day_of_year;

/// A holiday a fixed number of days before (negative) or after Western Easter Sunday.
#[derive(Clone, Debug)]
pub struct EasterRelatedHoliday {
    name: String,
    shift_days: i32,
}

impl EasterRelatedHoliday {
    pub fn new(name: impl Into<String>, shift_days: i32) -> EasterRelatedHoliday {
        EasterRelatedHoliday { name: name.into(), shift_days }
    }

    pub fn shift_days(&self) -> i32 {
        self.shift_days
    }
}

/// Gregorian Easter Sunday as (month, day), Gauss's algorithm in the
/// anonymous Gregorian (Meeus/Jones/Butcher) form.
pub fn easter_sunday_month_day(year: i32) -> (u32, u32) {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b.div_euclid(4);
    let e = b.rem_euclid(4);
    let f = (b + 8).div_euclid(25);
    let g = (b - f + 1).div_euclid(3);
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    (month as u32, day as u32)
}

pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let (month, day) = easter_sunday_month_day(year);
    NaiveDate::from_ymd_opt(year, month, day)
}

impl RecurringHoliday for EasterRelatedHoliday {
    fn name(&self) -> &str {
        &self.name
    }

    fn nominal_date(&self, year: i32) -> Result<NaiveDate, CalendarError> {
        let easter = easter_sunday(year)
            .ok_or_else(|| CalendarError::date_out_of_range(&self.name, year))?;
        let shift = Days::new(self.shift_days.unsigned_abs() as u64);
        let shifted = if self.shift_days >= 0 {
            easter.checked_add_days(shift)
        } else {
            easter.checked_sub_days(shift)
        };
        shifted.ok_or_else(|| CalendarError::date_out_of_range(&self.name, year))
    }

    fn latest_day_of_year(&self) -> Option<u32> {
        // Easter Sunday is never later than 25 April.
        let latest = leap_day_of_year(4, 25) as i64 + self.shift_days as i64;
        Some(latest.clamp(1, i32::MAX as i64) as u32)
    }
}
