use std::sync::Arc;

use chrono::{Datelike, DateTime, Days, NaiveDate, TimeZone};

use crate::calendarerror::CalendarError;
use crate::time::calendar::holidayset::HolidaySet;
use crate::time::recurringholiday::weekendadjustment::MAX_SCAN_DAYS;
use crate::time::utility::{local_date, local_today};

/// Holiday and working-day queries.
///
/// Implementors supply the weekend definition and the per-year holiday set;
/// everything else is derived. `Send + Sync` so one calendar can be shared
/// behind an `Arc` by every scheduled job.
pub trait HolidayCalendar: Send + Sync {
    fn is_weekend(&self, d: NaiveDate) -> bool;

    fn holiday_set(&self, year: i32) -> Result<Arc<HolidaySet>, CalendarError>;

    /// Whether `d` is a nominal or observed holiday. Weekends alone do not count.
    ///
    /// `holiday_set(d.year())` must include substitutes carried over from the
    /// previous year for this to see them.
    fn is_holiday(&self, d: NaiveDate) -> Result<bool, CalendarError> {
        Ok(self.holiday_set(d.year())?.contains(&d))
    }

    fn is_working_day(&self, d: NaiveDate) -> Result<bool, CalendarError> {
        if self.is_weekend(d) {
            return Ok(false);
        }
        Ok(!self.is_holiday(d)?)
    }

    /// Number of consecutive non-working days directly after `from`.
    ///
    /// 0 when the day after `from` is a working day.
    fn days_until_next_working_day(&self, from: NaiveDate) -> Result<u32, CalendarError> {
        let runaway = || CalendarError::RunawayScan { from, limit: MAX_SCAN_DAYS };

        let mut d = from;
        for off_days in 0..=MAX_SCAN_DAYS {
            d = d.succ_opt().ok_or_else(runaway)?;
            if self.is_working_day(d)? {
                return Ok(off_days);
            }
        }
        Err(runaway())
    }

    fn next_working_day(&self, from: NaiveDate) -> Result<NaiveDate, CalendarError> {
        let off_days = self.days_until_next_working_day(from)?;
        from.checked_add_days(Days::new(off_days as u64 + 1))
            .ok_or(CalendarError::RunawayScan { from, limit: MAX_SCAN_DAYS })
    }

    /// Length of the run of non-working days starting at `d` itself.
    fn non_working_run_from(&self, d: NaiveDate) -> Result<u32, CalendarError> {
        if self.is_working_day(d)? {
            Ok(0)
        } else {
            Ok(1 + self.days_until_next_working_day(d)?)
        }
    }
}

/// `days_until_next_working_day` from the local date of `now`.
pub fn days_until_next_working_day_at<C, Tz>(calendar: &C, now: &DateTime<Tz>) -> Result<u32, CalendarError>
where
    C: HolidayCalendar + ?Sized,
    Tz: TimeZone,
{
    calendar.days_until_next_working_day(local_date(now))
}

/// `days_until_next_working_day` from today as seen in `tz`.
pub fn days_until_next_working_day_in<C, Tz>(calendar: &C, tz: &Tz) -> Result<u32, CalendarError>
where
    C: HolidayCalendar + ?Sized,
    Tz: TimeZone,
{
    calendar.days_until_next_working_day(local_today(tz))
}
