use chrono::NaiveDate;

use crate::calendarerror::CalendarError;


/// A holiday rule: yields the nominal (unshifted) date of the holiday in a year.
pub trait RecurringHoliday: Send + Sync {

    fn name(&self) -> &str;

    fn nominal_date(&self, year: i32) -> Result<NaiveDate, CalendarError>;

    /// Latest day of the year the nominal date can fall on in any year,
    /// counted as in a leap year (366 is 31 December). Larger values mean the
    /// date can fall in the following year. `None` when there is no bound.
    fn latest_day_of_year(&self) -> Option<u32> {
        None
    }
}
