use std::collections::HashSet;

use chrono::{
    Datelike,
    NaiveDate,
    Weekday
};

use crate::calendarerror::CalendarError;

/// Upper bound on any forward day scan; no sane rule table needs more.
pub const MAX_SCAN_DAYS: u32 = 366;

/// Weekend days as a bitmask, Mon(0) ... Sun(6).
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct WeekendMask(u8);

impl WeekendMask {
    const ALL_DAYS: u8 = 0b111_1111;

    /// Returns `None` when every day of the week is a weekend day,
    /// since no holiday could ever be observed.
    pub fn new(weekends: &HashSet<Weekday>) -> Option<WeekendMask> {
        let mut mask = 0u8;
        for &weekday in weekends {
            mask |= 1u8 << weekday.num_days_from_monday();
        }
        if mask == Self::ALL_DAYS {
            None
        } else {
            Some(WeekendMask(mask))
        }
    }

    pub const fn saturday_sunday() -> WeekendMask {
        WeekendMask(0b110_0000)
    }

    #[inline]
    pub fn is_weekend(&self, weekday: Weekday) -> bool {
        let bit = 1u8 << weekday.num_days_from_monday();
        (self.0 & bit) != 0
    }

    pub fn weekends(&self) -> HashSet<Weekday> {
        let mut set = HashSet::new();
        for day in 0..7u8 {
            if (self.0 & (1u8 << day)) != 0 {
                if let Ok(weekday) = Weekday::try_from(day) {
                    set.insert(weekday);
                }
            }
        }
        set
    }
}

impl Default for WeekendMask {
    fn default() -> Self {
        WeekendMask::saturday_sunday()
    }
}

/// Moves `nominal` forward until it is neither a weekend day nor already in
/// `recorded`. Returns `nominal` unchanged when it is already free.
pub fn mondayise(
    nominal: NaiveDate,
    weekends: WeekendMask,
    recorded: &HashSet<NaiveDate>,
) -> Result<NaiveDate, CalendarError> {
    let mut candidate = nominal;
    for _ in 0..=MAX_SCAN_DAYS {
        if !weekends.is_weekend(candidate.weekday()) && !recorded.contains(&candidate) {
            return Ok(candidate);
        }
        candidate = match candidate.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    Err(CalendarError::RunawayScan { from: nominal, limit: MAX_SCAN_DAYS })
}
