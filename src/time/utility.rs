use chrono::{DateTime, NaiveDate, TimeZone, Utc, Weekday};

#[inline]
pub const fn is_leap (year: i32) -> bool {
    ((year % 4 == 0) && (year % 100!= 0)) || (year % 400 == 0)
}


pub const fn days_of_month (year: i32, month: u32) -> u32 {
    const NO_LEAP_EOM: [u32; 13] = [
        0, 31, 28, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    const LEAP_EOM: [u32; 13] = [
        0, 31, 29, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    if is_leap(year) {
        LEAP_EOM[month as usize]
    } else {
        NO_LEAP_EOM[month as usize]
    }
}

/// Days to move forward from `from` to land on `to` (0..=6).
#[inline]
pub fn weekday_distance(from: Weekday, to: Weekday) -> u32 {
    (to.num_days_from_monday() + 7 - from.num_days_from_monday()) % 7
}

/// The calendar date it currently is in `tz`.
pub fn local_today<Tz: TimeZone>(tz: &Tz) -> NaiveDate {
    local_date(&Utc::now().with_timezone(tz))
}

#[inline]
pub fn local_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.date_naive()
}

/// 1-based day of the year of `month`/`day`, counted as in a leap year.
pub const fn leap_day_of_year(month: u32, day: u32) -> u32 {
    let mut ordinal = day;
    let mut m = 1;
    while m < month {
        ordinal += days_of_month(2000, m);
        m += 1;
    }
    ordinal
}
