//! Integration tests for rule-based holiday calendars, centred on the shipped
//! Auckland calendar.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Datelike, FixedOffset, NaiveDate, TimeZone, Utc, Weekday};

use deeholiday::calendarerror::CalendarError;
use deeholiday::time::calendar::holidaycalendar::{
    days_until_next_working_day_at, days_until_next_working_day_in, HolidayCalendar,
};
use deeholiday::time::calendar::presets::{auckland, auckland_calendar};
use deeholiday::time::calendar::rulecalendar::RuleCalendar;
use deeholiday::time::recurringholiday::easterrelatedholiday::EasterRelatedHoliday;
use deeholiday::time::recurringholiday::fixeddateholiday::FixedDateHoliday;
use deeholiday::time::recurringholiday::recurringholiday::RecurringHoliday;
use deeholiday::time::recurringholiday::weekendadjustment::WeekendMask;
use deeholiday::time::recurringholiday::yeartableholiday::YearTableHoliday;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ─── Auckland 2022 ────────────────────────────────────────────────────────────

#[test]
fn auckland_2022_holidays() {
    let calendar = auckland_calendar().unwrap();
    let holidays = [
        date(2022, 1, 1),   // New Year's Day
        date(2022, 1, 3),   // Mondayised
        date(2022, 1, 4),   // Tuesdayised
        date(2022, 1, 31),  // Auckland Anniversary
        date(2022, 2, 6),   // Waitangi Day (Sunday)
        date(2022, 2, 7),   // and its substitute
        date(2022, 4, 15),  // Good Friday
        date(2022, 4, 18),  // Easter Monday
        date(2022, 4, 25),  // Anzac Day
        date(2022, 6, 6),   // Queen's Birthday
        date(2022, 6, 24),  // Matariki
        date(2022, 10, 24), // Labour Day
        date(2022, 12, 25),
        date(2022, 12, 26),
        date(2022, 12, 27),
    ];
    for d in holidays {
        assert!(calendar.is_holiday(d).unwrap(), "{} should be a holiday", d);
    }
}

#[test]
fn auckland_2022_ordinary_days() {
    let calendar = auckland_calendar().unwrap();
    let ordinary = [
        date(2022, 1, 5),
        date(2022, 1, 6),
        date(2022, 1, 7),
        date(2022, 4, 1),
        date(2022, 4, 6),
        date(2022, 6, 5),
        date(2022, 6, 25),
        date(2022, 10, 23),
    ];
    for d in ordinary {
        assert!(!calendar.is_holiday(d).unwrap(), "{} should not be a holiday", d);
    }
}

#[test]
fn weekend_pair_shifts_in_declaration_order() {
    let calendar = auckland_calendar().unwrap();
    let set = calendar.holiday_set(2027).unwrap();
    let christmas = set.observed_holidays().iter().find(|h| h.name() == "Christmas Day").unwrap();
    let boxing_day = set.observed_holidays().iter().find(|h| h.name() == "Boxing Day").unwrap();
    assert_eq!(christmas.observed(), date(2027, 12, 27));
    assert_eq!(boxing_day.observed(), date(2027, 12, 28));
    assert!(set.contains(&date(2027, 12, 25)));
    assert!(set.contains(&date(2027, 12, 26)));
}

#[test]
fn fixed_nominal_dates_are_always_holidays() {
    let calendar = auckland_calendar().unwrap();
    let config = auckland().unwrap();
    for year in 2022..=2052 {
        for fixed in config.fixed_holidays.iter() {
            let d = date(year, fixed.month, fixed.day);
            assert!(calendar.is_holiday(d).unwrap(), "{} ({}) in {}", fixed.name, d, year);
        }
    }
}

#[test]
fn shifted_holidays_land_later_on_a_free_weekday() {
    let calendar = auckland_calendar().unwrap();
    for year in 2022..=2052 {
        let set = calendar.holiday_set(year).unwrap();
        for h in set.observed_holidays() {
            let weekday = h.nominal().weekday();
            if weekday == Weekday::Sat || weekday == Weekday::Sun {
                assert!(h.observed() > h.nominal(), "{} {}", h.name(), year);
            }
            assert!(!calendar.is_weekend(h.observed()), "{} {}", h.name(), year);
        }
    }
}

// ─── Unknown years ────────────────────────────────────────────────────────────

#[test]
fn untabulated_year_is_unknown_not_false() {
    let calendar = auckland_calendar().unwrap();
    for d in [date(2021, 12, 25), date(2053, 3, 3)] {
        let err = calendar.is_holiday(d).unwrap_err();
        assert_eq!(err, CalendarError::unknown_year("Matariki", d.year()));
    }
    // A failed year is retried, not remembered as empty.
    assert!(calendar.is_holiday(date(2021, 12, 25)).is_err());
    assert!(calendar.cached_years().is_empty());
}

#[test]
fn working_day_scan_propagates_unknown_year() {
    let calendar = auckland_calendar().unwrap();
    // 31 December 2052 is a Tuesday; the scan must look into 2053.
    let err = calendar.days_until_next_working_day(date(2052, 12, 31)).unwrap_err();
    assert!(err.is_unknown_year());
}

// ─── Year boundaries ──────────────────────────────────────────────────────────

#[test]
fn new_years_eve_substitute_lands_in_the_next_year() {
    let calendar = RuleCalendar::new(
        "nye",
        WeekendMask::default(),
        vec![FixedDateHoliday::new("New Year's Eve", 12, 31).unwrap()],
        Vec::new(),
    );
    // 31 December 2022 is a Saturday
    assert!(calendar.is_holiday(date(2023, 1, 2)).unwrap());
    assert!(!calendar.is_holiday(date(2023, 1, 3)).unwrap());
    assert_eq!(calendar.days_until_next_working_day(date(2022, 12, 30)).unwrap(), 3);
    assert_eq!(calendar.next_working_day(date(2022, 12, 30)).unwrap(), date(2023, 1, 3));
}

#[test]
fn auckland_january_does_not_need_last_years_matariki() {
    let calendar = auckland_calendar().unwrap();
    let set = calendar.holiday_set(2022).unwrap();
    assert!(set.carried_over().is_empty());
    assert!(calendar.is_holiday(date(2022, 1, 3)).unwrap());
}

// ─── Days until next working day ──────────────────────────────────────────────

#[test]
fn ordinary_friday_has_two_days_off() {
    let calendar = auckland_calendar().unwrap();
    assert_eq!(calendar.days_until_next_working_day(date(2022, 7, 15)).unwrap(), 2);
    assert_eq!(calendar.next_working_day(date(2022, 7, 15)).unwrap(), date(2022, 7, 18));
}

#[test]
fn midweek_day_has_none_off() {
    let calendar = auckland_calendar().unwrap();
    assert_eq!(calendar.days_until_next_working_day(date(2022, 7, 13)).unwrap(), 0);
}

#[test]
fn long_weekends() {
    let calendar = auckland_calendar().unwrap();
    // Labour Day
    assert_eq!(calendar.days_until_next_working_day(date(2022, 10, 21)).unwrap(), 3);
    // Matariki on a Friday
    assert_eq!(calendar.days_until_next_working_day(date(2022, 6, 23)).unwrap(), 3);
    // Easter
    assert_eq!(calendar.days_until_next_working_day(date(2022, 4, 14)).unwrap(), 4);
    // Christmas 2022
    assert_eq!(calendar.days_until_next_working_day(date(2022, 12, 23)).unwrap(), 4);
    // New Year 2023 spans the year boundary
    assert_eq!(calendar.days_until_next_working_day(date(2022, 12, 30)).unwrap(), 4);
}

#[test]
fn non_working_run_counts_the_start_day() {
    let calendar = auckland_calendar().unwrap();
    assert_eq!(calendar.non_working_run_from(date(2022, 4, 14)).unwrap(), 0);
    assert_eq!(calendar.non_working_run_from(date(2022, 4, 15)).unwrap(), 4);
    assert_eq!(calendar.non_working_run_from(date(2022, 4, 16)).unwrap(), 3);
}

#[test]
fn local_date_depends_on_timezone() {
    let calendar = auckland_calendar().unwrap();
    // Friday 11:00 UTC is already Saturday in UTC+13.
    let instant = Utc.with_ymd_and_hms(2022, 7, 15, 11, 0, 0).unwrap();
    let nzdt = FixedOffset::east_opt(13 * 3600).unwrap();
    assert_eq!(days_until_next_working_day_at(&calendar, &instant).unwrap(), 2);
    assert_eq!(days_until_next_working_day_at(&calendar, &instant.with_timezone(&nzdt)).unwrap(), 1);
    assert!(days_until_next_working_day_in(&calendar, &nzdt).is_ok());
}

#[test]
fn trait_object_calendar() {
    let calendar: Arc<dyn HolidayCalendar> = Arc::new(auckland_calendar().unwrap());
    assert!(calendar.is_holiday(date(2022, 4, 15)).unwrap());
    assert_eq!(days_until_next_working_day_at(calendar.as_ref(), &Utc.with_ymd_and_hms(2022, 7, 13, 0, 0, 0).unwrap()).unwrap(), 0);
}

// ─── Caching ──────────────────────────────────────────────────────────────────

struct CountingRule {
    inner: Arc<dyn RecurringHoliday>,
    calls: Arc<AtomicUsize>,
}

impl RecurringHoliday for CountingRule {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn nominal_date(&self, year: i32) -> Result<NaiveDate, CalendarError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.nominal_date(year)
    }
}

#[test]
fn holiday_set_is_computed_once_per_year() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = |inner: Arc<dyn RecurringHoliday>| -> Arc<dyn RecurringHoliday> {
        Arc::new(CountingRule { inner, calls: Arc::clone(&calls) })
    };
    let calendar = RuleCalendar::from_rules(
        "counted",
        WeekendMask::default(),
        vec![
            counted(Arc::new(FixedDateHoliday::new("New Year's Day", 1, 1).unwrap())),
            counted(Arc::new(EasterRelatedHoliday::new("Good Friday", -2))),
            counted(Arc::new(YearTableHoliday::from_dates("Matariki", [date(2022, 6, 24)]))),
        ],
    );

    let first = calendar.is_holiday(date(2022, 4, 15)).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    let second = calendar.is_holiday(date(2022, 4, 15)).unwrap();
    assert_eq!(first, second);
    assert!(calendar.is_holiday(date(2022, 6, 24)).unwrap());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn shared_calendar_across_threads() {
    let calendar = Arc::new(auckland_calendar().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let calendar = Arc::clone(&calendar);
            std::thread::spawn(move || calendar.days_until_next_working_day(date(2022, 4, 14)).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 4);
    }
    assert_eq!(calendar.cached_years(), vec![2022]);
}
