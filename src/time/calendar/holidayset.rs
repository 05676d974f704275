use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

/// One rule's resolution in one year: where it nominally falls and where it
/// is observed after mondayisation. Both dates are holidays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservedHoliday {
    name: String,
    nominal: NaiveDate,
    observed: NaiveDate,
}

impl ObservedHoliday {
    pub fn new(name: impl Into<String>, nominal: NaiveDate, observed: NaiveDate) -> ObservedHoliday {
        ObservedHoliday { name: name.into(), nominal, observed }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nominal(&self) -> NaiveDate {
        self.nominal
    }

    pub fn observed(&self) -> NaiveDate {
        self.observed
    }

    pub fn is_shifted(&self) -> bool {
        self.nominal != self.observed
    }
}

/// Every holiday date produced by a calendar's rules for one year.
///
/// Besides the year's own rules this holds the substitutes carried over from
/// the previous year, such as a Saturday 31 December observed on 2 January.
/// A substitute pushed past the end of this year stays in here as well.
///
/// Immutable once built; calendars hand it out behind an `Arc`.
#[derive(Clone, Debug)]
pub struct HolidaySet {
    year: i32,
    observed_holidays: Vec<ObservedHoliday>,
    carried_over: Vec<ObservedHoliday>,
    dates: HashSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new(year: i32, observed_holidays: Vec<ObservedHoliday>) -> HolidaySet {
        let dates = observed_holidays
            .iter()
            .flat_map(|h| [h.nominal, h.observed])
            .collect();
        HolidaySet { year, observed_holidays, carried_over: Vec::new(), dates }
    }

    /// Adds the previous year's resolutions, keeping only their dates that
    /// fall in this year.
    pub fn with_carried_over(mut self, carried_over: Vec<ObservedHoliday>) -> HolidaySet {
        let year = self.year;
        self.dates.extend(
            carried_over
                .iter()
                .flat_map(|h| [h.nominal, h.observed])
                .filter(|d| d.year() == year),
        );
        self.carried_over = carried_over;
        self
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub fn contains(&self, d: &NaiveDate) -> bool {
        self.dates.contains(d)
    }

    /// Rule resolutions in the order the rules were processed.
    pub fn observed_holidays(&self) -> &[ObservedHoliday] {
        &self.observed_holidays
    }

    /// Previous-year resolutions that reach into this year.
    pub fn carried_over(&self) -> &[ObservedHoliday] {
        &self.carried_over
    }

    pub fn sorted_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.dates.iter().copied().collect();
        dates.sort();
        dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
