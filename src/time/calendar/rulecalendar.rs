use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::{
    Datelike,
    NaiveDate,
};
use tracing::{debug, trace, warn};

use crate::calendarerror::CalendarError;
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::holidayset::{HolidaySet, ObservedHoliday};
use crate::time::calendar::yearcache::YearCache;
use crate::time::recurringholiday::fixeddateholiday::FixedDateHoliday;
use crate::time::recurringholiday::recurringholiday::RecurringHoliday;
use crate::time::recurringholiday::weekendadjustment::{mondayise, WeekendMask};

/// A jurisdiction's holiday calendar built from an ordered list of rules.
///
/// Rule order is significant: when a holiday is shifted off a weekend, it
/// also skips dates claimed by rules processed before it, but not by rules
/// processed after it. Substitutes carried over from the previous year count
/// as processed first.
///
/// Every year queried stays cached for the life of the calendar. Long-running
/// callers asking about arbitrary years can bound that with `retain_years`.
pub struct RuleCalendar {
    name: String,
    weekends: WeekendMask,
    rules: Vec<Arc<dyn RecurringHoliday>>,
    // Indices of rules that can resolve into the following year.
    year_end_rules: Vec<usize>,
    cache: YearCache,
}

impl RuleCalendar {
    /// Creates a calendar processing `fixed_holidays` first, then
    /// `computed_holidays`, each in the given order.
    pub fn new(
        name: impl Into<String>,
        weekends: WeekendMask,
        fixed_holidays: Vec<FixedDateHoliday>,
        computed_holidays: Vec<Arc<dyn RecurringHoliday>>,
    ) -> RuleCalendar {
        let mut rules: Vec<Arc<dyn RecurringHoliday>> = Vec::with_capacity(fixed_holidays.len() + computed_holidays.len());
        for fixed in fixed_holidays {
            rules.push(Arc::new(fixed));
        }
        rules.extend(computed_holidays);
        RuleCalendar::from_rules(name, weekends, rules)
    }

    pub fn from_rules(
        name: impl Into<String>,
        weekends: WeekendMask,
        rules: Vec<Arc<dyn RecurringHoliday>>,
    ) -> RuleCalendar {
        let run = max_blocked_run(weekends, rules.len());
        let year_end_rules = rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.latest_day_of_year().is_none_or(|day| day.saturating_add(run) >= 365))
            .map(|(i, _)| i)
            .collect();
        RuleCalendar {
            name: name.into(),
            weekends,
            rules,
            year_end_rules,
            cache: YearCache::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weekends(&self) -> WeekendMask {
        self.weekends
    }

    pub fn rules(&self) -> &[Arc<dyn RecurringHoliday>] {
        &self.rules
    }

    /// Runs every rule for `year` without touching the cache.
    pub fn compute_holiday_set(&self, year: i32) -> Result<HolidaySet, CalendarError> {
        let carried_over = self.carried_into(year)?;
        let mut recorded: HashSet<NaiveDate> = carried_over
            .iter()
            .flat_map(|h| [h.nominal(), h.observed()])
            .filter(|d| d.year() == year)
            .collect();
        let observed_holidays = self.resolve(self.rules.iter(), year, &mut recorded)?;

        let holiday_set = HolidaySet::new(year, observed_holidays).with_carried_over(carried_over);
        debug!(calendar = %self.name, year, holidays = holiday_set.len(), "computed holiday set");
        Ok(holiday_set)
    }

    /// Previous-year resolutions with a date in `year`.
    ///
    /// A substitute can only cross into January through an unbroken run of
    /// weekend days and holidays covering 31 December. Such a run depends only
    /// on rules whose nominal date lies inside it, so rules that never fall
    /// that late are skipped. An untabulated previous year therefore fails
    /// only when one of its late-year rules is missing.
    fn carried_into(&self, year: i32) -> Result<Vec<ObservedHoliday>, CalendarError> {
        if self.year_end_rules.is_empty() {
            return Ok(Vec::new());
        }
        let Some(previous) = year.checked_sub(1) else {
            return Ok(Vec::new());
        };

        let rules = self.year_end_rules.iter().map(|&i| &self.rules[i]);
        let mut recorded = HashSet::new();
        let carried_over: Vec<ObservedHoliday> = self
            .resolve(rules, previous, &mut recorded)?
            .into_iter()
            .filter(|h| h.nominal().year() == year || h.observed().year() == year)
            .collect();
        if !carried_over.is_empty() {
            trace!(calendar = %self.name, year, holidays = carried_over.len(), "holidays carried over");
        }
        Ok(carried_over)
    }

    /// Resolves `rules` in order for `year`, shifting each off weekends and
    /// off every date already in `recorded`.
    fn resolve<'a>(
        &self,
        rules: impl Iterator<Item = &'a Arc<dyn RecurringHoliday>>,
        year: i32,
        recorded: &mut HashSet<NaiveDate>,
    ) -> Result<Vec<ObservedHoliday>, CalendarError> {
        let mut observed_holidays = Vec::with_capacity(self.rules.len());
        for rule in rules {
            let nominal = rule.nominal_date(year)?;
            // Only earlier rules count as collisions, so shift before recording.
            let observed = mondayise(nominal, self.weekends, recorded)?;
            if observed != nominal {
                trace!(holiday = rule.name(), %nominal, %observed, "holiday shifted");
            }
            recorded.insert(nominal);
            recorded.insert(observed);
            observed_holidays.push(ObservedHoliday::new(rule.name(), nominal, observed));
        }
        Ok(observed_holidays)
    }

    /// Computes and caches every year in `years`, stopping at the first failure.
    ///
    /// Meant for startup, so a movable-feast table that has run out is
    /// reported before any scheduling decision depends on it.
    pub fn precompute(&self, years: RangeInclusive<i32>) -> Result<(), CalendarError> {
        for year in years {
            self.holiday_set(year)?;
        }
        Ok(())
    }

    pub fn cached_years(&self) -> Vec<i32> {
        self.cache.cached_years()
    }

    /// Forgets cached years outside `years`; they are recomputed on demand.
    pub fn retain_years(&self, years: RangeInclusive<i32>) {
        self.cache.retain_years(years);
    }
}

/// Upper bound on a run of consecutive days that are all weekend days or
/// recorded holidays. Each rule records at most two dates in its own year and
/// two carried over from the previous one.
fn max_blocked_run(weekends: WeekendMask, rule_count: usize) -> u32 {
    let weekend_days = weekends.weekends().len() as u32;
    let recorded = 4 * rule_count as u32;
    // A run of r days holds at most weekend_days * ceil(r / 7) weekend days.
    ((recorded + weekend_days) * 7).div_ceil(7 - weekend_days)
}

impl HolidayCalendar for RuleCalendar {
    #[inline]
    fn is_weekend(&self, d: NaiveDate) -> bool {
        self.weekends.is_weekend(d.weekday())
    }

    fn holiday_set(&self, year: i32) -> Result<Arc<HolidaySet>, CalendarError> {
        self.cache
            .get_or_try_compute(year, || self.compute_holiday_set(year))
            .inspect_err(|err| {
                if err.is_unknown_year() {
                    warn!(calendar = %self.name, %err, "holiday rules do not cover requested year");
                }
            })
    }
}
