use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::Arc;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendarerror::ConfigError;
use crate::time::calendar::rulecalendar::RuleCalendar;
use crate::time::recurringholiday::easterrelatedholiday::EasterRelatedHoliday;
use crate::time::recurringholiday::fixeddateholiday::FixedDateHoliday;
use crate::time::recurringholiday::lastweekdayholiday::LastWeekdayHoliday;
use crate::time::recurringholiday::nthweekdayholiday::NthWeekdayHoliday;
use crate::time::recurringholiday::recurringholiday::RecurringHoliday;
use crate::time::recurringholiday::weekdayafterdateholiday::{AfterDateMode, WeekdayAfterDateHoliday};
use crate::time::recurringholiday::weekendadjustment::WeekendMask;
use crate::time::recurringholiday::yeartableholiday::YearTableHoliday;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedHolidayConfig {
    pub name: String,
    pub month: u32,
    pub day: u32,
}

impl FixedHolidayConfig {
    fn build(&self) -> Result<FixedDateHoliday, ConfigError> {
        FixedDateHoliday::new(self.name.as_str(), self.month, self.day)
            .ok_or_else(|| ConfigError::invalid_rule(&self.name, format!("{}/{} is not a date in every year", self.month, self.day)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "holiday_type")]
pub enum ComputedHolidayConfig {
    NthWeekday {
        name: String,
        month: u32,
        n: u8,
        weekday: Weekday,
    },
    LastWeekday {
        name: String,
        month: u32,
        weekday: Weekday,
    },
    WeekdayAfterDate {
        name: String,
        month: u32,
        day: u32,
        weekday: Weekday,
        #[serde(default)]
        mode: AfterDateMode,
    },
    EasterRelated {
        name: String,
        shift_days: i32,
    },
    YearTable {
        name: String,
        dates: BTreeMap<i32, NaiveDate>,
    },
}

impl ComputedHolidayConfig {
    pub fn name(&self) -> &str {
        match self {
            ComputedHolidayConfig::NthWeekday { name, .. }
            | ComputedHolidayConfig::LastWeekday { name, .. }
            | ComputedHolidayConfig::WeekdayAfterDate { name, .. }
            | ComputedHolidayConfig::EasterRelated { name, .. }
            | ComputedHolidayConfig::YearTable { name, .. } => name,
        }
    }

    fn build(&self) -> Result<Arc<dyn RecurringHoliday>, ConfigError> {
        let invalid = |reason: &str| ConfigError::invalid_rule(self.name(), reason);
        let holiday: Arc<dyn RecurringHoliday> = match self {
            ComputedHolidayConfig::NthWeekday { name, month, n, weekday } => Arc::new(
                NthWeekdayHoliday::new(name.as_str(), *month, *n, *weekday)
                    .ok_or_else(|| invalid("month must be 1..=12 and n must be 1..=4"))?,
            ),
            ComputedHolidayConfig::LastWeekday { name, month, weekday } => Arc::new(
                LastWeekdayHoliday::new(name.as_str(), *month, *weekday)
                    .ok_or_else(|| invalid("month must be 1..=12"))?,
            ),
            ComputedHolidayConfig::WeekdayAfterDate { name, month, day, weekday, mode } => Arc::new(
                WeekdayAfterDateHoliday::new(name.as_str(), *month, *day, *weekday, *mode)
                    .ok_or_else(|| invalid("anchor is not a date in every year"))?,
            ),
            ComputedHolidayConfig::EasterRelated { name, shift_days } => {
                Arc::new(EasterRelatedHoliday::new(name.as_str(), *shift_days))
            }
            ComputedHolidayConfig::YearTable { name, dates } => Arc::new(
                YearTableHoliday::new(name.as_str(), dates.clone())
                    .ok_or_else(|| invalid("every date must lie in the year it is listed under"))?,
            ),
        };
        Ok(holiday)
    }
}

fn default_weekends() -> HashSet<Weekday> {
    [Weekday::Sat, Weekday::Sun].into_iter().collect()
}

/// A jurisdiction's holiday rules as supplied by the embedding application.
///
/// Fixed holidays are processed before computed ones; within each list the
/// declared order is kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub name: String,
    #[serde(default = "default_weekends")]
    pub weekends: HashSet<Weekday>,
    #[serde(default)]
    pub fixed_holidays: Vec<FixedHolidayConfig>,
    #[serde(default)]
    pub computed_holidays: Vec<ComputedHolidayConfig>,
}

impl CalendarConfig {
    pub fn from_json_str(json: &str) -> Result<CalendarConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(file_path: impl AsRef<Path>) -> Result<CalendarConfig, ConfigError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn build(&self) -> Result<RuleCalendar, ConfigError> {
        let weekends = WeekendMask::new(&self.weekends)
            .ok_or_else(|| ConfigError::invalid_rule(&self.name, "every day of the week is a weekend day"))?;

        let fixed_holidays = self.fixed_holidays
            .iter()
            .map(FixedHolidayConfig::build)
            .collect::<Result<Vec<_>, _>>()?;
        let computed_holidays = self.computed_holidays
            .iter()
            .map(ComputedHolidayConfig::build)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RuleCalendar::new(self.name.as_str(), weekends, fixed_holidays, computed_holidays))
    }

    /// Checks that every year table has an entry for each year in `years`.
    pub fn validate_coverage(&self, years: RangeInclusive<i32>) -> Result<(), ConfigError> {
        for holiday in self.computed_holidays.iter() {
            if let ComputedHolidayConfig::YearTable { name, dates } = holiday {
                let missing: Vec<i32> = years.clone().filter(|y| !dates.contains_key(y)).collect();
                if !missing.is_empty() {
                    return Err(ConfigError::missing_years(name, &years, missing));
                }
            }
        }
        Ok(())
    }

    /// Builds the calendar and eagerly computes `years`, failing at startup
    /// rather than on the day a table runs out.
    pub fn build_for_years(&self, years: RangeInclusive<i32>) -> Result<RuleCalendar, ConfigError> {
        self.validate_coverage(years.clone())?;
        let calendar = self.build()?;
        calendar.precompute(years)?;
        Ok(calendar)
    }
}
