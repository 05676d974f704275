use crate::calendarerror::ConfigError;
use crate::time::calendar::calendarconfig::CalendarConfig;
use crate::time::calendar::rulecalendar::RuleCalendar;

const AUCKLAND_JSON: &str = include_str!("../../../json/auckland.json");

/// Auckland public holidays: the New Zealand national set plus Auckland
/// Anniversary Day.
///
/// The Matariki table covers 2022 through 2052 and must be extended before then.
pub fn auckland() -> Result<CalendarConfig, ConfigError> {
    CalendarConfig::from_json_str(AUCKLAND_JSON)
}

pub fn auckland_calendar() -> Result<RuleCalendar, ConfigError> {
    auckland()?.build()
}
