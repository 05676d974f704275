use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendarerror::CalendarError;
use crate::time::calendar::holidaycalendar::HolidayCalendar;

/// How long the community is off, named after the run of non-working days.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreakKind {
    DayOff,
    Weekend,
    LongWeekend,
}

impl BreakKind {
    /// `None` for a run of zero days.
    pub fn from_off_days(off_days: u32) -> Option<BreakKind> {
        match off_days {
            0 => None,
            1 => Some(BreakKind::DayOff),
            2 => Some(BreakKind::Weekend),
            _ => Some(BreakKind::LongWeekend),
        }
    }
}

/// Per-channel scheduling state, owned and persisted by the caller.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ChannelState {
    pub on_break: Option<BreakKind>,
}

impl ChannelState {
    pub fn apply(&mut self, action: &DailyAction) {
        match *action {
            DailyAction::StartBreak(kind) => self.on_break = Some(kind),
            DailyAction::EndBreak(_) => self.on_break = None,
            DailyAction::PostPrompt | DailyAction::StayOnBreak(_) => {}
        }
    }
}

/// What the daily job should do for one channel.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum DailyAction {
    /// Post today's question.
    PostPrompt,
    /// Announce a break of the given kind and post nothing.
    StartBreak(BreakKind),
    /// Still on break; stay quiet.
    StayOnBreak(BreakKind),
    /// Announce the return from the given break, then post today's question.
    EndBreak(BreakKind),
}

pub fn plan_daily_action<C>(
    calendar: &C,
    today: NaiveDate,
    state: &ChannelState,
) -> Result<DailyAction, CalendarError>
where
    C: HolidayCalendar + ?Sized,
{
    let off_days = calendar.non_working_run_from(today)?;
    let action = match (state.on_break, BreakKind::from_off_days(off_days)) {
        (None, None) => DailyAction::PostPrompt,
        (None, Some(kind)) => DailyAction::StartBreak(kind),
        (Some(kind), Some(_)) => DailyAction::StayOnBreak(kind),
        (Some(kind), None) => DailyAction::EndBreak(kind),
    };
    debug!(%today, off_days, ?action, "planned daily action");
    Ok(action)
}
