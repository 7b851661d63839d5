//! Calendar normalization: flatten weeks into days and check each day's shape.

use chrono::NaiveDate;

use crate::error::{StatsError, StatsResult};
use crate::models::{ContributionCalendar, ContributionDay};

const DATE_FORMAT: &str = "%Y-%m-%d";

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// A calendar day with its date parsed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CalendarDay<'a> {
    pub day: &'a ContributionDay,
    pub date: NaiveDate,
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(date: &str) -> StatsResult<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|source| StatsError::InvalidDate {
        date: date.to_string(),
        source,
    })
}

/// English weekday name for a 0 (Sunday) .. 6 (Saturday) index.
pub fn weekday_name(weekday: u8) -> Option<&'static str> {
    WEEKDAY_NAMES.get(weekday as usize).copied()
}

/// All days of the calendar in input order (week by week).
pub fn flatten_days(calendar: &ContributionCalendar) -> impl Iterator<Item = &ContributionDay> {
    calendar
        .weeks
        .iter()
        .flat_map(|week| week.contribution_days.iter())
}

/// Flatten and validate every day, keeping input order.
pub(crate) fn validated_days(calendar: &ContributionCalendar) -> StatsResult<Vec<CalendarDay<'_>>> {
    flatten_days(calendar).map(validate_day).collect()
}

/// Flatten, validate and sort ascending by date.
pub(crate) fn chronological_days(
    calendar: &ContributionCalendar,
) -> StatsResult<Vec<CalendarDay<'_>>> {
    let mut days = validated_days(calendar)?;
    days.sort_by_key(|d| d.date);
    Ok(days)
}

fn validate_day(day: &ContributionDay) -> StatsResult<CalendarDay<'_>> {
    if weekday_name(day.weekday).is_none() {
        return Err(StatsError::InvalidWeekday {
            date: day.date.clone(),
            weekday: day.weekday,
        });
    }

    Ok(CalendarDay {
        day,
        date: parse_date(&day.date)?,
    })
}
