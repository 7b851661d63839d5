//! Longest and current contribution streaks.

use chrono::NaiveDate;

use crate::error::StatsResult;
use crate::models::{ContributionCalendar, StreakInfo, Streaks};
use crate::stats::calendar::{chronological_days, CalendarDay};

/// Compute the longest and current streaks.
///
/// `today` is the evaluation date. Days after it are calendar padding and are
/// ignored by the current streak. A zero count on `today` itself does not end
/// the current streak, since the day is not over yet.
pub fn compute_streaks(calendar: &ContributionCalendar, today: NaiveDate) -> StatsResult<Streaks> {
    let days = chronological_days(calendar)?;

    Ok(Streaks {
        longest: longest_streak(&days),
        current: current_streak(&days, today),
    })
}

fn longest_streak(days: &[CalendarDay<'_>]) -> StreakInfo {
    let mut longest = StreakInfo::default();
    let mut temp_count = 0u32;
    let mut temp_start: Option<&str> = None;

    for d in days {
        if d.day.contribution_count > 0 {
            temp_count += 1;
            let start = *temp_start.get_or_insert(d.day.date.as_str());

            // strictly greater: the earliest of equal-length runs wins
            if temp_count > longest.count {
                longest = StreakInfo {
                    count: temp_count,
                    start_date: Some(start.to_string()),
                    end_date: Some(d.day.date.clone()),
                };
            }
        } else {
            temp_count = 0;
            temp_start = None;
        }
    }

    longest
}

fn current_streak(days: &[CalendarDay<'_>], today: NaiveDate) -> StreakInfo {
    let mut count = 0u32;
    let mut start: Option<&str> = None;
    let mut end: Option<&str> = None;

    for d in days.iter().rev().filter(|d| d.date <= today) {
        if d.day.contribution_count > 0 {
            count += 1;
            start = Some(d.day.date.as_str());
            end.get_or_insert(d.day.date.as_str());
        } else if d.date == today {
            continue;
        } else {
            break;
        }
    }

    StreakInfo {
        count,
        start_date: start.map(str::to_string),
        end_date: end.map(str::to_string),
    }
}
