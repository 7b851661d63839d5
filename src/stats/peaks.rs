//! Peak day, week and month detection.
//!
//! Month boundaries are re-derived from each day's date rather than taken from
//! the calendar's `months` header. All ties go to the first occurrence in input
//! order, and a calendar without any contributions yields empty placeholders.

use chrono::Datelike;
use std::collections::HashMap;

use crate::error::StatsResult;
use crate::models::{ContributionCalendar, PeakStats, TopDay, TopMonth, TopWeek};
use crate::stats::calendar::{validated_days, weekday_name, CalendarDay};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Compute the busiest day, week and month of the calendar.
///
/// `top_hour` is always `None`: the calendar carries no commit timestamps.
pub fn compute_peaks(calendar: &ContributionCalendar) -> StatsResult<PeakStats> {
    let days = validated_days(calendar)?;

    Ok(PeakStats {
        top_day: top_day(&days),
        top_week: top_week(calendar),
        top_month: top_month(&days),
        top_hour: None,
    })
}

fn top_day(days: &[CalendarDay<'_>]) -> TopDay {
    let mut best = TopDay::default();

    for d in days {
        if d.day.contribution_count > best.contributions {
            best = TopDay {
                date: d.day.date.clone(),
                contributions: d.day.contribution_count,
                day_of_week: weekday_name(d.day.weekday).unwrap_or_default().to_string(),
            };
        }
    }

    best
}

fn top_week(calendar: &ContributionCalendar) -> TopWeek {
    let mut best = TopWeek::default();

    for week in &calendar.weeks {
        let (Some(first), Some(last)) = (
            week.contribution_days.first(),
            week.contribution_days.last(),
        ) else {
            continue;
        };

        let total: u64 = week
            .contribution_days
            .iter()
            .map(|d| u64::from(d.contribution_count))
            .sum();

        if total > best.contributions {
            best = TopWeek {
                week_start: first.date.clone(),
                week_end: last.date.clone(),
                contributions: total,
            };
        }
    }

    best
}

fn top_month(days: &[CalendarDay<'_>]) -> TopMonth {
    // (year, month) totals in first-encounter order
    let mut totals: Vec<((i32, u32), u64)> = Vec::new();
    let mut index: HashMap<(i32, u32), usize> = HashMap::new();

    for d in days {
        let key = (d.date.year(), d.date.month());
        let slot = *index.entry(key).or_insert_with(|| {
            totals.push((key, 0));
            totals.len() - 1
        });
        totals[slot].1 += u64::from(d.day.contribution_count);
    }

    let mut best = TopMonth::default();
    for ((year, month), total) in totals {
        if total > best.contributions {
            best = TopMonth {
                month: MONTH_NAMES[month as usize - 1].to_string(),
                year,
                contributions: total,
            };
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use crate::models::{ContributionDay, ContributionWeek};
    use crate::stats::calendar::fixtures::{calendar_from, day};
    use pretty_assertions::assert_eq;

    fn single_week(days: Vec<ContributionDay>) -> ContributionCalendar {
        ContributionCalendar {
            weeks: vec![ContributionWeek {
                first_day: days[0].date.clone(),
                contribution_days: days,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_calendar_placeholders() {
        let peaks = compute_peaks(&ContributionCalendar::default()).unwrap();
        assert_eq!(peaks, PeakStats::default());
        assert!(peaks.top_hour.is_none());
    }

    #[test]
    fn test_all_zero_calendar_placeholders() {
        let peaks = compute_peaks(&calendar_from("2024-01-07", &[0; 14])).unwrap();

        assert_eq!(peaks.top_day, TopDay::default());
        assert_eq!(peaks.top_week, TopWeek::default());
        assert_eq!(peaks.top_month, TopMonth::default());
    }

    #[test]
    fn test_top_day_with_weekday_name() {
        let peaks = compute_peaks(&calendar_from("2024-01-07", &[1, 2, 9, 3, 0, 0, 0])).unwrap();

        assert_eq!(
            peaks.top_day,
            TopDay {
                date: "2024-01-09".to_string(),
                contributions: 9,
                day_of_week: "Tuesday".to_string(),
            }
        );
    }

    #[test]
    fn test_top_day_tie_keeps_first_in_input_order() {
        let calendar = single_week(vec![
            day("2024-01-07", 4),
            day("2024-01-08", 7),
            day("2024-01-09", 7),
        ]);

        let peaks = compute_peaks(&calendar).unwrap();
        assert_eq!(peaks.top_day.date, "2024-01-08");
        assert_eq!(peaks.top_day.day_of_week, "Monday");
    }

    #[test]
    fn test_top_week() {
        let counts = [1, 1, 1, 1, 1, 1, 1, 5, 0, 0, 0, 0, 0, 5, 2, 2, 2, 2, 2, 2, 2];
        let peaks = compute_peaks(&calendar_from("2024-01-07", &counts)).unwrap();

        assert_eq!(
            peaks.top_week,
            TopWeek {
                week_start: "2024-01-21".to_string(),
                week_end: "2024-01-27".to_string(),
                contributions: 14,
            }
        );
    }

    #[test]
    fn test_top_week_tie_keeps_first() {
        let peaks = compute_peaks(&calendar_from("2024-01-07", &[3; 14])).unwrap();
        assert_eq!(peaks.top_week.week_start, "2024-01-07");
        assert_eq!(peaks.top_week.contributions, 21);
    }

    #[test]
    fn test_top_month_february_over_january() {
        // 2023-01-01 is a Sunday; 31 days of January then 28 of February
        let mut counts = vec![0u32; 59];
        counts[0] = 20;
        counts[30] = 30;
        counts[31] = 100;
        counts[58] = 20;

        let peaks = compute_peaks(&calendar_from("2023-01-01", &counts)).unwrap();

        assert_eq!(
            peaks.top_month,
            TopMonth {
                month: "February".to_string(),
                year: 2023,
                contributions: 120,
            }
        );
    }

    #[test]
    fn test_top_month_splits_week_across_months() {
        // week of 2024-01-28 spans January and February
        let calendar = single_week(vec![
            day("2024-01-28", 1),
            day("2024-01-29", 1),
            day("2024-01-30", 1),
            day("2024-01-31", 1),
            day("2024-02-01", 2),
            day("2024-02-02", 2),
            day("2024-02-03", 2),
        ]);

        let peaks = compute_peaks(&calendar).unwrap();
        assert_eq!(peaks.top_month.month, "February");
        assert_eq!(peaks.top_month.contributions, 6);
    }

    #[test]
    fn test_top_month_distinguishes_years() {
        let calendar = single_week(vec![
            day("2023-12-31", 3),
            day("2024-01-01", 2),
            day("2024-01-02", 2),
        ]);

        let peaks = compute_peaks(&calendar).unwrap();
        assert_eq!(peaks.top_month.month, "January");
        assert_eq!(peaks.top_month.year, 2024);
        assert_eq!(peaks.top_month.contributions, 4);
    }

    #[test]
    fn test_ignores_months_header() {
        let mut calendar = calendar_from("2024-03-03", &[1, 1, 1, 1, 1, 1, 1]);
        calendar.months = vec![crate::models::CalendarMonth {
            name: "Dec".to_string(),
            first_day: "2024-12-01".to_string(),
            total_weeks_in_month: 4,
        }];

        let peaks = compute_peaks(&calendar).unwrap();
        assert_eq!(peaks.top_month.month, "March");
    }

    #[test]
    fn test_rejects_bad_weekday() {
        let mut bad = day("2024-01-07", 1);
        bad.weekday = 9;
        let err = compute_peaks(&single_week(vec![bad])).unwrap_err();
        assert!(matches!(err, StatsError::InvalidWeekday { .. }));
    }

    #[test]
    fn test_input_not_mutated_and_result_stable() {
        let calendar = calendar_from("2024-01-07", &[1, 4, 2, 0, 4, 1, 1, 3]);
        let before = calendar.clone();

        let first = compute_peaks(&calendar).unwrap();
        let second = compute_peaks(&calendar).unwrap();

        assert_eq!(first, second);
        assert_eq!(calendar, before);
    }
}
