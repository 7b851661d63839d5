//! Statistics engine: pure functions from a contribution calendar and
//! repository lists to year-in-review analytics.

pub mod calendar;
mod languages;
mod peaks;
mod streaks;
mod summary;
mod totals;

pub use calendar::{flatten_days, parse_date, weekday_name};
pub use languages::{compute_language_stats, DEFAULT_LANGUAGE_LIMIT};
pub use peaks::compute_peaks;
pub use streaks::compute_streaks;
pub use summary::{compute_summary, compute_summary_blocking, SummaryError};
pub use totals::{
    compute_issue_totals, compute_pull_request_totals, compute_total_contributions,
    compute_total_stars, count_active_days, top_repositories,
};
