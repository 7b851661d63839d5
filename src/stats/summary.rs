//! Year-in-review summary assembly.
//!
//! The analytics are independent pure functions, so each runs as its own task
//! on the blocking pool and the results are joined.

use chrono::NaiveDate;
use std::sync::Arc;
use tokio::task::{spawn_blocking, JoinError};

use crate::config::WrappedConfig;
use crate::error::{StatsError, StatsResult};
use crate::models::{
    IssueTotals, LanguageStat, PeakStats, PullRequestTotals, Repository, SocialStats, Streaks,
    WrappedInput, WrappedSummary,
};
use crate::stats::{
    compute_issue_totals, compute_language_stats, compute_peaks, compute_pull_request_totals,
    compute_streaks, compute_total_contributions, compute_total_stars, count_active_days,
    top_repositories,
};

/// Failure while assembling a summary.
#[derive(thiserror::Error, Debug)]
pub enum SummaryError {
    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error("Stats task failed: {0}")]
    Task(#[from] JoinError),
}

/// Compute every statistic for one user's year.
pub async fn compute_summary(
    input: Arc<WrappedInput>,
    today: NaiveDate,
    config: &WrappedConfig,
) -> Result<WrappedSummary, SummaryError> {
    let language_limit = config.language_limit;
    let repo_limit = config.top_repositories;

    let streaks = {
        let input = input.clone();
        spawn_blocking(move || compute_streaks(&input.calendar, today))
    };
    let peaks = {
        let input = input.clone();
        spawn_blocking(move || compute_peaks(&input.calendar))
    };
    let languages = {
        let input = input.clone();
        spawn_blocking(move || compute_language_stats(input.languages.entries(), language_limit))
    };
    let totals = {
        let input = input.clone();
        spawn_blocking(move || Totals::compute(&input, repo_limit))
    };

    let (streaks, peaks, languages, totals) = tokio::try_join!(streaks, peaks, languages, totals)?;
    let streaks = streaks?;
    let peaks = peaks?;

    let reported = input.calendar.total_contributions;
    if reported != totals.contributions {
        tracing::warn!(
            reported,
            recomputed = totals.contributions,
            "Calendar total disagrees with day counts, using recomputed total"
        );
    }

    tracing::debug!(
        longest = streaks.longest.count,
        current = streaks.current.count,
        languages = languages.len(),
        "Summary computed"
    );

    Ok(assemble(&input, streaks, peaks, languages, totals))
}

/// Same as [`compute_summary`] but on the caller's thread.
pub fn compute_summary_blocking(
    input: &WrappedInput,
    today: NaiveDate,
    config: &WrappedConfig,
) -> StatsResult<WrappedSummary> {
    let streaks = compute_streaks(&input.calendar, today)?;
    let peaks = compute_peaks(&input.calendar)?;
    let languages = compute_language_stats(input.languages.entries(), config.language_limit);
    let totals = Totals::compute(input, config.top_repositories);

    Ok(assemble(input, streaks, peaks, languages, totals))
}

fn assemble(
    input: &WrappedInput,
    streaks: Streaks,
    peaks: PeakStats,
    languages: Vec<LanguageStat>,
    totals: Totals,
) -> WrappedSummary {
    WrappedSummary {
        profile: input.user.clone(),
        social: input.user.as_ref().map(SocialStats::from).unwrap_or_default(),
        total_contributions: totals.contributions,
        reported_total_contributions: input.calendar.total_contributions,
        active_days: totals.active_days,
        streaks,
        peaks,
        languages,
        total_stars: totals.stars,
        top_repositories: totals.top_repositories,
        pull_requests: totals.pull_requests,
        issues: totals.issues,
    }
}

struct Totals {
    contributions: u64,
    active_days: usize,
    stars: u64,
    top_repositories: Vec<Repository>,
    pull_requests: PullRequestTotals,
    issues: IssueTotals,
}

impl Totals {
    fn compute(input: &WrappedInput, repo_limit: usize) -> Self {
        Self {
            contributions: compute_total_contributions(&input.calendar),
            active_days: count_active_days(&input.calendar),
            stars: compute_total_stars(&input.repositories),
            top_repositories: top_repositories(&input.repositories, repo_limit),
            pull_requests: compute_pull_request_totals(&input.pull_requests),
            issues: compute_issue_totals(&input.issues),
        }
    }
}
