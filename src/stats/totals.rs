//! Totals over repositories, pull requests, issues and calendar days.

use crate::models::{
    ContributionCalendar, Issue, IssueTotals, PullRequest, PullRequestTotals, Repository,
};
use crate::stats::calendar::flatten_days;

/// Sum of stars across repositories.
pub fn compute_total_stars(repositories: &[Repository]) -> u64 {
    repositories.iter().map(|r| u64::from(r.stars)).sum()
}

/// Contributions summed over calendar days, ignoring the provider's total.
pub fn compute_total_contributions(calendar: &ContributionCalendar) -> u64 {
    flatten_days(calendar)
        .map(|d| u64::from(d.contribution_count))
        .sum()
}

/// Number of days with at least one contribution.
pub fn count_active_days(calendar: &ContributionCalendar) -> usize {
    flatten_days(calendar)
        .filter(|d| d.contribution_count > 0)
        .count()
}

/// Most-starred repositories, ties in input order.
pub fn top_repositories(repositories: &[Repository], limit: usize) -> Vec<Repository> {
    let mut sorted: Vec<&Repository> = repositories.iter().collect();
    sorted.sort_by(|a, b| b.stars.cmp(&a.stars));
    sorted.into_iter().take(limit).cloned().collect()
}

pub fn compute_pull_request_totals(pull_requests: &[PullRequest]) -> PullRequestTotals {
    let mut totals = PullRequestTotals {
        total: pull_requests.len(),
        ..Default::default()
    };

    for pr in pull_requests {
        if pr.state.eq_ignore_ascii_case("MERGED") || pr.merged_at.is_some() {
            totals.merged += 1;
        } else if pr.state.eq_ignore_ascii_case("OPEN") {
            totals.open += 1;
        } else if pr.state.eq_ignore_ascii_case("CLOSED") {
            totals.closed += 1;
        }
    }

    totals
}

pub fn compute_issue_totals(issues: &[Issue]) -> IssueTotals {
    let mut totals = IssueTotals {
        total: issues.len(),
        ..Default::default()
    };

    for issue in issues {
        if issue.state.eq_ignore_ascii_case("OPEN") {
            totals.open += 1;
        } else if issue.state.eq_ignore_ascii_case("CLOSED") {
            totals.closed += 1;
        }
    }

    totals
}
