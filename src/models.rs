//! Data models for year-in-review inputs and derived statistics.
//!
//! Input shapes mirror what the upstream GitHub provider hands over (camelCase
//! JSON). Output shapes are consumed verbatim by the presentation layer.
//!
//! # CHANGELOG (recent first, max 5 entries)
//! 02/03/2026 - Added WrappedInput/WrappedSummary for the summary method
//! 01/28/2026 - Initial implementation

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Calendar input
// ============================================================================

/// A single day in the contribution calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    pub contribution_count: u32,
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday: u8,
    #[serde(default)]
    pub color: String,
}

/// Seven consecutive days starting on a Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    #[serde(default)]
    pub contribution_days: Vec<ContributionDay>,
    #[serde(default)]
    pub first_day: String,
}

/// Month header as reported by the provider. Not used for peak detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub name: String,
    pub first_day: String,
    #[serde(alias = "totalWeeks")]
    pub total_weeks_in_month: u32,
}

/// Contribution calendar for the queried year.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    /// Pre-aggregated total from the provider. Derived stats recompute instead.
    #[serde(default)]
    pub total_contributions: u64,
    #[serde(default)]
    pub weeks: Vec<ContributionWeek>,
    #[serde(default)]
    pub months: Vec<CalendarMonth>,
}

// ============================================================================
// Language sizes
// ============================================================================

/// Size and display color of one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageSize {
    pub size: f64,
    #[serde(default)]
    pub color: String,
}

/// One named entry of the language-size mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSizeEntry {
    pub name: String,
    pub size: f64,
    pub color: String,
}

impl LanguageSizeEntry {
    pub fn new(name: impl Into<String>, size: f64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            color: color.into(),
        }
    }
}

/// Language name -> size mapping that keeps first-encounter order.
///
/// Serialized as a JSON object. Deserialization preserves the document order
/// of keys; a repeated key replaces the earlier value in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LanguageSizes(Vec<LanguageSizeEntry>);

impl LanguageSizes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a language, keeping its original position on replace.
    pub fn insert(&mut self, entry: LanguageSizeEntry) {
        match self.0.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.0.push(entry),
        }
    }

    pub fn entries(&self) -> &[LanguageSizeEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<LanguageSizeEntry> for LanguageSizes {
    fn from_iter<I: IntoIterator<Item = LanguageSizeEntry>>(iter: I) -> Self {
        let mut sizes = LanguageSizes::new();
        for entry in iter {
            sizes.insert(entry);
        }
        sizes
    }
}

impl Serialize for LanguageSizes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct SizeRef<'a> {
            size: f64,
            color: &'a str,
        }

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(
                &entry.name,
                &SizeRef {
                    size: entry.size,
                    color: &entry.color,
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LanguageSizes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LanguageSizesVisitor;

        impl<'de> Visitor<'de> for LanguageSizesVisitor {
            type Value = LanguageSizes;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of language name to {size, color}")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut sizes = LanguageSizes(Vec::with_capacity(map.size_hint().unwrap_or(0)));
                while let Some((name, value)) = map.next_entry::<String, LanguageSize>()? {
                    sizes.insert(LanguageSizeEntry {
                        name,
                        size: value.size,
                        color: value.color,
                    });
                }
                Ok(sizes)
            }
        }

        deserializer.deserialize_map(LanguageSizesVisitor)
    }
}

// ============================================================================
// Passthrough display records
// ============================================================================

/// GitHub user profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub created_at: String,
}

/// GitHub repository. Only `stars` feeds the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub language: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub is_fork: bool,
    pub created_at: String,
}

/// GitHub pull request authored in the period.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PullRequest {
    pub number: u32,
    pub title: String,
    /// `OPEN`, `CLOSED` or `MERGED`.
    pub state: String,
    pub url: String,
    pub repository: String,
    pub created_at: String,
    pub merged_at: Option<String>,
}

/// GitHub issue opened in the period.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Issue {
    pub number: u32,
    pub title: String,
    /// `OPEN` or `CLOSED`.
    pub state: String,
    pub url: String,
    pub repository: String,
    pub created_at: String,
    pub closed_at: Option<String>,
}

// ============================================================================
// Derived statistics
// ============================================================================

/// A run of consecutive contribution days. Dates are absent iff `count == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakInfo {
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Streaks {
    pub longest: StreakInfo,
    pub current: StreakInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDay {
    pub date: String,
    pub contributions: u32,
    pub day_of_week: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopWeek {
    pub week_start: String,
    pub week_end: String,
    pub contributions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopMonth {
    pub month: String,
    pub year: i32,
    pub contributions: u64,
}

/// Busiest hour of day. No input currently carries commit timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopHour {
    pub hour: u8,
    pub commits: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakStats {
    pub top_day: TopDay,
    pub top_week: TopWeek,
    pub top_month: TopMonth,
    pub top_hour: Option<TopHour>,
}

/// One row of the language breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub name: String,
    pub color: String,
    pub size: f64,
    /// 0.0 ..= 100.0
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PullRequestTotals {
    pub total: usize,
    pub open: usize,
    pub merged: usize,
    pub closed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssueTotals {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialStats {
    pub followers: u32,
    pub following: u32,
    pub public_repos: u32,
}

impl From<&User> for SocialStats {
    fn from(user: &User) -> Self {
        Self {
            followers: user.followers,
            following: user.following,
            public_repos: user.public_repos,
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Everything the upstream provider supplies for one user and year.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WrappedInput {
    pub user: Option<User>,
    pub calendar: ContributionCalendar,
    pub languages: LanguageSizes,
    pub repositories: Vec<Repository>,
    pub pull_requests: Vec<PullRequest>,
    pub issues: Vec<Issue>,
}

/// Year-in-review summary handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedSummary {
    pub profile: Option<User>,
    pub social: SocialStats,
    /// Recomputed from calendar days.
    pub total_contributions: u64,
    /// As reported by the provider; may disagree with the recomputed total.
    pub reported_total_contributions: u64,
    pub active_days: usize,
    pub streaks: Streaks,
    pub peaks: PeakStats,
    pub languages: Vec<LanguageStat>,
    pub total_stars: u64,
    pub top_repositories: Vec<Repository>,
    pub pull_requests: PullRequestTotals,
    pub issues: IssueTotals,
}
