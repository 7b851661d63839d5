//! FGP service exposing the year-in-review stats engine.
//!
//! # CHANGELOG (recent first, max 5 entries)
//! 02/03/2026 - wrapped.summary runs analytics concurrently
//! 01/28/2026 - Initial implementation

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use fgp_daemon::service::{HealthStatus, MethodInfo, ParamInfo};
use fgp_daemon::FgpService;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::config::WrappedConfig;
use crate::models::{ContributionCalendar, LanguageSizes, Repository, WrappedInput};
use crate::stats;

/// FGP service for year-in-review statistics.
pub struct WrappedService {
    config: WrappedConfig,
    runtime: Runtime,
}

impl WrappedService {
    /// Create a new WrappedService.
    pub fn new(config: WrappedConfig) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;

        Ok(Self { config, runtime })
    }

    /// Helper to get a string parameter.
    fn get_str<'a>(params: &'a HashMap<String, Value>, key: &str) -> Option<&'a str> {
        params.get(key).and_then(|v| v.as_str())
    }

    /// Helper to get a usize parameter with default.
    fn get_usize(params: &HashMap<String, Value>, key: &str, default: usize) -> usize {
        params
            .get(key)
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .unwrap_or(default)
    }

    /// Helper to deserialize a required structured parameter.
    fn get_required<T: DeserializeOwned>(params: &HashMap<String, Value>, key: &str) -> Result<T> {
        let value = params
            .get(key)
            .ok_or_else(|| anyhow::anyhow!("Missing required parameter: {}", key))?;

        serde_json::from_value(value.clone())
            .with_context(|| format!("Invalid parameter: {}", key))
    }

    /// Evaluation date from the `today` parameter, else the local date.
    fn get_today(params: &HashMap<String, Value>) -> Result<NaiveDate> {
        match Self::get_str(params, "today") {
            Some(today) => Ok(stats::parse_date(today)?),
            None => Ok(Local::now().date_naive()),
        }
    }

    // ========================================================================
    // Method implementations
    // ========================================================================

    fn health(&self) -> Result<Value> {
        Ok(serde_json::json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "language_limit": self.config.language_limit,
            "top_repositories": self.config.top_repositories,
        }))
    }

    fn streaks(&self, params: HashMap<String, Value>) -> Result<Value> {
        let calendar: ContributionCalendar = Self::get_required(&params, "calendar")?;
        let today = Self::get_today(&params)?;

        let streaks = stats::compute_streaks(&calendar, today)?;
        tracing::debug!(
            longest = streaks.longest.count,
            current = streaks.current.count,
            %today,
            "Computed streaks"
        );

        Ok(serde_json::json!({
            "longest": streaks.longest,
            "current": streaks.current,
            "today": today.to_string(),
        }))
    }

    fn peaks(&self, params: HashMap<String, Value>) -> Result<Value> {
        let calendar: ContributionCalendar = Self::get_required(&params, "calendar")?;
        let peaks = stats::compute_peaks(&calendar)?;

        Ok(serde_json::json!(peaks))
    }

    fn languages(&self, params: HashMap<String, Value>) -> Result<Value> {
        let sizes: LanguageSizes = Self::get_required(&params, "languages")?;
        let limit = Self::get_usize(&params, "limit", self.config.language_limit);

        let languages = stats::compute_language_stats(sizes.entries(), limit);

        Ok(serde_json::json!({
            "languages": languages,
            "count": languages.len(),
        }))
    }

    fn stars(&self, params: HashMap<String, Value>) -> Result<Value> {
        let repositories: Vec<Repository> = Self::get_required(&params, "repositories")?;

        Ok(serde_json::json!({
            "total_stars": stats::compute_total_stars(&repositories),
            "count": repositories.len(),
        }))
    }

    fn summary(&self, params: HashMap<String, Value>) -> Result<Value> {
        let today = Self::get_today(&params)?;
        if !params.contains_key("calendar") {
            anyhow::bail!("Missing required parameter: calendar");
        }

        let input: WrappedInput = serde_json::from_value(Value::Object(params.into_iter().collect()))
            .context("Invalid summary input")?;
        let input = Arc::new(input);
        let config = self.config.clone();

        let summary = self
            .runtime
            .block_on(async move { stats::compute_summary(input, today, &config).await })?;

        Ok(serde_json::json!(summary))
    }
}

impl FgpService for WrappedService {
    fn name(&self) -> &str {
        "wrapped"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn dispatch(&self, method: &str, params: HashMap<String, Value>) -> Result<Value> {
        match method {
            "health" => self.health(),
            "streaks" | "wrapped.streaks" => self.streaks(params),
            "peaks" | "wrapped.peaks" => self.peaks(params),
            "languages" | "wrapped.languages" => self.languages(params),
            "stars" | "wrapped.stars" => self.stars(params),
            "summary" | "wrapped.summary" => self.summary(params),
            _ => anyhow::bail!("Unknown method: {}", method),
        }
    }

    fn method_list(&self) -> Vec<MethodInfo> {
        let calendar = || ParamInfo {
            name: "calendar".into(),
            param_type: "object".into(),
            required: true,
            default: None,
        };
        let today = || ParamInfo {
            name: "today".into(),
            param_type: "string".into(),
            required: false,
            default: None,
        };

        vec![
            MethodInfo {
                name: "wrapped.streaks".into(),
                description: "Longest and current contribution streaks".into(),
                params: vec![calendar(), today()],
            },
            MethodInfo {
                name: "wrapped.peaks".into(),
                description: "Busiest day, week and month".into(),
                params: vec![calendar()],
            },
            MethodInfo {
                name: "wrapped.languages".into(),
                description: "Language percentage breakdown".into(),
                params: vec![
                    ParamInfo {
                        name: "languages".into(),
                        param_type: "object".into(),
                        required: true,
                        default: None,
                    },
                    ParamInfo {
                        name: "limit".into(),
                        param_type: "integer".into(),
                        required: false,
                        default: Some(serde_json::json!(self.config.language_limit)),
                    },
                ],
            },
            MethodInfo {
                name: "wrapped.stars".into(),
                description: "Total stars across repositories".into(),
                params: vec![ParamInfo {
                    name: "repositories".into(),
                    param_type: "array".into(),
                    required: true,
                    default: None,
                }],
            },
            MethodInfo {
                name: "wrapped.summary".into(),
                description: "Full year-in-review summary".into(),
                params: vec![
                    calendar(),
                    ParamInfo {
                        name: "user".into(),
                        param_type: "object".into(),
                        required: false,
                        default: None,
                    },
                    ParamInfo {
                        name: "languages".into(),
                        param_type: "object".into(),
                        required: false,
                        default: Some(serde_json::json!({})),
                    },
                    ParamInfo {
                        name: "repositories".into(),
                        param_type: "array".into(),
                        required: false,
                        default: Some(serde_json::json!([])),
                    },
                    ParamInfo {
                        name: "pullRequests".into(),
                        param_type: "array".into(),
                        required: false,
                        default: Some(serde_json::json!([])),
                    },
                    ParamInfo {
                        name: "issues".into(),
                        param_type: "array".into(),
                        required: false,
                        default: Some(serde_json::json!([])),
                    },
                    today(),
                ],
            },
        ]
    }

    fn on_start(&self) -> Result<()> {
        tracing::info!(
            language_limit = self.config.language_limit,
            top_repositories = self.config.top_repositories,
            "WrappedService starting"
        );
        Ok(())
    }

    fn health_check(&self) -> HashMap<String, HealthStatus> {
        let mut checks = HashMap::new();

        let start = std::time::Instant::now();
        let result = stats::compute_streaks(&ContributionCalendar::default(), Local::now().date_naive());
        let latency = start.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(_) => {
                checks.insert("stats_engine".into(), HealthStatus::healthy_with_latency(latency));
            }
            Err(e) => {
                checks.insert("stats_engine".into(), HealthStatus::unhealthy(e.to_string()));
            }
        }

        checks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> WrappedService {
        WrappedService::new(WrappedConfig::default()).unwrap()
    }

    fn params(value: Value) -> HashMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    fn calendar_json() -> Value {
        json!({
            "totalContributions": 6,
            "weeks": [{
                "firstDay": "2024-01-07",
                "contributionDays": [
                    {"date": "2024-01-07", "contributionCount": 1, "weekday": 0},
                    {"date": "2024-01-08", "contributionCount": 2, "weekday": 1},
                    {"date": "2024-01-09", "contributionCount": 3, "weekday": 2},
                    {"date": "2024-01-10", "contributionCount": 0, "weekday": 3}
                ]
            }]
        })
    }

    #[test]
    fn test_streaks_method() {
        let result = service()
            .dispatch(
                "wrapped.streaks",
                params(json!({"calendar": calendar_json(), "today": "2024-01-10"})),
            )
            .unwrap();

        assert_eq!(result["longest"]["count"], 3);
        assert_eq!(result["current"]["count"], 3);
        assert_eq!(result["current"]["startDate"], "2024-01-07");
        assert_eq!(result["today"], "2024-01-10");
    }

    #[test]
    fn test_peaks_method() {
        let result = service()
            .dispatch("peaks", params(json!({"calendar": calendar_json()})))
            .unwrap();

        assert_eq!(result["topDay"]["date"], "2024-01-09");
        assert_eq!(result["topDay"]["dayOfWeek"], "Tuesday");
        assert_eq!(result["topMonth"]["month"], "January");
        assert!(result["topHour"].is_null());
    }

    #[test]
    fn test_languages_method_with_limit() {
        let result = service()
            .dispatch(
                "wrapped.languages",
                params(json!({
                    "languages": {
                        "A": {"size": 300, "color": "#111"},
                        "B": {"size": 100, "color": "#222"},
                        "C": {"size": 100, "color": "#333"}
                    },
                    "limit": 2
                })),
            )
            .unwrap();

        assert_eq!(result["count"], 2);
        assert_eq!(result["languages"][0]["name"], "A");
        assert_eq!(result["languages"][0]["percentage"], 60.0);
    }

    #[test]
    fn test_stars_method() {
        let result = service()
            .dispatch(
                "wrapped.stars",
                params(json!({"repositories": [{"stars": 5}, {"stars": 0}, {"stars": 12}]})),
            )
            .unwrap();

        assert_eq!(result["total_stars"], 17);
        assert_eq!(result["count"], 3);
    }

    #[test]
    fn test_summary_method() {
        let result = service()
            .dispatch(
                "wrapped.summary",
                params(json!({
                    "calendar": calendar_json(),
                    "repositories": [{"name": "a", "stars": 4}],
                    "pullRequests": [{"state": "OPEN"}],
                    "today": "2024-01-10"
                })),
            )
            .unwrap();

        assert_eq!(result["totalContributions"], 6);
        assert_eq!(result["activeDays"], 3);
        assert_eq!(result["totalStars"], 4);
        assert_eq!(result["pullRequests"]["open"], 1);
        assert!(result["profile"].is_null());
    }

    #[test]
    fn test_missing_calendar_is_error() {
        let svc = service();
        for method in ["wrapped.streaks", "wrapped.peaks", "wrapped.summary"] {
            let err = svc.dispatch(method, HashMap::new()).unwrap_err();
            assert!(err.to_string().contains("calendar"), "{}: {}", method, err);
        }
    }

    #[test]
    fn test_invalid_weekday_is_error() {
        let calendar = json!({
            "weeks": [{"contributionDays": [{"date": "2024-01-07", "contributionCount": 1, "weekday": 8}]}]
        });

        let err = service()
            .dispatch("wrapped.peaks", params(json!({"calendar": calendar})))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid weekday"));
    }

    #[test]
    fn test_invalid_today_is_error() {
        let err = service()
            .dispatch(
                "wrapped.streaks",
                params(json!({"calendar": calendar_json(), "today": "yesterday"})),
            )
            .unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_unknown_method() {
        let err = service().dispatch("wrapped.nope", HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("Unknown method"));
    }

    #[test]
    fn test_method_list() {
        let methods = service().method_list();
        let names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "wrapped.streaks",
                "wrapped.peaks",
                "wrapped.languages",
                "wrapped.stars",
                "wrapped.summary"
            ]
        );
    }
}
