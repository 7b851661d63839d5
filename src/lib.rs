//! GitHub year-in-review statistics.
//!
//! Derives streaks, peak periods, language shares and totals from a user's
//! contribution calendar and repository lists. The data itself comes from an
//! upstream provider; nothing here talks to GitHub.
//!
//! ```
//! use chrono::NaiveDate;
//! use fgp_wrapped::models::ContributionCalendar;
//! use fgp_wrapped::stats::compute_streaks;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
//! let streaks = compute_streaks(&ContributionCalendar::default(), today).unwrap();
//! assert_eq!(streaks.longest.count, 0);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod stats;

pub use config::WrappedConfig;
pub use error::{StatsError, StatsResult};
pub use service::WrappedService;
