//! Language share breakdown.

use crate::models::{LanguageSizeEntry, LanguageStat};

/// Number of languages shown in the breakdown.
pub const DEFAULT_LANGUAGE_LIMIT: usize = 10;

/// Convert language sizes into a percentage breakdown, largest first, capped
/// at `limit` entries.
///
/// Percentages are computed against the total of *all* entries, so the capped
/// list may sum to less than 100. Equal sizes keep their input order (stable
/// sort). A zero total gives every entry 0%.
pub fn compute_language_stats(sizes: &[LanguageSizeEntry], limit: usize) -> Vec<LanguageStat> {
    let total: f64 = sizes.iter().map(|e| e.size).sum();

    let mut stats: Vec<LanguageStat> = sizes
        .iter()
        .map(|e| LanguageStat {
            name: e.name.clone(),
            color: e.color.clone(),
            size: e.size,
            percentage: if total > 0.0 {
                e.size / total * 100.0
            } else {
                0.0
            },
        })
        .collect();

    stats.sort_by(|a, b| b.size.total_cmp(&a.size));
    stats.truncate(limit);
    stats
}
