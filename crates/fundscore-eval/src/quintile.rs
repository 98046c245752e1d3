//! Quintile bucketing of scored samples.

use fundscore_traits::stats::{mean, round2};
use serde::{Deserialize, Serialize};

/// Number of buckets.
pub const QUINTILES: usize = 5;

/// One score quintile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuintileBucket {
    /// 1 for the highest scores, 5 for the lowest.
    pub quintile: usize,
    /// Mean score in the bucket.
    pub mean_score: f64,
    /// Mean realized return in the bucket, percent.
    pub mean_return: f64,
    /// Number of samples.
    pub count: usize,
}

/// Buckets for one horizon with the headline spread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuintileSummary {
    /// Non-empty buckets from highest to lowest score.
    pub buckets: Vec<QuintileBucket>,
    /// Top bucket mean return minus bottom bucket mean return.
    pub spread: f64,
    /// Whether mean returns never increase from one bucket to the next.
    pub is_monotonic: bool,
}

impl QuintileSummary {
    /// Bucket `(score, return)` pairs by score; pairs with a non-finite side
    /// are ignored.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        let buckets = quintile_buckets(pairs);
        let spread = match (buckets.first(), buckets.last()) {
            (Some(top), Some(bottom)) if buckets.len() > 1 => {
                round2(top.mean_return - bottom.mean_return)
            }
            _ => 0.0,
        };
        let is_monotonic = buckets.len() > 1
            && buckets
                .windows(2)
                .all(|w| w[0].mean_return >= w[1].mean_return);

        Self {
            buckets,
            spread,
            is_monotonic,
        }
    }
}

/// Sort by score descending and split into five near-equal groups.
///
/// With `n` samples the first `n % 5` groups hold one extra sample. Empty
/// groups (fewer than 5 samples) are skipped.
///
/// # Example
///
/// ```
/// use fundscore_eval::quintile_buckets;
///
/// let pairs: Vec<(f64, f64)> = (0..7).map(|i| (i as f64, i as f64)).collect();
/// let counts: Vec<usize> = quintile_buckets(&pairs).iter().map(|b| b.count).collect();
/// assert_eq!(counts, vec![2, 2, 1, 1, 1]);
/// ```
pub fn quintile_buckets(pairs: &[(f64, f64)]) -> Vec<QuintileBucket> {
    let mut sorted: Vec<(f64, f64)> = pairs
        .iter()
        .copied()
        .filter(|(s, r)| s.is_finite() && r.is_finite())
        .collect();
    sorted.sort_by(|a, b| b.0.total_cmp(&a.0));

    let n = sorted.len();
    let (base, extra) = (n / QUINTILES, n % QUINTILES);

    let mut buckets = Vec::with_capacity(QUINTILES);
    let mut start = 0;
    for q in 0..QUINTILES {
        let size = base + usize::from(q < extra);
        if size == 0 {
            continue;
        }
        let group = &sorted[start..start + size];
        start += size;

        let scores: Vec<f64> = group.iter().map(|(s, _)| *s).collect();
        let returns: Vec<f64> = group.iter().map(|(_, r)| *r).collect();
        buckets.push(QuintileBucket {
            quintile: q + 1,
            mean_score: round2(mean(&scores)),
            mean_return: round2(mean(&returns)),
            count: size,
        });
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        let pairs: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, i as f64 * 2.0)).collect();
        let buckets = quintile_buckets(&pairs);
        assert_eq!(buckets.len(), 5);
        assert!(buckets.iter().all(|b| b.count == 2));
        assert_eq!(buckets[0].quintile, 1);
        assert_eq!(buckets[0].mean_score, 8.5);
        assert_eq!(buckets[0].mean_return, 17.0);
        assert_eq!(buckets[4].mean_score, 0.5);
    }

    #[test]
    fn test_few_samples_skip_empty() {
        let pairs = [(10.0, 1.0), (20.0, 2.0), (30.0, 3.0)];
        let buckets = quintile_buckets(&pairs);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].mean_score, 30.0);
        assert_eq!(buckets[2].quintile, 3);
    }

    #[test]
    fn test_empty() {
        assert!(quintile_buckets(&[]).is_empty());
        let summary = QuintileSummary::from_pairs(&[]);
        assert_eq!(summary.spread, 0.0);
        assert!(!summary.is_monotonic);
    }

    #[test]
    fn test_summary_spread_and_monotonic() {
        let pairs: Vec<(f64, f64)> = (0..20).map(|i| (i as f64, i as f64 * 0.5)).collect();
        let summary = QuintileSummary::from_pairs(&pairs);
        assert!(summary.is_monotonic);
        // Top bucket returns 8.75 on average, bottom 0.75.
        assert_eq!(summary.spread, 8.0);

        let inverted: Vec<(f64, f64)> = (0..20).map(|i| (i as f64, -(i as f64))).collect();
        let summary = QuintileSummary::from_pairs(&inverted);
        assert!(!summary.is_monotonic);
        assert!(summary.spread < 0.0);
    }

    #[test]
    fn test_non_finite_ignored() {
        let pairs = [(f64::NAN, 1.0), (50.0, f64::NAN), (60.0, 2.0)];
        let buckets = quintile_buckets(&pairs);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 1);
    }
}
