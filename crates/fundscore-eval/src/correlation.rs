//! Pearson and Spearman correlation between scores and realized returns.
//!
//! Only pairs where both values are finite take part. An undefined
//! correlation (fewer than 2 pairs or a constant side) is reported as 0
//! together with the number of pairs, so callers can tell it apart.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Correlation of scores with one horizon's realized returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    /// Pearson linear correlation.
    pub pearson: f64,
    /// Spearman rank correlation.
    pub spearman: f64,
    /// Number of finite pairs used.
    pub sample_size: usize,
}

impl Correlation {
    /// Correlate `scores` with `returns` pairwise.
    ///
    /// # Example
    ///
    /// ```
    /// use fundscore_eval::Correlation;
    ///
    /// let scores = [60.0, 70.0, 80.0, f64::NAN];
    /// let returns = [1.0, 4.0, 9.0, 2.0];
    /// let c = Correlation::compute(&scores, &returns);
    /// assert_eq!(c.sample_size, 3);
    /// assert!((c.spearman - 1.0).abs() < 1e-12);
    /// ```
    pub fn compute(scores: &[f64], returns: &[f64]) -> Self {
        let (x, y): (Vec<f64>, Vec<f64>) = scores
            .iter()
            .zip(returns)
            .filter(|(s, r)| s.is_finite() && r.is_finite())
            .map(|(s, r)| (*s, *r))
            .unzip();

        Self {
            pearson: pearson(&x, &y),
            spearman: pearson(&compute_ranks(&x), &compute_ranks(&y)),
            sample_size: x.len(),
        }
    }
}

/// Pearson correlation of two equal-length samples; 0 when undefined.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }

    let x = ArrayView1::from(&x[..n]);
    let y = ArrayView1::from(&y[..n]);
    let dx = &x - x.mean().unwrap_or(0.0);
    let dy = &y - y.mean().unwrap_or(0.0);

    let var_x = dx.dot(&dx);
    let var_y = dy.dot(&dy);
    if var_x <= 0.0 || var_y <= 0.0 {
        return 0.0;
    }

    let r = dx.dot(&dy) / (var_x.sqrt() * var_y.sqrt());
    if r.is_finite() { r.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Zero-based ranks with ties sharing their average rank.
pub(crate) fn compute_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut indexed: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j < n && indexed[j].1 == indexed[i].1 {
            j += 1;
        }
        let avg_rank = (i + j - 1) as f64 / 2.0;
        for (idx, _) in &indexed[i..j] {
            ranks[*idx] = avg_rank;
        }
        i = j;
    }

    ranks
}
