//! Benchmark-relative analytics.
//!
//! Fund and benchmark daily returns are aligned by date before any
//! comparison. Alignment is an inner join: a date present in only one series
//! is dropped without interpolation. On mismatched trading calendars this
//! silently shrinks the sample, and a fund return spanning a holiday is paired
//! with a one-day benchmark return. Callers needing exact calendar handling
//! must align the inputs themselves.

use std::collections::HashMap;

use fundscore_traits::stats::{
    MIN_STD_THRESHOLD, TRADING_DAYS_PER_YEAR, daily_risk_free_rate, finite_or_zero, mean,
    round2, sample_std,
};
use fundscore_traits::{BenchmarkPoint, Date, NavPoint};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Minimum number of aligned returns for regression and tail statistics.
pub const MIN_SAMPLES: usize = 30;

/// Annual risk-free rate in percent, as used by the Treynor ratio.
const RISK_FREE_PERCENT: f64 = 2.0;

/// A fund and benchmark daily return on the same date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedReturn {
    /// Date the return was realized on.
    pub date: Date,
    /// Fund daily return.
    pub fund: f64,
    /// Benchmark daily return.
    pub benchmark: f64,
}

/// Intercept and slope of an ordinary least squares fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    /// Intercept.
    pub alpha: f64,
    /// Slope.
    pub beta: f64,
}

/// Annualized alpha (percent) and beta against a benchmark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AlphaBeta {
    /// Annualized alpha in percent.
    pub alpha: f64,
    /// Beta.
    pub beta: f64,
}

fn dated_returns<T>(
    points: &[T],
    date: impl Fn(&T) -> Date,
    value: impl Fn(&T) -> f64,
) -> Vec<(Date, f64)> {
    points
        .windows(2)
        .filter_map(|w| {
            let (prev, cur) = (value(&w[0]), value(&w[1]));
            (prev > 0.0 && prev.is_finite() && cur.is_finite())
                .then(|| (date(&w[1]), cur / prev - 1.0))
        })
        .collect()
}

/// Inner-join fund and benchmark daily returns by date.
pub fn align_returns(fund: &[NavPoint], benchmark: &[BenchmarkPoint]) -> Vec<AlignedReturn> {
    let fund_returns = dated_returns(fund, |p| p.date, |p| p.accumulated_nav);
    let benchmark_returns: HashMap<Date, f64> = dated_returns(benchmark, |p| p.date, |p| p.close)
        .into_iter()
        .collect();

    let aligned: Vec<AlignedReturn> = fund_returns
        .iter()
        .filter_map(|(date, fund)| {
            benchmark_returns.get(date).map(|benchmark| AlignedReturn {
                date: *date,
                fund: *fund,
                benchmark: *benchmark,
            })
        })
        .collect();

    if aligned.len() < fund_returns.len().min(benchmark_returns.len()) {
        tracing::debug!(
            fund_returns = fund_returns.len(),
            benchmark_returns = benchmark_returns.len(),
            aligned = aligned.len(),
            "unmatched dates dropped while aligning returns"
        );
    }

    aligned
}

/// Closed-form OLS of `y` on `x` via covariance over variance.
///
/// Only the common prefix of both slices is used. When `x` has no variance
/// the slope is 0 and the intercept is the mean of `y`.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Regression {
    let n = x.len().min(y.len());
    if n == 0 {
        return Regression::default();
    }

    let x = ArrayView1::from(&x[..n]);
    let y = ArrayView1::from(&y[..n]);
    let mean_x = x.mean().unwrap_or(0.0);
    let mean_y = y.mean().unwrap_or(0.0);

    let dx = x.mapv(|v| v - mean_x);
    let dy = y.mapv(|v| v - mean_y);
    let variance = dx.dot(&dx) / n as f64;
    let covariance = dx.dot(&dy) / n as f64;

    if !variance.is_finite() || variance <= MIN_STD_THRESHOLD * MIN_STD_THRESHOLD {
        return Regression {
            alpha: finite_or_zero(mean_y),
            beta: 0.0,
        };
    }

    let beta = covariance / variance;
    Regression {
        alpha: finite_or_zero(mean_y - beta * mean_x),
        beta: finite_or_zero(beta),
    }
}

/// Regression alpha/beta of daily excess returns on aligned returns.
///
/// Alpha is annualized (×252) and expressed in percent. Fewer than 30 aligned
/// returns yields `{alpha: 0, beta: 0}`.
pub fn alpha_beta_aligned(aligned: &[AlignedReturn]) -> AlphaBeta {
    if aligned.len() < MIN_SAMPLES {
        return AlphaBeta::default();
    }

    let rf = daily_risk_free_rate();
    let x: Vec<f64> = aligned.iter().map(|a| a.benchmark - rf).collect();
    let y: Vec<f64> = aligned.iter().map(|a| a.fund - rf).collect();
    let fit = linear_regression(&x, &y);

    AlphaBeta {
        alpha: round2(fit.alpha * TRADING_DAYS_PER_YEAR * 100.0),
        beta: round2(fit.beta),
    }
}

/// Regression alpha/beta of a fund against a benchmark.
///
/// See [`alpha_beta_aligned`].
pub fn alpha_beta(fund: &[NavPoint], benchmark: &[BenchmarkPoint]) -> AlphaBeta {
    alpha_beta_aligned(&align_returns(fund, benchmark))
}

/// Annualized mean active return over its sample deviation.
///
/// 0 with fewer than 30 aligned returns or a constant active return.
pub fn information_ratio(aligned: &[AlignedReturn]) -> f64 {
    if aligned.len() < MIN_SAMPLES {
        return 0.0;
    }
    let active: Vec<f64> = aligned.iter().map(|a| a.fund - a.benchmark).collect();
    let tracking_error = sample_std(&active);
    if tracking_error <= MIN_STD_THRESHOLD {
        return 0.0;
    }
    round2(mean(&active) / tracking_error * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Excess annualized return (percent) per unit of beta; 0 when beta is 0.
pub fn treynor_ratio(annualized_fund_return: f64, beta: f64) -> f64 {
    if beta == 0.0 || !beta.is_finite() {
        return 0.0;
    }
    round2((finite_or_zero(annualized_fund_return) - RISK_FREE_PERCENT) / beta)
}

fn sorted_finite(returns: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = returns.iter().copied().filter(|r| r.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

fn cutoff_index(n: usize, confidence: f64) -> usize {
    let tail = (1.0 - confidence).clamp(0.0, 1.0);
    let index = (tail * n as f64).floor() as usize;
    index.min(n.saturating_sub(1))
}

/// Historical-simulation Value at Risk in percent.
///
/// Sorts ascending and negates the return at `⌊(1 - confidence)·n⌋`.
/// Fewer than 30 finite returns yields 0.
pub fn historical_var(returns: &[f64], confidence: f64) -> f64 {
    let sorted = sorted_finite(returns);
    if sorted.len() < MIN_SAMPLES {
        return 0.0;
    }
    let idx = cutoff_index(sorted.len(), confidence);
    round2(-sorted[idx] * 100.0)
}

/// Historical-simulation Conditional VaR in percent.
///
/// Negated mean of the returns below the VaR cutoff index; an empty tail
/// falls back to the cutoff return itself. Fewer than 30 finite returns
/// yields 0.
pub fn historical_cvar(returns: &[f64], confidence: f64) -> f64 {
    let sorted = sorted_finite(returns);
    if sorted.len() < MIN_SAMPLES {
        return 0.0;
    }
    let idx = cutoff_index(sorted.len(), confidence);
    let tail = if idx == 0 { &sorted[..1] } else { &sorted[..idx] };
    round2(-mean(tail) * 100.0)
}

/// Fund's average return on benchmark down-days relative to the benchmark's,
/// in percent.
///
/// 0 when there are no down-days or the benchmark average is 0.
pub fn downside_capture_ratio(aligned: &[AlignedReturn]) -> f64 {
    let (fund, benchmark): (Vec<f64>, Vec<f64>) = aligned
        .iter()
        .filter(|a| a.benchmark < 0.0)
        .map(|a| (a.fund, a.benchmark))
        .unzip();
    if benchmark.is_empty() {
        return 0.0;
    }
    let benchmark_mean = mean(&benchmark);
    if benchmark_mean == 0.0 {
        return 0.0;
    }
    round2(mean(&fund) / benchmark_mean * 100.0)
}
