//! Numeric constants and helpers shared by every fundscore crate.
//!
//! All statistics in the engine flow through these helpers so that the same
//! annualization constants, risk-free rate and NaN handling apply everywhere.

use ndarray::ArrayView1;

/// Trading days per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Fixed annual risk-free rate (2%).
pub const RISK_FREE_RATE_ANNUAL: f64 = 0.02;

/// Calendar days in a nominal year.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Minimum share of a nominal window that the actual elapsed span must cover.
pub const MIN_COVERAGE: f64 = 0.8;

/// Standard deviations below this threshold are treated as zero variance.
pub const MIN_STD_THRESHOLD: f64 = 1e-12;

/// Daily risk-free rate derived from [`RISK_FREE_RATE_ANNUAL`].
#[must_use]
pub fn daily_risk_free_rate() -> f64 {
    RISK_FREE_RATE_ANNUAL / TRADING_DAYS_PER_YEAR
}

/// Coerce NaN and infinities to 0.
///
/// # Examples
///
/// ```
/// use fundscore_traits::stats::finite_or_zero;
///
/// assert_eq!(finite_or_zero(f64::NAN), 0.0);
/// assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
/// assert_eq!(finite_or_zero(1.5), 1.5);
/// ```
#[must_use]
pub const fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Round to `decimals` places, coercing non-finite input to 0 first.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    finite_or_zero((finite_or_zero(value) * factor).round() / factor)
}

/// Round a score to 1 decimal.
#[must_use]
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Round a ratio or percentage to 2 decimals.
#[must_use]
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Arithmetic mean, 0 for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    ArrayView1::from(values).mean().map_or(0.0, finite_or_zero)
}

/// Population standard deviation (N denominator), 0 for an empty slice.
#[must_use]
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    finite_or_zero(ArrayView1::from(values).std(0.0))
}

/// Sample standard deviation (N-1 denominator), 0 for fewer than 2 values.
#[must_use]
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    finite_or_zero(ArrayView1::from(values).std(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_daily_risk_free_rate() {
        assert_relative_eq!(daily_risk_free_rate(), 0.02 / 252.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round1(72.25), 72.3);
        assert_eq!(round2(f64::NAN), 0.0);
        assert_eq!(round2(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_mean_and_std() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(mean(&values), 3.0);
        assert_relative_eq!(population_std(&values), 2.0_f64.sqrt());
        assert_relative_eq!(sample_std(&values), 2.5_f64.sqrt());
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(population_std(&[]), 0.0);
        assert_eq!(sample_std(&[1.0]), 0.0);
        assert_eq!(population_std(&[5.0, 5.0, 5.0]), 0.0);
    }
}
