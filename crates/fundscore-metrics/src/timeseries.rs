//! Time-windowed risk/return statistics over NAV series.
//!
//! Every statistic is computed on accumulated NAV and is total: short series,
//! zero variance and non-finite inputs resolve to 0 (or `None` for a window
//! that is not covered) instead of failing.

use chrono::{Datelike, TimeDelta};
use fundscore_traits::stats::{
    DAYS_PER_YEAR, MIN_COVERAGE, MIN_STD_THRESHOLD, RISK_FREE_RATE_ANNUAL, TRADING_DAYS_PER_YEAR,
    daily_risk_free_rate, finite_or_zero, mean, population_std, round2,
};
use fundscore_traits::{NavPoint, PeriodRiskBreakdown, PeriodRiskMetrics};

/// Minimum number of points for any period statistic.
pub const MIN_POINTS: usize = 10;

/// Minimum number of points for the Sharpe ratio.
pub const MIN_SHARPE_POINTS: usize = 30;

/// Sortino ratio reported when no return falls below the risk-free rate.
pub const SORTINO_CEILING: f64 = 3.0;

/// Minimum number of monthly returns for a win rate.
pub const MIN_MONTHS: usize = 3;

/// Daily simple returns on accumulated NAV.
///
/// Pairs with a non-positive or non-finite base are skipped.
pub fn daily_returns(points: &[NavPoint]) -> Vec<f64> {
    points
        .windows(2)
        .filter_map(|w| {
            let (prev, cur) = (w[0].accumulated_nav, w[1].accumulated_nav);
            let valid = prev > 0.0 && prev.is_finite() && cur.is_finite();
            valid.then(|| cur / prev - 1.0)
        })
        .collect()
}

/// Maximum peak-to-trough decline in percent, rounded to 2 decimals.
///
/// Single forward pass over the running peak. Fewer than 2 points yields 0.
///
/// # Example
///
/// ```
/// use fundscore_metrics::timeseries::max_drawdown;
/// use fundscore_traits::{Date, NavPoint};
///
/// let d = |day| Date::from_ymd_opt(2024, 1, day).unwrap();
/// let points = [NavPoint::new(d(1), 3.0, 3.0), NavPoint::new(d(2), 2.0, 2.0)];
/// assert_eq!(max_drawdown(&points), 33.33);
/// ```
pub fn max_drawdown(points: &[NavPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;
    for value in points.iter().map(|p| p.accumulated_nav) {
        if !value.is_finite() {
            continue;
        }
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            max_dd = max_dd.max((peak - value) / peak);
        }
    }

    round2(max_dd * 100.0)
}

/// Annualized volatility of daily returns in percent, rounded to 2 decimals.
///
/// Uses the population variance. Fewer than 10 points yields 0.
pub fn volatility(points: &[NavPoint]) -> f64 {
    if points.len() < MIN_POINTS {
        return 0.0;
    }
    let returns = daily_returns(points);
    round2(population_std(&returns) * TRADING_DAYS_PER_YEAR.sqrt() * 100.0)
}

/// Annualized Sharpe ratio against the fixed 2% risk-free rate.
///
/// Fewer than 30 points or zero deviation yields 0.
pub fn sharpe_ratio(points: &[NavPoint]) -> f64 {
    if points.len() < MIN_SHARPE_POINTS {
        return 0.0;
    }
    let returns = daily_returns(points);
    let std = population_std(&returns);
    if std <= MIN_STD_THRESHOLD {
        return 0.0;
    }
    round2((mean(&returns) - daily_risk_free_rate()) / std * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Annualized Sortino ratio.
///
/// The downside deviation is taken only over daily returns below the daily
/// risk-free rate. When there are none the ratio is [`SORTINO_CEILING`].
/// `annualized_return` is in percent. Fewer than 10 points yields 0.
pub fn sortino_ratio(points: &[NavPoint], annualized_return: f64) -> f64 {
    if points.len() < MIN_POINTS {
        return 0.0;
    }

    let rf = daily_risk_free_rate();
    let downside: Vec<f64> = daily_returns(points)
        .into_iter()
        .filter(|r| *r < rf)
        .map(|r| (r - rf).powi(2))
        .collect();
    if downside.is_empty() {
        return SORTINO_CEILING;
    }

    let downside_dev = mean(&downside).sqrt() * TRADING_DAYS_PER_YEAR.sqrt();
    if downside_dev <= MIN_STD_THRESHOLD {
        return SORTINO_CEILING;
    }

    let excess = finite_or_zero(annualized_return) / 100.0 - RISK_FREE_RATE_ANNUAL;
    round2(excess / downside_dev)
}

/// Annualized return divided by the absolute maximum drawdown.
///
/// 0 when the drawdown is 0 or either input is non-finite.
pub fn calmar_ratio(annualized_return: f64, max_drawdown: f64) -> f64 {
    if !annualized_return.is_finite() || !max_drawdown.is_finite() || max_drawdown == 0.0 {
        return 0.0;
    }
    round2(annualized_return / max_drawdown.abs())
}

/// Compound annual growth rate in percent over the whole slice.
///
/// 0 when the slice spans no time or starts at a non-positive value.
pub fn annualized_return(points: &[NavPoint]) -> f64 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return 0.0;
    };
    let days = (last.date - first.date).num_days();
    if days <= 0 || first.accumulated_nav <= 0.0 || last.accumulated_nav <= 0.0 {
        return 0.0;
    }
    let growth = last.accumulated_nav / first.accumulated_nav;
    round2((growth.powf(DAYS_PER_YEAR / days as f64) - 1.0) * 100.0)
}

/// The trailing window of `years` ending at the last point.
///
/// Returns `None` unless the slice's elapsed span covers at least 80% of
/// `years × 365.25` days and it holds at least 10 points, regardless of how
/// many points the full series has.
pub fn slice_window(points: &[NavPoint], years: f64) -> Option<&[NavPoint]> {
    let last = points.last()?;
    let nominal_days = years * DAYS_PER_YEAR;
    let cutoff = last
        .date
        .checked_sub_signed(TimeDelta::days(nominal_days.floor() as i64))?;

    let start = points.partition_point(|p| p.date < cutoff);
    let window = &points[start..];
    let first = window.first()?;
    let span = (last.date - first.date).num_days() as f64;

    let covered = span >= MIN_COVERAGE * nominal_days && window.len() >= MIN_POINTS;
    covered.then_some(window)
}

/// Cumulative return in percent over the trailing window of `years`.
///
/// `None` when the window is not covered (see [`slice_window`]).
pub fn trailing_return(points: &[NavPoint], years: f64) -> Option<f64> {
    let window = slice_window(points, years)?;
    let (first, last) = (window.first()?, window.last()?);
    if first.accumulated_nav <= 0.0 {
        return None;
    }
    Some(round2((last.accumulated_nav / first.accumulated_nav - 1.0) * 100.0))
}

/// All period statistics for one window.
///
/// `annualized_return` (percent) feeds Sortino and Calmar. Windows shorter
/// than 10 points yield all zeros.
pub fn window_metrics(points: &[NavPoint], annualized_return: f64) -> PeriodRiskMetrics {
    if points.len() < MIN_POINTS {
        return PeriodRiskMetrics::default();
    }

    let max_drawdown = max_drawdown(points);
    PeriodRiskMetrics {
        sharpe_ratio: sharpe_ratio(points),
        sortino_ratio: sortino_ratio(points, annualized_return),
        calmar_ratio: calmar_ratio(annualized_return, max_drawdown),
        max_drawdown,
        volatility: volatility(points),
    }
}

/// Period breakdown over trailing one year, three years and the full history.
///
/// Each window uses its own CAGR as annualized return; a finite
/// `trailing_return_1y` (percent) replaces it for the one-year window.
///
/// # Example
///
/// ```
/// use fundscore_metrics::timeseries::multi_period_metrics;
/// use fundscore_traits::{Date, NavPoint};
///
/// let start = Date::from_ymd_opt(2020, 1, 1).unwrap();
/// let points: Vec<NavPoint> = (0..20)
///     .map(|i| NavPoint::new(start + chrono::TimeDelta::days(i), 1.0, 1.0 + i as f64 * 0.001))
///     .collect();
///
/// let breakdown = multi_period_metrics(&points, None);
/// assert!(breakdown.year1.is_none());
/// assert!(breakdown.year3.is_none());
/// ```
pub fn multi_period_metrics(
    points: &[NavPoint],
    trailing_return_1y: Option<f64>,
) -> PeriodRiskBreakdown {
    let year1 = slice_window(points, 1.0).map(|window| {
        let ar = trailing_return_1y
            .filter(|r| r.is_finite())
            .unwrap_or_else(|| annualized_return(window));
        window_metrics(window, ar)
    });
    let year3 =
        slice_window(points, 3.0).map(|window| window_metrics(window, annualized_return(window)));
    let all = window_metrics(points, annualized_return(points));

    PeriodRiskBreakdown { year1, year3, all }
}

/// Share of calendar months with a positive return, in percent.
///
/// Month returns run from one month's last observation to the next. Fewer
/// than 3 monthly returns yields 0.
pub fn monthly_win_rate(points: &[NavPoint]) -> f64 {
    let returns = monthly_returns(points);
    if returns.len() < MIN_MONTHS {
        return 0.0;
    }
    let wins = returns.iter().filter(|r| **r > 0.0).count();
    round2(wins as f64 / returns.len() as f64 * 100.0)
}

/// Returns between consecutive calendar month-end observations.
pub fn monthly_returns(points: &[NavPoint]) -> Vec<f64> {
    month_end_values(points)
        .windows(2)
        .filter(|w| w[0] > 0.0)
        .map(|w| w[1] / w[0] - 1.0)
        .collect()
}

fn month_end_values(points: &[NavPoint]) -> Vec<f64> {
    let mut values: Vec<((i32, u32), f64)> = Vec::new();
    for point in points.iter().filter(|p| p.accumulated_nav.is_finite()) {
        let key = (point.date.year(), point.date.month());
        match values.last_mut() {
            Some((last_key, value)) if *last_key == key => *value = point.accumulated_nav,
            _ => values.push((key, point.accumulated_nav)),
        }
    }
    values.into_iter().map(|(_, v)| v).collect()
}
