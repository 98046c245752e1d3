//! Point-in-time backtest of a fund scorer.
//!
//! At every evaluation date the series is truncated to what was known on
//! that date, the fund is re-scored from the truncated history alone, and the
//! score is paired with the returns realized over the following horizons.

use chrono::TimeDelta;
use fundscore_metrics::timeseries::{multi_period_metrics, trailing_return};
use fundscore_traits::stats::{MIN_COVERAGE, round2};
use fundscore_traits::{
    Date, FundMeta, FundPerformance, FundRecord, FundScorer, FundscoreError, NavPoint, NavSeries,
    PeriodRiskBreakdown, Result,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::report::BacktestReport;

/// Calendar days of history required before the first evaluation date.
pub const WARMUP_DAYS: i64 = 365;

/// Maximum age in days of the last NAV on or before an evaluation date.
///
/// Older bases are skipped so that a gap in the data cannot stretch a
/// horizon past its nominal length.
pub const MAX_STALE_DAYS: i64 = 31;

/// Backtest configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// First requested evaluation date.
    pub start: Date,
    /// Last evaluation date (inclusive).
    pub end: Date,
    /// Calendar days between evaluation dates.
    pub step_days: u32,
    /// Forward return horizons in calendar days.
    pub horizons_days: Vec<u32>,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            start: Date::from_ymd_opt(2015, 1, 1).unwrap_or_default(),
            end: Date::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
            step_days: 30,
            horizons_days: vec![91, 182, 365],
        }
    }
}

impl BacktestConfig {
    /// Check that the configuration describes a non-empty run.
    ///
    /// # Errors
    ///
    /// Returns [`FundscoreError::InvalidConfig`] when `step_days` is 0, `end`
    /// precedes `start`, no horizon is given or a horizon is 0.
    pub fn validate(&self) -> Result<()> {
        if self.step_days == 0 {
            return Err(FundscoreError::InvalidConfig(
                "step_days must be positive".into(),
            ));
        }
        if self.end < self.start {
            return Err(FundscoreError::InvalidConfig(format!(
                "end {} precedes start {}",
                self.end, self.start
            )));
        }
        if self.horizons_days.is_empty() {
            return Err(FundscoreError::InvalidConfig(
                "at least one horizon is required".into(),
            ));
        }
        if self.horizons_days.contains(&0) {
            return Err(FundscoreError::InvalidConfig(
                "horizons must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// A fund to simulate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestFund {
    /// Fund identifier.
    pub code: String,
    /// Free-text fund type.
    pub fund_type: String,
    /// Full NAV history.
    pub series: NavSeries,
}

impl BacktestFund {
    /// Create a new backtest fund.
    pub fn new(code: impl Into<String>, fund_type: impl Into<String>, series: NavSeries) -> Self {
        Self {
            code: code.into(),
            fund_type: fund_type.into(),
            series,
        }
    }
}

/// One fund scored on one evaluation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestSample {
    /// Fund identifier.
    pub fund_code: String,
    /// Evaluation date.
    pub eval_date: Date,
    /// Score from the truncated history.
    pub score: f64,
    /// Period breakdown from the truncated history.
    pub breakdown: PeriodRiskBreakdown,
    /// Realized return per configured horizon in percent; NaN when the data
    /// does not cover at least 80% of the horizon. NaN is written as `null`.
    #[serde(with = "nan_as_null")]
    pub forward_returns: Vec<f64>,
}

/// Runs a [`FundScorer`] over historical evaluation dates.
#[derive(Debug)]
pub struct BacktestHarness<S> {
    config: BacktestConfig,
    scorer: S,
}

impl<S: FundScorer> BacktestHarness<S> {
    /// Create a harness after validating `config`.
    ///
    /// # Errors
    ///
    /// See [`BacktestConfig::validate`].
    pub fn new(config: BacktestConfig, scorer: S) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, scorer })
    }

    /// The harness configuration.
    pub const fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Evaluation dates for a series starting at `first`.
    ///
    /// Stops early if a step would leave the representable date range.
    pub fn eval_dates(&self, first: Date) -> Vec<Date> {
        let Some(earliest) = first.checked_add_signed(TimeDelta::days(WARMUP_DAYS)) else {
            return Vec::new();
        };
        let step = TimeDelta::days(i64::from(self.config.step_days));

        let mut dates = Vec::new();
        let mut next = Some(earliest.max(self.config.start));
        while let Some(t) = next.filter(|t| *t <= self.config.end) {
            dates.push(t);
            next = t.checked_add_signed(step);
        }
        dates
    }

    /// Simulate one fund.
    pub fn run_fund(&self, fund: &BacktestFund) -> Vec<BacktestSample> {
        let points = fund.series.points();
        let Some(first) = fund.series.first_date() else {
            return Vec::new();
        };

        let mut samples = Vec::new();
        for t in self.eval_dates(first) {
            let history = fund.series.up_to(t);
            let Some(base) = history.last() else {
                continue;
            };
            let stale_days = (t - base.date).num_days();
            if stale_days > MAX_STALE_DAYS {
                tracing::debug!(
                    fund = %fund.code,
                    date = %t,
                    stale_days,
                    "last NAV too old, date skipped"
                );
                continue;
            }

            let forward_returns: Vec<f64> = self
                .config
                .horizons_days
                .iter()
                .map(|h| forward_return(points, base, t, *h))
                .collect();
            if forward_returns.iter().all(|r| r.is_nan()) {
                tracing::debug!(fund = %fund.code, date = %t, "no horizon covered, sample dropped");
                continue;
            }

            let record = point_in_time_record(&fund.fund_type, history);
            let score = self.scorer.total_score(&record);
            samples.push(BacktestSample {
                fund_code: fund.code.clone(),
                eval_date: t,
                score,
                breakdown: record.performance.breakdown,
                forward_returns,
            });
        }

        tracing::debug!(fund = %fund.code, samples = samples.len(), "fund simulated");
        samples
    }

    /// Simulate every fund in parallel, then aggregate.
    pub fn run_many(&self, funds: &[BacktestFund]) -> BacktestReport {
        let samples: Vec<BacktestSample> = funds
            .par_iter()
            .map(|fund| self.run_fund(fund))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        let report = BacktestReport::from_samples(self.config.horizons_days.clone(), samples);
        tracing::info!(
            scorer = self.scorer.name(),
            funds = funds.len(),
            samples = report.samples.len(),
            "backtest finished"
        );
        report
    }
}

/// The fund as it looked on the last date of `history`.
///
/// Star rating, size, tenure and fee are not known historically and are left
/// at their defaults.
pub fn point_in_time_record(fund_type: &str, history: &[NavPoint]) -> FundRecord {
    let return_1y = trailing_return(history, 1.0);
    let return_3y = trailing_return(history, 3.0);
    let performance = FundPerformance {
        breakdown: multi_period_metrics(history, return_1y),
        return_1y,
        return_3y,
    };
    FundRecord::new(fund_type, performance, FundMeta::default())
}

/// Return in percent from `base` (the last point on or before `t`) to the
/// first point on or after `t + horizon_days`, or the last point if none.
///
/// NaN when the elapsed span is under 80% of the horizon or the target date
/// is out of range.
pub fn forward_return(points: &[NavPoint], base: &NavPoint, t: Date, horizon_days: u32) -> f64 {
    let Some(target) = t.checked_add_signed(TimeDelta::days(i64::from(horizon_days))) else {
        return f64::NAN;
    };
    let idx = points.partition_point(|p| p.date < target);
    let Some(forward) = points.get(idx).or(points.last()) else {
        return f64::NAN;
    };

    let elapsed = (forward.date - base.date).num_days() as f64;
    if elapsed < MIN_COVERAGE * f64::from(horizon_days)
        || base.accumulated_nav <= 0.0
        || !forward.accumulated_nav.is_finite()
    {
        return f64::NAN;
    }

    round2((forward.accumulated_nav / base.accumulated_nav - 1.0) * 100.0)
}

/// Serde adapter writing NaN entries as `null` and reading `null` back as NaN.
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        values: &[f64],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|v| v.is_finite().then_some(*v)))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<f64>, D::Error> {
        let values = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fundscore_model::ScoringModel;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(start: Date, day: usize, nav: f64) -> NavPoint {
        NavPoint::new(start + TimeDelta::days(day as i64), nav, nav)
    }

    fn daily(start: Date, n: usize, f: impl Fn(usize) -> f64) -> NavSeries {
        NavSeries::new((0..n).map(|i| point(start, i, f(i))).collect())
    }

    fn config(start: Date, end: Date, step_days: u32, horizons_days: Vec<u32>) -> BacktestConfig {
        BacktestConfig {
            start,
            end,
            step_days,
            horizons_days,
        }
    }

    fn build<S: FundScorer>(config: BacktestConfig, scorer: S) -> BacktestHarness<S> {
        BacktestHarness::new(config, scorer).unwrap()
    }

    #[derive(Debug)]
    struct ConstantScorer;

    impl FundScorer for ConstantScorer {
        fn name(&self) -> &str {
            "constant"
        }

        fn total_score(&self, _fund: &FundRecord) -> f64 {
            50.0
        }
    }

    #[test]
    fn test_validate() {
        let start = date(2020, 1, 1);
        assert!(config(start, start, 30, vec![365]).validate().is_ok());

        let cases = [
            config(start, start, 0, vec![365]),
            config(start, date(2019, 1, 1), 30, vec![365]),
            config(start, start, 30, vec![]),
            config(start, start, 30, vec![365, 0]),
        ];
        for case in cases {
            let err = case.validate().unwrap_err();
            assert!(matches!(err, FundscoreError::InvalidConfig(_)));
        }
        assert!(BacktestConfig::default().validate().is_ok());
    }

    #[test]
    fn test_eval_dates_respect_warmup() {
        let first = date(2020, 1, 1);
        let end = date(2021, 3, 1);
        let harness = build(config(first, end, 30, vec![30]), ConstantScorer);
        let dates = harness.eval_dates(first);
        assert_eq!(dates[0], first + TimeDelta::days(365));
        assert!(dates.windows(2).all(|w| (w[1] - w[0]).num_days() == 30));
        assert!(dates.iter().all(|d| *d <= end));
    }

    #[test]
    fn test_eval_dates_stop_at_end_of_calendar() {
        let first = date(2020, 1, 1);
        let harness = build(config(first, Date::MAX, u32::MAX, vec![30]), ConstantScorer);
        let dates = harness.eval_dates(first);
        assert_eq!(dates, vec![first + TimeDelta::days(365)]);
        assert!(harness.eval_dates(Date::MAX).is_empty());
    }

    #[test]
    fn test_golden_linear_nav() {
        // 1.0 -> 2.0 linearly over five years of daily points.
        let first = date(2015, 1, 1);
        let days = 5 * 365;
        let series = daily(first, days + 1, |i| 1.0 + i as f64 / days as f64);
        let t = first + TimeDelta::days(2 * 365);

        let harness = build(config(t, t, 30, vec![365]), ScoringModel::default());
        let samples = harness.run_fund(&BacktestFund::new("LIN", "股票型", series));

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].eval_date, t);
        let base = 1.0 + 730.0 / days as f64;
        let forward = 1.0 + 1095.0 / days as f64;
        let expected = round2((forward / base - 1.0) * 100.0);
        assert_relative_eq!(samples[0].forward_returns[0], expected);
        assert_relative_eq!(samples[0].forward_returns[0], 14.29);
    }

    #[test]
    fn test_uncovered_sample_dropped() {
        let first = date(2020, 1, 1);
        let series = daily(first, 400, |i| 1.0 + i as f64 * 0.001);
        let fund = BacktestFund::new("SHORT", "Bond", series);
        let t = first + TimeDelta::days(380);

        let samples = build(config(t, t, 30, vec![365]), ConstantScorer).run_fund(&fund);
        assert!(samples.is_empty());

        // A covered shorter horizon keeps the sample with NaN for the long one.
        let samples = build(config(t, t, 30, vec![10, 365]), ConstantScorer).run_fund(&fund);
        assert_eq!(samples.len(), 1);
        assert!(samples[0].forward_returns[0].is_finite());
        assert!(samples[0].forward_returns[1].is_nan());
    }

    #[test]
    fn test_stale_base_skipped() {
        // No NAV between day 400 and day 700.
        let first = date(2020, 1, 1);
        let points: Vec<NavPoint> = (0..400)
            .chain(700..1000)
            .map(|i| point(first, i, 1.0 + i as f64 * 0.001))
            .collect();
        let fund = BacktestFund::new("GAP", "混合型", NavSeries::new(points));

        let in_gap = first + TimeDelta::days(650);
        let after_gap = first + TimeDelta::days(730);
        let harness = build(config(in_gap, after_gap, 80, vec![30]), ConstantScorer);
        let samples = harness.run_fund(&fund);

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].eval_date, after_gap);
    }

    #[test]
    fn test_no_lookahead() {
        // Identical pasts with different futures must score identically.
        let first = date(2018, 1, 1);
        let t = first + TimeDelta::days(800);
        let past = |i: usize| 1.0 + (i as f64 * 0.05).sin() * 0.05 + i as f64 * 0.0004;
        let calm = daily(first, 1200, past);
        let crash = daily(first, 1200, |i| {
            if i <= 800 { past(i) } else { past(i) * 0.5 }
        });

        let harness = build(config(t, t, 30, vec![180]), ScoringModel::default());
        let a = harness.run_fund(&BacktestFund::new("A", "混合型", calm));
        let b = harness.run_fund(&BacktestFund::new("B", "混合型", crash));

        assert_eq!(a[0].score, b[0].score);
        assert_eq!(a[0].breakdown, b[0].breakdown);
        assert!(a[0].forward_returns[0] > b[0].forward_returns[0]);
    }

    #[test]
    fn test_forward_return_uses_last_point_when_target_missing() {
        let first = date(2020, 1, 1);
        let series = daily(first, 100, |i| 1.0 + i as f64 * 0.01);
        let points = series.points();
        let t = first + TimeDelta::days(10);
        // Target is day 100, one past the end; day 99 still covers 89 of 90 days.
        let r = forward_return(points, &points[10], t, 90);
        assert_relative_eq!(r, round2((1.99 / 1.10 - 1.0) * 100.0));
    }

    #[test]
    fn test_forward_return_beyond_calendar_is_nan() {
        let first = date(2020, 1, 1);
        let series = daily(first, 10, |_| 1.0);
        let points = series.points();
        assert!(forward_return(points, &points[0], first, u32::MAX).is_nan());
    }

    #[test]
    fn test_sample_json_writes_nan_as_null() {
        let sample = BacktestSample {
            fund_code: "F1".to_string(),
            eval_date: date(2022, 6, 30),
            score: 61.5,
            breakdown: PeriodRiskBreakdown::default(),
            forward_returns: vec![1.5, f64::NAN],
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains(r#""forward_returns":[1.5,null]"#));

        let back: BacktestSample = serde_json::from_str(&json).unwrap();
        assert_eq!(back.forward_returns[0], 1.5);
        assert!(back.forward_returns[1].is_nan());
        assert_eq!(back.breakdown, sample.breakdown);
    }

    #[test]
    fn test_run_many_aggregates() {
        let first = date(2016, 1, 1);
        let funds: Vec<BacktestFund> = (0..6)
            .map(|k| {
                let drift = 0.0001 * k as f64;
                BacktestFund::new(
                    format!("F{k}"),
                    "股票型",
                    daily(first, 1500, move |i| 1.0 + drift * i as f64),
                )
            })
            .collect();

        let harness = build(
            config(date(2017, 1, 1), date(2019, 1, 1), 60, vec![91, 365]),
            ScoringModel::default(),
        );
        let report = harness.run_many(&funds);

        assert_eq!(report.horizons.len(), 2);
        assert!(!report.samples.is_empty());
        let per_fund = harness.run_fund(&funds[0]).len();
        assert_eq!(report.samples.len(), per_fund * funds.len());
        for horizon in &report.horizons {
            assert!(horizon.correlation.pearson.abs() <= 1.0);
            assert!(horizon.correlation.sample_size > 0);
        }
    }
}
