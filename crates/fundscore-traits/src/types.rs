//! Common types used throughout the fundscore engine.
//!
//! These are the records exchanged with the external data provider (NAV and
//! benchmark series, fund meta, holdings) and the intermediate results that
//! flow from the metric crates into the scorers.

use serde::{Deserialize, Serialize};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A single net asset value observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavPoint {
    /// Valuation date.
    pub date: Date,
    /// Unit NAV as published, excluding distributions.
    pub unit_nav: f64,
    /// Accumulated NAV with distributions reinvested.
    ///
    /// This is the only valid basis for risk statistics: unit NAV drops on
    /// every distribution and would read as a loss.
    pub accumulated_nav: f64,
}

impl NavPoint {
    /// Create a new NAV observation.
    pub const fn new(date: Date, unit_nav: f64, accumulated_nav: f64) -> Self {
        Self {
            date,
            unit_nav,
            accumulated_nav,
        }
    }
}

/// Date-ordered NAV history of one fund.
///
/// Construction sorts by date and keeps the last observation for duplicated
/// dates, so every consumer can rely on strictly increasing dates.
///
/// # Example
///
/// ```
/// use fundscore_traits::{Date, NavPoint, NavSeries};
///
/// let d = |day| Date::from_ymd_opt(2024, 1, day).unwrap();
/// let series = NavSeries::new(vec![
///     NavPoint::new(d(3), 1.02, 1.52),
///     NavPoint::new(d(2), 1.00, 1.50),
/// ]);
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.first_date(), Some(d(2)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavSeries {
    points: Vec<NavPoint>,
}

impl NavSeries {
    /// Build a series from unordered points.
    pub fn new(mut points: Vec<NavPoint>) -> Self {
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<NavPoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        Self { points: deduped }
    }

    /// The ordered points.
    pub fn points(&self) -> &[NavPoint] {
        &self.points
    }

    /// Number of observations.
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations.
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Date of the first observation.
    pub fn first_date(&self) -> Option<Date> {
        self.points.first().map(|p| p.date)
    }

    /// Date of the last observation.
    pub fn last_date(&self) -> Option<Date> {
        self.points.last().map(|p| p.date)
    }

    /// The prefix of the series dated on or before `date`.
    pub fn up_to(&self, date: Date) -> &[NavPoint] {
        let end = self.points.partition_point(|p| p.date <= date);
        &self.points[..end]
    }
}

impl AsRef<[NavPoint]> for NavSeries {
    fn as_ref(&self) -> &[NavPoint] {
        &self.points
    }
}

impl From<Vec<NavPoint>> for NavSeries {
    fn from(points: Vec<NavPoint>) -> Self {
        Self::new(points)
    }
}

/// A single benchmark index close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkPoint {
    /// Trading date.
    pub date: Date,
    /// Closing level.
    pub close: f64,
}

impl BenchmarkPoint {
    /// Create a new benchmark observation.
    pub const fn new(date: Date, close: f64) -> Self {
        Self { date, close }
    }
}

/// Date-ordered benchmark history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSeries {
    points: Vec<BenchmarkPoint>,
}

impl BenchmarkSeries {
    /// Build a series from unordered points, keeping the last close per date.
    pub fn new(mut points: Vec<BenchmarkPoint>) -> Self {
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<BenchmarkPoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        Self { points: deduped }
    }

    /// The ordered points.
    pub fn points(&self) -> &[BenchmarkPoint] {
        &self.points
    }

    /// Number of observations.
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations.
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl AsRef<[BenchmarkPoint]> for BenchmarkSeries {
    fn as_ref(&self) -> &[BenchmarkPoint] {
        &self.points
    }
}

impl From<Vec<BenchmarkPoint>> for BenchmarkSeries {
    fn from(points: Vec<BenchmarkPoint>) -> Self {
        Self::new(points)
    }
}

/// A named position weight, in percent of net assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingWeight {
    /// Stock or industry name.
    pub name: String,
    /// Weight in percent.
    pub weight: f64,
}

impl HoldingWeight {
    /// Create a new weight entry.
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Disclosed portfolio holdings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Holdings {
    /// Largest stock positions.
    pub top_stocks: Vec<HoldingWeight>,
    /// Industry allocation; empty when no breakdown was disclosed.
    pub industries: Vec<HoldingWeight>,
}

/// Risk/return statistics over one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodRiskMetrics {
    /// Annualized Sharpe ratio.
    pub sharpe_ratio: f64,
    /// Annualized Sortino ratio.
    pub sortino_ratio: f64,
    /// Calmar ratio.
    pub calmar_ratio: f64,
    /// Maximum drawdown in percent.
    pub max_drawdown: f64,
    /// Annualized volatility in percent.
    pub volatility: f64,
}

/// Evaluation windows of a [`PeriodRiskBreakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// Trailing one year.
    Year1,
    /// Trailing three years.
    Year3,
    /// Full available history.
    All,
}

impl Period {
    /// Nominal window length in years, `None` for the full history.
    #[must_use]
    pub const fn years(&self) -> Option<f64> {
        match self {
            Self::Year1 => Some(1.0),
            Self::Year3 => Some(3.0),
            Self::All => None,
        }
    }
}

/// Period metrics over trailing one year, three years, and the full history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodRiskBreakdown {
    /// Trailing one year, `None` when the window is not covered.
    pub year1: Option<PeriodRiskMetrics>,
    /// Trailing three years, `None` when the window is not covered.
    pub year3: Option<PeriodRiskMetrics>,
    /// Full history; all zero when fewer than 10 points exist.
    pub all: PeriodRiskMetrics,
}

impl PeriodRiskBreakdown {
    /// The three windows in year1, year3, all order.
    #[must_use]
    pub const fn by_period(&self) -> [(Period, Option<PeriodRiskMetrics>); 3] {
        [
            (Period::Year1, self.year1),
            (Period::Year3, self.year3),
            (Period::All, Some(self.all)),
        ]
    }
}

/// Static descriptive fields of a fund.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FundMeta {
    /// Star rating 1-5, 0 when unknown.
    pub star_rating: u8,
    /// Fund size in units of 100 million.
    pub size: f64,
    /// Tenure of the current manager in years.
    pub manager_tenure_years: f64,
    /// Total annual fee rate in percent.
    pub fee_rate: f64,
}

/// Realized performance of a fund.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FundPerformance {
    /// Period risk breakdown.
    pub breakdown: PeriodRiskBreakdown,
    /// Trailing one-year return in percent.
    pub return_1y: Option<f64>,
    /// Trailing three-year cumulative return in percent.
    pub return_3y: Option<f64>,
}

/// Everything a scorer needs to know about one fund.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundRecord {
    /// Free-text fund type as published, e.g. "混合型-偏股" or "Bond".
    pub fund_type: String,
    /// Realized performance.
    pub performance: FundPerformance,
    /// Static descriptive fields.
    pub meta: FundMeta,
}

impl FundRecord {
    /// Create a new fund record.
    pub fn new(fund_type: impl Into<String>, performance: FundPerformance, meta: FundMeta) -> Self {
        Self {
            fund_type: fund_type.into(),
            performance,
            meta,
        }
    }
}

/// Optional benchmark-relative and holdings analytics.
///
/// Every field is `None` when the analytics producing it were not run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuantMetrics {
    /// Annualized regression alpha in percent.
    pub alpha: Option<f64>,
    /// Regression beta.
    pub beta: Option<f64>,
    /// Annualized information ratio.
    pub information_ratio: Option<f64>,
    /// Treynor ratio.
    pub treynor_ratio: Option<f64>,
    /// Historical 95% daily VaR in percent.
    pub var95: Option<f64>,
    /// Historical 95% daily CVaR in percent.
    pub cvar95: Option<f64>,
    /// Share of positive months in percent.
    pub monthly_win_rate: Option<f64>,
    /// Downside capture ratio in percent.
    pub downside_capture_ratio: Option<f64>,
    /// Compound annual growth rate in percent.
    pub cagr: Option<f64>,
    /// Industry Herfindahl-Hirschman index (0-1).
    pub hhi: Option<f64>,
    /// Combined weight of the top holdings in percent.
    pub top_holdings_ratio: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Date {
        Date::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_nav_series_sorts_and_dedups() {
        let series = NavSeries::new(vec![
            NavPoint::new(d(5), 1.0, 1.0),
            NavPoint::new(d(1), 1.0, 1.0),
            NavPoint::new(d(5), 1.1, 1.1),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.first_date(), Some(d(1)));
        assert_eq!(series.last_date(), Some(d(5)));
        assert_eq!(series.points()[1].accumulated_nav, 1.1);
    }

    #[test]
    fn test_up_to_is_inclusive() {
        let series = NavSeries::new(
            (1..=10)
                .map(|day| NavPoint::new(d(day), 1.0, 1.0))
                .collect(),
        );

        assert_eq!(series.up_to(d(4)).len(), 4);
        assert_eq!(series.up_to(d(4)).last().map(|p| p.date), Some(d(4)));
        let before = Date::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(series.up_to(before).is_empty());
    }

    #[test]
    fn test_benchmark_series_sorts() {
        let series = BenchmarkSeries::new(vec![
            BenchmarkPoint::new(d(2), 3010.0),
            BenchmarkPoint::new(d(1), 3000.0),
        ]);
        assert_eq!(series.points()[0].close, 3000.0);
    }

    #[test]
    fn test_breakdown_by_period() {
        let breakdown = PeriodRiskBreakdown::default();
        let periods = breakdown.by_period();

        assert_eq!(periods[0].0, Period::Year1);
        assert!(periods[0].1.is_none());
        assert!(periods[2].1.is_some());
        assert_eq!(Period::Year3.years(), Some(3.0));
        assert_eq!(Period::All.years(), None);
    }

    #[test]
    fn test_quant_metrics_default_is_absent() {
        let quant = QuantMetrics::default();
        assert!(quant.alpha.is_none());
        assert!(quant.hhi.is_none());
    }

    #[test]
    fn test_fund_record_serializes() {
        let record = FundRecord::new("Bond", FundPerformance::default(), FundMeta::default());
        let json = serde_json::to_string(&record).unwrap();
        let back: FundRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fund_type, "Bond");
    }
}
