#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # fundscore
//!
//! fundscore is an umbrella crate that re-exports the fundscore sub-crates.
//!
//! ## Quick Start
//!
//! ```
//! use chrono::{NaiveDate, TimeDelta};
//! use fundscore::metrics::{multi_period_metrics, trailing_return};
//! use fundscore::{FundMeta, FundPerformance, FundRecord, NavPoint, NavSeries, ScoringModel};
//!
//! let start = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
//! let series = NavSeries::new(
//!     (0..1200)
//!         .map(|i| {
//!             let nav = 1.0 + 0.0004 * i as f64 + 0.01 * (i as f64 * 0.2).sin();
//!             NavPoint::new(start + TimeDelta::days(i), nav, nav)
//!         })
//!         .collect(),
//! );
//!
//! let points = series.points();
//! let return_1y = trailing_return(points, 1.0);
//! let performance = FundPerformance {
//!     breakdown: multi_period_metrics(points, return_1y),
//!     return_1y,
//!     return_3y: trailing_return(points, 3.0),
//! };
//! let meta = FundMeta { star_rating: 4, size: 12.0, manager_tenure_years: 5.0, fee_rate: 1.2 };
//! let fund = FundRecord::new("混合型-偏股", performance, meta);
//!
//! let result = ScoringModel::default().score(&fund);
//! assert!((0.0..=100.0).contains(&result.market_score));
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Records, error type and the [`FundScorer`] trait
//! - [`metrics`] - Time-series, benchmark-relative and holdings metrics
//! - [`model`] - Category/risk tier resolution and the scoring models
//! - [`eval`] - Point-in-time backtesting and score evaluation
//!
//! ## Architecture
//!
//! 1. **Metrics** turn NAV, benchmark and holdings data into period metrics
//! 2. **Models** map metrics and fund facts onto 0-100 scores
//! 3. **The harness** re-scores funds at past dates and checks the scores
//!    against what happened afterwards

/// Version information for the fundscore crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core records and traits.
pub mod traits {
    pub use fundscore_traits::*;
}

pub use fundscore_traits::{
    BenchmarkPoint, BenchmarkSeries, Date, FundMeta, FundPerformance, FundRecord, HoldingWeight,
    Holdings, NavPoint, NavSeries, PeriodRiskBreakdown, PeriodRiskMetrics, QuantMetrics,
};
pub use fundscore_traits::{FundScorer, FundscoreError, Result};

// ============================================================================
// Metrics
// ============================================================================

/// Metric computation.
///
/// - **timeseries**: drawdown, volatility, Sharpe, Sortino, Calmar and the
///   `{year1, year3, all}` breakdown
/// - **relative**: alpha/beta, information ratio, Treynor ratio, VaR/CVaR,
///   downside capture
/// - **holdings**: top-N concentration and industry HHI
/// - **quant**: assembly of [`QuantMetrics`] with availability rules
pub mod metrics {
    pub use fundscore_metrics::*;
}

// ============================================================================
// Scoring
// ============================================================================

/// Scoring models.
///
/// [`ScoringModel`] produces the market view (category benchmarks) and the
/// tier view (risk tier benchmarks). [`DeepScoringModel`] adds
/// benchmark-relative and holdings items.
pub mod model {
    pub use fundscore_model::*;
}

pub use fundscore_model::{
    Category, DeepScoreResult, DeepScoringModel, RiskTier, ScoreResult, ScoringModel,
};

// ============================================================================
// Evaluation
// ============================================================================

/// Backtesting and score evaluation.
///
/// For every fund and evaluation date T the harness truncates the NAV series
/// at T, re-scores, and pairs the score with realized returns over each
/// horizon:
///
/// ```text
/// forward_return = nav(T + h) / nav(T) - 1
/// ```
///
/// Scores and returns are then compared per horizon with Pearson and
/// Spearman correlation and quintile buckets.
pub mod eval {
    pub use fundscore_eval::*;
}

pub use fundscore_eval::{BacktestConfig, BacktestHarness, BacktestReport};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use fundscore::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BacktestConfig, BacktestHarness, DeepScoringModel, FundRecord, FundScorer, FundscoreError,
        NavSeries, Result, ScoringModel,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn accept_scorer(_scorer: &dyn FundScorer) {}
        accept_scorer(&ScoringModel::default());
        accept_scorer(&DeepScoringModel::default());
        assert!(BacktestConfig::default().validate().is_ok());
    }

    #[test]
    fn test_error_types() {
        let result: Result<()> = Err(FundscoreError::InvalidConfig("step".to_string()));
        assert!(result.is_err());
    }
}
