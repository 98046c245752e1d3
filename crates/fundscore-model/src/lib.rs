//! Fund scoring models.
//!
//! Two models score a [`FundRecord`](fundscore_traits::FundRecord) on a 0-100
//! scale:
//!
//! - [`ScoringModel`]: a market view against the fund's category table and a
//!   risk-tier view against the tier's benchmark
//! - [`DeepScoringModel`]: adds benchmark-relative and holdings inputs from
//!   [`QuantMetrics`](fundscore_traits::QuantMetrics)
//!
//! Both build on [`score_view`], which omits unavailable items and rescales
//! the remaining maxima to 100. Both implement
//! [`FundScorer`](fundscore_traits::FundScorer).
//!
//! # Example
//!
//! ```
//! use fundscore_model::ScoringModel;
//! use fundscore_traits::{FundMeta, FundRecord};
//!
//! let mut fund = FundRecord::default();
//! fund.fund_type = "Bond".to_string();
//! fund.meta = FundMeta {
//!     star_rating: 4,
//!     size: 12.0,
//!     manager_tenure_years: 6.0,
//!     fee_rate: 0.4,
//! };
//!
//! let result = ScoringModel::default().score(&fund);
//! assert!(result.market_score > 0.0);
//! assert!(result.market_score <= 100.0);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod classify;
pub mod deep;
pub mod item;
pub mod lookup;
pub mod model;
pub mod tables;

pub use classify::{Category, RiskTier, classify_category, resolve_risk_tier};
pub use deep::{DeepScoreResult, DeepScoringModel};
pub use item::{
    DEEP_WEIGHTS, Dimension, DimensionScore, Item, ItemScore, MARKET_WEIGHTS, View, score_view,
};
pub use model::{ScoreResult, ScoringModel, momentum_penalty};
pub use tables::{
    BenchmarkTable, Breakpoints, DeepTable, Direction, PERIOD_WEIGHTS, PeriodWeights,
    TierBenchmark,
};
