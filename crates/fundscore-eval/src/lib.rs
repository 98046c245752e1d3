//! Backtesting and score evaluation for fundscore.
//!
//! This crate answers whether a score predicts what happens next:
//! - Point-in-time re-scoring of funds over a date grid
//! - Forward returns per horizon with a coverage check
//! - Pearson and Spearman correlation of scores with realized returns
//! - Quintile buckets, top-minus-bottom spread and monotonicity
//!
//! # Example
//!
//! ```rust,no_run
//! use fundscore_eval::{BacktestConfig, BacktestFund, BacktestHarness};
//! use fundscore_model::ScoringModel;
//! # fn funds() -> Vec<BacktestFund> { Vec::new() }
//!
//! # fn main() -> fundscore_traits::Result<()> {
//! let harness = BacktestHarness::new(BacktestConfig::default(), ScoringModel::default())?;
//! let report = harness.run_many(&funds());
//! for horizon in &report.horizons {
//!     println!("{}d spearman {:.3}", horizon.horizon_days, horizon.correlation.spearman);
//! }
//! # Ok(())
//! # }
//! ```

pub mod backtest;
pub mod correlation;
pub mod quintile;
pub mod report;

// Re-export main types
pub use backtest::{BacktestConfig, BacktestFund, BacktestHarness, BacktestSample};
pub use correlation::{Correlation, pearson};
pub use quintile::{QUINTILES, QuintileBucket, QuintileSummary, quintile_buckets};
pub use report::{BacktestReport, HorizonSummary};
