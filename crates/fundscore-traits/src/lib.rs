#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core data model for the fundscore engine.
//!
//! This crate provides the records exchanged between the metric crates, the
//! scoring models and the backtest harness, plus the numeric helpers that keep
//! non-finite values out of emitted results.

/// The version of the fundscore-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod frame;
pub mod scorer;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{FundscoreError, Result};
pub use scorer::FundScorer;
pub use types::{
    BenchmarkPoint, BenchmarkSeries, Date, FundMeta, FundPerformance, FundRecord, HoldingWeight,
    Holdings, NavPoint, NavSeries, Period, PeriodRiskBreakdown, PeriodRiskMetrics, QuantMetrics,
};
