//! Risk, return and concentration analytics for fundscore.
//!
//! - [`timeseries`]: windowed statistics over a NAV series (drawdown,
//!   volatility, Sharpe, Sortino, Calmar, trailing returns)
//! - [`relative`]: benchmark-relative analytics on date-aligned returns
//! - [`holdings`]: top-N and industry concentration
//! - [`quant`]: assembly of the optional [`QuantMetrics`] record
//!
//! All functions are pure and total. Degenerate input resolves to 0 or `None`.
//!
//! # Example
//!
//! ```
//! use fundscore_metrics::multi_period_metrics;
//! use fundscore_traits::{Date, NavPoint};
//!
//! let start = Date::from_ymd_opt(2021, 1, 1).unwrap();
//! let points: Vec<NavPoint> = (0..800)
//!     .map(|i| {
//!         let nav = 1.0 + i as f64 * 0.0005;
//!         NavPoint::new(start + chrono::TimeDelta::days(i), nav, nav)
//!     })
//!     .collect();
//!
//! let breakdown = multi_period_metrics(&points, None);
//! assert!(breakdown.year1.is_some());
//! assert!(breakdown.year3.is_none());
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod holdings;
pub mod quant;
pub mod relative;
pub mod timeseries;

pub use fundscore_traits::QuantMetrics;
pub use holdings::{industry_hhi, top_n_concentration};
pub use quant::{QuantAnalyzer, QuantConfig};
pub use relative::{AlignedReturn, AlphaBeta, align_returns, alpha_beta};
pub use timeseries::{multi_period_metrics, slice_window, trailing_return, window_metrics};
