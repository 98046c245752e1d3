//! Aggregation of backtest samples into per-horizon summaries.

use fundscore_traits::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::backtest::BacktestSample;
use crate::correlation::Correlation;
use crate::quintile::QuintileSummary;

/// Score predictiveness for one forward horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonSummary {
    /// Horizon in calendar days.
    pub horizon_days: u32,
    /// Score/return correlation.
    pub correlation: Correlation,
    /// Quintile buckets with spread.
    pub quintiles: QuintileSummary,
}

/// Result of a backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    /// One summary per configured horizon, in configuration order.
    pub horizons: Vec<HorizonSummary>,
    /// Every retained sample.
    pub samples: Vec<BacktestSample>,
}

impl BacktestReport {
    /// Summarize `samples` for each horizon.
    ///
    /// `forward_returns[i]` of each sample belongs to `horizons_days[i]`.
    pub fn from_samples(horizons_days: Vec<u32>, samples: Vec<BacktestSample>) -> Self {
        let scores: Vec<f64> = samples.iter().map(|s| s.score).collect();

        let horizons = horizons_days
            .into_iter()
            .enumerate()
            .map(|(i, horizon_days)| {
                let returns: Vec<f64> = samples
                    .iter()
                    .map(|s| s.forward_returns.get(i).copied().unwrap_or(f64::NAN))
                    .collect();
                let pairs: Vec<(f64, f64)> = scores
                    .iter()
                    .copied()
                    .zip(returns.iter().copied())
                    .collect();

                HorizonSummary {
                    horizon_days,
                    correlation: Correlation::compute(&scores, &returns),
                    quintiles: QuintileSummary::from_pairs(&pairs),
                }
            })
            .collect();

        Self { horizons, samples }
    }

    /// Summary for `horizon_days`, if configured.
    pub fn horizon(&self, horizon_days: u32) -> Option<&HorizonSummary> {
        self.horizons
            .iter()
            .find(|h| h.horizon_days == horizon_days)
    }

    /// Samples in long format, one row per sample and horizon.
    ///
    /// Columns: `fund_code`, `eval_date` (`YYYY-MM-DD`), `score`,
    /// `horizon_days`, `forward_return`. Unevaluable returns are null.
    ///
    /// # Errors
    ///
    /// Returns an error if polars rejects the columns.
    pub fn samples_frame(&self) -> Result<DataFrame> {
        let rows = self.samples.len() * self.horizons.len();
        let mut fund_code = Vec::with_capacity(rows);
        let mut eval_date = Vec::with_capacity(rows);
        let mut score = Vec::with_capacity(rows);
        let mut horizon_days = Vec::with_capacity(rows);
        let mut forward_return = Vec::with_capacity(rows);

        for sample in &self.samples {
            let date = sample.eval_date.format("%Y-%m-%d").to_string();
            for (i, horizon) in self.horizons.iter().enumerate() {
                fund_code.push(sample.fund_code.clone());
                eval_date.push(date.clone());
                score.push(sample.score);
                horizon_days.push(horizon.horizon_days);
                forward_return.push(
                    sample
                        .forward_returns
                        .get(i)
                        .copied()
                        .filter(|r| r.is_finite()),
                );
            }
        }

        let df = df! {
            "fund_code" => fund_code,
            "eval_date" => eval_date,
            "score" => score,
            "horizon_days" => horizon_days,
            "forward_return" => forward_return,
        }?;
        Ok(df)
    }
}
