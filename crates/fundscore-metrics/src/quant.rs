//! Assembly of the optional quantitative metrics for one fund.
//!
//! [`QuantAnalyzer`] runs whichever analytics have inputs. Anything that
//! cannot be computed from the data at hand stays `None` rather than being
//! reported as a zero.

use fundscore_traits::{BenchmarkPoint, Holdings, NavPoint, QuantMetrics};
use serde::{Deserialize, Serialize};

use crate::holdings::{DEFAULT_TOP_N, NO_INDUSTRY_DATA, industry_hhi, top_n_concentration};
use crate::relative::{
    AlignedReturn, MIN_SAMPLES, align_returns, alpha_beta_aligned, downside_capture_ratio,
    historical_cvar, historical_var, information_ratio, treynor_ratio,
};
use crate::timeseries::{
    MIN_MONTHS, MIN_POINTS, annualized_return, daily_returns, monthly_returns, monthly_win_rate,
};

/// Configuration for [`QuantAnalyzer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantConfig {
    /// Confidence level for VaR and CVaR.
    pub var_confidence: f64,
    /// Number of stock positions summed for the top holdings ratio.
    pub top_n: usize,
}

impl Default for QuantConfig {
    fn default() -> Self {
        Self {
            var_confidence: 0.95,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Computes [`QuantMetrics`] from a NAV series and optional benchmark and
/// holdings.
#[derive(Debug, Clone, Default)]
pub struct QuantAnalyzer {
    config: QuantConfig,
}

impl QuantAnalyzer {
    /// Create an analyzer with the given configuration.
    pub const fn new(config: QuantConfig) -> Self {
        Self { config }
    }

    /// The analyzer's configuration.
    pub const fn config(&self) -> &QuantConfig {
        &self.config
    }

    /// Run every analytic that has sufficient input.
    ///
    /// # Example
    ///
    /// ```
    /// use fundscore_metrics::quant::QuantAnalyzer;
    ///
    /// let metrics = QuantAnalyzer::default().analyze(&[], None, None);
    /// assert!(metrics.alpha.is_none());
    /// assert!(metrics.cagr.is_none());
    /// ```
    pub fn analyze(
        &self,
        points: &[NavPoint],
        benchmark: Option<&[BenchmarkPoint]>,
        holdings: Option<&Holdings>,
    ) -> QuantMetrics {
        let mut metrics = QuantMetrics::default();
        self.fill_series(&mut metrics, points);
        if let Some(benchmark) = benchmark {
            fill_relative(&mut metrics, &align_returns(points, benchmark));
        }
        if let Some(holdings) = holdings {
            self.fill_holdings(&mut metrics, holdings);
        }
        metrics
    }

    fn fill_series(&self, metrics: &mut QuantMetrics, points: &[NavPoint]) {
        if points.len() >= MIN_POINTS {
            metrics.cagr = Some(annualized_return(points));
        }

        let returns = daily_returns(points);
        if returns.len() >= MIN_SAMPLES {
            metrics.var95 = Some(historical_var(&returns, self.config.var_confidence));
            metrics.cvar95 = Some(historical_cvar(&returns, self.config.var_confidence));
        }

        if monthly_returns(points).len() >= MIN_MONTHS {
            metrics.monthly_win_rate = Some(monthly_win_rate(points));
        }
    }

    fn fill_holdings(&self, metrics: &mut QuantMetrics, holdings: &Holdings) {
        let hhi = industry_hhi(holdings);
        metrics.hhi = (hhi != NO_INDUSTRY_DATA).then_some(hhi);
        metrics.top_holdings_ratio = (!holdings.top_stocks.is_empty())
            .then(|| top_n_concentration(holdings, self.config.top_n));
    }
}

fn fill_relative(metrics: &mut QuantMetrics, aligned: &[AlignedReturn]) {
    if aligned.len() < MIN_SAMPLES {
        tracing::debug!(
            aligned = aligned.len(),
            "too few aligned returns for relative metrics"
        );
        return;
    }

    let fit = alpha_beta_aligned(aligned);
    metrics.alpha = Some(fit.alpha);
    metrics.beta = Some(fit.beta);
    metrics.information_ratio = Some(information_ratio(aligned));

    if aligned.iter().any(|a| a.benchmark < 0.0) {
        metrics.downside_capture_ratio = Some(downside_capture_ratio(aligned));
    }
    if fit.beta != 0.0 {
        metrics.treynor_ratio = metrics.cagr.map(|cagr| treynor_ratio(cagr, fit.beta));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{daily_benchmark, daily_series};
    use fundscore_traits::HoldingWeight;

    fn wiggle(i: usize) -> f64 {
        if i % 2 == 0 { 0.004 } else { -0.003 }
    }

    fn tracking_pair(n: usize) -> (Vec<NavPoint>, Vec<BenchmarkPoint>) {
        let mut fund = 1.0;
        let mut bench = 1.0;
        let mut fund_levels = vec![fund];
        let mut bench_levels = vec![bench];
        for i in 1..n {
            bench *= 1.0 + wiggle(i);
            fund *= 1.0 + 0.8 * wiggle(i) + 0.0002;
            fund_levels.push(fund);
            bench_levels.push(bench);
        }
        (
            daily_series(n, |i| fund_levels[i]),
            daily_benchmark(n, |i| bench_levels[i] * 3000.0),
        )
    }

    #[test]
    fn test_series_only() {
        let (points, _) = tracking_pair(120);
        let metrics = QuantAnalyzer::default().analyze(&points, None, None);

        assert!(metrics.cagr.is_some());
        assert!(metrics.var95.is_some());
        assert!(metrics.cvar95.is_some());
        assert!(metrics.monthly_win_rate.is_some());
        assert!(metrics.alpha.is_none());
        assert!(metrics.beta.is_none());
        assert!(metrics.treynor_ratio.is_none());
        assert!(metrics.hhi.is_none());
        assert!(metrics.top_holdings_ratio.is_none());
    }

    #[test]
    fn test_with_benchmark() {
        let (points, benchmark) = tracking_pair(120);
        let metrics = QuantAnalyzer::default().analyze(&points, Some(&benchmark), None);

        let beta = metrics.beta.unwrap();
        assert!((beta - 0.8).abs() < 0.01, "beta = {beta}");
        assert!(metrics.alpha.unwrap() > 0.0);
        assert!(metrics.treynor_ratio.is_some());
        assert!(metrics.downside_capture_ratio.is_some());
        assert!(metrics.information_ratio.is_some());
    }

    #[test]
    fn test_short_overlap_leaves_relative_empty() {
        let (points, benchmark) = tracking_pair(120);
        let metrics = QuantAnalyzer::default().analyze(&points, Some(&benchmark[..20]), None);
        assert!(metrics.alpha.is_none());
        assert!(metrics.beta.is_none());
    }

    #[test]
    fn test_short_series() {
        let points = daily_series(5, |i| 1.0 + i as f64 * 0.01);
        let metrics = QuantAnalyzer::default().analyze(&points, None, None);
        assert_eq!(metrics, QuantMetrics::default());
    }

    #[test]
    fn test_holdings() {
        let holdings = Holdings {
            top_stocks: vec![HoldingWeight::new("A", 8.0), HoldingWeight::new("B", 6.0)],
            industries: vec![],
        };
        let metrics = QuantAnalyzer::default().analyze(&[], None, Some(&holdings));
        assert_eq!(metrics.top_holdings_ratio, Some(14.0));
        assert!(metrics.hhi.is_none());
    }
}
