//! Deep scoring with benchmark-relative and holdings inputs.
//!
//! Extends the market view with alpha, beta, VaR, monthly win rate,
//! information ratio and holdings concentration. An absent optional input
//! earns exactly half of its item; only an unknown star rating is omitted
//! and rescaled away.

use fundscore_traits::{FundRecord, FundScorer, QuantMetrics};
use serde::{Deserialize, Serialize};

use crate::classify::{Category, RiskTier, classify_category, resolve_risk_tier};
use crate::item::{DEEP_WEIGHTS, DimensionScore, Item, ItemScore, score_view};
use crate::model::{realized_volatility, table_fraction};
use crate::tables::{
    ALPHA_BREAKPOINTS, BenchmarkTable, DeepTable, HHI_BREAKPOINTS, INFORMATION_RATIO_BREAKPOINTS,
    PERIOD_WEIGHTS, PeriodWeights, TOP_HOLDINGS_BREAKPOINTS,
};

/// Fraction earned by an absent optional input.
pub const NEUTRAL_FRACTION: f64 = 0.5;

/// Output of [`DeepScoringModel::score`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeepScoreResult {
    /// Total score, 0-100.
    pub total_score: f64,
    /// Resolved category.
    pub category: Category,
    /// Resolved risk tier.
    pub risk_tier: RiskTier,
    /// Item contributions.
    pub items: Vec<ItemScore>,
    /// Dimension subtotals.
    pub dimensions: Vec<DimensionScore>,
}

/// Scoring model over performance, meta and [`QuantMetrics`].
#[derive(Debug, Clone, Copy)]
pub struct DeepScoringModel {
    periods: PeriodWeights,
}

impl Default for DeepScoringModel {
    fn default() -> Self {
        Self::new(PERIOD_WEIGHTS)
    }
}

impl DeepScoringModel {
    /// Create a model with the given period weights.
    pub const fn new(periods: PeriodWeights) -> Self {
        Self { periods }
    }

    /// Score a fund with its quantitative metrics.
    pub fn score(&self, fund: &FundRecord, quant: &QuantMetrics) -> DeepScoreResult {
        let category = classify_category(&fund.fund_type);
        let risk_tier = resolve_risk_tier(&fund.fund_type, realized_volatility(fund));
        let table = BenchmarkTable::for_category(category);
        let deep = DeepTable::for_category(category);

        let view = score_view(&DEEP_WEIGHTS, |item| {
            self.fraction(fund, quant, table, deep, item)
        });

        DeepScoreResult {
            total_score: view.total,
            category,
            risk_tier,
            items: view.items,
            dimensions: view.dimensions,
        }
    }

    fn fraction(
        &self,
        fund: &FundRecord,
        quant: &QuantMetrics,
        table: &BenchmarkTable,
        deep: &DeepTable,
        item: Item,
    ) -> Option<f64> {
        let direction = item.direction();
        let performance = &fund.performance;

        match item {
            Item::Return1y if performance.return_1y.is_none() => Some(NEUTRAL_FRACTION),
            Item::Return3y if performance.return_3y.is_none() => Some(NEUTRAL_FRACTION),
            Item::Alpha => or_neutral(quant.alpha, |v| ALPHA_BREAKPOINTS.fraction(v, direction)),
            Item::Var95 => or_neutral(quant.var95, |v| deep.var95.fraction(v, direction)),
            Item::Beta => or_neutral(quant.beta, |v| deep.beta_fraction(v)),
            Item::IndustryHhi => or_neutral(quant.hhi.filter(|h| *h >= 0.0), |v| {
                HHI_BREAKPOINTS.fraction(v, direction)
            }),
            Item::TopHoldings => or_neutral(quant.top_holdings_ratio, |v| {
                TOP_HOLDINGS_BREAKPOINTS.fraction(v, direction)
            }),
            Item::MonthlyWinRate => or_neutral(quant.monthly_win_rate, |v| {
                deep.monthly_win_rate.fraction(v, direction)
            }),
            Item::InformationRatio => or_neutral(quant.information_ratio, |v| {
                INFORMATION_RATIO_BREAKPOINTS.fraction(v, direction)
            }),
            Item::Sharpe
            | Item::Sortino
            | Item::Return1y
            | Item::Return3y
            | Item::Calmar
            | Item::MaxDrawdown
            | Item::Volatility
            | Item::StarRating
            | Item::Size
            | Item::ManagerTenure
            | Item::FeeRate => table_fraction(fund, table, &self.periods, item),
        }
    }
}

fn or_neutral(value: Option<f64>, score: impl FnOnce(f64) -> f64) -> Option<f64> {
    Some(value.map_or(NEUTRAL_FRACTION, score))
}

/// Scores with every quantitative input absent.
impl FundScorer for DeepScoringModel {
    fn name(&self) -> &str {
        "deep"
    }

    fn total_score(&self, fund: &FundRecord) -> f64 {
        self.score(fund, &QuantMetrics::default()).total_score
    }
}
