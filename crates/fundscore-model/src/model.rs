//! Market and risk-tier scoring of a fund record.
//!
//! [`ScoringModel`] scores the same record twice through [`score_view`]:
//! once against its category's market table and once against its risk
//! tier's benchmark. Only the market score carries the momentum penalty.

use fundscore_traits::stats::{finite_or_zero, round1};
use fundscore_traits::{FundRecord, FundScorer};
use serde::{Deserialize, Serialize};

use crate::classify::{Category, RiskTier, classify_category, resolve_risk_tier};
use crate::item::{DimensionScore, Item, ItemScore, MARKET_WEIGHTS, score_view};
use crate::lookup::{fee_fraction, rating_fraction, size_fraction, tenure_fraction};
use crate::tables::{BenchmarkTable, PERIOD_WEIGHTS, PeriodWeights, TierBenchmark};

/// One-year return (percent) above which the small penalty applies.
pub const MOMENTUM_THRESHOLD_LOW: f64 = 30.0;
/// One-year return (percent) above which the large penalty applies.
pub const MOMENTUM_THRESHOLD_HIGH: f64 = 50.0;
/// Points deducted above [`MOMENTUM_THRESHOLD_LOW`].
pub const MOMENTUM_PENALTY_LOW: f64 = 3.0;
/// Points deducted above [`MOMENTUM_THRESHOLD_HIGH`].
pub const MOMENTUM_PENALTY_HIGH: f64 = 5.0;

/// Points deducted from the market score for a trailing one-year return
/// (percent) that suggests a coming reversal.
pub fn momentum_penalty(return_1y: f64) -> f64 {
    let return_1y = finite_or_zero(return_1y);
    if return_1y > MOMENTUM_THRESHOLD_HIGH {
        MOMENTUM_PENALTY_HIGH
    } else if return_1y > MOMENTUM_THRESHOLD_LOW {
        MOMENTUM_PENALTY_LOW
    } else {
        0.0
    }
}

/// Output of [`ScoringModel::score`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Market score after the momentum penalty, 0-100.
    pub market_score: f64,
    /// Risk-tier score, 0-100.
    pub tier_score: f64,
    /// Resolved risk tier.
    pub risk_tier: RiskTier,
    /// Resolved category.
    pub category: Category,
    /// Points deducted from the market score.
    pub momentum_penalty: f64,
    /// Market view item contributions.
    pub market_items: Vec<ItemScore>,
    /// Tier view item contributions.
    pub tier_items: Vec<ItemScore>,
    /// Market view dimension subtotals.
    pub market_dimensions: Vec<DimensionScore>,
}

/// Category- and risk-tier-aware scoring model.
///
/// # Example
///
/// ```
/// use fundscore_model::{Category, ScoringModel};
/// use fundscore_traits::FundRecord;
///
/// let mut fund = FundRecord::default();
/// fund.fund_type = "股票型".to_string();
/// fund.performance.return_1y = Some(60.0);
///
/// let result = ScoringModel::default().score(&fund);
/// assert_eq!(result.category, Category::Equity);
/// assert_eq!(result.momentum_penalty, 5.0);
/// assert!(result.market_score >= 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScoringModel {
    periods: PeriodWeights,
}

impl Default for ScoringModel {
    fn default() -> Self {
        Self::new(PERIOD_WEIGHTS)
    }
}

impl ScoringModel {
    /// Create a model with the given period weights.
    pub const fn new(periods: PeriodWeights) -> Self {
        Self { periods }
    }

    /// Score a fund in both views.
    pub fn score(&self, fund: &FundRecord) -> ScoreResult {
        let category = classify_category(&fund.fund_type);
        let risk_tier = resolve_risk_tier(&fund.fund_type, realized_volatility(fund));

        let market_table = BenchmarkTable::for_category(category);
        let tier_table = TierBenchmark::for_tier(risk_tier).table();

        let market = score_view(&MARKET_WEIGHTS, |item| {
            table_fraction(fund, market_table, &self.periods, item)
        });
        let tier = score_view(&MARKET_WEIGHTS, |item| {
            table_fraction(fund, &tier_table, &self.periods, item)
        });

        let momentum_penalty = momentum_penalty(fund.performance.return_1y.unwrap_or(0.0));

        ScoreResult {
            market_score: penalized(market.total, momentum_penalty),
            tier_score: tier.total,
            risk_tier,
            category,
            momentum_penalty,
            market_items: market.items,
            tier_items: tier.items,
            market_dimensions: market.dimensions,
        }
    }
}

impl FundScorer for ScoringModel {
    fn name(&self) -> &str {
        "market"
    }

    fn total_score(&self, fund: &FundRecord) -> f64 {
        self.score(fund).market_score
    }
}

fn penalized(total: f64, penalty: f64) -> f64 {
    round1(total - penalty).max(0.0)
}

/// Volatility used for risk tier resolution: trailing year when covered,
/// otherwise the full history.
pub(crate) fn realized_volatility(fund: &FundRecord) -> f64 {
    let breakdown = &fund.performance.breakdown;
    breakdown.year1.unwrap_or(breakdown.all).volatility
}

/// Earned fraction of a table-driven or lookup item, `None` when the table
/// omits it.
///
/// Missing trailing returns are scored as 0.
pub(crate) fn table_fraction(
    fund: &FundRecord,
    table: &BenchmarkTable,
    periods: &PeriodWeights,
    item: Item,
) -> Option<f64> {
    let breakdown = &fund.performance.breakdown;
    let direction = item.direction();
    let meta = &fund.meta;

    match item {
        Item::Sharpe => table
            .sharpe
            .map(|bp| periods.combine(breakdown, |m| m.sharpe_ratio, &bp, direction)),
        Item::Sortino => table
            .sortino
            .map(|bp| periods.combine(breakdown, |m| m.sortino_ratio, &bp, direction)),
        Item::Calmar => table
            .calmar
            .map(|bp| periods.combine(breakdown, |m| m.calmar_ratio, &bp, direction)),
        Item::MaxDrawdown => table
            .max_drawdown
            .map(|bp| periods.combine(breakdown, |m| m.max_drawdown, &bp, direction)),
        Item::Volatility => table
            .volatility
            .map(|bp| periods.combine(breakdown, |m| m.volatility, &bp, direction)),
        Item::Return1y => table
            .return_1y
            .map(|bp| bp.fraction(fund.performance.return_1y.unwrap_or(0.0), direction)),
        Item::Return3y => table
            .return_3y
            .map(|bp| bp.fraction(fund.performance.return_3y.unwrap_or(0.0), direction)),
        Item::StarRating => table
            .scores_overall
            .then(|| rating_fraction(meta.star_rating))
            .flatten(),
        Item::Size => table.scores_overall.then(|| size_fraction(meta.size)),
        Item::ManagerTenure => table
            .scores_overall
            .then(|| tenure_fraction(meta.manager_tenure_years)),
        Item::FeeRate => table.scores_overall.then(|| fee_fraction(meta.fee_rate)),
        Item::Alpha
        | Item::Var95
        | Item::Beta
        | Item::IndustryHhi
        | Item::TopHoldings
        | Item::MonthlyWinRate
        | Item::InformationRatio => None,
    }
}
