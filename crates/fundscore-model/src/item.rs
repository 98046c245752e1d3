//! Scored items, weight budgets and the view engine shared by both models.
//!
//! A view is a list of weighted items, each either scored with a fraction in
//! `[0, 1]` or omitted. Omitted items drop out and the remaining maxima are
//! rescaled so they still sum to 100.

use fundscore_traits::stats::{finite_or_zero, round1};
use serde::{Deserialize, Serialize};

use crate::tables::Direction;

/// Score dimension an item contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Return quality.
    Return,
    /// Risk control.
    Risk,
    /// Portfolio concentration.
    Holdings,
    /// Consistency of results.
    Stability,
    /// Non-metric factors: rating, size, tenure and fees.
    Overall,
}

/// A scored item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    /// Sharpe ratio, period-combined.
    Sharpe,
    /// Sortino ratio, period-combined.
    Sortino,
    /// Trailing one-year return.
    Return1y,
    /// Trailing three-year return.
    Return3y,
    /// Annualized regression alpha.
    Alpha,
    /// Calmar ratio, period-combined.
    Calmar,
    /// Maximum drawdown, period-combined.
    MaxDrawdown,
    /// Annualized volatility, period-combined.
    Volatility,
    /// Historical 95% VaR.
    Var95,
    /// Beta against the category's ideal range.
    Beta,
    /// Industry concentration.
    IndustryHhi,
    /// Weight of the largest positions.
    TopHoldings,
    /// Share of positive months.
    MonthlyWinRate,
    /// Information ratio.
    InformationRatio,
    /// Third-party star rating.
    StarRating,
    /// Fund size.
    Size,
    /// Tenure of the current manager.
    ManagerTenure,
    /// Total annual fee rate.
    FeeRate,
}

impl Item {
    /// Stable identifier used in reports.
    #[must_use]
    pub const fn name(&self) -> &str {
        match self {
            Self::Sharpe => "sharpe",
            Self::Sortino => "sortino",
            Self::Return1y => "return_1y",
            Self::Return3y => "return_3y",
            Self::Alpha => "alpha",
            Self::Calmar => "calmar",
            Self::MaxDrawdown => "max_drawdown",
            Self::Volatility => "volatility",
            Self::Var95 => "var95",
            Self::Beta => "beta",
            Self::IndustryHhi => "industry_hhi",
            Self::TopHoldings => "top_holdings",
            Self::MonthlyWinRate => "monthly_win_rate",
            Self::InformationRatio => "information_ratio",
            Self::StarRating => "star_rating",
            Self::Size => "size",
            Self::ManagerTenure => "manager_tenure",
            Self::FeeRate => "fee_rate",
        }
    }

    /// Dimension the item belongs to.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        match self {
            Self::Sharpe | Self::Sortino | Self::Return1y | Self::Return3y | Self::Alpha => {
                Dimension::Return
            }
            Self::Calmar | Self::MaxDrawdown | Self::Volatility | Self::Var95 | Self::Beta => {
                Dimension::Risk
            }
            Self::IndustryHhi | Self::TopHoldings => Dimension::Holdings,
            Self::MonthlyWinRate | Self::InformationRatio => Dimension::Stability,
            Self::StarRating | Self::Size | Self::ManagerTenure | Self::FeeRate => {
                Dimension::Overall
            }
        }
    }

    /// Scoring direction of the underlying metric.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        match self {
            Self::MaxDrawdown
            | Self::Volatility
            | Self::Var95
            | Self::IndustryHhi
            | Self::TopHoldings
            | Self::FeeRate => Direction::LowerIsBetter,
            _ => Direction::HigherIsBetter,
        }
    }
}

/// Nominal item weights of the market model; they sum to 100.
pub const MARKET_WEIGHTS: [(Item, f64); 11] = [
    (Item::Sharpe, 12.0),
    (Item::Sortino, 5.0),
    (Item::Return1y, 8.0),
    (Item::Return3y, 10.0),
    (Item::Calmar, 10.0),
    (Item::MaxDrawdown, 18.0),
    (Item::Volatility, 7.0),
    (Item::StarRating, 8.0),
    (Item::Size, 8.0),
    (Item::ManagerTenure, 8.0),
    (Item::FeeRate, 6.0),
];

/// Nominal item weights of the deep model; they sum to 100.
pub const DEEP_WEIGHTS: [(Item, f64); 18] = [
    (Item::Sharpe, 8.0),
    (Item::Sortino, 4.0),
    (Item::Return1y, 5.0),
    (Item::Return3y, 6.0),
    (Item::Alpha, 7.0),
    (Item::Calmar, 6.0),
    (Item::MaxDrawdown, 10.0),
    (Item::Volatility, 5.0),
    (Item::Var95, 5.0),
    (Item::Beta, 4.0),
    (Item::IndustryHhi, 8.0),
    (Item::TopHoldings, 7.0),
    (Item::MonthlyWinRate, 5.0),
    (Item::InformationRatio, 5.0),
    (Item::StarRating, 4.0),
    (Item::Size, 4.0),
    (Item::ManagerTenure, 4.0),
    (Item::FeeRate, 3.0),
];

/// One item's contribution to a view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemScore {
    /// Which item.
    pub item: Item,
    /// Dimension of the item.
    pub dimension: Dimension,
    /// Points earned, rounded to 1 decimal.
    pub earned: f64,
    /// Maximum points after rescaling, rounded to 1 decimal.
    pub max: f64,
}

/// Subtotal of one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    /// Which dimension.
    pub dimension: Dimension,
    /// Points earned, rounded to 1 decimal.
    pub earned: f64,
    /// Maximum points, rounded to 1 decimal.
    pub max: f64,
}

/// Result of scoring one view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Contributions of the items that were not omitted, rounded to 1 decimal.
    pub items: Vec<ItemScore>,
    /// Per-dimension subtotals, in first-appearance order.
    pub dimensions: Vec<DimensionScore>,
    /// Sum of earned points, rounded to 1 decimal.
    pub total: f64,
}

/// Subtotals over unrounded items, rounded once at the end.
fn subtotals(items: &[ItemScore]) -> Vec<DimensionScore> {
    let mut out: Vec<DimensionScore> = Vec::new();
    for item in items {
        match out.iter_mut().find(|d| d.dimension == item.dimension) {
            Some(d) => {
                d.earned += item.earned;
                d.max += item.max;
            }
            None => out.push(DimensionScore {
                dimension: item.dimension,
                earned: item.earned,
                max: item.max,
            }),
        }
    }
    for d in &mut out {
        d.earned = round1(d.earned);
        d.max = round1(d.max);
    }
    out
}

/// Score a view.
///
/// `fraction` returns the earned fraction of each item, or `None` to omit it.
/// Fractions are clamped to `[0, 1]` and non-finite ones count as 0. Each
/// remaining item's maximum is its weight times `100 / Σ remaining weights`.
/// The total and the subtotals are summed before rounding.
///
/// # Example
///
/// ```
/// use fundscore_model::{Item, score_view};
///
/// let weights = [(Item::Sharpe, 30.0), (Item::StarRating, 10.0)];
/// let view = score_view(&weights, |item| match item {
///     Item::Sharpe => Some(0.5),
///     _ => None,
/// });
/// assert_eq!(view.items.len(), 1);
/// assert_eq!(view.items[0].max, 100.0);
/// assert_eq!(view.total, 50.0);
/// ```
pub fn score_view(weights: &[(Item, f64)], fraction: impl Fn(Item) -> Option<f64>) -> View {
    let scored: Vec<(Item, f64, f64)> = weights
        .iter()
        .filter_map(|(item, weight)| fraction(*item).map(|f| (*item, *weight, f)))
        .collect();

    let available: f64 = scored.iter().map(|(_, w, _)| w).sum();
    if available <= 0.0 {
        return View::default();
    }
    let scale = 100.0 / available;

    let mut items: Vec<ItemScore> = scored
        .into_iter()
        .map(|(item, weight, f)| {
            let max = weight * scale;
            ItemScore {
                item,
                dimension: item.dimension(),
                earned: max * finite_or_zero(f).clamp(0.0, 1.0),
                max,
            }
        })
        .collect();
    let total = round1(items.iter().map(|i| i.earned).sum::<f64>()).max(0.0);
    let dimensions = subtotals(&items);

    for item in &mut items {
        item.earned = round1(item.earned);
        item.max = round1(item.max);
    }

    View {
        items,
        dimensions,
        total,
    }
}
