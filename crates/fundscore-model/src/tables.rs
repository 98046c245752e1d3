//! Benchmark tables and piecewise scoring.
//!
//! Every table is `const` data. A [`Breakpoints`] maps a metric value to the
//! fraction of its item's maximum that the value earns.

use fundscore_traits::stats::finite_or_zero;
use fundscore_traits::{PeriodRiskBreakdown, PeriodRiskMetrics};
use serde::{Deserialize, Serialize};

use crate::classify::{Category, RiskTier};

/// Fraction earned at or beyond the `full` breakpoint.
pub const FULL: f64 = 1.0;
/// Fraction earned at or beyond the `high` breakpoint.
pub const HIGH: f64 = 0.8;
/// Fraction earned at or beyond the `mid` breakpoint.
pub const MID: f64 = 0.6;
/// Fraction earned at or beyond the `low` breakpoint.
pub const LOW: f64 = 0.33;
/// Floor for lower-is-better values beyond the `low` breakpoint.
pub const LOWER_FLOOR: f64 = 0.13;

/// Whether larger metric values are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Returns, ratios, win rates.
    HigherIsBetter,
    /// Drawdown, volatility, VaR, concentration.
    LowerIsBetter,
}

/// Four breakpoints from best (`full`) to worst (`low`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    /// Value earning the full item.
    pub full: f64,
    /// Value earning 80%.
    pub high: f64,
    /// Value earning 60%.
    pub mid: f64,
    /// Value earning 33%.
    pub low: f64,
}

impl Breakpoints {
    /// Create a new set of breakpoints.
    pub const fn new(full: f64, high: f64, mid: f64, low: f64) -> Self {
        Self {
            full,
            high,
            mid,
            low,
        }
    }

    /// Fraction (0-1) of an item's maximum earned by `value`.
    ///
    /// Non-finite values are scored as 0.
    ///
    /// # Example
    ///
    /// ```
    /// use fundscore_model::{Breakpoints, Direction};
    ///
    /// let sharpe = Breakpoints::new(1.5, 1.0, 0.5, 0.2);
    /// assert_eq!(sharpe.fraction(1.2, Direction::HigherIsBetter), 0.8);
    /// assert_eq!(sharpe.fraction(0.0, Direction::HigherIsBetter), 0.0);
    /// ```
    #[must_use]
    pub fn fraction(&self, value: f64, direction: Direction) -> f64 {
        let value = finite_or_zero(value);
        match direction {
            Direction::HigherIsBetter => self.higher_is_better(value),
            Direction::LowerIsBetter => self.lower_is_better(value),
        }
    }

    fn higher_is_better(&self, value: f64) -> f64 {
        if value >= self.full {
            FULL
        } else if value >= self.high {
            HIGH
        } else if value >= self.mid {
            MID
        } else if value >= self.low {
            LOW
        } else if self.low <= 0.0 {
            0.0
        } else {
            (LOW * value / self.low).max(0.0)
        }
    }

    fn lower_is_better(&self, value: f64) -> f64 {
        if value <= self.full {
            FULL
        } else if value <= self.high {
            HIGH
        } else if value <= self.mid {
            MID
        } else if value <= self.low {
            LOW
        } else {
            (LOW * self.low / value).max(LOWER_FLOOR)
        }
    }
}

/// Period weights used to combine year1, year3 and full-history scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodWeights {
    /// Trailing one year.
    pub year1: f64,
    /// Trailing three years.
    pub year3: f64,
    /// Full history.
    pub all: f64,
}

/// Default period weights.
pub const PERIOD_WEIGHTS: PeriodWeights = PeriodWeights {
    year1: 0.4,
    year3: 0.3,
    all: 0.3,
};

impl PeriodWeights {
    /// Weighted fraction over the periods present in `breakdown`.
    ///
    /// Weights are renormalized over the present periods, so a missing year3
    /// window does not drag the result down.
    pub fn combine(
        &self,
        breakdown: &PeriodRiskBreakdown,
        metric: impl Fn(&PeriodRiskMetrics) -> f64,
        breakpoints: &Breakpoints,
        direction: Direction,
    ) -> f64 {
        let weighted = [
            (self.year1, breakdown.year1),
            (self.year3, breakdown.year3),
            (self.all, Some(breakdown.all)),
        ];

        let (sum, total_weight) = weighted
            .iter()
            .filter_map(|(w, m)| m.as_ref().map(|m| (*w, m)))
            .fold((0.0, 0.0), |(sum, tw), (w, m)| {
                (sum + w * breakpoints.fraction(metric(m), direction), tw + w)
            });

        if total_weight > 0.0 { sum / total_weight } else { 0.0 }
    }
}

/// Breakpoints per performance metric for one view.
///
/// A `None` entry removes that metric from the view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkTable {
    /// Trailing one-year return, percent.
    pub return_1y: Option<Breakpoints>,
    /// Trailing three-year return, percent.
    pub return_3y: Option<Breakpoints>,
    /// Sharpe ratio.
    pub sharpe: Option<Breakpoints>,
    /// Sortino ratio.
    pub sortino: Option<Breakpoints>,
    /// Calmar ratio.
    pub calmar: Option<Breakpoints>,
    /// Maximum drawdown, percent.
    pub max_drawdown: Option<Breakpoints>,
    /// Annualized volatility, percent.
    pub volatility: Option<Breakpoints>,
    /// Whether the lookup-scored overall items take part in this view.
    pub scores_overall: bool,
}

/// Equity benchmark table.
pub const EQUITY_TABLE: BenchmarkTable = BenchmarkTable {
    return_1y: Some(Breakpoints::new(30.0, 15.0, 5.0, 0.0)),
    return_3y: Some(Breakpoints::new(60.0, 30.0, 10.0, 0.0)),
    sharpe: Some(Breakpoints::new(1.5, 1.0, 0.5, 0.2)),
    sortino: Some(Breakpoints::new(2.0, 1.4, 0.8, 0.3)),
    calmar: Some(Breakpoints::new(1.5, 1.0, 0.5, 0.2)),
    max_drawdown: Some(Breakpoints::new(15.0, 25.0, 35.0, 50.0)),
    volatility: Some(Breakpoints::new(15.0, 20.0, 25.0, 32.0)),
    scores_overall: true,
};

/// Balanced benchmark table.
pub const BALANCED_TABLE: BenchmarkTable = BenchmarkTable {
    return_1y: Some(Breakpoints::new(20.0, 10.0, 4.0, 0.0)),
    return_3y: Some(Breakpoints::new(40.0, 20.0, 8.0, 0.0)),
    sharpe: Some(Breakpoints::new(1.5, 1.0, 0.6, 0.3)),
    sortino: Some(Breakpoints::new(2.0, 1.5, 0.9, 0.4)),
    calmar: Some(Breakpoints::new(1.8, 1.2, 0.6, 0.3)),
    max_drawdown: Some(Breakpoints::new(10.0, 18.0, 28.0, 40.0)),
    volatility: Some(Breakpoints::new(10.0, 15.0, 20.0, 26.0)),
    scores_overall: true,
};

/// Bond benchmark table.
pub const BOND_TABLE: BenchmarkTable = BenchmarkTable {
    return_1y: Some(Breakpoints::new(6.0, 4.0, 2.5, 1.0)),
    return_3y: Some(Breakpoints::new(15.0, 10.0, 6.0, 3.0)),
    sharpe: Some(Breakpoints::new(2.5, 1.8, 1.0, 0.5)),
    sortino: Some(Breakpoints::new(3.0, 2.2, 1.3, 0.6)),
    calmar: Some(Breakpoints::new(3.0, 2.0, 1.0, 0.5)),
    max_drawdown: Some(Breakpoints::new(1.5, 3.0, 5.0, 8.0)),
    volatility: Some(Breakpoints::new(1.5, 3.0, 5.0, 8.0)),
    scores_overall: true,
};

impl BenchmarkTable {
    /// The market table for a category.
    pub const fn for_category(category: Category) -> &'static Self {
        match category {
            Category::Bond => &BOND_TABLE,
            Category::Balanced => &BALANCED_TABLE,
            Category::Equity => &EQUITY_TABLE,
        }
    }
}

/// Expected Sharpe, one-year return and drawdown for a risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBenchmark {
    /// Expected Sharpe ratio.
    pub sharpe: f64,
    /// Expected one-year return, percent.
    pub return_1y: f64,
    /// Tolerated maximum drawdown, percent.
    pub max_drawdown: f64,
}

/// Tier benchmarks in [`RiskTier::ALL`] order.
pub const TIER_BENCHMARKS: [TierBenchmark; 5] = [
    TierBenchmark {
        sharpe: 2.0,
        return_1y: 2.0,
        max_drawdown: 0.5,
    },
    TierBenchmark {
        sharpe: 1.5,
        return_1y: 4.0,
        max_drawdown: 3.0,
    },
    TierBenchmark {
        sharpe: 1.0,
        return_1y: 8.0,
        max_drawdown: 10.0,
    },
    TierBenchmark {
        sharpe: 0.8,
        return_1y: 12.0,
        max_drawdown: 20.0,
    },
    TierBenchmark {
        sharpe: 0.6,
        return_1y: 15.0,
        max_drawdown: 30.0,
    },
];

const fn higher_around(value: f64) -> Breakpoints {
    Breakpoints::new(value * 1.5, value, value * 0.6, value * 0.3)
}

const fn lower_around(value: f64) -> Breakpoints {
    Breakpoints::new(value * 0.6, value, value * 1.5, value * 2.0)
}

impl TierBenchmark {
    /// The benchmark for a risk tier.
    pub const fn for_tier(tier: RiskTier) -> Self {
        TIER_BENCHMARKS[tier as usize]
    }

    /// Breakpoint table with each value as the `high` breakpoint.
    ///
    /// Only Sharpe, one-year return and drawdown are populated.
    pub const fn table(&self) -> BenchmarkTable {
        BenchmarkTable {
            return_1y: Some(higher_around(self.return_1y)),
            return_3y: None,
            sharpe: Some(higher_around(self.sharpe)),
            sortino: None,
            calmar: None,
            max_drawdown: Some(lower_around(self.max_drawdown)),
            volatility: None,
            scores_overall: false,
        }
    }
}

/// Breakpoints and ideal ranges for the deep model's extra inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeepTable {
    /// Daily 95% VaR, percent (lower is better).
    pub var95: Breakpoints,
    /// Monthly win rate, percent.
    pub monthly_win_rate: Breakpoints,
    /// Inclusive ideal beta range.
    pub beta_range: (f64, f64),
}

/// Annualized alpha, percent.
pub const ALPHA_BREAKPOINTS: Breakpoints = Breakpoints::new(8.0, 4.0, 1.0, 0.0);
/// Information ratio.
pub const INFORMATION_RATIO_BREAKPOINTS: Breakpoints = Breakpoints::new(1.0, 0.5, 0.2, 0.0);
/// Industry HHI (lower is better).
pub const HHI_BREAKPOINTS: Breakpoints = Breakpoints::new(0.15, 0.25, 0.35, 0.5);
/// Top holdings ratio, percent (lower is better).
pub const TOP_HOLDINGS_BREAKPOINTS: Breakpoints = Breakpoints::new(30.0, 45.0, 60.0, 75.0);

/// Beta distance outside the ideal range at which the floor is reached.
pub const BETA_TOLERANCE: f64 = 0.6;
/// Minimum fraction earned by a beta outside its ideal range.
pub const BETA_FLOOR: f64 = 0.2;

/// Equity deep table.
pub const EQUITY_DEEP: DeepTable = DeepTable {
    var95: Breakpoints::new(1.0, 1.5, 2.0, 3.0),
    monthly_win_rate: Breakpoints::new(65.0, 58.0, 50.0, 40.0),
    beta_range: (0.7, 1.1),
};

/// Balanced deep table.
pub const BALANCED_DEEP: DeepTable = DeepTable {
    var95: Breakpoints::new(0.6, 1.0, 1.4, 2.0),
    monthly_win_rate: Breakpoints::new(70.0, 62.0, 55.0, 45.0),
    beta_range: (0.4, 0.9),
};

/// Bond deep table.
pub const BOND_DEEP: DeepTable = DeepTable {
    var95: Breakpoints::new(0.1, 0.2, 0.35, 0.6),
    monthly_win_rate: Breakpoints::new(90.0, 80.0, 70.0, 60.0),
    beta_range: (0.0, 0.3),
};

impl DeepTable {
    /// The deep table for a category.
    pub const fn for_category(category: Category) -> &'static Self {
        match category {
            Category::Bond => &BOND_DEEP,
            Category::Balanced => &BALANCED_DEEP,
            Category::Equity => &EQUITY_DEEP,
        }
    }

    /// Fraction earned by `beta`: full inside the ideal range, decaying
    /// linearly with distance outside it down to [`BETA_FLOOR`].
    pub fn beta_fraction(&self, beta: f64) -> f64 {
        let beta = finite_or_zero(beta);
        let (lo, hi) = self.beta_range;
        let distance = if beta < lo {
            lo - beta
        } else if beta > hi {
            beta - hi
        } else {
            0.0
        };
        (1.0 - distance / BETA_TOLERANCE).max(BETA_FLOOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SHARPE: Breakpoints = Breakpoints::new(1.5, 1.0, 0.5, 0.2);
    const DRAWDOWN: Breakpoints = Breakpoints::new(15.0, 25.0, 35.0, 50.0);

    #[test]
    fn test_higher_is_better_steps() {
        let d = Direction::HigherIsBetter;
        assert_eq!(SHARPE.fraction(2.0, d), 1.0);
        assert_eq!(SHARPE.fraction(1.5, d), 1.0);
        assert_eq!(SHARPE.fraction(1.0, d), 0.8);
        assert_eq!(SHARPE.fraction(0.7, d), 0.6);
        assert_eq!(SHARPE.fraction(0.2, d), 0.33);
        assert_relative_eq!(SHARPE.fraction(0.1, d), 0.165, epsilon = 1e-12);
        assert_eq!(SHARPE.fraction(-0.5, d), 0.0);
    }

    #[test]
    fn test_higher_is_better_zero_low() {
        let ret = Breakpoints::new(30.0, 15.0, 5.0, 0.0);
        assert_eq!(ret.fraction(-3.0, Direction::HigherIsBetter), 0.0);
        assert_eq!(ret.fraction(0.0, Direction::HigherIsBetter), 0.33);
    }

    #[test]
    fn test_lower_is_better_steps() {
        let d = Direction::LowerIsBetter;
        assert_eq!(DRAWDOWN.fraction(10.0, d), 1.0);
        assert_eq!(DRAWDOWN.fraction(20.0, d), 0.8);
        assert_eq!(DRAWDOWN.fraction(35.0, d), 0.6);
        assert_eq!(DRAWDOWN.fraction(45.0, d), 0.33);
        assert_relative_eq!(DRAWDOWN.fraction(66.0, d), 0.25, epsilon = 1e-12);
        assert_eq!(DRAWDOWN.fraction(500.0, d), LOWER_FLOOR);
    }

    #[test]
    fn test_non_finite_scored_as_zero() {
        assert_eq!(SHARPE.fraction(f64::NAN, Direction::HigherIsBetter), 0.0);
        assert_eq!(
            DRAWDOWN.fraction(f64::INFINITY, Direction::LowerIsBetter),
            1.0
        );
    }

    #[test]
    fn test_period_combination_renormalizes() {
        let best = PeriodRiskMetrics {
            sharpe_ratio: 3.0,
            ..PeriodRiskMetrics::default()
        };
        let breakdown = PeriodRiskBreakdown {
            year1: Some(best),
            year3: None,
            all: best,
        };
        let combined = PERIOD_WEIGHTS.combine(
            &breakdown,
            |m| m.sharpe_ratio,
            &SHARPE,
            Direction::HigherIsBetter,
        );
        assert_relative_eq!(combined, 1.0);
    }

    #[test]
    fn test_period_combination_weights() {
        let at = |sharpe_ratio| PeriodRiskMetrics {
            sharpe_ratio,
            ..PeriodRiskMetrics::default()
        };
        let breakdown = PeriodRiskBreakdown {
            year1: Some(at(2.0)),
            year3: Some(at(1.0)),
            all: at(0.7),
        };
        let combined = PERIOD_WEIGHTS.combine(
            &breakdown,
            |m| m.sharpe_ratio,
            &SHARPE,
            Direction::HigherIsBetter,
        );
        assert_relative_eq!(combined, 0.4 + 0.3 * 0.8 + 0.3 * 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_tier_table_expansion() {
        let table = TierBenchmark::for_tier(RiskTier::Medium).table();
        let sharpe = table.sharpe.unwrap();
        assert_relative_eq!(sharpe.full, 1.5);
        assert_relative_eq!(sharpe.high, 1.0);
        assert_relative_eq!(sharpe.mid, 0.6);
        assert_relative_eq!(sharpe.low, 0.3);

        let drawdown = table.max_drawdown.unwrap();
        assert_relative_eq!(drawdown.full, 6.0);
        assert_relative_eq!(drawdown.high, 10.0);
        assert_relative_eq!(drawdown.mid, 15.0);
        assert_relative_eq!(drawdown.low, 20.0);

        assert!(table.sortino.is_none());
        assert!(table.volatility.is_none());
        assert!(!table.scores_overall);
    }

    #[test]
    fn test_beta_fraction() {
        let table = DeepTable::for_category(Category::Equity);
        assert_eq!(table.beta_fraction(0.9), 1.0);
        assert_eq!(table.beta_fraction(1.1), 1.0);
        assert_relative_eq!(table.beta_fraction(1.4), 0.5, epsilon = 1e-12);
        assert_eq!(table.beta_fraction(3.0), BETA_FLOOR);
        // NaN is coerced to 0, which is 0.7 below the range.
        assert_eq!(table.beta_fraction(f64::NAN), BETA_FLOOR);
    }
}
