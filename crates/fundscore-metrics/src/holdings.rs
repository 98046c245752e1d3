//! Portfolio concentration from disclosed holdings.

use fundscore_traits::Holdings;
use fundscore_traits::stats::round2;

/// Number of stock positions summed by default.
pub const DEFAULT_TOP_N: usize = 10;

/// Returned by [`industry_hhi`] when no usable industry breakdown exists.
///
/// Distinct from the 1.0 of a single-industry fund.
pub const NO_INDUSTRY_DATA: f64 = -1.0;

/// Combined weight of the `n` largest stock positions, in percent.
///
/// Non-finite weights are ignored.
pub fn top_n_concentration(holdings: &Holdings, n: usize) -> f64 {
    let mut weights: Vec<f64> = holdings
        .top_stocks
        .iter()
        .map(|h| h.weight)
        .filter(|w| w.is_finite())
        .collect();
    weights.sort_by(|a, b| b.total_cmp(a));
    round2(weights.iter().take(n).sum())
}

/// Herfindahl-Hirschman index of the industry allocation.
///
/// Weights are normalized by their sum, so an allocation that does not add up
/// to 100% is still comparable. Returns [`NO_INDUSTRY_DATA`] when there are no
/// positive weights.
///
/// # Example
///
/// ```
/// use fundscore_metrics::holdings::{NO_INDUSTRY_DATA, industry_hhi};
/// use fundscore_traits::{HoldingWeight, Holdings};
///
/// let single = Holdings {
///     top_stocks: vec![],
///     industries: vec![HoldingWeight::new("Banks", 80.0)],
/// };
/// assert_eq!(industry_hhi(&single), 1.0);
/// assert_eq!(industry_hhi(&Holdings::default()), NO_INDUSTRY_DATA);
/// ```
pub fn industry_hhi(holdings: &Holdings) -> f64 {
    let weights: Vec<f64> = holdings
        .industries
        .iter()
        .map(|h| h.weight)
        .filter(|w| w.is_finite() && *w > 0.0)
        .collect();
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 {
        return NO_INDUSTRY_DATA;
    }
    round2(weights.iter().map(|w| (w / total).powi(2)).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fundscore_traits::HoldingWeight;

    fn stocks(weights: &[f64]) -> Holdings {
        Holdings {
            top_stocks: weights
                .iter()
                .enumerate()
                .map(|(i, w)| HoldingWeight::new(format!("S{i}"), *w))
                .collect(),
            industries: vec![],
        }
    }

    #[test]
    fn test_top_n_picks_largest() {
        let holdings = stocks(&[2.0, 9.5, 4.0, 7.25, 1.0]);
        assert_relative_eq!(top_n_concentration(&holdings, 2), 16.75);
        assert_relative_eq!(top_n_concentration(&holdings, 10), 23.75);
    }

    #[test]
    fn test_top_n_empty() {
        let empty = Holdings::default();
        assert_eq!(top_n_concentration(&empty, DEFAULT_TOP_N), 0.0);
    }

    #[test]
    fn test_hhi_even_split() {
        let holdings = Holdings {
            top_stocks: vec![],
            industries: (0..4)
                .map(|i| HoldingWeight::new(format!("I{i}"), 20.0))
                .collect(),
        };
        assert_relative_eq!(industry_hhi(&holdings), 0.25);
    }

    #[test]
    fn test_hhi_sentinel_differs_from_single_industry() {
        let zeroed = Holdings {
            top_stocks: vec![],
            industries: vec![HoldingWeight::new("Energy", 0.0)],
        };
        assert_eq!(industry_hhi(&zeroed), NO_INDUSTRY_DATA);

        let single = Holdings {
            top_stocks: vec![],
            industries: vec![HoldingWeight::new("Energy", 35.0)],
        };
        assert_eq!(industry_hhi(&single), 1.0);
    }
}
