//! Scorer trait for turning a fund record into a single score.
//!
//! The backtest harness only needs a total score per fund and date, so it is
//! written against this trait rather than a concrete model. Both the market
//! model and the deep model implement it.

use crate::FundRecord;

/// A model that scores funds on a 0-100 scale.
///
/// Implementations must be pure: the same record always yields the same
/// score, and no state is shared between calls. They must also be thread-safe
/// (`Send + Sync`) so backtests can score many funds in parallel.
///
/// # Example
///
/// ```
/// use fundscore_traits::{FundRecord, FundScorer};
///
/// struct FlatScorer;
///
/// impl FundScorer for FlatScorer {
///     fn name(&self) -> &str {
///         "flat"
///     }
///
///     fn total_score(&self, _fund: &FundRecord) -> f64 {
///         50.0
///     }
/// }
///
/// assert_eq!(FlatScorer.total_score(&FundRecord::default()), 50.0);
/// ```
pub trait FundScorer: Send + Sync {
    /// Returns the name of this scorer, used in logs and reports.
    fn name(&self) -> &str;

    /// Scores a fund, rounded to 1 decimal and never negative or non-finite.
    fn total_score(&self, fund: &FundRecord) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct RatingScorer;

    impl FundScorer for RatingScorer {
        fn name(&self) -> &str {
            "rating"
        }

        fn total_score(&self, fund: &FundRecord) -> f64 {
            f64::from(fund.meta.star_rating) * 20.0
        }
    }

    #[test]
    fn test_scorer_as_trait_object() {
        let scorer: Box<dyn FundScorer> = Box::new(RatingScorer);
        let mut fund = FundRecord::default();
        fund.meta.star_rating = 4;

        assert_eq!(scorer.name(), "rating");
        assert_eq!(scorer.total_score(&fund), 80.0);
    }
}
