//! Fund category and risk tier classification.
//!
//! Both are resolved from the free-text fund type by ordered keyword lists
//! over the lower-cased text; the first matching entry wins. The risk tier is
//! additionally checked against realized volatility and the more severe of
//! the two readings is kept.

use serde::{Deserialize, Serialize};

/// Broad asset class a fund is benchmarked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Bond and money market funds.
    Bond,
    /// Hybrid and allocation funds.
    Balanced,
    /// Stock and index funds.
    Equity,
}

impl Category {
    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &str {
        match self {
            Self::Bond => "bond",
            Self::Balanced => "balanced",
            Self::Equity => "equity",
        }
    }
}

/// Ordered risk tiers, from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    /// Cash-like products.
    VeryLow,
    /// Pure bond products.
    Low,
    /// Convertible and moderate-risk products.
    Medium,
    /// Hybrid products.
    MediumHigh,
    /// Equity products.
    High,
}

impl RiskTier {
    /// All tiers in ascending severity.
    pub const ALL: [Self; 5] = [
        Self::VeryLow,
        Self::Low,
        Self::Medium,
        Self::MediumHigh,
        Self::High,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &str {
        match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::MediumHigh => "medium_high",
            Self::High => "high",
        }
    }
}

const CATEGORY_KEYWORDS: &[(&str, Category)] = &[
    ("债", Category::Bond),
    ("bond", Category::Bond),
    ("货币", Category::Bond),
    ("money market", Category::Bond),
    ("fixed income", Category::Bond),
    ("混合", Category::Balanced),
    ("hybrid", Category::Balanced),
    ("balanced", Category::Balanced),
    ("mixed", Category::Balanced),
    ("fof", Category::Balanced),
    ("股票", Category::Equity),
    ("指数", Category::Equity),
    ("equity", Category::Equity),
    ("stock", Category::Equity),
    ("index", Category::Equity),
    ("qdii", Category::Equity),
    ("etf", Category::Equity),
];

const TIER_KEYWORDS: &[(&str, RiskTier)] = &[
    ("货币", RiskTier::VeryLow),
    ("money market", RiskTier::VeryLow),
    ("cash", RiskTier::VeryLow),
    ("可转债", RiskTier::Medium),
    ("convertible", RiskTier::Medium),
    ("债", RiskTier::Low),
    ("bond", RiskTier::Low),
    ("fixed income", RiskTier::Low),
    ("股票", RiskTier::High),
    ("指数", RiskTier::High),
    ("偏股", RiskTier::High),
    ("equity", RiskTier::High),
    ("stock", RiskTier::High),
    ("index", RiskTier::High),
    ("qdii", RiskTier::High),
    ("混合", RiskTier::MediumHigh),
    ("balanced", RiskTier::MediumHigh),
    ("hybrid", RiskTier::MediumHigh),
    ("mixed", RiskTier::MediumHigh),
];

/// Upper volatility bounds (percent, exclusive) for each tier below `High`.
const VOLATILITY_TIERS: [(f64, RiskTier); 4] = [
    (1.0, RiskTier::VeryLow),
    (5.0, RiskTier::Low),
    (12.0, RiskTier::Medium),
    (20.0, RiskTier::MediumHigh),
];

fn first_match<T: Copy>(fund_type: &str, keywords: &[(&str, T)]) -> Option<T> {
    let text = fund_type.to_lowercase();
    keywords
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, value)| *value)
}

/// Category from the fund type text; unmatched text is [`Category::Balanced`].
///
/// # Example
///
/// ```
/// use fundscore_model::{Category, classify_category};
///
/// assert_eq!(classify_category("Short-term Bond"), Category::Bond);
/// assert_eq!(classify_category("混合型-偏股"), Category::Balanced);
/// assert_eq!(classify_category("something new"), Category::Balanced);
/// ```
pub fn classify_category(fund_type: &str) -> Category {
    let category = first_match(fund_type, CATEGORY_KEYWORDS).unwrap_or(Category::Balanced);
    tracing::trace!(
        fund_type,
        category = category.label(),
        "classified category"
    );
    category
}

/// Risk tier implied by the fund type text alone; unmatched text is `Medium`.
pub fn tier_from_type(fund_type: &str) -> RiskTier {
    first_match(fund_type, TIER_KEYWORDS).unwrap_or(RiskTier::Medium)
}

/// Risk tier implied by annualized volatility in percent.
///
/// Non-finite volatility is treated as 0.
pub fn tier_from_volatility(volatility: f64) -> RiskTier {
    let volatility = if volatility.is_finite() { volatility } else { 0.0 };
    VOLATILITY_TIERS
        .iter()
        .find(|(bound, _)| volatility < *bound)
        .map_or(RiskTier::High, |(_, tier)| *tier)
}

/// The more severe of the type-implied and volatility-implied tiers.
pub fn resolve_risk_tier(fund_type: &str, volatility: f64) -> RiskTier {
    let by_type = tier_from_type(fund_type);
    let by_volatility = tier_from_volatility(volatility);
    let tier = by_type.max(by_volatility);
    tracing::trace!(
        fund_type,
        volatility,
        by_type = by_type.label(),
        by_volatility = by_volatility.label(),
        tier = tier.label(),
        "resolved risk tier"
    );
    tier
}
