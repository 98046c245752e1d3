//! Fixed lookup tables for the non-metric overall factors.

use fundscore_traits::stats::finite_or_zero;

/// Fraction earned by a star rating, `None` when the rating is unknown (0).
pub const fn rating_fraction(star_rating: u8) -> Option<f64> {
    match star_rating {
        0 => None,
        1 => Some(0.2),
        2 => Some(0.4),
        3 => Some(0.6),
        4 => Some(0.8),
        _ => Some(1.0),
    }
}

/// Fraction earned by fund size in units of 100 million; peaks between 2 and 50.
pub fn size_fraction(size: f64) -> f64 {
    let size = finite_or_zero(size);
    match size {
        s if s < 0.5 => 0.2,
        s if s < 1.0 => 0.4,
        s if s < 2.0 => 0.6,
        s if s <= 50.0 => 1.0,
        s if s <= 100.0 => 0.8,
        _ => 0.6,
    }
}

/// Fraction earned by the current manager's tenure in years.
pub fn tenure_fraction(years: f64) -> f64 {
    let years = finite_or_zero(years);
    match years {
        y if y >= 7.0 => 1.0,
        y if y >= 5.0 => 0.85,
        y if y >= 3.0 => 0.7,
        y if y >= 1.0 => 0.5,
        _ => 0.25,
    }
}

/// Fraction earned by the total annual fee rate in percent.
pub fn fee_fraction(fee_rate: f64) -> f64 {
    let fee_rate = finite_or_zero(fee_rate);
    match fee_rate {
        f if f <= 0.6 => 1.0,
        f if f <= 1.0 => 0.85,
        f if f <= 1.5 => 0.65,
        f if f <= 2.0 => 0.45,
        _ => 0.25,
    }
}
