//! Personal income tax (НДФЛ).
//!
//! The schedule depends on the calendar year:
//! - up to 2020: flat 13%
//! - 2021..=2024: 13% up to 5 000 000, 15% above
//! - from 2025: five progressive brackets, 13% to 22%

use serde::Serialize;

use super::{round_rub, TaxBracket};

const FLAT_RATE: f64 = 0.13;
const TWO_TIER_THRESHOLD: f64 = 5_000_000.0;
const TWO_TIER_UPPER_RATE: f64 = 0.15;

/// Progressive schedule in force from 2025.
pub const BRACKETS_2025: [TaxBracket; 5] = [
    TaxBracket::new(2_400_000.0, 0.13),
    TaxBracket::new(5_000_000.0, 0.15),
    TaxBracket::new(20_000_000.0, 0.18),
    TaxBracket::new(50_000_000.0, 0.20),
    TaxBracket::unbounded(0.22),
];

/// Tax regime for a given year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IncomeTaxRegime {
    Flat {
        rate: f64,
    },
    TwoTier {
        threshold: f64,
        base_rate: f64,
        upper_rate: f64,
    },
    Progressive(&'static [TaxBracket]),
}

impl IncomeTaxRegime {
    /// Classify a calendar year. Total over all years.
    pub fn for_year(year: i32) -> Self {
        match year {
            ..=2020 => Self::Flat { rate: FLAT_RATE },
            2021..=2024 => Self::TwoTier {
                threshold: TWO_TIER_THRESHOLD,
                base_rate: FLAT_RATE,
                upper_rate: TWO_TIER_UPPER_RATE,
            },
            _ => Self::Progressive(&BRACKETS_2025),
        }
    }

    pub fn kind(&self) -> RegimeKind {
        match self {
            Self::Flat { .. } => RegimeKind::Flat,
            Self::TwoTier { .. } => RegimeKind::TwoTier,
            Self::Progressive(_) => RegimeKind::Progressive,
        }
    }

    /// Unrounded tax for a positive amount.
    fn raw_tax(&self, amount: f64) -> f64 {
        match *self {
            Self::Flat { rate } => amount * rate,
            Self::TwoTier {
                threshold,
                base_rate,
                upper_rate,
            } => {
                if amount <= threshold {
                    amount * base_rate
                } else {
                    threshold * base_rate + (amount - threshold) * upper_rate
                }
            }
            Self::Progressive(brackets) => marginal_sum(amount, brackets),
        }
    }
}

/// Serializable label for a regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegimeKind {
    Flat,
    TwoTier,
    Progressive,
}

/// Sum of slab width times rate over every bracket the amount reaches.
fn marginal_sum(amount: f64, brackets: &[TaxBracket]) -> f64 {
    let mut tax = 0.0;
    let mut lower = 0.0;

    for bracket in brackets {
        let upper = bracket.upper_bound.unwrap_or(f64::INFINITY);
        let slab = amount.min(upper) - lower;
        if slab <= 0.0 {
            break;
        }
        tax += slab * bracket.rate;
        lower = upper;
    }

    tax
}

/// Income tax for `amount` earned in `year`, rounded once to kopecks.
pub fn calculate(amount: f64, year: i32) -> f64 {
    // NaN falls through here as well
    if !(amount > 0.0) {
        return 0.0;
    }
    round_rub(IncomeTaxRegime::for_year(year).raw_tax(amount))
}
