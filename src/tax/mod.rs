//! Tax calculation engines.
//!
//! - `income` - personal income tax (НДФЛ) with year-dependent bracket schedules
//! - `vehicle` - transport tax by engine power band
//!
//! Both engines are pure functions of their arguments.

pub mod income;
pub mod vehicle;

use thiserror::Error;

pub use income::IncomeTaxRegime;
pub use vehicle::VehicleTaxSchedule;

/// Errors raised by the tax engines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxError {
    #[error("tax year {year} is outside the supported range {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
}

/// One slab of a marginal schedule. `upper_bound: None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBracket {
    pub upper_bound: Option<f64>,
    pub rate: f64,
}

impl TaxBracket {
    pub const fn new(upper_bound: f64, rate: f64) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub const fn unbounded(rate: f64) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// Above this magnitude every f64 is already a whole number of kopecks.
const EXACT_KOPECK_LIMIT: f64 = (1u64 << 52) as f64 / 100.0;

/// Round to kopecks, half away from zero. Huge values come back unchanged.
pub fn round_rub(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= EXACT_KOPECK_LIMIT {
        return value;
    }
    (value * 100.0).round() / 100.0
}
