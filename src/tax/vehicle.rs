//! Transport tax on passenger vehicles.
//!
//! Tax = engine power (hp) × per-horsepower rate of the matching band.
//! Supported tax years are 2015..=2025; the 2025 reform changed both the
//! band boundaries and the rates.

use super::TaxError;

pub const MIN_TAX_YEAR: i32 = 2015;
pub const MAX_TAX_YEAR: i32 = 2025;

/// A power band: applies to engines up to `max_hp` inclusive (`None` = no limit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerBand {
    pub max_hp: Option<u32>,
    pub rate_per_hp: u32,
}

const fn band(max_hp: u32, rate_per_hp: u32) -> PowerBand {
    PowerBand {
        max_hp: Some(max_hp),
        rate_per_hp,
    }
}

const fn top_band(rate_per_hp: u32) -> PowerBand {
    PowerBand {
        max_hp: None,
        rate_per_hp,
    }
}

const BANDS_UNTIL_2024: [PowerBand; 8] = [
    band(100, 12),
    band(125, 25),
    band(150, 35),
    band(175, 45),
    band(200, 50),
    band(225, 65),
    band(250, 75),
    top_band(150),
];

const BANDS_2025: [PowerBand; 7] = [
    band(100, 13),
    band(125, 28),
    band(150, 35),
    band(200, 50),
    band(225, 72),
    band(250, 75),
    top_band(150),
];

/// Band table for a tax year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleTaxSchedule {
    UntilReform(&'static [PowerBand]),
    Reform2025(&'static [PowerBand]),
}

impl VehicleTaxSchedule {
    /// Select the schedule, rejecting years outside the supported range.
    pub fn for_year(tax_year: i32) -> Result<Self, TaxError> {
        match tax_year {
            MIN_TAX_YEAR..=2024 => Ok(Self::UntilReform(&BANDS_UNTIL_2024)),
            MAX_TAX_YEAR => Ok(Self::Reform2025(&BANDS_2025)),
            year => Err(TaxError::YearOutOfRange {
                year,
                min: MIN_TAX_YEAR,
                max: MAX_TAX_YEAR,
            }),
        }
    }

    pub fn bands(&self) -> &'static [PowerBand] {
        match self {
            Self::UntilReform(bands) | Self::Reform2025(bands) => bands,
        }
    }

    /// Per-horsepower rate for an engine of `power_hp`.
    pub fn rate_for(&self, power_hp: u32) -> u32 {
        self.bands()
            .iter()
            .find(|band| band.max_hp.map_or(true, |max| power_hp <= max))
            .map(|band| band.rate_per_hp)
            .unwrap_or(0)
    }
}

/// Matched rate and resulting tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleTax {
    pub rate_per_hp: u32,
    pub amount: u64,
}

/// Full breakdown for `power_hp` in `tax_year`.
pub fn assess(tax_year: i32, power_hp: u32) -> Result<VehicleTax, TaxError> {
    let schedule = VehicleTaxSchedule::for_year(tax_year)?;
    let rate_per_hp = schedule.rate_for(power_hp);
    Ok(VehicleTax {
        rate_per_hp,
        amount: u64::from(power_hp) * u64::from(rate_per_hp),
    })
}

/// Transport tax in whole rubles.
pub fn calculate(tax_year: i32, power_hp: u32) -> Result<u64, TaxError> {
    assess(tax_year, power_hp).map(|tax| tax.amount)
}
