//! Catalog record shapes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A record that can be loaded from a CSV row and searched.
pub trait CatalogRecord: Serialize + Clone + Send + Sync + 'static {
    /// Raw CSV row, deserialized by header name.
    type Row: DeserializeOwned;

    /// Convert a raw row. `None` when the identifier is missing.
    fn from_row(row: Self::Row) -> Option<Self>;

    /// Unique, trimmed, non-empty key.
    fn identifier(&self) -> String;

    /// Lower-cased texts the search query is matched against.
    fn haystacks(&self) -> Vec<String>;

    fn matches(&self, needle: &str) -> bool {
        self.haystacks().iter().any(|text| text.contains(needle))
    }
}

/// Trimmed, non-empty text or `None`.
fn text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Lenient number parsing: spaces and a decimal comma are accepted,
/// anything else unparseable becomes 0.
pub fn parse_number(value: Option<&str>) -> f64 {
    let Some(raw) = value else {
        return 0.0;
    };
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Same as [`parse_number`], truncated to a non-negative integer.
pub fn parse_count(value: Option<&str>) -> u32 {
    let number = parse_number(value);
    if number <= 0.0 {
        0
    } else {
        number.min(f64::from(u32::MAX)) as u32
    }
}

// ============================================================================
// Product
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub unit: String,
    pub unit_price: f64,
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductRow {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub unit: Option<String>,
    pub unit_price: Option<String>,
    pub description: Option<String>,
}

impl CatalogRecord for Product {
    type Row = ProductRow;

    fn from_row(row: ProductRow) -> Option<Self> {
        Some(Self {
            sku: text(row.sku)?,
            name: text(row.name).unwrap_or_default(),
            unit: text(row.unit).unwrap_or_default(),
            unit_price: parse_number(row.unit_price.as_deref()),
            description: text(row.description).unwrap_or_default(),
        })
    }

    fn identifier(&self) -> String {
        self.sku.clone()
    }

    fn haystacks(&self) -> Vec<String> {
        vec![self.name.to_lowercase(), self.description.to_lowercase()]
    }
}

// ============================================================================
// Vehicle
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub brand: String,
    pub model: String,
    pub price_rub: f64,
    pub engine_power_hp: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VehicleRow {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price_rub: Option<String>,
    pub engine_power_hp: Option<String>,
}

impl CatalogRecord for Vehicle {
    type Row = VehicleRow;

    fn from_row(row: VehicleRow) -> Option<Self> {
        Some(Self {
            brand: text(row.brand)?,
            model: text(row.model)?,
            price_rub: parse_number(row.price_rub.as_deref()),
            engine_power_hp: parse_count(row.engine_power_hp.as_deref()),
        })
    }

    fn identifier(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Both token orders, so "camry toyota" finds "Toyota Camry".
    fn haystacks(&self) -> Vec<String> {
        let brand = self.brand.to_lowercase();
        let model = self.model.to_lowercase();
        vec![format!("{brand} {model}"), format!("{model} {brand}")]
    }
}
