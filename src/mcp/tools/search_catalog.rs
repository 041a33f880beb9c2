//! Tool definition for catalog search.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::json;

use super::registry::ToolDescriptor;

pub const TOOL_NAME: &str = "search_catalog";
pub const DEFAULT_LIMIT: i64 = 10;

/// Get the tool descriptor for MCP tools/list.
pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description: concat!(
            "Ищет записи в каталоге по подстроке без учёта регистра. ",
            "Каталог товаров: поиск по названию и описанию. ",
            "Каталог автомобилей: поиск по марке и модели в любом порядке. ",
            "Возвращает первые совпадения в порядке следования в каталоге."
        )
        .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Строка поиска"
                },
                "limit": {
                    "type": "integer",
                    "description": "Максимум результатов (по умолчанию 10, минимум 1)"
                },
                "catalog": {
                    "type": "string",
                    "enum": ["products", "vehicles"],
                    "description": "Каталог для поиска (по умолчанию products)"
                }
            },
            "required": ["query"]
        }),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    #[default]
    Products,
    Vehicles,
}

#[derive(Debug, Deserialize)]
pub struct SearchCatalogRequest {
    pub query: String,
    #[serde(default = "default_limit", deserialize_with = "integral_limit")]
    pub limit: i64,
    #[serde(default)]
    pub catalog: CatalogKind,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Accepts `5` and `5.0`, rejects `5.5`.
fn integral_limit<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 => Ok(value.clamp(i64::MIN as f64, i64::MAX as f64) as i64),
        _ => Err(de::Error::custom(format!("limit must be an integer, got {}", number))),
    }
}
