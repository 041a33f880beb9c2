//! Tool definition for vehicle transport tax.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::registry::ToolDescriptor;
use crate::mcp::content::ToolResult;
use crate::tax::vehicle::{self, MAX_TAX_YEAR, MIN_TAX_YEAR};

pub const TOOL_NAME: &str = "vehicle_tax";

/// Get the tool descriptor for MCP tools/list.
pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description: format!(
            "Рассчитывает транспортный налог на легковой автомобиль по мощности двигателя. \
             Поддерживаются налоговые годы с {MIN_TAX_YEAR} по {MAX_TAX_YEAR}; \
             в {MAX_TAX_YEAR} году изменились ставки и границы диапазонов мощности. \
             Результат в целых рублях."
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "tax_year": {
                    "type": "integer",
                    "minimum": MIN_TAX_YEAR,
                    "maximum": MAX_TAX_YEAR,
                    "description": "Налоговый год"
                },
                "power": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Мощность двигателя, л.с."
                }
            },
            "required": ["tax_year", "power"]
        }),
    }
}

#[derive(Debug, Deserialize)]
pub struct VehicleTaxRequest {
    pub tax_year: i32,
    pub power: u32,
}

#[derive(Debug, Serialize)]
pub struct VehicleTaxResponse {
    pub tax_year: i32,
    pub power: u32,
    pub rate: u32,
    pub tax: u64,
}

/// Text content is the whole-ruble tax; the breakdown goes to structured content.
pub fn run(request: VehicleTaxRequest) -> ToolResult {
    match vehicle::assess(request.tax_year, request.power) {
        Ok(assessed) => ToolResult::success_structured(
            assessed.amount.to_string(),
            &VehicleTaxResponse {
                tax_year: request.tax_year,
                power: request.power,
                rate: assessed.rate_per_hp,
                tax: assessed.amount,
            },
        ),
        Err(err) => ToolResult::error(format!("Неверный налоговый год: {}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_2025() {
        let result = run(VehicleTaxRequest {
            tax_year: 2025,
            power: 100,
        });
        assert!(!result.is_error);
        assert_eq!(result.first_text(), Some("1300"));
        let data = result.structured_content.unwrap();
        assert_eq!(data["rate"], 13);
        assert_eq!(data["tax"], 1300);
    }

    #[test]
    fn test_run_out_of_range() {
        let result = run(VehicleTaxRequest {
            tax_year: 2026,
            power: 100,
        });
        assert!(result.is_error);
        assert!(result.first_text().unwrap().contains("2026"));
    }
}
