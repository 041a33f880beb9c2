//! Tool definition for personal income tax (НДФЛ).

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::registry::ToolDescriptor;
use crate::mcp::content::ToolResult;
use crate::tax::income::{self, RegimeKind};
use crate::tax::IncomeTaxRegime;

pub const TOOL_NAME: &str = "income_tax";

/// Get the tool descriptor for MCP tools/list.
pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description: concat!(
            "Рассчитывает НДФЛ (налог на доходы физических лиц) за указанный год. ",
            "До 2020 года включительно: 13%. ",
            "2021-2024: 13% до 5 млн руб., 15% с превышения. ",
            "С 2025 года: прогрессивная шкала 13/15/18/20/22% ",
            "с порогами 2,4 / 5 / 20 / 50 млн руб. ",
            "Результат в рублях с точностью до копеек."
        )
        .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "amount": {
                    "type": "number",
                    "description": "Годовой доход в рублях"
                },
                "year": {
                    "type": "integer",
                    "description": "Налоговый год"
                }
            },
            "required": ["amount", "year"]
        }),
    }
}

#[derive(Debug, Deserialize)]
pub struct IncomeTaxRequest {
    pub amount: f64,
    pub year: i32,
}

#[derive(Debug, Serialize)]
pub struct IncomeTaxResponse {
    pub amount: f64,
    pub year: i32,
    pub regime: RegimeKind,
    pub tax: f64,
}

/// Text content is the bare tax in rubles; the breakdown goes to structured content.
pub fn run(request: IncomeTaxRequest) -> ToolResult {
    let tax = income::calculate(request.amount, request.year);
    let response = IncomeTaxResponse {
        amount: request.amount,
        year: request.year,
        regime: IncomeTaxRegime::for_year(request.year).kind(),
        tax,
    };
    ToolResult::success_structured(format_rubles(tax), &response)
}

/// JSON number form, so whole sums keep their `.0` (`800000.0`).
fn format_rubles(tax: f64) -> String {
    serde_json::to_string(&tax).unwrap_or_else(|_| tax.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor() {
        let desc = descriptor();
        assert_eq!(desc.name, TOOL_NAME);
        assert!(desc.input_schema["required"]
            .as_array()
            .unwrap()
            .contains(&json!("year")));
    }

    #[test]
    fn test_run() {
        let result = run(IncomeTaxRequest {
            amount: 6_000_000.0,
            year: 2022,
        });
        assert!(!result.is_error);
        assert_eq!(result.first_text(), Some("800000.0"));
        let data = result.structured_content.unwrap();
        assert_eq!(data["tax"], 800_000.0);
        assert_eq!(data["regime"], "two_tier");
    }

    #[test]
    fn test_run_kopecks_and_huge_amount() {
        let result = run(IncomeTaxRequest {
            amount: 0.05,
            year: 2019,
        });
        assert_eq!(result.first_text(), Some("0.01"));

        let result = run(IncomeTaxRequest {
            amount: 1e307,
            year: 2025,
        });
        assert!(!result.is_error);
        let text = result.first_text().unwrap();
        assert!(text.parse::<f64>().unwrap().is_finite(), "{text}");
        assert!(result.structured_content.unwrap()["tax"].is_f64());
    }
}
