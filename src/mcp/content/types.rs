//! Core content types for MCP tool responses.

use serde::{Deserialize, Serialize};

/// Content item in tool result (MCP protocol shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Content type identifier
    #[serde(rename = "type")]
    pub content_type: String,
    /// Text content (for text type)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ContentItem {
    /// Create text content item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            text: Some(text.into()),
        }
    }
}

/// Result of a tool call (MCP protocol shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
    /// Machine-readable copy of the result for clients that support it
    #[serde(rename = "structuredContent", skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<serde_json::Value>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResult {
    /// Create successful result.
    pub fn success(content: Vec<ContentItem>) -> Self {
        Self {
            content,
            structured_content: None,
            is_error: false,
        }
    }

    /// Create error result.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(message)],
            structured_content: None,
            is_error: true,
        }
    }

    /// Create success with text message.
    pub fn success_text(message: impl Into<String>) -> Self {
        Self::success(vec![ContentItem::text(message)])
    }

    /// Pretty-printed JSON as text, plus the same value as structured content.
    pub fn success_json<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(value) => {
                let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
                Self::with_structured(text, value)
            }
            Err(err) => Self::error(format!("Не удалось сериализовать результат: {}", err)),
        }
    }

    /// Caller-chosen text, with `payload` attached as structured content.
    pub fn success_structured<T: Serialize>(text: impl Into<String>, payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(value) => Self::with_structured(text.into(), value),
            Err(err) => Self::error(format!("Не удалось сериализовать результат: {}", err)),
        }
    }

    fn with_structured(text: String, value: serde_json::Value) -> Self {
        let structured_content = match value {
            serde_json::Value::Object(_) => Some(value),
            // structuredContent must be an object
            other => Some(serde_json::json!({ "result": other })),
        };
        Self {
            content: vec![ContentItem::text(text)],
            structured_content,
            is_error: false,
        }
    }

    /// First text item, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|item| item.text.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_item_text() {
        let item = ContentItem::text("Hello world");
        assert_eq!(item.content_type, "text");
        assert_eq!(item.text, Some("Hello world".to_string()));
    }

    #[test]
    fn test_tool_result_error() {
        let result = ToolResult::error("Something went wrong");
        assert!(result.is_error);
        assert_eq!(result.first_text(), Some("Something went wrong"));
    }

    #[test]
    fn test_success_json_object() {
        let result = ToolResult::success_json(&json!({ "tax": 130.0 }));
        assert!(!result.is_error);
        assert_eq!(result.structured_content, Some(json!({ "tax": 130.0 })));
        assert!(result.first_text().unwrap().contains("\"tax\""));
    }

    #[test]
    fn test_success_structured_keeps_text() {
        let result = ToolResult::success_structured("1300", &json!({ "tax": 1300 }));
        assert_eq!(result.first_text(), Some("1300"));
        assert_eq!(result.structured_content, Some(json!({ "tax": 1300 })));
    }

    #[test]
    fn test_success_json_wraps_arrays() {
        let result = ToolResult::success_json(&vec![1, 2]);
        assert_eq!(result.structured_content, Some(json!({ "result": [1, 2] })));
    }

    #[test]
    fn test_serialization_field_names() {
        let json = serde_json::to_value(ToolResult::success_text("ok")).unwrap();
        assert_eq!(json["isError"], false);
        assert_eq!(json["content"][0]["type"], "text");
        assert!(json.get("structuredContent").is_none());
    }
}
