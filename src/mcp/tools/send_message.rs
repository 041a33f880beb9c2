//! Tool definition for sending a chat message.

use serde::Deserialize;
use serde_json::json;

use super::registry::ToolDescriptor;

pub const TOOL_NAME: &str = "send_message";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description: concat!(
            "Отправляет текстовое сообщение в Telegram-чат. ",
            "Если chat_id не указан, используется чат по умолчанию из настроек сервера. ",
            "Одна попытка доставки, без повторов."
        )
        .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "Текст сообщения"
                },
                "chat_id": {
                    "type": "string",
                    "description": "Идентификатор чата (опционально)"
                }
            },
            "required": ["text"]
        }),
    }
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
    #[serde(default)]
    pub chat_id: Option<ChatId>,
}

/// Telegram chat ids arrive either as numbers or strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Number(i64),
    Text(String),
}

impl ChatId {
    pub fn into_string(self) -> String {
        match self {
            Self::Number(id) => id.to_string(),
            Self::Text(id) => id,
        }
    }
}
