//! Telegram Bot API messenger.

use std::time::Duration;

use async_trait::async_trait;
use log::{error, info};
use serde::{Deserialize, Serialize};

use super::{Messenger, MessagingError};

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub default_chat_id: Option<String>,
    pub api_base: String,
}

pub struct TelegramMessenger {
    config: TelegramConfig,
    http_client: reqwest::Client,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramMessenger {
    pub fn new(config: TelegramConfig) -> Result<Self, MessagingError> {
        let http_client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .user_agent(concat!("nalog-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token
        )
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, text: &str, destination: Option<&str>) -> Result<(), MessagingError> {
        if text.trim().is_empty() {
            return Err(MessagingError::EmptyText);
        }
        let chat_id = destination
            .filter(|d| !d.trim().is_empty())
            .or(self.config.default_chat_id.as_deref())
            .ok_or(MessagingError::NotConfigured(
                "no chat_id given and TELEGRAM_CHAT_ID is not set",
            ))?;

        let response = self
            .http_client
            .post(self.endpoint())
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .map_err(|err| {
                // the URL carries the bot token
                let err = err.without_url();
                error!("Telegram request failed: {}", err);
                MessagingError::Transport(err)
            })?;

        let status = response.status();
        let body: Option<ApiResponse> = response.json().await.ok();

        match body {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => {
                info!("Message delivered to chat {}", chat_id);
                Ok(())
            }
            other => {
                let description = other
                    .and_then(|b| b.description)
                    .unwrap_or_else(|| "unexpected response".to_string());
                error!("Telegram rejected message ({}): {}", status, description);
                Err(MessagingError::Api {
                    status: status.as_u16(),
                    description,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_base: &str) -> TelegramConfig {
        TelegramConfig {
            bot_token: "123:abc".to_string(),
            default_chat_id: None,
            api_base: api_base.to_string(),
        }
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let messenger = TelegramMessenger::new(config("https://api.telegram.org/")).unwrap();
        assert_eq!(
            messenger.endpoint(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[tokio::test]
    async fn test_send_requires_destination() {
        let messenger = TelegramMessenger::new(config(DEFAULT_API_BASE)).unwrap();
        let err = messenger.send("hello", None).await.unwrap_err();
        assert!(matches!(err, MessagingError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_send_rejects_empty_text() {
        let messenger = TelegramMessenger::new(config(DEFAULT_API_BASE)).unwrap();
        let err = messenger.send("  ", Some("42")).await.unwrap_err();
        assert!(matches!(err, MessagingError::EmptyText));
    }
}
