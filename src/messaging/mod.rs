//! Outbound chat messaging.
//!
//! Delivery is fire-and-forget: a single attempt bounded by a fixed timeout.

mod telegram;

use async_trait::async_trait;
use thiserror::Error;

pub use telegram::{TelegramConfig, TelegramMessenger, DEFAULT_API_BASE};

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("messaging is not configured: {0}")]
    NotConfigured(&'static str),
    #[error("message text must not be empty")]
    EmptyText,
    #[error("request to chat API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("chat API rejected the message (status {status}): {description}")]
    Api { status: u16, description: String },
}

/// Sends a text message to a chat destination.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// `destination` overrides the default chat when given.
    async fn send(&self, text: &str, destination: Option<&str>) -> Result<(), MessagingError>;
}

/// Messenger used when no chat credentials are configured.
pub struct DisabledMessenger;

#[async_trait]
impl Messenger for DisabledMessenger {
    async fn send(&self, _text: &str, _destination: Option<&str>) -> Result<(), MessagingError> {
        Err(MessagingError::NotConfigured("TELEGRAM_BOT_TOKEN is not set"))
    }
}
