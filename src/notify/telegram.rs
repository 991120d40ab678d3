//! Telegram Bot API notifier implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::Notifier;
use crate::config::{Credentials, TelegramConfig};
use crate::error::WatchError;

/// Telegram notifier targeting a fixed chat
pub struct TelegramNotifier {
    base_url: String,
    token: String,
    chat_id: String,
    http: Client,
}

/// Envelope every Bot API method responds with
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramNotifier {
    /// Create a new notifier from configuration and validated credentials
    pub fn from_config(config: &TelegramConfig, credentials: &Credentials) -> Result<Self, WatchError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(WatchError::Network)?;

        Ok(Self {
            base_url: config.base_url.clone(),
            token: credentials.bot_token.clone(),
            chat_id: credentials.chat_id.clone(),
            http,
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, self.token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> Result<(), WatchError> {
        debug!("send_message: called");

        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let response = self
            .http
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| WatchError::Delivery(e.to_string()))?;

        let status = response.status();
        let envelope: BotApiResponse = response
            .json()
            .await
            .map_err(|e| WatchError::Delivery(format!("malformed Bot API response: {e}")))?;

        if !status.is_success() || !envelope.ok {
            let description = envelope.description.unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(WatchError::Delivery(description));
        }

        info!(message = %text, "send_message: delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> Credentials {
        Credentials {
            api_token: "unused".to_string(),
            bot_token: "123:abc".to_string(),
            chat_id: "42".to_string(),
        }
    }

    #[test]
    fn test_from_config() {
        let config = TelegramConfig::default();
        let notifier = TelegramNotifier::from_config(&config, &test_credentials()).unwrap();

        assert_eq!(notifier.chat_id, "42");
        assert_eq!(
            notifier.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_send_message_url_custom_base() {
        let config = TelegramConfig {
            base_url: "http://localhost:8081".to_string(),
            ..Default::default()
        };
        let notifier = TelegramNotifier::from_config(&config, &test_credentials()).unwrap();

        assert_eq!(notifier.send_message_url(), "http://localhost:8081/bot123:abc/sendMessage");
    }

    #[test]
    fn test_envelope_deserialize() {
        let envelope: BotApiResponse = serde_json::from_str(r#"{"ok": false, "description": "chat not found"}"#).unwrap();
        assert!(!envelope.ok);
        assert_eq!(envelope.description.as_deref(), Some("chat not found"));

        let envelope: BotApiResponse = serde_json::from_str(r#"{"ok": true, "result": {"message_id": 7}}"#).unwrap();
        assert!(envelope.ok);
    }
}
