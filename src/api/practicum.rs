//! Practicum review API client implementation
//!
//! Implements the HomeworkApi trait over the homework_statuses
//! endpoint with OAuth header authentication.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use super::HomeworkApi;
use crate::config::{ApiConfig, Credentials};
use crate::error::WatchError;

/// Practicum homework statuses API client
pub struct PracticumClient {
    base_url: String,
    token: String,
    http: Client,
}

impl PracticumClient {
    /// Create a new client from configuration and validated credentials
    pub fn from_config(config: &ApiConfig, credentials: &Credentials) -> Result<Self, WatchError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(WatchError::Network)?;

        Ok(Self {
            base_url: config.base_url.clone(),
            token: credentials.api_token.clone(),
            http,
        })
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<serde_json::Value, WatchError> {
        debug!(%from_date, "homework_statuses: called");

        let response = self
            .http
            .get(&self.base_url)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let message = response.text().await.unwrap_or_default();
            error!(status, "homework_statuses: non-200 response");
            return Err(WatchError::Api { status, message });
        }

        debug!("homework_statuses: success");
        let page = response.json().await?;
        Ok(page)
    }
}
