//! Homewatch configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main homewatch configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Review API configuration
    pub api: ApiConfig,

    /// Telegram delivery configuration
    pub telegram: TelegramConfig,

    /// Poll loop configuration
    pub watcher: WatcherSettings,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .homewatch.yml
        let local_config = PathBuf::from(".homewatch.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/homewatch/homewatch.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("homewatch").join("homewatch.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Review API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Homework statuses endpoint
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Environment variable containing the API token
    #[serde(rename = "token-env")]
    pub token_env: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string(),
            token_env: "PRACTICUM_TOKEN".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Telegram delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Environment variable containing the bot token
    #[serde(rename = "token-env")]
    pub token_env: String,

    /// Environment variable containing the destination chat id
    #[serde(rename = "chat-id-env")]
    pub chat_id_env: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.telegram.org".to_string(),
            token_env: "TELEGRAM_TOKEN".to_string(),
            chat_id_env: "TELEGRAM_CHAT_ID".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Poll loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherSettings {
    /// Seconds between poll cycles
    #[serde(rename = "retry-interval-secs")]
    pub retry_interval_secs: u64,
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            retry_interval_secs: 600,
        }
    }
}

/// Opaque credentials read once at startup, immutable for process lifetime
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Review API OAuth token
    pub api_token: String,

    /// Telegram bot token
    pub bot_token: String,

    /// Destination chat identifier
    pub chat_id: String,
}

impl Credentials {
    /// Read all three credentials from the environment variables named in config
    ///
    /// Fails unless every credential is present and non-empty. Called once
    /// at startup; a failure here is startup-fatal.
    pub fn from_env(config: &Config) -> Result<Self> {
        let creds = Self {
            api_token: std::env::var(&config.api.token_env).unwrap_or_default(),
            bot_token: std::env::var(&config.telegram.token_env).unwrap_or_default(),
            chat_id: std::env::var(&config.telegram.chat_id_env).unwrap_or_default(),
        };

        if !creds.validate() {
            return Err(eyre::eyre!(
                "Missing credentials. Set the {}, {} and {} environment variables.",
                config.api.token_env,
                config.telegram.token_env,
                config.telegram.chat_id_env
            ));
        }

        Ok(creds)
    }

    /// True iff all three credentials are present and non-empty
    pub fn validate(&self) -> bool {
        !self.api_token.is_empty() && !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }
}
