//! Watcher configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::WatcherSettings;

/// Configuration for the HomeworkWatcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Seconds between poll cycles; also the window the cursor is
    /// pulled back by when it advances
    #[serde(default = "default_retry_interval_secs")]
    pub retry_interval_secs: u64,
}

fn default_retry_interval_secs() -> u64 {
    600
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            retry_interval_secs: 600,
        }
    }
}

impl From<&WatcherSettings> for WatcherConfig {
    fn from(settings: &WatcherSettings) -> Self {
        Self {
            retry_interval_secs: settings.retry_interval_secs,
        }
    }
}

impl WatcherConfig {
    /// Get the retry interval as a Duration
    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WatcherConfig::default();
        assert_eq!(config.retry_interval_secs, 600);
    }

    #[test]
    fn test_retry_interval_duration() {
        let config = WatcherConfig {
            retry_interval_secs: 60,
        };
        assert_eq!(config.retry_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_from_settings() {
        let settings = WatcherSettings {
            retry_interval_secs: 120,
        };
        let config = WatcherConfig::from(&settings);
        assert_eq!(config.retry_interval_secs, 120);
    }
}
