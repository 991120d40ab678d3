//! Notification delivery module
//!
//! Provides the `Notifier` trait and the Telegram Bot API implementation.

mod telegram;

use async_trait::async_trait;

use crate::error::WatchError;

pub use telegram::TelegramNotifier;

/// Delivery seam for composed notification text
///
/// Implementations return a `Delivery` error on failure; the watcher
/// logs it and never escalates. A failed message is not retried.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send one text message to the configured chat
    async fn send_message(&self, text: &str) -> Result<(), WatchError>;
}
