//! Homewatch - homework review status watcher
//!
//! Homewatch polls a homework-review API on a fixed interval and
//! forwards human-readable status-change notifications to a Telegram
//! chat. The watcher owns a timestamp cursor (advanced from the
//! server-reported clock) and a last-notified homework name that
//! suppresses duplicate notifications. Every cycle failure is
//! contained: logged, reported to the chat best-effort, and retried
//! on the next interval.
//!
//! # Modules
//!
//! - [`api`] - Review API client trait, Practicum implementation, shape validation
//! - [`verdict`] - Status-to-verdict mapping and notification text
//! - [`notify`] - Notifier trait and Telegram implementation
//! - [`watcher`] - The poll loop with cursor and dedup state
//! - [`config`] - Configuration types, loading, and credentials
//! - [`cli`] - Command-line interface

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod notify;
pub mod verdict;
pub mod watcher;

// Re-export commonly used types
pub use api::{Homework, HomeworkApi, PracticumClient, check_response};
pub use config::{ApiConfig, Config, Credentials, TelegramConfig, WatcherSettings};
pub use error::WatchError;
pub use notify::{Notifier, TelegramNotifier};
pub use verdict::{Verdict, render_status_change};
pub use watcher::{HomeworkWatcher, WatcherConfig};
