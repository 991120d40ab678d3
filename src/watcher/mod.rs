//! Watcher module for homework status polling
//!
//! The HomeworkWatcher polls the review API periodically, tracks the
//! query cursor and the last-notified homework, and forwards status
//! changes to the notifier.

mod config;
mod homework_watcher;

pub use config::WatcherConfig;
pub use homework_watcher::HomeworkWatcher;
