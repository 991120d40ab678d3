//! Homework status watcher implementation

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::config::WatcherConfig;
use crate::api::{HomeworkApi, check_response};
use crate::error::WatchError;
use crate::notify::Notifier;
use crate::verdict::render_status_change;

/// The HomeworkWatcher polls the review API and notifies on status changes
///
/// Owns the query cursor and the last-notified homework name. A repeat
/// of the same homework across cycles is suppressed; any cycle failure
/// is contained, reported, and retried on the next interval.
pub struct HomeworkWatcher {
    config: WatcherConfig,
    api: Arc<dyn HomeworkApi>,
    notifier: Arc<dyn Notifier>,
    cursor: i64,
    last_notified: Option<String>,
}

impl HomeworkWatcher {
    /// Create a new HomeworkWatcher
    ///
    /// The cursor starts at 0, so the first cycle asks for the full
    /// history and the server's `current_date` takes over from there.
    pub fn new(config: WatcherConfig, api: Arc<dyn HomeworkApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config,
            api,
            notifier,
            cursor: 0,
            last_notified: None,
        }
    }

    /// Run one fetch-validate-format pass
    ///
    /// Returns the notification text when the latest homework changed
    /// since the previous cycle, `None` when there is nothing to say
    /// (empty list, or the same homework as last time).
    async fn check_for_updates(&mut self) -> Result<Option<String>, WatchError> {
        let page = self.api.homework_statuses(self.cursor).await?;

        // Advance the cursor from the server clock, pulled back one
        // interval so nothing changed mid-cycle slips through the gap.
        match page.get("current_date").and_then(|v| v.as_i64()) {
            Some(current_date) => {
                self.cursor = current_date - self.config.retry_interval_secs as i64;
                debug!(cursor = self.cursor, "check_for_updates: cursor advanced");
            }
            None => {
                warn!(cursor = self.cursor, "check_for_updates: no current_date in response, cursor kept");
            }
        }

        let homeworks = check_response(&page)?;

        let Some(latest) = homeworks.first() else {
            debug!("check_for_updates: homework status unchanged");
            return Ok(None);
        };

        if self.last_notified.as_deref() == Some(latest.homework_name.as_str()) {
            debug!(name = %latest.homework_name, "check_for_updates: already notified");
            return Ok(None);
        }

        let message = render_status_change(latest)?;
        self.last_notified = Some(latest.homework_name.clone());
        Ok(Some(message))
    }

    /// Drive one full cycle with failure containment
    ///
    /// Never returns an error: status changes are delivered, delivery
    /// failures are logged, and every other failure is logged and
    /// reported to the chat best-effort.
    pub async fn cycle(&mut self) {
        match self.check_for_updates().await {
            Ok(Some(message)) => {
                if let Err(e) = self.notifier.send_message(&message).await {
                    error!(error = %e, "cycle: notification delivery failed");
                } else {
                    info!("cycle: status change notification sent");
                }
            }
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, "cycle: poll failed");
                let report = format!("Сбой в работе программы: {e}");
                if let Err(delivery) = self.notifier.send_message(&report).await {
                    error!(error = %delivery, "cycle: failure report delivery failed");
                }
            }
        }
    }

    /// Run the watcher loop
    ///
    /// One cycle per retry interval, forever; the process is stopped
    /// externally.
    pub async fn run(&mut self) {
        info!(
            interval_secs = self.config.retry_interval_secs,
            "HomeworkWatcher started"
        );

        loop {
            self.cycle().await;
            tokio::time::sleep(self.config.retry_interval()).await;
        }
    }

    /// Run a single check (useful for testing and the `check` command)
    pub async fn check_once(&mut self) -> Result<Option<String>, WatchError> {
        self.check_for_updates().await
    }

    /// The current query cursor
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// The homework name most recently notified about
    pub fn last_notified(&self) -> Option<&str> {
        self.last_notified.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::mock::{MockHomeworkApi, Scripted};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Notifier that records every message it is asked to deliver
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_message(&self, text: &str) -> Result<(), WatchError> {
            self.sent.lock().unwrap().push(text.to_string());
            if self.fail {
                return Err(WatchError::Delivery("chat unreachable".to_string()));
            }
            Ok(())
        }
    }

    fn watcher_with(api: Arc<MockHomeworkApi>, notifier: Arc<RecordingNotifier>) -> HomeworkWatcher {
        HomeworkWatcher::new(WatcherConfig::default(), api, notifier)
    }

    fn approved_page() -> serde_json::Value {
        json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1000
        })
    }

    #[tokio::test]
    async fn test_check_once_reports_change_and_advances_cursor() {
        let api = Arc::new(MockHomeworkApi::new(vec![Scripted::Page(approved_page())]));
        let notifier = Arc::new(RecordingNotifier::new());
        let mut watcher = watcher_with(api.clone(), notifier);

        let message = watcher.check_once().await.unwrap();
        assert_eq!(
            message.as_deref(),
            Some("Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!")
        );

        // First request used the initial cursor; next will use 1000 - 600
        assert_eq!(api.last_from_date(), Some(0));
        assert_eq!(watcher.cursor(), 400);
        assert_eq!(watcher.last_notified(), Some("hw1"));
    }

    #[tokio::test]
    async fn test_check_once_empty_list_is_quiet() {
        let api = Arc::new(MockHomeworkApi::new(vec![Scripted::Page(
            json!({"homeworks": [], "current_date": 1000}),
        )]));
        let notifier = Arc::new(RecordingNotifier::new());
        let mut watcher = watcher_with(api, notifier.clone());

        let message = watcher.check_once().await.unwrap();
        assert!(message.is_none());

        // Quiet cycle still advances the cursor
        assert_eq!(watcher.cursor(), 400);
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_same_homework_notifies_once() {
        let api = Arc::new(MockHomeworkApi::new(vec![
            Scripted::Page(approved_page()),
            Scripted::Page(json!({
                "homeworks": [{"homework_name": "hw1", "status": "approved"}],
                "current_date": 1600
            })),
        ]));
        let notifier = Arc::new(RecordingNotifier::new());
        let mut watcher = watcher_with(api, notifier.clone());

        watcher.cycle().await;
        watcher.cycle().await;

        assert_eq!(notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_new_homework_name_notifies_again() {
        let api = Arc::new(MockHomeworkApi::new(vec![
            Scripted::Page(approved_page()),
            Scripted::Page(json!({
                "homeworks": [{"homework_name": "hw2", "status": "reviewing"}],
                "current_date": 1600
            })),
        ]));
        let notifier = Arc::new(RecordingNotifier::new());
        let mut watcher = watcher_with(api, notifier.clone());

        watcher.cycle().await;
        watcher.cycle().await;

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[1].contains("\"hw2\""));
        assert!(sent[1].contains("Работа взята на проверку ревьюером."));
    }

    #[tokio::test]
    async fn test_http_error_sends_failure_report() {
        let api = Arc::new(MockHomeworkApi::new(vec![Scripted::Status(503)]));
        let notifier = Arc::new(RecordingNotifier::new());
        let mut watcher = watcher_with(api, notifier.clone());

        watcher.cycle().await;

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("Сбой в работе программы:"));
        assert!(sent[0].contains("503"));
    }

    #[tokio::test]
    async fn test_unknown_status_sends_failure_report() {
        let api = Arc::new(MockHomeworkApi::new(vec![Scripted::Page(json!({
            "homeworks": [{"homework_name": "hw1", "status": "archived"}],
            "current_date": 1000
        }))]));
        let notifier = Arc::new(RecordingNotifier::new());
        let mut watcher = watcher_with(api, notifier.clone());

        watcher.cycle().await;

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("Сбой в работе программы:"));
        assert!(sent[0].contains("archived"));
    }

    #[tokio::test]
    async fn test_shape_error_sends_failure_report() {
        let api = Arc::new(MockHomeworkApi::new(vec![Scripted::Page(json!({
            "homeworks": "not a list",
            "current_date": 1000
        }))]));
        let notifier = Arc::new(RecordingNotifier::new());
        let mut watcher = watcher_with(api, notifier.clone());

        watcher.cycle().await;

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("Сбой в работе программы:"));
    }

    #[tokio::test]
    async fn test_delivery_failure_is_contained() {
        let api = Arc::new(MockHomeworkApi::new(vec![
            Scripted::Page(approved_page()),
            Scripted::Page(json!({
                "homeworks": [{"homework_name": "hw2", "status": "rejected"}],
                "current_date": 1600
            })),
        ]));
        let notifier = Arc::new(RecordingNotifier::failing());
        let mut watcher = watcher_with(api.clone(), notifier.clone());

        // Both cycles run to completion despite every send failing
        watcher.cycle().await;
        watcher.cycle().await;

        assert_eq!(api.call_count(), 2);
        assert_eq!(notifier.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_current_date_keeps_cursor() {
        let api = Arc::new(MockHomeworkApi::new(vec![Scripted::Page(json!({
            "homeworks": []
        }))]));
        let notifier = Arc::new(RecordingNotifier::new());
        let mut watcher = watcher_with(api, notifier);

        let message = watcher.check_once().await.unwrap();
        assert!(message.is_none());
        assert_eq!(watcher.cursor(), 0);
    }
}
