//! HomeworkApi trait definition

use async_trait::async_trait;

use crate::error::WatchError;

/// Stateless review API client - one request per poll cycle
///
/// The watcher only ever asks one question: "what changed since this
/// timestamp." Implementations own the transport; the watcher owns the
/// cursor and everything downstream of the raw JSON document.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetch homework statuses changed since `from_date` (Unix seconds)
    ///
    /// Returns the decoded JSON document. Shape validation happens in
    /// [`check_response`](crate::api::check_response), not here.
    async fn homework_statuses(&self, from_date: i64) -> Result<serde_json::Value, WatchError>;
}
