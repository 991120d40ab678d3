//! Status-to-verdict mapping and notification text

use tracing::debug;

use crate::api::Homework;
use crate::error::WatchError;

/// Review verdict for a homework
///
/// The set is fixed; any status code outside it is a lookup failure
/// for the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    /// Parse a raw status code from the API
    pub fn parse(status: &str) -> Option<Self> {
        match status {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// The localized verdict sentence
    pub fn text(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Compose the notification text for a homework's current status
pub fn render_status_change(homework: &Homework) -> Result<String, WatchError> {
    let verdict =
        Verdict::parse(&homework.status).ok_or_else(|| WatchError::UnknownStatus(homework.status.clone()))?;

    debug!(name = %homework.homework_name, status = %homework.status, "render_status_change: matched verdict");
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        homework.homework_name,
        verdict.text()
    ))
}
