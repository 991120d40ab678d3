//! Review API response types and shape validation

use serde::Deserialize;
use tracing::debug;

use crate::error::WatchError;

/// One homework record as supplied by the review API
///
/// Externally owned; `status` stays a raw string here so an unknown
/// status code is representable and fails at formatting, not decoding.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Homework {
    pub homework_name: String,
    pub status: String,
}

/// Validate the decoded API document and extract the homework list
///
/// The `homeworks` key must be present and array-typed; a missing key
/// and a wrong-typed value are distinct failures.
pub fn check_response(page: &serde_json::Value) -> Result<Vec<Homework>, WatchError> {
    let homeworks = page.get("homeworks").ok_or(WatchError::MissingField("homeworks"))?;

    let items = homeworks.as_array().ok_or(WatchError::Shape {
        field: "homeworks",
        expected: "array",
    })?;

    let homeworks = items
        .iter()
        .map(|item| {
            serde_json::from_value(item.clone()).map_err(|_| WatchError::Shape {
                field: "homeworks",
                expected: "objects with homework_name and status",
            })
        })
        .collect::<Result<Vec<Homework>, WatchError>>()?;

    debug!(count = homeworks.len(), "check_response: valid");
    Ok(homeworks)
}
