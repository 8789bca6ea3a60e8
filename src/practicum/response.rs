//! Shape checks for the raw homework status payload.

use serde_json::Value;

use crate::error::PollError;

const KEY_HOMEWORKS: &str = "homeworks";
const KEY_CURRENT_DATE: &str = "current_date";
const KNOWN_KEYS: [&str; 2] = [KEY_HOMEWORKS, KEY_CURRENT_DATE];

/// A payload that passed [`validate_response`].
#[derive(Debug, Clone, PartialEq)]
pub struct StatusResponse {
    /// Item records, newest first. May be empty.
    pub homeworks: Vec<Value>,
    /// Server time of the answer, usable as the next `from_date`.
    pub current_date: Option<i64>,
}

impl StatusResponse {
    pub fn latest(&self) -> Option<&Value> {
        self.homeworks.first()
    }
}

/// Checks order: mapping, known keys, `homeworks` present, `homeworks` is a
/// list, `current_date` (if present) is an integer.
pub fn validate_response(raw: Value) -> Result<StatusResponse, PollError> {
    let Value::Object(mut map) = raw else {
        return Err(PollError::InvalidResponseShape);
    };

    if let Some(key) = map.keys().find(|k| !KNOWN_KEYS.contains(&k.as_str())) {
        return Err(PollError::UnexpectedKey { key: key.clone() });
    }

    let homeworks = match map.remove(KEY_HOMEWORKS) {
        None => {
            return Err(PollError::MissingField {
                field: KEY_HOMEWORKS,
            });
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(PollError::WrongFieldType {
                field: KEY_HOMEWORKS,
                expected: "list",
            });
        }
    };

    let current_date = match map.remove(KEY_CURRENT_DATE) {
        None => None,
        Some(v) => Some(v.as_i64().ok_or(PollError::WrongFieldType {
            field: KEY_CURRENT_DATE,
            expected: "integer",
        })?),
    };

    Ok(StatusResponse {
        homeworks,
        current_date,
    })
}
