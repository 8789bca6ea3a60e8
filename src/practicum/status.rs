use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::PollError;

/// The three review states the API documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Human-readable verdict sent to the chat.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = PollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(PollError::UnknownStatus {
                status: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeworkStatus::Approved => write!(f, "approved"),
            HomeworkStatus::Reviewing => write!(f, "reviewing"),
            HomeworkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// The most recent homework reported by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub name: String,
    pub status: HomeworkStatus,
}

impl HomeworkRecord {
    /// Extracts `homework_name` and `status` from one raw record.
    /// Other keys of the record are ignored.
    pub fn from_value(raw: &Value) -> Result<Self, PollError> {
        let obj = raw.as_object().ok_or(PollError::InvalidResponseShape)?;
        let name = string_field(obj, "homework_name")?;
        let status = string_field(obj, "status")?.parse::<HomeworkStatus>()?;
        Ok(Self {
            name: name.to_string(),
            status,
        })
    }

    /// `Изменился статус проверки работы "<name>". <verdict>`
    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

fn string_field<'a>(
    obj: &'a serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, PollError> {
    obj.get(field)
        .ok_or(PollError::MissingField { field })?
        .as_str()
        .ok_or(PollError::WrongFieldType {
            field,
            expected: "string",
        })
}

/// Interprets one raw record and renders its verdict message.
pub fn parse_status(raw: &Value) -> Result<String, PollError> {
    HomeworkRecord::from_value(raw).map(|record| record.message())
}
