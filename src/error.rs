use thiserror::Error;

/// Startup failure: one or more required secrets are absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Отсутствуют обязательные переменные окружения: {}", .missing.join(", "))]
pub struct MissingCredentials {
    pub missing: Vec<&'static str>,
}

/// Recoverable failure of a single poll cycle.
///
/// Display texts end up inside the Telegram alert, so they are written
/// for the chat reader rather than for the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    #[error("эндпоинт недоступен: {cause}")]
    Transport { cause: String },

    #[error("статус ответа API не 200, а {code}")]
    UnexpectedStatusCode { code: u16 },

    #[error("ответ API не является словарём")]
    InvalidResponseShape,

    #[error("в ответе API неожиданный ключ `{key}`")]
    UnexpectedKey { key: String },

    #[error("в ответе API нет ключа `{field}`")]
    MissingField { field: &'static str },

    #[error("в ответе API под ключом `{field}` ожидался тип {expected}")]
    WrongFieldType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("недокументированный статус домашней работы: {status}")]
    UnknownStatus { status: String },
}

impl From<reqwest::Error> for PollError {
    fn from(err: reqwest::Error) -> Self {
        PollError::Transport {
            cause: err.to_string(),
        }
    }
}

impl PollError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PollError::Transport { .. } | PollError::UnexpectedStatusCode { .. } => {
                FailureKind::Remote
            }
            _ => FailureKind::Contract,
        }
    }
}

/// Failure to hand a message to the messaging channel. Logged, never re-raised.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Telegram API error (status {status}): {description}")]
    Api { status: u16, description: String },
}

/// Classifies a poll failure for log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The source was unreachable or answered with a non-success status.
    Remote,
    /// The payload did not match the documented API.
    Contract,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Remote => write!(f, "remote"),
            FailureKind::Contract => write!(f, "contract"),
        }
    }
}
