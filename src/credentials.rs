//! Secrets required before the poll loop may start.

use crate::error::MissingCredentials;

pub const ENV_PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const ENV_TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// The three secrets the bot cannot run without. Immutable once loaded.
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"***")
            .field("telegram_token", &"***")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl Credentials {
    /// Reads the secrets from the process environment.
    pub fn from_env() -> Result<Self, MissingCredentials> {
        Self::from_values(
            std::env::var(ENV_PRACTICUM_TOKEN).ok(),
            std::env::var(ENV_TELEGRAM_TOKEN).ok(),
            std::env::var(ENV_TELEGRAM_CHAT_ID).ok(),
        )
    }

    /// Succeeds only if all three values are present and non-empty.
    /// On failure every missing variable is named, not just the first one.
    pub fn from_values(
        practicum_token: Option<String>,
        telegram_token: Option<String>,
        chat_id: Option<String>,
    ) -> Result<Self, MissingCredentials> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());

        let missing: Vec<&'static str> = [
            (ENV_PRACTICUM_TOKEN, present(&practicum_token)),
            (ENV_TELEGRAM_TOKEN, present(&telegram_token)),
            (ENV_TELEGRAM_CHAT_ID, present(&chat_id)),
        ]
        .into_iter()
        .filter(|&(_, ok)| !ok)
        .map(|(name, _)| name)
        .collect();

        match (practicum_token, telegram_token, chat_id) {
            (Some(practicum_token), Some(telegram_token), Some(chat_id)) if missing.is_empty() => {
                Ok(Self {
                    practicum_token,
                    telegram_token,
                    chat_id,
                })
            }
            _ => Err(MissingCredentials { missing }),
        }
    }
}
