//! Best-effort delivery of chat messages.
//!
//! [`MessageChannel`] is the transport capability (Telegram in production, a
//! recording mock in tests). [`Notifier`] binds a channel to one destination
//! chat and turns every delivery error into a logged [`Delivery::Failed`], so
//! a broken channel can never take the poll loop down.

pub mod telegram;

use tracing::{debug, error};

use crate::error::NotificationError;

pub use telegram::TelegramChannel;

pub trait MessageChannel {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), NotificationError>;
}

/// Result of a delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    Failed,
}

pub struct Notifier<C> {
    channel: C,
    chat_id: String,
}

impl<C: MessageChannel> Notifier<C> {
    pub fn new(channel: C, chat_id: String) -> Self {
        Self { channel, chat_id }
    }

    pub async fn deliver(&self, text: &str) -> Delivery {
        match self.channel.send(&self.chat_id, text).await {
            Ok(()) => {
                debug!(chat_id = %self.chat_id, "Message sent");
                Delivery::Delivered
            }
            Err(e) => {
                error!(
                    chat_id = %self.chat_id,
                    error = %e,
                    text,
                    "Failed to send message"
                );
                Delivery::Failed
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::MessageChannel;
    use crate::error::NotificationError;

    /// Records every send; optionally fails each one after recording it.
    #[derive(Clone, Default)]
    pub struct RecordingChannel {
        pub sent: Arc<Mutex<Vec<(String, String)>>>,
        pub fail: bool,
    }

    impl RecordingChannel {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn texts(&self) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|(_, text)| text.clone())
                .collect()
        }
    }

    impl MessageChannel for RecordingChannel {
        async fn send(&self, chat_id: &str, text: &str) -> Result<(), NotificationError> {
            self.sent
                .lock()
                .unwrap()
                .push((chat_id.to_string(), text.to_string()));
            if self.fail {
                Err(NotificationError::Api {
                    status: 500,
                    description: "mock failure".into(),
                })
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingChannel;
    use super::*;

    #[tokio::test]
    async fn delivers_to_bound_chat() {
        let channel = RecordingChannel::default();
        let notifier = Notifier::new(channel.clone(), "42".into());

        assert_eq!(notifier.deliver("hello").await, Delivery::Delivered);
        assert_eq!(
            *channel.sent.lock().unwrap(),
            vec![("42".to_string(), "hello".to_string())]
        );
    }

    #[tokio::test]
    async fn failure_is_swallowed() {
        let channel = RecordingChannel::failing();
        let notifier = Notifier::new(channel.clone(), "42".into());

        assert_eq!(notifier.deliver("hello").await, Delivery::Failed);
        assert_eq!(channel.texts(), vec!["hello".to_string()]);
    }
}
