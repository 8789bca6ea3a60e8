//! Telegram Bot API channel.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::MessageChannel;
use crate::error::NotificationError;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Envelope of every Bot API answer. Only the error fields are read.
#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramChannel {
    token: String,
    client: Client,
    api_url: String,
}

impl TelegramChannel {
    pub fn new(token: String, api_url: String, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            token,
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_url, self.token)
    }
}

impl MessageChannel for TelegramChannel {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .map_err(|e| e.without_url())?;

        let status = response.status();
        // The Bot API answers errors with a JSON body too; fall back to the
        // status line when it does not.
        let reply = response.json::<ApiReply>().await.ok();

        match reply {
            Some(ApiReply { ok: true, .. }) if status.is_success() => Ok(()),
            Some(reply) => Err(NotificationError::Api {
                status: status.as_u16(),
                description: reply
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            }),
            None => Err(NotificationError::Api {
                status: status.as_u16(),
                description: status
                    .canonical_reason()
                    .unwrap_or("unreadable response")
                    .to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn channel_for(server: &MockServer) -> TelegramChannel {
        TelegramChannel::new("123:abc".into(), server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn posts_send_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(body_json(json!({"chat_id": "42", "text": "привет"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": true, "result": {"message_id": 1}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        channel_for(&server).send("42", "привет").await.unwrap();
    }

    #[tokio::test]
    async fn api_error_carries_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let err = channel_for(&server).send("42", "hi").await.unwrap_err();
        match err {
            NotificationError::Api {
                status,
                description,
            } => {
                assert_eq!(status, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_uses_status_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = channel_for(&server).send("42", "hi").await.unwrap_err();
        assert!(matches!(err, NotificationError::Api { status: 502, .. }));
    }

    #[tokio::test]
    async fn unreachable_api_is_transport_error() {
        let channel = TelegramChannel::new(
            "123:abc".into(),
            "http://127.0.0.1:1".into(),
            Duration::from_secs(5),
        )
        .unwrap();
        let err = channel.send("42", "hi").await.unwrap_err();
        assert!(matches!(err, NotificationError::Transport(_)));
        // The bot token is part of the URL and must not leak into logs.
        assert!(!err.to_string().contains("123:abc"));
    }

    #[test]
    fn method_url_trims_trailing_slash() {
        let channel = TelegramChannel::new(
            "t".into(),
            "https://api.telegram.org/".into(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            channel.method_url("sendMessage"),
            "https://api.telegram.org/bott/sendMessage"
        );
    }
}
