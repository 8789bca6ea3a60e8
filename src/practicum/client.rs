use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::PollError;

/// Anything that can answer a homework status query for a given `from_date`.
pub trait StatusSource {
    async fn fetch(&self, from_date: i64) -> Result<Value, PollError>;
}

/// HTTP client for the Practicum homework status endpoint.
pub struct PracticumClient {
    token: String,
    client: Client,
    endpoint: String,
}

impl PracticumClient {
    pub fn new(token: String, endpoint: String, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            token,
            client,
            endpoint,
        })
    }
}

impl StatusSource for PracticumClient {
    /// One GET, no retries. Retrying is left to the next poll cycle.
    async fn fetch(&self, from_date: i64) -> Result<Value, PollError> {
        debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PollError::UnexpectedStatusCode {
                code: status.as_u16(),
            });
        }

        // A body that is not JSON surfaces as a reqwest decode error.
        let body = response.json::<Value>().await?;
        Ok(body)
    }
}
