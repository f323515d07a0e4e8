use crate::api::ApiResponse;
use crate::domain::model::Submission;
use crate::domain::ports::Relay;
use crate::utils::error::{RelayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// 把 `{name, phone}` 交給 `/api/submit`，由伺服器端持有 Telegram 憑證
pub struct EndpointRelay {
    client: Client,
    endpoint: String,
}

impl EndpointRelay {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Relay for EndpointRelay {
    async fn send(&self, submission: &Submission) -> Result<String> {
        tracing::debug!("Posting submission to {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        tracing::debug!("Relay endpoint response status: {}", status);

        let parsed = serde_json::from_str::<ApiResponse>(&raw);

        if !status.is_success() {
            let description = match parsed {
                Ok(body) => body.message,
                Err(_) => raw,
            };
            return Err(RelayError::UpstreamError {
                status: status.as_u16(),
                description,
            });
        }

        match parsed {
            Ok(body) if body.is_success() => Ok(body.message),
            Ok(body) => Err(RelayError::MalformedResponse {
                message: format!("unexpected status '{}' in acknowledgement", body.status),
            }),
            Err(e) => Err(RelayError::MalformedResponse {
                message: format!("acknowledgement is not valid JSON: {}", e),
            }),
        }
    }
}
