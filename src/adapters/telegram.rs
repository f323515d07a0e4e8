use crate::config::TelegramCredentials;
use crate::core::message::LeadMessage;
use crate::domain::model::Submission;
use crate::domain::ports::Relay;
use crate::utils::error::{RelayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";
pub const DELIVERED_MESSAGE: &str = "Message sent to Telegram successfully";

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// 直接呼叫 Bot API `sendMessage` 的 relay，憑證只存在於行程設定中
pub struct TelegramRelay {
    client: Client,
    api_base: String,
    credentials: TelegramCredentials,
    message: LeadMessage,
}

impl TelegramRelay {
    pub fn new(
        credentials: TelegramCredentials,
        api_base: impl Into<String>,
        message: LeadMessage,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            credentials,
            message,
        })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base, self.credentials.bot_token
        )
    }
}

#[async_trait]
impl Relay for TelegramRelay {
    async fn send(&self, submission: &Submission) -> Result<String> {
        let text = self.message.render(&submission.name, &submission.phone);
        let body = SendMessageRequest {
            chat_id: &self.credentials.chat_id,
            text: &text,
            parse_mode: "Markdown",
        };

        // URL 內含 bot token，錯誤訊息中一律去掉 URL
        tracing::debug!("Sending lead to Telegram chat {}", self.credentials.chat_id);
        let response = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::HttpError(e.without_url()))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| RelayError::HttpError(e.without_url()))?;
        tracing::debug!("Telegram response status: {}", status);

        let parsed = serde_json::from_str::<SendMessageResponse>(&raw);

        if !status.is_success() {
            let description = match parsed {
                Ok(SendMessageResponse {
                    description: Some(description),
                    ..
                }) => description,
                _ => raw,
            };
            tracing::error!("❌ Telegram API error {}: {}", status.as_u16(), description);
            return Err(RelayError::UpstreamError {
                status: status.as_u16(),
                description,
            });
        }

        let parsed = parsed.map_err(|e| RelayError::MalformedResponse {
            message: format!("sendMessage body is not valid JSON: {}", e),
        })?;

        if !parsed.ok {
            return Err(RelayError::UpstreamError {
                status: status.as_u16(),
                description: parsed
                    .description
                    .unwrap_or_else(|| "ok=false without description".to_string()),
            });
        }

        Ok(DELIVERED_MESSAGE.to_string())
    }
}
