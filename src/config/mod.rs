#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

use crate::adapters::TelegramRelay;
use crate::core::message::{LeadMessage, DEFAULT_HEADLINE, DEFAULT_TIMEZONE};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_http_url, validate_range, validate_timezone, Validate,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;

pub const ENV_BOT_TOKEN: &str = "TG_BOT_TOKEN";
pub const ENV_CHAT_ID: &str = "TG_CHAT_ID";
pub const ENV_API_BASE: &str = "TG_API_BASE";
pub const ENV_TIMEZONE: &str = "RELAY_TIMEZONE";
pub const ENV_HOST: &str = "RELAY_HOST";
pub const ENV_PORT: &str = "RELAY_PORT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub message: MessageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageConfig {
    #[serde(default = "default_headline")]
    pub headline: String,
    pub source_tag: Option<String>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_base() -> String {
    crate::adapters::telegram::DEFAULT_API_BASE.to_string()
}

fn default_headline() -> String {
    DEFAULT_HEADLINE.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            bot_token: None,
            chat_id: None,
            timeout_seconds: None,
        }
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            headline: default_headline(),
            source_tag: None,
            timezone: default_timezone(),
        }
    }
}

/// Bot token 與目標聊天室，兩者都必須存在
#[derive(Clone, PartialEq, Eq)]
pub struct TelegramCredentials {
    pub bot_token: String,
    pub chat_id: String,
}

impl TelegramCredentials {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }
}

// token 不能出現在日誌裡
impl fmt::Debug for TelegramCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramCredentials")
            .field("bot_token", &"***")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl RelayConfig {
    /// 只從環境變數建立設定 (serverless 部署)
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// 以環境變數補上檔案中未設定的值
    pub fn apply_env(&mut self) {
        fill_from_env(&mut self.telegram.bot_token, ENV_BOT_TOKEN);
        fill_from_env(&mut self.telegram.chat_id, ENV_CHAT_ID);

        if let Ok(api_base) = env::var(ENV_API_BASE) {
            if !api_base.trim().is_empty() {
                self.telegram.api_base = api_base;
            }
        }
        if let Ok(timezone) = env::var(ENV_TIMEZONE) {
            if !timezone.trim().is_empty() {
                self.message.timezone = timezone;
            }
        }
        if let Ok(host) = env::var(ENV_HOST) {
            if !host.trim().is_empty() {
                self.server.host = host;
            }
        }
        if let Some(port) = env::var(ENV_PORT).ok().and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }
    }

    /// 任一憑證缺少 (或仍是未展開的 `${VAR}`) 時回傳 None
    pub fn credentials(&self) -> Option<TelegramCredentials> {
        let bot_token = present(&self.telegram.bot_token)?;
        let chat_id = present(&self.telegram.chat_id)?;
        Some(TelegramCredentials::new(bot_token, chat_id))
    }

    pub fn lead_message(&self) -> Result<LeadMessage> {
        let timezone = validate_timezone("message.timezone", &self.message.timezone)?;
        Ok(LeadMessage::new(
            self.message.headline.clone(),
            self.message.source_tag.clone(),
            timezone,
        ))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.telegram.timeout_seconds.map(Duration::from_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 憑證齊全時建立 TelegramRelay；缺少時回傳 None，由端點逐次回 500
    pub fn telegram_relay(&self) -> Result<Option<TelegramRelay>> {
        match self.credentials() {
            Some(credentials) => Ok(Some(TelegramRelay::new(
                credentials,
                self.telegram.api_base.clone(),
                self.lead_message()?,
                self.request_timeout(),
            )?)),
            None => Ok(None),
        }
    }
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_range("server.port", self.server.port, 1, u16::MAX)?;
        validate_http_url("telegram.api_base", &self.telegram.api_base)?;
        if let Some(timeout) = self.telegram.timeout_seconds {
            validate_range("telegram.timeout_seconds", timeout, 1, 300)?;
        }
        validate_non_empty_string("message.headline", &self.message.headline)?;
        validate_timezone("message.timezone", &self.message.timezone)?;

        // 憑證缺少不算設定錯誤，端點會逐次回應 500
        if self.credentials().is_none() {
            tracing::warn!(
                "⚠️ {} / {} are not set; /api/submit will answer 500",
                ENV_BOT_TOKEN,
                ENV_CHAT_ID
            );
        }

        tracing::debug!("✅ Relay configuration validation passed");
        Ok(())
    }
}

fn fill_from_env(slot: &mut Option<String>, var: &str) {
    if present(slot).is_none() {
        if let Ok(value) = env::var(var) {
            *slot = Some(value);
        }
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !toml_config::is_placeholder(v))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.telegram.api_base, "https://api.telegram.org");
        assert_eq!(config.message.timezone, "Europe/Kyiv");
        assert!(config.credentials().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_credentials_require_both_values() {
        let mut config = RelayConfig::default();
        config.telegram.bot_token = Some("123:ABC".to_string());
        assert!(config.credentials().is_none());

        config.telegram.chat_id = Some("   ".to_string());
        assert!(config.credentials().is_none());

        config.telegram.chat_id = Some("-100200".to_string());
        assert_eq!(
            config.credentials(),
            Some(TelegramCredentials::new("123:ABC", "-100200"))
        );
    }

    #[test]
    fn test_unresolved_placeholder_counts_as_absent() {
        let mut config = RelayConfig::default();
        config.telegram.bot_token = Some("${SOME_UNSET_TOKEN}".to_string());
        config.telegram.chat_id = Some("-100200".to_string());
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let credentials = TelegramCredentials::new("123:SECRET", "-100200");
        let printed = format!("{:?}", credentials);
        assert!(!printed.contains("SECRET"));
        assert!(printed.contains("-100200"));
    }

    #[test]
    fn test_invalid_timezone_fails_validation() {
        let mut config = RelayConfig::default();
        config.message.timezone = "Nowhere/Land".to_string();
        assert!(config.validate().is_err());
        assert!(config.lead_message().is_err());
    }

    #[test]
    fn test_telegram_relay_absent_without_credentials() {
        let config = RelayConfig::default();
        assert!(config.telegram_relay().unwrap().is_none());
    }
}
