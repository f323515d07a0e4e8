use crate::config::RelayConfig;
use crate::utils::error::{RelayError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("static placeholder pattern"));

impl RelayConfig {
    /// 從 TOML 檔案載入配置，未設定的值再以環境變數補上
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RelayError::IoError)?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RelayError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// 替換環境變數 (例如 ${TG_BOT_TOKEN})，找不到的變數保留原樣
pub fn substitute_env_vars(content: &str) -> String {
    ENV_PLACEHOLDER
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
}

pub fn is_placeholder(value: &str) -> bool {
    ENV_PLACEHOLDER.is_match(value)
}
