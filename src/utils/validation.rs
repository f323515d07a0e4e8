use crate::utils::error::{RelayError, Result};
use chrono_tz::Tz;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> RelayError {
    RelayError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Telegram API 位址與 `--endpoint` 都必須是帶主機名稱的 http(s) URL
pub fn validate_http_url(field_name: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value.trim())
        .map_err(|e| invalid(field_name, value, format!("not a URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            value,
            format!("relay only speaks http(s), got '{}'", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(invalid(field_name, value, "URL has no host"));
    }
    Ok(url)
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "must not be blank"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("expected {}..={}", min, max),
        ));
    }
    Ok(())
}

/// 驗證 IANA 時區名稱，例如 `Europe/Kyiv`
pub fn validate_timezone(field_name: &str, value: &str) -> Result<Tz> {
    value
        .parse::<Tz>()
        .map_err(|e| invalid(field_name, value, format!("unknown timezone: {}", e)))
}
