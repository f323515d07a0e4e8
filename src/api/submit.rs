use crate::api::ApiResponse;
use crate::domain::model::Submission;
use crate::domain::ports::Relay;
use axum::http::{Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method Not Allowed. Use POST.";
pub const CONFIG_ERROR_MESSAGE: &str = "Server Configuration Error";
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: name or phone";
pub const PROCESSING_FAILED_MESSAGE: &str = "Failed to process request";

/// 表單 body 只有兩個短欄位，超過此大小一律視為無效
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// 端點回應：狀態碼 + JSON 內容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointReply {
    pub status: StatusCode,
    pub body: ApiResponse,
}

impl EndpointReply {
    fn error(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: ApiResponse::error(message),
        }
    }
}

/// `/api/submit` 的處理邏輯，HTTP 伺服器與 serverless 入口共用
///
/// `relay` 為 None 代表伺服器端憑證未設定，每個請求都回 500。
#[derive(Clone)]
pub struct SubmitEndpoint {
    relay: Option<Arc<dyn Relay>>,
}

impl SubmitEndpoint {
    pub fn new(relay: Option<Arc<dyn Relay>>) -> Self {
        Self { relay }
    }

    pub fn is_configured(&self) -> bool {
        self.relay.is_some()
    }

    /// 不看 body 的檢查：方法先於憑證
    ///
    /// 通過時回傳要使用的 relay，否則回傳應直接送出的 405 / 500。
    pub fn precheck(&self, method: &Method) -> Result<Arc<dyn Relay>, EndpointReply> {
        if *method != Method::POST {
            return Err(EndpointReply::error(
                StatusCode::METHOD_NOT_ALLOWED,
                METHOD_NOT_ALLOWED_MESSAGE,
            ));
        }

        match &self.relay {
            Some(relay) => Ok(Arc::clone(relay)),
            None => {
                tracing::error!("❌ Server Config Error: Missing Telegram Credentials");
                Err(EndpointReply::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    CONFIG_ERROR_MESSAGE,
                ))
            }
        }
    }

    pub async fn handle(&self, method: &Method, body: &[u8]) -> EndpointReply {
        match self.precheck(method) {
            Ok(relay) => relay_body(relay.as_ref(), body).await,
            Err(reply) => reply,
        }
    }
}

/// body 太大或讀取失敗時的回應，與欄位缺少同一條 400 路徑
pub fn unreadable_body_reply() -> EndpointReply {
    EndpointReply::error(StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE)
}

/// 已通過 `precheck` 後，解析 body 並交給 relay
pub async fn relay_body(relay: &dyn Relay, body: &[u8]) -> EndpointReply {
    if body.len() > MAX_BODY_BYTES {
        tracing::debug!("Rejecting oversized submission body ({} bytes)", body.len());
        return unreadable_body_reply();
    }

    let Some(submission) = parse_submission(body) else {
        tracing::debug!("Rejecting submission with missing fields");
        return EndpointReply::error(StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE);
    };

    match relay.send(&submission).await {
        Ok(detail) => {
            tracing::info!("✅ Submission relayed to Telegram");
            EndpointReply {
                status: StatusCode::OK,
                body: ApiResponse::success(detail),
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Server Handler Error: {} (Category: {:?})",
                e,
                e.category()
            );
            EndpointReply::error(StatusCode::INTERNAL_SERVER_ERROR, PROCESSING_FAILED_MESSAGE)
        }
    }
}

/// 解析 `{name, phone}`；欄位缺少、空白、非字串或 body 不是 JSON 物件時回傳 None
fn parse_submission(body: &[u8]) -> Option<Submission> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let field = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    Some(Submission::new(field("name")?, field("phone")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submission() {
        assert_eq!(
            parse_submission(br#"{"name":" Ivan ","phone":"+380931234567"}"#),
            Some(Submission::new("Ivan", "+380931234567"))
        );
        assert_eq!(parse_submission(br#"{"name":"Ivan"}"#), None);
        assert_eq!(parse_submission(br#"{"name":"","phone":"+380931234567"}"#), None);
        assert_eq!(parse_submission(br#"{"name":"Ivan","phone":380931234567}"#), None);
        assert_eq!(parse_submission(b"name=Ivan&phone=1"), None);
        assert_eq!(parse_submission(b""), None);
        assert_eq!(parse_submission(b"[]"), None);
    }

    #[test]
    fn test_precheck_ignores_body() {
        let endpoint = SubmitEndpoint::new(None);

        let reply = endpoint.precheck(&Method::PUT).err().unwrap();
        assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);

        let reply = endpoint.precheck(&Method::POST).err().unwrap();
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.body, ApiResponse::error(CONFIG_ERROR_MESSAGE));
    }
}
