//! API Gateway / Function URL proxy events for the serverless entry point.
//!
//! Both payload versions are accepted: v1 carries `httpMethod`, v2 carries
//! `requestContext.http.method`.

use crate::api::submit::SubmitEndpoint;
use axum::http::Method;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    pub http_method: Option<String>,
    pub request_context: Option<RequestContext>,
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    pub http: Option<HttpContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpContext {
    pub method: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl GatewayRequest {
    /// 找不到 method 時視為 GET，由端點回 405
    pub fn method(&self) -> Method {
        let raw = self
            .http_method
            .as_deref()
            .or_else(|| {
                self.request_context
                    .as_ref()
                    .and_then(|ctx| ctx.http.as_ref())
                    .map(|http| http.method.as_str())
            })
            .unwrap_or("GET");

        Method::from_bytes(raw.to_ascii_uppercase().as_bytes()).unwrap_or(Method::GET)
    }

    pub fn body_bytes(&self) -> Vec<u8> {
        let Some(body) = &self.body else {
            return Vec::new();
        };

        if self.is_base64_encoded {
            STANDARD.decode(body).unwrap_or_else(|e| {
                tracing::warn!("Discarding body with invalid base64 encoding: {}", e);
                Vec::new()
            })
        } else {
            body.as_bytes().to_vec()
        }
    }
}

pub async fn handle_event(endpoint: &SubmitEndpoint, request: GatewayRequest) -> GatewayResponse {
    let method = request.method();
    let reply = endpoint.handle(&method, &request.body_bytes()).await;

    let mut headers = HashMap::new();
    headers.insert("content-type".to_string(), "application/json".to_string());
    if reply.status == axum::http::StatusCode::METHOD_NOT_ALLOWED {
        headers.insert("allow".to_string(), "POST".to_string());
    }

    let body = serde_json::to_string(&reply.body).unwrap_or_else(|_| {
        r#"{"status":"error","message":"Failed to process request"}"#.to_string()
    });

    GatewayResponse {
        status_code: reply.status.as_u16(),
        headers,
        body,
        is_base64_encoded: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_v1_and_v2_events() {
        let v1: GatewayRequest =
            serde_json::from_value(serde_json::json!({"httpMethod": "POST", "body": "{}"}))
                .unwrap();
        assert_eq!(v1.method(), Method::POST);

        let v2: GatewayRequest = serde_json::from_value(serde_json::json!({
            "requestContext": {"http": {"method": "put"}},
            "body": null
        }))
        .unwrap();
        assert_eq!(v2.method(), Method::PUT);

        assert_eq!(GatewayRequest::default().method(), Method::GET);
    }

    #[test]
    fn test_base64_body_is_decoded() {
        let request = GatewayRequest {
            body: Some(STANDARD.encode(r#"{"name":"Ivan"}"#)),
            is_base64_encoded: true,
            ..Default::default()
        };
        assert_eq!(request.body_bytes(), br#"{"name":"Ivan"}"#.to_vec());

        let broken = GatewayRequest {
            body: Some("%%%".to_string()),
            is_base64_encoded: true,
            ..Default::default()
        };
        assert!(broken.body_bytes().is_empty());
    }

    #[tokio::test]
    async fn test_handle_event_without_credentials() {
        let endpoint = SubmitEndpoint::new(None);
        let request = GatewayRequest {
            http_method: Some("POST".to_string()),
            body: Some(r#"{"name":"Ivan","phone":"+380931234567"}"#.to_string()),
            ..Default::default()
        };

        let response = handle_event(&endpoint, request).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body,
            r#"{"status":"error","message":"Server Configuration Error"}"#
        );
        assert_eq!(response.headers["content-type"], "application/json");
    }

    #[tokio::test]
    async fn test_handle_event_rejects_get() {
        let endpoint = SubmitEndpoint::new(None);
        let request = GatewayRequest {
            http_method: Some("GET".to_string()),
            ..Default::default()
        };

        let response = handle_event(&endpoint, request).await;
        assert_eq!(response.status_code, 405);
        assert_eq!(response.headers["allow"], "POST");
    }
}
