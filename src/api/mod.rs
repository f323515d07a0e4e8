//! HTTP surface of the relay: `POST /api/submit` and a liveness probe.

pub mod gateway;
pub mod submit;

pub use submit::{EndpointReply, SubmitEndpoint, MAX_BODY_BYTES};

use crate::config::RelayConfig;
use crate::domain::ports::Relay;
use crate::utils::error::Result;
use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;

pub const SUBMIT_PATH: &str = "/api/submit";

/// `{status, message}` JSON body shared by every endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

pub fn router(endpoint: SubmitEndpoint) -> Router {
    Router::new()
        .route(SUBMIT_PATH, any(submit_handler))
        .route("/health", get(health_handler))
        .with_state(Arc::new(endpoint))
}

/// 方法與憑證檢查在讀取 body 之前完成，body 大小不影響 405 / 500
async fn submit_handler(
    State(endpoint): State<Arc<SubmitEndpoint>>,
    request: Request,
) -> Response {
    let reply = match endpoint.precheck(request.method()) {
        Err(reply) => reply,
        Ok(relay) => match to_bytes(request.into_body(), MAX_BODY_BYTES).await {
            Ok(body) => submit::relay_body(relay.as_ref(), &body).await,
            Err(e) => {
                tracing::debug!("Failed to read submission body: {}", e);
                submit::unreadable_body_reply()
            }
        },
    };
    let mut response = (reply.status, Json(reply.body)).into_response();
    if reply.status == StatusCode::METHOD_NOT_ALLOWED {
        response
            .headers_mut()
            .insert(header::ALLOW, HeaderValue::from_static("POST"));
    }
    response
}

async fn health_handler(State(endpoint): State<Arc<SubmitEndpoint>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "configured": endpoint.is_configured(),
    }))
}

/// 依設定建立端點；憑證缺少時端點仍會啟動
pub fn endpoint_from_config(config: &RelayConfig) -> Result<SubmitEndpoint> {
    let relay = config
        .telegram_relay()?
        .map(|relay| Arc::new(relay) as Arc<dyn Relay>);
    Ok(SubmitEndpoint::new(relay))
}

/// 啟動 HTTP 伺服器，直到收到 Ctrl-C
pub async fn serve(config: &RelayConfig) -> Result<()> {
    let endpoint = endpoint_from_config(config)?;
    let app = router(endpoint);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("🌐 Relay listening on http://{}{}", address, SUBMIT_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal, stopping relay...");
        })
        .await?;

    tracing::info!("✅ Relay stopped gracefully");
    Ok(())
}
