//! Webhook server for the WhatsApp Cloud API
//!
//! Handles the Meta subscription handshake and incoming message
//! notifications. Notifications are always acknowledged with 200 so Meta
//! does not retry; processing failures are logged, never surfaced.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use tracing::{debug, error, info, warn};

use mb_core::MessageHandler;

use crate::api::WhatsAppApi;
use crate::error::{Result, WhatsAppError};
use crate::types::WebhookPayload;

type HmacSha256 = Hmac<Sha256>;

/// Webhook server state
#[derive(Clone)]
pub struct WebhookState {
    pub api: Arc<WhatsAppApi>,
    pub handler: Arc<MessageHandler>,
    /// When set, `X-Hub-Signature-256` is required and verified.
    pub app_secret: Option<String>,
}

/// Handshake query parameters (`hub.*` keys)
#[derive(Debug, Deserialize)]
struct VerifyParams {
    #[serde(rename = "hub.mode")]
    mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    challenge: Option<String>,
}

/// Create the webhook router
pub fn create_webhook_router(state: WebhookState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/webhook", get(verify_webhook).post(handle_webhook))
        .with_state(Arc::new(state))
}

async fn health() -> &'static str {
    "Server is running"
}

/// GET /webhook - Meta subscription handshake
async fn verify_webhook(
    State(state): State<Arc<WebhookState>>,
    Query(params): Query<VerifyParams>,
) -> impl IntoResponse {
    let mode = params.mode.unwrap_or_default();
    let token = params.verify_token.unwrap_or_default();
    let challenge = params.challenge.unwrap_or_default();

    match state.api.verify_webhook(&mode, &token, &challenge) {
        Ok(challenge) => (StatusCode::OK, challenge),
        Err(_) => (StatusCode::FORBIDDEN, String::new()),
    }
}

/// POST /webhook - incoming message notifications
async fn handle_webhook(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if let Some(secret) = &state.app_secret {
        let signature = headers
            .get("x-hub-signature-256")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !verify_signature(secret, &body, signature) {
            warn!("Invalid webhook signature");
            return StatusCode::UNAUTHORIZED;
        }
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            // Malformed notifications are acknowledged and dropped.
            debug!(error = %e, "Ignoring malformed webhook payload");
            return StatusCode::OK;
        }
    };

    for event in payload.events() {
        if let Err(e) = state.handler.handle_event(event).await {
            error!(error = %e, "Error handling inbound event");
            // Keep processing the remaining events.
        }
    }

    StatusCode::OK
}

/// Verify the `X-Hub-Signature-256` header (`sha256=<hex digest>` over the
/// raw body, keyed with the app secret).
fn verify_signature(app_secret: &str, body: &[u8], signature: &str) -> bool {
    let Some(signature) = signature.strip_prefix("sha256=") else {
        return false;
    };

    let mut mac = match HmacSha256::new_from_slice(app_secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(body);
    let computed = hex::encode(mac.finalize().into_bytes());

    computed == signature
}

/// Start the webhook server
pub async fn start_webhook_server(state: WebhookState, port: u16) -> Result<()> {
    let app = create_webhook_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| WhatsAppError::Http(e.to_string()))?;

    info!("Webhook server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| WhatsAppError::Http(e.to_string()))?;

    Ok(())
}
