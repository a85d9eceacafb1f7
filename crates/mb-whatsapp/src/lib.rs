//! mb-whatsapp: WhatsApp Cloud API integration for menubot
//!
//! Graph API client, webhook payload types, and the axum webhook server.

pub mod api;
pub mod error;
pub mod types;
pub mod webhook;

pub use api::WhatsAppApi;
pub use error::{Result, WhatsAppError};
pub use types::WebhookPayload;
pub use webhook::{create_webhook_router, start_webhook_server, WebhookState};
