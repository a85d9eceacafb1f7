//! WhatsApp Cloud API client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::{Result, WhatsAppError};

/// Graph API client for the WhatsApp Business Cloud API
#[derive(Debug, Clone)]
pub struct WhatsAppApi {
    client: Client,
    access_token: String,
    verify_token: String,
    api_version: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct SendMessagePayload {
    messaging_product: String,
    to: String,
    text: TextPayload,
}

#[derive(Debug, Serialize)]
struct TextPayload {
    body: String,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    #[serde(default)]
    messages: Vec<SentMessage>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    id: String,
}

impl WhatsAppApi {
    /// Create a new Cloud API client
    pub fn new(access_token: &str, verify_token: &str) -> Self {
        Self {
            client: Client::new(),
            access_token: access_token.to_string(),
            verify_token: verify_token.to_string(),
            api_version: "v18.0".to_string(),
            base_url: "https://graph.facebook.com".to_string(),
        }
    }

    /// Override the API endpoint (configuration and tests)
    pub fn with_endpoint(mut self, base_url: &str, api_version: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self.api_version = api_version.to_string();
        self
    }

    /// Send a text message to a WhatsApp user through the given
    /// phone-number-id.
    pub async fn send_text_message(
        &self,
        phone_number_id: &str,
        to: &str,
        body: &str,
    ) -> Result<String> {
        let url = format!(
            "{}/{}/{}/messages",
            self.base_url, self.api_version, phone_number_id
        );

        let payload = SendMessagePayload {
            messaging_product: "whatsapp".to_string(),
            to: to.to_string(),
            text: TextPayload {
                body: body.to_string(),
            },
        };

        debug!(to, "Sending WhatsApp message");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!(%status, "WhatsApp API error: {}", text);
            return Err(WhatsAppError::Api(format!("{} - {}", status, text)));
        }

        let result: SendMessageResponse = response.json().await?;
        let message_id = result
            .messages
            .into_iter()
            .next()
            .map(|m| m.id)
            .unwrap_or_default();

        debug!(to, message_id = %message_id, "Message sent successfully");
        Ok(message_id)
    }

    /// Webhook subscription handshake: echo the challenge when the verify
    /// token matches.
    pub fn verify_webhook(&self, mode: &str, token: &str, challenge: &str) -> Result<String> {
        if mode == "subscribe" && token == self.verify_token {
            info!("Webhook verified successfully");
            Ok(challenge.to_string())
        } else {
            warn!("Webhook verification failed - invalid token");
            Err(WhatsAppError::WebhookVerificationFailed)
        }
    }
}

#[async_trait]
impl mb_core::OutboundSender for WhatsAppApi {
    async fn send(&self, routing: &str, to: &str, text: &str) -> mb_core::Result<()> {
        self.send_text_message(routing, to, text)
            .await
            .map(|_| ())
            .map_err(|e| mb_core::Error::Send(e.to_string()))
    }
}
