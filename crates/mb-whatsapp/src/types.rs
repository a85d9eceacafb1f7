//! WhatsApp Cloud API webhook payload types
//!
//! Mirrors the notification envelope Meta posts to the webhook:
//! `entry[].changes[].value.{metadata, messages[]}`. Only the fields the
//! responder needs are modeled; everything else is ignored by serde.

use serde::Deserialize;

use mb_core::{InboundEvent, MessageKind};

#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub object: Option<String>,
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEntry {
    pub id: Option<String>,
    #[serde(default)]
    pub changes: Vec<WebhookChange>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookChange {
    pub field: Option<String>,
    pub value: Option<ChangeValue>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeValue {
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub messages: Vec<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
pub struct Metadata {
    pub phone_number_id: String,
}

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    /// Sender's phone number
    pub from: String,
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<TextBody>,
}

#[derive(Debug, Deserialize)]
pub struct TextBody {
    pub body: String,
}

impl WebhookPayload {
    /// Flatten the envelope into normalized inbound events. Changes without
    /// metadata or messages contribute nothing; status-only notifications
    /// therefore normalize to an empty list.
    pub fn events(&self) -> Vec<InboundEvent> {
        let mut events = Vec::new();

        for entry in &self.entry {
            for change in &entry.changes {
                let Some(value) = &change.value else { continue };
                let Some(metadata) = &value.metadata else { continue };

                for message in &value.messages {
                    let kind = if message.kind == "text" {
                        MessageKind::Text
                    } else {
                        MessageKind::Other(message.kind.clone())
                    };
                    let text = message
                        .text
                        .as_ref()
                        .map(|t| t.body.clone())
                        .unwrap_or_default();

                    events.push(InboundEvent {
                        user_id: message.from.clone(),
                        routing: metadata.phone_number_id.clone(),
                        text,
                        kind,
                    });
                }
            }
        }

        events
    }
}
