//! Normalized inbound events
//!
//! The webhook surface flattens channel-specific payloads into this shape;
//! the core never sees the raw envelope.

/// Payload kind of an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    /// Any non-text payload (image, audio, reaction, ...); acknowledged as a
    /// no-op without touching the session.
    Other(String),
}

/// One normalized inbound message.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    /// Sender's phone number; session key.
    pub user_id: String,
    /// Channel endpoint id (phone-number-id) replies must be routed through.
    pub routing: String,
    /// Message body; empty for non-text payloads.
    pub text: String,
    pub kind: MessageKind,
}

impl InboundEvent {
    /// Convenience constructor for text messages.
    pub fn text(
        user_id: impl Into<String>,
        routing: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            routing: routing.into(),
            text: text.into(),
            kind: MessageKind::Text,
        }
    }
}
