//! Outbound send contract

use async_trait::async_trait;

use crate::Result;

/// Delivers replies back to the user on the originating channel.
///
/// Implementations must not be given the store lock; callers persist the
/// session transition first and send after.
#[async_trait]
pub trait OutboundSender: Send + Sync {
    /// Send `text` to `to`, routed through the channel endpoint `routing`.
    async fn send(&self, routing: &str, to: &str, text: &str) -> Result<()>;
}
