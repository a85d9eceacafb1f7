//! mb-core: menubot core library
//!
//! Session lifecycle, the menu state machine, and inbound message dispatch
//! for the WhatsApp menu responder. Channel plumbing (webhook server, Graph
//! API client) lives in mb-whatsapp; this crate only consumes normalized
//! inbound events and an [`OutboundSender`].

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod menu;
pub mod outbound;
pub mod session;

pub use config::{Config, ServerConfig, SessionConfig, WhatsAppConfig};
pub use error::{Error, Result};
pub use event::{InboundEvent, MessageKind};
pub use handler::MessageHandler;
pub use menu::{MenuState, Transition};
pub use outbound::OutboundSender;
pub use session::{start_sweeper, Session, SessionPatch, SessionStore, SweeperHandle};

#[cfg(test)]
pub(crate) mod testing {
    //! Shared test doubles

    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use crate::outbound::OutboundSender;
    use crate::{Error, Result};

    /// Records every send; can be flipped into a failing mode.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingSender {
        pub sent: Arc<Mutex<Vec<(String, String, String)>>>,
        pub fail: Arc<AtomicBool>,
    }

    impl RecordingSender {
        pub(crate) async fn sent_texts(&self) -> Vec<String> {
            self.sent.lock().await.iter().map(|(_, _, t)| t.clone()).collect()
        }

        pub(crate) fn fail_next(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl OutboundSender for RecordingSender {
        async fn send(&self, routing: &str, to: &str, text: &str) -> Result<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(Error::Send("simulated send failure".to_string()));
            }
            self.sent
                .lock()
                .await
                .push((routing.to_string(), to.to_string(), text.to_string()));
            Ok(())
        }
    }
}
