//! Inbound message handling
//!
//! Wires the session store, the transition engine, and the outbound sender:
//! one inbound event in, one reply out, session state updated in between.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::event::{InboundEvent, MessageKind};
use crate::menu::{self, catalog};
use crate::outbound::OutboundSender;
use crate::session::{SessionPatch, SessionStore};
use crate::Result;

/// Processes normalized inbound events against the menu state machine.
pub struct MessageHandler {
    store: SessionStore,
    sender: Arc<dyn OutboundSender>,
    /// Delay for the wizard follow-up reminder; `None` disables it.
    reminder_delay: Option<Duration>,
}

impl MessageHandler {
    pub fn new(
        store: SessionStore,
        sender: Arc<dyn OutboundSender>,
        reminder_delay: Option<Duration>,
    ) -> Self {
        Self {
            store,
            sender,
            reminder_delay,
        }
    }

    /// Handle one inbound event end to end.
    ///
    /// Non-text events are acknowledged as successful no-ops. For text, the
    /// session transition is applied and durable before the reply is sent;
    /// a failed send surfaces as an error to the caller but never rolls the
    /// transition back.
    pub async fn handle_event(&self, event: InboundEvent) -> Result<()> {
        if event.kind != MessageKind::Text {
            debug!(user = %event.user_id, kind = ?event.kind, "Ignoring non-text message");
            return Ok(());
        }

        let text = event.text.trim().to_string();

        let session = self.store.get_or_create(&event.user_id).await;
        let mut flags = session.flags.clone();
        let transition = menu::transition(session.state, &text, &mut flags);

        debug!(
            user = %event.user_id,
            from = %session.state,
            to = %transition.next,
            "Menu transition"
        );

        self.store
            .update(
                &event.user_id,
                SessionPatch {
                    state: Some(transition.next),
                    routing: Some(event.routing.clone()),
                    hair_type: flags.hair_type,
                    concern: flags.concern,
                    purchased: None,
                    exchange: Some((text, transition.reply.to_string())),
                },
            )
            .await;

        if transition.next.is_terminal() {
            self.store.terminate(&event.user_id).await;
        }

        if transition.arm_reminder {
            if let Some(delay) = self.reminder_delay {
                self.store
                    .arm_reminder(&event.user_id, delay, catalog::REMINDER)
                    .await;
            }
        }

        if let Err(e) = self
            .sender
            .send(&event.routing, &event.user_id, transition.reply)
            .await
        {
            error!(user = %event.user_id, error = %e, "Failed to send reply");
            return Err(e);
        }

        info!(user = %event.user_id, state = %transition.next, "Processed message");
        Ok(())
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::menu::MenuState;
    use crate::testing::RecordingSender;

    const USER: &str = "+5215550001111";
    const ROUTING: &str = "109876543210";

    fn handler_with(config: SessionConfig) -> (MessageHandler, RecordingSender) {
        let sender = RecordingSender::default();
        let reminder_delay = config.reminder_delay();
        let store = SessionStore::new(config, Arc::new(sender.clone()));
        let handler = MessageHandler::new(store, Arc::new(sender.clone()), reminder_delay);
        (handler, sender)
    }

    fn test_config() -> SessionConfig {
        SessionConfig {
            timeout_secs: 600,
            warning_lead_secs: None,
            reminder_delay_secs: Some(1000),
            sweep_interval_secs: 300,
        }
    }

    async fn send_text(handler: &MessageHandler, text: &str) -> String {
        handler
            .handle_event(InboundEvent::text(USER, ROUTING, text))
            .await
            .unwrap();
        let session = handler.store().get(USER).await;
        session.map(|s| s.state.to_string()).unwrap_or_default()
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_menu_walk() {
        let (handler, sender) = handler_with(test_config());

        assert_eq!(send_text(&handler, "Hola").await, "main");
        assert_eq!(send_text(&handler, "1").await, "design_graphic");
        assert_eq!(send_text(&handler, "9").await, "design_graphic");
        assert_eq!(send_text(&handler, "0").await, "main");

        let texts = sender.sent_texts().await;
        assert_eq!(
            texts,
            vec![
                catalog::WELCOME.to_string(),
                catalog::DESIGN_GRAPHIC.to_string(),
                catalog::ADVISOR_FOLLOW_UP.to_string(),
                catalog::WELCOME.to_string(),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_closing_terminates_session() {
        let (handler, sender) = handler_with(test_config());

        send_text(&handler, "hola").await;
        handler
            .handle_event(InboundEvent::text(USER, ROUTING, "0"))
            .await
            .unwrap();

        // The closed session is gone; the closing text was still sent.
        assert!(handler.store().get(USER).await.is_none());
        assert_eq!(
            sender.sent_texts().await.last().unwrap(),
            catalog::CLOSING
        );

        // A later message starts over at the main menu.
        let session = handler.store().get_or_create(USER).await;
        assert_eq!(session.state, MenuState::Main);
        assert!(session.history.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_text_event_is_noop() {
        let (handler, sender) = handler_with(test_config());

        handler
            .handle_event(InboundEvent {
                user_id: USER.to_string(),
                routing: ROUTING.to_string(),
                text: String::new(),
                kind: MessageKind::Other("image".to_string()),
            })
            .await
            .unwrap();

        assert!(sender.sent.lock().await.is_empty());
        assert!(handler.store().get(USER).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_history_records_each_exchange() {
        let (handler, _sender) = handler_with(test_config());

        send_text(&handler, "hola").await;
        send_text(&handler, "8").await;
        send_text(&handler, "2").await;

        let session = handler.store().get(USER).await.unwrap();
        assert_eq!(session.history.len(), 3);
        assert_eq!(session.history[1].inbound, "8");
        assert_eq!(session.history[2].outbound, catalog::ROUTINE_CONCERN);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wizard_completion_arms_reminder() {
        let (handler, sender) = handler_with(test_config());

        send_text(&handler, "hola").await;
        send_text(&handler, "8").await;
        send_text(&handler, "1").await;
        send_text(&handler, "3").await;

        let session = handler.store().get(USER).await.unwrap();
        assert_eq!(session.state, MenuState::RoutineRecommendation);
        assert_eq!(session.flags.hair_type.as_deref(), Some("1"));
        assert_eq!(session.flags.concern.as_deref(), Some("3"));

        // Keep the session alive past the reminder delay.
        tokio::time::sleep(Duration::from_secs(500)).await;
        handler.store().get_or_create(USER).await;
        tokio::time::sleep(Duration::from_secs(501)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        let reminders = sender
            .sent_texts()
            .await
            .iter()
            .filter(|t| *t == catalog::REMINDER)
            .count();
        assert_eq!(reminders, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reminder_disabled_by_configuration() {
        let config = SessionConfig {
            reminder_delay_secs: None,
            timeout_secs: 5000,
            ..test_config()
        };
        let (handler, sender) = handler_with(config);

        send_text(&handler, "8").await;
        send_text(&handler, "1").await;
        send_text(&handler, "2").await;

        tokio::time::sleep(Duration::from_secs(2000)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert!(!sender
            .sent_texts()
            .await
            .iter()
            .any(|t| t == catalog::REMINDER));
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_failure_does_not_roll_back_transition() {
        let (handler, sender) = handler_with(test_config());

        sender.fail_next(true);
        let result = handler
            .handle_event(InboundEvent::text(USER, ROUTING, "hola"))
            .await;
        assert!(result.is_err());

        // The transition was applied before the send was attempted.
        let session = handler.store().get(USER).await.unwrap();
        assert_eq!(session.state, MenuState::Main);
        assert_eq!(session.history.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_greeting_resets_mid_wizard() {
        let (handler, _sender) = handler_with(test_config());

        send_text(&handler, "8").await;
        send_text(&handler, "1").await;
        assert_eq!(send_text(&handler, "Buenos dias").await, "main");
    }

    #[tokio::test(start_paused = true)]
    async fn test_exact_digit_matching_in_main_menu() {
        let (handler, sender) = handler_with(test_config());

        assert_eq!(send_text(&handler, "01").await, "main");
        assert_eq!(
            sender.sent_texts().await,
            vec![catalog::DEFAULT.to_string()]
        );
    }
}
