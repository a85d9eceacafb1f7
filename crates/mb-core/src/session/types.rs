//! Session types

use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::time::Instant;

use crate::menu::MenuState;

/// One inbound/outbound exchange. History is append-only; entries are never
/// mutated or removed while the session is live.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub inbound: String,
    pub outbound: String,
}

/// State-specific fields written by individual transitions.
#[derive(Debug, Clone, Default)]
pub struct SessionFlags {
    /// Wizard answer: hair type ("1".."4").
    pub hair_type: Option<String>,
    /// Wizard answer: main concern ("1".."5").
    pub concern: Option<String>,
    /// Set externally; suppresses the follow-up reminder.
    pub purchased: bool,
}

/// A single conversation session, keyed by the user's phone number.
///
/// Timer handles are not part of this value; they are owned by the
/// [`crate::session::SessionStore`] so that no call site can leak one.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier (logging only).
    pub id: String,
    /// User's phone number; primary key.
    pub user_id: String,
    /// Current menu state.
    pub state: MenuState,
    /// Session creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Monotonic instant of the most recent inbound message; drives expiry.
    pub last_active: Instant,
    /// Originating phone-number-id, needed to send back. Overwritten on
    /// every inbound event.
    pub routing: String,
    pub flags: SessionFlags,
    pub history: Vec<HistoryEntry>,
}

impl Session {
    /// Create a fresh session parked at the main menu.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            state: MenuState::Main,
            created_at: Utc::now(),
            last_active: Instant::now(),
            routing: String::new(),
            flags: SessionFlags::default(),
            history: Vec::new(),
        }
    }

    pub fn is_expired(&self, timeout: Duration) -> bool {
        self.last_active.elapsed() > timeout
    }

    /// Append one exchange to the history.
    pub fn record_exchange(&mut self, inbound: impl Into<String>, outbound: impl Into<String>) {
        self.history.push(HistoryEntry {
            timestamp: Utc::now(),
            inbound: inbound.into(),
            outbound: outbound.into(),
        });
    }
}

/// Fields merged into a session by [`crate::session::SessionStore::update`].
/// `None` leaves the current value untouched.
#[derive(Debug, Default)]
pub struct SessionPatch {
    pub state: Option<MenuState>,
    pub routing: Option<String>,
    pub hair_type: Option<String>,
    pub concern: Option<String>,
    pub purchased: Option<bool>,
    /// Inbound/outbound text pair; presence appends one history entry.
    pub exchange: Option<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = Session::new("+5215550001111");
        assert!(!session.id.is_empty());
        assert_eq!(session.user_id, "+5215550001111");
        assert_eq!(session.state, MenuState::Main);
        assert!(session.history.is_empty());
        assert!(!session.flags.purchased);
    }

    #[test]
    fn test_record_exchange() {
        let mut session = Session::new("+5215550001111");
        session.record_exchange("hola", "bienvenido");
        session.record_exchange("1", "diseño");
        assert_eq!(session.history.len(), 2);
        assert_eq!(session.history[0].inbound, "hola");
        assert_eq!(session.history[1].outbound, "diseño");
    }
}
