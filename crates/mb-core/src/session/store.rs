//! In-memory session store
//!
//! Owns one record per user plus that record's timer handles. Every mutation
//! path routes through store-owned cancel/reschedule logic, so a dangling
//! timer can never outlive the conversation it belongs to. Timer callbacks
//! re-fetch the live session before acting and never hold the store lock
//! across an outbound send.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::menu::catalog;
use crate::outbound::OutboundSender;
use crate::session::types::{Session, SessionPatch};

/// Timer handles for one session: at most one warning and one expiry timer
/// (both replaced on every fresh inbound event) plus the independent
/// follow-up reminder.
#[derive(Debug, Default)]
struct SessionTimers {
    warning: Option<JoinHandle<()>>,
    expiry: Option<JoinHandle<()>>,
    reminder: Option<JoinHandle<()>>,
}

impl SessionTimers {
    fn cancel_inactivity(&mut self) {
        if let Some(handle) = self.warning.take() {
            handle.abort();
        }
        if let Some(handle) = self.expiry.take() {
            handle.abort();
        }
    }

    fn cancel_all(&mut self) {
        self.cancel_inactivity();
        if let Some(handle) = self.reminder.take() {
            handle.abort();
        }
    }
}

struct Entry {
    session: Session,
    timers: SessionTimers,
}

impl Entry {
    fn new(user_id: &str) -> Self {
        Self {
            session: Session::new(user_id),
            timers: SessionTimers::default(),
        }
    }
}

struct Inner {
    sessions: RwLock<HashMap<String, Entry>>,
    config: SessionConfig,
    sender: Arc<dyn OutboundSender>,
}

/// In-memory session store with store-owned timers.
///
/// Clones share the same underlying map.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    pub fn new(config: SessionConfig, sender: Arc<dyn OutboundSender>) -> Self {
        Self {
            inner: Arc::new(Inner {
                sessions: RwLock::new(HashMap::new()),
                config,
                sender,
            }),
        }
    }

    /// Get the live session for `user_id`, refreshing its activity timestamp
    /// and rescheduling its inactivity timers. Creates a fresh session when
    /// none exists or the previous one expired. Never fails.
    pub async fn get_or_create(&self, user_id: &str) -> Session {
        let mut sessions = self.inner.sessions.write().await;
        self.ensure_live(&mut sessions, user_id).session.clone()
    }

    /// Merge `patch` into the session, appending one history entry when the
    /// patch carries an exchange. Creates the session first if needed.
    pub async fn update(&self, user_id: &str, patch: SessionPatch) -> Session {
        let mut sessions = self.inner.sessions.write().await;
        let entry = self.ensure_live(&mut sessions, user_id);
        let session = &mut entry.session;

        if let Some(state) = patch.state {
            session.state = state;
        }
        if let Some(routing) = patch.routing {
            session.routing = routing;
        }
        if let Some(hair_type) = patch.hair_type {
            session.flags.hair_type = Some(hair_type);
        }
        if let Some(concern) = patch.concern {
            session.flags.concern = Some(concern);
        }
        if let Some(purchased) = patch.purchased {
            session.flags.purchased = purchased;
        }
        if let Some((inbound, outbound)) = patch.exchange {
            session.record_exchange(inbound, outbound);
        }

        debug!(user = user_id, state = %session.state, "Updated session");
        session.clone()
    }

    /// Remove the session and abort all of its timers. Idempotent; returns
    /// whether a session existed.
    pub async fn terminate(&self, user_id: &str) -> bool {
        let mut sessions = self.inner.sessions.write().await;
        match sessions.remove(user_id) {
            Some(mut entry) => {
                entry.timers.cancel_all();
                debug!(user = user_id, "Ended session");
                true
            }
            None => false,
        }
    }

    /// Terminate every session past the inactivity timeout. Runs on the
    /// sweeper's fixed period, never inline with event handling.
    pub async fn sweep_expired(&self) -> usize {
        let timeout = self.inner.config.timeout();
        let mut sessions = self.inner.sessions.write().await;

        let expired: Vec<String> = sessions
            .iter()
            .filter(|(_, entry)| entry.session.is_expired(timeout))
            .map(|(user_id, _)| user_id.clone())
            .collect();

        for user_id in &expired {
            if let Some(mut entry) = sessions.remove(user_id) {
                entry.timers.cancel_all();
            }
        }

        if !expired.is_empty() {
            info!(count = expired.len(), "Cleaned up expired sessions");
        }
        expired.len()
    }

    /// Arm the deferred follow-up reminder for `user_id`. Re-arming replaces
    /// the previous timer, mirroring the inactivity-timer behavior. The
    /// reminder survives ordinary menu navigation and is only dropped by
    /// termination, replacement, or the purchased flag at fire time.
    pub async fn arm_reminder(&self, user_id: &str, delay: Duration, message: impl Into<String>) {
        let mut sessions = self.inner.sessions.write().await;
        let Some(entry) = sessions.get_mut(user_id) else {
            return;
        };
        if let Some(handle) = entry.timers.reminder.take() {
            handle.abort();
        }
        entry.timers.reminder = Some(self.spawn_reminder_timer(user_id, delay, message.into()));
        debug!(user = user_id, delay_secs = delay.as_secs(), "Armed follow-up reminder");
    }

    /// External hook: record that the user purchased, which suppresses the
    /// pending reminder. Does not count as conversation activity.
    pub async fn mark_purchased(&self, user_id: &str) -> bool {
        let mut sessions = self.inner.sessions.write().await;
        match sessions.get_mut(user_id) {
            Some(entry) => {
                entry.session.flags.purchased = true;
                debug!(user = user_id, "Marked session as purchased");
                true
            }
            None => false,
        }
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        let sessions = self.inner.sessions.read().await;
        sessions.len()
    }

    /// Look up the live session without refreshing it.
    pub async fn get(&self, user_id: &str) -> Option<Session> {
        let sessions = self.inner.sessions.read().await;
        sessions.get(user_id).map(|entry| entry.session.clone())
    }

    /// Refresh-or-replace under the caller's write lock, then reschedule the
    /// inactivity timers so only one warning and one expiry timer are ever
    /// outstanding.
    fn ensure_live<'a>(
        &self,
        sessions: &'a mut HashMap<String, Entry>,
        user_id: &str,
    ) -> &'a mut Entry {
        let timeout = self.inner.config.timeout();

        let entry = sessions.entry(user_id.to_string()).or_insert_with(|| {
            info!(user = user_id, "Created new session");
            Entry::new(user_id)
        });

        if entry.session.is_expired(timeout) {
            // Expired but not yet swept: replace in place. The old reminder
            // dies with the old conversation.
            debug!(user = user_id, "Replacing expired session");
            entry.timers.cancel_all();
            entry.session = Session::new(user_id);
        } else {
            entry.session.last_active = Instant::now();
        }

        entry.timers.cancel_inactivity();
        entry.timers.warning = self.spawn_warning_timer(user_id);
        entry.timers.expiry = self.spawn_expiry_timer(user_id);
        entry
    }

    fn spawn_warning_timer(&self, user_id: &str) -> Option<JoinHandle<()>> {
        let lead = self.inner.config.warning_lead()?;
        let timeout = self.inner.config.timeout();
        if lead >= timeout {
            return None;
        }

        let inner = Arc::downgrade(&self.inner);
        let user_id = user_id.to_string();
        Some(tokio::spawn(async move {
            tokio::time::sleep(timeout - lead).await;
            let Some(inner) = inner.upgrade() else { return };

            let routing = {
                let sessions = inner.sessions.read().await;
                match sessions.get(&user_id) {
                    Some(entry) => entry.session.routing.clone(),
                    None => return,
                }
            };

            debug!(user = %user_id, "Sending inactivity warning");
            if let Err(e) = inner
                .sender
                .send(&routing, &user_id, catalog::INACTIVITY_WARNING)
                .await
            {
                warn!(user = %user_id, error = %e, "Failed to send inactivity warning");
            }
        }))
    }

    fn spawn_expiry_timer(&self, user_id: &str) -> Option<JoinHandle<()>> {
        let timeout = self.inner.config.timeout();
        let inner = Arc::downgrade(&self.inner);
        let user_id = user_id.to_string();
        Some(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            let Some(inner) = inner.upgrade() else { return };

            let routing = {
                let mut sessions = inner.sessions.write().await;
                match sessions.remove(&user_id) {
                    Some(mut entry) => {
                        // This task's own handle must not abort itself.
                        entry.timers.expiry.take();
                        entry.timers.cancel_all();
                        entry.session.routing.clone()
                    }
                    // A racing terminate or sweep already removed it.
                    None => return,
                }
            };

            info!(user = %user_id, "Session expired due to inactivity");
            if let Err(e) = inner
                .sender
                .send(&routing, &user_id, catalog::SESSION_EXPIRED)
                .await
            {
                warn!(user = %user_id, error = %e, "Failed to send expiry notice");
            }
        }))
    }

    fn spawn_reminder_timer(
        &self,
        user_id: &str,
        delay: Duration,
        message: String,
    ) -> JoinHandle<()> {
        let inner = Arc::downgrade(&self.inner);
        let user_id = user_id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(inner) = inner.upgrade() else { return };

            // Re-fetch the current session rather than acting on a captured
            // copy: the user may have purchased, or the session may be gone.
            let routing = {
                let sessions = inner.sessions.read().await;
                match sessions.get(&user_id) {
                    Some(entry) if entry.session.flags.purchased => {
                        debug!(user = %user_id, "Reminder suppressed: already purchased");
                        return;
                    }
                    Some(entry) => entry.session.routing.clone(),
                    None => {
                        debug!(user = %user_id, "Reminder suppressed: session gone");
                        return;
                    }
                }
            };

            info!(user = %user_id, "Sending follow-up reminder");
            if let Err(e) = inner.sender.send(&routing, &user_id, &message).await {
                warn!(user = %user_id, error = %e, "Failed to send reminder");
            }
        })
    }
}
