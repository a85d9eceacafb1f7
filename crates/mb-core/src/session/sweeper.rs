//! Periodic expired-session sweep
//!
//! Passive safety net behind the per-session expiry timers: both mechanisms
//! enforce the same threshold, and both tolerate the other winning the race.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::session::SessionStore;

/// Handle to the running sweeper task.
pub struct SweeperHandle {
    shutdown_tx: broadcast::Sender<()>,
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweeper and wait for it to finish.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.handle.await;
    }
}

/// Spawn the background sweep on a fixed wall-clock period.
pub fn start_sweeper(store: SessionStore, period: Duration) -> SweeperHandle {
    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);

    let handle = tokio::spawn(async move {
        info!(period_secs = period.as_secs(), "Session sweeper started");

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; skip it.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    store.sweep_expired().await;
                }
                _ = shutdown_rx.recv() => {
                    info!("Session sweeper stopped");
                    break;
                }
            }
        }
    });

    SweeperHandle {
        shutdown_tx,
        handle,
    }
}
