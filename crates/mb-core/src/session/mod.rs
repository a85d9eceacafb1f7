//! Session lifecycle: records, store-owned timers, periodic sweep

pub mod store;
pub mod sweeper;
pub mod types;

pub use store::SessionStore;
pub use sweeper::{start_sweeper, SweeperHandle};
pub use types::{HistoryEntry, Session, SessionFlags, SessionPatch};
