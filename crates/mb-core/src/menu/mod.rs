//! Menu catalog and transition engine

pub mod catalog;
pub mod engine;
mod state;

pub use engine::{transition, Transition};
pub use state::MenuState;
