//! Application layer coordinating state, events, and actions.
//!
//! Sits between the terminal shell (`main.rs`) and the engine, worker, and
//! storage layers.
//!
//! ```text
//! Key Input → Events → handle_event → State Mutations → Actions → Side Effects
//!                           ↑                                   ↓
//!                           └──────── Worker Responses ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Focus and suggestion-cursor state machines
//! - [`state`]: Search state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::{Action, COPIED_CONFIRMATION};
pub use handler::{handle_event, Event};
pub use modes::{Focus, SuggestionCursor};
pub use state::{AppState, POPULAR_INDUSTRIES};
