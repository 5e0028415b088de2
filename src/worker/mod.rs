//! Background worker thread for deferred operations.
//!
//! Searches and preference writes run off the UI thread so the terminal keeps
//! redrawing while a lookup is pending. Trace context travels with each request.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `backend`: The [`SearchBackend`] trait and the in-memory implementation
//! - `handler`: Worker implementation, thread spawning, and the UI-side handle

pub mod backend;
pub mod handler;
pub mod messages;

pub use backend::{InMemoryBackend, SearchBackend};
pub use handler::{SearchWorker, WorkerHandle};
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
