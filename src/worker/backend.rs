//! Search backends.
//!
//! The worker answers search requests through a [`SearchBackend`]. The bundled
//! [`InMemoryBackend`] filters the loaded corpus with [`engine::search`] after a
//! configurable delay that stands in for a remote lookup.

use crate::domain::{Corpus, Firm, Result};
use crate::engine;
use std::time::Duration;

/// Anything that can answer a firm search.
///
/// Implementations run on the worker thread and may block.
pub trait SearchBackend: Send {
    /// Returns the firms matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails. An empty result is not an
    /// error.
    fn search(&mut self, query: &str) -> Result<Vec<Firm>>;
}

/// Searches an in-memory corpus with an artificial delay.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    corpus: Corpus,
    latency: Duration,
}

impl InMemoryBackend {
    #[must_use]
    pub const fn new(corpus: Corpus, latency: Duration) -> Self {
        Self { corpus, latency }
    }
}

impl SearchBackend for InMemoryBackend {
    fn search(&mut self, query: &str) -> Result<Vec<Firm>> {
        if !self.latency.is_zero() {
            tracing::trace!(latency_ms = self.latency.as_millis() as u64, "simulating lookup latency");
            std::thread::sleep(self.latency);
        }
        Ok(engine::search(query, &self.corpus))
    }
}
