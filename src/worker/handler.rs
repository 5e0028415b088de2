//! Background worker thread for searches and preference writes.
//!
//! The UI thread never blocks on a lookup or on disk I/O: it posts a
//! [`WorkerMessage`] through a [`WorkerHandle`] and polls for the matching
//! [`WorkerResponse`] between input events.

use crate::domain::error::{Result, VcFinderError};
use crate::storage::PreferenceStore;
use crate::worker::backend::SearchBackend;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

/// Worker state, owned by the worker thread once spawned.
pub struct SearchWorker {
    backend: Box<dyn SearchBackend>,

    /// Preference store; `None` when the data directory was unavailable.
    preferences: Option<Box<dyn PreferenceStore>>,
}

impl SearchWorker {
    #[must_use]
    pub fn new(backend: Box<dyn SearchBackend>, preferences: Option<Box<dyn PreferenceStore>>) -> Self {
        Self { backend, preferences }
    }

    fn get_preferences(&mut self) -> Result<&mut Box<dyn PreferenceStore>> {
        self.preferences
            .as_mut()
            .ok_or_else(|| VcFinderError::Storage("preference store not available".to_string()))
    }

    /// Maps an operation result to a response with consistent logging.
    fn handle_result<T, F, E>(operation: &str, result: Result<T>, on_success: F, on_error: E) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
        E: FnOnce(String) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "worker operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "worker operation failed");
                on_error(format!("{operation}: {e}"))
            }
        }
    }

    fn handle_search(&mut self, generation: u64, query: String) -> WorkerResponse {
        Self::handle_result(
            "search",
            self.backend.search(&query),
            |results| {
                tracing::debug!(generation, result_count = results.len(), "search answered");
                WorkerResponse::SearchCompleted {
                    generation,
                    query,
                    results,
                }
            },
            |message| WorkerResponse::SearchFailed { generation, message },
        )
    }

    fn handle_save_preference(&mut self, key: String, value: &str) -> WorkerResponse {
        Self::handle_result(
            "save preference",
            self.get_preferences().and_then(|store| store.set(&key, value)),
            |()| WorkerResponse::PreferenceSaved { key },
            |message| WorkerResponse::Error { message },
        )
    }

    /// Re-attaches the UI-side span as the remote parent of worker spans.
    ///
    /// The returned guard must be held while the message is processed.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes one message synchronously.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = message.kind()).entered();

        match message {
            WorkerMessage::Search { generation, query, .. } => self.handle_search(generation, query),
            WorkerMessage::SavePreference { key, value, .. } => self.handle_save_preference(key, &value),
        }
    }

    /// Moves the worker onto its own thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to create the thread.
    pub fn spawn(self) -> Result<WorkerHandle> {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();

        let thread = std::thread::Builder::new()
            .name("vcfinder-worker".to_string())
            .spawn(move || self.run(&request_rx, &response_tx))?;

        tracing::debug!("search worker started");

        Ok(WorkerHandle {
            requests: request_tx,
            responses: response_rx,
            thread: Some(thread),
        })
    }

    /// Serves requests until every sender is dropped.
    ///
    /// Messages that queued up while the previous one was being handled are
    /// taken together; of those, only the most recent search is answered.
    /// Once the UI stops listening, searches are dropped but preference writes
    /// still run until the request queue is empty.
    fn run(mut self, requests: &Receiver<WorkerMessage>, responses: &Sender<WorkerResponse>) {
        let mut listening = true;
        while let Ok(first) = requests.recv() {
            let mut batch = vec![first];
            batch.extend(requests.try_iter());

            let latest_search = batch.iter().rposition(|m| matches!(m, WorkerMessage::Search { .. }));

            for (idx, message) in batch.into_iter().enumerate() {
                if let WorkerMessage::Search { generation, .. } = &message {
                    if !listening || Some(idx) != latest_search {
                        tracing::debug!(generation = *generation, "skipping superseded search");
                        continue;
                    }
                }

                let response = self.handle_message(message);
                if listening && responses.send(response).is_err() {
                    tracing::debug!("response channel closed, finishing queued writes");
                    listening = false;
                }
            }
        }

        tracing::debug!("request channel closed, stopping worker");
    }
}

/// UI-side endpoint of a running [`SearchWorker`].
#[derive(Debug)]
pub struct WorkerHandle {
    requests: Sender<WorkerMessage>,
    responses: Receiver<WorkerResponse>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Queues a message for the worker.
    ///
    /// # Errors
    ///
    /// Returns [`VcFinderError::Worker`] if the worker thread has exited.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        self.requests
            .send(message)
            .map_err(|e| VcFinderError::Worker(format!("worker unavailable: {e}")))
    }

    /// Returns the next response if one is ready.
    #[must_use]
    pub fn try_recv(&self) -> Option<WorkerResponse> {
        self.responses.try_recv().ok()
    }

    /// Waits up to `timeout` for the next response.
    ///
    /// # Errors
    ///
    /// Returns [`VcFinderError::Worker`] if the worker thread has exited.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<WorkerResponse>> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => Ok(Some(response)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(VcFinderError::Worker("worker thread exited".to_string())),
        }
    }

    /// Closes the request channel and waits for the worker to finish.
    ///
    /// Preference writes posted before this call are applied before it
    /// returns; pending searches are abandoned.
    pub fn shutdown(self) {
        let Self {
            requests,
            responses,
            thread,
        } = self;
        drop(requests);
        drop(responses);

        if let Some(thread) = thread {
            if thread.join().is_err() {
                tracing::error!("search worker panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::firm::tests_support::sample;
    use crate::domain::{Corpus, Firm};
    use crate::storage::{JsonPreferences, MemoryPreferences};
    use crate::worker::InMemoryBackend;

    fn backend(latency_ms: u64) -> Box<dyn SearchBackend> {
        let corpus = Corpus::new(vec![sample("1", &["fintech", "SaaS"]), sample("2", &["healthcare"])]);
        Box::new(InMemoryBackend::new(corpus, Duration::from_millis(latency_ms)))
    }

    struct FailingBackend;

    impl SearchBackend for FailingBackend {
        fn search(&mut self, _query: &str) -> Result<Vec<Firm>> {
            Err(VcFinderError::Worker("lookup timed out".to_string()))
        }
    }

    #[test]
    fn search_echoes_generation() {
        let mut worker = SearchWorker::new(backend(0), None);
        let response = worker.handle_message(WorkerMessage::search(7, "fin".to_string()));

        match response {
            WorkerResponse::SearchCompleted {
                generation, results, ..
            } => {
                assert_eq!(generation, 7);
                assert_eq!(results.len(), 1);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn backend_failure_keeps_generation() {
        let mut worker = SearchWorker::new(Box::new(FailingBackend), None);
        let response = worker.handle_message(WorkerMessage::search(3, "fin".to_string()));
        assert!(matches!(response, WorkerResponse::SearchFailed { generation: 3, .. }));
    }

    #[test]
    fn saving_without_store_is_an_error_response() {
        let mut worker = SearchWorker::new(backend(0), None);
        let response = worker.handle_message(WorkerMessage::save_preference("theme".into(), "dark".into()));
        assert!(matches!(response, WorkerResponse::Error { .. }));
    }

    #[test]
    fn saves_preferences() {
        let store: Box<dyn PreferenceStore> = Box::new(MemoryPreferences::default());
        let mut worker = SearchWorker::new(backend(0), Some(store));
        let response = worker.handle_message(WorkerMessage::save_preference("theme".into(), "dark".into()));
        assert_eq!(response, WorkerResponse::PreferenceSaved { key: "theme".into() });
    }

    #[test]
    fn spawned_worker_answers_over_channel() {
        let handle = SearchWorker::new(backend(0), None).spawn().unwrap();
        handle.post(WorkerMessage::search(1, "health".to_string())).unwrap();

        let response = handle.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(
            response,
            Some(WorkerResponse::SearchCompleted { generation: 1, .. })
        ));
        handle.shutdown();
    }

    #[test]
    fn queued_searches_collapse_to_latest() {
        let handle = SearchWorker::new(backend(100), None).spawn().unwrap();
        for generation in 1..=4 {
            handle.post(WorkerMessage::search(generation, "fin".to_string())).unwrap();
        }

        let mut generations = Vec::new();
        while let Some(response) = handle.recv_timeout(Duration::from_secs(2)).unwrap() {
            if let WorkerResponse::SearchCompleted { generation, .. } = response {
                generations.push(generation);
            }
            if generations.last() == Some(&4) {
                break;
            }
        }

        assert_eq!(generations.last(), Some(&4));
        assert!(generations.len() < 4);
        handle.shutdown();
    }

    #[test]
    fn shutdown_mid_search_still_applies_queued_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let store: Box<dyn PreferenceStore> = Box::new(JsonPreferences::new(path.clone()).unwrap());

        let handle = SearchWorker::new(backend(300), Some(store)).spawn().unwrap();
        handle.post(WorkerMessage::search(1, "fin".to_string())).unwrap();
        handle.post(WorkerMessage::save_preference("theme".into(), "dark".into())).unwrap();
        handle.shutdown();

        let reopened = JsonPreferences::new(path).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
    }
}
