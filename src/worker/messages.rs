//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the UI thread
//! and the background [`SearchWorker`](crate::worker::SearchWorker). Requests
//! carry an optional [`TraceContext`] so spans recorded on the worker thread
//! join the trace that issued them.

use crate::domain::Firm;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry so the worker
/// can re-attach them as its remote parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if no OpenTelemetry layer is installed or the current
    /// span context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to propagate");
            return None;
        }

        let trace_id = format!("{:032x}", span_context.trace_id());
        let parent_span_id = format!("{:016x}", span_context.span_id());
        tracing::trace!(trace_id = %trace_id, parent_span_id = %parent_span_id, "capturing trace context");

        Some(Self {
            trace_id,
            parent_span_id,
        })
    }
}

/// Generates constructors for `WorkerMessage` variants that attach the
/// current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    search(Search { generation: u64, query: String }),
    save_preference(SavePreference { key: String, value: String }),
}

/// Requests sent from the UI thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Run a search against the backend.
    Search {
        /// Sequence number issued by the UI; echoed back in the response.
        generation: u64,

        /// Trimmed, non-empty query.
        query: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Persist a user preference.
    SavePreference {
        key: String,
        value: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached to this message, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Search { trace_context, .. } | Self::SavePreference { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }

    /// Short name used as a span field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Search { .. } => "search",
            Self::SavePreference { .. } => "save_preference",
        }
    }
}

/// Responses sent from the worker thread back to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A search finished.
    SearchCompleted {
        /// Generation of the request this answers.
        generation: u64,

        query: String,

        /// Matching firms in corpus order.
        results: Vec<Firm>,
    },

    /// The backend could not answer a search.
    SearchFailed { generation: u64, message: String },

    /// A preference was written.
    PreferenceSaved { key: String },

    /// A request failed.
    Error {
        /// Human-readable error message.
        message: String,
    },
}
