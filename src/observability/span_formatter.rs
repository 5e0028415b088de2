//! Span batches rendered as OTLP/JSON documents, one document per line.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::SystemTime;

/// Serializes exported spans under a fixed resource and instrumentation scope.
pub struct OtlpJsonFormatter {
    resource: Resource,
    scope: &'static str,
}

impl OtlpJsonFormatter {
    pub const fn new(resource: Resource, scope: &'static str) -> Self {
        Self { resource, scope }
    }

    /// Builds one `resourceSpans` document for `batch`.
    ///
    /// ```json
    /// {"resourceSpans":[{"resource":{"attributes":[...]},
    ///   "scopeSpans":[{"scope":{"name":"VCFinder"},"spans":[...]}]}]}
    /// ```
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attributes: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(key, value)| attribute(key.as_str(), value))
            .collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource_attributes },
                "scopeSpans": [{
                    "scope": { "name": self.scope },
                    "spans": batch.iter().map(span_json).collect::<Vec<_>>(),
                }],
            }],
        })
    }
}

fn span_json(span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (code, message) = status_json(&span.status);

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": kind_code(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": events_json(&span.events),
        "links": links_json(&span.links),
        "status": { "code": code, "message": message },
    })
}

/// Nanoseconds since the Unix epoch as a decimal string; pre-epoch clamps to 0.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or(0)
        .to_string()
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn status_json(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}

fn attribute(key: &str, value: &Value) -> JsonValue {
    json!({ "key": key, "value": attribute_value(value) })
}

fn attributes(list: &[KeyValue]) -> Vec<JsonValue> {
    list.iter().map(|kv| attribute(kv.key.as_str(), &kv.value)).collect()
}

/// OTLP `AnyValue`; integers travel as strings and arrays fall back to text.
fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(_) => json!({ "stringValue": value.to_string() }),
    }
}

fn events_json(events: &[Event]) -> Vec<JsonValue> {
    events
        .iter()
        .map(|event| {
            json!({
                "timeUnixNano": unix_nanos(event.timestamp),
                "name": event.name,
                "attributes": attributes(&event.attributes),
            })
        })
        .collect()
}

fn links_json(links: &[Link]) -> Vec<JsonValue> {
    links
        .iter()
        .map(|link| {
            json!({
                "traceId": format!("{:032x}", link.span_context.trace_id()),
                "spanId": format!("{:016x}", link.span_context.span_id()),
                "attributes": attributes(&link.attributes),
            })
        })
        .collect()
}

impl std::fmt::Debug for OtlpJsonFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtlpJsonFormatter").field("scope", &self.scope).finish_non_exhaustive()
    }
}
