//! Tracer provider whose only exporter appends OTLP/JSON lines to a file.

use super::file_writer::RotatingFile;
use super::span_formatter::OtlpJsonFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use std::future::ready;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Exporter writing each batch as one JSON line.
struct TraceFileExporter {
    file: RotatingFile,
    formatter: OtlpJsonFormatter,
    stopped: AtomicBool,
}

impl TraceFileExporter {
    const fn new(file: RotatingFile, formatter: OtlpJsonFormatter) -> Self {
        Self {
            file,
            formatter,
            stopped: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(TraceError::from("trace file exporter already shut down"));
        }
        let line = self.formatter.format_batch(batch).to_string();
        self.file
            .write_line(&line)
            .map_err(|e| TraceError::from(format!("writing trace batch: {e}")))
    }
}

impl SpanExporter for TraceFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        Box::pin(ready(self.write_batch(&batch)))
    }

    fn shutdown(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    // The formatter keeps the resource it was built with.
    fn set_resource(&mut self, _resource: &Resource) {}
}

impl std::fmt::Debug for TraceFileExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceFileExporter")
            .field("file", &self.file)
            .field("formatter", &self.formatter)
            .field("stopped", &self.stopped)
            .finish()
    }
}

/// Builds a provider that exports every finished span synchronously to
/// `trace_file`, tagged with `resource` and instrumentation `scope`.
pub fn file_tracer_provider(trace_file: PathBuf, resource: Resource, scope: &'static str) -> TracerProvider {
    let exporter = TraceFileExporter::new(
        RotatingFile::new(trace_file),
        OtlpJsonFormatter::new(resource.clone(), scope),
    );

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_land_in_the_trace_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.json");
        let resource = Resource::new(vec![KeyValue::new("service.name", "VCFinder")]);
        let provider = file_tracer_provider(path.clone(), resource, "VCFinder");

        provider.tracer("test").in_span("engine.search", |_cx| {});

        let contents = std::fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        let span = &doc["resourceSpans"][0]["scopeSpans"][0]["spans"][0];
        assert_eq!(span["name"], "engine.search");
        assert_eq!(span["parentSpanId"], "");
    }

    #[test]
    fn export_after_shutdown_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = TraceFileExporter::new(
            RotatingFile::new(dir.path().join("spans.json")),
            OtlpJsonFormatter::new(Resource::empty(), "VCFinder"),
        );
        exporter.shutdown();
        assert!(exporter.write_batch(&[]).is_err());
    }
}
