//! Subscriber wiring for the process.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "VCFinder";

/// File name of the trace log inside the data directory.
pub const TRACE_FILE_NAME: &str = "vcfinder-otlp.json";

/// Installs the global subscriber exporting spans to the trace file.
///
/// `RUST_LOG` wins over `config.trace_level`, which wins over `"info"`.
/// Observability is optional: if the data directory cannot be created the
/// function returns without installing anything. Later calls are no-ops.
pub fn init_tracing(config: &Config) {
    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.trace_level.as_deref().unwrap_or("info")));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::file_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
        .try_init();
}
