//! Tracing export to a local OTLP/JSON file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → TraceFileExporter → <data_dir>/vcfinder-otlp.json
//! ```
//!
//! Every exported batch is one line holding a complete `resourceSpans`
//! document. The file rotates at 10 MiB and keeps three backups
//! (`vcfinder-otlp.json.1` is the most recent).
//!
//! ```rust,no_run
//! use vcfinder::observability::init_tracing;
//! use vcfinder::Config;
//!
//! init_tracing(&Config::default());
//! tracing::info!("tracing ready");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};
