//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileExporter → JSON lines
//! ```
//!
//! Spans land in `<data_dir>/moviescout-otlp.json`, one OTLP JSON document per
//! export, rotating at 10 MB with 3 backups. The level comes from the
//! `trace_level` config option (default `"info"`).
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider with the file exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: Rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
