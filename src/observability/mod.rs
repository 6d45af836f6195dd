//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Traces land in `~/.local/share/zellij/notepane/notepane-otlp.json`
//! (`/host/...` inside the sandbox), rotated at 10 MB with 3 numbered backups.
//! The level comes from the `trace_level` plugin option, default `info`.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider with the file exporter
//! - `span_formatter`: OTLP JSON serialization
//! - `file_writer`: Size-rotated line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;

/// `service.name` resource attribute and instrumentation scope.
const SERVICE_NAME: &str = "notepane";

const TRACE_FILE_NAME: &str = "notepane-otlp.json";
