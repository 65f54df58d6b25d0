//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → JsonLinesExporter → RotatingFile
//! ```
//!
//! - **File-Based Export**: `<data dir>/hirebox/hirebox-otlp.json`, one OTLP JSON
//!   document per exported batch
//! - **Automatic Rotation**: at 10 MB, keeping `.1` to `.3` backups
//! - **Level**: `trace_level` from [`crate::Config`], default `"info"`
//!
//! Worker threads join the caller's trace through
//! [`crate::worker::TraceContext`].

mod exporter;
mod init;
mod rotate;

pub use exporter::{tracer_provider, JsonLinesExporter};
pub use init::{init_tracing, init_tracing_in, DEFAULT_TRACE_LEVEL, TRACE_FILE_NAME};
pub use rotate::RotatingFile;
