//! Tracing initialization and subscriber setup.
//!
//! Sets up the pipeline from `tracing` macros to the JSON-lines file:
//! an `EnvFilter` built from the configured level, then an OpenTelemetry layer
//! whose tracer exports through [`super::exporter`].

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when none is configured.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// File name of the trace log inside the data directory.
pub const TRACE_FILE_NAME: &str = "hirebox-otlp.json";

/// Initializes the global subscriber, writing traces under the data directory.
///
/// Best-effort: if the directory cannot be created or a subscriber is already
/// installed, nothing happens. Safe to call more than once.
///
/// Returns `true` when this call installed the subscriber.
///
/// # Example
///
/// ```rust,no_run
/// use hirebox::observability::init_tracing;
/// use hirebox::Config;
///
/// let config = Config { trace_level: Some("debug".to_string()), ..Default::default() };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> bool {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);
    init_tracing_in(&crate::infrastructure::data_dir(), level)
}

/// As [`init_tracing`], with an explicit directory and level directive.
pub fn init_tracing_in(dir: &Path, level: &str) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "hirebox"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = exporter::tracer_provider(dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(exporter::SCOPE_NAME));

    tracing_subscriber::registry().with(env_filter(level)).with(otel_layer).try_init().is_ok()
}

/// Parses `level` as a filter directive, falling back to the default level.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL))
}
