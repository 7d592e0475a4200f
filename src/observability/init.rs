//! Tracing subscriber setup.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::tracer;
use crate::Config;

/// Service and instrumentation scope name attached to every span.
pub const SERVICE_NAME: &str = "moviescout";

/// File name of the trace export inside the data directory.
pub const TRACE_FILE_NAME: &str = "moviescout-otlp.json";

/// Installs the global subscriber: an `EnvFilter` built from
/// `config.trace_level` (default `info`), an OpenTelemetry layer exporting to
/// `<data_dir>/moviescout-otlp.json`, and with `log_to_stderr` a compact
/// formatter on stderr.
///
/// Never fails. If the data directory cannot be created only the stderr
/// layer (if enabled) is installed; a second call is a no-op.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let stderr_layer = config
        .log_to_stderr
        .then(|| fmt::layer().compact().with_writer(std::io::stderr));

    let data_dir = crate::infrastructure::paths::get_data_dir();
    let otel_layer = match std::fs::create_dir_all(&data_dir) {
        Ok(()) => {
            let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
            let provider = tracer::file_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);
            Some(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
        }
        Err(_) => None,
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .with(stderr_layer)
        .try_init();
}
