//! ## shufflegrind-telemetry::logging
//! **Structured logging with tracing and OpenTelemetry attributes**
//!
//! `RUST_LOG` wins over the configured default level. Logs go to stderr;
//! stdout is reserved for experiment output.

use opentelemetry::KeyValue;
use tracing::info_span;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global subscriber. Later calls are no-ops.
    pub fn init(default_level: &str) {
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Emits one structured experiment event.
    #[inline]
    pub fn log_event(event_type: &str, metadata: Vec<KeyValue>) {
        let span = info_span!("experiment_event", event_type = event_type);
        let _guard = span.enter();
        tracing::info!(metadata = ?metadata, "Experiment event recorded");
    }
}
