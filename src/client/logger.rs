//! Optional logging hook injected into [`ClickatellClient`](super::ClickatellClient).

/// Receives the client's informational and error lines.
///
/// Called before each batch is posted, after it succeeds, on failure, and once when a
/// send is split into batches. Implementations must not panic; the return value of a
/// send never depends on the logger.
pub trait SmsLogger: Send + Sync {
    fn info(&self, message: &str);

    fn error(&self, message: &str);
}

#[derive(Debug, Clone, Copy, Default)]
/// [`SmsLogger`] that forwards to the `tracing` macros under the `clickatell` target.
pub struct TracingLogger;

impl SmsLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "clickatell", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "clickatell", "{message}");
    }
}
