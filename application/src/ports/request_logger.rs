//! Port for structured request logging.
//!
//! Defines the [`RequestLogger`] trait for recording one audit record per
//! settled network call.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable trail (JSONL) of what was sent and how it ended.

use strata_domain::HttpMethod;

/// How a settled call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A response arrived; `status` may still be non-2xx.
    Response { status: u16 },
    /// No usable response: timeout, transport or decode failure.
    Failed { kind: &'static str, message: String },
}

/// One settled underlying call.
#[derive(Debug, Clone)]
pub struct RequestEvent {
    pub method: HttpMethod,
    pub path: String,
    pub outcome: RequestOutcome,
    pub elapsed_ms: u64,
    /// Whether the call was registered for sharing with identical GETs.
    pub deduplicated: bool,
}

/// Implementations write each event as a single record. `log` is
/// synchronous and non-fallible; failures are the implementation's concern.
pub trait RequestLogger: Send + Sync {
    fn log(&self, event: RequestEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoRequestLogger;

impl RequestLogger for NoRequestLogger {
    fn log(&self, _event: RequestEvent) {}
}
