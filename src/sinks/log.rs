//! # Built-in logging failure sink.
//!
//! [`LogSink`] emits one structured `tracing` error record per captured
//! handler failure. Enabled via the `logging` feature.
//!
//! ## Output fields
//! ```text
//! handler   the failed handler's name
//! owner     identity of the owning listener instance
//! event     short event type name
//! priority  the handler's tier label
//! fault     "handler_error" | "handler_panic"
//! ```
//!
//! Suitable as a default; hosts with their own telemetry implement
//! [`FailureSink`](crate::FailureSink) directly.

use crate::error::HandlerFault;
use crate::handlers::Handler;
use crate::sinks::FailureSink;

/// Structured-logging failure sink.
///
/// Enabled via the `logging` feature. Requires a `tracing` subscriber to be
/// installed by the host; without one the records go nowhere.
pub struct LogSink;

impl FailureSink for LogSink {
    fn report(&self, handler: &Handler, fault: &HandlerFault) {
        tracing::error!(
            handler = %handler.name(),
            owner = %handler.owner(),
            event = %handler.event_type(),
            priority = %handler.priority(),
            fault = %fault.as_label(),
            "handler failed during dispatch: {}",
            fault.as_message(),
        );
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
