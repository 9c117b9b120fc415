//! Error types used by the dispatch core.
//!
//! This module defines:
//!
//! - [`BoxError`] — the error currency handlers return from their bodies.
//! - [`HandlerFault`] — a captured handler-body failure, as reported to
//!   failure sinks. Never propagated to the caller of `dispatch`.
//! - [`InvokeError`] (crate-internal) — the outcome of one target
//!   invocation, separating recoverable handler-body errors from the
//!   type-mismatch case that marks a broken registry invariant.
//!
//! [`HandlerFault`] provides helper methods (`as_label`, `as_message`) for
//! logging/metrics.

use thiserror::Error;

use crate::events::EventType;

/// Boxed error type handlers return from their bodies.
///
/// Handlers are host-defined, so the bus does not prescribe a concrete error
/// type; anything convertible into a boxed `std::error::Error` works.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # A captured handler-body failure.
///
/// Produced by the dispatcher when a handler invocation fails from within
/// its own logic, and passed to every installed
/// [`FailureSink`](crate::FailureSink). Delivery to the remaining handlers
/// continues; callers of `dispatch` never see these.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HandlerFault {
    /// The handler returned an error from its body.
    #[error("handler returned an error: {0}")]
    Failed(#[source] BoxError),

    /// The handler panicked during invocation.
    #[error("handler panicked: {message}")]
    Panicked {
        /// The panic payload, rendered as a string.
        message: String,
    },
}

impl HandlerFault {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use evbus::HandlerFault;
    ///
    /// let fault = HandlerFault::Failed("boom".into());
    /// assert_eq!(fault.as_label(), "handler_error");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerFault::Failed(_) => "handler_error",
            HandlerFault::Panicked { .. } => "handler_panic",
        }
    }

    /// Returns a human-readable message with details about the failure.
    pub fn as_message(&self) -> String {
        match self {
            HandlerFault::Failed(cause) => format!("error: {cause}"),
            HandlerFault::Panicked { message } => format!("panic: {message}"),
        }
    }
}

/// Outcome of one target invocation.
///
/// `Handler` carries a recoverable handler-body error through to the
/// dispatcher. `TypeMismatch` means the delivered event view could not be
/// downcast to the handler's declared event type — the registry keyed the
/// handler under the wrong type, which is a programming defect, not a
/// runtime condition; the dispatcher escalates it instead of reporting it.
#[derive(Error, Debug)]
pub(crate) enum InvokeError {
    /// The handler body returned an error.
    #[error("handler failed: {0}")]
    Handler(BoxError),

    /// The delivered event view does not match the handler's declared type.
    #[error("handler expects {expected}, delivered {got}")]
    TypeMismatch {
        /// The event type the handler was registered for.
        expected: EventType,
        /// The event type actually delivered.
        got: EventType,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_labels_are_stable() {
        assert_eq!(HandlerFault::Failed("x".into()).as_label(), "handler_error");
        let panicked = HandlerFault::Panicked {
            message: "boom".to_string(),
        };
        assert_eq!(panicked.as_label(), "handler_panic");
    }

    #[test]
    fn test_fault_messages_include_cause() {
        let fault = HandlerFault::Failed("connection refused".into());
        assert!(fault.as_message().contains("connection refused"));

        let fault = HandlerFault::Panicked {
            message: "index out of bounds".to_string(),
        };
        assert!(fault.as_message().contains("index out of bounds"));
    }

    #[test]
    fn test_failed_exposes_source() {
        use std::error::Error;

        let fault = HandlerFault::Failed("inner".into());
        let source = fault.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("inner"));
    }
}
