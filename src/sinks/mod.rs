//! # Failure sinks: reporting seam for handler-body failures.
//!
//! The dispatcher never propagates a handler's failure to the caller of
//! `dispatch`; it reports it here instead.
//!
//! ```text
//! Failure flow:
//!   handler body errors or panics
//!       │
//!       ▼
//!   Dispatcher captures it ──► SinkSet ──► FailureSink::report(...)
//!                                              │
//!                                         ┌────┴────┬─────────┐
//!                                         ▼         ▼         ▼
//!                                      LogSink   Metrics   Custom ...
//! ```
//!
//! - [`FailureSink`] — the reporting contract
//! - [`SinkSet`] — fan-out with per-sink panic isolation
//! - [`LogSink`] — built-in structured-logging sink (`logging` feature)

mod set;
mod sink;

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogSink;
pub use set::SinkSet;
pub use sink::FailureSink;
