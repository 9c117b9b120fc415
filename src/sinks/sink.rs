//! # Failure sink contract.
//!
//! `FailureSink` is the extension point for observing handler-body
//! failures: the dispatcher hands every captured failure to each installed
//! sink along with the failed handler's descriptor.
//!
//! ## Contract
//! - Sinks are called synchronously from inside the delivery loop; keep
//!   them cheap (log, count, enqueue).
//! - Sinks must not throw back into the dispatcher. A panicking sink is
//!   caught and noted on stderr, never propagated.
//!
//! ## Example
//! ```
//! use evbus::{FailureSink, Handler, HandlerFault};
//!
//! struct FaultCounter(std::sync::atomic::AtomicU64);
//!
//! impl FailureSink for FaultCounter {
//!     fn report(&self, _handler: &Handler, _fault: &HandlerFault) {
//!         self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "fault_counter"
//!     }
//! }
//! ```

use crate::error::HandlerFault;
use crate::handlers::Handler;

/// Contract for delivery-failure reporting.
///
/// Implementations receive the failed handler's descriptor (name, owner,
/// event type, tier) and the captured fault.
pub trait FailureSink: Send + Sync + 'static {
    /// Handles one captured handler failure.
    fn report(&self, handler: &Handler, fault: &HandlerFault);

    /// Human-readable name (for the stderr note when a sink panics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
