//! # evbus
//!
//! **Evbus** is a synchronous, typed, in-process event bus for Rust.
//!
//! Producers dispatch strongly-typed event values; consumers register
//! handlers tagged with one of six priority tiers and a
//! cancellation-visibility flag. The dispatcher delivers each event to all
//! interested handlers in a deterministic, priority-ordered sequence,
//! honoring a per-event cancellation flag that short-circuits delivery to
//! later handlers — and one faulty handler never blocks the rest.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//!  │  Listener A  │    │  Listener B  │    │  Listener C  │
//!  │ (handlers()) │    │ (handlers()) │    │ (handlers()) │
//!  └──────┬───────┘    └──────┬───────┘    └──────┬───────┘
//!         │ register          │                   │
//!         ▼                   ▼                   ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Dispatcher (bus handle, cheap clone)                       │
//! │  - Registry: EventType ──► PriorityBucket                   │
//! │  - PriorityBucket: 6 tier lists + flattened ordered view    │
//! │  - SinkSet: fans handler failures to FailureSinks           │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │ dispatch(event)
//!                                ▼
//!              event's type ─► parent view ─► ... (most specific first)
//!              each level: Monitor → Highest → High → Normal → Low → Lowest
//! ```
//!
//! ### Delivery rules
//! ```text
//! dispatch(event)
//!   for each type level (event, then ancestors):
//!     for each handler in the level's ordered view:
//!       ├─ event cancelled and handler not ignore_cancelled? ─► skip
//!       ├─ invoke target
//!       │    ├─ Ok            ─► continue
//!       │    └─ error/panic   ─► report to failure sinks, continue
//!       └─ Monitor tier?      ─► force cancellation flag back off
//!   return event
//! ```
//!
//! ## Features
//! | Area             | Description                                              | Key types / traits              |
//! |------------------|----------------------------------------------------------|---------------------------------|
//! | **Events**       | Typed carriers with supertype views and cancellation.    | [`Event`], [`Cancellable`]      |
//! | **Handlers**     | Descriptors bound to an owning instance, six tiers.      | [`Handler`], [`Priority`]       |
//! | **Registration** | Listeners supply descriptors; removal by owner or id.    | [`Listener`], [`HandlerId`]     |
//! | **Dispatch**     | Synchronous, ordered, cancellation-aware delivery.       | [`Dispatcher`]                  |
//! | **Failures**     | Handler faults isolated and reported, never propagated.  | [`FailureSink`], [`HandlerFault`] |
//!
//! ## Optional features
//! - `logging`: exports [`LogSink`], a built-in failure sink emitting
//!   structured `tracing` records.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use evbus::{Cancellable, Dispatcher, Event, EventType, Handler, Listener, Priority};
//!
//! struct ChatMessage {
//!     text: String,
//!     cancelled: bool,
//! }
//!
//! impl Event for ChatMessage {
//!     fn event_type(&self) -> EventType {
//!         EventType::of::<Self>()
//!     }
//!
//!     fn as_cancellable(&mut self) -> Option<&mut dyn Cancellable> {
//!         Some(self)
//!     }
//! }
//!
//! impl Cancellable for ChatMessage {
//!     fn is_cancelled(&self) -> bool {
//!         self.cancelled
//!     }
//!
//!     fn set_cancelled(&mut self, cancelled: bool) {
//!         self.cancelled = cancelled;
//!     }
//! }
//!
//! struct Moderation;
//!
//! impl Listener for Moderation {
//!     fn handlers(self: Arc<Self>) -> Vec<Handler> {
//!         vec![
//!             Handler::bind("censor", &self, |_: &Moderation, ev: &mut ChatMessage| {
//!                 if ev.text.contains("spam") {
//!                     ev.set_cancelled(true);
//!                 }
//!                 Ok(())
//!             })
//!             .with_priority(Priority::High),
//!         ]
//!     }
//! }
//!
//! let bus = Dispatcher::new();
//! let moderation = Arc::new(Moderation);
//! bus.register(&moderation);
//!
//! let ev = bus.dispatch(ChatMessage {
//!     text: "spam offer".into(),
//!     cancelled: false,
//! });
//! assert!(ev.is_cancelled());
//! ```

mod bus;
mod error;
mod events;
mod handlers;
mod sinks;

// ---- Public re-exports ----

pub use bus::{Dispatcher, DispatcherBuilder};
pub use error::{BoxError, HandlerFault};
pub use events::{Cancellable, Event, EventType};
pub use handlers::{Handler, HandlerId, Listener, OwnerId, Priority};
pub use sinks::{FailureSink, SinkSet};

// Optional: expose a simple built-in logging failure sink.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use sinks::LogSink;
