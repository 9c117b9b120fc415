//! # Listener contract.
//!
//! [`Listener`] is how a handler-owning object tells the bus which handlers
//! it wants delivered. There is no runtime scanning or metadata extraction:
//! the listener itself returns already-built [`Handler`] descriptors, so a
//! malformed candidate (wrong arity, non-event parameter) simply does not
//! compile.
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use evbus::{Event, EventType, Handler, Listener, Priority};
//!
//! struct PlayerJoin;
//! impl Event for PlayerJoin {
//!     fn event_type(&self) -> EventType { EventType::of::<Self>() }
//! }
//!
//! struct JoinGreeter;
//!
//! impl JoinGreeter {
//!     fn on_join(&self, _ev: &mut PlayerJoin) -> Result<(), evbus::BoxError> {
//!         // greet...
//!         Ok(())
//!     }
//! }
//!
//! impl Listener for JoinGreeter {
//!     fn handlers(self: Arc<Self>) -> Vec<Handler> {
//!         vec![
//!             Handler::bind("on_join", &self, JoinGreeter::on_join)
//!                 .with_priority(Priority::High),
//!         ]
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::handlers::Handler;

/// Contract for handler-owning objects.
///
/// [`Dispatcher::register`](crate::Dispatcher::register) calls
/// [`handlers`](Listener::handlers) once and files every returned
/// descriptor; [`Dispatcher::unregister`](crate::Dispatcher::unregister)
/// later removes everything bound to the same instance.
///
/// Descriptors should be bound to `&self` (the registering `Arc`) so the
/// owner identity matches at unregistration.
pub trait Listener: Send + Sync + 'static {
    /// Returns a descriptor for every handler this listener wants delivered.
    fn handlers(self: Arc<Self>) -> Vec<Handler>;
}
