//! # Event contract.
//!
//! An event is a plain data carrier the host dispatches through the bus.
//! The bus needs three things from it, all expressed by [`Event`]:
//!
//! - its nominal identity ([`Event::event_type`]);
//! - its supertype chain ([`Event::parent_mut`]) — Rust has no struct
//!   inheritance, so a "subtype" embeds its parent event as a field and
//!   projects a mutable view of it. The dispatcher follows these views
//!   upward, delivering to the handlers registered for each level, and
//!   stops when there is no parent left;
//! - an optional cancellation capability ([`Event::as_cancellable`]). An
//!   event that does not expose one is never cancellable.
//!
//! ## One cancellation state per event
//! An event that embeds a parent must observe the same cancellation state
//! through every view: keep the flag in one place (usually the outermost
//! struct or the shared root) and delegate.
//!
//! ## Example
//! ```
//! use evbus::{Cancellable, Event, EventType};
//!
//! struct MessageSend {
//!     text: String,
//!     cancelled: bool,
//! }
//!
//! impl Event for MessageSend {
//!     fn event_type(&self) -> EventType {
//!         EventType::of::<Self>()
//!     }
//!
//!     fn as_cancellable(&mut self) -> Option<&mut dyn Cancellable> {
//!         Some(self)
//!     }
//! }
//!
//! impl Cancellable for MessageSend {
//!     fn is_cancelled(&self) -> bool {
//!         self.cancelled
//!     }
//!
//!     fn set_cancelled(&mut self, cancelled: bool) {
//!         self.cancelled = cancelled;
//!     }
//! }
//! ```

use std::any::Any;

use crate::events::EventType;

/// # A dispatchable event.
///
/// Implementors are plain data carriers; the bus reads their identity and
/// supertype chain, and mutates nothing except the cancellation flag (via
/// handlers).
///
/// [`event_type`](Event::event_type) is a one-liner returning
/// `EventType::of::<Self>()`. The two remaining methods default to "no
/// parent" and "not cancellable".
pub trait Event: Any {
    /// Returns the nominal identity of this event.
    fn event_type(&self) -> EventType;

    /// Returns a mutable view of the immediate supertype, if any.
    ///
    /// An event that conceptually extends another embeds it as a field and
    /// returns `Some(&mut self.parent_field)`. Handlers registered for the
    /// parent type receive exactly this view.
    fn parent_mut(&mut self) -> Option<&mut dyn Event> {
        None
    }

    /// Returns the cancellation capability of this event, if it has one.
    ///
    /// The dispatcher treats `None` as "never cancellable": the
    /// cancellation gate and the Monitor-tier reset are skipped entirely.
    fn as_cancellable(&mut self) -> Option<&mut dyn Cancellable> {
        None
    }
}

/// # Cancellation capability of an event.
///
/// Expose it from [`Event::as_cancellable`] to let handlers cancel the
/// event. Once cancelled, handlers that do not opt into seeing cancelled
/// events are skipped for the rest of the delivery.
///
/// This trait is not meant to be implemented by non-event types.
pub trait Cancellable {
    /// Returns whether the event is currently cancelled.
    fn is_cancelled(&self) -> bool;

    /// Sets the cancelled state of this event.
    fn set_cancelled(&mut self, cancelled: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Event for Plain {
        fn event_type(&self) -> EventType {
            EventType::of::<Self>()
        }
    }

    struct Stoppable {
        cancelled: bool,
    }

    impl Event for Stoppable {
        fn event_type(&self) -> EventType {
            EventType::of::<Self>()
        }

        fn as_cancellable(&mut self) -> Option<&mut dyn Cancellable> {
            Some(self)
        }
    }

    impl Cancellable for Stoppable {
        fn is_cancelled(&self) -> bool {
            self.cancelled
        }

        fn set_cancelled(&mut self, cancelled: bool) {
            self.cancelled = cancelled;
        }
    }

    #[test]
    fn test_defaults_no_parent_not_cancellable() {
        let mut ev = Plain;
        assert!(ev.parent_mut().is_none());
        assert!(ev.as_cancellable().is_none());
    }

    #[test]
    fn test_cancellable_round_trip() {
        let mut ev = Stoppable { cancelled: false };
        let flag = ev.as_cancellable().map(|c| c.is_cancelled());
        assert_eq!(flag, Some(false));

        if let Some(c) = ev.as_cancellable() {
            c.set_cancelled(true);
        }
        assert!(ev.cancelled);
    }
}
