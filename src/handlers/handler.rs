//! # Handler descriptor (`Handler`).
//!
//! [`Handler`] bundles everything the dispatch core needs to know about one
//! registered handler: the owning listener instance, the event type it
//! accepts, its priority tier, its cancellation-visibility flag, and the
//! invocation target — a closure bound to the owner at construction time.
//!
//! [`Handler::bind`] is the only constructor. It takes a typed function
//! `Fn(&L, &mut E) -> Result<(), BoxError>` and erases it behind one point
//! of indirection; the erased target downcasts the delivered event view back
//! to `E` on every invocation. A descriptor whose downcast fails was filed
//! under the wrong registry key — the dispatcher escalates that instead of
//! recovering.
//!
//! ## Identity
//! Every `bind` call mints a process-wide unique [`HandlerId`] representing
//! that (owner, target) binding; removal is keyed by it. Cloning a
//! `Handler` clones the id, so registering the same descriptor twice yields
//! two independent list entries that unregister one at a time.
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use evbus::{Event, EventType, Handler, Priority};
//!
//! struct Tick;
//! impl Event for Tick {
//!     fn event_type(&self) -> EventType { EventType::of::<Self>() }
//! }
//!
//! struct Clock;
//!
//! let clock = Arc::new(Clock);
//! let handler = Handler::bind("on_tick", &clock, |_: &Clock, _: &mut Tick| Ok(()))
//!     .with_priority(Priority::High)
//!     .with_ignore_cancelled(true);
//!
//! assert_eq!(handler.priority(), Priority::High);
//! assert!(handler.ignore_cancelled());
//! assert_eq!(handler.event_type(), EventType::of::<Tick>());
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{BoxError, InvokeError};
use crate::events::{Event, EventType};
use crate::handlers::Priority;

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of one (owner, target) handler binding.
///
/// Minted by [`Handler::bind`]; stable for the life of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    fn next() -> Self {
        Self(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of an owning listener instance.
///
/// Derived from the `Arc` allocation address: every clone of one
/// `Arc<L>` shares the same identity, and two separately allocated
/// listeners never collide while both are alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OwnerId(usize);

impl OwnerId {
    /// Returns the identity of the given listener instance.
    #[must_use]
    pub fn of<L>(owner: &Arc<L>) -> Self {
        Self(Arc::as_ptr(owner) as *const () as usize)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

type TargetFn = Arc<dyn Fn(&mut dyn Event) -> Result<(), InvokeError> + Send + Sync>;

/// # A registered handler descriptor.
///
/// Immutable after construction. Built with [`Handler::bind`], tuned with
/// the fluent `with_*` methods, then handed to
/// [`Dispatcher::register_handler`](crate::Dispatcher::register_handler)
/// or returned from [`Listener::handlers`](crate::Listener::handlers).
#[derive(Clone)]
pub struct Handler {
    name: Cow<'static, str>,
    owner: OwnerId,
    event_type: EventType,
    priority: Priority,
    ignore_cancelled: bool,
    id: HandlerId,
    target: TargetFn,
}

impl Handler {
    /// Creates a descriptor binding `target` to the owning instance.
    ///
    /// Defaults: [`Priority::Normal`], `ignore_cancelled = false`.
    ///
    /// The accepted event type is `E`, taken from the target's second
    /// parameter; the descriptor is registered under exactly that type.
    pub fn bind<L, E, F>(name: impl Into<Cow<'static, str>>, owner: &Arc<L>, target: F) -> Self
    where
        L: Send + Sync + 'static,
        E: Event,
        F: Fn(&L, &mut E) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let expected = EventType::of::<E>();
        let bound = Arc::clone(owner);
        let target: TargetFn = Arc::new(move |event: &mut dyn Event| {
            let got = event.event_type();
            let any: &mut dyn Any = event;
            match any.downcast_mut::<E>() {
                Some(event) => target(&bound, event).map_err(InvokeError::Handler),
                None => Err(InvokeError::TypeMismatch { expected, got }),
            }
        });

        Self {
            name: name.into(),
            owner: OwnerId::of(owner),
            event_type: expected,
            priority: Priority::Normal,
            ignore_cancelled: false,
            id: HandlerId::next(),
            target,
        }
    }

    /// Sets the priority tier.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets whether this handler still runs once the event is cancelled.
    #[must_use]
    pub fn with_ignore_cancelled(mut self, ignore: bool) -> Self {
        self.ignore_cancelled = ignore;
        self
    }

    /// Returns the human-readable handler name (for logs/reports).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the identity of this (owner, target) binding.
    #[must_use]
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Returns the identity of the owning listener instance.
    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns the event type this handler accepts.
    #[must_use]
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Returns the priority tier.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns whether this handler runs even when the event is cancelled.
    #[must_use]
    pub fn ignore_cancelled(&self) -> bool {
        self.ignore_cancelled
    }

    /// Invokes the bound target with the given event view.
    pub(crate) fn invoke(&self, event: &mut dyn Event) -> Result<(), InvokeError> {
        (self.target)(event)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("event_type", &self.event_type)
            .field("priority", &self.priority)
            .field("ignore_cancelled", &self.ignore_cancelled)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping {
        seen: u32,
    }

    impl Event for Ping {
        fn event_type(&self) -> EventType {
            EventType::of::<Self>()
        }
    }

    struct Pong;

    impl Event for Pong {
        fn event_type(&self) -> EventType {
            EventType::of::<Self>()
        }
    }

    struct Owner;

    #[test]
    fn test_bind_defaults() {
        let owner = Arc::new(Owner);
        let h = Handler::bind("on_ping", &owner, |_: &Owner, _: &mut Ping| Ok(()));

        assert_eq!(h.priority(), Priority::Normal);
        assert!(!h.ignore_cancelled());
        assert_eq!(h.event_type(), EventType::of::<Ping>());
        assert_eq!(h.owner(), OwnerId::of(&owner));
        assert_eq!(h.name(), "on_ping");
    }

    #[test]
    fn test_each_bind_mints_a_fresh_id() {
        let owner = Arc::new(Owner);
        let a = Handler::bind("a", &owner, |_: &Owner, _: &mut Ping| Ok(()));
        let b = Handler::bind("b", &owner, |_: &Owner, _: &mut Ping| Ok(()));
        assert_ne!(a.id(), b.id());

        // A clone is the same binding.
        assert_eq!(a.id(), a.clone().id());
    }

    #[test]
    fn test_owner_identity_follows_the_allocation() {
        let first = Arc::new(Owner);
        let second = Arc::new(Owner);
        assert_ne!(OwnerId::of(&first), OwnerId::of(&second));
        assert_eq!(OwnerId::of(&first), OwnerId::of(&Arc::clone(&first)));
    }

    #[test]
    fn test_invoke_downcasts_to_the_declared_type() {
        let owner = Arc::new(Owner);
        let h = Handler::bind("bump", &owner, |_: &Owner, ev: &mut Ping| {
            ev.seen += 1;
            Ok(())
        });

        let mut ev = Ping { seen: 0 };
        h.invoke(&mut ev).unwrap();
        h.invoke(&mut ev).unwrap();
        assert_eq!(ev.seen, 2);
    }

    #[test]
    fn test_invoke_mismatch_is_not_a_handler_error() {
        let owner = Arc::new(Owner);
        let h = Handler::bind("on_ping", &owner, |_: &Owner, _: &mut Ping| Ok(()));

        let mut wrong = Pong;
        let err = h.invoke(&mut wrong).unwrap_err();
        assert!(matches!(err, InvokeError::TypeMismatch { .. }));
    }

    #[test]
    fn test_handler_error_passes_through() {
        let owner = Arc::new(Owner);
        let h = Handler::bind("fails", &owner, |_: &Owner, _: &mut Ping| {
            Err("nope".into())
        });

        let mut ev = Ping { seen: 0 };
        let err = h.invoke(&mut ev).unwrap_err();
        assert!(matches!(err, InvokeError::Handler(_)));
    }
}
