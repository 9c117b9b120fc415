//! # Event dispatcher.
//!
//! [`Dispatcher`] is the bus handle: it owns the registry and the failure
//! sinks, and delivers events synchronously.
//!
//! ## Delivery
//! ```text
//! dispatch(event)
//!   │
//!   ├─► look up bucket for event's own type ──► deliver ordered view
//!   ├─► project parent view (if any)       ──► deliver ordered view
//!   ├─► ... up the chain until no parent remains
//!   └─► return the event (cancellation flag possibly set)
//!
//! deliver(ordered view):
//!   for each handler, Monitor → Highest → High → Normal → Low → Lowest:
//!     ├─ cancelled and handler does not ignore cancelled? skip
//!     ├─ invoke; body error or panic → failure sinks, keep going
//!     └─ Monitor tier? force the cancellation flag back off
//! ```
//!
//! ## Re-entrancy
//! The ordered view is snapshotted before any handler runs and no lock is
//! held during invocation, so a handler may freely call back into the same
//! bus — dispatching another event, registering, or unregistering. A nested
//! `dispatch` runs to completion before the outer delivery resumes.
//! Registration from inside a handler affects the next dispatch, not the
//! one in flight.
//!
//! ## Threading
//! `Dispatcher` is a cheap clone (shared inner); registration and dispatch
//! may run concurrently from multiple threads. One registry-wide lock keeps
//! every read of a bucket's ordered view consistent with the latest
//! completed mutation.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::bus::builder::DispatcherBuilder;
use crate::bus::registry::Registry;
use crate::error::{HandlerFault, InvokeError};
use crate::events::{Event, EventType};
use crate::handlers::{Handler, HandlerId, Listener, OwnerId, Priority};
use crate::sinks::SinkSet;

/// Synchronous, typed event bus.
///
/// Create one with [`Dispatcher::new`] (no failure sinks) or
/// [`Dispatcher::builder`]. Clones share the same registry and sinks.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use evbus::{Dispatcher, Event, EventType, Handler, Listener};
///
/// struct Saved {
///     path: String,
/// }
///
/// impl Event for Saved {
///     fn event_type(&self) -> EventType {
///         EventType::of::<Self>()
///     }
/// }
///
/// struct Audit;
///
/// impl Listener for Audit {
///     fn handlers(self: Arc<Self>) -> Vec<Handler> {
///         vec![Handler::bind("on_saved", &self, |_: &Audit, ev: &mut Saved| {
///             println!("saved {}", ev.path);
///             Ok(())
///         })]
///     }
/// }
///
/// let bus = Dispatcher::new();
/// let audit = Arc::new(Audit);
/// bus.register(&audit);
///
/// let ev = bus.dispatch(Saved { path: "a.txt".into() });
/// assert_eq!(ev.path, "a.txt");
///
/// bus.unregister(&audit);
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

struct Inner {
    registry: RwLock<Registry>,
    sinks: SinkSet,
}

impl Dispatcher {
    /// Creates a bus with no failure sinks installed.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder for a bus with failure sinks.
    #[must_use]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    pub(crate) fn from_parts(sinks: SinkSet) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: RwLock::new(Registry::default()),
                sinks,
            }),
        }
    }

    /// Registers every handler the listener supplies.
    pub fn register<L: Listener>(&self, listener: &Arc<L>) {
        let handlers = Arc::clone(listener).handlers();
        let mut registry = self.registry_write();
        for handler in handlers {
            registry.register(handler);
        }
    }

    /// Registers a single descriptor; returns its identity for targeted
    /// removal.
    pub fn register_handler(&self, handler: Handler) -> HandlerId {
        self.registry_write().register(handler)
    }

    /// Removes every descriptor owned by the given listener instance.
    ///
    /// Descriptors from other instances are untouched, including ones for
    /// the same event types. Returns how many were removed; 0 is a no-op,
    /// not an error.
    pub fn unregister<L>(&self, listener: &Arc<L>) -> usize {
        self.registry_write().unregister_owner(OwnerId::of(listener))
    }

    /// Removes one (owner, target) binding by its identity.
    ///
    /// Returns whether something was removed.
    pub fn unregister_handler(&self, id: HandlerId) -> bool {
        self.registry_write().unregister_target(id)
    }

    /// Dispatches an event to every interested handler and returns it.
    ///
    /// Delivery covers the event's own type and every ancestor view, most
    /// specific first. Within one type, handlers run Monitor, Highest,
    /// High, Normal, Low, Lowest, registration order within a tier. The
    /// call is synchronous: it returns only after all eligible handlers
    /// ran. Handler-body failures go to the failure sinks and never
    /// propagate to the caller; the returned event carries whatever
    /// cancellation state the handlers left behind.
    ///
    /// # Panics
    /// Panics if a stored descriptor's declared event type does not match
    /// the view delivered for its bucket — a broken registry invariant,
    /// which is a programming defect rather than a runtime condition.
    pub fn dispatch<E: Event>(&self, mut event: E) -> E {
        self.walk(&mut event);
        event
    }

    /// Delivers to the bucket for this view's type, then recurses into the
    /// parent view. Depth is bounded by the event's ancestor chain.
    fn walk(&self, event: &mut dyn Event) {
        if let Some(ordered) = self.snapshot(event.event_type()) {
            self.deliver(&ordered, &mut *event);
        }
        if let Some(parent) = event.parent_mut() {
            self.walk(parent);
        }
    }

    fn deliver(&self, ordered: &[Handler], event: &mut dyn Event) {
        for handler in ordered {
            if !handler.ignore_cancelled()
                && event.as_cancellable().is_some_and(|c| c.is_cancelled())
            {
                continue;
            }

            let invoked = panic::catch_unwind(AssertUnwindSafe(|| handler.invoke(&mut *event)));
            match invoked {
                Ok(Ok(())) => {}
                Ok(Err(InvokeError::Handler(cause))) => {
                    self.inner
                        .sinks
                        .report(handler, &HandlerFault::Failed(cause));
                }
                Ok(Err(mismatch @ InvokeError::TypeMismatch { .. })) => {
                    panic!(
                        "registry invariant violated for handler '{}': {mismatch}",
                        handler.name()
                    );
                }
                Err(payload) => {
                    self.inner.sinks.report(
                        handler,
                        &HandlerFault::Panicked {
                            message: panic_message(payload),
                        },
                    );
                }
            }

            // Monitor cannot cancel: undo any flag it set, right away.
            if handler.priority() == Priority::Monitor {
                if let Some(c) = event.as_cancellable() {
                    c.set_cancelled(false);
                }
            }
        }
    }

    /// Clones the ordered view out of the lock so no guard is held while
    /// handlers run.
    fn snapshot(&self, event_type: EventType) -> Option<Vec<Handler>> {
        self.registry_read()
            .lookup(event_type)
            .map(|bucket| bucket.ordered().to_vec())
    }

    // No panic can occur while a guard is held, so a poisoned lock's data
    // is always consistent; recover instead of propagating.
    fn registry_read(&self) -> RwLockReadGuard<'_, Registry> {
        self.inner
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn registry_write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.inner
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
