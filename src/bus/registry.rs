//! # Handler registry.
//!
//! Maps each [`EventType`] to its [`PriorityBucket`]. Buckets are created
//! lazily on first registration for a type and are never removed, even once
//! emptied — an absent bucket and an empty one are still distinguishable
//! through [`Registry::lookup`].

use std::collections::HashMap;

use crate::events::EventType;
use crate::handlers::{Handler, HandlerId, OwnerId, PriorityBucket};

/// Registry of handlers, bucketed by event type.
#[derive(Default)]
pub(crate) struct Registry {
    buckets: HashMap<EventType, PriorityBucket>,
}

impl Registry {
    /// Files a descriptor into the bucket for its event type.
    pub(crate) fn register(&mut self, handler: Handler) -> HandlerId {
        let id = handler.id();
        self.buckets
            .entry(handler.event_type())
            .or_default()
            .add(handler);
        id
    }

    /// Removes every descriptor owned by the given instance.
    ///
    /// Returns how many were removed; 0 is a no-op, not an error.
    pub(crate) fn unregister_owner(&mut self, owner: OwnerId) -> usize {
        self.buckets
            .values_mut()
            .map(|bucket| bucket.remove_owner(owner))
            .sum()
    }

    /// Removes the first descriptor with the given identity.
    ///
    /// Returns whether something was removed.
    pub(crate) fn unregister_target(&mut self, id: HandlerId) -> bool {
        self.buckets.values_mut().any(|bucket| bucket.remove(id))
    }

    /// Returns the bucket for exactly this type, if one was ever created.
    pub(crate) fn lookup(&self, event_type: EventType) -> Option<&PriorityBucket> {
        self.buckets.get(&event_type)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::events::Event;
    use crate::handlers::Priority;

    struct DoorOpen;
    struct DoorClose;

    impl Event for DoorOpen {
        fn event_type(&self) -> EventType {
            EventType::of::<Self>()
        }
    }

    impl Event for DoorClose {
        fn event_type(&self) -> EventType {
            EventType::of::<Self>()
        }
    }

    struct Owner;

    fn open_handler(name: &'static str, owner: &Arc<Owner>) -> Handler {
        Handler::bind(name, owner, |_: &Owner, _: &mut DoorOpen| Ok(()))
    }

    #[test]
    fn test_bucket_created_lazily() {
        let owner = Arc::new(Owner);
        let mut registry = Registry::default();
        assert!(registry.lookup(EventType::of::<DoorOpen>()).is_none());

        registry.register(open_handler("a", &owner));
        assert!(registry.lookup(EventType::of::<DoorOpen>()).is_some());
        assert!(registry.lookup(EventType::of::<DoorClose>()).is_none());
    }

    #[test]
    fn test_emptied_bucket_stays_absent_ne_empty() {
        let owner = Arc::new(Owner);
        let mut registry = Registry::default();

        let id = registry.register(open_handler("a", &owner));
        assert!(registry.unregister_target(id));

        // The bucket survives emptying; lookup still finds it.
        let bucket = registry.lookup(EventType::of::<DoorOpen>());
        assert!(bucket.is_some_and(|b| b.ordered().is_empty()));
    }

    #[test]
    fn test_unregister_owner_spans_event_types() {
        let ours = Arc::new(Owner);
        let theirs = Arc::new(Owner);
        let mut registry = Registry::default();

        registry.register(open_handler("ours_open", &ours));
        registry.register(
            Handler::bind("ours_close", &ours, |_: &Owner, _: &mut DoorClose| Ok(()))
                .with_priority(Priority::High),
        );
        registry.register(open_handler("theirs_open", &theirs));

        assert_eq!(registry.unregister_owner(OwnerId::of(&ours)), 2);
        assert_eq!(registry.unregister_owner(OwnerId::of(&ours)), 0);

        let open = registry.lookup(EventType::of::<DoorOpen>()).unwrap();
        assert_eq!(open.ordered().len(), 1);
        assert_eq!(open.ordered()[0].name(), "theirs_open");
    }

    #[test]
    fn test_unregister_unknown_target_reports_false() {
        let owner = Arc::new(Owner);
        let mut registry = Registry::default();

        let never_registered = open_handler("stray", &owner);
        assert!(!registry.unregister_target(never_registered.id()));
    }
}
