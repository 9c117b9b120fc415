//! # Per-event-type priority table.
//!
//! [`PriorityBucket`] partitions the handlers registered for one event type
//! into the six priority tiers and maintains a cached flattened view
//! ordered Monitor, Highest, High, Normal, Low, Lowest — highest precedence
//! first, registration order within a tier. The view is rebuilt after every
//! add/remove, so reads never observe an order stale relative to the latest
//! mutation.

use crate::handlers::{Handler, HandlerId, OwnerId, Priority};

/// Sorted handler collection for one event type.
///
/// Owned by the registry; one bucket per event type, created on first
/// registration.
#[derive(Default)]
pub(crate) struct PriorityBucket {
    tiers: [Vec<Handler>; 6],
    ordered: Vec<Handler>,
}

impl PriorityBucket {
    /// Appends a handler to the tier matching its priority.
    pub(crate) fn add(&mut self, handler: Handler) {
        self.tiers[handler.priority().slot() as usize].push(handler);
        self.rebuild();
    }

    /// Removes the first entry with the given identity.
    ///
    /// Returns whether something was removed.
    pub(crate) fn remove(&mut self, id: HandlerId) -> bool {
        for tier in &mut self.tiers {
            if let Some(pos) = tier.iter().position(|h| h.id() == id) {
                tier.remove(pos);
                self.rebuild();
                return true;
            }
        }
        false
    }

    /// Removes every handler owned by the given instance.
    ///
    /// Returns how many were removed; 0 is a no-op, not an error.
    pub(crate) fn remove_owner(&mut self, owner: OwnerId) -> usize {
        let mut removed = 0;
        for tier in &mut self.tiers {
            let before = tier.len();
            tier.retain(|h| h.owner() != owner);
            removed += before - tier.len();
        }
        if removed > 0 {
            self.rebuild();
        }
        removed
    }

    /// Returns the flattened, delivery-ordered view.
    pub(crate) fn ordered(&self) -> &[Handler] {
        &self.ordered
    }

    /// Returns one tier's handlers in registration order.
    #[allow(dead_code)]
    pub(crate) fn tier(&self, priority: Priority) -> &[Handler] {
        &self.tiers[priority.slot() as usize]
    }

    fn rebuild(&mut self) {
        self.ordered.clear();
        for priority in Priority::ALL.iter().rev() {
            self.ordered
                .extend(self.tiers[priority.slot() as usize].iter().cloned());
        }
    }
}
