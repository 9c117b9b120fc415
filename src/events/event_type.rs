//! Nominal event type token.
//!
//! [`EventType`] is the key the registry buckets handlers under. Identity is
//! the concrete Rust type ([`TypeId`]); the type name rides along purely for
//! diagnostics and never participates in equality or hashing.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::events::Event;

/// Nominal identity of an event type.
///
/// Obtained with [`EventType::of`]; two tokens are equal exactly when they
/// name the same concrete type.
///
/// # Example
/// ```
/// use evbus::{Event, EventType};
///
/// struct Tick;
/// impl Event for Tick {
///     fn event_type(&self) -> EventType { EventType::of::<Self>() }
/// }
///
/// assert_eq!(EventType::of::<Tick>(), EventType::of::<Tick>());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct EventType {
    id: TypeId,
    name: &'static str,
}

impl EventType {
    /// Returns the token for the concrete event type `E`.
    #[must_use]
    pub fn of<E: Event>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: type_name::<E>(),
        }
    }

    /// Returns the full Rust path of the type (diagnostic only).
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the trailing path segment of the type name.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for EventType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventType {}

impl Hash for EventType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alpha;
    struct Beta;

    impl Event for Alpha {
        fn event_type(&self) -> EventType {
            EventType::of::<Self>()
        }
    }

    impl Event for Beta {
        fn event_type(&self) -> EventType {
            EventType::of::<Self>()
        }
    }

    #[test]
    fn test_identity_is_per_type() {
        assert_eq!(EventType::of::<Alpha>(), EventType::of::<Alpha>());
        assert_ne!(EventType::of::<Alpha>(), EventType::of::<Beta>());
    }

    #[test]
    fn test_display_uses_short_name() {
        let ty = EventType::of::<Alpha>();
        assert_eq!(format!("{ty}"), "Alpha");
        assert!(ty.name().ends_with("::Alpha"));
    }

    #[test]
    fn test_usable_as_map_key() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(EventType::of::<Alpha>(), 1);
        map.insert(EventType::of::<Beta>(), 2);
        assert_eq!(map.get(&EventType::of::<Alpha>()), Some(&1));
        assert_eq!(map.get(&EventType::of::<Beta>()), Some(&2));
    }
}
