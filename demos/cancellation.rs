//! # Cancellation and Fan-out Example
//!
//! A `BlockBreak` event extends `BlockChange`. A protection plugin cancels
//! breaks inside a protected region; a Monitor-tier observer sees every
//! break before anyone else but cannot cancel; the world listener is
//! registered for the base type, so it runs for the child event too —
//! unless the cancellation gate skips it.
//!
//! ## Run
//! ```bash
//! cargo run --example cancellation --features logging
//! ```

use std::sync::Arc;

use evbus::{
    BoxError, Cancellable, Dispatcher, Event, EventType, Handler, Listener, LogSink, Priority,
};

struct BlockChange {
    x: i32,
    cancelled: bool,
}

impl Event for BlockChange {
    fn event_type(&self) -> EventType {
        EventType::of::<Self>()
    }

    fn as_cancellable(&mut self) -> Option<&mut dyn Cancellable> {
        Some(self)
    }
}

impl Cancellable for BlockChange {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// Extends `BlockChange`; the cancellation flag lives in the base so every
/// level of delivery observes the same state.
struct BlockBreak {
    base: BlockChange,
}

impl Event for BlockBreak {
    fn event_type(&self) -> EventType {
        EventType::of::<Self>()
    }

    fn parent_mut(&mut self) -> Option<&mut dyn Event> {
        Some(&mut self.base)
    }

    fn as_cancellable(&mut self) -> Option<&mut dyn Cancellable> {
        Some(&mut self.base)
    }
}

struct Protection {
    protected_from: i32,
}

impl Protection {
    fn on_break(&self, ev: &mut BlockBreak) -> Result<(), BoxError> {
        if ev.base.x >= self.protected_from {
            println!("[protection] break at x={} denied", ev.base.x);
            ev.base.set_cancelled(true);
        }
        Ok(())
    }
}

impl Listener for Protection {
    fn handlers(self: Arc<Self>) -> Vec<Handler> {
        vec![Handler::bind("protection", &self, Protection::on_break)
            .with_priority(Priority::Highest)]
    }
}

struct BreakObserver;

impl BreakObserver {
    fn observe(&self, ev: &mut BlockBreak) -> Result<(), BoxError> {
        println!("[observer] break attempted at x={}", ev.base.x);
        Ok(())
    }
}

impl Listener for BreakObserver {
    fn handlers(self: Arc<Self>) -> Vec<Handler> {
        // Runs before every other tier, sees everything, cannot cancel.
        vec![Handler::bind("observe", &self, BreakObserver::observe)
            .with_priority(Priority::Monitor)
            .with_ignore_cancelled(true)]
    }
}

struct World;

impl World {
    fn apply_change(&self, ev: &mut BlockChange) -> Result<(), BoxError> {
        println!("[world] change applied at x={}", ev.x);
        Ok(())
    }
}

impl Listener for World {
    fn handlers(self: Arc<Self>) -> Vec<Handler> {
        // Registered for the base type: runs for plain changes and for
        // breaks alike, unless an earlier handler cancelled.
        vec![Handler::bind("world_apply", &self, World::apply_change)]
    }
}

fn main() {
    tracing_subscriber::fmt().init();

    let bus = Dispatcher::builder().with_sink(Arc::new(LogSink)).build();

    let protection = Arc::new(Protection {
        protected_from: 100,
    });
    let observer = Arc::new(BreakObserver);
    let world = Arc::new(World);
    bus.register(&protection);
    bus.register(&observer);
    bus.register(&world);

    // Unprotected: observer, then protection passes, then the base-level
    // world handler applies the change.
    let ev = bus.dispatch(BlockBreak {
        base: BlockChange {
            x: 7,
            cancelled: false,
        },
    });
    println!("x=7 cancelled: {}\n", ev.base.cancelled);

    // Protected: cancelled at the child level, base-level apply skipped.
    let ev = bus.dispatch(BlockBreak {
        base: BlockChange {
            x: 120,
            cancelled: false,
        },
    });
    println!("x=120 cancelled: {}", ev.base.cancelled);
}
