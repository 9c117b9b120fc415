//! # Basic Dispatch Example
//!
//! Registers a listener with handlers across several priority tiers and
//! dispatches a couple of events, including one handler that fails so the
//! built-in `LogSink` has something to report.
//!
//! ## Run
//! ```bash
//! cargo run --example basic --features logging
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use evbus::{
    BoxError, Dispatcher, Event, EventType, Handler, Listener, LogSink, Priority,
};

struct OrderPlaced {
    sku: String,
    quantity: u32,
}

impl Event for OrderPlaced {
    fn event_type(&self) -> EventType {
        EventType::of::<Self>()
    }
}

struct Warehouse {
    reserved: AtomicU64,
}

impl Warehouse {
    fn on_order(&self, ev: &mut OrderPlaced) -> Result<(), BoxError> {
        self.reserved
            .fetch_add(u64::from(ev.quantity), Ordering::Relaxed);
        println!("[warehouse] reserved {}x {}", ev.quantity, ev.sku);
        Ok(())
    }

    fn audit(&self, ev: &mut OrderPlaced) -> Result<(), BoxError> {
        println!("[audit] order observed: {}x {}", ev.quantity, ev.sku);
        Ok(())
    }
}

impl Listener for Warehouse {
    fn handlers(self: Arc<Self>) -> Vec<Handler> {
        vec![
            Handler::bind("warehouse_reserve", &self, Warehouse::on_order)
                .with_priority(Priority::High),
            Handler::bind("warehouse_audit", &self, Warehouse::audit)
                .with_priority(Priority::Monitor),
        ]
    }
}

struct FlakyNotifier;

impl Listener for FlakyNotifier {
    fn handlers(self: Arc<Self>) -> Vec<Handler> {
        vec![Handler::bind(
            "notify",
            &self,
            |_: &FlakyNotifier, ev: &mut OrderPlaced| {
                if ev.quantity > 10 {
                    return Err(format!("notification service rejected {}", ev.sku).into());
                }
                println!("[notify] order confirmed: {}", ev.sku);
                Ok(())
            },
        )]
    }
}

fn main() {
    tracing_subscriber::fmt().init();

    let bus = Dispatcher::builder().with_sink(Arc::new(LogSink)).build();

    let warehouse = Arc::new(Warehouse {
        reserved: AtomicU64::new(0),
    });
    let notifier = Arc::new(FlakyNotifier);
    bus.register(&warehouse);
    bus.register(&notifier);

    bus.dispatch(OrderPlaced {
        sku: "oak-plank".into(),
        quantity: 4,
    });

    // Large order: the notifier fails, LogSink reports it, the rest ran.
    bus.dispatch(OrderPlaced {
        sku: "iron-ingot".into(),
        quantity: 64,
    });

    println!(
        "total reserved: {}",
        warehouse.reserved.load(Ordering::Relaxed)
    );
}
