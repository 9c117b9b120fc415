//! # SinkSet: fan-out over the installed failure sinks.
//!
//! [`SinkSet`] hands one captured failure to every installed
//! [`FailureSink`], in installation order, isolating each call: a sink that
//! panics is noted on stderr and the remaining sinks still run. Nothing a
//! sink does can reach back into the delivery loop.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::HandlerFault;
use crate::handlers::Handler;
use crate::sinks::FailureSink;

/// Composite failure sink with per-sink panic isolation.
pub struct SinkSet {
    sinks: Vec<Arc<dyn FailureSink>>,
}

impl SinkSet {
    /// Creates a set over the given sinks.
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn FailureSink>>) -> Self {
        Self { sinks }
    }

    /// Reports one failure to every sink.
    pub fn report(&self, handler: &Handler, fault: &HandlerFault) {
        for sink in &self.sinks {
            let call = panic::catch_unwind(AssertUnwindSafe(|| sink.report(handler, fault)));
            if call.is_err() {
                eprintln!(
                    "[evbus] failure sink '{}' panicked while reporting",
                    sink.name()
                );
            }
        }
    }

    /// True if no sinks are installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Number of installed sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::events::{Event, EventType};

    struct Sample;

    impl Event for Sample {
        fn event_type(&self) -> EventType {
            EventType::of::<Self>()
        }
    }

    struct Owner;

    fn sample_handler() -> Handler {
        let owner = Arc::new(Owner);
        Handler::bind("sample", &owner, |_: &Owner, _: &mut Sample| Ok(()))
    }

    #[derive(Default)]
    struct Counting {
        seen: AtomicU64,
    }

    impl FailureSink for Counting {
        fn report(&self, _handler: &Handler, _fault: &HandlerFault) {
            self.seen.fetch_add(1, Ordering::Relaxed);
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    struct Exploding;

    impl FailureSink for Exploding {
        fn report(&self, _handler: &Handler, _fault: &HandlerFault) {
            panic!("sink bug");
        }

        fn name(&self) -> &'static str {
            "exploding"
        }
    }

    struct RecordingLabels {
        labels: Mutex<Vec<&'static str>>,
    }

    impl FailureSink for RecordingLabels {
        fn report(&self, _handler: &Handler, fault: &HandlerFault) {
            self.labels.lock().unwrap().push(fault.as_label());
        }

        fn name(&self) -> &'static str {
            "labels"
        }
    }

    #[test]
    fn test_reports_reach_every_sink() {
        let first = Arc::new(Counting::default());
        let second = Arc::new(Counting::default());
        let set = SinkSet::new(vec![
            first.clone() as Arc<dyn FailureSink>,
            second.clone() as Arc<dyn FailureSink>,
        ]);

        set.report(&sample_handler(), &HandlerFault::Failed("x".into()));
        assert_eq!(first.seen.load(Ordering::Relaxed), 1);
        assert_eq!(second.seen.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_panicking_sink_does_not_block_the_rest() {
        let counting = Arc::new(Counting::default());
        let set = SinkSet::new(vec![
            Arc::new(Exploding) as Arc<dyn FailureSink>,
            counting.clone() as Arc<dyn FailureSink>,
        ]);

        set.report(&sample_handler(), &HandlerFault::Failed("x".into()));
        assert_eq!(counting.seen.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_fault_details_pass_through() {
        let labels = Arc::new(RecordingLabels {
            labels: Mutex::new(Vec::new()),
        });
        let set = SinkSet::new(vec![labels.clone() as Arc<dyn FailureSink>]);

        set.report(&sample_handler(), &HandlerFault::Failed("x".into()));
        set.report(
            &sample_handler(),
            &HandlerFault::Panicked {
                message: "boom".to_string(),
            },
        );
        assert_eq!(
            *labels.labels.lock().unwrap(),
            vec!["handler_error", "handler_panic"]
        );
    }

    #[test]
    fn test_len_and_is_empty() {
        let set = SinkSet::new(Vec::new());
        assert!(set.is_empty());

        let set = SinkSet::new(vec![Arc::new(Counting::default()) as Arc<dyn FailureSink>]);
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
    }
}
