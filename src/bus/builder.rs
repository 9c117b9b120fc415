//! Builder for constructing a [`Dispatcher`] with failure sinks.

use std::sync::Arc;

use crate::bus::Dispatcher;
use crate::sinks::{FailureSink, SinkSet};

/// Builder for a [`Dispatcher`].
///
/// The failure sinks are the only knob: the dispatch core owns no other
/// resource. A bus built with no sinks still isolates handler failures;
/// they are simply not reported anywhere.
#[derive(Default)]
pub struct DispatcherBuilder {
    sinks: Vec<Arc<dyn FailureSink>>,
}

impl DispatcherBuilder {
    /// Creates a builder with no sinks installed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one failure sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn FailureSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Replaces the installed sinks wholesale.
    #[must_use]
    pub fn with_sinks(mut self, sinks: Vec<Arc<dyn FailureSink>>) -> Self {
        self.sinks = sinks;
        self
    }

    /// Builds the dispatcher.
    #[must_use]
    pub fn build(self) -> Dispatcher {
        Dispatcher::from_parts(SinkSet::new(self.sinks))
    }
}
