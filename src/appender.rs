use crate::context::AmbientContext;
use crate::event::LogEvent;
use crate::gate::EmissionGate;
use crate::mapper::map_event;
use crate::policy::CapturePolicy;
use crate::record::Emitter;
use std::sync::Arc;
use std::time::SystemTime;

/// The per-event entry point host-framework glue calls for each log event.
///
/// Holds an immutable [`CapturePolicy`] and a shared [`EmissionGate`];
/// several appender instances, each with its own policy, share one gate so
/// a single telemetry bootstrap releases them all.
///
/// `append` never fails and never blocks on I/O: the event is mapped with
/// the ambient context captured at call time and handed to the gate, which
/// either queues it or forwards it to the emitter.
pub struct OpenTelemetryAppender<E: Emitter> {
    policy: CapturePolicy,
    gate: Arc<EmissionGate<E>>,
}

impl<E: Emitter> OpenTelemetryAppender<E> {
    /// Creates an appender with the given capture policy over a shared
    /// gate.
    pub fn new(policy: CapturePolicy, gate: Arc<EmissionGate<E>>) -> Self {
        OpenTelemetryAppender { policy, gate }
    }

    /// Maps and submits one host log event.
    pub fn append(&self, event: &LogEvent) {
        let ambient = AmbientContext::current();
        let mut record = map_event(event, &self.policy, &ambient);
        record.observed_timestamp = Some(SystemTime::now());
        self.gate.submit(record);
    }

    /// The capture policy this appender was built with.
    pub fn policy(&self) -> &CapturePolicy {
        &self.policy
    }

    /// The gate this appender submits through.
    pub fn gate(&self) -> &Arc<EmissionGate<E>> {
        &self.gate
    }
}
