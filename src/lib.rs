//! # OpenTelemetry Log Appender Core
//!
//! Framework-agnostic building blocks for bridging a host logging
//! framework (logback/log4j-style) to the OpenTelemetry logs pipeline.
//! Host-specific glue — configuration parsing, plugin registration,
//! pipeline attachment — lives outside this crate and talks to it through
//! the typed surfaces defined here:
//!
//! * [`LogEvent`] — the host's log event, read only through typed
//!   accessors; absent fields are omitted, never errors.
//! * [`map_event`] — pure capture mapper turning an event plus a
//!   [`CapturePolicy`] and the ambient tracing context into a finalized
//!   [`LogRecord`].
//! * [`EmissionGate`] — startup buffer guaranteeing ordered, loss-free
//!   delivery for events logged before the telemetry pipeline is
//!   initialized.
//! * [`ContextFanout`] — copies trace correlation data into the host's
//!   shared context-data store before forwarding to attached downstream
//!   handlers.
//! * [`Emitter`] — the injected export pipeline this crate hands
//!   finalized records to, fire-and-forget.
//!
//! ```
//! use opentelemetry_appender_core::{
//!     CapturePolicy, EmissionGate, LogEvent, LogRecord, OpenTelemetryAppender,
//! };
//! use opentelemetry::logs::Severity;
//! use std::sync::Arc;
//!
//! // the emitter is whatever hands records to the export pipeline
//! let gate = Arc::new(EmissionGate::new(|record: LogRecord| {
//!     let _ = record;
//! }));
//! let appender = OpenTelemetryAppender::new(CapturePolicy::default(), Arc::clone(&gate));
//!
//! // events logged before the telemetry bootstrap are queued...
//! appender.append(
//!     &LogEvent::builder()
//!         .with_severity(Severity::Info)
//!         .with_message("starting up")
//!         .build(),
//! );
//! assert_eq!(gate.pending_count(), 1);
//!
//! // ...and released in order once the exporter is ready
//! gate.initialize();
//! assert_eq!(gate.pending_count(), 0);
//! ```

mod appender;
mod context;
mod event;
mod fanout;
mod gate;
mod mapper;
mod policy;
mod record;

pub use appender::OpenTelemetryAppender;
pub use context::{
    AmbientContext, BAGGAGE_KEY_PREFIX, EVENT_NAME_KEY, SPAN_ID_KEY, TRACE_FLAGS_KEY,
    TRACE_ID_KEY,
};
pub use event::{CodeLocation, LogEvent, LogEventBuilder};
pub use fanout::{ContextDataStore, ContextFanout, LogHandler};
pub use gate::EmissionGate;
pub use mapper::{
    map_event, ARGUMENT_PREFIX, CODE_FILEPATH, CODE_FUNCTION, CODE_LINENO, CODE_NAMESPACE,
    KEY_VALUE_PAIR_PREFIX, MARKER, THREAD_ID, THREAD_NAME,
};
pub use policy::{CapturePolicy, ContextDataSelection};
pub use record::{AttributeSet, Emitter, LogRecord, TraceContext};
