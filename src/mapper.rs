//! Turns a host log event into a finalized, exportable record under a
//! caller-selected capture policy.
//!
//! Mapping is pure and total: the same `(event, policy, ambient)` input
//! always yields the same record, absent event fields are omitted rather
//! than reported, and nothing in here can fail. Capture rules run in a
//! fixed order so that later rules win on key collisions.

use crate::context::{
    AmbientContext, EVENT_NAME_KEY, SPAN_ID_KEY, TRACE_FLAGS_KEY, TRACE_ID_KEY,
};
use crate::event::LogEvent;
use crate::policy::CapturePolicy;
use crate::record::{LogRecord, TraceContext};

/// Attribute key for the source file path.
pub const CODE_FILEPATH: &str = "code.filepath";
/// Attribute key for the source line number.
pub const CODE_LINENO: &str = "code.lineno";
/// Attribute key for the producing function.
pub const CODE_FUNCTION: &str = "code.function";
/// Attribute key for the enclosing namespace or class.
pub const CODE_NAMESPACE: &str = "code.namespace";
/// Attribute key for the producing thread's name.
pub const THREAD_NAME: &str = "thread.name";
/// Attribute key for the producing thread's id.
pub const THREAD_ID: &str = "thread.id";
/// Attribute key for the event's marker/category name.
pub const MARKER: &str = "log.marker";
/// Key prefix for structured key-value pairs, namespaced so event-supplied
/// keys cannot collide with the fixed attributes above.
pub const KEY_VALUE_PAIR_PREFIX: &str = "log.kvp.";
/// Key prefix for numbered positional arguments.
pub const ARGUMENT_PREFIX: &str = "log.argument.";

/// Payload entry that replaces the rendered template as the record body.
const PAYLOAD_MESSAGE_ENTRY: &str = "message";

/// Context-data keys owned by this crate, never captured as attributes.
const RESERVED_CONTEXT_KEYS: [&str; 4] =
    [TRACE_ID_KEY, SPAN_ID_KEY, TRACE_FLAGS_KEY, EVENT_NAME_KEY];

/// Maps one log event to a finalized record.
///
/// Rules run in order; each is gated by its [`CapturePolicy`] flag:
///
/// 1. always — severity, logger name, timestamp, rendered message as body
/// 2. `code_location` — `code.*` attributes
/// 3. `thread_attrs` — `thread.name`, `thread.id`
/// 4. `marker_attr` — `log.marker`
/// 5. `key_value_pair_attrs` — `log.kvp.<key>` per structured pair
/// 6. `structured_argument_attrs` — payload entries as attributes, the
///    `message` entry replacing the body from rule 1
/// 7. `logger_context_attrs` — logger shared-context properties
/// 8. `argument_attrs` — `log.argument.<n>` per positional argument
/// 9. context-data capture per the policy's selection, reserved keys
///    excluded
/// 10. `event_name` — the reserved `event.name` context-data entry becomes
///     the record's event name, never an attribute
///
/// The record's trace context is filled from the ambient snapshot.
pub fn map_event(event: &LogEvent, policy: &CapturePolicy, ambient: &AmbientContext) -> LogRecord {
    // rule 1
    let mut record = LogRecord {
        timestamp: event.timestamp(),
        severity_number: event.severity(),
        severity_text: event
            .severity_text()
            .map(str::to_owned)
            .or_else(|| event.severity().map(|s| s.name().to_owned())),
        logger_name: event.logger_name().map(str::to_owned),
        body: event.message().map(|m| m.to_owned().into()),
        ..LogRecord::default()
    };

    // rule 2
    if policy.code_location {
        if let Some(location) = event.code_location() {
            if let Some(file) = &location.file {
                record.attributes.insert(CODE_FILEPATH, file.clone());
            }
            if let Some(line) = location.line {
                record.attributes.insert(CODE_LINENO, i64::from(line));
            }
            if let Some(function) = &location.function {
                record.attributes.insert(CODE_FUNCTION, function.clone());
            }
            if let Some(namespace) = &location.namespace {
                record.attributes.insert(CODE_NAMESPACE, namespace.clone());
            }
        }
    }

    // rule 3
    if policy.thread_attrs {
        if let Some(name) = event.thread_name() {
            record.attributes.insert(THREAD_NAME, name.to_owned());
        }
        if let Some(id) = event.thread_id() {
            record.attributes.insert(THREAD_ID, id);
        }
    }

    // rule 4
    if policy.marker_attr {
        if let Some(marker) = event.marker() {
            record.attributes.insert(MARKER, marker.to_owned());
        }
    }

    // rule 5
    if policy.key_value_pair_attrs {
        for (key, value) in event.key_values() {
            record
                .attributes
                .insert(format!("{KEY_VALUE_PAIR_PREFIX}{key}"), value.clone());
        }
    }

    // rule 6
    if policy.structured_argument_attrs {
        if let Some(payload) = event.payload() {
            for (key, value) in payload {
                if key == PAYLOAD_MESSAGE_ENTRY {
                    record.body = Some(value.clone());
                } else {
                    record.attributes.insert(key.clone(), value.clone());
                }
            }
        }
    }

    // rule 7
    if policy.logger_context_attrs {
        for (key, value) in event.logger_context() {
            record.attributes.insert(key.clone(), value.clone());
        }
    }

    // rule 8
    if policy.argument_attrs {
        for (index, value) in event.arguments().iter().enumerate() {
            record
                .attributes
                .insert(format!("{ARGUMENT_PREFIX}{index}"), value.clone());
        }
    }

    // rule 9
    if !policy.context_data.is_empty() {
        for (key, value) in event.context_data() {
            if RESERVED_CONTEXT_KEYS.contains(&key.as_str()) {
                continue;
            }
            if policy.context_data.includes(key) {
                record.attributes.insert(key.clone(), value.clone());
            }
        }
    }

    // rule 10
    if policy.event_name {
        record.event_name = event.context_data_value(EVENT_NAME_KEY).map(str::to_owned);
    }

    if let (Some(trace_id), Some(span_id)) = (ambient.trace_id, ambient.span_id) {
        record.trace_context = Some(TraceContext {
            trace_id,
            span_id,
            trace_flags: Some(ambient.trace_flags),
        });
    }

    record
}
