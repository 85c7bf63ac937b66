use opentelemetry::logs::{AnyValue, Severity};
use opentelemetry::trace::{SpanId, TraceFlags, TraceId};
use opentelemetry::Key;
use std::time::SystemTime;

/// Ordered set of record attributes.
///
/// Duplicate keys resolve last-write-wins: the value is replaced in place,
/// keeping the position of the first insert so iteration order stays
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet(Vec<(Key, AnyValue)>);

impl AttributeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        AttributeSet(Vec::new())
    }

    /// Inserts or replaces an attribute.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<AnyValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&AnyValue> {
        self.0
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    /// Iterates attributes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, (Key, AnyValue)> {
        self.0.iter()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for AttributeSet {
    type Item = (Key, AnyValue);
    type IntoIter = std::vec::IntoIter<(Key, AnyValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a (Key, AnyValue);
    type IntoIter = std::slice::Iter<'a, (Key, AnyValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Trace correlation data for records produced inside an active span.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceContext {
    /// Trace id.
    pub trace_id: TraceId,
    /// Span id.
    pub span_id: SpanId,
    /// Trace flags.
    pub trace_flags: Option<TraceFlags>,
}

/// The finalized, exportable representation of a single log event.
///
/// Produced by [`map_event`](crate::map_event) and handed once to the
/// [`Emitter`]; the pipeline keeps no reference to it afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogRecord {
    /// Timestamp carried by the source event.
    pub timestamp: Option<SystemTime>,
    /// When the record was observed by this pipeline.
    pub observed_timestamp: Option<SystemTime>,
    /// Normalized severity.
    pub severity_number: Option<Severity>,
    /// Original severity string from the source.
    pub severity_text: Option<String>,
    /// Name of the producing logger.
    pub logger_name: Option<String>,
    /// Record body.
    pub body: Option<AnyValue>,
    /// Event name, when the event carries one.
    pub event_name: Option<String>,
    /// Trace correlation data captured at call time.
    pub trace_context: Option<TraceContext>,
    /// Captured attributes.
    pub attributes: AttributeSet,
}

/// The external export pipeline this crate hands finalized records to.
///
/// Emission is fire-and-forget: `emit` has no return value and any export
/// failure is owned and handled by the emitter itself, never retried or
/// surfaced by this pipeline.
pub trait Emitter: Send + Sync {
    /// Hands one finalized record to the export pipeline.
    fn emit(&self, record: LogRecord);
}

impl<F> Emitter for F
where
    F: Fn(LogRecord) + Send + Sync,
{
    fn emit(&self, record: LogRecord) {
        self(record)
    }
}

impl<E: Emitter + ?Sized> Emitter for std::sync::Arc<E> {
    fn emit(&self, record: LogRecord) {
        (**self).emit(record)
    }
}
