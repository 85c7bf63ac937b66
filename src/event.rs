use opentelemetry::logs::{AnyValue, Severity};
use std::time::SystemTime;

/// Source-code location where a log event was produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeLocation {
    /// Path of the source file.
    pub file: Option<String>,
    /// Line number within the file.
    pub line: Option<u32>,
    /// Function or method name.
    pub function: Option<String>,
    /// Enclosing namespace, module or class.
    pub namespace: Option<String>,
}

/// A single log event handed over by a host logging framework.
///
/// The host glue constructs one of these per framework event; this crate
/// only reads it through the typed accessors. Every field is optional —
/// an absent field is simply omitted from the mapped record, it is never
/// an error. The event is immutable once built and lives for a single
/// call into the pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogEvent {
    pub(crate) timestamp: Option<SystemTime>,
    pub(crate) severity: Option<Severity>,
    pub(crate) severity_text: Option<String>,
    pub(crate) logger_name: Option<String>,
    pub(crate) message: Option<String>,
    pub(crate) arguments: Vec<AnyValue>,
    pub(crate) thread_name: Option<String>,
    pub(crate) thread_id: Option<i64>,
    pub(crate) code_location: Option<CodeLocation>,
    pub(crate) marker: Option<String>,
    pub(crate) key_values: Vec<(String, AnyValue)>,
    pub(crate) payload: Option<Vec<(String, AnyValue)>>,
    pub(crate) logger_context: Vec<(String, String)>,
    pub(crate) context_data: Vec<(String, String)>,
}

impl LogEvent {
    /// Starts building a new event.
    pub fn builder() -> LogEventBuilder {
        LogEventBuilder {
            event: LogEvent::default(),
        }
    }

    /// Timestamp assigned by the host framework.
    pub fn timestamp(&self) -> Option<SystemTime> {
        self.timestamp
    }

    /// Normalized severity of the event.
    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    /// The host framework's original severity/level string.
    pub fn severity_text(&self) -> Option<&str> {
        self.severity_text.as_deref()
    }

    /// Name of the logger that produced the event.
    pub fn logger_name(&self) -> Option<&str> {
        self.logger_name.as_deref()
    }

    /// Fully rendered message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Positional format arguments, in template order.
    pub fn arguments(&self) -> &[AnyValue] {
        &self.arguments
    }

    /// Name of the producing thread.
    pub fn thread_name(&self) -> Option<&str> {
        self.thread_name.as_deref()
    }

    /// Id of the producing thread.
    pub fn thread_id(&self) -> Option<i64> {
        self.thread_id
    }

    /// Where in the source the event was produced.
    pub fn code_location(&self) -> Option<&CodeLocation> {
        self.code_location.as_ref()
    }

    /// Marker or category attached to the event.
    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    /// Structured key-value pairs attached to this event.
    pub fn key_values(&self) -> &[(String, AnyValue)] {
        &self.key_values
    }

    /// Map-shaped message payload, if the event carries one instead of a
    /// plain template.
    pub fn payload(&self) -> Option<&[(String, AnyValue)]> {
        self.payload.as_deref()
    }

    /// Properties from the logger's shared context.
    pub fn logger_context(&self) -> &[(String, String)] {
        &self.logger_context
    }

    /// Snapshot of the host's diagnostic context data (MDC) taken when the
    /// event was produced.
    pub fn context_data(&self) -> &[(String, String)] {
        &self.context_data
    }

    /// Looks up a single context-data entry by key.
    pub fn context_data_value(&self, key: &str) -> Option<&str> {
        self.context_data
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Builder for [`LogEvent`], used by host-framework glue.
#[derive(Debug, Default)]
pub struct LogEventBuilder {
    event: LogEvent,
}

impl LogEventBuilder {
    /// Sets the event timestamp.
    pub fn with_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.event.timestamp = Some(timestamp);
        self
    }

    /// Sets the normalized severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.event.severity = Some(severity);
        self
    }

    /// Sets the original severity string.
    pub fn with_severity_text(mut self, text: impl Into<String>) -> Self {
        self.event.severity_text = Some(text.into());
        self
    }

    /// Sets the logger name.
    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.event.logger_name = Some(name.into());
        self
    }

    /// Sets the rendered message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.event.message = Some(message.into());
        self
    }

    /// Appends a positional format argument.
    pub fn with_argument(mut self, value: impl Into<AnyValue>) -> Self {
        self.event.arguments.push(value.into());
        self
    }

    /// Sets the producing thread's name and id.
    pub fn with_thread(mut self, name: impl Into<String>, id: i64) -> Self {
        self.event.thread_name = Some(name.into());
        self.event.thread_id = Some(id);
        self
    }

    /// Sets the source-code location.
    pub fn with_code_location(mut self, location: CodeLocation) -> Self {
        self.event.code_location = Some(location);
        self
    }

    /// Sets the marker/category name.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.event.marker = Some(marker.into());
        self
    }

    /// Appends a structured key-value pair.
    pub fn with_key_value(mut self, key: impl Into<String>, value: impl Into<AnyValue>) -> Self {
        self.event.key_values.push((key.into(), value.into()));
        self
    }

    /// Sets a map-shaped message payload.
    pub fn with_payload(mut self, entries: Vec<(String, AnyValue)>) -> Self {
        self.event.payload = Some(entries);
        self
    }

    /// Appends a logger-context property.
    pub fn with_logger_context_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.event.logger_context.push((key.into(), value.into()));
        self
    }

    /// Appends a context-data (MDC) entry.
    pub fn with_context_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.event.context_data.push((key.into(), value.into()));
        self
    }

    /// Finalizes the event.
    pub fn build(self) -> LogEvent {
        self.event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_stay_absent() {
        let event = LogEvent::builder().build();
        assert!(event.timestamp().is_none());
        assert!(event.severity().is_none());
        assert!(event.logger_name().is_none());
        assert!(event.message().is_none());
        assert!(event.arguments().is_empty());
        assert!(event.code_location().is_none());
        assert!(event.payload().is_none());
        assert!(event.context_data().is_empty());
    }

    #[test]
    fn context_data_lookup_finds_entry() {
        let event = LogEvent::builder()
            .with_context_data("user_id", "42")
            .with_context_data("tenant", "acme")
            .build();
        assert_eq!(event.context_data_value("tenant"), Some("acme"));
        assert_eq!(event.context_data_value("missing"), None);
    }
}
