use opentelemetry::baggage::BaggageExt;
use opentelemetry::trace::{SpanId, TraceContextExt, TraceFlags, TraceId};
use opentelemetry::Context;

/// Context-data key under which [`ContextFanout`](crate::ContextFanout)
/// publishes the current trace id (32 lowercase hex characters).
pub const TRACE_ID_KEY: &str = "trace_id";
/// Context-data key for the current span id (16 lowercase hex characters).
pub const SPAN_ID_KEY: &str = "span_id";
/// Context-data key for the current trace flags (2 lowercase hex characters).
pub const TRACE_FLAGS_KEY: &str = "trace_flags";
/// Prefix for baggage entries published to context data, one
/// `baggage.<key>` entry per baggage key.
pub const BAGGAGE_KEY_PREFIX: &str = "baggage.";
/// Reserved context-data key holding the intended event name of a record.
pub const EVENT_NAME_KEY: &str = "event.name";

/// Read-only snapshot of the caller's ambient tracing context.
///
/// Taken once per call into the pipeline; never mutated by this crate,
/// only copied outward into the record and the host's context-data store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmbientContext {
    /// Trace id of the active span, if any.
    pub trace_id: Option<TraceId>,
    /// Span id of the active span, if any.
    pub span_id: Option<SpanId>,
    /// Trace flags of the active span.
    pub trace_flags: TraceFlags,
    /// Baggage entries, sorted by key. The underlying store iterates in
    /// hash order, so the snapshot sorts to stay deterministic.
    pub baggage: Vec<(String, String)>,
}

impl AmbientContext {
    /// Snapshots the calling thread's current context.
    pub fn current() -> Self {
        Self::from_context(&Context::current())
    }

    /// Snapshots an explicit context. Used directly by tests; production
    /// callers go through [`AmbientContext::current`].
    pub fn from_context(cx: &Context) -> Self {
        let mut ambient = AmbientContext::default();
        if cx.has_active_span() {
            let span = cx.span();
            let span_context = span.span_context();
            if span_context.is_valid() {
                ambient.trace_id = Some(span_context.trace_id());
                ambient.span_id = Some(span_context.span_id());
                ambient.trace_flags = span_context.trace_flags();
            }
        }
        let mut baggage: Vec<(String, String)> = cx
            .baggage()
            .into_iter()
            .map(|(key, (value, _metadata))| (key.to_string(), value.to_string()))
            .collect();
        baggage.sort_by(|a, b| a.0.cmp(&b.0));
        ambient.baggage = baggage;
        ambient
    }

    /// Whether the snapshot carries span correlation data.
    pub fn has_span(&self) -> bool {
        self.trace_id.is_some() && self.span_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{SpanContext, TraceState};
    use opentelemetry::KeyValue;

    fn sample_span_context() -> SpanContext {
        SpanContext::new(
            TraceId::from(0x0af7_6519_16cd_43dd_8448_eb21_1c80_319c_u128),
            SpanId::from(0x00f0_67aa_0ba9_02b7_u64),
            TraceFlags::SAMPLED,
            false,
            TraceState::default(),
        )
    }

    #[test]
    fn empty_context_has_no_span_and_no_baggage() {
        let ambient = AmbientContext::from_context(&Context::new());
        assert!(!ambient.has_span());
        assert!(ambient.baggage.is_empty());
        assert_eq!(ambient.trace_flags, TraceFlags::default());
    }

    #[test]
    fn snapshot_reads_active_span() {
        let cx = Context::new().with_remote_span_context(sample_span_context());
        let ambient = AmbientContext::from_context(&cx);
        assert!(ambient.has_span());
        assert_eq!(
            format!("{:032x}", ambient.trace_id.unwrap()),
            "0af7651916cd43dd8448eb211c80319c"
        );
        assert_eq!(
            format!("{:016x}", ambient.span_id.unwrap()),
            "00f067aa0ba902b7"
        );
        assert!(ambient.trace_flags.is_sampled());
    }

    #[test]
    fn baggage_snapshot_is_key_sorted() {
        let cx = Context::new().with_baggage(vec![
            KeyValue::new("zebra", "z"),
            KeyValue::new("alpha", "a"),
            KeyValue::new("mid", "m"),
        ]);
        let ambient = AmbientContext::from_context(&cx);
        let keys: Vec<&str> = ambient.baggage.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zebra"]);
    }

    #[test]
    fn current_reflects_attached_context() {
        let cx = Context::new().with_remote_span_context(sample_span_context());
        let _guard = cx.attach();
        let ambient = AmbientContext::current();
        assert!(ambient.has_span());
    }
}
