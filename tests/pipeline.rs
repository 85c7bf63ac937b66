//! End-to-end pipeline tests: host events flow through mapping, the
//! startup gate and the context fan-out the way a real appender wires
//! them together.

use opentelemetry::baggage::BaggageExt;
use opentelemetry::logs::Severity;
use opentelemetry::trace::{
    SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
};
use opentelemetry::{Context, KeyValue};
use opentelemetry_appender_core::{
    CapturePolicy, ContextDataSelection, ContextDataStore, ContextFanout, EmissionGate, LogEvent,
    LogHandler, LogRecord, OpenTelemetryAppender, SPAN_ID_KEY, TRACE_FLAGS_KEY, TRACE_ID_KEY,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct VecEmitter(Arc<Mutex<Vec<LogRecord>>>);

impl opentelemetry_appender_core::Emitter for VecEmitter {
    fn emit(&self, record: LogRecord) {
        self.0.lock().unwrap().push(record);
    }
}

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
fn pre_init_events_keep_their_call_time_trace_context() {
    let emitter = VecEmitter::default();
    let gate = Arc::new(EmissionGate::new(emitter.clone()));
    let appender = OpenTelemetryAppender::new(
        CapturePolicy {
            context_data: ContextDataSelection::parse(Some("user_id")),
            ..Default::default()
        },
        Arc::clone(&gate),
    );

    // logged inside a span, before the exporter exists
    {
        let cx = Context::new().with_remote_span_context(sample_span_context());
        let _guard = cx.attach();
        appender.append(
            &LogEvent::builder()
                .with_severity(Severity::Info)
                .with_logger_name("boot")
                .with_message("inside span")
                .with_context_data("user_id", "42")
                .with_context_data("ignored", "x")
                .build(),
        );
    }
    // logged outside any span
    appender.append(
        &LogEvent::builder()
            .with_severity(Severity::Warn)
            .with_message("outside span")
            .build(),
    );

    assert_eq!(gate.pending_count(), 2);
    gate.initialize();

    let records = emitter.0.lock().unwrap();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    let trace_context = first.trace_context.as_ref().expect("trace context");
    assert_eq!(
        format!("{:032x}", trace_context.trace_id),
        "0af7651916cd43dd8448eb211c80319c"
    );
    assert_eq!(
        first.attributes.get("user_id"),
        Some(&opentelemetry::logs::AnyValue::from("42".to_owned()))
    );
    assert!(first.attributes.get("ignored").is_none());

    let second = &records[1];
    assert!(second.trace_context.is_none());
    assert_eq!(second.severity_number, Some(Severity::Warn));
}

#[derive(Default)]
struct MapStore(Mutex<HashMap<String, String>>);

impl ContextDataStore for MapStore {
    fn put(&self, key: &str, value: &str) {
        self.0.lock().unwrap().insert(key.to_owned(), value.to_owned());
    }

    fn get(&self, key: &str) -> Option<String> {
        self.0.lock().unwrap().get(key).cloned()
    }
}

struct CountingHandler(Mutex<usize>);

impl LogHandler for CountingHandler {
    fn name(&self) -> &str {
        "counting"
    }

    fn handle(&self, _event: &LogEvent) {
        *self.0.lock().unwrap() += 1;
    }
}

#[test]
fn fanout_publishes_correlation_data_for_nested_handlers() {
    let store = Arc::new(MapStore::default());
    let fanout = ContextFanout::new(Arc::clone(&store) as Arc<dyn ContextDataStore>);
    let handler = Arc::new(CountingHandler(Mutex::new(0)));
    fanout.attach(handler.clone());

    let cx = Context::new()
        .with_remote_span_context(sample_span_context())
        .with_baggage(vec![KeyValue::new("tenant", "acme")]);
    let _guard = cx.attach();

    fanout.on_event(&LogEvent::builder().with_message("nested").build());

    assert_eq!(
        store.get(TRACE_ID_KEY).as_deref(),
        Some("0af7651916cd43dd8448eb211c80319c")
    );
    assert_eq!(store.get(SPAN_ID_KEY).as_deref(), Some("00f067aa0ba902b7"));
    assert_eq!(store.get(TRACE_FLAGS_KEY).as_deref(), Some("01"));
    assert_eq!(store.get("baggage.tenant").as_deref(), Some("acme"));
    assert_eq!(*handler.0.lock().unwrap(), 1);
}
