//! MDC-style bridge: copies the ambient tracing context into the host
//! framework's shared context-data store, then forwards the event to the
//! attached downstream handlers so independently-configured log outputs
//! see the correlation data too.

use crate::context::{
    AmbientContext, BAGGAGE_KEY_PREFIX, SPAN_ID_KEY, TRACE_FLAGS_KEY, TRACE_ID_KEY,
};
use crate::event::LogEvent;
use std::sync::{Arc, Mutex, PoisonError};

/// The host framework's shared context-data (MDC) key-value store.
///
/// [`ContextFanout`] only adds or overwrites its fixed key set
/// ([`TRACE_ID_KEY`], [`SPAN_ID_KEY`], [`TRACE_FLAGS_KEY`] and
/// `baggage.<key>` entries); it never removes keys it does not own.
pub trait ContextDataStore: Send + Sync {
    /// Adds or overwrites one entry.
    fn put(&self, key: &str, value: &str);

    /// Reads one entry.
    fn get(&self, key: &str) -> Option<String>;
}

impl<S: ContextDataStore + ?Sized> ContextDataStore for Arc<S> {
    fn put(&self, key: &str, value: &str) {
        (**self).put(key, value)
    }

    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// A downstream log handler attached to a [`ContextFanout`].
///
/// Handler failures follow the handler's own contract; the fan-out
/// neither retries nor suppresses them and keeps invoking the remaining
/// handlers of the same pass.
pub trait LogHandler: Send + Sync {
    /// Name the handler can be detached by.
    fn name(&self) -> &str;

    /// Receives the original event, unchanged.
    fn handle(&self, event: &LogEvent);

    /// Called when the handler is detached via
    /// [`ContextFanout::detach_and_stop_all`].
    fn stop(&self) {}
}

/// Fans one event out to dynamically attached handlers, publishing the
/// current trace id, span id, trace flags and baggage to the host's
/// context-data store first.
///
/// Handler membership reflects the most recent mutation as seen by the
/// next [`on_event`](ContextFanout::on_event) call; a call already
/// iterating keeps its snapshot. This is best-effort ordering under
/// concurrent mutation, not a strict consistency guarantee.
pub struct ContextFanout<S: ContextDataStore> {
    store: S,
    handlers: Mutex<Vec<Arc<dyn LogHandler>>>,
}

impl<S: ContextDataStore> ContextFanout<S> {
    /// Creates a fan-out over the given context-data store with no
    /// attached handlers.
    pub fn new(store: S) -> Self {
        ContextFanout {
            store,
            handlers: Mutex::new(Vec::new()),
        }
    }

    /// Publishes the calling thread's ambient context to the store, then
    /// forwards `event` to every attached handler in attachment order.
    pub fn on_event(&self, event: &LogEvent) {
        self.on_event_in(event, &AmbientContext::current());
    }

    /// Same as [`on_event`](ContextFanout::on_event) for an explicit
    /// ambient snapshot.
    pub fn on_event_in(&self, event: &LogEvent, ambient: &AmbientContext) {
        self.publish_context(ambient);
        for handler in self.snapshot() {
            handler.handle(event);
        }
    }

    fn publish_context(&self, ambient: &AmbientContext) {
        if let (Some(trace_id), Some(span_id)) = (ambient.trace_id, ambient.span_id) {
            self.store.put(TRACE_ID_KEY, &format!("{trace_id:032x}"));
            self.store.put(SPAN_ID_KEY, &format!("{span_id:016x}"));
            self.store
                .put(TRACE_FLAGS_KEY, &format!("{:02x}", ambient.trace_flags));
        }
        for (key, value) in &ambient.baggage {
            self.store.put(&format!("{BAGGAGE_KEY_PREFIX}{key}"), value);
        }
    }

    /// Attaches a handler at the end of the invocation order.
    pub fn attach(&self, handler: Arc<dyn LogHandler>) {
        self.lock_handlers().push(handler);
    }

    /// Detaches a handler by reference. Returns whether it was attached.
    pub fn detach(&self, handler: &Arc<dyn LogHandler>) -> bool {
        let mut handlers = self.lock_handlers();
        let before = handlers.len();
        handlers.retain(|h| !Arc::ptr_eq(h, handler));
        handlers.len() != before
    }

    /// Detaches the first handler with the given name. Returns whether
    /// one was found.
    pub fn detach_by_name(&self, name: &str) -> bool {
        let mut handlers = self.lock_handlers();
        match handlers.iter().position(|h| h.name() == name) {
            Some(index) => {
                handlers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether the given handler is currently attached.
    pub fn is_attached(&self, handler: &Arc<dyn LogHandler>) -> bool {
        self.lock_handlers().iter().any(|h| Arc::ptr_eq(h, handler))
    }

    /// Snapshot of the attached handlers, in attachment order.
    pub fn handlers(&self) -> Vec<Arc<dyn LogHandler>> {
        self.snapshot()
    }

    /// Detaches every handler and calls its `stop`.
    pub fn detach_and_stop_all(&self) {
        let detached: Vec<Arc<dyn LogHandler>> = self.lock_handlers().drain(..).collect();
        for handler in detached {
            handler.stop();
        }
    }

    fn snapshot(&self) -> Vec<Arc<dyn LogHandler>> {
        self.lock_handlers().clone()
    }

    fn lock_handlers(&self) -> std::sync::MutexGuard<'_, Vec<Arc<dyn LogHandler>>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
