//! Startup-buffering gate between appenders and the emitter.
//!
//! Appenders are constructed by the host framework well before the
//! telemetry export pipeline is ready. Until a bootstrap collaborator
//! calls [`EmissionGate::initialize`], every submitted record is queued;
//! the first `initialize` call drains the queue in FIFO order and flips a
//! one-way latch, after which records pass straight through. One gate
//! instance is shared by reference across all appenders of a process.

use crate::record::{Emitter, LogRecord};
use opentelemetry::otel_debug;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError, RwLock};

/// Thread-safe pre-initialization buffer in front of an [`Emitter`].
///
/// `submit` takes the shared side of a read-write lock and is called on
/// every log event; `initialize` takes the exclusive side exactly once in
/// the process lifetime. The pending queue is unbounded: if telemetry is
/// never initialized, queued records accumulate without limit. Operators
/// can watch [`pending_count`](EmissionGate::pending_count).
#[derive(Debug)]
pub struct EmissionGate<E: Emitter> {
    emitter: E,
    initialized: RwLock<bool>,
    pending: Mutex<VecDeque<LogRecord>>,
}

impl<E: Emitter> EmissionGate<E> {
    /// Creates an uninitialized gate in front of `emitter`.
    pub fn new(emitter: E) -> Self {
        EmissionGate {
            emitter,
            initialized: RwLock::new(false),
            pending: Mutex::new(VecDeque::new()),
        }
    }

    /// Submits one record.
    ///
    /// Forwards immediately when the gate is initialized, otherwise
    /// appends to the pending queue. The emitter is never invoked while a
    /// lock is held, so `submit` blocks its caller only for the queue
    /// append itself. Enqueueing happens under the read guard: a
    /// concurrent `initialize` either sees the record in its drain or the
    /// record is forwarded directly after the latch flips, never both.
    pub fn submit(&self, record: LogRecord) {
        {
            let initialized = self
                .initialized
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if !*initialized {
                self.pending
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push_back(record);
                return;
            }
        }
        self.emitter.emit(record);
    }

    /// Drains the pending queue to the emitter in arrival order, then
    /// latches the gate open. Idempotent; concurrent and repeated calls
    /// are safe and drained records are never forwarded twice.
    ///
    /// Records are popped one at a time, so a panicking emitter leaves
    /// the latch down and the undrained suffix queued; a later call picks
    /// up where the drain stopped.
    pub fn initialize(&self) {
        let mut initialized = self
            .initialized
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if *initialized {
            return;
        }
        let mut drained: usize = 0;
        loop {
            // pop under the lock, emit outside it, so a panicking emitter
            // cannot poison the queue or re-emit a drained record
            let next = self
                .pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front();
            let Some(record) = next else { break };
            self.emitter.emit(record);
            drained += 1;
        }
        *initialized = true;
        otel_debug!(name: "EmissionGate.Initialized", drained = drained);
    }

    /// Whether the gate has been initialized.
    pub fn is_initialized(&self) -> bool {
        *self
            .initialized
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of records waiting for initialization.
    pub fn pending_count(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
