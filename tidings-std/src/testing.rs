//! Testing utilities for Tidings.
//!
//! # Features
//!
//! - [`CallLog`]: A shared, ordered log of which subscribers ran
//! - [`CallRecorder`]: A receiver whose methods record each call into a [`CallLog`]

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

// ============================================================================
// Call Log
// ============================================================================

/// A shared, ordered log of subscriber ids.
///
/// Clones share the same log.
///
/// # Example
///
/// ```rust
/// use tidings_std::testing::CallLog;
///
/// let log = CallLog::new();
/// let writer = log.clone();
/// writer.record(3);
/// assert_eq!(log.entries(), vec![3]);
/// ```
#[derive(Clone, Default)]
pub struct CallLog {
    entries: Rc<RefCell<Vec<usize>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber id.
    pub fn record(&self, id: usize) {
        self.entries.borrow_mut().push(id);
    }

    /// Get a copy of the recorded ids, in call order.
    pub fn entries(&self) -> Vec<usize> {
        self.entries.borrow().clone()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Get the number of calls recorded for `id`.
    pub fn count_of(&self, id: usize) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|&&entry| entry == id)
            .count()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

// ============================================================================
// Call Recorder
// ============================================================================

/// A receiver that records every call made to it.
///
/// Its methods match common signatures so it can be attached to most test
/// events directly.
///
/// # Example
///
/// ```rust
/// use tidings_std::{Event, testing::{CallLog, CallRecorder}};
///
/// let log = CallLog::new();
/// let recorder = CallRecorder::new(1, &log);
///
/// let mut event = Event::<fn()>::new();
/// event.attach_method(&recorder, CallRecorder::record);
/// event.notify().unwrap();
///
/// assert_eq!(recorder.calls(), 1);
/// assert_eq!(log.entries(), vec![1]);
/// ```
pub struct CallRecorder {
    id: usize,
    log: CallLog,
    calls: Cell<usize>,
}

impl CallRecorder {
    /// Create a recorder that writes `id` into `log` on every call.
    pub fn new(id: usize, log: &CallLog) -> Rc<Self> {
        Rc::new(Self {
            id,
            log: log.clone(),
            calls: Cell::new(0),
        })
    }

    /// The recorder's id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Number of times this recorder was called.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Record a call. Matches `fn()` events.
    pub fn record(&self) {
        self.calls.set(self.calls.get() + 1);
        self.log.record(self.id);
    }

    /// Record a call and return the argument. Matches `fn(T) -> T` events.
    pub fn echo<T>(&self, value: T) -> T {
        self.record();
        value
    }

    /// Record a call and return the recorder's id. Matches `fn() -> usize` events.
    pub fn report(&self) -> usize {
        self.record();
        self.id
    }
}
