//! Two-way binding to a host-owned value.
//!
//! Host writes reach the control through change listeners; the control writes
//! back through [`ExternalBinding::commit`], which never notifies listeners, so
//! a write-back cannot trigger another recompute.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::Mutex;
use slider_core::ModelValue;
use tracing::trace;

/// Identifies a change listener registered on a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback run after the host changes the bound value.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// A host value store the slider reads from and commits to.
pub trait ExternalBinding: Send + Sync {
    /// Current host value.
    fn read(&self) -> ModelValue;

    /// Store a value produced by the control. Must not notify listeners.
    fn commit(&self, value: ModelValue);

    /// Register `listener` for host-side changes.
    fn subscribe(&self, listener: Listener) -> ListenerId;

    /// Remove a listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: ListenerId);
}

/// In-memory binding: a value cell with change listeners.
#[derive(Clone)]
pub struct SharedModel {
    /// Current value.
    value: Arc<Mutex<ModelValue>>,
    /// Registered listeners by id.
    listeners: Arc<Mutex<HashMap<ListenerId, Listener>>>,
    /// Next listener id.
    next_id: Arc<AtomicU64>,
}

impl SharedModel {
    /// Binding holding `initial`.
    pub fn new(initial: ModelValue) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial)),
            listeners: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Single-value binding.
    pub fn single(value: f64) -> Self {
        Self::new(ModelValue::Single(value))
    }

    /// Range binding.
    pub fn range(low: f64, high: f64) -> Self {
        Self::new(ModelValue::Range { low, high })
    }

    /// Host-side write: store `value` and notify every listener.
    pub fn set(&self, value: ModelValue) {
        *self.value.lock() = value;
        let listeners: Vec<Listener> = self.listeners.lock().values().cloned().collect();
        trace!(?value, listeners = listeners.len(), "binding_set");
        for l in listeners {
            l();
        }
    }

    /// Host-side write of a single value.
    pub fn set_single(&self, value: f64) {
        self.set(ModelValue::Single(value));
    }

    /// Host-side write of a range.
    pub fn set_range(&self, low: f64, high: f64) {
        self.set(ModelValue::Range { low, high });
    }

    /// Current value.
    pub fn get(&self) -> ModelValue {
        *self.value.lock()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl ExternalBinding for SharedModel {
    fn read(&self) -> ModelValue {
        self.get()
    }

    fn commit(&self, value: ModelValue) {
        *self.value.lock() = value;
    }

    fn subscribe(&self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().insert(id, listener);
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.lock().remove(&id);
    }
}
