//! Broadcast signals consumed by slider controls.
//!
//! Controls subscribe at construction and unsubscribe at teardown. Dispatch is
//! synchronous: every subscriber runs before [`SignalBus::broadcast`] returns.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A signal a control reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Remeasure the track (container resized by script).
    RecalcViewDimensions,
    /// Reset label caches and rerun the full render sequence.
    ForceRender,
    /// The window was resized.
    WindowResize,
    /// Tear the control down.
    Destroy,
}

/// Identifies a subscription on a [`SignalBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Signal handler.
pub type Handler = Arc<dyn Fn(Signal) + Send + Sync>;

/// Synchronous publish/subscribe channel for [`Signal`]s.
#[derive(Clone, Default)]
pub struct SignalBus {
    /// Handlers by subscription.
    handlers: Arc<Mutex<HashMap<SubscriptionId, Handler>>>,
    /// Next subscription id.
    next_id: Arc<AtomicU64>,
}

impl SignalBus {
    /// Empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every subsequent broadcast.
    pub fn subscribe(&self, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.lock().insert(id, handler);
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.handlers.lock().remove(&id).is_some()
    }

    /// Deliver `signal` to every subscriber.
    ///
    /// Handlers are snapshotted first, so a handler may unsubscribe itself.
    pub fn broadcast(&self, signal: Signal) {
        let handlers: Vec<Handler> = self.handlers.lock().values().cloned().collect();
        trace!(?signal, subscribers = handlers.len(), "signal_broadcast");
        for h in handlers {
            h(signal);
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.handlers.lock().len()
    }
}
