//! Render pipeline instrumentation.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Instrumentation hooks for the render pipeline (used by tests/tools).
///
/// Hooks run on the thread driving the control, with the control locked;
/// implementations must not call back into the slider.
pub trait RenderObserver: Send + Sync {
    /// The track was remeasured.
    fn calc_view_dimensions(&self, _track_length: f64) {}
    /// Label caches were dropped.
    fn reset_labels_value(&self) {}
    /// Static geometry (ticks, floor/ceil labels) was rebuilt.
    fn reset_slider(&self) {}
    /// The low (or single) handle was repositioned.
    fn on_low_handle_change(&self, _value: f64) {}
    /// The high handle was repositioned.
    fn on_high_handle_change(&self, _value: f64) {}
    /// Every listener was released during teardown.
    fn unbind_events(&self) {}
}

/// Observer that counts each hook invocation.
#[derive(Debug, Default)]
pub struct CountingObserver {
    /// `calc_view_dimensions` calls.
    pub calc_view_dimensions: AtomicUsize,
    /// `reset_labels_value` calls.
    pub reset_labels_value: AtomicUsize,
    /// `reset_slider` calls.
    pub reset_slider: AtomicUsize,
    /// `on_low_handle_change` calls.
    pub low_handle_changes: AtomicUsize,
    /// `on_high_handle_change` calls.
    pub high_handle_changes: AtomicUsize,
    /// `unbind_events` calls.
    pub unbind_events: AtomicUsize,
}

impl CountingObserver {
    /// Fresh observer with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a counter.
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    /// Zero every counter.
    pub fn reset(&self) {
        for c in [
            &self.calc_view_dimensions,
            &self.reset_labels_value,
            &self.reset_slider,
            &self.low_handle_changes,
            &self.high_handle_changes,
            &self.unbind_events,
        ] {
            c.store(0, Ordering::SeqCst);
        }
    }
}

impl RenderObserver for CountingObserver {
    fn calc_view_dimensions(&self, _track_length: f64) {
        self.calc_view_dimensions.fetch_add(1, Ordering::SeqCst);
    }

    fn reset_labels_value(&self) {
        self.reset_labels_value.fetch_add(1, Ordering::SeqCst);
    }

    fn reset_slider(&self) {
        self.reset_slider.fetch_add(1, Ordering::SeqCst);
    }

    fn on_low_handle_change(&self, _value: f64) {
        self.low_handle_changes.fetch_add(1, Ordering::SeqCst);
    }

    fn on_high_handle_change(&self, _value: f64) {
        self.high_handle_changes.fetch_add(1, Ordering::SeqCst);
    }

    fn unbind_events(&self) {
        self.unbind_events.fetch_add(1, Ordering::SeqCst);
    }
}
