//! Track length measurement.

use parking_lot::Mutex;

/// Measures the usable track length, in pixels, at layout time.
pub trait TrackMeasure: Send + Sync {
    /// Current track length.
    fn measure(&self) -> f64;
}

impl<F> TrackMeasure for F
where
    F: Fn() -> f64 + Send + Sync,
{
    fn measure(&self) -> f64 {
        self()
    }
}

/// A track whose length is set explicitly (tests, scripted sessions).
#[derive(Debug, Default)]
pub struct FixedTrack {
    /// Length reported by the next measurement.
    length: Mutex<f64>,
}

impl FixedTrack {
    /// Track of `length` pixels.
    pub fn new(length: f64) -> Self {
        Self {
            length: Mutex::new(length),
        }
    }

    /// Change the length reported by later measurements.
    pub fn set(&self, length: f64) {
        *self.length.lock() = length;
    }
}

impl TrackMeasure for FixedTrack {
    fn measure(&self) -> f64 {
        *self.length.lock()
    }
}
