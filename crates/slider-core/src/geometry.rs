//! Mapping between values, track fractions and pixel offsets.

use slider_config::Orientation;

use crate::Scale;

/// A measured track. Rebuilt on every layout pass; never cached across a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Usable track length in pixels.
    track_length: f64,
    /// Track axis.
    orientation: Orientation,
}

impl Geometry {
    /// Geometry for a track of `track_length` pixels. Negative or NaN lengths collapse to 0.
    pub fn new(track_length: f64, orientation: Orientation) -> Self {
        let track_length = if track_length.is_finite() && track_length > 0.0 {
            track_length
        } else {
            0.0
        };
        Self {
            track_length,
            orientation,
        }
    }

    /// Track length in pixels.
    pub fn track_length(&self) -> f64 {
        self.track_length
    }

    /// Track axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Fraction of the track covered by `value`, in `[0, 1]`. Zero when the span is empty.
    pub fn fraction_of(scale: &Scale, value: f64) -> f64 {
        let span = scale.span();
        if span <= 0.0 {
            return 0.0;
        }
        ((value - scale.floor()) / span).clamp(0.0, 1.0)
    }

    /// Unquantized value at `fraction`.
    pub fn raw_value_at_fraction(scale: &Scale, fraction: f64) -> f64 {
        scale.floor() + fraction.clamp(0.0, 1.0) * scale.span()
    }

    /// Quantized value at `fraction`.
    pub fn value_at_fraction(scale: &Scale, fraction: f64) -> f64 {
        scale.quantize(Self::raw_value_at_fraction(scale, fraction))
    }

    /// Pixel offset of `fraction` from the track origin.
    ///
    /// Vertical tracks grow upward, so fraction 1 sits at pixel 0.
    pub fn fraction_to_pixel(&self, fraction: f64) -> f64 {
        let f = fraction.clamp(0.0, 1.0);
        match self.orientation {
            Orientation::Horizontal => f * self.track_length,
            Orientation::Vertical => (1.0 - f) * self.track_length,
        }
    }

    /// Fraction at pixel offset `px`. Zero on an unmeasured track.
    pub fn pixel_to_fraction(&self, px: f64) -> f64 {
        if self.track_length <= 0.0 || px.is_nan() {
            return 0.0;
        }
        let f = (px / self.track_length).clamp(0.0, 1.0);
        match self.orientation {
            Orientation::Horizontal => f,
            Orientation::Vertical => 1.0 - f,
        }
    }

    /// Pixel offset of `value`.
    pub fn value_to_pixel(&self, scale: &Scale, value: f64) -> f64 {
        self.fraction_to_pixel(Self::fraction_of(scale, value))
    }

    /// Quantized value under pixel offset `px`.
    pub fn pixel_to_value(&self, scale: &Scale, px: f64) -> f64 {
        Self::value_at_fraction(scale, self.pixel_to_fraction(px))
    }

    /// Signed value distance covered by a pointer move of `dpx` pixels.
    pub fn pixel_delta_to_value(&self, scale: &Scale, dpx: f64) -> f64 {
        if self.track_length <= 0.0 {
            return 0.0;
        }
        let d = dpx / self.track_length * scale.span();
        match self.orientation {
            Orientation::Horizontal => d,
            Orientation::Vertical => -d,
        }
    }
}
