//! Ordering rules for two-handle sliders.

use tracing::debug;

use crate::Scale;

/// Outcome of a range proposal. `low <= high` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeUpdate {
    /// Committed low bound.
    pub low: f64,
    /// Committed high bound.
    pub high: f64,
    /// The moving handle crossed its sibling and now plays the other role.
    pub swapped: bool,
}

/// Validates proposed low/high values against a scale.
#[derive(Debug, Clone, Copy)]
pub struct RangeCoordinator<'a> {
    /// Scale proposals are quantized against.
    scale: &'a Scale,
}

impl<'a> RangeCoordinator<'a> {
    /// Coordinator for `scale`.
    pub fn new(scale: &'a Scale) -> Self {
        Self { scale }
    }

    /// Move the low bound to `v`.
    ///
    /// Crossing the high bound swaps roles: the old high becomes the new low and
    /// the proposed value becomes the new high.
    pub fn propose_low(&self, low: f64, high: f64, v: f64) -> RangeUpdate {
        let q = self.scale.quantize(v);
        if q > high {
            debug!(from = low, to = q, high, "low_handle_crossed");
            return RangeUpdate {
                low: high,
                high: q,
                swapped: true,
            };
        }
        RangeUpdate {
            low: q,
            high,
            swapped: false,
        }
    }

    /// Move the high bound to `v`, swapping roles when it crosses the low bound.
    pub fn propose_high(&self, low: f64, high: f64, v: f64) -> RangeUpdate {
        let q = self.scale.quantize(v);
        if q < low {
            debug!(from = high, to = q, low, "high_handle_crossed");
            return RangeUpdate {
                low: q,
                high: low,
                swapped: true,
            };
        }
        RangeUpdate {
            low,
            high: q,
            swapped: false,
        }
    }

    /// Translate both bounds by `delta` without changing the width.
    ///
    /// The delta is clamped so both bounds stay in `[floor, ceil]`. When the clamped
    /// delta would land a bound off the step grid it is shortened to whole steps; if
    /// no shorter move lands on the grid the range stays put.
    pub fn propose_coupled(&self, low: f64, high: f64, delta: f64) -> RangeUpdate {
        let s = self.scale;
        let d = delta.max(s.floor() - low).min(s.ceil() - high);
        let whole = (d / s.step()).trunc() * s.step();
        for candidate in [d, whole] {
            let (l, h) = (
                s.round_precision(low + candidate),
                s.round_precision(high + candidate),
            );
            if s.is_quantized(l) && s.is_quantized(h) && l >= s.floor() && h <= s.ceil() {
                return RangeUpdate {
                    low: l,
                    high: h,
                    swapped: false,
                };
            }
        }
        RangeUpdate {
            low,
            high,
            swapped: false,
        }
    }
}
