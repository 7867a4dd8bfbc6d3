//! Quantization and committed slider values.

use serde::{Deserialize, Serialize};
use slider_config::SliderOptions;
use tracing::warn;

use crate::{RangeCoordinator, RangeUpdate};

/// Upper bound on decimal places carried through quantization.
const MAX_PRECISION: i32 = 10;

/// Upper bound on enumerated steps (ticks).
const MAX_STEPS: usize = 10_000;

/// Number of decimal places in the shortest representation of `x`.
fn decimals(x: f64) -> i32 {
    let text = format!("{x}");
    text.split_once('.')
        .map_or(0, |(_, frac)| frac.len() as i32)
        .min(MAX_PRECISION)
}

/// Numeric domain of a slider: bounds, step, and the precision values are rounded to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    floor: f64,
    ceil: f64,
    step: f64,
    precision: i32,
}

impl Scale {
    /// Build a scale. Bounds and step are expected to be validated already.
    pub fn new(floor: f64, ceil: f64, step: f64) -> Self {
        let precision = decimals(floor).max(decimals(ceil)).max(decimals(step));
        Self {
            floor,
            ceil,
            step,
            precision,
        }
    }

    /// Scale described by resolved options.
    pub fn from_options(opts: &SliderOptions) -> Self {
        Self::new(opts.floor, opts.ceil, opts.step)
    }

    /// Lowest value.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Highest value.
    pub fn ceil(&self) -> f64 {
        self.ceil
    }

    /// Step size.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Distance from floor to ceil.
    pub fn span(&self) -> f64 {
        self.ceil - self.floor
    }

    /// Round away binary noise (e.g. `0.1 + 0.2`) at the scale's precision.
    pub fn round_precision(&self, v: f64) -> f64 {
        let p = 10f64.powi(self.precision);
        (v * p).round() / p
    }

    /// Clamp to `[floor, ceil]`. NaN collapses to floor.
    pub fn clamp(&self, v: f64) -> f64 {
        if v.is_nan() {
            return self.floor;
        }
        v.max(self.floor).min(self.ceil)
    }

    /// Snap `raw` to the step grid anchored at floor, then clamp to `[floor, ceil]`.
    ///
    /// Halves round away from zero. Input at or above ceil yields ceil, so an
    /// off-grid ceil stays a fixed point.
    pub fn quantize(&self, raw: f64) -> f64 {
        if raw.is_nan() {
            return self.floor;
        }
        if raw >= self.ceil {
            return self.ceil;
        }
        let steps = ((raw - self.floor) / self.step).round();
        self.clamp(self.round_precision(self.floor + steps * self.step))
    }

    /// True when `v` is already a reachable value.
    pub fn is_quantized(&self, v: f64) -> bool {
        self.quantize(v) == v
    }

    /// Keyboard page size: 10% of the span rounded to whole steps, at least one step.
    pub fn page(&self) -> f64 {
        let steps = (self.span() * 0.1 / self.step).round().max(1.0);
        self.round_precision(steps * self.step)
    }

    /// Every reachable value in ascending order, floor and ceil included.
    ///
    /// Returns an empty list when the scale has more than `MAX_STEPS` values.
    pub fn values(&self) -> Vec<f64> {
        let whole = (self.span() / self.step).floor();
        if whole + 1.0 > MAX_STEPS as f64 {
            warn!(
                floor = self.floor,
                ceil = self.ceil,
                step = self.step,
                "too_many_steps_for_ticks"
            );
            return Vec::new();
        }
        let mut out: Vec<f64> = (0..=whole as usize)
            .map(|k| self.round_precision(self.floor + k as f64 * self.step))
            .filter(|v| *v <= self.ceil)
            .collect();
        if out.last().is_none_or(|last| *last < self.ceil) {
            out.push(self.ceil);
        }
        out
    }
}

/// Whether a slider binds one value or a low/high pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One handle, one value.
    Single,
    /// Two handles bounding a range.
    Range,
}

/// A bound model value: a single number or an ordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelValue {
    /// Single-handle value.
    Single(f64),
    /// Range bounds.
    Range {
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },
}

impl ModelValue {
    /// Mode implied by the variant.
    pub fn mode(&self) -> Mode {
        match self {
            Self::Single(_) => Mode::Single,
            Self::Range { .. } => Mode::Range,
        }
    }

    /// Single value, or the low bound of a range.
    pub fn low(&self) -> f64 {
        match *self {
            Self::Single(v) => v,
            Self::Range { low, .. } => low,
        }
    }

    /// High bound of a range; `None` in single mode.
    pub fn high(&self) -> Option<f64> {
        match *self {
            Self::Single(_) => None,
            Self::Range { high, .. } => Some(high),
        }
    }
}

/// Result of writing to a [`ValueModel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Commit {
    /// Value held after the write.
    pub value: ModelValue,
    /// True when the held value differs from the value before the write.
    pub changed: bool,
    /// True when the write swapped the low/high roles of the handles.
    pub swapped: bool,
}

/// Owns the committed slider value and the scale it is quantized against.
///
/// Every stored value is quantized and within bounds; in range mode `low <= high`.
#[derive(Debug, Clone)]
pub struct ValueModel {
    scale: Scale,
    value: ModelValue,
}

impl ValueModel {
    /// Create a model, normalising `initial` against `scale`.
    pub fn new(scale: Scale, initial: ModelValue) -> Self {
        let value = Self::normalize(&scale, initial);
        Self { scale, value }
    }

    /// Quantize, clamp and order an arbitrary value.
    fn normalize(scale: &Scale, value: ModelValue) -> ModelValue {
        match value {
            ModelValue::Single(v) => ModelValue::Single(scale.quantize(v)),
            ModelValue::Range { low, high } => {
                let (a, b) = (scale.quantize(low), scale.quantize(high));
                ModelValue::Range {
                    low: a.min(b),
                    high: a.max(b),
                }
            }
        }
    }

    /// Current scale.
    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    /// Current committed value.
    pub fn value(&self) -> ModelValue {
        self.value
    }

    /// Binding mode, fixed at construction.
    pub fn mode(&self) -> Mode {
        self.value.mode()
    }

    /// Replace the scale and requantize the held value against it.
    pub fn set_scale(&mut self, scale: Scale) -> Commit {
        self.scale = scale;
        self.store(Self::normalize(&scale, self.value), false)
    }

    fn store(&mut self, next: ModelValue, swapped: bool) -> Commit {
        let changed = next != self.value;
        self.value = next;
        Commit {
            value: next,
            changed,
            swapped,
        }
    }

    fn store_range(&mut self, upd: RangeUpdate) -> Commit {
        self.store(
            ModelValue::Range {
                low: upd.low,
                high: upd.high,
            },
            upd.swapped,
        )
    }

    /// Apply a value written by the host.
    ///
    /// The write is requantized and ordered; a variant that does not match the
    /// binding mode is coerced (a single value sets `low`, a range sets a single
    /// slider to its `low`).
    pub fn sync(&mut self, external: ModelValue) -> Commit {
        let next = match (self.value, external) {
            (ModelValue::Single(_), ext) => ModelValue::Single(ext.low()),
            (ModelValue::Range { high, .. }, ModelValue::Single(low)) => {
                ModelValue::Range { low, high }
            }
            (ModelValue::Range { .. }, ext) => ext,
        };
        self.store(Self::normalize(&self.scale, next), false)
    }

    /// Set the single value (or the low bound in range mode).
    pub fn set_value(&mut self, v: f64) -> Commit {
        match self.value {
            ModelValue::Single(_) => {
                let q = self.scale.quantize(v);
                self.store(ModelValue::Single(q), false)
            }
            ModelValue::Range { .. } => self.set_low(v),
        }
    }

    /// Propose a new low bound; crossing the high bound swaps the handle roles.
    pub fn set_low(&mut self, v: f64) -> Commit {
        match self.value {
            ModelValue::Single(_) => self.set_value(v),
            ModelValue::Range { low, high } => {
                let upd = RangeCoordinator::new(&self.scale).propose_low(low, high, v);
                self.store_range(upd)
            }
        }
    }

    /// Propose a new high bound; crossing the low bound swaps the handle roles.
    pub fn set_high(&mut self, v: f64) -> Commit {
        match self.value {
            ModelValue::Single(_) => self.set_value(v),
            ModelValue::Range { low, high } => {
                let upd = RangeCoordinator::new(&self.scale).propose_high(low, high, v);
                self.store_range(upd)
            }
        }
    }

    /// Translate both bounds by `delta`, preserving the range width.
    ///
    /// In single mode this moves the value by `delta`.
    pub fn translate(&mut self, delta: f64) -> Commit {
        match self.value {
            ModelValue::Single(v) => self.set_value(v + delta),
            ModelValue::Range { low, high } => {
                let upd = RangeCoordinator::new(&self.scale).propose_coupled(low, high, delta);
                self.store_range(upd)
            }
        }
    }
}
