//! Fully resolved slider options.

use std::time::Duration;

use ron::ser::{PrettyConfig, to_string_pretty};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, defaults};

/// Track orientation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Values grow from left to right.
    #[default]
    Horizontal,
    /// Values grow from bottom to top.
    Vertical,
}

/// Options for a single slider instance, with every field resolved.
///
/// Instances are immutable once handed to a control; a new configuration replaces
/// the old one wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SliderOptions {
    /// Lowest selectable value.
    pub floor: f64,
    /// Highest selectable value.
    pub ceil: f64,
    /// Distance between selectable values, measured from `floor`.
    pub step: f64,
    /// Lay the track out vertically.
    pub vertical: bool,
    /// Range mode: handles move together, preserving the range width.
    pub draggable_range_only: bool,
    /// Reject all value changes from user input.
    pub disabled: bool,
    /// Reject all value changes from user input without the disabled styling.
    pub read_only: bool,
    /// Accept keyboard navigation on focused handles.
    pub keyboard_support: bool,
    /// Emit one tick per reachable step. Scales with more than 10 000 steps emit
    /// no ticks.
    pub show_ticks: bool,
    /// In single mode, report a selection bar from `floor` to the value.
    pub show_selection_bar: bool,
    /// Throttle window for redraws, in milliseconds.
    pub interval: u64,
    /// Opaque identifier echoed back in interaction events.
    pub id: Option<String>,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            floor: defaults::FLOOR,
            ceil: defaults::CEIL,
            step: defaults::STEP,
            vertical: defaults::VERTICAL,
            draggable_range_only: defaults::DRAGGABLE_RANGE_ONLY,
            disabled: defaults::DISABLED,
            read_only: defaults::READ_ONLY,
            keyboard_support: defaults::KEYBOARD_SUPPORT,
            show_ticks: defaults::SHOW_TICKS,
            show_selection_bar: defaults::SHOW_SELECTION_BAR,
            interval: defaults::INTERVAL_MS,
            id: None,
        }
    }
}

impl SliderOptions {
    /// Check the numeric invariants: finite bounds, `floor <= ceil`, and a positive step.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("floor", self.floor), ("ceil", self.ceil)] {
            if !value.is_finite() {
                return Err(Error::NonFinite { field, value });
            }
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(Error::InvalidStep { step: self.step });
        }
        if self.ceil < self.floor {
            return Err(Error::InvertedBounds {
                floor: self.floor,
                ceil: self.ceil,
            });
        }
        Ok(())
    }

    /// Track orientation derived from `vertical`.
    pub fn orientation(&self) -> Orientation {
        if self.vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    /// Throttle window as a duration.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval)
    }

    /// True when user input may change values.
    pub fn interactive(&self) -> bool {
        !self.disabled && !self.read_only
    }

    /// True when key presses on a focused handle may change values.
    pub fn keyboard_enabled(&self) -> bool {
        self.keyboard_support && self.interactive()
    }

    /// Render these options as pretty RON.
    pub fn to_ron(&self) -> String {
        to_string_pretty(self, PrettyConfig::default())
            .unwrap_or_else(|e| format!("/* unable to render options: {e} */"))
    }
}
