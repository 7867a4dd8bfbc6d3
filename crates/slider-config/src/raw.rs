//! Partial options overlays and their RON form.

use ron::{Options, extensions::Extensions};
use serde::{Deserialize, Serialize};

use crate::{Result, SliderOptions};

/// Partial slider options, as supplied by a caller or the global registry.
///
/// Every field is optional; a provided field replaces the corresponding field of
/// whatever it is laid over. Camel-case aliases accept the option names used by
/// web-style configuration (`draggableRangeOnly`, `readOnly`, ...).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawOptions {
    /// Lowest selectable value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<f64>,
    /// Highest selectable value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceil: Option<f64>,
    /// Step between selectable values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Vertical track layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<bool>,
    /// Move both range handles together.
    #[serde(
        default,
        alias = "draggableRangeOnly",
        skip_serializing_if = "Option::is_none"
    )]
    pub draggable_range_only: Option<bool>,
    /// Reject user input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// Reject user input, keep normal styling.
    #[serde(default, alias = "readOnly", skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    /// Accept keyboard navigation.
    #[serde(
        default,
        alias = "keyboardSupport",
        skip_serializing_if = "Option::is_none"
    )]
    pub keyboard_support: Option<bool>,
    /// Emit one tick per step (none above 10 000 steps).
    #[serde(default, alias = "showTicks", skip_serializing_if = "Option::is_none")]
    pub show_ticks: Option<bool>,
    /// Report a selection bar in single mode.
    #[serde(
        default,
        alias = "showSelectionBar",
        skip_serializing_if = "Option::is_none"
    )]
    pub show_selection_bar: Option<bool>,
    /// Redraw throttle window in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
    /// Identifier echoed in interaction events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl RawOptions {
    /// Parse options from RON text. Bare values are accepted for optional fields.
    pub fn from_ron(text: &str) -> Result<Self> {
        let opts = Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(opts.from_str(text)?)
    }

    /// True when no field is provided.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Lay `over` on top of `self`; fields provided by `over` win.
    pub fn overlay(self, over: Self) -> Self {
        macro_rules! pick {
            ($field:ident) => {
                over.$field.or(self.$field)
            };
        }
        Self {
            floor: pick!(floor),
            ceil: pick!(ceil),
            step: pick!(step),
            vertical: pick!(vertical),
            draggable_range_only: pick!(draggable_range_only),
            disabled: pick!(disabled),
            read_only: pick!(read_only),
            keyboard_support: pick!(keyboard_support),
            show_ticks: pick!(show_ticks),
            show_selection_bar: pick!(show_selection_bar),
            interval: pick!(interval),
            id: pick!(id),
        }
    }

    /// Apply these overrides over a resolved base.
    pub fn apply_over(self, base: &SliderOptions) -> SliderOptions {
        let defaults = base.clone();
        macro_rules! or_field {
            ($field:ident) => {
                self.$field.unwrap_or(defaults.$field)
            };
        }
        SliderOptions {
            floor: or_field!(floor),
            ceil: or_field!(ceil),
            step: or_field!(step),
            vertical: or_field!(vertical),
            draggable_range_only: or_field!(draggable_range_only),
            disabled: or_field!(disabled),
            read_only: or_field!(read_only),
            keyboard_support: or_field!(keyboard_support),
            show_ticks: or_field!(show_ticks),
            show_selection_bar: or_field!(show_selection_bar),
            interval: or_field!(interval),
            id: self.id.or(defaults.id),
        }
    }

    /// Apply these overrides over the built-in defaults.
    pub fn into_options(self) -> SliderOptions {
        self.apply_over(&SliderOptions::default())
    }
}
