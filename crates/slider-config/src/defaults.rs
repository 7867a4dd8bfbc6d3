//! Built-in defaults for slider options.

pub(crate) const FLOOR: f64 = 0.0;
pub(crate) const CEIL: f64 = 100.0;
pub(crate) const STEP: f64 = 1.0;

pub(crate) const VERTICAL: bool = false;
pub(crate) const DRAGGABLE_RANGE_ONLY: bool = false;
pub(crate) const DISABLED: bool = false;
pub(crate) const READ_ONLY: bool = false;
pub(crate) const KEYBOARD_SUPPORT: bool = true;
pub(crate) const SHOW_TICKS: bool = false;
pub(crate) const SHOW_SELECTION_BAR: bool = false;

/// Throttle window for coalesced redraws (milliseconds).
pub(crate) const INTERVAL_MS: u64 = 350;
