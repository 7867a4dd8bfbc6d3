//! Slider value engine.
//!
//! - [`Scale`] and [`ValueModel`]: quantization, clamping and committed values.
//! - [`Geometry`]: value ↔ fraction ↔ pixel conversion for a measured track.
//! - [`RangeCoordinator`]: low/high ordering, crossing swaps and coupled movement.
//! - [`HandleController`]: per-handle focus/drag state and keyboard/pointer translation.
//!
//! Nothing here knows about timers or channels; the engine crate drives these types.

mod geometry;
mod handle;
mod keys;
mod range;
mod value;

#[cfg(test)]
mod property_tests;

pub use geometry::Geometry;
pub use handle::{
    DRAG_THRESHOLD_PX, GrabTarget, HandleController, HandleId, HandleState, InputResponse, Phase,
};
pub use keys::Key;
pub use range::{RangeCoordinator, RangeUpdate};
pub use slider_config::Orientation;
pub use value::{Commit, Mode, ModelValue, Scale, ValueModel};
