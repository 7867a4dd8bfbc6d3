//! Slider configuration: resolved options, raw overlays, and the process-wide defaults registry.
//!
//! Options resolve in three layers, each overlaying the previous one field by field:
//! built-in defaults, the [`OptionsRegistry`] global layer, and per-instance overrides.

mod defaults;
mod error;
mod options;
mod raw;
mod registry;

#[cfg(test)]
mod test_merge;

pub use error::{Error, Result};
pub use options::{Orientation, SliderOptions};
pub use raw::RawOptions;
pub use registry::OptionsRegistry;
