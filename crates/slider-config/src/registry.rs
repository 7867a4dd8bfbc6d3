//! Process-wide default options.
//!
//! The registry holds the middle configuration layer. Controls read it once, at
//! construction, so administrative changes only affect controls built afterwards.

use std::sync::OnceLock;

use parking_lot::Mutex;
use tracing::debug;

use crate::{RawOptions, Result, SliderOptions};

/// The global options layer shared by every control constructed from it.
static GLOBAL: OnceLock<OptionsRegistry> = OnceLock::new();

/// Two-layer options resolution: built-in defaults overlaid by registry-wide overrides.
#[derive(Debug, Default)]
pub struct OptionsRegistry {
    /// Overrides applied on top of the built-in defaults.
    layer: Mutex<RawOptions>,
}

impl OptionsRegistry {
    /// Create an empty registry (built-in defaults only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Access the process-wide registry.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    /// Merge `raw` into the registry layer; provided fields replace earlier ones.
    pub fn options(&self, raw: RawOptions) {
        let mut layer = self.layer.lock();
        let merged = layer.clone().overlay(raw);
        debug!(?merged, "global_options_updated");
        *layer = merged;
    }

    /// Drop every registry-wide override.
    pub fn reset(&self) {
        *self.layer.lock() = RawOptions::default();
    }

    /// Resolve options: defaults, then registry overrides, then `custom`.
    ///
    /// Resolution never fails; validate the result with [`SliderOptions::validate`]
    /// or use [`OptionsRegistry::resolve`].
    pub fn get_options(&self, custom: Option<&RawOptions>) -> SliderOptions {
        let base = self.layer.lock().clone().into_options();
        match custom {
            Some(raw) => raw.clone().apply_over(&base),
            None => base,
        }
    }

    /// Resolve and validate options for a new control.
    pub fn resolve(&self, custom: Option<&RawOptions>) -> Result<SliderOptions> {
        let opts = self.get_options(custom);
        opts.validate()?;
        Ok(opts)
    }
}
