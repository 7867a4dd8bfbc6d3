//! Render output handed to the presentation layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slider_config::{Orientation, SliderOptions};
use slider_core::{Geometry, HandleController, HandleId, ModelValue, Scale, ValueModel};

/// Position and flags for one handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlePosition {
    /// Role.
    pub id: HandleId,
    /// Committed value.
    pub value: f64,
    /// Offset along the track in `[0, 1]`, floor at 0.
    pub fraction: f64,
    /// Pixel offset from the track origin.
    pub pixel: f64,
    /// Holds keyboard focus.
    pub focused: bool,
    /// Active styling, on while focused.
    pub active: bool,
    /// Being dragged.
    pub dragging: bool,
}

/// One tick mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Step value.
    pub value: f64,
    /// Offset along the track in `[0, 1]`.
    pub fraction: f64,
    /// Pixel offset from the track origin.
    pub pixel: f64,
    /// Inside the selection bar.
    pub selected: bool,
}

/// Highlighted part of the track, as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionBar {
    /// Start fraction.
    pub start: f64,
    /// End fraction.
    pub end: f64,
}

/// A label position on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSlot {
    /// Floor label.
    Floor,
    /// Ceil label.
    Ceil,
    /// Low (or single) handle label.
    Low,
    /// High handle label.
    High,
}

/// A label whose value changed since the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Slot.
    pub slot: LabelSlot,
    /// Value shown.
    pub value: f64,
}

/// One redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Measured track length in pixels.
    pub track_length: f64,
    /// Track axis.
    pub orientation: Orientation,
    /// One entry per handle, low first.
    pub handles: Vec<HandlePosition>,
    /// Selection bar, if shown.
    pub selection: Option<SelectionBar>,
    /// Ticks, empty unless enabled.
    pub ticks: Vec<Tick>,
    /// Labels that changed since the last frame.
    pub labels: Vec<Label>,
}

impl RenderFrame {
    /// Position of `id`, if present.
    pub fn handle(&self, id: HandleId) -> Option<&HandlePosition> {
        self.handles.iter().find(|h| h.id == id)
    }
}

/// Phase of a user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    /// Pointer pressed on a handle or the track.
    Start,
    /// Value changed by the user.
    Change,
    /// Pointer released.
    End,
}

/// Messages published by a slider control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SliderMsg {
    /// A redraw completed.
    Frame(RenderFrame),
    /// A user interaction happened.
    Interaction {
        /// Phase.
        kind: InteractionKind,
        /// Handle involved.
        handle: HandleId,
        /// Configured control id.
        id: Option<String>,
    },
}

/// Last value emitted per label slot.
#[derive(Debug, Clone, Default)]
pub struct LabelCache {
    /// Values by slot.
    values: HashMap<LabelSlot, f64>,
}

impl LabelCache {
    /// Forget every cached label so the next frame reports them all.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Record `current` and return the labels that differ from the cache.
    pub fn diff(&mut self, current: &[Label]) -> Vec<Label> {
        current
            .iter()
            .filter(|l| self.values.insert(l.slot, l.value) != Some(l.value))
            .copied()
            .collect()
    }
}

/// Selection as a value interval.
fn selected_interval(value: ModelValue, opts: &SliderOptions, scale: &Scale) -> Option<(f64, f64)> {
    match value {
        ModelValue::Range { low, high } => Some((low, high)),
        ModelValue::Single(v) if opts.show_selection_bar => Some((scale.floor(), v)),
        ModelValue::Single(_) => None,
    }
}

/// Build a frame from the current control state.
pub(crate) fn build_frame(
    model: &ValueModel,
    opts: &SliderOptions,
    geom: &Geometry,
    handles: &HandleController,
    labels: &mut LabelCache,
) -> RenderFrame {
    let scale = model.scale();
    let value = model.value();
    let position = |id: HandleId, v: f64| {
        let fraction = Geometry::fraction_of(scale, v);
        let state = handles.state(id);
        HandlePosition {
            id,
            value: v,
            fraction,
            pixel: geom.fraction_to_pixel(fraction),
            focused: state.is_some_and(|s| s.focused()),
            active: state.is_some_and(|s| s.active()),
            dragging: state.is_some_and(|s| s.dragging()),
        }
    };
    let mut positions = vec![position(HandleId::Min, value.low())];
    if let Some(high) = value.high() {
        positions.push(position(HandleId::Max, high));
    }

    let interval = selected_interval(value, opts, scale);
    let selection = interval.map(|(a, b)| SelectionBar {
        start: Geometry::fraction_of(scale, a),
        end: Geometry::fraction_of(scale, b),
    });

    let ticks = if opts.show_ticks {
        scale
            .values()
            .into_iter()
            .map(|v| {
                let fraction = Geometry::fraction_of(scale, v);
                Tick {
                    value: v,
                    fraction,
                    pixel: geom.fraction_to_pixel(fraction),
                    selected: interval.is_some_and(|(a, b)| v >= a && v <= b),
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut current = vec![
        Label {
            slot: LabelSlot::Floor,
            value: scale.floor(),
        },
        Label {
            slot: LabelSlot::Ceil,
            value: scale.ceil(),
        },
        Label {
            slot: LabelSlot::Low,
            value: value.low(),
        },
    ];
    if let Some(high) = value.high() {
        current.push(Label {
            slot: LabelSlot::High,
            value: high,
        });
    }

    RenderFrame {
        track_length: geom.track_length(),
        orientation: geom.orientation(),
        handles: positions,
        selection,
        ticks,
        labels: labels.diff(&current),
    }
}
