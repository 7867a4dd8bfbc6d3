//! Per-handle focus/drag state and input translation.
//!
//! Each handle moves through `Blurred → Focused → Dragging → Focused → Blurred`;
//! teardown moves every handle to `Released`, after which input is ignored.
//! Keyboard and pointer input become candidate values that are committed
//! through [`ValueModel`], so ordering and quantization rules always apply.

use std::iter;

use serde::{Deserialize, Serialize};
use slider_config::SliderOptions;
use tracing::{debug, trace};

use crate::{Commit, Geometry, Key, Mode, ModelValue, ValueModel};

/// Pointer travel, in pixels, before a press turns into a drag.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;

/// Logical role of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleId {
    /// Low bound, or the only handle of a single-value slider.
    Min,
    /// High bound.
    Max,
}

impl HandleId {
    /// The sibling role.
    pub fn other(self) -> Self {
        match self {
            Self::Min => Self::Max,
            Self::Max => Self::Min,
        }
    }
}

/// Lifecycle phase of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No focus.
    Blurred,
    /// Has keyboard focus.
    Focused,
    /// Being dragged by the pointer.
    Dragging,
    /// Torn down; ignores all input.
    Released,
}

/// Focus and drag state of one handle. Positions are derived at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleState {
    /// Role.
    pub id: HandleId,
    /// Current phase.
    pub phase: Phase,
}

impl HandleState {
    /// Fresh blurred handle.
    fn new(id: HandleId) -> Self {
        Self {
            id,
            phase: Phase::Blurred,
        }
    }

    /// True while the handle holds focus (including during a drag).
    pub fn focused(&self) -> bool {
        matches!(self.phase, Phase::Focused | Phase::Dragging)
    }

    /// Active styling: set on focus, kept through a drag, cleared on blur.
    pub fn active(&self) -> bool {
        self.focused()
    }

    /// True while the handle is being dragged.
    pub fn dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }
}

/// What a pointer press has hold of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabTarget {
    /// A single handle.
    Handle(HandleId),
    /// The whole range (coupled mode).
    Range,
}

/// Pointer press in progress.
#[derive(Debug, Clone, Copy)]
struct Grab {
    /// What is held.
    target: GrabTarget,
    /// Pixel where the press started.
    start_px: f64,
    /// Handle value minus the value under the pointer at press time.
    offset: f64,
    /// Low bound at press time.
    anchor_low: f64,
    /// Past the drag threshold.
    dragging: bool,
}

/// How an input event was handled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputResponse {
    /// Not consumed: no focus, keyboard disabled, or the control is released.
    Ignored,
    /// Consumed without effect (reserved keys such as space).
    Reserved,
    /// Consumed; the value did not change.
    Unchanged,
    /// Consumed; the value changed.
    Moved {
        /// Value after the move.
        value: ModelValue,
        /// A handle crossed its sibling and changed role.
        swapped: bool,
    },
}

impl InputResponse {
    /// Response for a commit.
    fn from_commit(c: Commit) -> Self {
        if c.changed {
            Self::Moved {
                value: c.value,
                swapped: c.swapped,
            }
        } else {
            Self::Unchanged
        }
    }

    /// True if the event was consumed.
    pub fn consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Owns the handle states of one slider and turns input into value proposals.
#[derive(Debug, Clone)]
pub struct HandleController {
    /// Low (or single) handle.
    min: HandleState,
    /// High handle, present in range mode.
    max: Option<HandleState>,
    /// Pointer press in progress.
    grab: Option<Grab>,
}

impl HandleController {
    /// Controller with one handle for single mode or two for range mode.
    pub fn new(mode: Mode) -> Self {
        Self {
            min: HandleState::new(HandleId::Min),
            max: (mode == Mode::Range).then(|| HandleState::new(HandleId::Max)),
            grab: None,
        }
    }

    /// State of `id`, if the handle exists.
    pub fn state(&self, id: HandleId) -> Option<&HandleState> {
        match id {
            HandleId::Min => Some(&self.min),
            HandleId::Max => self.max.as_ref(),
        }
    }

    fn state_mut(&mut self, id: HandleId) -> Option<&mut HandleState> {
        match id {
            HandleId::Min => Some(&mut self.min),
            HandleId::Max => self.max.as_mut(),
        }
    }

    /// All handle states, low first.
    pub fn states(&self) -> impl Iterator<Item = &HandleState> {
        iter::once(&self.min).chain(self.max.as_ref())
    }

    /// Handle holding focus, if any.
    pub fn focused(&self) -> Option<HandleId> {
        self.states().find(|h| h.focused()).map(|h| h.id)
    }

    /// True once [`release_all`](Self::release_all) has run.
    pub fn is_released(&self) -> bool {
        self.min.phase == Phase::Released
    }

    /// Give focus to `id`, blurring its sibling. Returns false if nothing changed.
    pub fn focus(&mut self, id: HandleId) -> bool {
        if self.is_released() || self.state(id).is_none() {
            return false;
        }
        if let Some(other) = self.state_mut(id.other()) {
            other.phase = Phase::Blurred;
        }
        let Some(h) = self.state_mut(id) else {
            return false;
        };
        if h.focused() {
            return false;
        }
        h.phase = Phase::Focused;
        debug!(handle = ?id, "handle_focused");
        true
    }

    /// Drop focus from `id`, abandoning any press it holds. Returns false if it was not focused.
    pub fn blur(&mut self, id: HandleId) -> bool {
        if self.is_released() {
            return false;
        }
        let Some(h) = self.state_mut(id) else {
            return false;
        };
        if !h.focused() {
            return false;
        }
        h.phase = Phase::Blurred;
        self.grab = None;
        debug!(handle = ?id, "handle_blurred");
        true
    }

    /// Move focus and drag state from `from` to `to` after a crossing swap.
    pub fn transfer(&mut self, from: HandleId, to: HandleId) {
        let (Some(a), Some(b)) = (self.state(from).copied(), self.state(to).copied()) else {
            return;
        };
        if let Some(h) = self.state_mut(to) {
            h.phase = a.phase;
        }
        if let Some(h) = self.state_mut(from) {
            h.phase = b.phase;
        }
        if let Some(g) = self.grab.as_mut().filter(|g| g.target == GrabTarget::Handle(from)) {
            g.target = GrabTarget::Handle(to);
        }
        debug!(?from, ?to, "handle_roles_swapped");
    }

    /// Tear down: every handle becomes `Released` and any press is dropped.
    pub fn release_all(&mut self) {
        self.grab = None;
        self.min.phase = Phase::Released;
        if let Some(h) = self.max.as_mut() {
            h.phase = Phase::Released;
        }
    }

    /// Current value of the handle playing `id`.
    fn current(model: &ValueModel, id: HandleId) -> f64 {
        let v = model.value();
        match id {
            HandleId::Min => v.low(),
            HandleId::Max => v.high().unwrap_or_else(|| v.low()),
        }
    }

    /// True when both handles move together.
    fn coupled(model: &ValueModel, opts: &SliderOptions) -> bool {
        opts.draggable_range_only && model.mode() == Mode::Range
    }

    /// Commit `target` for `id`, transferring roles on a crossing swap.
    fn commit_handle(&mut self, model: &mut ValueModel, id: HandleId, target: f64) -> Commit {
        let c = match id {
            HandleId::Min => model.set_low(target),
            HandleId::Max => model.set_high(target),
        };
        if c.swapped {
            self.transfer(id, id.other());
        }
        c
    }

    /// Apply a key press to the focused handle.
    pub fn handle_key(
        &mut self,
        model: &mut ValueModel,
        opts: &SliderOptions,
        key: Key,
    ) -> InputResponse {
        let Some(id) = self.focused() else {
            return InputResponse::Ignored;
        };
        if !opts.keyboard_enabled() {
            trace!(?key, "key_ignored_keyboard_disabled");
            return InputResponse::Ignored;
        }
        let scale = *model.scale();
        let current = Self::current(model, id);
        let target = match key {
            Key::Left | Key::Down => current - scale.step(),
            Key::Right | Key::Up => current + scale.step(),
            Key::PageDown => current - scale.page(),
            Key::PageUp => current + scale.page(),
            Key::Home => scale.floor(),
            Key::End => scale.ceil(),
            Key::Space => return InputResponse::Reserved,
            Key::Other(_) => return InputResponse::Ignored,
        };
        debug!(?key, handle = ?id, current, target, "key");
        let c = if Self::coupled(model, opts) {
            model.translate(target - current)
        } else {
            self.commit_handle(model, id, target)
        };
        InputResponse::from_commit(c)
    }

    /// Pointer pressed on handle `id` at pixel `px`.
    ///
    /// The handle takes focus even on a non-interactive control; only interactive
    /// controls start a press.
    pub fn pointer_down(
        &mut self,
        model: &ValueModel,
        opts: &SliderOptions,
        geom: &Geometry,
        id: HandleId,
        px: f64,
    ) -> InputResponse {
        if self.is_released() || self.state(id).is_none() {
            return InputResponse::Ignored;
        }
        self.focus(id);
        if !opts.interactive() {
            return InputResponse::Unchanged;
        }
        let scale = model.scale();
        let under = Geometry::raw_value_at_fraction(scale, geom.pixel_to_fraction(px));
        let target = if Self::coupled(model, opts) {
            GrabTarget::Range
        } else {
            GrabTarget::Handle(id)
        };
        self.grab = Some(Grab {
            target,
            start_px: px,
            offset: Self::current(model, id) - under,
            anchor_low: model.value().low(),
            dragging: false,
        });
        trace!(?target, px, "pointer_down");
        InputResponse::Unchanged
    }

    /// Pointer pressed on the bare track at pixel `px`.
    ///
    /// The nearest handle jumps to the pointer and is grabbed; ties go to the low
    /// handle when the pointer is below it. In coupled mode the whole range is grabbed
    /// without moving.
    pub fn pointer_down_on_track(
        &mut self,
        model: &mut ValueModel,
        opts: &SliderOptions,
        geom: &Geometry,
        px: f64,
    ) -> InputResponse {
        if self.is_released() || !opts.interactive() {
            return InputResponse::Ignored;
        }
        let scale = *model.scale();
        let under = Geometry::raw_value_at_fraction(&scale, geom.pixel_to_fraction(px));
        let value = model.value();
        if Self::coupled(model, opts) {
            let id = self.focused().unwrap_or(HandleId::Min);
            self.focus(id);
            self.grab = Some(Grab {
                target: GrabTarget::Range,
                start_px: px,
                offset: 0.0,
                anchor_low: value.low(),
                dragging: false,
            });
            return InputResponse::Unchanged;
        }
        let id = match value.high() {
            None => HandleId::Min,
            Some(high) => {
                let (dl, dh) = ((under - value.low()).abs(), (under - high).abs());
                if dl < dh || (dl == dh && under < value.low()) {
                    HandleId::Min
                } else {
                    HandleId::Max
                }
            }
        };
        self.focus(id);
        let c = self.commit_handle(model, id, under);
        let id = if c.swapped { id.other() } else { id };
        if let Some(h) = self.state_mut(id) {
            h.phase = Phase::Dragging;
        }
        self.grab = Some(Grab {
            target: GrabTarget::Handle(id),
            start_px: px,
            offset: 0.0,
            anchor_low: model.value().low(),
            dragging: true,
        });
        InputResponse::from_commit(c)
    }

    /// Pointer moved to pixel `px` while pressed.
    ///
    /// A press held while the control stops being interactive is dropped.
    pub fn pointer_move(
        &mut self,
        model: &mut ValueModel,
        opts: &SliderOptions,
        geom: &Geometry,
        px: f64,
    ) -> InputResponse {
        if !opts.interactive() {
            self.pointer_up();
            return InputResponse::Ignored;
        }
        let Some(mut grab) = self.grab else {
            return InputResponse::Ignored;
        };
        if !grab.dragging {
            if (px - grab.start_px).abs() < DRAG_THRESHOLD_PX {
                return InputResponse::Unchanged;
            }
            grab.dragging = true;
            let id = match grab.target {
                GrabTarget::Handle(id) => id,
                GrabTarget::Range => self.focused().unwrap_or(HandleId::Min),
            };
            if let Some(h) = self.state_mut(id) {
                h.phase = Phase::Dragging;
            }
            trace!(?id, "drag_started");
        }
        self.grab = Some(grab);
        let scale = *model.scale();
        let c = match grab.target {
            GrabTarget::Handle(id) => {
                let under = Geometry::raw_value_at_fraction(&scale, geom.pixel_to_fraction(px));
                self.commit_handle(model, id, under + grab.offset)
            }
            GrabTarget::Range => {
                let moved = geom.pixel_delta_to_value(&scale, px - grab.start_px);
                let target_low = scale.quantize(grab.anchor_low + moved);
                model.translate(target_low - model.value().low())
            }
        };
        InputResponse::from_commit(c)
    }

    /// Pointer released. Returns the handle whose press ended, if a press was in progress.
    pub fn pointer_up(&mut self) -> Option<HandleId> {
        let grab = self.grab.take()?;
        let id = match grab.target {
            GrabTarget::Handle(id) => id,
            GrabTarget::Range => self.focused().unwrap_or(HandleId::Min),
        };
        for h in [Some(&mut self.min), self.max.as_mut()].into_iter().flatten() {
            if h.phase == Phase::Dragging {
                h.phase = Phase::Focused;
            }
        }
        trace!(?id, "pointer_up");
        Some(id)
    }

    /// What the current press holds, if any.
    pub fn grab_target(&self) -> Option<GrabTarget> {
        self.grab.map(|g| g.target)
    }
}
