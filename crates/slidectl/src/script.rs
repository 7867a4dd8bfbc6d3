//! Scripted slider sessions.
//!
//! A script names the initial bound value, the track length, per-control option
//! overrides, and a list of steps. Steps are replayed in order on a paused-clock
//! runtime so `wait` steps are deterministic and instantaneous.

use std::{sync::Arc, time::Duration};

use ron::{Options, extensions::Extensions};
use serde::{Deserialize, Serialize};
use slider_config::{OptionsRegistry, RawOptions};
use slider_core::{HandleId, Key, ModelValue};
use slider_engine::{FixedTrack, SharedModel, Signal, SignalBus, Slider, SliderMsg};
use tokio::{runtime::Builder, sync::mpsc::UnboundedReceiver, task, time};
use tracing::{debug, info};

use crate::error::Result;

/// Default track length for scripts that do not set one.
fn default_track() -> f64 {
    1000.0
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Change the measured track length and broadcast a window resize.
    Resize(f64),
    /// Give keyboard focus to a handle.
    Focus(HandleId),
    /// Remove keyboard focus from a handle.
    Blur(HandleId),
    /// Press a key on the focused handle.
    Key(Key),
    /// Write a new value to the bound model from outside the control.
    Write(ModelValue),
    /// Press the pointer on a handle at a track pixel.
    PointerDown {
        /// Handle pressed.
        handle: HandleId,
        /// Pointer position along the track.
        px: f64,
    },
    /// Press the pointer on bare track.
    PointerDownOnTrack(f64),
    /// Move the pressed pointer.
    PointerMove(f64),
    /// Release the pointer.
    PointerUp,
    /// Broadcast a view-dimension recalculation.
    Recalc,
    /// Broadcast a forced full render.
    ForceRender,
    /// Broadcast a window resize without changing the track length.
    WindowResize,
    /// Let time pass, as a humantime duration (`"400ms"`).
    Wait(String),
    /// Run any pending trailing render now.
    Flush,
    /// Replace the control's option overrides.
    SetOptions(RawOptions),
    /// Broadcast teardown.
    Destroy,
}

/// A session script.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Initial bound value.
    pub value: ModelValue,
    /// Track length in pixels.
    #[serde(default = "default_track")]
    pub track: f64,
    /// Per-control option overrides.
    #[serde(default)]
    pub options: RawOptions,
    /// Steps, replayed in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A message observed while replaying a script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// Index of the step that produced the message; `0` is construction, steps count from 1.
    pub step: usize,
    /// The message.
    pub msg: SliderMsg,
}

/// Everything a replay produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    /// Messages in emission order.
    pub entries: Vec<Entry>,
    /// Bound value after the last step.
    pub value: ModelValue,
}

impl Transcript {
    /// Frames only, in order.
    #[cfg(test)]
    fn frames(&self) -> impl Iterator<Item = &slider_engine::RenderFrame> {
        self.entries.iter().filter_map(|e| match &e.msg {
            SliderMsg::Frame(f) => Some(f),
            SliderMsg::Interaction { .. } => None,
        })
    }
}

/// Collaborators wired around the control under test.
struct Session {
    /// Bound value.
    model: SharedModel,
    /// The control.
    slider: Slider,
    /// Control output.
    rx: UnboundedReceiver<SliderMsg>,
    /// Broadcast channel the control listens on.
    bus: SignalBus,
    /// Measured track.
    track: Arc<FixedTrack>,
}

impl Session {
    /// Move queued messages into `out`, tagged with `step`.
    fn drain(&mut self, step: usize, out: &mut Vec<Entry>) {
        while let Ok(msg) = self.rx.try_recv() {
            out.push(Entry { step, msg });
        }
    }

    /// Apply one step.
    async fn apply(&self, step: &Step) -> Result<()> {
        match step {
            Step::Resize(len) => {
                self.track.set(*len);
                self.bus.broadcast(Signal::WindowResize);
            }
            Step::Focus(id) => self.slider.focus(*id)?,
            Step::Blur(id) => self.slider.blur(*id)?,
            Step::Key(key) => {
                let r = self.slider.key(*key)?;
                debug!(?key, ?r, "script_key");
            }
            Step::Write(value) => self.model.set(*value),
            Step::PointerDown { handle, px } => {
                self.slider.pointer_down(*handle, *px)?;
            }
            Step::PointerDownOnTrack(px) => {
                self.slider.pointer_down_on_track(*px)?;
            }
            Step::PointerMove(px) => {
                self.slider.pointer_move(*px)?;
            }
            Step::PointerUp => {
                self.slider.pointer_up()?;
            }
            Step::Recalc => self.bus.broadcast(Signal::RecalcViewDimensions),
            Step::ForceRender => self.bus.broadcast(Signal::ForceRender),
            Step::WindowResize => self.bus.broadcast(Signal::WindowResize),
            Step::Wait(spec) => {
                let d: Duration = humantime::parse_duration(spec)?;
                time::sleep(d).await;
                task::yield_now().await;
            }
            Step::Flush => {
                self.slider.flush();
            }
            Step::SetOptions(raw) => self.slider.set_options(raw.clone())?,
            Step::Destroy => self.bus.broadcast(Signal::Destroy),
        }
        Ok(())
    }
}

impl Script {
    /// Parse a script from RON. Bare values are accepted for optional fields.
    pub fn from_ron(text: &str) -> Result<Self> {
        let opts = Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(opts.from_str(text)?)
    }

    /// Replay the script against a fresh control built from `registry`.
    pub fn play(&self, registry: &OptionsRegistry) -> Result<Transcript> {
        let rt = Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()?;
        rt.block_on(self.replay(registry))
    }

    /// Replay inside a running runtime.
    async fn replay(&self, registry: &OptionsRegistry) -> Result<Transcript> {
        let model = SharedModel::new(self.value);
        let bus = SignalBus::new();
        let track = Arc::new(FixedTrack::new(self.track));
        let (slider, rx) = Slider::builder(Arc::new(model.clone()))
            .registry(registry)
            .options(self.options.clone())
            .measure(track.clone())
            .signals(&bus)
            .build()?;
        let mut session = Session {
            model,
            slider,
            rx,
            bus,
            track,
        };
        info!(steps = self.steps.len(), "script_start");

        let mut entries = Vec::new();
        session.drain(0, &mut entries);
        for (i, step) in self.steps.iter().enumerate() {
            debug!(index = i + 1, ?step, "script_step");
            session.apply(step).await?;
            session.drain(i + 1, &mut entries);
        }
        let value = session.model.get();
        info!(messages = entries.len(), ?value, "script_done");
        Ok(Transcript { entries, value })
    }
}
