//! Shared fixtures for slider-engine integration tests.
#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use slider_config::{OptionsRegistry, RawOptions};
use slider_core::ModelValue;
use slider_engine::{
    CountingObserver, FixedTrack, RenderFrame, SharedModel, SignalBus, Slider, SliderMsg,
};
use tokio::sync::mpsc::UnboundedReceiver;

/// Track length used unless a test changes it.
pub const TRACK_PX: f64 = 1000.0;

/// A slider wired to in-memory collaborators.
pub struct Fixture {
    pub model: SharedModel,
    pub slider: Slider,
    pub rx: UnboundedReceiver<SliderMsg>,
    pub observer: Arc<CountingObserver>,
    pub bus: SignalBus,
    pub track: Arc<FixedTrack>,
}

impl Fixture {
    /// Build a slider over `initial` with options given as RON.
    pub fn new(initial: ModelValue, options: &str) -> Self {
        let model = SharedModel::new(initial);
        let observer = Arc::new(CountingObserver::new());
        let bus = SignalBus::new();
        let track = Arc::new(FixedTrack::new(TRACK_PX));
        let raw = RawOptions::from_ron(options).expect("options fixture parses");
        let (slider, rx) = Slider::builder(Arc::new(model.clone()))
            .registry(&OptionsRegistry::new())
            .options(raw)
            .measure(track.clone())
            .signals(&bus)
            .observer(observer.clone())
            .build()
            .expect("slider builds");
        Self {
            model,
            slider,
            rx,
            observer,
            bus,
            track,
        }
    }

    /// Single-value slider.
    pub fn single(value: f64, options: &str) -> Self {
        Self::new(ModelValue::Single(value), options)
    }

    /// Range slider.
    pub fn range(low: f64, high: f64, options: &str) -> Self {
        Self::new(ModelValue::Range { low, high }, options)
    }

    /// Drain every queued message.
    pub fn drain(&mut self) -> Vec<SliderMsg> {
        let mut out = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            out.push(msg);
        }
        out
    }

    /// Drain queued frames, discarding other messages.
    pub fn frames(&mut self) -> Vec<RenderFrame> {
        self.drain()
            .into_iter()
            .filter_map(|m| match m {
                SliderMsg::Frame(f) => Some(f),
                SliderMsg::Interaction { .. } => None,
            })
            .collect()
    }

    /// Let the throttle window elapse so any trailing pass runs.
    pub async fn settle(&self) {
        let interval = Duration::from_millis(self.slider.options().interval);
        tokio::time::sleep(interval + Duration::from_millis(50)).await;
    }
}
