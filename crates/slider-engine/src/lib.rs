//! Slider Engine
//!
//! Drives a slider control on top of `slider-core`:
//! - reconciles the control with a host-owned value ([`ExternalBinding`])
//! - reacts to broadcast [`Signal`]s (remeasure, force render, resize, destroy)
//! - throttles recompute-and-redraw passes ([`RenderScheduler`])
//! - publishes [`SliderMsg`] frames and interaction events on a channel
//!
//! Construct a [`Slider`] with [`Slider::builder`]. Input methods commit
//! synchronously; redraws are scheduled and must run inside a tokio runtime
//! for trailing passes to fire.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, MutexGuard};
use slider_config::{OptionsRegistry, RawOptions, SliderOptions};
use slider_core::{
    Geometry, HandleController, HandleId, HandleState, InputResponse, Key, ModelValue, Scale,
    ValueModel,
};
use tokio::sync::mpsc;
use tracing::{debug, trace};

mod binding;
mod error;
mod observer;
mod render;
mod scheduler;
mod signals;
mod track;

pub use binding::{ExternalBinding, Listener, ListenerId, SharedModel};
pub use error::{Error, Result};
pub use observer::{CountingObserver, RenderObserver};
pub use render::{
    HandlePosition, InteractionKind, Label, LabelCache, LabelSlot, RenderFrame, SelectionBar,
    SliderMsg, Tick,
};
pub use scheduler::{Pass, RenderScheduler};
pub use signals::{Handler, Signal, SignalBus, SubscriptionId};
pub use track::{FixedTrack, TrackMeasure};

/// Observer used when none is installed.
struct NoopObserver;

impl RenderObserver for NoopObserver {}

/// Mutable control state, guarded by one lock.
struct Inner {
    /// Resolved options; replaced wholesale.
    opts: SliderOptions,
    /// Committed value.
    model: ValueModel,
    /// Handle focus/drag state.
    handles: HandleController,
    /// Last track measurement.
    geom: Geometry,
    /// Labels already emitted.
    labels: LabelCache,
    /// Binding listener, dropped at teardown.
    listener: Option<ListenerId>,
    /// Signal subscription, dropped at teardown.
    subscription: Option<SubscriptionId>,
    /// Teardown has run.
    destroyed: bool,
}

/// State shared between clones of a [`Slider`] and its callbacks.
struct Shared {
    /// Control state.
    inner: Mutex<Inner>,
    /// Host value store.
    binding: Arc<dyn ExternalBinding>,
    /// Track measurement source.
    measure: Arc<dyn TrackMeasure>,
    /// Instrumentation hooks.
    observer: Arc<dyn RenderObserver>,
    /// Signal bus subscribed to, if any.
    bus: Option<SignalBus>,
    /// Output channel.
    tx: mpsc::UnboundedSender<SliderMsg>,
    /// Throttle around [`Slider::recompute`].
    scheduler: RenderScheduler,
}

impl Shared {
    /// Release the binding listener and bus subscription and stop rendering.
    fn detach(&self, listener: Option<ListenerId>, subscription: Option<SubscriptionId>) {
        if let Some(id) = listener {
            self.binding.unsubscribe(id);
        }
        if let (Some(bus), Some(id)) = (self.bus.as_ref(), subscription) {
            bus.unsubscribe(id);
        }
        self.scheduler.stop();
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let inner = self.inner.get_mut();
        let (listener, subscription) = (inner.listener.take(), inner.subscription.take());
        if listener.is_some() || subscription.is_some() {
            trace!("slider_dropped_detaching");
            self.detach(listener, subscription);
        }
    }
}

/// Builder for [`Slider`].
pub struct SliderBuilder {
    /// Host value store.
    binding: Arc<dyn ExternalBinding>,
    /// Per-instance overrides.
    overrides: RawOptions,
    /// Defaults+globals layer; the process-wide registry when unset.
    base: Option<SliderOptions>,
    /// Track measurement source.
    measure: Option<Arc<dyn TrackMeasure>>,
    /// Signal bus to subscribe to.
    bus: Option<SignalBus>,
    /// Instrumentation hooks.
    observer: Option<Arc<dyn RenderObserver>>,
}

impl SliderBuilder {
    /// Per-instance option overrides.
    pub fn options(mut self, overrides: RawOptions) -> Self {
        self.overrides = overrides;
        self
    }

    /// Resolve options against `registry` instead of the process-wide one.
    pub fn registry(mut self, registry: &OptionsRegistry) -> Self {
        self.base = Some(registry.get_options(None));
        self
    }

    /// Track measurement source. Without one the track measures 0 pixels.
    pub fn measure(mut self, measure: Arc<dyn TrackMeasure>) -> Self {
        self.measure = Some(measure);
        self
    }

    /// Subscribe the control to `bus`.
    pub fn signals(mut self, bus: &SignalBus) -> Self {
        self.bus = Some(bus.clone());
        self
    }

    /// Install an instrumentation observer.
    pub fn observer(mut self, observer: Arc<dyn RenderObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Resolve options, bind, subscribe, and render the first frame.
    pub fn build(self) -> Result<(Slider, mpsc::UnboundedReceiver<SliderMsg>)> {
        let base = self
            .base
            .unwrap_or_else(|| OptionsRegistry::global().get_options(None));
        let opts = self.overrides.apply_over(&base);
        opts.validate()?;

        let measure = self
            .measure
            .unwrap_or_else(|| Arc::new(FixedTrack::new(0.0)));
        let observer = self.observer.unwrap_or_else(|| Arc::new(NoopObserver));
        let initial = self.binding.read();
        let model = ValueModel::new(Scale::from_options(&opts), initial);
        let handles = HandleController::new(model.mode());
        let track_length = measure.measure();
        let geom = Geometry::new(track_length, opts.orientation());
        observer.calc_view_dimensions(geom.track_length());

        let (tx, rx) = mpsc::unbounded_channel();
        let interval = opts.interval();
        let shared = Arc::new_cyclic(|weak: &Weak<Shared>| {
            let w = weak.clone();
            let pass: Pass = Arc::new(move || {
                if let Some(shared) = w.upgrade() {
                    Slider { shared }.recompute();
                }
            });
            Shared {
                inner: Mutex::new(Inner {
                    opts,
                    model,
                    handles,
                    geom,
                    labels: LabelCache::default(),
                    listener: None,
                    subscription: None,
                    destroyed: false,
                }),
                binding: self.binding,
                measure,
                observer,
                bus: self.bus,
                tx,
                scheduler: RenderScheduler::new(interval, pass),
            }
        });
        let slider = Slider { shared };
        slider.attach();
        slider.initial_render();
        Ok((slider, rx))
    }
}

/// A slider control bound to a host value.
///
/// Cloning yields another handle to the same control.
#[derive(Clone)]
pub struct Slider {
    /// Control state and collaborators.
    shared: Arc<Shared>,
}

impl Slider {
    /// Start building a control bound to `binding`.
    pub fn builder(binding: Arc<dyn ExternalBinding>) -> SliderBuilder {
        SliderBuilder {
            binding,
            overrides: RawOptions::default(),
            base: None,
            measure: None,
            bus: None,
            observer: None,
        }
    }

    /// Weak handle for callbacks, so subscriptions never keep the control alive.
    fn weak(&self) -> Weak<Shared> {
        Arc::downgrade(&self.shared)
    }

    /// Subscribe to the binding and the signal bus.
    fn attach(&self) {
        let w = self.weak();
        let listener = self.shared.binding.subscribe(Arc::new(move || {
            if let Some(shared) = w.upgrade() {
                Self { shared }.on_external_change();
            }
        }));
        let subscription = self.shared.bus.as_ref().map(|bus| {
            let w = self.weak();
            bus.subscribe(Arc::new(move |signal| {
                if let Some(shared) = w.upgrade() {
                    Self { shared }.on_signal(signal);
                }
            }))
        });
        let mut inner = self.shared.inner.lock();
        inner.listener = Some(listener);
        inner.subscription = subscription;
    }

    /// First frame: normalise the bound value and draw everything.
    fn initial_render(&self) {
        let mut inner = self.shared.inner.lock();
        self.write_back(&inner);
        self.shared.observer.reset_slider();
        self.emit_frame(&mut inner);
    }

    /// Push the model value to the binding if the host holds something else.
    fn write_back(&self, inner: &Inner) {
        let value = inner.model.value();
        if self.shared.binding.read() != value {
            trace!(?value, "binding_write_back");
            self.shared.binding.commit(value);
        }
    }

    /// Reposition handles and publish a frame.
    fn emit_frame(&self, inner: &mut Inner) {
        let value = inner.model.value();
        self.shared.observer.on_low_handle_change(value.low());
        if let Some(high) = value.high() {
            self.shared.observer.on_high_handle_change(high);
        }
        let Inner {
            model,
            opts,
            geom,
            handles,
            labels,
            ..
        } = inner;
        let frame = render::build_frame(model, opts, geom, handles, labels);
        if self.shared.tx.send(SliderMsg::Frame(frame)).is_err() {
            trace!("frame_dropped_receiver_closed");
        }
    }

    /// Publish an interaction event for `handle`. The commit it reports has
    /// already happened, so a closed receiver only drops the event.
    fn interaction(&self, inner: &Inner, kind: InteractionKind, handle: HandleId) {
        let msg = SliderMsg::Interaction {
            kind,
            handle,
            id: inner.opts.id.clone(),
        };
        if self.shared.tx.send(msg).is_err() {
            trace!(?kind, ?handle, "interaction_dropped_receiver_closed");
        }
    }

    /// Throttled pass: pull the host value, requantize, write back, redraw.
    fn recompute(&self) {
        let mut inner = self.shared.inner.lock();
        if inner.destroyed {
            return;
        }
        let external = self.shared.binding.read();
        let commit = inner.model.sync(external);
        trace!(?external, committed = ?commit.value, "recompute");
        self.write_back(&inner);
        self.emit_frame(&mut inner);
    }

    /// Host wrote the bound value.
    fn on_external_change(&self) {
        if self.is_destroyed() {
            return;
        }
        self.shared.scheduler.trigger();
    }

    /// Dispatch a broadcast signal.
    fn on_signal(&self, signal: Signal) {
        let res = match signal {
            Signal::RecalcViewDimensions => self.recalc_view_dimensions(),
            Signal::WindowResize => self.window_resize(),
            Signal::ForceRender => self.force_render(),
            Signal::Destroy => {
                self.destroy();
                Ok(())
            }
        };
        if let Err(e) = res {
            debug!(?signal, error = %e, "signal_ignored");
        }
    }

    /// Lock the control state, failing after teardown.
    fn live(&self) -> Result<MutexGuard<'_, Inner>> {
        let inner = self.shared.inner.lock();
        if inner.destroyed {
            return Err(Error::Destroyed);
        }
        Ok(inner)
    }

    /// Resolved options in effect.
    pub fn options(&self) -> SliderOptions {
        self.shared.inner.lock().opts.clone()
    }

    /// Committed value.
    pub fn value(&self) -> ModelValue {
        self.shared.inner.lock().model.value()
    }

    /// State of handle `id`, if it exists.
    pub fn handle_state(&self, id: HandleId) -> Option<HandleState> {
        self.shared.inner.lock().handles.state(id).copied()
    }

    /// Current track length in pixels.
    pub fn track_length(&self) -> f64 {
        self.shared.inner.lock().geom.track_length()
    }

    /// True once the control has been torn down.
    pub fn is_destroyed(&self) -> bool {
        self.shared.inner.lock().destroyed
    }

    /// True while a throttled redraw is waiting.
    pub fn is_render_pending(&self) -> bool {
        self.shared.scheduler.is_pending()
    }

    /// Run a pending throttled redraw now. Returns false if none was pending.
    pub fn flush(&self) -> bool {
        self.shared.scheduler.flush()
    }

    /// Overlay `overrides` on the current options.
    ///
    /// Invalid results are rejected and the control keeps its previous options.
    /// The value is requantized against the new scale and written back.
    pub fn set_options(&self, overrides: RawOptions) -> Result<()> {
        {
            let mut inner = self.live()?;
            let next = overrides.apply_over(&inner.opts);
            next.validate()?;
            debug!(?next, "slider_options_replaced");
            let commit = inner.model.set_scale(Scale::from_options(&next));
            inner.geom = Geometry::new(inner.geom.track_length(), next.orientation());
            self.shared.scheduler.set_interval(next.interval());
            inner.opts = next;
            if commit.changed {
                self.write_back(&inner);
            }
            let dropped = if inner.opts.interactive() {
                None
            } else {
                inner.handles.pointer_up()
            };
            if let Some(handle) = dropped {
                debug!(?handle, "press_dropped_not_interactive");
                self.interaction(&inner, InteractionKind::End, handle);
            }
        }
        self.force_render()
    }

    /// Give focus to handle `id`.
    pub fn focus(&self, id: HandleId) -> Result<()> {
        let changed = self.live()?.handles.focus(id);
        if changed {
            self.shared.scheduler.trigger();
        }
        Ok(())
    }

    /// Remove focus from handle `id`.
    pub fn blur(&self, id: HandleId) -> Result<()> {
        let changed = self.live()?.handles.blur(id);
        if changed {
            self.shared.scheduler.trigger();
        }
        Ok(())
    }

    /// Deliver a key press to the focused handle.
    pub fn key(&self, key: Key) -> Result<InputResponse> {
        let response = {
            let mut inner = self.live()?;
            let Inner {
                opts,
                model,
                handles,
                ..
            } = &mut *inner;
            let response = handles.handle_key(model, opts, key);
            if let InputResponse::Moved { .. } = response {
                self.write_back(&inner);
                let handle = inner.handles.focused().unwrap_or(HandleId::Min);
                self.interaction(&inner, InteractionKind::Change, handle);
            }
            response
        };
        if let InputResponse::Moved { .. } = response {
            self.shared.scheduler.trigger();
        }
        Ok(response)
    }

    /// Pointer pressed on handle `id` at pixel `px`.
    pub fn pointer_down(&self, id: HandleId, px: f64) -> Result<InputResponse> {
        let response = {
            let mut inner = self.live()?;
            let Inner {
                opts,
                model,
                handles,
                geom,
                ..
            } = &mut *inner;
            let response = handles.pointer_down(model, opts, geom, id, px);
            if response.consumed() && handles.grab_target().is_some() {
                self.interaction(&inner, InteractionKind::Start, id);
            }
            response
        };
        if response.consumed() {
            self.shared.scheduler.trigger();
        }
        Ok(response)
    }

    /// Pointer pressed on the bare track at pixel `px`.
    pub fn pointer_down_on_track(&self, px: f64) -> Result<InputResponse> {
        let response = {
            let mut inner = self.live()?;
            let Inner {
                opts,
                model,
                handles,
                geom,
                ..
            } = &mut *inner;
            let response = handles.pointer_down_on_track(model, opts, geom, px);
            if response.consumed() {
                let handle = inner.handles.focused().unwrap_or(HandleId::Min);
                self.interaction(&inner, InteractionKind::Start, handle);
                if let InputResponse::Moved { .. } = response {
                    self.write_back(&inner);
                    self.interaction(&inner, InteractionKind::Change, handle);
                }
            }
            response
        };
        if response.consumed() {
            self.shared.scheduler.trigger();
        }
        Ok(response)
    }

    /// Pointer moved to pixel `px` while pressed.
    pub fn pointer_move(&self, px: f64) -> Result<InputResponse> {
        let response = {
            let mut inner = self.live()?;
            let Inner {
                opts,
                model,
                handles,
                geom,
                ..
            } = &mut *inner;
            let response = handles.pointer_move(model, opts, geom, px);
            if let InputResponse::Moved { .. } = response {
                self.write_back(&inner);
                let handle = inner.handles.focused().unwrap_or(HandleId::Min);
                self.interaction(&inner, InteractionKind::Change, handle);
            }
            response
        };
        if response.consumed() {
            self.shared.scheduler.trigger();
        }
        Ok(response)
    }

    /// Pointer released. Returns the handle whose press ended.
    pub fn pointer_up(&self) -> Result<Option<HandleId>> {
        let ended = {
            let mut inner = self.live()?;
            let ended = inner.handles.pointer_up();
            if let Some(handle) = ended {
                self.interaction(&inner, InteractionKind::End, handle);
            }
            ended
        };
        if ended.is_some() {
            self.shared.scheduler.trigger();
        }
        Ok(ended)
    }

    /// Remeasure the track now and schedule a redraw.
    fn remeasure(&self) -> Result<()> {
        {
            let mut inner = self.live()?;
            let length = self.shared.measure.measure();
            inner.geom = Geometry::new(length, inner.opts.orientation());
            self.shared
                .observer
                .calc_view_dimensions(inner.geom.track_length());
            trace!(length = inner.geom.track_length(), "calc_view_dimensions");
        }
        self.shared.scheduler.trigger();
        Ok(())
    }

    /// Handle a `recalcViewDimensions` request.
    pub fn recalc_view_dimensions(&self) -> Result<()> {
        self.remeasure()
    }

    /// Handle a window resize.
    pub fn window_resize(&self) -> Result<()> {
        self.remeasure()
    }

    /// Drop label caches and rerun the full render sequence, bypassing the throttle.
    pub fn force_render(&self) -> Result<()> {
        let mut inner = self.live()?;
        debug!("force_render");
        inner.labels.reset();
        self.shared.observer.reset_labels_value();
        self.shared.observer.reset_slider();
        self.emit_frame(&mut inner);
        Ok(())
    }

    /// Tear the control down: release every listener, cancel pending redraws and
    /// release the handles. Returns false if it was already torn down.
    pub fn destroy(&self) -> bool {
        let mut inner = self.shared.inner.lock();
        if inner.destroyed {
            return false;
        }
        inner.destroyed = true;
        self.shared.detach(inner.listener.take(), inner.subscription.take());
        inner.handles.release_all();
        self.shared.observer.unbind_events();
        debug!("slider_destroyed");
        true
    }
}
