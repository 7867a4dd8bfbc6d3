//! Throttled render scheduling.
//!
//! The first trigger after a quiet period runs the pass immediately. Triggers
//! inside the throttle window schedule a single trailing pass at the end of the
//! window; further triggers while it is pending only coalesce into it. The
//! trailing pass reads the latest state when it runs.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::{runtime::Handle, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

/// A recompute-and-redraw pass.
pub type Pass = Arc<dyn Fn() + Send + Sync>;

/// Mutable throttle bookkeeping.
struct SchedulerState {
    /// Throttle window.
    interval: Duration,
    /// When the last pass started.
    last_run: Option<Instant>,
    /// Cancels the pending trailing pass.
    pending: Option<CancellationToken>,
    /// Set on teardown; later triggers are dropped.
    stopped: bool,
    /// Triggers folded into the pending pass.
    coalesced: u64,
}

/// Leading/trailing-edge throttle around a render pass.
#[derive(Clone)]
pub struct RenderScheduler {
    /// Shared with the trailing task.
    state: Arc<Mutex<SchedulerState>>,
    /// The pass being throttled.
    pass: Pass,
}

impl RenderScheduler {
    /// Scheduler running `pass` at most once per `interval` (plus one trailing pass).
    pub fn new(interval: Duration, pass: Pass) -> Self {
        Self {
            state: Arc::new(Mutex::new(SchedulerState {
                interval,
                last_run: None,
                pending: None,
                stopped: false,
                coalesced: 0,
            })),
            pass,
        }
    }

    /// Change the throttle window. A pending pass keeps its original deadline.
    pub fn set_interval(&self, interval: Duration) {
        self.state.lock().interval = interval;
    }

    /// Request a pass.
    pub fn trigger(&self) {
        let run_now = {
            let mut st = self.state.lock();
            if st.stopped {
                trace!("render_trigger_after_stop");
                return;
            }
            if st.pending.is_some() {
                st.coalesced += 1;
                trace!(coalesced = st.coalesced, "render_coalesced");
                return;
            }
            let now = Instant::now();
            match st.last_run {
                Some(last) if now.duration_since(last) < st.interval => {
                    let delay = st.interval - now.duration_since(last);
                    self.schedule_trailing(&mut st, delay)
                }
                _ => {
                    st.last_run = Some(now);
                    true
                }
            }
        };
        if run_now {
            trace!("render_leading");
            (self.pass)();
        }
    }

    /// Spawn the trailing pass. Returns true if it must run inline instead.
    fn schedule_trailing(&self, st: &mut SchedulerState, delay: Duration) -> bool {
        let Ok(handle) = Handle::try_current() else {
            warn!("render_no_runtime_running_inline");
            st.last_run = Some(Instant::now());
            return true;
        };
        let token = CancellationToken::new();
        let cancel = token.clone();
        st.pending = Some(token);
        st.coalesced = 0;
        trace!(delay_ms = delay.as_millis(), "render_trailing_scheduled");
        let this = self.clone();
        handle.spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => this.run_trailing(&cancel),
                _ = cancel.cancelled() => trace!("render_trailing_cancelled"),
            }
        });
        false
    }

    /// Body of the trailing task once its delay has elapsed.
    fn run_trailing(&self, token: &CancellationToken) {
        {
            let mut st = self.state.lock();
            if token.is_cancelled() || st.stopped {
                return;
            }
            st.pending = None;
            st.last_run = Some(Instant::now());
        }
        trace!("render_trailing");
        (self.pass)();
    }

    /// Run a pending trailing pass now. Returns false if nothing was pending.
    pub fn flush(&self) -> bool {
        {
            let mut st = self.state.lock();
            let Some(token) = st.pending.take() else {
                return false;
            };
            token.cancel();
            st.last_run = Some(Instant::now());
        }
        trace!("render_flush");
        (self.pass)();
        true
    }

    /// True while a trailing pass is scheduled.
    pub fn is_pending(&self) -> bool {
        self.state.lock().pending.is_some()
    }

    /// Cancel any pending pass and drop all later triggers.
    pub fn stop(&self) {
        let mut st = self.state.lock();
        st.stopped = true;
        if let Some(token) = st.pending.take() {
            token.cancel();
        }
        trace!("render_scheduler_stopped");
    }
}
