//! Poll scheduler
//!
//! One ticker task per handle. Every tick spawns its own fetch, so a slow
//! backend can produce overlapping calls; whichever lands last wins.
//! Results pass through a gate that `stop()` closes, which is what keeps
//! late responses from reaching callbacks after teardown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::state::DataState;
use crate::config::PollingConfig;
use crate::snapshot::Snapshot;
use crate::source::{SnapshotSource, SourceError, SourceResult};

type UpdateFn = Box<dyn Fn(Arc<Snapshot>) + Send + Sync>;
type ErrorFn = Box<dyn Fn(Arc<SourceError>) + Send + Sync>;

/// Repeating fetch against a snapshot source
pub struct Poller<S> {
    source: Arc<S>,
    interval: Duration,
}

impl<S: SnapshotSource + 'static> Poller<S> {
    /// Create a poller that fetches every `interval`
    pub fn new(source: Arc<S>, interval: Duration) -> Self {
        Self { source, interval }
    }

    pub fn from_config(source: Arc<S>, config: &PollingConfig) -> Self {
        Self::new(source, config.interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fetch once immediately, then every interval until stopped
    ///
    /// Callbacks run while the delivery gate is held; they must not call
    /// [`PollHandle::stop`] on the handle that invokes them.
    pub fn start<U, E>(&self, on_update: U, on_error: E) -> PollHandle
    where
        U: Fn(Arc<Snapshot>) + Send + Sync + 'static,
        E: Fn(Arc<SourceError>) + Send + Sync + 'static,
    {
        let (state_tx, _) = watch::channel(DataState::Loading);
        let shared = Arc::new(Shared {
            active: Mutex::new(true),
            state: state_tx,
            ticks: AtomicU64::new(0),
            on_update: Box::new(on_update),
            on_error: Box::new(on_error),
        });

        let ticker = tokio::spawn(run_ticker(
            Arc::clone(&self.source),
            Arc::clone(&shared),
            self.interval,
        ));

        tracing::info!(interval_secs = self.interval.as_secs(), "Poller started");

        PollHandle { shared, ticker }
    }
}

async fn run_ticker<S: SnapshotSource + 'static>(
    source: Arc<S>,
    shared: Arc<Shared>,
    period: Duration,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        if !shared.is_active() {
            break;
        }

        let tick = shared.ticks.fetch_add(1, Ordering::SeqCst) + 1;
        let source = Arc::clone(&source);
        let shared = Arc::clone(&shared);

        tokio::spawn(async move {
            let outcome = source.fetch().await;
            shared.deliver(tick, outcome);
        });
    }
}

struct Shared {
    /// Delivery gate; cleared by `stop()`
    active: Mutex<bool>,
    state: watch::Sender<DataState>,
    ticks: AtomicU64,
    on_update: UpdateFn,
    on_error: ErrorFn,
}

impl Shared {
    fn is_active(&self) -> bool {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn deliver(&self, tick: u64, outcome: SourceResult<Snapshot>) {
        let active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if !*active {
            tracing::debug!(tick, "Discarding fetch result after stop");
            return;
        }

        match outcome {
            Ok(snapshot) => {
                tracing::debug!(
                    tick,
                    candles = snapshot.candles_1h.len(),
                    intraday = snapshot.intraday_1m.len(),
                    "Snapshot updated"
                );
                let snapshot = Arc::new(snapshot);
                self.state.send_replace(DataState::Ready(Arc::clone(&snapshot)));
                (self.on_update)(snapshot);
            }
            Err(e) => {
                tracing::warn!(tick, error = %e, "Snapshot fetch failed");
                let err = Arc::new(e);
                self.state.send_replace(DataState::Failed(Arc::clone(&err)));
                (self.on_error)(err);
            }
        }
    }

    fn close(&self) -> bool {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *active, false)
    }
}

/// Cancellable handle to a running poller
///
/// Dropping the handle stops the poller.
pub struct PollHandle {
    shared: Arc<Shared>,
    ticker: JoinHandle<()>,
}

impl PollHandle {
    /// Cancel the schedule
    ///
    /// No callback fires after this returns, including for fetches that are
    /// still in flight. Calling it again is a no-op.
    pub fn stop(&self) {
        if self.shared.close() {
            tracing::info!(ticks = self.ticks(), "Poller stopped");
        }
        self.ticker.abort();
    }

    pub fn is_running(&self) -> bool {
        self.shared.is_active()
    }

    /// Current state
    pub fn state(&self) -> DataState {
        self.shared.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<DataState> {
        self.shared.state.subscribe()
    }

    /// Number of ticks fired so far
    pub fn ticks(&self) -> u64 {
        self.shared.ticks.load(Ordering::SeqCst)
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
