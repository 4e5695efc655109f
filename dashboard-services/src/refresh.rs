//! Refresh Controller
//!
//! Background loop that polls the oracle at a fixed period, normalizes each
//! payload and publishes it to the [`ViewStateStore`].
//!
//! Lifecycle: [`RefreshController::start`] consumes the controller, runs one
//! cycle immediately and then one per period. The returned [`RefreshHandle`]
//! is the only way to stop it; [`RefreshHandle::stop`] consumes the handle,
//! and dropping the handle stops the loop as well.
//!
//! Cycles never overlap: a tick that comes due while a fetch is still
//! outstanding is skipped, and the next cycle starts on the following
//! period boundary. A fetch still in flight at teardown is dropped and its
//! result is never published.

use chrono::{DateTime, Utc};
use dashboard_core::{DashboardResult, Snapshot};
use dashboard_oracle::PriceSource;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::normalizer::normalize_payload;
use crate::store::{ViewState, ViewStateStore};

/// Shortest accepted polling period
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Counters for fetch cycles
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefreshStats {
    pub attempts: u64,
    pub successes: u64,
    pub failures: u64,
    /// Failures since the last success
    pub consecutive_failures: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_success_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl RefreshStats {
    /// At least one fetch succeeded and the most recent one did not fail
    pub fn is_healthy(&self) -> bool {
        self.successes > 0 && self.consecutive_failures == 0
    }
}

/// Drives fetch → normalize → publish cycles
pub struct RefreshController {
    source: Arc<dyn PriceSource>,
    store: Arc<ViewStateStore>,
    poll_interval: Duration,
    stats: Arc<Mutex<RefreshStats>>,
}

impl RefreshController {
    /// Create an idle controller
    ///
    /// `poll_interval` is raised to [`MIN_POLL_INTERVAL`] if shorter.
    pub fn new(
        source: Arc<dyn PriceSource>,
        store: Arc<ViewStateStore>,
        poll_interval: Duration,
    ) -> Self {
        if poll_interval < MIN_POLL_INTERVAL {
            warn!(
                "Poll interval {:?} is too short, using {:?}",
                poll_interval, MIN_POLL_INTERVAL
            );
        }

        Self {
            source,
            store,
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
            stats: Arc::new(Mutex::new(RefreshStats::default())),
        }
    }

    pub fn store(&self) -> &Arc<ViewStateStore> {
        &self.store
    }

    pub fn stats(&self) -> RefreshStats {
        self.stats.lock().clone()
    }

    /// Counters that stay readable after the controller is started
    pub fn monitor(&self) -> RefreshMonitor {
        RefreshMonitor {
            stats: Arc::clone(&self.stats),
        }
    }

    /// Run a single cycle now
    ///
    /// On failure the store is left exactly as it was.
    pub async fn refresh_once(&self) -> DashboardResult<Arc<ViewState>> {
        let result = self.fetch_snapshot().await;
        self.apply(result)
    }

    /// Start the periodic loop
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self) -> RefreshHandle {
        info!(
            "Starting refresh loop with {}s poll interval",
            self.poll_interval.as_secs_f64()
        );

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let monitor = self.monitor();
        let store = Arc::clone(&self.store);
        let task = tokio::spawn(self.run(shutdown_rx));

        RefreshHandle {
            shutdown_tx,
            task,
            monitor,
            store,
        }
    }

    async fn run(self, mut shutdown_rx: oneshot::Receiver<()>) {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_finished: Option<Instant> = None;

        loop {
            // Sender dropped counts as a stop request too
            let scheduled = tokio::select! {
                biased;
                _ = &mut shutdown_rx => break,
                at = ticker.tick() => at,
            };

            if last_finished.is_some_and(|done| scheduled < done) {
                debug!("Skipping tick that came due while a fetch was outstanding");
                continue;
            }

            tokio::select! {
                biased;
                _ = &mut shutdown_rx => {
                    debug!("Discarding in-flight oracle fetch after teardown");
                    break;
                }
                result = self.fetch_snapshot() => {
                    let _ = self.apply(result);
                }
            }
            last_finished = Some(Instant::now());
        }

        info!("Refresh loop stopped");
    }

    async fn fetch_snapshot(&self) -> DashboardResult<Snapshot> {
        let payload = self.source.fetch_payload().await?;
        normalize_payload(&payload)
    }

    fn apply(&self, result: DashboardResult<Snapshot>) -> DashboardResult<Arc<ViewState>> {
        let mut stats = self.stats.lock();
        stats.attempts += 1;

        match result {
            Ok(snapshot) => {
                let record_count = snapshot.len();
                let state = self.store.publish(snapshot);

                stats.successes += 1;
                stats.consecutive_failures = 0;
                stats.last_success_at = Some(Utc::now());
                stats.last_error = None;

                info!(
                    "Published snapshot #{} with {} records (last updated {})",
                    state.generation,
                    record_count,
                    state.last_updated_display.as_deref().unwrap_or("n/a")
                );
                Ok(state)
            }
            Err(e) => {
                stats.failures += 1;
                stats.consecutive_failures += 1;
                stats.last_error = Some(e.to_string());

                warn!(
                    "Oracle refresh failed ({} in a row), keeping previous snapshot: {}",
                    stats.consecutive_failures, e
                );
                Err(e)
            }
        }
    }
}

/// Read-only view of a running controller's counters
#[derive(Debug, Clone)]
pub struct RefreshMonitor {
    stats: Arc<Mutex<RefreshStats>>,
}

impl RefreshMonitor {
    pub fn stats(&self) -> RefreshStats {
        self.stats.lock().clone()
    }
}

/// Owned handle to a running refresh loop
pub struct RefreshHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
    monitor: RefreshMonitor,
    store: Arc<ViewStateStore>,
}

impl RefreshHandle {
    pub fn monitor(&self) -> RefreshMonitor {
        self.monitor.clone()
    }

    pub fn store(&self) -> &Arc<ViewStateStore> {
        &self.store
    }

    /// Stop the loop and wait for it to exit
    ///
    /// Once this returns no further fetch is issued and nothing more is
    /// published.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            warn!("Refresh loop exited abnormally: {}", e);
        }
    }
}
