// ── Resilient status poller ──
//
// Owns the refresh cadence. Each poll runs as its own task tagged with a
// sequence number; only the most recently issued poll may publish, so a
// slow response that is overtaken by a newer one is dropped on arrival.
//
// Snapshots are published as `Arc<StatusSnapshot>` through a watch channel
// and replaced wholesale. A failed poll never clears the current snapshot.
// Until the first success, failures retry on the short interval; after
// that they wait for the next regular poll.

pub mod source;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_POLL_INTERVAL, DEFAULT_RETRY_INTERVAL, MonitorConfig};
use crate::error::CoreError;
use crate::model::{Site, StatusSnapshot};

pub use source::{GlobalStatusSource, SiteStatusSource, StatusSource};
pub use state::{PollState, PollStatus, format_elapsed};

/// Cadence settings for one poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    pub poll_interval: Duration,
    pub retry_interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }
}

impl From<&MonitorConfig> for PollerConfig {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            poll_interval: config.poll_interval,
            retry_interval: config.retry_interval,
        }
    }
}

/// What the snapshot channel carries: `None` until the first success.
pub type SnapshotCell = Option<Arc<StatusSnapshot>>;

/// A running poller.
///
/// Created with [`start()`](Self::start), which begins polling immediately;
/// stopped with [`shutdown()`](Self::shutdown), which cancels both the poll
/// loop and the elapsed-time ticker and waits for them to exit. Dropping a
/// `Poller` also cancels its tasks, without waiting.
pub struct Poller {
    snapshot: watch::Receiver<SnapshotCell>,
    status: watch::Receiver<PollStatus>,
    elapsed: watch::Receiver<u64>,
    cancel: CancellationToken,
    task_handles: Vec<JoinHandle<()>>,
}

impl Poller {
    /// Spawn the poll loop and the per-second ticker on the current runtime.
    pub fn start<S: StatusSource>(source: S, config: PollerConfig) -> Self {
        let (snapshot_tx, snapshot) = watch::channel(None);
        let (status_tx, status) = watch::channel(PollStatus::default());
        let (elapsed_tx, elapsed) = watch::channel(0_u64);
        let elapsed_tx = Arc::new(elapsed_tx);
        let (anchor_tx, anchor) = watch::channel(Instant::now());
        let cancel = CancellationToken::new();

        let poll_loop = PollLoop {
            source: Arc::new(source),
            config,
            snapshot_tx,
            status_tx,
            elapsed_tx: Arc::clone(&elapsed_tx),
            anchor_tx,
            issued: 0,
            published: false,
        };

        let task_handles = vec![
            tokio::spawn(poll_loop.run(cancel.child_token())),
            tokio::spawn(elapsed_ticker(elapsed_tx, anchor, cancel.child_token())),
        ];
        info!(
            poll_secs = config.poll_interval.as_secs(),
            retry_secs = config.retry_interval.as_secs(),
            "status poller started"
        );

        Self {
            snapshot,
            status,
            elapsed,
            cancel,
            task_handles,
        }
    }

    /// The latest published snapshot (`None` until the first success).
    pub fn snapshots(&self) -> watch::Receiver<SnapshotCell> {
        self.snapshot.clone()
    }

    pub fn status(&self) -> watch::Receiver<PollStatus> {
        self.status.clone()
    }

    /// Whole seconds since the current snapshot was published (or since
    /// start, before the first success).
    pub fn elapsed(&self) -> watch::Receiver<u64> {
        self.elapsed.clone()
    }

    /// Cancel both background tasks and wait for them to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        for handle in self.task_handles.drain(..) {
            let _ = handle.await;
        }
        info!("status poller stopped");
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ── Background tasks ─────────────────────────────────────────────────

type FetchResult = (u64, Result<Vec<Site>, CoreError>);

struct PollLoop<S> {
    source: Arc<S>,
    config: PollerConfig,
    snapshot_tx: watch::Sender<SnapshotCell>,
    status_tx: watch::Sender<PollStatus>,
    elapsed_tx: Arc<watch::Sender<u64>>,
    /// When the current snapshot was published (start time before that).
    anchor_tx: watch::Sender<Instant>,
    /// Sequence number of the most recently issued fetch.
    issued: u64,
    /// Whether any snapshot has ever been published.
    published: bool,
}

impl<S: StatusSource> PollLoop<S> {
    async fn run(mut self, cancel: CancellationToken) {
        let mut fetches: JoinSet<FetchResult> = JoinSet::new();
        let mut next_poll = std::pin::pin!(tokio::time::sleep(Duration::ZERO));

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                Some(joined) = fetches.join_next() => {
                    match joined {
                        Ok((seq, result)) => {
                            if let Some(delay) = self.complete(seq, result) {
                                next_poll.as_mut().reset(Instant::now() + delay);
                            }
                        }
                        Err(e) => warn!(error = %e, "status fetch task failed"),
                    }
                }
                () = &mut next_poll => {
                    self.issued += 1;
                    let seq = self.issued;
                    let source = Arc::clone(&self.source);
                    fetches.spawn(async move { (seq, source.fetch().await) });
                    self.status_tx.send_modify(|s| s.state = PollState::Polling);
                    debug!(seq, "status poll issued");
                    // A fetch still running at the next deadline is superseded.
                    next_poll.as_mut().reset(Instant::now() + self.config.poll_interval);
                }
            }
        }

        fetches.shutdown().await;
    }

    /// Apply a finished fetch. Returns the delay until the next poll, or
    /// `None` if the result was superseded and discarded.
    fn complete(&mut self, seq: u64, result: Result<Vec<Site>, CoreError>) -> Option<Duration> {
        if seq != self.issued {
            debug!(seq, latest = self.issued, "discarding superseded status response");
            return None;
        }

        match result {
            Ok(sites) => {
                let snapshot = StatusSnapshot::new(sites, Utc::now());
                let as_of = snapshot.as_of();
                debug!(seq, sites = snapshot.len(), "status snapshot published");

                self.snapshot_tx.send_replace(Some(Arc::new(snapshot)));
                self.anchor_tx.send_replace(Instant::now());
                self.elapsed_tx.send_replace(0);
                self.status_tx.send_replace(PollStatus {
                    state: PollState::Idle,
                    last_updated: Some(as_of),
                    last_error: None,
                });
                self.published = true;
                Some(self.config.poll_interval)
            }
            Err(e) => {
                let (state, delay) = if self.published {
                    (PollState::IdleStale, self.config.poll_interval)
                } else {
                    (PollState::BackoffRetry, self.config.retry_interval)
                };
                warn!(seq, error = %e, retry_secs = delay.as_secs(), "status poll failed");
                self.status_tx.send_modify(|s| {
                    s.state = state;
                    s.last_error = Some(e.to_string());
                });
                Some(delay)
            }
        }
    }
}

const TICK: Duration = Duration::from_secs(1);

/// Publish whole seconds since the anchor instant. Each new anchor restarts
/// the tick phase, so the count reads 0 for a full second after a publish.
async fn elapsed_ticker(
    elapsed_tx: Arc<watch::Sender<u64>>,
    mut anchor: watch::Receiver<Instant>,
    cancel: CancellationToken,
) {
    let mut since = *anchor.borrow_and_update();
    let mut interval = tokio::time::interval_at(since + TICK, TICK);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            changed = anchor.changed() => {
                if changed.is_err() {
                    break;
                }
                since = *anchor.borrow_and_update();
                interval = tokio::time::interval_at(since + TICK, TICK);
                elapsed_tx.send_replace(0);
            }
            _ = interval.tick() => {
                elapsed_tx.send_replace(since.elapsed().as_secs());
            }
        }
    }
}
