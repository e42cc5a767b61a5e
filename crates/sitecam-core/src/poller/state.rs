// ── Poller state ──

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;

/// Where the poll loop currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PollState {
    /// Waiting for the next regular refresh.
    #[default]
    Idle,
    /// A fetch is in flight.
    Polling,
    /// Last fetch failed; an older snapshot is still shown.
    IdleStale,
    /// Nothing has loaded yet; retrying on the short interval.
    BackoffRetry,
}

/// Published alongside each state change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PollStatus {
    pub state: PollState,
    /// Completion time of the fetch behind the current snapshot.
    pub last_updated: Option<DateTime<Utc>>,
    /// Message of the most recent failure, cleared on success.
    pub last_error: Option<String>,
}

impl PollStatus {
    pub fn is_failing(&self) -> bool {
        matches!(self.state, PollState::IdleStale | PollState::BackoffRetry)
    }
}

/// Render "time since last update": `"42s"` under a minute, else `"3m 5s"`.
pub fn format_elapsed(secs: u64) -> String {
    if secs < 60 {
        format!("{secs}s")
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
