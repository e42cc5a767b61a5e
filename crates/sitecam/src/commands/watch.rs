//! Watch command: live dashboard driven by the status poller.
//!
//! Table output redraws on every snapshot, state change and elapsed tick.
//! Structured formats emit one document per published snapshot, which
//! suits `-o json-compact` piped into other tools.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use tracing::info;

use sitecam_core::{
    FilterSpec, Monitor, OrderSpec, PollStatus, SiteDetail, StatusSnapshot, format_elapsed,
};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

use super::{site, status, util};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// What one watch session renders.
enum WatchTarget {
    AllSites { filter: FilterSpec, order: OrderSpec },
    Site(String),
}

// ── Frame rendering ─────────────────────────────────────────────────

fn status_line(status: &PollStatus, elapsed: u64) -> String {
    match status.last_updated {
        Some(_) => format!("updated {} ago  [{}]", format_elapsed(elapsed), status.state),
        None => format!("waiting for first update  [{}]", status.state),
    }
}

fn render_body(
    target: &WatchTarget,
    snapshot: &StatusSnapshot,
    format: OutputFormat,
    color: bool,
) -> Result<String, CliError> {
    match target {
        WatchTarget::AllSites { filter, order } => {
            status::render_dashboard(snapshot, filter, *order, format, color)
        }
        WatchTarget::Site(name) => match snapshot.get(name) {
            Some(site) => {
                let detail = SiteDetail::new(site);
                output::render_single(
                    format,
                    &detail,
                    |d| site::detail_text(d, color),
                    |d| d.name.clone(),
                )
            }
            None => Ok(format!("{name}\nNo data for this site.")),
        },
    }
}

/// Full table-mode frame: status line, optional error banner, body.
fn table_frame(
    target: &WatchTarget,
    snapshot: Option<&StatusSnapshot>,
    status: &PollStatus,
    elapsed: u64,
    color: bool,
) -> Result<String, CliError> {
    let mut lines = vec![status_line(status, elapsed)];
    if let Some(banner) = output::error_banner(status, color) {
        lines.push(banner);
    }
    lines.push(String::new());
    lines.push(match snapshot {
        Some(snap) => render_body(target, snap, OutputFormat::Table, color)?,
        None => "Loading...".to_owned(),
    });
    Ok(lines.join("\n"))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    monitor: &Monitor,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let monitor = with_interval_overrides(monitor, &args)?;
    let target = match args.site {
        Some(name) => WatchTarget::Site(name),
        None => WatchTarget::AllSites {
            filter: util::filter_spec(&monitor, &args.view),
            order: args.view.sort.into(),
        },
    };

    let poller = match &target {
        WatchTarget::Site(name) => monitor.watch_site(name),
        WatchTarget::AllSites { .. } => monitor.watch_status(),
    };
    let mut snapshots = poller.snapshots();
    let mut poll_status = poller.status();
    let mut elapsed = poller.elapsed();

    let color = output::should_color(global.color);
    let redraw = global.output == OutputFormat::Table && io::stdout().is_terminal();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let result = loop {
        let published = tokio::select! {
            res = &mut ctrl_c => break res.map_err(CliError::from),
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break Err(CliError::PollerStopped);
                }
                true
            }
            changed = poll_status.changed() => {
                if changed.is_err() {
                    break Err(CliError::PollerStopped);
                }
                false
            }
            changed = elapsed.changed() => {
                if changed.is_err() {
                    break Err(CliError::PollerStopped);
                }
                false
            }
        };

        if global.quiet {
            continue;
        }

        let snapshot = snapshots.borrow_and_update().clone();
        let out = if global.output == OutputFormat::Table {
            let status = poll_status.borrow_and_update().clone();
            let secs = *elapsed.borrow_and_update();
            table_frame(&target, snapshot.as_deref(), &status, secs, color)?
        } else {
            match snapshot.as_deref() {
                Some(snap) if published => render_body(&target, snap, global.output, color)?,
                _ => continue,
            }
        };

        let mut stdout = io::stdout().lock();
        if redraw {
            let _ = write!(stdout, "{CLEAR_SCREEN}");
        }
        let _ = writeln!(stdout, "{out}");
        let _ = stdout.flush();
    };

    info!("stopping watch");
    poller.shutdown().await;
    result
}

/// `--interval` / `--retry` rebuild the monitor with adjusted cadences.
fn with_interval_overrides(monitor: &Monitor, args: &WatchArgs) -> Result<Monitor, CliError> {
    if args.interval.is_none() && args.retry.is_none() {
        return Ok(monitor.clone());
    }
    let mut config = monitor.config().clone();
    for (field, value, slot) in [
        ("interval", args.interval, &mut config.poll_interval),
        ("retry", args.retry, &mut config.retry_interval),
    ] {
        match value {
            Some(0) => {
                return Err(CliError::Validation {
                    field: field.into(),
                    reason: "must be at least 1 second".into(),
                });
            }
            Some(secs) => *slot = Duration::from_secs(secs),
            None => {}
        }
    }
    Ok(Monitor::new(config)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use sitecam_core::{Camera, CameraStatus, PollState, Site};

    use super::*;

    fn snapshot() -> StatusSnapshot {
        let camera = |name: &str, status| Camera {
            name: name.into(),
            uuid: None,
            ip: None,
            status,
        };
        StatusSnapshot::new(
            [Site::new(
                "Loja 1",
                vec![camera("c1", CameraStatus::On), camera("c2", CameraStatus::Off)],
            )],
            Utc::now(),
        )
    }

    fn all_sites() -> WatchTarget {
        WatchTarget::AllSites {
            filter: FilterSpec::default(),
            order: OrderSpec::default(),
        }
    }

    #[test]
    fn loading_frame_before_first_snapshot() {
        let status = PollStatus {
            state: PollState::BackoffRetry,
            last_updated: None,
            last_error: Some("Cannot reach monitoring backend at http://m: refused".into()),
        };
        let frame = table_frame(&all_sites(), None, &status, 0, false).unwrap();
        assert!(frame.starts_with("waiting for first update  [backoff-retry]"));
        assert!(frame.contains("! Cannot reach monitoring backend"));
        assert!(frame.ends_with("Loading..."));
    }

    #[test]
    fn stale_frame_keeps_old_data_and_elapsed() {
        let status = PollStatus {
            state: PollState::IdleStale,
            last_updated: Some(Utc::now()),
            last_error: Some("Bad response from monitoring backend: HTTP 502".into()),
        };
        let frame = table_frame(&all_sites(), Some(&snapshot()), &status, 75, false).unwrap();
        assert!(frame.starts_with("updated 1m 15s ago  [idle-stale]"));
        assert!(frame.contains("Loja 1"));
        assert!(frame.contains("50.0%"));
    }

    #[test]
    fn site_target_renders_detail() {
        let body = render_body(
            &WatchTarget::Site("Loja 1".into()),
            &snapshot(),
            OutputFormat::Table,
            false,
        )
        .unwrap();
        assert!(body.contains("Offline (1):"));

        let missing = render_body(
            &WatchTarget::Site("Loja 9".into()),
            &snapshot(),
            OutputFormat::Table,
            false,
        )
        .unwrap();
        assert!(missing.ends_with("No data for this site."));
    }
}
