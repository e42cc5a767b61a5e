//! Site command: one site's cameras grouped by state.

use std::fmt::Write as _;

use sitecam_core::{Camera, Monitor, SiteDetail};

use crate::cli::{GlobalOpts, SiteArgs};
use crate::error::CliError;
use crate::output;

fn camera_line(camera: &Camera) -> String {
    match camera.ip {
        Some(ip) => format!("  {} ({ip})", camera.name),
        None => format!("  {}", camera.name),
    }
}

/// Free-form detail view: header, bar, then offline and online lists.
pub(super) fn detail_text(detail: &SiteDetail, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", detail.name);

    if detail.is_empty() {
        out.push_str("No cameras registered for this site.");
        return out;
    }

    let c = detail.counts;
    let _ = writeln!(
        out,
        "{} cameras: {} online, {} offline, {} not configured  [{}]",
        c.total,
        c.online,
        c.offline,
        c.unconfigured(),
        output::paint_severity(detail.severity, color),
    );
    let _ = writeln!(out, "Online {}", detail.bar);

    for (title, cameras) in [
        ("Offline", &detail.offline),
        ("Online", &detail.online),
        ("Not configured", &detail.unconfigured),
    ] {
        if cameras.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{title} ({}):", cameras.len());
        for camera in cameras {
            let _ = writeln!(out, "{}", camera_line(camera));
        }
    }
    out.trim_end().to_owned()
}

pub async fn handle(monitor: &Monitor, args: SiteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let site = monitor.site(&args.name).await?;
    let detail = SiteDetail::new(&site);
    let color = output::should_color(global.color);

    let out = output::render_single(
        global.output,
        &detail,
        |d| detail_text(d, color),
        |d| {
            d.offline
                .iter()
                .map(|c| c.name.clone())
                .collect::<Vec<_>>()
                .join("\n")
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
