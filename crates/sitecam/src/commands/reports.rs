//! Report commands: SLA uptime and failure ranking for one company.

use serde::Serialize;
use tabled::Tabled;

use sitecam_core::report::{failure_rows, sla_rows};
use sitecam_core::{FailureEntry, Monitor, SlaUnit};

use crate::cli::{GlobalOpts, OutputFormat, ReportArgs, ReportsArgs, ReportsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct SlaRow {
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Cameras")]
    cameras: u32,
    #[tabled(rename = "Offline events")]
    offline_events: u32,
    #[tabled(rename = "Uptime")]
    uptime: String,
    #[tabled(rename = "Band")]
    band: String,
}

impl SlaRow {
    fn new(unit: &SlaUnit, color: bool) -> Self {
        Self {
            site: unit.site_name.clone(),
            code: unit.code.clone(),
            cameras: unit.camera_count,
            offline_events: unit.offline_events,
            uptime: format!("{:.2}%", unit.uptime_percent),
            band: output::paint_band(unit.band(), color),
        }
    }
}

/// A failure entry with its 1-based position in the backend's ranking.
#[derive(Serialize)]
struct RankedFailure<'a> {
    rank: usize,
    #[serde(flatten)]
    entry: &'a FailureEntry,
}

#[derive(Tabled)]
struct FailureRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Camera")]
    camera: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Failures")]
    failures: u32,
}

impl From<&RankedFailure<'_>> for FailureRow {
    fn from(r: &RankedFailure<'_>) -> Self {
        Self {
            rank: r.rank,
            camera: r.entry.camera_name.clone(),
            site: r.entry.site_name.clone(),
            ip: r.entry.ip.clone().unwrap_or_default(),
            failures: r.entry.failures,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    monitor: &Monitor,
    args: ReportsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let company = util::require_company(monitor)?;
    let color = output::should_color(global.color);

    match args.command {
        ReportsCommand::Sla(ReportArgs { days, limit }) => {
            let report = monitor.sla_report(&company, days).await?;
            let rows = sla_rows(&report);
            let rows = util::apply_limit(&rows, limit);

            if global.output == OutputFormat::Table && !global.quiet {
                eprintln!(
                    "SLA for {} over the last {} days",
                    display_company(&report.company_name, &company),
                    report.period_days
                );
            }
            let out = output::render_list(
                global.output,
                rows,
                |u| SlaRow::new(u, color),
                |u| u.site_name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        ReportsCommand::Failures(ReportArgs { days, limit }) => {
            let report = monitor.failure_report(&company, days).await?;
            let rows = util::apply_limit(failure_rows(&report), limit);

            if global.output == OutputFormat::Table && !global.quiet {
                eprintln!(
                    "Camera failures for {} over the last {} days",
                    display_company(&report.company_name, &company),
                    report.period_days
                );
            }
            let ranked: Vec<RankedFailure<'_>> = rows
                .iter()
                .enumerate()
                .map(|(i, entry)| RankedFailure { rank: i + 1, entry })
                .collect();
            let out = output::render_list(
                global.output,
                &ranked,
                |r| FailureRow::from(r),
                |r| r.entry.camera_uuid.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }
    }
    Ok(())
}

fn display_company(name: &str, id: &sitecam_core::CompanyId) -> String {
    if name.is_empty() {
        format!("company {id}")
    } else {
        name.to_owned()
    }
}
