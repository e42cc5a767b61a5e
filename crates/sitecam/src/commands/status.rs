//! Status command: global summary plus the ranked site table.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

use sitecam_core::{
    FilterSpec, GlobalSummary, Monitor, OrderSpec, ProportionBar, RankedSite, StatusSnapshot,
    ranked_view, summarize,
};

use crate::cli::{GlobalOpts, OutputFormat, StatusArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Site")]
    name: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Cameras")]
    total: u32,
    #[tabled(rename = "Online")]
    online: u32,
    #[tabled(rename = "Offline")]
    offline: String,
    #[tabled(rename = "Online %")]
    online_pct: String,
    #[tabled(rename = "Severity")]
    severity: String,
}

impl SiteRow {
    fn new(row: &RankedSite<'_>, color: bool) -> Self {
        let site = row.site;
        let online_pct = if row.counts.total == 0 {
            "no cameras".into()
        } else {
            format!("{}%", ProportionBar::from_counts(&row.counts).green_label())
        };
        Self {
            name: site.name.clone(),
            company: site
                .company_name
                .clone()
                .or_else(|| site.company.as_ref().map(ToString::to_string))
                .unwrap_or_default(),
            total: row.counts.total,
            online: row.counts.online,
            offline: output::paint_tier(&row.counts.offline.to_string(), row.tier, color),
            online_pct,
            severity: output::paint_severity(row.severity, color),
        }
    }
}

// ── Structured output ───────────────────────────────────────────────

#[derive(Serialize)]
struct StatusReport<'a> {
    as_of: DateTime<Utc>,
    summary: GlobalSummary,
    sites: Vec<RankedSite<'a>>,
}

/// One-line rollup shown above the table.
pub(super) fn summary_line(summary: &GlobalSummary) -> String {
    let c = summary.counts;
    let mut line = format!(
        "{} sites, {} cameras: {} online, {} offline",
        summary.sites, c.total, c.online, c.offline
    );
    if c.unconfigured() > 0 {
        line.push_str(&format!(", {} not configured", c.unconfigured()));
    }
    line.push_str(&format!(" ({}% online)", summary.online_percent()));
    line
}

/// Summary and ranked rows for `snapshot` in the chosen format.
pub(super) fn render_dashboard(
    snapshot: &StatusSnapshot,
    filter: &FilterSpec,
    order: OrderSpec,
    format: OutputFormat,
    color: bool,
) -> Result<String, CliError> {
    let summary = summarize(snapshot);
    let rows = ranked_view(snapshot, filter, order);

    match format {
        OutputFormat::Table => {
            let table = if rows.is_empty() {
                "No sites match the current filter.".to_owned()
            } else {
                let table_rows: Vec<SiteRow> = rows.iter().map(|r| SiteRow::new(r, color)).collect();
                output::render_table(&table_rows)
            };
            Ok(format!("{}\n{table}", summary_line(&summary)))
        }
        OutputFormat::Plain => Ok(rows
            .iter()
            .map(|r| r.site.name.clone())
            .collect::<Vec<_>>()
            .join("\n")),
        structured => {
            let report = StatusReport {
                as_of: snapshot.as_of(),
                summary,
                sites: rows,
            };
            output::render_single(structured, &report, |_| String::new(), |_| String::new())
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    monitor: &Monitor,
    args: StatusArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let snapshot = monitor.status().await?;
    let color = output::should_color(global.color);

    let out = if args.summary {
        let summary = summarize(&snapshot);
        output::render_single(
            global.output,
            &summary,
            summary_line,
            GlobalSummary::online_percent,
        )?
    } else {
        let filter = util::filter_spec(monitor, &args.view);
        render_dashboard(&snapshot, &filter, args.view.sort.into(), global.output, color)?
    };

    output::print_output(&out, global.quiet);
    Ok(())
}
