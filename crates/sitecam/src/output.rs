//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use sitecam_core::{OfflineTier, PollStatus, SeverityBucket, UptimeBand};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Offline count, tinted by tier.
pub fn paint_tier(text: &str, tier: OfflineTier, color: bool) -> String {
    if !color {
        return text.to_owned();
    }
    match tier {
        OfflineTier::Neutral => text.dimmed().to_string(),
        OfflineTier::Green => text.green().to_string(),
        OfflineTier::Yellow => text.yellow().to_string(),
        OfflineTier::Orange => text.bright_red().to_string(),
        OfflineTier::Red => text.red().bold().to_string(),
    }
}

pub fn paint_severity(severity: SeverityBucket, color: bool) -> String {
    let text = severity.to_string();
    if !color {
        return text;
    }
    match severity {
        SeverityBucket::Ok => text.green().to_string(),
        SeverityBucket::Warning => text.yellow().to_string(),
        SeverityBucket::High => text.bright_red().to_string(),
        SeverityBucket::Critical => text.red().bold().to_string(),
    }
}

pub fn paint_band(band: UptimeBand, color: bool) -> String {
    let text = band.to_string();
    if !color {
        return text;
    }
    match band {
        UptimeBand::Good => text.green().to_string(),
        UptimeBand::Degraded => text.yellow().to_string(),
        UptimeBand::Poor => text.red().to_string(),
    }
}

/// Non-fatal fetch failure line for live views.
pub fn error_banner(status: &PollStatus, color: bool) -> Option<String> {
    let message = status.last_error.as_deref()?;
    let text = format!("! {message} ({})", status.state);
    Some(if color {
        text.black().on_yellow().to_string()
    } else {
        text
    })
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: builds a table from `to_row`
/// - `json` / `json-compact` / `yaml`: serializes the original data
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
        structured => render_structured(structured, data),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses `detail_fn`, since detail views are free-form text.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Plain => Ok(id_fn(data)),
        structured => render_structured(structured, data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

pub(crate) fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_structured<T: serde::Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
) -> Result<String, CliError> {
    let out = match format {
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        _ => serde_json::to_string_pretty(data)?,
    };
    Ok(out)
}
