// ── Report ordering ──
//
// The backend computes the figures; the display order and uptime bands
// are applied here so every front end agrees on them.

use serde::Serialize;
use strum::{Display, EnumString};

use crate::model::{FailureEntry, FailureReport, SlaReport, SlaUnit};
use crate::view::compare_names;

/// Default report window.
pub const DEFAULT_REPORT_DAYS: u32 = 7;

/// Uptime band of one SLA row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UptimeBand {
    /// >= 95%
    Good,
    /// >= 90%
    Degraded,
    Poor,
}

impl UptimeBand {
    pub fn from_percent(uptime: f64) -> Self {
        if uptime >= 95.0 {
            Self::Good
        } else if uptime >= 90.0 {
            Self::Degraded
        } else {
            Self::Poor
        }
    }
}

impl SlaUnit {
    pub fn band(&self) -> UptimeBand {
        UptimeBand::from_percent(self.uptime_percent)
    }
}

/// SLA rows worst-first: ascending uptime, then site name.
pub fn sla_rows(report: &SlaReport) -> Vec<&SlaUnit> {
    let mut rows: Vec<&SlaUnit> = report.units.iter().collect();
    rows.sort_by(|a, b| {
        a.uptime_percent
            .total_cmp(&b.uptime_percent)
            .then_with(|| compare_names(&a.site_name, &b.site_name))
    });
    rows
}

/// Failure rows in the order the backend ranked them.
pub fn failure_rows(report: &FailureReport) -> &[FailureEntry] {
    &report.entries
}
