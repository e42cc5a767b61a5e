// ── Report domain types ──
//
// Historical figures computed by the backend. Only transported and ordered
// here; see `crate::report` for display ordering and uptime bands.

use serde::{Deserialize, Serialize};

use super::company::CompanyId;

/// Uptime per site over a day window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlaReport {
    pub company: CompanyId,
    pub company_name: String,
    pub period_days: u32,
    pub units: Vec<SlaUnit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaUnit {
    pub site_name: String,
    pub code: String,
    pub camera_count: u32,
    pub offline_events: u32,
    pub online_events: u32,
    pub uptime_percent: f64,
}

/// Failure count per camera over a day window, most failures first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureReport {
    pub company: CompanyId,
    pub company_name: String,
    pub period_days: u32,
    pub entries: Vec<FailureEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEntry {
    pub camera_name: String,
    pub camera_uuid: String,
    pub site_name: String,
    pub ip: Option<String>,
    pub failures: u32,
}
