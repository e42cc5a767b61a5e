// ── Ranked site view ──
//
// Turns a snapshot into the display sequence. Processing order is fixed:
// company filter, then status filter, then severity filter, then sort. Each step is exposed on
// its own so callers can compose them (or reset one filter when another
// changes) without re-deriving counts.

use std::cmp::Ordering;

use serde::Serialize;
use strum::{Display, EnumString};

use crate::aggregate::{SiteCounts, site_counts};
use crate::classify::{OfflineTier, SeverityBucket, offline_tier, severity};
use crate::model::{CompanyId, Site, StatusSnapshot};

// ── Filter / order specs ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    /// Only sites with at least one offline camera.
    OfflineOnly,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CompanyFilter {
    #[default]
    All,
    Only(CompanyId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub status: StatusFilter,
    pub company: CompanyFilter,
    /// Minimum severity to keep; `None` keeps every site.
    pub severity: Option<SeverityBucket>,
}

impl FilterSpec {
    /// Switch company. Picking a specific company also resets the status
    /// filter, so the user lands on the company's full site list.
    pub fn select_company(&mut self, company: CompanyFilter) {
        if matches!(company, CompanyFilter::Only(_)) {
            self.status = StatusFilter::All;
        }
        self.company = company;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum OrderSpec {
    Alphabetical,
    #[default]
    MostOfflineFirst,
    LowestOnlineRatioFirst,
}

// ── Rows ─────────────────────────────────────────────────────────────

/// One display row: a site with its derived counts and classification.
#[derive(Debug, Clone, Serialize)]
pub struct RankedSite<'a> {
    pub site: &'a Site,
    pub counts: SiteCounts,
    pub severity: SeverityBucket,
    pub tier: OfflineTier,
}

impl<'a> RankedSite<'a> {
    pub fn new(site: &'a Site) -> Self {
        let counts = site_counts(site);
        Self {
            site,
            counts,
            severity: severity(&counts),
            tier: offline_tier(counts.offline),
        }
    }
}

/// Unfiltered, unsorted rows for every site in the snapshot.
pub fn rows(snapshot: &StatusSnapshot) -> Vec<RankedSite<'_>> {
    snapshot.sites().map(RankedSite::new).collect()
}

// ── Steps ────────────────────────────────────────────────────────────

pub fn filter_company<'a>(rows: Vec<RankedSite<'a>>, filter: &CompanyFilter) -> Vec<RankedSite<'a>> {
    match filter {
        CompanyFilter::All => rows,
        CompanyFilter::Only(id) => rows
            .into_iter()
            .filter(|row| row.site.company.as_ref() == Some(id))
            .collect(),
    }
}

pub fn filter_status(rows: Vec<RankedSite<'_>>, filter: StatusFilter) -> Vec<RankedSite<'_>> {
    match filter {
        StatusFilter::All => rows,
        StatusFilter::OfflineOnly => rows
            .into_iter()
            .filter(|row| row.counts.offline > 0)
            .collect(),
    }
}

/// Keep sites whose severity is at least `min`.
pub fn filter_severity(rows: Vec<RankedSite<'_>>, min: Option<SeverityBucket>) -> Vec<RankedSite<'_>> {
    match min {
        None => rows,
        Some(min) => rows.into_iter().filter(|row| row.severity >= min).collect(),
    }
}

/// Sort in place. Every order ends in a name tie-break, so the result is
/// deterministic and re-sorting is a no-op.
pub fn sort_rows(rows: &mut [RankedSite<'_>], order: OrderSpec) {
    match order {
        OrderSpec::Alphabetical => rows.sort_by(|a, b| compare_names(&a.site.name, &b.site.name)),
        OrderSpec::MostOfflineFirst => rows.sort_by(|a, b| {
            b.counts
                .offline
                .cmp(&a.counts.offline)
                .then_with(|| compare_names(&a.site.name, &b.site.name))
        }),
        OrderSpec::LowestOnlineRatioFirst => rows.sort_by(|a, b| {
            a.counts
                .online_ratio()
                .total_cmp(&b.counts.online_ratio())
                .then_with(|| compare_names(&a.site.name, &b.site.name))
        }),
    }
}

/// Company filter, then status filter, then severity filter, then sort.
pub fn ranked_view<'a>(
    snapshot: &'a StatusSnapshot,
    filter: &FilterSpec,
    order: OrderSpec,
) -> Vec<RankedSite<'a>> {
    let rows = filter_company(rows(snapshot), &filter.company);
    let rows = filter_status(rows, filter.status);
    let mut rows = filter_severity(rows, filter.severity);
    sort_rows(&mut rows, order);
    rows
}

/// Case-insensitive first, then exact, so "alpha" and "Alpha" still order
/// deterministically.
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
