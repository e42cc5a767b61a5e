// ── Status rollups ──
//
// Per-site and global camera counts. A pure fold over a snapshot,
// recomputed from scratch every time; nothing is cached between snapshots.

use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::Add;

use serde::Serialize;

use crate::model::{CameraStatus, Site, StatusSnapshot};
use crate::proportion::ProportionBar;

/// Camera counts for one site.
///
/// `online + offline <= total`, with equality exactly when the site has no
/// unconfigured cameras.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SiteCounts {
    pub total: u32,
    pub online: u32,
    pub offline: u32,
}

impl SiteCounts {
    /// Cameras counted in the total but neither online nor offline.
    pub fn unconfigured(&self) -> u32 {
        self.total
            .saturating_sub(self.online)
            .saturating_sub(self.offline)
    }

    /// `online / total`, with an empty site treated as fully online.
    pub fn online_ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            f64::from(self.online) / f64::from(self.total)
        }
    }
}

impl Add for SiteCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total: self.total + rhs.total,
            online: self.online + rhs.online,
            offline: self.offline + rhs.offline,
        }
    }
}

impl Sum for SiteCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Global counts across every site of a snapshot.
pub type AggregateCounts = SiteCounts;

/// Count one site's cameras.
pub fn site_counts(site: &Site) -> SiteCounts {
    site.cameras
        .iter()
        .fold(SiteCounts::default(), |mut counts, camera| {
            counts.total += 1;
            match camera.status {
                CameraStatus::On => counts.online += 1,
                CameraStatus::Off => counts.offline += 1,
                CameraStatus::NoConfig => {}
            }
            counts
        })
}

/// Global and per-site counts for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub global: AggregateCounts,
    pub per_site: BTreeMap<String, SiteCounts>,
}

/// Fold a snapshot into global and per-site counts. Empty snapshots give zeros.
pub fn aggregate(snapshot: &StatusSnapshot) -> Aggregate {
    let per_site: BTreeMap<String, SiteCounts> = snapshot
        .sites()
        .map(|site| (site.name.clone(), site_counts(site)))
        .collect();
    let global = per_site.values().copied().sum();
    Aggregate { global, per_site }
}

// ── Global summary ──────────────────────────────────────────────────

/// Header figures for the dashboard: totals, site count and the global bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlobalSummary {
    pub counts: AggregateCounts,
    pub sites: usize,
    pub bar: ProportionBar,
}

impl GlobalSummary {
    /// Online share, one decimal (e.g. `"93.4"`).
    pub fn online_percent(&self) -> String {
        self.bar.green_label()
    }
}

pub fn summarize(snapshot: &StatusSnapshot) -> GlobalSummary {
    let counts: AggregateCounts = snapshot.sites().map(site_counts).sum();
    GlobalSummary {
        counts,
        sites: snapshot.len(),
        bar: ProportionBar::from_counts(&counts),
    }
}
