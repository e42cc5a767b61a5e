// ── Single-site detail ──

use serde::Serialize;

use crate::aggregate::{SiteCounts, site_counts};
use crate::classify::{SeverityBucket, severity};
use crate::model::{Camera, CameraStatus, Site};
use crate::proportion::ProportionBar;
use crate::view::compare_names;

/// One site broken down by camera state, each list sorted by name.
#[derive(Debug, Clone, Serialize)]
pub struct SiteDetail {
    pub name: String,
    pub counts: SiteCounts,
    pub severity: SeverityBucket,
    pub bar: ProportionBar,
    pub offline: Vec<Camera>,
    pub online: Vec<Camera>,
    pub unconfigured: Vec<Camera>,
}

impl SiteDetail {
    pub fn new(site: &Site) -> Self {
        let counts = site_counts(site);
        let pick = |status: CameraStatus| {
            let mut cameras: Vec<Camera> = site
                .cameras
                .iter()
                .filter(|c| c.status == status)
                .cloned()
                .collect();
            cameras.sort_by(|a, b| compare_names(&a.name, &b.name));
            cameras
        };

        Self {
            name: site.name.clone(),
            counts,
            severity: severity(&counts),
            bar: ProportionBar::from_counts(&counts),
            offline: pick(CameraStatus::Off),
            online: pick(CameraStatus::On),
            unconfigured: pick(CameraStatus::NoConfig),
        }
    }

    /// A site with no cameras at all. Rendered distinctly, not an error.
    pub fn is_empty(&self) -> bool {
        self.counts.total == 0
    }
}
