// ── Status snapshot ──
//
// The full "all sites, all cameras" picture as of one successful fetch.
// Built completely before publication and never mutated afterwards; the
// poller swaps in a new `Arc<StatusSnapshot>` on every success.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::site::Site;

#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    sites: BTreeMap<String, Site>,
    as_of: DateTime<Utc>,
}

impl StatusSnapshot {
    /// Build a snapshot. A later site with the same name replaces an
    /// earlier one.
    pub fn new(sites: impl IntoIterator<Item = Site>, as_of: DateTime<Utc>) -> Self {
        let sites = sites
            .into_iter()
            .map(|site| (site.name.clone(), site))
            .collect();
        Self { sites, as_of }
    }

    /// When the fetch that produced this snapshot completed.
    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    pub fn get(&self, name: &str) -> Option<&Site> {
        self.sites.get(name)
    }

    pub fn sites(&self) -> impl Iterator<Item = &Site> {
        self.sites.values()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
