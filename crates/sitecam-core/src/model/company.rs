// ── Company domain types ──

use std::fmt;

use serde::{Deserialize, Serialize};

/// Owning-company identifier.
///
/// The backend sends these as numbers or strings depending on the endpoint,
/// so they are normalized to their textual form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(String);

impl CompanyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CompanyId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<i64> for CompanyId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

/// Company directory entry, used to populate the company filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    /// Number of client sites (if known).
    pub site_count: Option<u32>,
    /// Number of cameras across all sites (if known).
    pub camera_count: Option<u32>,
}
