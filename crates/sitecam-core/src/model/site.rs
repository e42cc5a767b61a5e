// ── Site domain type ──

use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::company::CompanyId;

/// A monitored location (client unit / condominium) and its cameras.
///
/// Counts are never stored here; see [`crate::aggregate::site_counts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Unique site key, as used in the per-site status path.
    pub name: String,
    /// Monitoring code of the client unit (if the backend sends one).
    pub code: Option<String>,
    pub company: Option<CompanyId>,
    pub company_name: Option<String>,
    pub cameras: Vec<Camera>,
}

impl Site {
    /// A site with no company metadata.
    pub fn new(name: impl Into<String>, cameras: Vec<Camera>) -> Self {
        Self {
            name: name.into(),
            code: None,
            company: None,
            company_name: None,
            cameras,
        }
    }
}
