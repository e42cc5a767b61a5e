// ── Domain model ──
//
// Canonical, backend-independent types. Everything here is plain data;
// counts and orderings are derived by the `aggregate`, `classify` and
// `view` modules and never stored.

pub mod camera;
pub mod company;
pub mod report;
pub mod site;
pub mod snapshot;

pub use camera::{Camera, CameraStatus};
pub use company::{Company, CompanyId};
pub use report::{FailureEntry, FailureReport, SlaReport, SlaUnit};
pub use site::Site;
pub use snapshot::StatusSnapshot;
