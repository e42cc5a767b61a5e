//! Availability rollups, site rankings, and resilient polling on top of
//! `sitecam-api`.
//!
//! The backend reports one ON/OFF/NO_CONFIG state per camera. This crate
//! turns that into what a dashboard shows:
//!
//! - **Domain model** ([`model`]): [`StatusSnapshot`] holds every [`Site`]
//!   and its cameras as of one fetch. Both backend payload shapes are
//!   normalized in [`convert`].
//!
//! - **Aggregator** ([`aggregate`]): per-site and global counts, plus the
//!   [`GlobalSummary`] header.
//!
//! - **Classifier** ([`classify`]): a [`SeverityBucket`] from the offline
//!   percentage and an independent [`OfflineTier`] from the offline count.
//!
//! - **RankedView** ([`view`]): company filter, status filter, and sort,
//!   each usable on its own.
//!
//! - **[`ProportionBar`]**: a green/red split that always sums to 100.0.
//!
//! - **[`Poller`]**: periodic refresh publishing snapshots over `watch`
//!   channels, with fast retry until the first success and a per-second
//!   "time since update" counter.
//!
//! - **[`Monitor`]**: facade owning the HTTP client, for one-shot reads and
//!   for starting pollers.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod convert;
pub mod detail;
pub mod error;
pub mod model;
pub mod monitor;
pub mod poller;
pub mod proportion;
pub mod report;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregate::{Aggregate, AggregateCounts, GlobalSummary, SiteCounts, aggregate, summarize};
pub use classify::{OfflineTier, SeverityBucket};
pub use config::{MonitorConfig, TlsVerification};
pub use detail::SiteDetail;
pub use error::CoreError;
pub use monitor::Monitor;
pub use poller::{PollState, PollStatus, Poller, PollerConfig, format_elapsed};
pub use proportion::ProportionBar;
pub use report::{DEFAULT_REPORT_DAYS, UptimeBand};
pub use view::{CompanyFilter, FilterSpec, OrderSpec, RankedSite, StatusFilter, ranked_view};

pub use model::{
    Camera, CameraStatus, Company, CompanyId, FailureEntry, FailureReport, Site, SlaReport,
    SlaUnit, StatusSnapshot,
};
