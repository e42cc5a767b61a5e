// sitecam-api: Async Rust client for the camera monitoring backend

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod companies;
mod reports;
mod status;

pub use client::MonitorClient;
pub use error::Error;
pub use models::{
    CompanyRef, GlobalStatus, RawCamera, RawCompany, RawFailureEntry, RawFailureReport,
    RawMetadata, RawSlaReport, RawSlaUnit, SiteEntry,
};
pub use transport::{TlsMode, TransportConfig};
