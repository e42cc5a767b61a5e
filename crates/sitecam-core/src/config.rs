// ── Runtime monitor configuration ──
//
// These types describe *how* to reach the monitoring backend and how often
// to poll it. They never touch disk: the CLI resolves its profile file into
// a `MonitorConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::model::CompanyId;

/// Default cadence of the regular refresh.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);
/// Default cadence of the startup retry, used until the first success.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(5);
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed backends on the LAN).
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for sitecam_api::TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Configuration for one monitoring backend.
///
/// Built by the CLI, passed to [`Monitor`](crate::Monitor).
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Backend base URL (e.g., `http://monitor.local:5000`).
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Company to scope views and reports to, if any.
    pub company: Option<CompanyId>,
    /// Interval between regular refreshes.
    pub poll_interval: Duration,
    /// Interval between retries while nothing has loaded yet.
    pub retry_interval: Duration,
}

impl MonitorConfig {
    /// A config for `url` with every other setting at its default.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
            company: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }

    pub(crate) fn transport(&self) -> sitecam_api::TransportConfig {
        sitecam_api::TransportConfig {
            tls: (&self.tls).into(),
            timeout: self.timeout,
        }
    }
}
