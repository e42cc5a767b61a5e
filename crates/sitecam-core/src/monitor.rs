// ── Monitor facade ──
//
// Single entry point for consumers: one-shot reads (status, site, company
// directory, reports) and the long-running pollers. Holds the configured
// `MonitorClient`; cheap to clone.

use chrono::Utc;
use tracing::debug;

use sitecam_api::MonitorClient;

use crate::config::MonitorConfig;
use crate::error::CoreError;
use crate::model::{Company, CompanyId, FailureReport, Site, SlaReport, StatusSnapshot};
use crate::poller::{
    GlobalStatusSource, Poller, PollerConfig, SiteStatusSource, StatusSource,
};

#[derive(Debug, Clone)]
pub struct Monitor {
    config: MonitorConfig,
    client: MonitorClient,
}

impl Monitor {
    /// Build the HTTP client for `config`. Does not contact the backend.
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        let client = MonitorClient::new(config.url.clone(), &config.transport())?;
        Ok(Self { config, client })
    }

    /// Wrap an existing client (tests, custom transports).
    pub fn with_client(config: MonitorConfig, client: MonitorClient) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    // ── One-shot reads ───────────────────────────────────────────

    /// Fetch every site once.
    pub async fn status(&self) -> Result<StatusSnapshot, CoreError> {
        let sites = self.global_source().fetch().await?;
        debug!(sites = sites.len(), "status fetched");
        Ok(StatusSnapshot::new(sites, Utc::now()))
    }

    /// Fetch one site from the per-site endpoint.
    pub async fn site(&self, name: &str) -> Result<Site, CoreError> {
        let mut sites = self.site_source(name).fetch().await?;
        sites.pop().ok_or_else(|| CoreError::SiteNotFound { name: name.into() })
    }

    pub async fn companies(&self) -> Result<Vec<Company>, CoreError> {
        let raw = self.client.list_companies().await.map_err(|e| self.api_error(e))?;
        Ok(raw.into_iter().map(Company::from).collect())
    }

    pub async fn sla_report(&self, company: &CompanyId, days: u32) -> Result<SlaReport, CoreError> {
        let raw = self
            .client
            .sla_report(company.as_str(), days)
            .await
            .map_err(|e| self.api_error(e))?;
        Ok(raw.into())
    }

    pub async fn failure_report(
        &self,
        company: &CompanyId,
        days: u32,
    ) -> Result<FailureReport, CoreError> {
        let raw = self
            .client
            .failure_report(company.as_str(), days)
            .await
            .map_err(|e| self.api_error(e))?;
        Ok(raw.into())
    }

    // ── Pollers ──────────────────────────────────────────────────

    /// Start polling every site on the configured cadence.
    pub fn watch_status(&self) -> Poller {
        Poller::start(self.global_source(), PollerConfig::from(&self.config))
    }

    /// Start polling one site on the configured cadence.
    pub fn watch_site(&self, name: &str) -> Poller {
        Poller::start(self.site_source(name), PollerConfig::from(&self.config))
    }

    // ── Internals ────────────────────────────────────────────────

    fn global_source(&self) -> GlobalStatusSource {
        GlobalStatusSource::new(self.client.clone(), self.config.timeout)
    }

    fn site_source(&self, name: &str) -> SiteStatusSource {
        SiteStatusSource::new(self.client.clone(), name, self.config.timeout)
    }

    fn api_error(&self, err: sitecam_api::Error) -> CoreError {
        CoreError::from(err).with_timeout(self.config.timeout)
    }
}
