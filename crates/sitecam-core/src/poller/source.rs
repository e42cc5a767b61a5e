// ── Status sources ──
//
// What the poller fetches. The live sources wrap `MonitorClient`; tests
// script their own.

use std::future::Future;
use std::time::Duration;

use sitecam_api::MonitorClient;

use crate::convert::{site_from_cameras, sites_from_global};
use crate::error::CoreError;
use crate::model::Site;

/// Produces the full set of sites for one poll.
pub trait StatusSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Site>, CoreError>> + Send;
}

/// Every site, from the global status endpoint.
#[derive(Debug, Clone)]
pub struct GlobalStatusSource {
    client: MonitorClient,
    timeout: Duration,
}

impl GlobalStatusSource {
    pub fn new(client: MonitorClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

impl StatusSource for GlobalStatusSource {
    async fn fetch(&self) -> Result<Vec<Site>, CoreError> {
        let status = self
            .client
            .global_status()
            .await
            .map_err(|e| CoreError::from(e).with_timeout(self.timeout))?;
        Ok(sites_from_global(status))
    }
}

/// One site, from the per-site status endpoint.
#[derive(Debug, Clone)]
pub struct SiteStatusSource {
    client: MonitorClient,
    site: String,
    timeout: Duration,
}

impl SiteStatusSource {
    pub fn new(client: MonitorClient, site: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            site: site.into(),
            timeout,
        }
    }
}

impl StatusSource for SiteStatusSource {
    async fn fetch(&self) -> Result<Vec<Site>, CoreError> {
        match self.client.site_status(&self.site).await {
            Ok(cameras) => Ok(vec![site_from_cameras(self.site.clone(), cameras)]),
            Err(e) if e.is_not_found() => Err(CoreError::SiteNotFound {
                name: self.site.clone(),
            }),
            Err(e) => Err(CoreError::from(e).with_timeout(self.timeout)),
        }
    }
}
