// Status endpoints
//
// `status` returns every monitored site; `status/{site}` returns the flat
// camera list of one site.

use tracing::debug;

use crate::client::MonitorClient;
use crate::error::Error;
use crate::models::{GlobalStatus, RawCamera};

impl MonitorClient {
    /// Fetch the current state of every camera at every site.
    ///
    /// `GET /status`
    pub async fn global_status(&self) -> Result<GlobalStatus, Error> {
        let url = self.endpoint_url(&["status"])?;
        debug!("fetching global status");
        self.get_json(url).await
    }

    /// Fetch the camera list for a single site.
    ///
    /// `GET /status/{site}` (site name is percent-encoded)
    pub async fn site_status(&self, site: &str) -> Result<Vec<RawCamera>, Error> {
        let url = self.endpoint_url(&["status", site])?;
        debug!(site, "fetching site status");
        self.get_json(url).await
    }
}
