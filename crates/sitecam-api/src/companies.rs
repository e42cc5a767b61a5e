// Company directory endpoint

use tracing::debug;

use crate::client::MonitorClient;
use crate::error::Error;
use crate::models::RawCompany;

impl MonitorClient {
    /// List every company known to the backend.
    ///
    /// `GET /empresas`
    pub async fn list_companies(&self) -> Result<Vec<RawCompany>, Error> {
        let url = self.endpoint_url(&["empresas"])?;
        debug!("listing companies");
        self.get_json(url).await
    }
}
