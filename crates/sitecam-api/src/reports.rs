// Report endpoints
//
// Both reports are computed by the backend over a day-count window for
// one company. This client only transports them.

use tracing::debug;

use crate::client::MonitorClient;
use crate::error::Error;
use crate::models::{RawFailureReport, RawSlaReport};

impl MonitorClient {
    /// Uptime percentage per site.
    ///
    /// `GET /reports/sla?empresa_id={company}&days={days}`
    pub async fn sla_report(&self, company: &str, days: u32) -> Result<RawSlaReport, Error> {
        let mut url = self.endpoint_url(&["reports", "sla"])?;
        url.query_pairs_mut()
            .append_pair("empresa_id", company)
            .append_pair("days", &days.to_string());
        debug!(company, days, "fetching SLA report");
        self.get_json(url).await
    }

    /// Failure count per camera, most failures first.
    ///
    /// `GET /reports/failures?empresa_id={company}&days={days}`
    pub async fn failure_report(
        &self,
        company: &str,
        days: u32,
    ) -> Result<RawFailureReport, Error> {
        let mut url = self.endpoint_url(&["reports", "failures"])?;
        url.query_pairs_mut()
            .append_pair("empresa_id", company)
            .append_pair("days", &days.to_string());
        debug!(company, days, "fetching failure ranking");
        self.get_json(url).await
    }
}
