// Monitoring backend HTTP client
//
// Wraps `reqwest::Client` with URL construction and status/JSON handling.
// Endpoint groups (status, reports, companies) are implemented as inherent
// methods in separate files to keep this module focused on transport
// mechanics.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{Error, body_preview};
use crate::transport::TransportConfig;

/// Raw HTTP client for the camera monitoring backend.
///
/// Cheap to clone: the inner `reqwest::Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct MonitorClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MonitorClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root that the endpoint paths hang off
    /// (e.g. `http://monitor.local:5000/` or `https://host/api/`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Append path segments to the base URL, percent-encoding each one.
    ///
    /// Site names routinely contain spaces and accents, so they must go
    /// through `path_segments_mut` rather than string formatting.
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body_preview: body_preview(&body),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> MonitorClient {
        MonitorClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn endpoint_url_encodes_site_names() {
        let c = client("http://monitor.local:5000");
        let url = c.endpoint_url(&["status", "Residencial São José"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://monitor.local:5000/status/Residencial%20S%C3%A3o%20Jos%C3%A9"
        );
    }

    #[test]
    fn endpoint_url_keeps_base_path_prefix() {
        let c = client("https://host/api/");
        let url = c.endpoint_url(&["reports", "sla"]).unwrap();
        assert_eq!(url.as_str(), "https://host/api/reports/sla");
    }

    #[test]
    fn endpoint_url_escapes_slashes_inside_segments() {
        let c = client("http://host");
        let url = c.endpoint_url(&["status", "Bloco A/B"]).unwrap();
        assert_eq!(url.path(), "/status/Bloco%20A%2FB");
    }
}
