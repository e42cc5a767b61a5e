// ── HTTP transport ──
//
// One place that turns TLS + timeout settings into a `reqwest::Client`.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;

const CONNECT_TIMEOUT_CAP: Duration = Duration::from_secs(10);

/// How the backend's certificate is checked.
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (for self-signed backends on the LAN).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        // Connect phase capped at 10s, never above the request timeout.
        let connect_timeout = self.timeout.min(CONNECT_TIMEOUT_CAP);
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(connect_timeout)
            .user_agent(concat!("sitecam/", env!("CARGO_PKG_VERSION")));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let pem = std::fs::read(path).map_err(|e| {
                    Error::Tls(format!("cannot read CA certificate {}: {e}", path.display()))
                })?;
                let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                    Error::Tls(format!("{} is not a PEM certificate: {e}", path.display()))
                })?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_ca_file_is_a_tls_error() {
        let config = TransportConfig {
            tls: TlsMode::CustomCa(PathBuf::from("/nonexistent/sitecam-ca.pem")),
            ..TransportConfig::default()
        };
        match config.build_client() {
            Err(Error::Tls(msg)) => assert!(msg.contains("sitecam-ca.pem"), "{msg}"),
            other => panic!("expected Tls error, got {other:?}"),
        }
    }

    #[test]
    fn default_and_insecure_clients_build() {
        assert!(TransportConfig::default().build_client().is_ok());
        let insecure = TransportConfig {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(2),
        };
        assert!(insecure.build_client().is_ok());
    }
}
