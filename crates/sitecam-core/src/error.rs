// ── Core error types ──
//
// User-facing errors from sitecam-core. Consumers never see HTTP status
// codes or JSON parse failures directly: the `From<sitecam_api::Error>`
// impl folds transport-layer errors into the two recoverable kinds the
// poller distinguishes (network failure vs. bad response).

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Fetch errors (recoverable, surfaced as a banner) ─────────────
    #[error("Cannot reach monitoring backend at {url}: {reason}")]
    NetworkFailure { url: String, reason: String },

    #[error("Monitoring backend timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Bad response from monitoring backend: {message}")]
    BadResponse { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Site not found: {name}")]
    SiteNotFound { name: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Lifecycle errors ─────────────────────────────────────────────
    #[error("Status poller has stopped")]
    PollerStopped,
}

impl CoreError {
    /// `true` for failures the poller recovers from by retrying later.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NetworkFailure { .. } | Self::Timeout { .. } | Self::BadResponse { .. }
        )
    }

    /// Fill in the configured request timeout, which reqwest errors don't carry.
    pub(crate) fn with_timeout(self, timeout: std::time::Duration) -> Self {
        match self {
            Self::Timeout { timeout_secs: 0 } => Self::Timeout {
                timeout_secs: timeout.as_secs(),
            },
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<sitecam_api::Error> for CoreError {
    fn from(err: sitecam_api::Error) -> Self {
        match err {
            sitecam_api::Error::Transport(ref e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string);
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if let Some(status) = e.status() {
                    CoreError::BadResponse {
                        message: format!("HTTP {status} from {url}"),
                    }
                } else {
                    CoreError::NetworkFailure {
                        url,
                        reason: e.to_string(),
                    }
                }
            }
            sitecam_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            sitecam_api::Error::InvalidBaseUrl(url) => CoreError::Config {
                message: format!("Backend URL cannot carry API paths: {url}"),
            },
            sitecam_api::Error::Tls(msg) => CoreError::NetworkFailure {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            sitecam_api::Error::Status {
                status,
                url,
                body_preview,
            } => CoreError::BadResponse {
                message: if body_preview.is_empty() {
                    format!("HTTP {status} from {url}")
                } else {
                    format!("HTTP {status} from {url}: {body_preview}")
                },
            },
            sitecam_api::Error::Deserialization { message, body: _ } => {
                CoreError::BadResponse {
                    message: format!("malformed payload: {message}"),
                }
            }
        }
    }
}

impl From<tokio::sync::watch::error::RecvError> for CoreError {
    fn from(_: tokio::sync::watch::error::RecvError) -> Self {
        CoreError::PollerStopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_becomes_bad_response() {
        let err: CoreError = sitecam_api::Error::Status {
            status: 500,
            url: "http://backend/status".into(),
            body_preview: "boom".into(),
        }
        .into();
        assert!(matches!(err, CoreError::BadResponse { ref message } if message.contains("500")));
        assert!(err.is_recoverable());
    }

    #[test]
    fn malformed_payload_becomes_bad_response() {
        let err: CoreError = sitecam_api::Error::Deserialization {
            message: "expected map".into(),
            body: "[]".into(),
        }
        .into();
        assert!(matches!(err, CoreError::BadResponse { .. }));
    }

    #[test]
    fn config_errors_are_not_recoverable() {
        let err: CoreError = sitecam_api::Error::InvalidBaseUrl("mailto:x".into()).into();
        assert!(matches!(err, CoreError::Config { .. }));
        assert!(!err.is_recoverable());
    }
}
