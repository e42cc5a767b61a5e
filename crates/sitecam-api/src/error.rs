use thiserror::Error;

/// Top-level error type for the `sitecam-api` crate.
///
/// Covers every failure mode of talking to the monitoring backend:
/// transport, URL construction, non-success HTTP status, and payloads
/// that don't match the expected shape. `sitecam-core` maps these into
/// the two recoverable kinds its poller cares about.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for API paths: {0}")]
    InvalidBaseUrl(String),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Response ────────────────────────────────────────────────────
    /// The backend answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {body_preview}")]
    Status {
        status: u16,
        url: String,
        body_preview: String,
    },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Status { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Transport(e) if e.status().is_none())
    }
}

/// Truncate a response body for inclusion in error messages.
pub(crate) fn body_preview(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_5xx_is_transient() {
        let err = Error::Status {
            status: 503,
            url: "http://backend/status".into(),
            body_preview: String::new(),
        };
        assert!(err.is_transient());
        assert!(!err.is_not_found());
    }

    #[test]
    fn status_404_is_not_found() {
        let err = Error::Status {
            status: 404,
            url: "http://backend/status/x".into(),
            body_preview: String::new(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_transient());
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let body = "é".repeat(300);
        assert_eq!(body_preview(&body).chars().count(), 200);
    }
}
