//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use sitecam_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Backend ──────────────────────────────────────────────────────
    #[error("Could not reach monitoring backend at {url}")]
    #[diagnostic(
        code(sitecam::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Reason: {reason}\n\
             Self-signed certificate? Try --insecure (-k)."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(sitecam::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout { seconds: u64 },

    #[error("Unexpected response from backend: {message}")]
    #[diagnostic(
        code(sitecam::bad_response),
        help("The backend answered, but not with a usable payload. Run with -vv for details.")
    )]
    BadResponse { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(sitecam::not_found),
        help("Run: sitecam {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sitecam::validation))]
    Validation { field: String, reason: String },

    #[error("No company selected")]
    #[diagnostic(
        code(sitecam::no_company),
        help(
            "Reports are per company. Pass --company <ID> or set `company` in your profile.\n\
             Run: sitecam companies to list IDs."
        )
    )]
    NoCompany,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(sitecam::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: sitecam --backend <URL> config init --name {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No monitoring backend configured")]
    #[diagnostic(
        code(sitecam::no_config),
        help(
            "Pass --backend <URL> (or set SITECAM_BACKEND), or save a profile with:\n\
             sitecam --backend <URL> config init\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Profile '{name}' already exists")]
    #[diagnostic(
        code(sitecam::profile_exists),
        help("Use --force to replace it.")
    )]
    ProfileExists { name: String },

    #[error(transparent)]
    #[diagnostic(code(sitecam::config))]
    Config(Box<figment::Error>),

    #[error("Failed to write config: {0}")]
    #[diagnostic(code(sitecam::config_write))]
    ConfigWrite(#[from] toml::ser::Error),

    // ── Runtime ──────────────────────────────────────────────────────
    #[error("Status poller stopped unexpectedly")]
    #[diagnostic(code(sitecam::poller_stopped))]
    PollerStopped,

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode JSON output: {0}")]
    #[diagnostic(code(sitecam::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode YAML output: {0}")]
    #[diagnostic(code(sitecam::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::NoCompany
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. }
            | Self::ProfileExists { .. }
            | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError ────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NetworkFailure { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },
            CoreError::BadResponse { message } => Self::BadResponse { message },
            CoreError::SiteNotFound { name } => Self::NotFound {
                resource_type: "site".into(),
                identifier: name,
                list_command: "status".into(),
            },
            CoreError::Config { message } => Self::Validation {
                field: "backend".into(),
                reason: message,
            },
            CoreError::PollerStopped => Self::PollerStopped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let cases = [
            (
                CoreError::NetworkFailure {
                    url: "http://monitor".into(),
                    reason: "refused".into(),
                },
                exit_code::CONNECTION,
            ),
            (CoreError::Timeout { timeout_secs: 30 }, exit_code::TIMEOUT),
            (
                CoreError::BadResponse {
                    message: "HTTP 502".into(),
                },
                exit_code::GENERAL,
            ),
            (
                CoreError::SiteNotFound { name: "Loja 1".into() },
                exit_code::NOT_FOUND,
            ),
            (
                CoreError::Config {
                    message: "bad url".into(),
                },
                exit_code::USAGE,
            ),
        ];
        for (core, code) in cases {
            assert_eq!(CliError::from(core).exit_code(), code);
        }
    }

    #[test]
    fn site_not_found_points_at_status() {
        let err = CliError::from(CoreError::SiteNotFound { name: "Loja 1".into() });
        assert_eq!(err.to_string(), "site 'Loja 1' not found");
    }
}
