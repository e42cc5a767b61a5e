//! CLI configuration: TOML profiles plus flag and environment overrides.
//!
//! Layering, lowest to highest: built-in defaults, the config file,
//! `SITECAM_*` environment variables, then command-line flags. The result
//! is a `MonitorConfig` for `sitecam-core`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use sitecam_core::config::{DEFAULT_POLL_INTERVAL, DEFAULT_RETRY_INTERVAL, DEFAULT_TIMEOUT};
use sitecam_core::{CompanyId, MonitorConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "SITECAM_CONFIG";

// ── TOML config structs ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default)]
    pub insecure: bool,

    /// Request timeout, seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Regular refresh cadence for `watch`, seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// Startup retry cadence for `watch`, seconds.
    #[serde(default = "default_retry_interval")]
    pub retry_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: default_timeout(),
            poll_interval: default_poll_interval(),
            retry_interval: default_retry_interval(),
        }
    }
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}
fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}
fn default_retry_interval() -> u64 {
    DEFAULT_RETRY_INTERVAL.as_secs()
}

/// A named backend profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "http://monitor.local:5000").
    pub backend: String,

    /// Company to scope views and reports to.
    pub company: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Override regular refresh cadence.
    pub poll_interval: Option<u64>,

    /// Override startup retry cadence.
    pub retry_interval: Option<u64>,
}

impl Profile {
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            company: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
            poll_interval: None,
            retry_interval: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `SITECAM_CONFIG`, else XDG / platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("io", "sitecam", "sitecam").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("sitecam");
    p
}

// ── Loading / saving ────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, CliError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("SITECAM_").split("_"));

    Ok(figment.extract()?)
}

/// Load config, returning a default if the file doesn't exist or is unreadable.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_else(|err| {
        tracing::debug!(error = %err, "falling back to default config");
        Config::default()
    })
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, CliError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(path)
}

// ── Resolution ──────────────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `MonitorConfig` from the config file, profile, and CLI overrides.
pub fn build_monitor_config(global: &GlobalOpts, cfg: &Config) -> Result<MonitorConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &cfg.defaults, global);
    }

    // An explicitly requested profile must exist.
    if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(cfg),
        });
    }

    // No profile -- build from flags / env vars alone.
    let backend = global.backend.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    resolve_profile(&Profile::new(backend), &cfg.defaults, global)
}

/// Translate a `Profile` + defaults + global flags into a `MonitorConfig`.
///
/// CLI flag overrides take priority over profile values, which take
/// priority over `[defaults]`.
pub fn resolve_profile(
    profile: &Profile,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<MonitorConfig, CliError> {
    let url_str = global.backend.as_deref().unwrap_or(&profile.backend);
    let url = parse_backend_url(url_str)?;

    let insecure = global.insecure || profile.insecure.unwrap_or(defaults.insecure);
    let tls = if insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(defaults.timeout);
    let poll_interval = profile.poll_interval.unwrap_or(defaults.poll_interval);
    let retry_interval = profile.retry_interval.unwrap_or(defaults.retry_interval);

    for (field, secs) in [
        ("timeout", timeout),
        ("poll_interval", poll_interval),
        ("retry_interval", retry_interval),
    ] {
        if secs == 0 {
            return Err(CliError::Validation {
                field: field.into(),
                reason: "must be at least 1 second".into(),
            });
        }
    }

    let company = global
        .company
        .as_deref()
        .or(profile.company.as_deref())
        .map(CompanyId::from);

    let mut config = MonitorConfig::new(url);
    config.tls = tls;
    config.timeout = Duration::from_secs(timeout);
    config.company = company;
    config.poll_interval = Duration::from_secs(poll_interval);
    config.retry_interval = Duration::from_secs(retry_interval);
    Ok(config)
}

pub fn parse_backend_url(url_str: &str) -> Result<url::Url, CliError> {
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "backend".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CliError::Validation {
            field: "backend".into(),
            reason: format!("expected an http(s) URL, got '{url_str}'"),
        });
    }
    Ok(url)
}

pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
