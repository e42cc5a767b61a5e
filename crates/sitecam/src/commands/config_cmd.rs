//! Config subcommand handlers.

use std::path::PathBuf;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

fn parse_secs(field: &str, value: &str) -> Result<u64, CliError> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(CliError::Validation {
            field: field.into(),
            reason: "must be a whole number of seconds, at least 1".into(),
        }),
    }
}

/// Apply one `config set` assignment to a profile.
fn set_profile_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "backend" => {
            config::parse_backend_url(&value)?;
            profile.backend = value;
        }
        "company" => profile.company = Some(value),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(PathBuf::from(value)),
        "insecure" => {
            profile.insecure = Some(value.parse().map_err(|_| CliError::Validation {
                field: "insecure".into(),
                reason: "must be 'true' or 'false'".into(),
            })?);
        }
        "timeout" => profile.timeout = Some(parse_secs("timeout", &value)?),
        "poll_interval" | "poll-interval" => {
            profile.poll_interval = Some(parse_secs("poll_interval", &value)?);
        }
        "retry_interval" | "retry-interval" => {
            profile.retry_interval = Some(parse_secs("retry_interval", &value)?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: backend, company, ca_cert, \
                     insecure, timeout, poll_interval, retry_interval"
                ),
            });
        }
    }
    Ok(())
}

/// Build a profile from global flags for `config init`.
fn profile_from_flags(global: &GlobalOpts, ca_cert: Option<PathBuf>) -> Result<Profile, CliError> {
    let backend = global.backend.clone().ok_or_else(|| CliError::Validation {
        field: "backend".into(),
        reason: "pass --backend <URL> (or set SITECAM_BACKEND)".into(),
    })?;
    config::parse_backend_url(&backend)?;

    let mut profile = Profile::new(backend);
    profile.company.clone_from(&global.company);
    profile.ca_cert = ca_cert;
    profile.insecure = global.insecure.then_some(true);
    profile.timeout = global.timeout;
    Ok(profile)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: profile from flags ────────────────────────────────
        ConfigCommand::Init {
            name,
            ca_cert,
            force,
        } => {
            let mut cfg = config::load_config_or_default();
            if cfg.profiles.contains_key(&name) && !force {
                return Err(CliError::ProfileExists { name });
            }

            let profile = profile_from_flags(global, ca_cert)?;
            cfg.profiles.insert(name.clone(), profile);
            if cfg.profiles.len() == 1 {
                cfg.default_profile = Some(name.clone());
            }

            let path = config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Configuration written to {}", path.display());
                eprintln!("  Profile: {name}");
                eprintln!("  Test it: sitecam --profile {name} status");
            }
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(
                global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|_| format!("{c:#?}")),
                |c| config::active_profile_name(global, c),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            let available = config::available_profiles(&cfg);
            let Some(profile) = cfg.profiles.get_mut(&profile_name) else {
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available,
                });
            };
            set_profile_key(profile, &key, value)?;

            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Set {key} on profile '{profile_name}'");
            }
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: sitecam --backend <URL> config init");
            } else {
                let lines: Vec<String> = cfg
                    .profiles
                    .keys()
                    .map(|name| {
                        let marker = if name == default { " *" } else { "" };
                        format!("{name}{marker}")
                    })
                    .collect();
                output::print_output(&lines.join("\n"), global.quiet);
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }

        // ── Path ───────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_validates_values() {
        let mut profile = Profile::new("http://monitor");
        set_profile_key(&mut profile, "poll-interval", "300".into()).unwrap();
        set_profile_key(&mut profile, "insecure", "true".into()).unwrap();
        assert_eq!(profile.poll_interval, Some(300));
        assert_eq!(profile.insecure, Some(true));

        assert!(set_profile_key(&mut profile, "timeout", "0".into()).is_err());
        assert!(set_profile_key(&mut profile, "backend", "monitor".into()).is_err());
        assert!(set_profile_key(&mut profile, "colour", "red".into()).is_err());
        assert_eq!(profile.backend, "http://monitor");
    }
}
