//! Clap derive structures for the `sitecam` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use sitecam_core::{DEFAULT_REPORT_DAYS, OrderSpec, SeverityBucket};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sitecam -- camera availability at a glance
#[derive(Debug, Parser)]
#[command(
    name = "sitecam",
    version,
    about = "See which CCTV cameras are online, site by site",
    long_about = "Reads camera status from a sitecam monitoring backend and shows\n\
        per-site availability, ranked so the most degraded sites come first.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "SITECAM_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Monitoring backend URL (overrides profile)
    #[arg(long, short = 'b', env = "SITECAM_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Company ID to scope sites and reports to
    #[arg(long, short = 'c', env = "SITECAM_COMPANY", global = true)]
    pub company: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SITECAM_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SITECAM_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "SITECAM_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Site ordering for ranked lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// By site name
    Name,
    /// Most offline cameras first
    #[default]
    Offline,
    /// Lowest online ratio first
    Ratio,
}

impl From<SortOrder> for OrderSpec {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Name => Self::Alphabetical,
            SortOrder::Offline => Self::MostOfflineFirst,
            SortOrder::Ratio => Self::LowestOnlineRatioFirst,
        }
    }
}

/// Minimum severity for ranked lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeverityLevel {
    Ok,
    /// 5% or more offline
    Warning,
    /// 10% or more offline
    High,
    /// 15% or more offline
    Critical,
}

impl From<SeverityLevel> for SeverityBucket {
    fn from(level: SeverityLevel) -> Self {
        match level {
            SeverityLevel::Ok => Self::Ok,
            SeverityLevel::Warning => Self::Warning,
            SeverityLevel::High => Self::High,
            SeverityLevel::Critical => Self::Critical,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Availability summary and ranked site list
    #[command(alias = "st")]
    Status(StatusArgs),

    /// Camera breakdown for one site
    Site(SiteArgs),

    /// Live dashboard that refreshes on the poll interval
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// List companies known to the backend
    Companies,

    /// Uptime and failure reports for a company
    #[command(alias = "rep")]
    Reports(ReportsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  STATUS / SITE / WATCH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Options shared by every ranked site list.
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Site ordering
    #[arg(long, short = 's', value_enum, default_value_t = SortOrder::Offline)]
    pub sort: SortOrder,

    /// Only show sites with at least one offline camera
    #[arg(long)]
    pub offline_only: bool,

    /// Only show sites at or above this severity
    #[arg(long, value_enum)]
    pub severity: Option<SeverityLevel>,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Print only the global summary line
    #[arg(long)]
    pub summary: bool,
}

#[derive(Debug, Args)]
pub struct SiteArgs {
    /// Site name, exactly as the backend reports it
    pub name: String,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Watch a single site instead of every site
    #[arg(long)]
    pub site: Option<String>,

    /// Seconds between regular refreshes (overrides profile)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Seconds between retries until the first successful load (overrides profile)
    #[arg(long)]
    pub retry: Option<u64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REPORTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReportsCommand {
    /// Per-site uptime over the window, worst first
    Sla(ReportArgs),

    /// Cameras with the most failures over the window
    Failures(ReportArgs),
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Report window in days
    #[arg(long, short = 'd', default_value_t = DEFAULT_REPORT_DAYS)]
    pub days: u32,

    /// Show at most this many rows
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a profile from the given flags
    Init {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// PEM file with a custom CA for the backend
        #[arg(long)]
        ca_cert: Option<PathBuf>,

        /// Replace the profile if it already exists
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (backend, company, ca_cert, insecure, timeout,
        /// poll_interval, retry_interval)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Print the config file location
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sort_defaults_to_most_offline() {
        let cli = Cli::try_parse_from(["sitecam", "status"]).unwrap();
        let Command::Status(args) = cli.command else {
            panic!("expected status");
        };
        assert_eq!(OrderSpec::from(args.view.sort), OrderSpec::MostOfflineFirst);
        assert!(!args.view.offline_only);
    }

    #[test]
    fn report_days_default() {
        let cli = Cli::try_parse_from(["sitecam", "reports", "sla", "-c", "7"]).unwrap();
        let Command::Reports(ReportsArgs {
            command: ReportsCommand::Sla(args),
        }) = cli.command
        else {
            panic!("expected reports sla");
        };
        assert_eq!(args.days, DEFAULT_REPORT_DAYS);
        assert_eq!(cli.global.company.as_deref(), Some("7"));
    }
}
