//! Command dispatch: bridges CLI args -> core reads -> output formatting.

pub mod companies;
pub mod config_cmd;
pub mod reports;
pub mod site;
pub mod status;
pub mod util;
pub mod watch;

use sitecam_core::Monitor;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Status(args) => status::handle(monitor, args, global).await,
        Command::Site(args) => site::handle(monitor, args, global).await,
        Command::Watch(args) => watch::handle(monitor, args, global).await,
        Command::Companies => companies::handle(monitor, global).await,
        Command::Reports(args) => reports::handle(monitor, args, global).await,
        // Handled before a monitor is built.
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Completions(_) => Ok(()),
    }
}
