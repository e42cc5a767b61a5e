//! Companies command: the directory that feeds `--company`.

use tabled::Tabled;

use sitecam_core::{Company, Monitor};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct CompanyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Sites")]
    sites: String,
    #[tabled(rename = "Cameras")]
    cameras: String,
}

impl From<&Company> for CompanyRow {
    fn from(c: &Company) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            sites: c.site_count.map(|n| n.to_string()).unwrap_or_default(),
            cameras: c.camera_count.map(|n| n.to_string()).unwrap_or_default(),
        }
    }
}

pub async fn handle(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let mut companies = monitor.companies().await?;
    companies.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    let out = output::render_list(
        global.output,
        &companies,
        |c| CompanyRow::from(c),
        |c| c.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
