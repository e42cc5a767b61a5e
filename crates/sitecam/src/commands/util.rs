//! Shared helpers for command handlers.

use sitecam_core::{CompanyFilter, CompanyId, FilterSpec, Monitor, StatusFilter};

use crate::cli::ViewArgs;
use crate::error::CliError;

/// Company filter from the resolved config (`--company` or profile).
pub fn company_filter(monitor: &Monitor) -> CompanyFilter {
    monitor
        .config()
        .company
        .clone()
        .map_or(CompanyFilter::All, CompanyFilter::Only)
}

/// Filter spec for a ranked list. Selecting a company resets the status
/// filter, so `--offline-only` and `--severity` are applied afterwards.
pub fn filter_spec(monitor: &Monitor, view: &ViewArgs) -> FilterSpec {
    let mut spec = FilterSpec::default();
    spec.select_company(company_filter(monitor));
    if view.offline_only {
        spec.status = StatusFilter::OfflineOnly;
    }
    spec.severity = view.severity.map(Into::into);
    spec
}

/// Reports need a concrete company.
pub fn require_company(monitor: &Monitor) -> Result<CompanyId, CliError> {
    monitor.config().company.clone().ok_or(CliError::NoCompany)
}

/// Truncate to `limit` rows when one was given.
pub fn apply_limit<T>(rows: &[T], limit: Option<usize>) -> &[T] {
    match limit {
        Some(n) if n < rows.len() => &rows[..n],
        _ => rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_truncates_only_when_shorter() {
        let rows = [1, 2, 3];
        assert_eq!(apply_limit(&rows, Some(2)), &[1, 2]);
        assert_eq!(apply_limit(&rows, Some(10)), &[1, 2, 3]);
        assert_eq!(apply_limit(&rows, None), &[1, 2, 3]);
    }
}
