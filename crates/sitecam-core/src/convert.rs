// ── API-to-domain type conversions ──
//
// Bridges raw `sitecam_api` response types into canonical `sitecam_core::model`
// domain types. The flat-or-wrapped site payload is normalized here, once,
// so nothing downstream ever sees the two shapes.

use std::net::IpAddr;

use sitecam_api::{
    CompanyRef, GlobalStatus, RawCamera, RawCompany, RawFailureEntry, RawFailureReport,
    RawMetadata, RawSlaReport, RawSlaUnit, SiteEntry,
};

use crate::model::{
    Camera, CameraStatus, Company, CompanyId, FailureEntry, FailureReport, Site, SlaReport,
    SlaUnit,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse a status tag. Anything other than ON/OFF is treated as unconfigured.
fn parse_status(raw: &str) -> CameraStatus {
    raw.trim()
        .parse::<CameraStatus>()
        .unwrap_or(CameraStatus::NoConfig)
}

/// Parse an optional IP string, silently dropping unparseable values.
fn parse_ip(raw: Option<&str>) -> Option<IpAddr> {
    raw.and_then(|s| s.trim().parse().ok())
}

/// Drop empty strings the backend uses in place of null.
fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

// ── Status ─────────────────────────────────────────────────────────

impl From<RawCamera> for Camera {
    fn from(raw: RawCamera) -> Self {
        let uuid = non_empty(raw.uuid_camera);
        let ip = parse_ip(raw.ip.as_deref());
        let name = non_empty(raw.nome)
            .or_else(|| uuid.clone())
            .or_else(|| ip.map(|ip| ip.to_string()))
            .unwrap_or_else(|| "(unnamed)".into());

        Camera {
            name,
            uuid,
            ip,
            status: parse_status(&raw.status),
        }
    }
}

impl From<CompanyRef> for CompanyId {
    fn from(raw: CompanyRef) -> Self {
        match raw {
            CompanyRef::Number(n) => CompanyId::from(n),
            CompanyRef::Text(s) => CompanyId::new(s),
        }
    }
}

/// Build a site from its per-site camera list (no metadata available).
pub fn site_from_cameras(name: impl Into<String>, cameras: Vec<RawCamera>) -> Site {
    Site::new(name, cameras.into_iter().map(Camera::from).collect())
}

/// Build a site from one global-status entry, whichever shape it has.
pub fn site_from_entry(name: impl Into<String>, entry: SiteEntry) -> Site {
    let (cameras, metadata) = entry.into_parts();
    let mut site = site_from_cameras(name, cameras);

    if let Some(RawMetadata {
        empresa_id,
        empresa_nome,
        cliente,
        ..
    }) = metadata
    {
        site.company = empresa_id
            .map(CompanyId::from)
            .filter(|id| !id.as_str().is_empty());
        site.company_name = non_empty(empresa_nome);
        site.code = non_empty(cliente);
    }
    site
}

/// Normalize a global-status payload into domain sites.
pub fn sites_from_global(status: GlobalStatus) -> Vec<Site> {
    status
        .into_iter()
        .map(|(name, entry)| site_from_entry(name, entry))
        .collect()
}

// ── Companies ──────────────────────────────────────────────────────

impl From<RawCompany> for Company {
    fn from(raw: RawCompany) -> Self {
        Company {
            id: CompanyId::from(raw.id),
            name: raw.nome,
            site_count: raw.total_clientes,
            camera_count: raw.total_cameras,
        }
    }
}

// ── Reports ────────────────────────────────────────────────────────

impl From<RawSlaUnit> for SlaUnit {
    fn from(raw: RawSlaUnit) -> Self {
        SlaUnit {
            site_name: raw.cliente_nome,
            code: raw.codigo_moni,
            camera_count: raw.total_cameras,
            offline_events: raw.eventos_offline,
            online_events: raw.eventos_online,
            uptime_percent: raw.uptime_percent,
        }
    }
}

impl From<RawSlaReport> for SlaReport {
    fn from(raw: RawSlaReport) -> Self {
        SlaReport {
            company: CompanyId::from(raw.empresa_id),
            company_name: raw.empresa_nome,
            period_days: raw.periodo_dias,
            units: raw.unidades.into_iter().map(SlaUnit::from).collect(),
        }
    }
}

impl From<RawFailureEntry> for FailureEntry {
    fn from(raw: RawFailureEntry) -> Self {
        FailureEntry {
            camera_name: raw.camera_nome,
            camera_uuid: raw.uuid_camera,
            site_name: raw.cliente_nome,
            ip: non_empty(raw.dispositivo_ip),
            failures: raw.total_falhas,
        }
    }
}

impl From<RawFailureReport> for FailureReport {
    fn from(raw: RawFailureReport) -> Self {
        FailureReport {
            company: CompanyId::from(raw.empresa_id),
            company_name: raw.empresa_nome,
            period_days: raw.periodo_dias,
            entries: raw.ranking.into_iter().map(FailureEntry::from).collect(),
        }
    }
}
