// Monitoring backend response types
//
// Wire models for the status, report, and company endpoints. Field names
// follow the backend (Portuguese) verbatim; `sitecam-core` converts them
// into domain types. Fields use `#[serde(default)]` liberally because the
// backend has two generations of status payloads with different shapes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── Status ───────────────────────────────────────────────────────────

/// Response of the global status endpoint: site name -> site entry.
pub type GlobalStatus = BTreeMap<String, SiteEntry>;

/// One site in the global status payload.
///
/// Older backends return the camera list directly; newer ones wrap it
/// with a `metadata` object carrying the owning company:
/// ```json
/// { "Site A": [ { "nome": "cam1", "status": "ON" } ],
///   "Site B": { "cameras": [ ... ], "metadata": { "empresa_id": 3 } } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SiteEntry {
    Cameras(Vec<RawCamera>),
    Wrapped {
        cameras: Vec<RawCamera>,
        #[serde(default)]
        metadata: Option<RawMetadata>,
    },
}

impl SiteEntry {
    /// Split into the camera list and optional metadata, regardless of shape.
    pub fn into_parts(self) -> (Vec<RawCamera>, Option<RawMetadata>) {
        match self {
            Self::Cameras(cameras) => (cameras, None),
            Self::Wrapped { cameras, metadata } => (cameras, metadata),
        }
    }
}

/// A single camera state as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCamera {
    #[serde(default, alias = "name")]
    pub nome: Option<String>,
    #[serde(default)]
    pub uuid_camera: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    /// `"ON"`, `"OFF"`, or `"NO_CONFIG"`.
    pub status: String,
    /// Catch-all for fields this client doesn't model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Site metadata attached by newer backends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMetadata {
    #[serde(default, alias = "empresa", alias = "companyId")]
    pub empresa_id: Option<CompanyRef>,
    #[serde(default)]
    pub empresa_nome: Option<String>,
    /// Monitoring code of the client unit.
    #[serde(default)]
    pub cliente: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Company identifiers show up as numbers or strings depending on the
/// backend generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompanyRef {
    Number(i64),
    Text(String),
}

impl fmt::Display for CompanyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

// ── Companies ────────────────────────────────────────────────────────

/// Company directory entry from `empresas`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCompany {
    pub id: i64,
    pub nome: String,
    #[serde(default)]
    pub total_clientes: Option<u32>,
    #[serde(default)]
    pub total_cameras: Option<u32>,
}

// ── Reports ──────────────────────────────────────────────────────────

/// Uptime-per-site report from `reports/sla`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSlaReport {
    pub empresa_id: i64,
    #[serde(default)]
    pub empresa_nome: String,
    pub periodo_dias: u32,
    #[serde(default)]
    pub unidades: Vec<RawSlaUnit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSlaUnit {
    pub cliente_nome: String,
    #[serde(default)]
    pub codigo_moni: String,
    #[serde(default)]
    pub total_cameras: u32,
    #[serde(default)]
    pub eventos_offline: u32,
    #[serde(default)]
    pub eventos_online: u32,
    pub uptime_percent: f64,
}

/// Failure-count-per-camera ranking from `reports/failures`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFailureReport {
    pub empresa_id: i64,
    #[serde(default)]
    pub empresa_nome: String,
    pub periodo_dias: u32,
    #[serde(default)]
    pub ranking: Vec<RawFailureEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFailureEntry {
    pub camera_nome: String,
    #[serde(default)]
    pub uuid_camera: String,
    pub cliente_nome: String,
    #[serde(default)]
    pub dispositivo_ip: Option<String>,
    pub total_falhas: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn site_entry_accepts_flat_list() {
        let entry: SiteEntry =
            serde_json::from_value(json!([{ "nome": "cam1", "status": "ON" }])).unwrap();
        let (cameras, metadata) = entry.into_parts();
        assert_eq!(cameras.len(), 1);
        assert!(metadata.is_none());
    }

    #[test]
    fn site_entry_accepts_wrapped_object() {
        let entry: SiteEntry = serde_json::from_value(json!({
            "cameras": [{ "name": "cam1", "status": "OFF", "ip": "10.0.0.2" }],
            "metadata": { "empresa": "7", "empresa_nome": "Acme" }
        }))
        .unwrap();
        let (cameras, metadata) = entry.into_parts();
        assert_eq!(cameras[0].nome.as_deref(), Some("cam1"));
        assert_eq!(cameras[0].ip.as_deref(), Some("10.0.0.2"));
        let metadata = metadata.unwrap();
        assert_eq!(metadata.empresa_id, Some(CompanyRef::Text("7".into())));
        assert_eq!(metadata.empresa_nome.as_deref(), Some("Acme"));
    }

    #[test]
    fn wrapped_object_without_metadata() {
        let entry: SiteEntry = serde_json::from_value(json!({ "cameras": [] })).unwrap();
        let (cameras, metadata) = entry.into_parts();
        assert!(cameras.is_empty());
        assert!(metadata.is_none());
    }

    #[test]
    fn numeric_company_id_displays_plainly() {
        let meta: RawMetadata = serde_json::from_value(json!({ "empresa_id": 12 })).unwrap();
        assert_eq!(meta.empresa_id.unwrap().to_string(), "12");
    }

    #[test]
    fn scalar_site_entry_is_rejected() {
        assert!(serde_json::from_value::<SiteEntry>(json!("nope")).is_err());
    }
}
