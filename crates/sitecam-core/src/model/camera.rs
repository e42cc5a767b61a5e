// ── Camera domain type ──

use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Observed state of one camera.
///
/// `NoConfig` cameras count toward a site's total but are neither online
/// nor offline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CameraStatus {
    On,
    Off,
    NoConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    /// Display name; falls back to the UUID when the backend sends no name.
    pub name: String,
    pub uuid: Option<String>,
    pub ip: Option<IpAddr>,
    pub status: CameraStatus,
}

impl Camera {
    pub fn is_online(&self) -> bool {
        self.status == CameraStatus::On
    }

    pub fn is_offline(&self) -> bool {
        self.status == CameraStatus::Off
    }
}
