// ── Site classification ──
//
// Two independent scales per site. The severity bucket follows the offline
// *percentage* and drives ranking; the color tier follows the absolute
// offline *count* and drives the row accent. They must not be merged: a
// 4-camera site with 1 offline is critical but only green-tier.

use serde::Serialize;
use strum::{Display, EnumString};

use crate::aggregate::SiteCounts;

/// How degraded a site is, by offline ratio.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SeverityBucket {
    Ok,
    Warning,
    High,
    Critical,
}

/// Row accent, by absolute offline count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OfflineTier {
    /// No camera offline (gray).
    Neutral,
    Green,
    Yellow,
    Orange,
    Red,
}

/// Bucket by offline percentage: >= 15 critical, >= 10 high, >= 5 warning.
/// An empty site is ok.
pub fn severity(counts: &SiteCounts) -> SeverityBucket {
    if counts.total == 0 {
        return SeverityBucket::Ok;
    }
    // offline / total >= p / 100, compared exactly in integers
    let offline = u64::from(counts.offline) * 100;
    let total = u64::from(counts.total);
    if offline >= 15 * total {
        SeverityBucket::Critical
    } else if offline >= 10 * total {
        SeverityBucket::High
    } else if offline >= 5 * total {
        SeverityBucket::Warning
    } else {
        SeverityBucket::Ok
    }
}

/// Tier by offline count: >= 15 red, >= 8 orange, >= 4 yellow, > 0 green.
pub fn offline_tier(offline: u32) -> OfflineTier {
    match offline {
        0 => OfflineTier::Neutral,
        1..=3 => OfflineTier::Green,
        4..=7 => OfflineTier::Yellow,
        8..=14 => OfflineTier::Orange,
        _ => OfflineTier::Red,
    }
}
