// ── Online/offline proportion bar ──
//
// Two adjacent percentages that always add up to exactly 100.0 at one
// decimal. The green side is rounded once and the red side is its
// complement, both carried as integer tenths so no float drift can creep
// into the sum.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::aggregate::SiteCounts;

const FULL: u16 = 1000;

/// A green/red split in tenths of a percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProportionBar {
    green_tenths: u16,
}

impl ProportionBar {
    /// Split `online` vs `offline`. Negative or non-finite inputs count as
    /// zero, and `(0, 0)` renders fully green.
    pub fn new(online: f64, offline: f64) -> Self {
        let online = sanitize(online);
        let offline = sanitize(offline);
        let largest = online.max(offline);
        if largest <= 0.0 {
            return Self { green_tenths: FULL };
        }

        let (online, offline) = if (online + offline).is_finite() {
            (online, offline)
        } else {
            // huge inputs: scale so the sum stays finite
            (online / largest, offline / largest)
        };
        let tenths = (online / (online + offline) * f64::from(FULL)).round();
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::as_conversions
        )]
        let green_tenths = tenths.clamp(0.0, f64::from(FULL)) as u16;
        Self { green_tenths }
    }

    pub fn from_counts(counts: &SiteCounts) -> Self {
        Self::new(f64::from(counts.online), f64::from(counts.offline))
    }

    pub fn green_tenths(&self) -> u16 {
        self.green_tenths
    }

    pub fn red_tenths(&self) -> u16 {
        FULL - self.green_tenths
    }

    /// Green share in percent (one decimal of precision).
    pub fn green(&self) -> f64 {
        f64::from(self.green_tenths) / 10.0
    }

    /// Red share in percent, always `100.0 - green`.
    pub fn red(&self) -> f64 {
        f64::from(self.red_tenths()) / 10.0
    }

    pub fn green_label(&self) -> String {
        format_tenths(self.green_tenths)
    }

    pub fn red_label(&self) -> String {
        format_tenths(self.red_tenths())
    }
}

impl fmt::Display for ProportionBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% / {}%", self.green_label(), self.red_label())
    }
}

/// Serialized as the two percentages, e.g. `{"green":66.7,"red":33.3}`.
impl Serialize for ProportionBar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ProportionBar", 2)?;
        state.serialize_field("green", &self.green())?;
        state.serialize_field("red", &self.red())?;
        state.end()
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn format_tenths(tenths: u16) -> String {
    format!("{}.{}", tenths / 10, tenths % 10)
}
