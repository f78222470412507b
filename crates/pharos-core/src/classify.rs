//! Proximity classification and distance estimation.
//!
//! Both classifiers are pure functions of signal-strength values copied
//! out of a decoded record. They hold no state and can run concurrently
//! without coordination.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::decode::BeaconRecord;
use crate::vendor;

/// Coarse distance bucket derived from received signal strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Proximity {
    /// No signal data was available for the event.
    Unknown,
    /// Stronger than -40 dBm: effectively at the beacon.
    Immediate,
    /// Within roughly one meter.
    Near,
    /// Beyond roughly one meter.
    Far,
}

impl Proximity {
    /// Lowercase label for display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Immediate => "immediate",
            Self::Near => "near",
            Self::Far => "far",
        }
    }
}

impl fmt::Display for Proximity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify received signal strength into a proximity bucket.
///
/// An RSSI of `0` means the radio reported no signal data. The -40 and
/// -59 dBm thresholds themselves fall into [`Proximity::Near`] and
/// [`Proximity::Far`] respectively.
#[must_use]
pub const fn proximity(rssi: i16) -> Proximity {
    if rssi == 0 {
        Proximity::Unknown
    } else if rssi > -40 {
        Proximity::Immediate
    } else if rssi > -59 {
        Proximity::Near
    } else {
        Proximity::Far
    }
}

/// Estimate distance from measured power and received signal strength.
///
/// Returns `-1.0` when no signal data is available (`rssi == 0`).
/// Otherwise applies a power-curve fit over `rssi / measured_power`.
/// The result is a unitless attenuation figure, not meters with error
/// bounds; callers rely on it being reproducible, not physically exact.
#[must_use]
pub fn accuracy(measured_power: i8, rssi: i16) -> f64 {
    if rssi == 0 {
        return -1.0;
    }

    let ratio = f64::from(rssi) / f64::from(measured_power);
    if ratio < 1.0 {
        ratio.powf(10.0)
    } else {
        // The branches do not meet at ratio == 1 (left limit 1.0, right
        // value 1.01076); the step is part of the published curve and is
        // kept as is.
        0.89976 * ratio.powf(7.7095) + 0.111
    }
}

impl BeaconRecord {
    /// Proximity bucket for this record's RSSI.
    #[must_use]
    pub const fn proximity(&self) -> Proximity {
        proximity(self.rssi)
    }

    /// Distance estimate for this record.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        accuracy(self.measured_power, self.rssi)
    }

    /// Vendor name registered for this record's UUID.
    #[must_use]
    pub fn vendor(&self) -> &'static str {
        vendor::vendor_name(&self.uuid)
    }
}
