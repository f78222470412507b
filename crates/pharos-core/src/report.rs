//! Derived view of a decoded advertisement.
//!
//! Display layers want one value per sighting: the decoded fields plus
//! everything the classifiers derive from them. [`BeaconReport`] bundles
//! those typed values; how they are rendered or shipped over the wire
//! stays the caller's choice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::classify::Proximity;
use crate::decode::BeaconRecord;
use crate::types::BluetoothAddress;

/// Fully derived view of one decoded beacon sighting.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BeaconReport {
    /// Vendor name resolved from the UUID.
    #[schema(example = "MAMORIO")]
    pub vendor: String,

    /// Canonical hyphenated uppercase UUID.
    #[schema(example = "B9407F30-F5F8-466E-AFF9-25556B57FE6E")]
    pub uuid: String,

    /// Major group number.
    #[schema(example = 1)]
    pub major: u16,

    /// Minor group number.
    #[schema(example = 2)]
    pub minor: u16,

    /// Calibrated RSSI at one meter, in dBm.
    #[schema(example = -59)]
    pub measured_power: i8,

    /// Received signal strength, in dBm.
    #[schema(example = -65)]
    pub rssi: i16,

    /// Distance estimate derived from measured power and RSSI.
    pub accuracy: f64,

    /// Proximity bucket derived from RSSI.
    pub proximity: Proximity,

    /// Hardware address of the advertising device.
    pub address: BluetoothAddress,

    /// When the advertisement was observed.
    pub observed_at: DateTime<Utc>,
}

impl BeaconReport {
    /// Build the derived view of a decoded record.
    #[must_use]
    pub fn from_record(record: &BeaconRecord) -> Self {
        Self {
            vendor: record.vendor().to_owned(),
            uuid: record.uuid_canonical(),
            major: record.major,
            minor: record.minor,
            measured_power: record.measured_power,
            rssi: record.rssi,
            accuracy: record.accuracy(),
            proximity: record.proximity(),
            address: record.address,
            observed_at: record.observed_at,
        }
    }
}

impl From<&BeaconRecord> for BeaconReport {
    fn from(record: &BeaconRecord) -> Self {
        Self::from_record(record)
    }
}
