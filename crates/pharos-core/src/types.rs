//! Shared input types for advertisement decoding.
//!
//! A Bluetooth scanner owns discovery and event delivery; this crate only
//! consumes the raw events it hands over. [`RawAdvertisement`] is that
//! hand-over contract.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A 48-bit Bluetooth hardware address.
///
/// Displayed as uppercase hexadecimal without separators, the same form
/// Windows and BlueZ report for advertisement events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[schema(value_type = String, example = "E4B2F99C11A0")]
pub struct BluetoothAddress(u64);

impl BluetoothAddress {
    /// Create an address from its 48-bit integer form.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw integer form.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for BluetoothAddress {
    fn from(raw: u64) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for BluetoothAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

impl FromStr for BluetoothAddress {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str_radix(s, 16).map(Self)
    }
}

impl Serialize for BluetoothAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BluetoothAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// One raw advertisement event as supplied by a Bluetooth scanner.
///
/// The manufacturer payload excludes the 2-byte company identifier, which
/// platforms strip off and surface separately as `company_id`. An `rssi`
/// of `0` means the radio reported no signal data for the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RawAdvertisement {
    /// When the advertisement was observed.
    pub observed_at: DateTime<Utc>,

    /// Hardware address of the advertising device.
    pub address: BluetoothAddress,

    /// Received signal strength in dBm; `0` means "not available".
    #[schema(example = -65)]
    pub rssi: i16,

    /// Company identifier from the manufacturer-data section.
    #[schema(example = 0x004C)]
    pub company_id: u16,

    /// Manufacturer-specific bytes, without the company-id header.
    /// Empty when the advertisement carried no manufacturer data.
    pub manufacturer_data: Vec<u8>,

    /// Advertised device name, when broadcast.
    pub local_name: Option<String>,
}
