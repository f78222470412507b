//! iBeacon frame decoding.
//!
//! The manufacturer-data section of an iBeacon advertisement is a fixed
//! 25-byte frame. Platforms strip the leading company identifier before
//! handing the payload over, so all offsets here are relative to the start
//! of the remaining bytes:
//!
//! ```text
//! Byte(s)  Field
//! -------  -----
//! 0-1      beacon code (present, not interpreted)
//! 2-17     proximity UUID
//! 18-19    major (16-bit unsigned, big endian)
//! 20-21    minor (16-bit unsigned, big endian)
//! 22       measured power (signed 8-bit, calibrated RSSI at 1 m)
//! 23       reserved for the manufacturer (optional)
//! ```
//!
//! Major and minor are always decoded big-endian, independent of the host
//! architecture.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::fields;
use crate::types::{BluetoothAddress, RawAdvertisement};

/// Length of a full iBeacon manufacturer-data frame, company id included.
pub const MIN_BEACON_BYTES: usize = 25;

/// The company identifier is surfaced separately by the platform, shifting
/// every payload offset down by this amount.
pub const COMPANY_ID_BYTES: usize = 2;

/// Minimum payload length: the full frame minus the company-id header.
const MIN_PAYLOAD_BYTES: usize = MIN_BEACON_BYTES - COMPANY_ID_BYTES;

const UUID_OFFSET: usize = 2;
const MAJOR_OFFSET: usize = 18;
const MINOR_OFFSET: usize = 20;
const MEASURED_POWER_OFFSET: usize = 22;
const RESERVED_OFFSET: usize = 23;

/// A decoded iBeacon advertisement.
///
/// Records exist only for payloads that meet the minimum frame length;
/// decoding never yields a partially populated record. All fields are
/// plain values copied out of the originating event, so a record can
/// outlive its event and cross threads freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BeaconRecord {
    /// 16-byte beacon identifier.
    pub uuid: Uuid,

    /// Major group number.
    #[schema(example = 1)]
    pub major: u16,

    /// Minor group number.
    #[schema(example = 2)]
    pub minor: u16,

    /// Calibrated RSSI at one meter, in dBm.
    #[schema(example = -59)]
    pub measured_power: i8,

    /// Extra byte some vendors append past the standard frame.
    pub manufacturer_reserved: Option<u8>,

    /// Received signal strength of the originating event, in dBm.
    #[schema(example = -65)]
    pub rssi: i16,

    /// Company identifier of the manufacturer-data section.
    #[schema(example = 0x004C)]
    pub company_id: u16,

    /// Hardware address of the advertising device.
    pub address: BluetoothAddress,

    /// Advertised device name, when broadcast.
    pub local_name: Option<String>,

    /// When the advertisement was observed.
    pub observed_at: DateTime<Utc>,
}

impl BeaconRecord {
    /// Canonical hyphenated uppercase form of the beacon identifier,
    /// e.g. `B9407F30-F5F8-466E-AFF9-25556B57FE6E`.
    #[must_use]
    pub fn uuid_canonical(&self) -> String {
        self.uuid
            .hyphenated()
            .encode_upper(&mut Uuid::encode_buffer())
            .to_owned()
    }
}

/// Decode one advertisement event into a beacon record.
///
/// Returns `None` when the event does not carry an iBeacon frame: an
/// absent or empty manufacturer payload, or one shorter than the minimum
/// frame length. That is the only rejection — payloads long enough are
/// decoded mechanically, with no structural validation of their content.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use pharos_core::{decode, BluetoothAddress, RawAdvertisement};
///
/// let mut payload = vec![0x02, 0x15];
/// payload.extend_from_slice(&[
///     0xB9, 0x40, 0x7F, 0x30, 0xF5, 0xF8, 0x46, 0x6E,
///     0xAF, 0xF9, 0x25, 0x55, 0x6B, 0x57, 0xFE, 0x6E,
/// ]);
/// payload.extend_from_slice(&[0x00, 0x01, 0x00, 0x02, 0xC5]);
///
/// let event = RawAdvertisement {
///     observed_at: Utc::now(),
///     address: BluetoothAddress::new(0xE4B2_F99C_11A0),
///     rssi: -65,
///     company_id: 0x004C,
///     manufacturer_data: payload,
///     local_name: None,
/// };
///
/// let record = decode(&event).expect("a full iBeacon frame");
/// assert_eq!(record.major, 1);
/// assert_eq!(record.minor, 2);
/// assert_eq!(record.measured_power, -59);
/// ```
#[must_use]
pub fn decode(event: &RawAdvertisement) -> Option<BeaconRecord> {
    let payload = event.manufacturer_data.as_slice();
    if payload.len() < MIN_PAYLOAD_BYTES {
        trace!(
            len = payload.len(),
            address = %event.address,
            "payload shorter than an iBeacon frame"
        );
        return None;
    }

    // The length gate above covers every fixed-offset read below; a
    // failure here is an offset-arithmetic bug, not bad input.
    let uuid = Uuid::from_bytes(
        fields::array_at(payload, UUID_OFFSET).expect("uuid read is length-gated"),
    );
    let major = fields::u16_be(payload, MAJOR_OFFSET).expect("major read is length-gated");
    let minor = fields::u16_be(payload, MINOR_OFFSET).expect("minor read is length-gated");
    let measured_power =
        fields::i8_at(payload, MEASURED_POWER_OFFSET).expect("measured-power read is length-gated");

    // Present only when the payload runs one byte past the standard frame.
    let manufacturer_reserved = fields::u8_at(payload, RESERVED_OFFSET).ok();

    Some(BeaconRecord {
        uuid,
        major,
        minor,
        measured_power,
        manufacturer_reserved,
        rssi: event.rssi,
        company_id: event.company_id,
        address: event.address,
        local_name: event.local_name.clone(),
        observed_at: event.observed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAMORIO_UUID: [u8; 16] = [
        0xB9, 0x40, 0x7F, 0x30, 0xF5, 0xF8, 0x46, 0x6E, 0xAF, 0xF9, 0x25, 0x55, 0x6B, 0x57, 0xFE,
        0x6E,
    ];

    /// A 23-byte payload: beacon code, MAMORIO UUID, major 1, minor 2,
    /// measured power -59.
    fn sample_payload() -> Vec<u8> {
        let mut payload = vec![0x02, 0x15];
        payload.extend_from_slice(&MAMORIO_UUID);
        payload.extend_from_slice(&[0x00, 0x01, 0x00, 0x02, 0xC5]);
        payload
    }

    fn event_with(payload: Vec<u8>) -> RawAdvertisement {
        RawAdvertisement {
            observed_at: Utc::now(),
            address: BluetoothAddress::new(0xE4B2_F99C_11A0),
            rssi: -65,
            company_id: 0x004C,
            manufacturer_data: payload,
            local_name: None,
        }
    }

    #[test]
    fn test_empty_payload_is_not_a_beacon() {
        assert_eq!(decode(&event_with(Vec::new())), None);
    }

    #[test]
    fn test_short_payload_is_not_a_beacon() {
        for len in 1..MIN_PAYLOAD_BYTES {
            let payload = sample_payload()[..len].to_vec();
            assert_eq!(decode(&event_with(payload)), None, "length {len}");
        }
    }

    #[test]
    fn test_minimum_payload_decodes_without_reserved_byte() {
        let record = decode(&event_with(sample_payload())).unwrap();
        assert_eq!(record.uuid, Uuid::from_bytes(MAMORIO_UUID));
        assert_eq!(record.major, 1);
        assert_eq!(record.minor, 2);
        assert_eq!(record.measured_power, -59);
        assert_eq!(record.manufacturer_reserved, None);
    }

    #[test]
    fn test_longer_payload_carries_reserved_byte() {
        let mut payload = sample_payload();
        payload.push(0x7A);
        let record = decode(&event_with(payload)).unwrap();
        assert_eq!(record.manufacturer_reserved, Some(0x7A));
    }

    #[test]
    fn test_event_fields_are_copied_through() {
        let mut event = event_with(sample_payload());
        event.local_name = Some("office tag".to_owned());
        let record = decode(&event).unwrap();
        assert_eq!(record.rssi, -65);
        assert_eq!(record.company_id, 0x004C);
        assert_eq!(record.address, event.address);
        assert_eq!(record.local_name.as_deref(), Some("office tag"));
        assert_eq!(record.observed_at, event.observed_at);
    }

    #[test]
    fn test_major_minor_are_big_endian() {
        let mut payload = sample_payload();
        payload[MAJOR_OFFSET] = 0x12;
        payload[MAJOR_OFFSET + 1] = 0x34;
        payload[MINOR_OFFSET] = 0xAB;
        payload[MINOR_OFFSET + 1] = 0xCD;
        let record = decode(&event_with(payload)).unwrap();
        assert_eq!(record.major, 0x1234);
        assert_eq!(record.minor, 0xABCD);
    }

    #[test]
    fn test_uuid_bytes_do_not_bleed_into_other_fields() {
        let baseline = decode(&event_with(sample_payload())).unwrap();
        for offset in UUID_OFFSET..UUID_OFFSET + 16 {
            let mut payload = sample_payload();
            payload[offset] ^= 0xFF;
            let record = decode(&event_with(payload)).unwrap();
            assert_ne!(record.uuid, baseline.uuid, "offset {offset}");
            assert_eq!(record.major, baseline.major, "offset {offset}");
            assert_eq!(record.minor, baseline.minor, "offset {offset}");
            assert_eq!(
                record.measured_power, baseline.measured_power,
                "offset {offset}"
            );
        }
    }

    #[test]
    fn test_uuid_formatting_is_stable() {
        let first = decode(&event_with(sample_payload())).unwrap();
        let second = decode(&event_with(sample_payload())).unwrap();
        assert_eq!(first.uuid_canonical(), second.uuid_canonical());
        assert_eq!(
            first.uuid_canonical(),
            "B9407F30-F5F8-466E-AFF9-25556B57FE6E"
        );
    }
}
