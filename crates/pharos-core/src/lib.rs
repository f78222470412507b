//! # pharos-core
//!
//! Core decoding and classification for iBeacon advertisement payloads.
//!
//! This crate provides:
//! - Fixed-offset field extraction from raw manufacturer data
//! - Decoding of advertisement events into beacon records
//! - Vendor identification, proximity buckets, and distance estimation
//! - Configuration for caller-supplied vendor tables
//!
//! ## Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`fields`] - Fixed-offset byte field extraction with bounds checking
//! - [`decode`] - iBeacon frame layout and advertisement decoding
//! - [`classify`] - Proximity buckets and the distance-accuracy estimate
//! - [`vendor`] - Vendor-name lookup tables for known beacon UUIDs
//! - [`config`] - Vendor-table configuration file handling
//! - [`report`] - Derived per-sighting view for display layers
//! - [`types`] - Raw advertisement input types
//! - [`error`] - Unified error types for the crate
//!
//! Every operation is a deterministic, synchronous function of its
//! inputs: no shared mutable state, no locking, safe to call from any
//! number of threads at once. Scanning radios, rendering records, and
//! persisting anything are the caller's concern.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

pub mod classify;
pub mod config;
pub mod decode;
pub mod error;
pub mod fields;
pub mod report;
pub mod types;
pub mod vendor;

// Re-export primary types for convenience
pub use classify::{accuracy, proximity, Proximity};
pub use config::{is_valid_uuid_format, ConfigError, ConfigResult, PharosConfig, VendorEntry};
pub use decode::{decode, BeaconRecord, COMPANY_ID_BYTES, MIN_BEACON_BYTES};
pub use error::{PharosError, Result};
pub use fields::{FieldError, FieldResult};
pub use report::BeaconReport;
pub use types::{BluetoothAddress, RawAdvertisement};
pub use vendor::{vendor_name, VendorRegistry, UNKNOWN_VENDOR};
