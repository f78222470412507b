//! Vendor identification for known beacon UUIDs.
//!
//! Consumer beacon products ship with a fixed proximity UUID, so the UUID
//! alone identifies the vendor. The built-in table covers the products
//! the scanner is usually pointed at; everything else reports as
//! [`UNKNOWN_VENDOR`].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use uuid::{uuid, Uuid};

/// Name reported for UUIDs absent from every table.
pub const UNKNOWN_VENDOR: &str = "UnknownBeacon";

/// UUIDs with a known vendor assignment.
const BUILTIN: [(Uuid, &str); 3] = [
    (uuid!("b9407f30-f5f8-466e-aff9-25556b57fe6e"), "MAMORIO"),
    (uuid!("95f428b1-4a3a-4e39-b086-21bff38deb6d"), "Virtual iBeacon"),
    (uuid!("8a8853f5-0aa6-46e1-b6f4-9c03e9d1f13c"), "Beacon Simulator"),
];

/// Built-in lookup table, initialized once and never mutated.
static VENDOR_TABLE: Lazy<HashMap<Uuid, &'static str>> =
    Lazy::new(|| BUILTIN.into_iter().collect());

/// Look up the vendor name for a beacon UUID.
///
/// UUIDs compare by value, so the lookup is insensitive to the case of
/// whatever textual form the UUID was parsed from.
#[must_use]
pub fn vendor_name(uuid: &Uuid) -> &'static str {
    VENDOR_TABLE.get(uuid).copied().unwrap_or(UNKNOWN_VENDOR)
}

/// An immutable vendor table extended with caller-supplied entries.
///
/// The built-in assignments always apply; extra entries take precedence
/// when they name the same UUID. A registry never changes after
/// construction, so it can be shared across threads without locking.
#[derive(Debug, Clone)]
pub struct VendorRegistry {
    entries: HashMap<Uuid, String>,
}

impl VendorRegistry {
    /// Registry holding only the built-in assignments.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .into_iter()
                .map(|(uuid, name)| (uuid, name.to_owned()))
                .collect(),
        }
    }

    /// Registry with `extra` assignments layered over the built-ins.
    #[must_use]
    pub fn with_entries<I>(extra: I) -> Self
    where
        I: IntoIterator<Item = (Uuid, String)>,
    {
        let mut registry = Self::builtin();
        registry.entries.extend(extra);
        registry
    }

    /// Look up the vendor name for a beacon UUID.
    #[must_use]
    pub fn vendor_name(&self, uuid: &Uuid) -> &str {
        self.entries.get(uuid).map_or(UNKNOWN_VENDOR, String::as_str)
    }

    /// Number of assignments, built-ins included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no assignments at all.
    ///
    /// Always `false` for registries built through this module, which
    /// start from the built-in table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VendorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
