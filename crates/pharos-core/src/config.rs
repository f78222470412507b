//! Application configuration management.
//!
//! Deployments that track fleets of custom-programmed beacons can extend
//! the vendor table through a small TOML file:
//!
//! ```toml
//! [[vendors]]
//! uuid = "11111111-2222-3333-4444-555555555555"
//! name = "Office Fleet"
//! ```
//!
//! The file is optional; a missing file yields the default (empty)
//! configuration and the built-in vendor table stands alone.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::vendor::VendorRegistry;

/// Errors raised while loading, saving, or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration directory could not be determined.
    #[error("cannot determine configuration directory")]
    NoConfigDir,

    /// The file could not be read or written.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path of the file involved.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A vendor entry carries a malformed UUID.
    #[error("invalid beacon UUID '{0}' in vendor entry")]
    InvalidUuid(String),
}

/// A specialized [`Result`] type for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A single vendor assignment from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorEntry {
    /// Beacon UUID in hyphenated hexadecimal form, any case.
    pub uuid: String,

    /// Vendor name to report for that UUID.
    pub name: String,
}

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PharosConfig {
    /// Extra vendor assignments layered over the built-in table.
    #[serde(default)]
    pub vendors: Vec<VendorEntry>,
}

static UUID_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("UUID pattern compiles")
});

/// Whether `value` is a hyphenated hexadecimal UUID, in any case.
#[must_use]
pub fn is_valid_uuid_format(value: &str) -> bool {
    UUID_FORMAT.is_match(value)
}

impl PharosConfig {
    /// Load configuration from the default path.
    ///
    /// A missing file is not an error; it yields the default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined or the file
    /// cannot be read, parsed, or validated.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        debug!(
            path = %path.display(),
            vendors = config.vendors.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Save configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined or the file
    /// cannot be written.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(io_err)?;
        Ok(())
    }

    /// Check every vendor entry for a well-formed UUID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUuid`] naming the first malformed
    /// entry.
    pub fn validate(&self) -> ConfigResult<()> {
        for entry in &self.vendors {
            if !is_valid_uuid_format(&entry.uuid) {
                return Err(ConfigError::InvalidUuid(entry.uuid.clone()));
            }
        }
        Ok(())
    }

    /// Build a vendor registry from the built-in table plus the entries
    /// configured here.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUuid`] if an entry's UUID does not
    /// parse.
    pub fn vendor_registry(&self) -> ConfigResult<VendorRegistry> {
        let extra = self
            .vendors
            .iter()
            .map(|entry| {
                Uuid::parse_str(&entry.uuid)
                    .map(|uuid| (uuid, entry.name.clone()))
                    .map_err(|_| ConfigError::InvalidUuid(entry.uuid.clone()))
            })
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(VendorRegistry::with_entries(extra))
    }

    /// Configuration file path for the current platform.
    fn config_path() -> ConfigResult<PathBuf> {
        // On fleet hosts: /etc/pharos/config.toml
        // For development: ~/.config/pharos/config.toml
        #[cfg(target_os = "linux")]
        {
            Ok(PathBuf::from("/etc/pharos/config.toml"))
        }
        #[cfg(not(target_os = "linux"))]
        {
            let dirs = directories::ProjectDirs::from("", "", "pharos")
                .ok_or(ConfigError::NoConfigDir)?;
            Ok(dirs.config_dir().join("config.toml"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_format_accepts_any_case() {
        assert!(is_valid_uuid_format("b9407f30-f5f8-466e-aff9-25556b57fe6e"));
        assert!(is_valid_uuid_format("B9407F30-F5F8-466E-AFF9-25556B57FE6E"));
    }

    #[test]
    fn test_uuid_format_rejects_malformed_values() {
        assert!(!is_valid_uuid_format(""));
        assert!(!is_valid_uuid_format("b9407f30f5f8466eaff925556b57fe6e"));
        assert!(!is_valid_uuid_format("b9407f30-f5f8-466e-aff9-25556b57fe6"));
        assert!(!is_valid_uuid_format("g9407f30-f5f8-466e-aff9-25556b57fe6e"));
    }

    #[test]
    fn test_missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = PharosConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, PharosConfig::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = PharosConfig {
            vendors: vec![VendorEntry {
                uuid: "11111111-2222-3333-4444-555555555555".to_owned(),
                name: "Office Fleet".to_owned(),
            }],
        };
        config.save_to(&path).unwrap();

        let loaded = PharosConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_malformed_uuid_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[[vendors]]\nuuid = \"not-a-uuid\"\nname = \"Broken\"\n",
        )
        .unwrap();

        let err = PharosConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUuid(uuid) if uuid == "not-a-uuid"));
    }

    #[test]
    fn test_load_rejects_unparseable_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "vendors = not toml").unwrap();

        assert!(matches!(
            PharosConfig::load_from(&path).unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn test_registry_from_config_resolves_entries() {
        let config = PharosConfig {
            vendors: vec![VendorEntry {
                uuid: "11111111-2222-3333-4444-555555555555".to_owned(),
                name: "Office Fleet".to_owned(),
            }],
        };
        let registry = config.vendor_registry().unwrap();

        let custom = Uuid::parse_str("11111111-2222-3333-4444-555555555555").unwrap();
        assert_eq!(registry.vendor_name(&custom), "Office Fleet");

        let mamorio = Uuid::parse_str("b9407f30-f5f8-466e-aff9-25556b57fe6e").unwrap();
        assert_eq!(registry.vendor_name(&mamorio), "MAMORIO");
    }
}
