//! Unified error types for the pharos core library.
//!
//! Each module exposes its own error type ([`FieldError`],
//! [`ConfigError`]); [`PharosError`] unifies them for callers that work
//! across modules. Note that "not an iBeacon" is not an error anywhere in
//! this crate — decoding returns an empty result for such advertisements.
//!
//! # Example
//!
//! ```rust
//! use pharos_core::error::Result;
//! use pharos_core::PharosConfig;
//!
//! fn registry_size() -> Result<usize> {
//!     let config = PharosConfig::default();
//!     Ok(config.vendor_registry()?.len())
//! }
//! # assert!(registry_size().is_ok());
//! ```

use thiserror::Error;

use crate::config::ConfigError;
use crate::fields::FieldError;

/// The unified error type for all pharos operations.
#[derive(Debug, Error)]
pub enum PharosError {
    /// A fixed-offset read fell outside its buffer.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Configuration could not be loaded, saved, or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A specialized [`Result`] type for pharos operations.
pub type Result<T> = std::result::Result<T, PharosError>;

impl PharosError {
    /// Returns `true` if this error came from field extraction.
    ///
    /// Such errors indicate an offset-arithmetic bug in a caller, never
    /// bad input: the decoder length-gates payloads before extracting.
    #[inline]
    #[must_use]
    pub const fn is_field_error(&self) -> bool {
        matches!(self, Self::Field(_))
    }

    /// Returns `true` if this error is related to configuration.
    #[inline]
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_classification() {
        let err: PharosError = FieldError::OutOfBounds {
            offset: 20,
            width: 2,
            len: 21,
        }
        .into();
        assert!(err.is_field_error());
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_config_error_classification() {
        let err: PharosError = ConfigError::InvalidUuid("nope".to_owned()).into();
        assert!(err.is_config_error());
        assert!(!err.is_field_error());
    }

    #[test]
    fn test_display_is_transparent() {
        let err: PharosError = ConfigError::InvalidUuid("nope".to_owned()).into();
        assert_eq!(err.to_string(), "invalid beacon UUID 'nope' in vendor entry");
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<PharosError>();
        assert_sync::<PharosError>();
    }
}
