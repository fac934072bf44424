//! # Barillet
//!
//! Core library for building, checking and exporting *barillets*: the
//! ordered lists of 18 themes used to run an improvisation match.
//!
//! ## Features
//!
//! - Typed theme and barillet model with the editor's default template
//! - Duration parsing (`3:00`, `2 fois 3:30`, free-text special durations)
//! - Structural validation that accumulates every error
//! - Aggregate statistics (total time, Mixte/Comparée counts, share of "Libre")
//! - JSON import with distinguishable, user-facing error messages
//! - PDF card grid, JSON, CSV and XLSX export
//! - Pluggable persistence with per-owner and per-document change watches
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use barillet::{BarilletService, Format, Identity, Session};
//! use barillet::io::ExportService;
//! use barillet::storage::MemoryBackend;
//!
//! let service = BarilletService::new(Arc::new(MemoryBackend::new()));
//! let session = Session::signed_in(Identity::new("user-1"));
//! let id = service.create(&session, Default::default())?;
//! let barillet = service.get(&id)?;
//! let artifact = ExportService::new().export(&barillet, Format::Pdf)?;
//! std::fs::write(&artifact.filename, &artifact.bytes)?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod config;
pub mod io;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

pub use config::BarilletConfig;
pub use io::{Format, ImportError};
pub use models::{
    Barillet, BarilletDraft, BarilletId, BarilletStats, BarilletUpdate, DurationType, Identity,
    Session, Theme, ThemeDuration, ThemeType,
};
pub use services::{
    BarilletService, ValidationResult, calculate_barillet_stats, is_valid_theme,
    validate_barillet,
};
pub use storage::PersistenceBackend;

/// Error type for barillet operations.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Missing ids, theme number out of range, unknown format names |
/// | `Validation` | A barillet fails structural validation before a write |
/// | `Import` | A JSON import is rejected (see [`ImportError`]) |
/// | `NotFound` | No record matches the given identifier |
/// | `Unauthenticated` | An operation needs an identity and the session has none |
/// | `OperationFailed` | Filesystem, serialization or rendering backends fail |
/// | `FeatureNotEnabled` | An export format whose backend was compiled out |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The barillet failed validation.
    ///
    /// Carries every error found, in validation order.
    #[error("validation failed: {}", errors.join(", "))]
    Validation {
        /// Accumulated validation messages.
        errors: Vec<String>,
    },

    /// A JSON import was rejected.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// The requested record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record that was looked up.
        entity: &'static str,
        /// The identifier that had no match.
        id: String,
    },

    /// The session carries no identity.
    #[error("user not authenticated")]
    Unauthenticated,

    /// An operation failed.
    ///
    /// Raised when:
    /// - Filesystem I/O errors occur
    /// - JSON serialization or deserialization of stored records fails
    /// - A rendering backend (PDF, XLSX) reports an error
    /// - A backend lock is poisoned
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// Feature not enabled (requires feature flag).
    #[error("feature not enabled: {0} (compile with --features {0})")]
    FeatureNotEnabled(String),
}

impl Error {
    /// Builds an [`Error::OperationFailed`] from any displayable cause.
    pub fn operation(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for barillet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current Unix timestamp in seconds.
///
/// Falls back to 0 if the system clock is before the Unix epoch.
#[must_use]
pub fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::OperationFailed {
            operation: "write_barillet".to_string(),
            cause: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'write_barillet' failed: disk full");

        let err = Error::Validation {
            errors: vec!["userId is required".into(), "title is required".into()],
        };
        assert_eq!(
            err.to_string(),
            "validation failed: userId is required, title is required"
        );

        let err = Error::NotFound {
            entity: "barillet",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "barillet not found: abc");
    }

    #[test]
    fn test_import_error_is_transparent() {
        let err = Error::from(ImportError::WrongExtension);
        assert_eq!(err.to_string(), ImportError::WrongExtension.to_string());
    }
}
