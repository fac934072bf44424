//! Storage layer abstraction.
//!
//! Barillets live behind the [`PersistenceBackend`] trait. Two backends ship
//! with the crate:
//! - **Filesystem**: one JSON file per barillet under the data directory
//! - **Memory**: a lock-protected map, for tests and throwaway sessions

// Allow significant_drop_tightening - guards are held across the whole
// read-modify-write on purpose.
#![allow(clippy::significant_drop_tightening)]

pub mod persistence;
pub mod traits;

use std::path::Path;
use std::sync::Arc;

pub use persistence::{FilesystemBackend, MemoryBackend};
pub use traits::PersistenceBackend;

use crate::Result;

/// Opens the backend for `data_dir`, or an in-memory one when `None`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub fn open_backend(data_dir: Option<&Path>) -> Result<Arc<dyn PersistenceBackend>> {
    match data_dir {
        Some(dir) => {
            tracing::debug!(path = %dir.display(), "Using filesystem persistence");
            Ok(Arc::new(FilesystemBackend::with_create(dir)?))
        },
        None => {
            tracing::debug!("Using in-memory persistence");
            Ok(Arc::new(MemoryBackend::new()))
        },
    }
}
