//! Filesystem-based persistence backend.
//!
//! Stores each barillet as a pretty-printed JSON file named after its id.
//!
//! # Security
//!
//! - **Path traversal**: ids are validated before they become file names
//! - **File size limits**: files above [`MAX_FILE_SIZE`] are refused on read

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;

use crate::models::{Barillet, BarilletId, BarilletUpdate};
use crate::storage::traits::{PersistenceBackend, sort_for_listing};
use crate::{Error, Result};

/// Maximum size of a stored barillet file (1 MiB).
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Filesystem-based persistence backend.
#[derive(Debug)]
pub struct FilesystemBackend {
    base_path: PathBuf,
    // Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl FilesystemBackend {
    /// Creates a backend rooted at `base_path`, creating the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_create(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).map_err(|e| Error::OperationFailed {
            operation: "create_storage_dir".to_string(),
            cause: e.to_string(),
        })?;
        Ok(Self {
            base_path,
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the base path.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn record_path(&self, id: &BarilletId) -> Result<PathBuf> {
        let id_str = id.as_str();
        if !is_safe_filename(id_str) {
            return Err(Error::InvalidInput(format!(
                "Barillet ID contains invalid characters: {id_str}"
            )));
        }
        Ok(self.base_path.join(format!("{id_str}.json")))
    }

    fn read_record(path: &Path) -> Result<Barillet> {
        let metadata = fs::metadata(path).map_err(|e| Error::operation("read_file_metadata", e))?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(Error::InvalidInput(format!(
                "Barillet file exceeds maximum size of {MAX_FILE_SIZE} bytes: {}",
                path.display()
            )));
        }

        let json = fs::read_to_string(path).map_err(|e| Error::operation("read_barillet_file", e))?;
        serde_json::from_str(&json).map_err(|e| Error::operation("deserialize_barillet", e))
    }

    fn write_record(&self, id: &BarilletId, barillet: &Barillet) -> Result<()> {
        let path = self.record_path(id)?;
        let json = serde_json::to_string_pretty(barillet)
            .map_err(|e| Error::operation("serialize_barillet", e))?;
        fs::write(&path, json).map_err(|e| Error::operation("write_barillet_file", e))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|e| Error::operation("filesystem_backend_lock", e))
    }
}

fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 255
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl PersistenceBackend for FilesystemBackend {
    fn insert(&self, mut barillet: Barillet) -> Result<Barillet> {
        let _guard = self.lock()?;
        let id = BarilletId::generate();
        let now = Utc::now();
        barillet.id = Some(id.clone());
        barillet.created_at = Some(now);
        barillet.updated_at = Some(now);

        self.write_record(&id, &barillet)?;
        tracing::debug!(barillet_id = %id, "Wrote barillet file");
        Ok(barillet)
    }

    fn get(&self, id: &BarilletId) -> Result<Option<Barillet>> {
        let Ok(path) = self.record_path(id) else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::read_record(&path).map(Some)
    }

    fn update(&self, id: &BarilletId, update: &BarilletUpdate) -> Result<Option<Barillet>> {
        let _guard = self.lock()?;
        let Some(mut stored) = self.get(id)? else {
            return Ok(None);
        };
        update.apply_to(&mut stored);
        stored.updated_at = Some(Utc::now());
        self.write_record(id, &stored)?;
        Ok(Some(stored))
    }

    fn delete(&self, id: &BarilletId) -> Result<bool> {
        let _guard = self.lock()?;
        let Ok(path) = self.record_path(id) else {
            return Ok(false);
        };
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| Error::operation("delete_barillet_file", e))?;
        Ok(true)
    }

    fn list_by_owner(&self, user_id: &str) -> Result<Vec<Barillet>> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let entries =
            fs::read_dir(&self.base_path).map_err(|e| Error::operation("read_storage_dir", e))?;

        let mut owned = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| Error::operation("read_dir_entry", e))?
                .path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match Self::read_record(&path) {
                Ok(barillet) if barillet.user_id == user_id => owned.push(barillet),
                Ok(_) => {},
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable barillet file"),
            }
        }

        sort_for_listing(&mut owned);
        Ok(owned)
    }
}
