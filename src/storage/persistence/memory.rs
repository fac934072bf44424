//! In-memory persistence backend.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use crate::models::{Barillet, BarilletId, BarilletUpdate};
use crate::storage::traits::{PersistenceBackend, sort_for_listing};
use crate::{Error, Result};

/// Volatile backend holding barillets in a map. Used by tests and by the
/// CLI when no data directory is configured.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: RwLock<HashMap<BarilletId, Barillet>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored barillets.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Returns `true` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<BarilletId, Barillet>>> {
        self.records
            .read()
            .map_err(|e| Error::operation("memory_backend_read", e))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<BarilletId, Barillet>>> {
        self.records
            .write()
            .map_err(|e| Error::operation("memory_backend_write", e))
    }
}

impl PersistenceBackend for MemoryBackend {
    fn insert(&self, mut barillet: Barillet) -> Result<Barillet> {
        let id = BarilletId::generate();
        let now = Utc::now();
        barillet.id = Some(id.clone());
        barillet.created_at = Some(now);
        barillet.updated_at = Some(now);

        self.write()?.insert(id, barillet.clone());
        Ok(barillet)
    }

    fn get(&self, id: &BarilletId) -> Result<Option<Barillet>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn update(&self, id: &BarilletId, update: &BarilletUpdate) -> Result<Option<Barillet>> {
        let mut records = self.write()?;
        let Some(stored) = records.get_mut(id) else {
            return Ok(None);
        };
        update.apply_to(stored);
        stored.updated_at = Some(Utc::now());
        Ok(Some(stored.clone()))
    }

    fn delete(&self, id: &BarilletId) -> Result<bool> {
        Ok(self.write()?.remove(id).is_some())
    }

    fn list_by_owner(&self, user_id: &str) -> Result<Vec<Barillet>> {
        let mut owned: Vec<Barillet> = self
            .read()?
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        sort_for_listing(&mut owned);
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_id_and_timestamps() {
        let backend = MemoryBackend::new();
        let stored = backend.insert(Barillet::new_empty("u1")).unwrap();

        let id = stored.id.clone().unwrap();
        assert!(!id.is_empty());
        assert!(stored.created_at.is_some());
        assert_eq!(stored.created_at, stored.updated_at);
        assert_eq!(backend.get(&id).unwrap(), Some(stored));
    }

    #[test]
    fn test_update_missing_returns_none() {
        let backend = MemoryBackend::new();
        let result = backend
            .update(&BarilletId::new("nope"), &BarilletUpdate::new().title("x"))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_update_and_delete() {
        let backend = MemoryBackend::new();
        let stored = backend.insert(Barillet::new_empty("u1")).unwrap();
        let id = stored.id.unwrap();

        let updated = backend
            .update(&id, &BarilletUpdate::new().location("Montréal"))
            .unwrap()
            .unwrap();
        assert_eq!(updated.location, "Montréal");
        assert!(updated.updated_at >= updated.created_at);

        assert!(backend.delete(&id).unwrap());
        assert!(!backend.delete(&id).unwrap());
        assert!(backend.is_empty().unwrap());
    }

    #[test]
    fn test_list_by_owner_filters() {
        let backend = MemoryBackend::new();
        backend.insert(Barillet::new_empty("u1")).unwrap();
        backend.insert(Barillet::new_empty("u1")).unwrap();
        backend.insert(Barillet::new_empty("u2")).unwrap();

        assert_eq!(backend.list_by_owner("u1").unwrap().len(), 2);
        assert_eq!(backend.list_by_owner("u2").unwrap().len(), 1);
        assert!(backend.list_by_owner("u3").unwrap().is_empty());
        assert_eq!(backend.len().unwrap(), 3);
    }
}
