//! Barillet lifecycle service.
//!
//! Creates, saves, duplicates and deletes barillets through an injected
//! [`PersistenceBackend`], validating before every write and publishing a
//! [`BarilletEvent`] after it.

use std::sync::Arc;

use tracing::instrument;

use super::validation::validate_barillet;
use super::watch::{DocumentWatch, OwnerWatch};
use crate::models::{
    Barillet, BarilletDraft, BarilletEvent, BarilletId, BarilletUpdate, EventMeta, Session, Theme,
};
use crate::observability::EventBus;
use crate::storage::PersistenceBackend;
use crate::{Error, Result};

const EVENT_SOURCE: &str = "barillet_service";

/// Service for managing barillets.
#[derive(Clone)]
pub struct BarilletService {
    backend: Arc<dyn PersistenceBackend>,
    events: EventBus,
}

impl std::fmt::Debug for BarilletService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarilletService")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl BarilletService {
    /// Creates a service over `backend` with its own event bus.
    #[must_use]
    pub fn new(backend: Arc<dyn PersistenceBackend>) -> Self {
        Self {
            backend,
            events: EventBus::default(),
        }
    }

    /// Uses a shared event bus.
    #[must_use]
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Returns the event bus writes are published on.
    #[must_use]
    pub const fn event_bus(&self) -> &EventBus {
        &self.events
    }

    /// Creates a barillet for the session's user.
    ///
    /// The draft is merged over the default template, then validated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthenticated`] for an anonymous session,
    /// [`Error::Validation`] when the merged barillet is invalid, or a
    /// backend error.
    #[instrument(skip(self, session, draft), fields(operation = "create_barillet"))]
    pub fn create(&self, session: &Session, draft: BarilletDraft) -> Result<BarilletId> {
        let identity = session.require_identity()?;
        let barillet = draft.into_barillet(identity.uid.clone());
        validate_barillet(&barillet).into_result()?;

        let stored = self.backend.insert(barillet)?;
        let id = stored
            .id
            .clone()
            .ok_or_else(|| Error::operation("create_barillet", "backend returned no id"))?;

        tracing::info!(barillet_id = %id, user_id = %stored.user_id, "Created barillet");
        self.events.publish(BarilletEvent::Created {
            meta: EventMeta::new(EVENT_SOURCE),
            barillet_id: id.clone(),
            user_id: stored.user_id,
        });
        Ok(id)
    }

    /// Looks up a barillet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn find(&self, id: &BarilletId) -> Result<Option<Barillet>> {
        if id.is_empty() {
            return Ok(None);
        }
        self.backend.get(id)
    }

    /// Fetches a barillet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no barillet has this id.
    pub fn get(&self, id: &BarilletId) -> Result<Barillet> {
        self.find(id)?.ok_or_else(|| not_found(id))
    }

    /// Lists the session user's barillets, newest match date first.
    ///
    /// Anonymous sessions get an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn list(&self, session: &Session) -> Result<Vec<Barillet>> {
        match session.require_identity() {
            Ok(identity) => self.backend.list_by_owner(&identity.uid),
            Err(_) => Ok(Vec::new()),
        }
    }

    /// Saves the provided fields and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty id, [`Error::NotFound`]
    /// when the barillet is missing, [`Error::Validation`] when the result
    /// would be invalid, or a backend error.
    #[instrument(skip(self, update), fields(operation = "update_barillet", barillet_id = %id))]
    pub fn update(&self, id: &BarilletId, update: BarilletUpdate) -> Result<Barillet> {
        require_id(id)?;
        let mut preview = self.get(id)?;
        update.apply_to(&mut preview);
        validate_barillet(&preview).into_result()?;

        let saved = self.backend.update(id, &update)?.ok_or_else(|| not_found(id))?;
        let modified_fields = update.modified_fields();

        tracing::info!(barillet_id = %id, fields = ?modified_fields, "Saved barillet");
        self.events.publish(BarilletEvent::Updated {
            meta: EventMeta::new(EVENT_SOURCE),
            barillet_id: id.clone(),
            user_id: saved.user_id.clone(),
            modified_fields,
        });
        Ok(saved)
    }

    /// Replaces the theme at `index` (0-based) and saves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `index` is out of range, plus
    /// everything [`Self::update`] returns.
    pub fn update_theme(&self, id: &BarilletId, index: usize, theme: Theme) -> Result<Barillet> {
        let mut themes = self.get(id)?.themes;
        let slot = themes.get_mut(index).ok_or_else(|| {
            Error::InvalidInput(format!("theme index {index} is out of range"))
        })?;
        *slot = theme;
        self.update(id, BarilletUpdate::new().themes(themes))
    }

    /// Deletes a barillet. Returns `false` when it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty id, or a backend error.
    #[instrument(skip(self), fields(operation = "delete_barillet", barillet_id = %id))]
    pub fn delete(&self, id: &BarilletId) -> Result<bool> {
        require_id(id)?;
        let Some(existing) = self.backend.get(id)? else {
            return Ok(false);
        };
        let deleted = self.backend.delete(id)?;
        if deleted {
            tracing::info!(barillet_id = %id, "Deleted barillet");
            self.events.publish(BarilletEvent::Deleted {
                meta: EventMeta::new(EVENT_SOURCE),
                barillet_id: id.clone(),
                user_id: existing.user_id,
            });
        }
        Ok(deleted)
    }

    /// Copies one of the session user's barillets.
    ///
    /// The copy gets a new id and timestamps and a title suffixed with
    /// `" (copie)"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthenticated`] for an anonymous session and
    /// [`Error::NotFound`] when the barillet is not among the user's own.
    #[instrument(skip(self, session), fields(operation = "duplicate_barillet", barillet_id = %id))]
    pub fn duplicate(&self, session: &Session, id: &BarilletId) -> Result<BarilletId> {
        session.require_identity()?;
        let original = self
            .find(id)?
            .filter(|b| session.is_owner(b))
            .ok_or_else(|| not_found(id))?;
        self.create(session, original.duplicate_draft())
    }

    /// Watches the session user's barillet list.
    #[must_use]
    pub fn watch_owner(&self, session: &Session) -> OwnerWatch {
        OwnerWatch::new(Arc::clone(&self.backend), &self.events, session)
    }

    /// Watches a single barillet.
    #[must_use]
    pub fn watch_barillet(&self, id: BarilletId, session: Session) -> DocumentWatch {
        DocumentWatch::new(Arc::clone(&self.backend), &self.events, id, session)
    }
}

fn require_id(id: &BarilletId) -> Result<()> {
    if id.is_empty() {
        return Err(Error::InvalidInput("Barillet ID is required".to_string()));
    }
    Ok(())
}

fn not_found(id: &BarilletId) -> Error {
    Error::NotFound {
        entity: "barillet",
        id: id.to_string(),
    }
}
