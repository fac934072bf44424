//! Live views over the persistence backend.
//!
//! A watch re-reads the backend each time a relevant change event arrives
//! and hands back the fresh snapshot. Dropping the watch or calling
//! [`OwnerWatch::unsubscribe`] stops delivery.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;

use crate::Result;
use crate::models::{Barillet, BarilletId, Session};
use crate::observability::{EventBus, FilteredReceiver};
use crate::storage::PersistenceBackend;

/// Live list of the barillets owned by the session's user.
pub struct OwnerWatch {
    backend: Arc<dyn PersistenceBackend>,
    user_id: Option<String>,
    receiver: Option<FilteredReceiver>,
}

impl OwnerWatch {
    pub(crate) fn new(
        backend: Arc<dyn PersistenceBackend>,
        events: &EventBus,
        session: &Session,
    ) -> Self {
        let user_id = session
            .require_identity()
            .ok()
            .map(|identity| identity.uid.clone());
        let receiver = user_id
            .as_ref()
            .map(|uid| events.subscribe_owner(uid.clone()));
        Self {
            backend,
            user_id,
            receiver,
        }
    }

    /// Returns the current list, newest match first.
    ///
    /// Empty for an anonymous session.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn current(&self) -> Result<Vec<Barillet>> {
        match &self.user_id {
            Some(uid) => self.backend.list_by_owner(uid),
            None => Ok(Vec::new()),
        }
    }

    /// Waits for the next change and returns the refreshed list.
    ///
    /// Returns `None` once the watch is unsubscribed, the session was
    /// anonymous, or the event bus is gone.
    pub async fn next_snapshot(&mut self) -> Option<Result<Vec<Barillet>>> {
        let receiver = self.receiver.as_mut()?;
        match receiver.recv().await {
            Ok(_) => Some(self.current()),
            Err(RecvError::Closed | RecvError::Lagged(_)) => {
                self.receiver = None;
                None
            },
        }
    }

    /// Stops delivering snapshots.
    pub fn unsubscribe(&mut self) {
        self.receiver = None;
    }

    /// Returns `true` while snapshots can still be delivered.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.receiver.is_some()
    }
}

/// One barillet as seen by the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    /// The barillet, or `None` when it does not exist (anymore).
    pub barillet: Option<Barillet>,
    /// Whether the session's user owns it.
    pub is_owner: bool,
}

/// Live view of a single barillet. Readable without a session; ownership
/// is derived from whatever session is attached.
pub struct DocumentWatch {
    backend: Arc<dyn PersistenceBackend>,
    id: BarilletId,
    session: Session,
    receiver: Option<FilteredReceiver>,
}

impl DocumentWatch {
    pub(crate) fn new(
        backend: Arc<dyn PersistenceBackend>,
        events: &EventBus,
        id: BarilletId,
        session: Session,
    ) -> Self {
        let receiver = (!id.is_empty()).then(|| events.subscribe_barillet(id.clone()));
        Self {
            backend,
            id,
            session,
            receiver,
        }
    }

    /// Returns the watched id.
    #[must_use]
    pub const fn id(&self) -> &BarilletId {
        &self.id
    }

    /// Replaces the session used for the ownership flag.
    pub fn set_session(&mut self, session: Session) {
        self.session = session;
    }

    /// Reads the current state of the barillet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn current(&self) -> Result<DocumentSnapshot> {
        if self.id.is_empty() {
            return Ok(DocumentSnapshot {
                barillet: None,
                is_owner: false,
            });
        }
        let barillet = self.backend.get(&self.id)?;
        let is_owner = barillet.as_ref().is_some_and(|b| self.session.is_owner(b));
        Ok(DocumentSnapshot { barillet, is_owner })
    }

    /// Waits for the next change and returns the refreshed snapshot.
    ///
    /// Returns `None` once the watch is unsubscribed, the id was empty, or
    /// the event bus is gone.
    pub async fn next_snapshot(&mut self) -> Option<Result<DocumentSnapshot>> {
        let receiver = self.receiver.as_mut()?;
        match receiver.recv().await {
            Ok(_) => Some(self.current()),
            Err(RecvError::Closed | RecvError::Lagged(_)) => {
                self.receiver = None;
                None
            },
        }
    }

    /// Stops delivering snapshots.
    pub fn unsubscribe(&mut self) {
        self.receiver = None;
    }

    /// Returns `true` while snapshots can still be delivered.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.receiver.is_some()
    }
}
