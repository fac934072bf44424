//! Change events for barillets.
//!
//! Every successful write through the persistence layer is followed by one
//! of these on the event bus. Live views use them to know when to re-query.

use super::BarilletId;
use crate::current_timestamp;
use uuid::Uuid;

/// Shared event metadata.
#[derive(Debug, Clone)]
pub struct EventMeta {
    /// Unique identifier for this event.
    pub event_id: String,
    /// Component that emitted the event.
    pub source: &'static str,
    /// Timestamp (Unix epoch seconds).
    pub timestamp: u64,
}

impl EventMeta {
    /// Creates metadata stamped with the current time.
    #[must_use]
    pub fn new(source: &'static str) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            source,
            timestamp: current_timestamp(),
        }
    }
}

/// Events emitted after a barillet write.
#[derive(Debug, Clone)]
pub enum BarilletEvent {
    /// A barillet was stored for the first time.
    Created {
        /// Event metadata.
        meta: EventMeta,
        /// The new barillet.
        barillet_id: BarilletId,
        /// Owner.
        user_id: String,
    },
    /// A barillet was saved.
    Updated {
        /// Event metadata.
        meta: EventMeta,
        /// The saved barillet.
        barillet_id: BarilletId,
        /// Owner.
        user_id: String,
        /// Fields that were written.
        modified_fields: Vec<String>,
    },
    /// A barillet was removed.
    Deleted {
        /// Event metadata.
        meta: EventMeta,
        /// The removed barillet.
        barillet_id: BarilletId,
        /// Owner.
        user_id: String,
    },
}

impl BarilletEvent {
    /// Returns the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Updated { .. } => "updated",
            Self::Deleted { .. } => "deleted",
        }
    }

    /// Returns the event metadata.
    #[must_use]
    pub const fn meta(&self) -> &EventMeta {
        match self {
            Self::Created { meta, .. } | Self::Updated { meta, .. } | Self::Deleted { meta, .. } => {
                meta
            },
        }
    }

    /// Returns the affected barillet.
    #[must_use]
    pub const fn barillet_id(&self) -> &BarilletId {
        match self {
            Self::Created { barillet_id, .. }
            | Self::Updated { barillet_id, .. }
            | Self::Deleted { barillet_id, .. } => barillet_id,
        }
    }

    /// Returns the owner of the affected barillet.
    #[must_use]
    pub fn user_id(&self) -> &str {
        match self {
            Self::Created { user_id, .. }
            | Self::Updated { user_id, .. }
            | Self::Deleted { user_id, .. } => user_id,
        }
    }
}
