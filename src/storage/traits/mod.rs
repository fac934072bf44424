//! Storage backend traits.

mod persistence;

pub use persistence::{PersistenceBackend, sort_for_listing};
