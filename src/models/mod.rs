//! Data models for barillet.
//!
//! This module contains the core data structures shared by the services,
//! storage and import/export layers.

mod barillet;
mod category;
mod duration;
mod events;
mod session;
mod stats;
mod theme;

pub use barillet::{
    Barillet, BarilletDraft, BarilletId, BarilletUpdate, COPY_SUFFIX, DEFAULT_TITLE, Folder,
    THEME_COUNT,
};
pub use category::{Category, CategoryCatalog, PresetCategory};
pub use duration::{
    DEFAULT_DURATION, DurationType, ThemeDuration, format_duration, parse_duration_to_minutes,
};
pub use events::{BarilletEvent, EventMeta};
pub use session::{Identity, Session};
pub use stats::{BarilletStats, TypeProportions};
pub use theme::{DEFAULT_PARTICIPATION, LIBRE, PARTICIPATIONS, Theme, ThemeType};
