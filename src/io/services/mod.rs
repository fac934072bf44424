//! Import and export services.

pub mod export;
pub mod import;

pub use export::{ExportArtifact, ExportService};
pub use import::ImportService;
