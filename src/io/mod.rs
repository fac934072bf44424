//! Import and export.
//!
//! # Architecture
//!
//! - **Renderers** implement [`BarilletRenderer`], one per [`Format`],
//!   resolved through [`create_renderer`]
//! - **Validation** checks and coerces imported JSON ([`ImportValidator`])
//! - **Services** tie them to storage and file naming
//!
//! # Formats
//!
//! | Format | Import | Export | Notes |
//! |--------|--------|--------|-------|
//! | JSON | ✓ | ✓ | Portable document, re-importable |
//! | CSV | - | ✓ | One row per theme |
//! | XLSX | - | ✓ | Requires `xlsx-export` feature |
//! | PDF | - | ✓ | Card grid, requires `pdf-export` feature |
//!
//! # Examples
//!
//! ```rust,ignore
//! use barillet::io::{ExportService, Format};
//!
//! let artifact = ExportService::new().export(&barillet, Format::Pdf)?;
//! std::fs::write(&artifact.filename, &artifact.bytes)?;
//! ```

pub mod error;
pub mod filename;
pub mod formats;
pub mod services;
pub mod traits;
pub mod validation;

pub use error::ImportError;
pub use filename::{export_filename, sanitize_filename};
pub use formats::{Format, create_renderer};
pub use services::{ExportArtifact, ExportService, ImportService};
pub use traits::{BarilletRenderer, ExportableBarillet, ExportableTheme, ImportedBarillet};
pub use validation::{ImportValidator, is_importable_theme};
