//! Barillet export service.
//!
//! Resolves the renderer for the requested format, renders the barillet
//! and names the resulting file after its title.

use std::path::{Path, PathBuf};

use tracing::instrument;

use crate::io::filename::export_filename;
use crate::io::formats::{Format, create_renderer};
use crate::models::Barillet;
use crate::{Error, Result};

/// A rendered export, ready to be written or sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name, extension included.
    pub filename: String,
    /// MIME type of `bytes`.
    pub mime_type: &'static str,
    /// Rendered content.
    pub bytes: Vec<u8>,
}

/// Service for exporting barillets.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExportService;

impl ExportService {
    /// Creates a new export service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders `barillet` in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FeatureNotEnabled`] when the format was compiled
    /// out, or [`Error::OperationFailed`] when rendering fails.
    #[instrument(skip(self, barillet), fields(operation = "export", format = %format))]
    pub fn export(&self, barillet: &Barillet, format: Format) -> Result<ExportArtifact> {
        let renderer = create_renderer(format)?;
        let bytes = renderer.render(barillet)?;
        metrics::counter!("barillet_exports_total", "format" => format.extension()).increment(1);
        tracing::debug!(bytes = bytes.len(), "Rendered export");
        Ok(ExportArtifact {
            filename: export_filename(&barillet.title, format),
            mime_type: format.mime_type(),
            bytes,
        })
    }

    /// Renders `barillet` and writes it into `dir`.
    ///
    /// Returns the path of the written file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn export_to_dir(&self, barillet: &Barillet, format: Format, dir: &Path) -> Result<PathBuf> {
        let artifact = self.export(barillet, format)?;
        std::fs::create_dir_all(dir).map_err(|e| Error::operation("create_export_dir", e))?;
        let path = dir.join(&artifact.filename);
        std::fs::write(&path, &artifact.bytes).map_err(|e| Error::operation("write_export", e))?;
        tracing::info!(path = %path.display(), "Exported barillet");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_json_artifact() {
        let mut barillet = Barillet::new_empty("u1");
        barillet.title = "Grande Finale!".into();
        let artifact = ExportService::new().export(&barillet, Format::Json).unwrap();
        assert_eq!(artifact.filename, "grande-finale.json");
        assert_eq!(artifact.mime_type, "application/json");
        assert!(!artifact.bytes.is_empty());
    }

    #[test]
    fn test_export_does_not_touch_barillet() {
        let barillet = Barillet::new_empty("u1");
        let before = barillet.clone();
        let _ = ExportService::new().export(&barillet, Format::Csv).unwrap();
        assert_eq!(barillet, before);
    }

    #[test]
    fn test_export_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let barillet = Barillet::new_empty("u1");
        let path = ExportService::new()
            .export_to_dir(&barillet, Format::Csv, &dir.path().join("out"))
            .unwrap();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("nouveau-barillet.csv"));
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 19);
    }
}
