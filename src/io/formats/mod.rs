//! Export formats.
//!
//! Every format is a [`BarilletRenderer`]. Renderers are resolved per call
//! through [`create_renderer`]; PDF and XLSX live behind cargo features.

pub mod csv;
pub mod json;
pub mod pdf;
pub mod table;
#[cfg(feature = "xlsx-export")]
pub mod xlsx;

use std::path::Path;
use std::str::FromStr;

use super::traits::BarilletRenderer;
use crate::{Error, Result};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Printable card grid, three by three per landscape page.
    Pdf,
    /// Portable document, re-importable.
    Json,
    /// One row per theme.
    Csv,
    /// Workbook with a metadata sheet and a themes sheet.
    Xlsx,
}

impl Format {
    /// Returns all formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Pdf, Self::Json, Self::Csv, Self::Xlsx]
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    /// Returns the MIME type for this format.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Json => "application/json",
            Self::Csv => "text/csv;charset=utf-8",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    /// Returns whether the backend for this format was compiled in.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        match self {
            Self::Json | Self::Csv => true,
            Self::Pdf => cfg!(feature = "pdf-export"),
            Self::Xlsx => cfg!(feature = "xlsx-export"),
        }
    }

    /// Detects format from file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not recognized.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some(ext) => ext.parse(),
            None => Err(Error::InvalidInput(
                "Cannot determine format: file has no extension".to_string(),
            )),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            _ => Err(Error::InvalidInput(format!("Unknown format: {s}"))),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Creates the renderer for `format`.
///
/// # Errors
///
/// Returns [`Error::FeatureNotEnabled`] when the format's backend was not
/// compiled in.
pub fn create_renderer(format: Format) -> Result<Box<dyn BarilletRenderer>> {
    tracing::debug!(%format, "Resolving renderer");
    match format {
        Format::Json => Ok(Box::new(json::JsonRenderer::new())),
        Format::Csv => Ok(Box::new(csv::CsvRenderer::new())),
        #[cfg(feature = "pdf-export")]
        Format::Pdf => Ok(Box::new(pdf::PdfRenderer::new())),
        #[cfg(not(feature = "pdf-export"))]
        Format::Pdf => Err(Error::FeatureNotEnabled("pdf-export".to_string())),
        #[cfg(feature = "xlsx-export")]
        Format::Xlsx => Ok(Box::new(xlsx::XlsxRenderer::new())),
        #[cfg(not(feature = "xlsx-export"))]
        Format::Xlsx => Err(Error::FeatureNotEnabled("xlsx-export".to_string())),
    }
}
