//! Barillet import service.
//!
//! Reads a `.json` file, validates it and creates a new barillet for the
//! session's user. Every failure surfaces as an [`ImportError`].

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::instrument;

use crate::io::error::ImportError;
use crate::io::validation::ImportValidator;
use crate::models::{BarilletId, Session};
use crate::services::BarilletService;
use crate::Result;

/// Service for importing barillets from JSON files.
#[derive(Debug, Clone)]
pub struct ImportService {
    barillets: BarilletService,
    validator: ImportValidator,
}

impl ImportService {
    /// Creates an import service storing through `barillets`.
    #[must_use]
    pub fn new(barillets: BarilletService) -> Self {
        Self {
            barillets,
            validator: ImportValidator::default(),
        }
    }

    /// Uses a custom validator.
    #[must_use]
    pub fn with_validator(mut self, validator: ImportValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Imports the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Import`] describing why the file was rejected
    /// or could not be stored.
    #[instrument(skip(self, session), fields(operation = "import_file", path = %path.display()))]
    pub fn import_from_file(&self, path: &Path, session: &Session) -> Result<BarilletId> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.validator.check_file_name(name)?;
        let file = std::fs::File::open(path).map_err(|e| ImportError::Unreadable(e.to_string()))?;
        self.import_from_reader(name, file, session)
    }

    /// Imports from `reader`, using `name` for the extension check.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Import`] when the content is rejected.
    pub fn import_from_reader<R: Read>(
        &self,
        name: &str,
        reader: R,
        session: &Session,
    ) -> Result<BarilletId> {
        self.validator.check_file_name(name)?;
        let content = self.read_limited(reader)?;
        self.import_from_str(&content, session)
    }

    /// Imports already-read JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Import`] when the content is rejected.
    pub fn import_from_str(&self, content: &str, session: &Session) -> Result<BarilletId> {
        let document = self.validator.parse(content)?;
        self.import_document(&document, session)
    }

    /// Imports a parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Import`] when the document is rejected or
    /// the barillet cannot be created.
    pub fn import_document(&self, document: &Value, session: &Session) -> Result<BarilletId> {
        let imported = self.validator.validate(document)?;
        let theme_count = imported.themes.len();
        let id = self
            .barillets
            .create(session, imported.into_draft())
            .map_err(|e| ImportError::Creation(e.to_string()))?;
        tracing::info!(barillet_id = %id, themes = theme_count, "Imported barillet");
        Ok(id)
    }

    fn read_limited<R: Read>(&self, reader: R) -> std::result::Result<String, ImportError> {
        let limit = self.validator.max_file_size();
        let mut content = String::new();
        reader
            .take(limit.saturating_add(1))
            .read_to_string(&mut content)
            .map_err(|e| ImportError::Unreadable(e.to_string()))?;
        if content.len() as u64 > limit {
            return Err(ImportError::Unreadable(format!(
                "file exceeds {limit} bytes"
            )));
        }
        Ok(content)
    }
}
