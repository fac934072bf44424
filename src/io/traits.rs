//! Core types and traits for import/export.
//!
//! [`ExportableBarillet`] is the portable document written by the JSON
//! renderer and accepted back by the importer. It carries no identity,
//! ownership or timestamps.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::formats::Format;
use crate::Result;
use crate::models::{Barillet, BarilletDraft, DurationType, Theme, ThemeDuration, ThemeType};

/// Renders a barillet into one output format.
///
/// Renderers are pure: the barillet is only borrowed and the same input
/// always yields the same bytes.
pub trait BarilletRenderer: Send + Sync {
    /// Format this renderer produces.
    fn format(&self) -> Format;

    /// Renders the whole document.
    fn render(&self, barillet: &Barillet) -> Result<Vec<u8>>;
}

/// Portable barillet document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportableBarillet {
    /// Title.
    pub title: String,
    /// Match date, `YYYY-MM-DD`.
    pub date: Option<NaiveDate>,
    /// Venue.
    pub location: String,
    /// Themes in order.
    pub themes: Vec<ExportableTheme>,
}

/// Portable theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportableTheme {
    /// Mixte or Comparée.
    #[serde(rename = "type")]
    pub theme_type: ThemeType,
    /// Title; absent titles are written as empty text so the file
    /// re-imports.
    pub title: String,
    /// Participation.
    pub participation: String,
    /// Category.
    pub category: String,
    /// Duration, `maximum` included.
    pub duration: ThemeDuration,
    /// Notes.
    pub notes: String,
}

impl From<&Theme> for ExportableTheme {
    fn from(theme: &Theme) -> Self {
        Self {
            theme_type: theme.theme_type,
            title: theme.title_or_empty().to_string(),
            participation: theme.participation.clone(),
            category: theme.category.clone(),
            duration: theme.duration.clone(),
            notes: theme.notes.clone(),
        }
    }
}

impl From<&Barillet> for ExportableBarillet {
    fn from(barillet: &Barillet) -> Self {
        Self {
            title: barillet.title.clone(),
            date: barillet.date,
            location: barillet.location.clone(),
            themes: barillet.themes.iter().map(ExportableTheme::from).collect(),
        }
    }
}

/// Imported theme, after structural checks.
///
/// Lenient about what export may omit: `maximum` and `notes` default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportedTheme {
    /// Mixte or Comparée.
    #[serde(rename = "type")]
    pub theme_type: ThemeType,
    /// Title.
    pub title: String,
    /// Participation, as free text.
    pub participation: String,
    /// Category.
    pub category: String,
    /// Duration.
    pub duration: ImportedDuration,
    /// Notes.
    #[serde(default)]
    pub notes: String,
}

/// Imported duration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportedDuration {
    /// Raw value. Non-text values are kept as their JSON text.
    #[serde(deserialize_with = "value_as_text")]
    pub value: String,
    /// fixed or special.
    #[serde(rename = "type")]
    pub kind: DurationType,
    /// Ceiling flag.
    #[serde(default)]
    pub maximum: bool,
}

fn value_as_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl From<ImportedTheme> for Theme {
    fn from(theme: ImportedTheme) -> Self {
        Self {
            theme_type: theme.theme_type,
            title: Some(theme.title),
            participation: theme.participation,
            category: theme.category,
            duration: ThemeDuration {
                value: theme.duration.value,
                kind: theme.duration.kind,
                maximum: theme.duration.maximum,
            },
            notes: theme.notes,
        }
    }
}

/// Imported barillet, ready to become a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedBarillet {
    /// Title as found in the file.
    pub title: String,
    /// Parsed date; `None` when absent or unparseable.
    pub date: Option<NaiveDate>,
    /// Venue; empty when absent.
    pub location: String,
    /// Themes.
    pub themes: Vec<Theme>,
}

impl ImportedBarillet {
    /// Builds the creation draft, marking the title as imported.
    #[must_use]
    pub fn into_draft(self) -> BarilletDraft {
        BarilletDraft {
            title: Some(format!("{}{IMPORT_SUFFIX}", self.title)),
            date: self.date,
            location: Some(self.location),
            folder_id: None,
            themes: Some(self.themes),
        }
    }
}

/// Suffix appended to the title of an imported barillet.
pub const IMPORT_SUFFIX: &str = " (importé)";
