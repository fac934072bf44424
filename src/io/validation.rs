//! Import validation and normalization.
//!
//! Checks a parsed JSON document in a fixed order and stops at the first
//! problem, then coerces it into an [`ImportedBarillet`]. Dates are parsed
//! leniently: a bad date is logged and dropped instead of failing the
//! import.

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

use super::error::ImportError;
use super::traits::{ImportedBarillet, ImportedTheme};
use crate::models::{THEME_COUNT, Theme, ThemeType};

/// Default cap on the size of an imported file (1 MiB).
pub const DEFAULT_MAX_IMPORT_SIZE: u64 = 1024 * 1024;

/// Validates and normalizes imported barillet documents.
#[derive(Debug, Clone)]
pub struct ImportValidator {
    max_file_size: u64,
}

impl Default for ImportValidator {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_IMPORT_SIZE,
        }
    }
}

impl ImportValidator {
    /// Creates a validator with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum accepted file size in bytes.
    #[must_use]
    pub const fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Returns the maximum accepted file size in bytes.
    #[must_use]
    pub const fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Checks that `name` has the `.json` extension.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::WrongExtension`] otherwise.
    pub fn check_file_name(&self, name: &str) -> Result<(), ImportError> {
        if name.ends_with(".json") {
            Ok(())
        } else {
            Err(ImportError::WrongExtension)
        }
    }

    /// Parses raw file content.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Malformed`] for invalid JSON.
    pub fn parse(&self, content: &str) -> Result<Value, ImportError> {
        serde_json::from_str(content).map_err(|e| ImportError::Malformed(e.to_string()))
    }

    /// Validates a parsed document and coerces it.
    ///
    /// Checks run in this order: object shape, title, themes array, theme
    /// count, each theme, date type, location type.
    ///
    /// # Errors
    ///
    /// Returns the first [`ImportError`] encountered.
    pub fn validate(&self, document: &Value) -> Result<ImportedBarillet, ImportError> {
        let object = document.as_object().ok_or(ImportError::NotAnObject)?;

        let title = object
            .get("title")
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ImportError::MissingTitle)?;

        let raw_themes = object
            .get("themes")
            .and_then(Value::as_array)
            .ok_or(ImportError::MissingThemes)?;
        if raw_themes.len() != THEME_COUNT {
            return Err(ImportError::WrongThemeCount {
                found: raw_themes.len(),
            });
        }

        let themes = raw_themes
            .iter()
            .enumerate()
            .map(|(index, raw)| parse_theme(raw).ok_or(ImportError::InvalidTheme { number: index + 1 }))
            .collect::<Result<Vec<_>, _>>()?;

        let date = match object.get("date") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => parse_date(text),
            Some(_) => return Err(ImportError::InvalidDate),
        };

        let location = optional_text(object, "location").ok_or(ImportError::InvalidLocation)?;

        Ok(ImportedBarillet {
            title: title.to_string(),
            date,
            location,
            themes,
        })
    }
}

/// Returns `true` when `value` passes the import theme check.
///
/// Looser than the editor's validator: participation may be any text and
/// `duration.maximum` may be missing, but the title must be text.
#[must_use]
pub fn is_importable_theme(value: &Value) -> bool {
    let Some(theme) = value.as_object() else {
        return false;
    };
    let is_text = |key: &str| theme.get(key).is_some_and(Value::is_string);

    let type_ok = theme
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|t| ThemeType::all().iter().any(|known| known.as_str() == t));

    let duration_ok = theme
        .get("duration")
        .and_then(Value::as_object)
        .is_some_and(|d| {
            d.contains_key("value")
                && d.get("type")
                    .and_then(Value::as_str)
                    .is_some_and(|t| t == "fixed" || t == "special")
        });

    type_ok && is_text("title") && is_text("participation") && is_text("category") && duration_ok
}

fn parse_theme(value: &Value) -> Option<Theme> {
    if !is_importable_theme(value) {
        return None;
    }
    serde_json::from_value::<ImportedTheme>(value.clone())
        .ok()
        .map(Theme::from)
}

// Absent means empty; present but not text means invalid.
fn optional_text(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key) {
        None => Some(String::new()),
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => None,
    }
}

/// Parses a calendar date, accepting `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Empty text yields `None` silently; anything else unparseable yields
/// `None` with a warning.
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }
    tracing::warn!(date = %text, "Invalid date in imported file, using none");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn theme() -> Value {
        json!({
            "type": "Mixte",
            "title": "Le marché",
            "participation": "2 par équipe",
            "category": "Libre",
            "duration": {"value": "3:00", "type": "fixed", "maximum": false},
            "notes": ""
        })
    }

    fn document() -> Value {
        json!({
            "title": "Soirée",
            "date": "2024-05-17",
            "location": "Salle Octave",
            "themes": (0..18).map(|_| theme()).collect::<Vec<_>>()
        })
    }

    #[test]
    fn test_valid_document() {
        let imported = ImportValidator::new().validate(&document()).unwrap();
        assert_eq!(imported.title, "Soirée");
        assert_eq!(imported.date, NaiveDate::from_ymd_opt(2024, 5, 17));
        assert_eq!(imported.location, "Salle Octave");
        assert_eq!(imported.themes.len(), 18);
        assert_eq!(imported.themes[0].title.as_deref(), Some("Le marché"));
    }

    #[test]
    fn test_file_name_check() {
        let validator = ImportValidator::new();
        assert!(validator.check_file_name("soiree.json").is_ok());
        assert_eq!(
            validator.check_file_name("soiree.JSON"),
            Err(ImportError::WrongExtension)
        );
        assert_eq!(
            validator.check_file_name("soiree.csv"),
            Err(ImportError::WrongExtension)
        );
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ImportValidator::new().parse("{\"title\": "),
            Err(ImportError::Malformed(_))
        ));
    }

    #[test_case(json!([1, 2]), ImportError::NotAnObject ; "array document")]
    #[test_case(json!({"themes": []}), ImportError::MissingTitle ; "missing title")]
    #[test_case(json!({"title": "  ", "themes": []}), ImportError::MissingTitle ; "blank title")]
    #[test_case(json!({"title": "x"}), ImportError::MissingThemes ; "missing themes")]
    #[test_case(json!({"title": "x", "themes": {}}), ImportError::MissingThemes ; "themes not an array")]
    #[test_case(json!({"title": "x", "themes": [1]}), ImportError::WrongThemeCount { found: 1 } ; "wrong count")]
    fn test_top_level_errors(document: Value, expected: ImportError) {
        assert_eq!(ImportValidator::new().validate(&document), Err(expected));
    }

    #[test]
    fn test_invalid_theme_is_one_based() {
        let mut doc = document();
        doc["themes"][4]["title"] = Value::Null;
        assert_eq!(
            ImportValidator::new().validate(&doc),
            Err(ImportError::InvalidTheme { number: 5 })
        );
    }

    #[test]
    fn test_theme_errors_come_before_date_errors() {
        let mut doc = document();
        doc["themes"][0]["duration"]["type"] = json!("forever");
        doc["date"] = json!(12);
        assert_eq!(
            ImportValidator::new().validate(&doc),
            Err(ImportError::InvalidTheme { number: 1 })
        );
    }

    #[test]
    fn test_date_and_location_types() {
        let mut doc = document();
        doc["date"] = json!(20_240_517);
        assert_eq!(
            ImportValidator::new().validate(&doc),
            Err(ImportError::InvalidDate)
        );

        let mut doc = document();
        doc["location"] = json!(["a"]);
        assert_eq!(
            ImportValidator::new().validate(&doc),
            Err(ImportError::InvalidLocation)
        );
    }

    #[test]
    fn test_lenient_date_and_defaults() {
        let mut doc = document();
        doc["date"] = json!("le 17 mai");
        doc.as_object_mut().unwrap().remove("location");
        let imported = ImportValidator::new().validate(&doc).unwrap();
        assert!(imported.date.is_none());
        assert_eq!(imported.location, "");
    }

    #[test]
    fn test_import_accepts_free_participation_and_missing_maximum() {
        let mut doc = document();
        doc["themes"][0]["participation"] = json!("5 contre 5");
        doc["themes"][0]["duration"] = json!({"value": "2 fois 2:00", "type": "fixed"});
        let imported = ImportValidator::new().validate(&doc).unwrap();
        assert_eq!(imported.themes[0].participation, "5 contre 5");
        assert!(!imported.themes[0].duration.maximum);
    }

    #[test_case("2024-05-17", Some((2024, 5, 17)) ; "plain date")]
    #[test_case("2024-05-17T20:00:00.000Z", Some((2024, 5, 17)) ; "rfc3339 timestamp")]
    #[test_case("", None ; "empty")]
    #[test_case("17/05/2024", None ; "french format")]
    fn test_parse_date(text: &str, expected: Option<(i32, u32, u32)>) {
        let expected = expected.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        assert_eq!(parse_date(text), expected);
    }
}
