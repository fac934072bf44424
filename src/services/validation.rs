//! Structural validation of themes and barillets.
//!
//! Two entry points exist for each check: one over the typed model and one
//! over raw JSON, for documents that have not been deserialized yet. Both
//! produce the same messages in the same order.

use serde::Serialize;
use serde_json::Value;

use crate::models::{Barillet, PARTICIPATIONS, THEME_COUNT, Theme, ThemeType};

/// Outcome of [`validate_barillet`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationResult {
    /// `true` when `errors` is empty.
    pub valid: bool,
    /// Every problem found, in check order.
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Converts into a [`crate::Error::Validation`] when invalid.
    ///
    /// # Errors
    ///
    /// Returns the accumulated errors when the result is not valid.
    pub fn into_result(self) -> crate::Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(crate::Error::Validation {
                errors: self.errors,
            })
        }
    }
}

const USER_ID_REQUIRED: &str = "userId is required";
const TITLE_REQUIRED: &str = "title is required";
const THEMES_NOT_ARRAY: &str = "themes must be an array";

fn wrong_theme_count() -> String {
    format!("barillet must have exactly {THEME_COUNT} themes")
}

fn invalid_theme_at(index: usize) -> String {
    format!("theme at index {index} is invalid")
}

/// Returns `true` when the theme is structurally valid.
///
/// With the typed model only the participation can be out of range; type,
/// category and duration shape are guaranteed by construction.
#[must_use]
pub fn is_valid_theme(theme: &Theme) -> bool {
    theme.has_known_participation()
}

/// Returns `true` when `value` is a structurally valid theme document.
#[must_use]
pub fn is_valid_theme_value(value: &Value) -> bool {
    let Some(theme) = value.as_object() else {
        return false;
    };

    let type_ok = theme
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|t| ThemeType::all().iter().any(|known| known.as_str() == t));
    let participation_ok = theme
        .get("participation")
        .and_then(Value::as_str)
        .is_some_and(|p| PARTICIPATIONS.contains(&p));
    let category_ok = theme.get("category").is_some_and(Value::is_string);

    let duration_ok = theme
        .get("duration")
        .and_then(Value::as_object)
        .is_some_and(|d| {
            d.get("value").is_some_and(Value::is_string)
                && d.get("type")
                    .and_then(Value::as_str)
                    .is_some_and(|t| t == "fixed" || t == "special")
                && d.get("maximum").is_some_and(Value::is_boolean)
        });

    type_ok && participation_ok && category_ok && duration_ok
}

/// Validates a barillet, accumulating every error.
///
/// A wrong theme count is reported once and suppresses the per-theme
/// checks.
#[must_use]
pub fn validate_barillet(barillet: &Barillet) -> ValidationResult {
    let mut errors = Vec::new();

    if barillet.user_id.is_empty() {
        errors.push(USER_ID_REQUIRED.to_string());
    }
    if barillet.title.trim().is_empty() {
        errors.push(TITLE_REQUIRED.to_string());
    }
    if barillet.themes.len() == THEME_COUNT {
        errors.extend(
            barillet
                .themes
                .iter()
                .enumerate()
                .filter(|(_, theme)| !is_valid_theme(theme))
                .map(|(index, _)| invalid_theme_at(index)),
        );
    } else {
        errors.push(wrong_theme_count());
    }

    ValidationResult::from_errors(errors)
}

/// Validates a raw barillet document.
#[must_use]
pub fn validate_barillet_value(value: &Value) -> ValidationResult {
    let mut errors = Vec::new();

    if !value.get("userId").is_some_and(is_truthy) {
        errors.push(USER_ID_REQUIRED.to_string());
    }
    let title_ok = value
        .get("title")
        .and_then(Value::as_str)
        .is_some_and(|t| !t.trim().is_empty());
    if !title_ok {
        errors.push(TITLE_REQUIRED.to_string());
    }

    match value.get("themes").and_then(Value::as_array) {
        None => errors.push(THEMES_NOT_ARRAY.to_string()),
        Some(themes) if themes.len() != THEME_COUNT => errors.push(wrong_theme_count()),
        Some(themes) => errors.extend(
            themes
                .iter()
                .enumerate()
                .filter(|(_, theme)| !is_valid_theme_value(theme))
                .map(|(index, _)| invalid_theme_at(index)),
        ),
    }

    ValidationResult::from_errors(errors)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn valid_theme_value() -> Value {
        json!({
            "type": "Mixte",
            "title": "",
            "participation": "illimitée",
            "category": "Libre",
            "duration": {"value": "3:00", "type": "fixed", "maximum": false}
        })
    }

    #[test]
    fn test_new_barillet_is_valid() {
        let result = validate_barillet(&Barillet::new_empty("u1"));
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_errors_accumulate_in_order() {
        let mut barillet = Barillet::new_empty("");
        barillet.title = "   ".to_string();
        barillet.themes[2].participation = "3".to_string();
        barillet.themes[17].participation = "beaucoup".to_string();

        let result = validate_barillet(&barillet);
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "userId is required",
                "title is required",
                "theme at index 2 is invalid",
                "theme at index 17 is invalid",
            ]
        );
    }

    #[test]
    fn test_wrong_count_suppresses_theme_checks() {
        let mut barillet = Barillet::new_empty("u1");
        barillet.themes.truncate(17);
        barillet.themes[0].participation = "nope".to_string();

        let result = validate_barillet(&barillet);
        assert_eq!(result.errors, vec!["barillet must have exactly 18 themes"]);
        assert!(matches!(
            result.into_result(),
            Err(crate::Error::Validation { errors }) if errors.len() == 1
        ));
    }

    #[test]
    fn test_valid_theme_value() {
        assert!(is_valid_theme_value(&valid_theme_value()));
    }

    #[test_case("type", json!("Solo") ; "unknown type")]
    #[test_case("participation", json!("3") ; "unknown participation")]
    #[test_case("category", json!(null) ; "null category")]
    #[test_case("duration", json!("3:00") ; "duration not an object")]
    fn test_invalid_theme_field(field: &str, replacement: Value) {
        let mut theme = valid_theme_value();
        theme[field] = replacement;
        assert!(!is_valid_theme_value(&theme));
    }

    #[test]
    fn test_theme_value_requires_boolean_maximum() {
        let mut theme = valid_theme_value();
        theme["duration"]
            .as_object_mut()
            .unwrap()
            .remove("maximum");
        assert!(!is_valid_theme_value(&theme));
        assert!(!is_valid_theme_value(&json!(null)));
        assert!(!is_valid_theme_value(&json!([1, 2])));
    }

    #[test]
    fn test_validate_barillet_value() {
        let themes: Vec<Value> = (0..18).map(|_| valid_theme_value()).collect();
        let doc = json!({"userId": "u1", "title": "Soirée", "themes": themes});
        assert!(validate_barillet_value(&doc).valid);

        let doc = json!({"title": "", "themes": "nope"});
        assert_eq!(
            validate_barillet_value(&doc).errors,
            vec![
                "userId is required",
                "title is required",
                "themes must be an array"
            ]
        );

        let mut themes: Vec<Value> = (0..18).map(|_| valid_theme_value()).collect();
        themes[5] = json!({"type": "Mixte"});
        let doc = json!({"userId": "u1", "title": "x", "themes": themes});
        assert_eq!(
            validate_barillet_value(&doc).errors,
            vec!["theme at index 5 is invalid"]
        );
    }
}
