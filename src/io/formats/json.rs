//! JSON export.
//!
//! Writes the portable [`ExportableBarillet`] document, pretty-printed with
//! two-space indentation. The output is accepted back by the importer.

use crate::io::formats::Format;
use crate::io::traits::{BarilletRenderer, ExportableBarillet};
use crate::models::Barillet;
use crate::{Error, Result};

/// JSON renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl JsonRenderer {
    /// Creates a new JSON renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the portable document as text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_string(&self, barillet: &Barillet) -> Result<String> {
        serde_json::to_string_pretty(&ExportableBarillet::from(barillet))
            .map_err(|e| Error::operation("serialize_json", e))
    }
}

impl BarilletRenderer for JsonRenderer {
    fn format(&self) -> Format {
        Format::Json
    }

    fn render(&self, barillet: &Barillet) -> Result<Vec<u8>> {
        self.render_string(barillet).map(String::into_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ThemeDuration, ThemeType};
    use chrono::NaiveDate;
    use serde_json::Value;

    #[test]
    fn test_render_shape() {
        let mut barillet = Barillet::new_empty("u1");
        barillet.title = "Finale".into();
        barillet.date = NaiveDate::from_ymd_opt(2024, 6, 1);
        barillet.location = "Théâtre".into();
        barillet.themes[0].theme_type = ThemeType::Comparee;
        barillet.themes[0].duration = ThemeDuration::fixed("2:30").with_maximum(true);

        let text = JsonRenderer::new().render_string(&barillet).unwrap();
        assert!(text.starts_with("{\n  \"title\": \"Finale\""));

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["date"], "2024-06-01");
        assert_eq!(value["location"], "Théâtre");
        assert_eq!(value["themes"].as_array().map(Vec::len), Some(18));
        assert_eq!(value["themes"][0]["type"], "Comparée");
        assert_eq!(value["themes"][0]["duration"]["maximum"], true);
        assert_eq!(value["themes"][0]["notes"], "");
        assert!(value.get("userId").is_none());
    }

    #[test]
    fn test_null_date() {
        let barillet = Barillet::new_empty("u1");
        let bytes = JsonRenderer::new().render(&barillet).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(value["date"].is_null());
    }
}
