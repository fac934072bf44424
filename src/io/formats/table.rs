//! Tabular view of a barillet, shared by the CSV and XLSX renderers.

use crate::models::{Barillet, Theme};

/// Column headers of the themes table.
pub const THEME_HEADERS: [&str; 8] = [
    "Theme #",
    "Type",
    "Title",
    "Participation",
    "Category",
    "Duration",
    "Duration Type",
    "Notes",
];

/// Column widths, in characters, of the spreadsheet themes table.
pub const THEME_COLUMN_WIDTHS: [f64; 8] = [10.0, 10.0, 25.0, 15.0, 15.0, 12.0, 12.0, 20.0];

/// One themes table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeRow {
    /// 1-based position.
    pub number: usize,
    /// Text cells after the number, in header order.
    pub cells: [String; 7],
}

impl ThemeRow {
    fn new(number: usize, theme: &Theme) -> Self {
        Self {
            number,
            cells: [
                theme.theme_type.as_str().to_string(),
                theme.title_or_empty().to_string(),
                theme.participation.clone(),
                theme.category.clone(),
                theme.duration.value.clone(),
                theme.duration.kind.as_str().to_string(),
                theme.notes.clone(),
            ],
        }
    }

    /// All cells as text, the number first.
    #[must_use]
    pub fn to_record(&self) -> Vec<String> {
        std::iter::once(self.number.to_string())
            .chain(self.cells.iter().cloned())
            .collect()
    }
}

/// Rows for every theme, in order.
#[must_use]
pub fn theme_rows(barillet: &Barillet) -> Vec<ThemeRow> {
    barillet
        .themes
        .iter()
        .enumerate()
        .map(|(index, theme)| ThemeRow::new(index + 1, theme))
        .collect()
}

/// Metadata date in the French `dd/mm/yyyy` form, empty when unset.
#[must_use]
pub fn french_date(barillet: &Barillet) -> String {
    barillet
        .date
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ThemeDuration, ThemeType};
    use chrono::NaiveDate;

    #[test]
    fn test_rows_follow_header_order() {
        let mut barillet = Barillet::new_empty("u1");
        barillet.themes[1] = Theme::new()
            .with_type(ThemeType::Comparee)
            .with_title("Le train")
            .with_category("Chantée")
            .with_duration(ThemeDuration::special("Jusqu'à la gare"))
            .with_notes("sans accessoire");

        let rows = theme_rows(&barillet);
        assert_eq!(rows.len(), 18);
        assert_eq!(
            rows[1].to_record(),
            vec![
                "2",
                "Comparée",
                "Le train",
                "illimitée",
                "Chantée",
                "Jusqu'à la gare",
                "special",
                "sans accessoire"
            ]
        );
        assert_eq!(rows[17].number, 18);
    }

    #[test]
    fn test_french_date() {
        let mut barillet = Barillet::new_empty("u1");
        assert_eq!(french_date(&barillet), "");
        barillet.date = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(french_date(&barillet), "09/03/2024");
    }
}
