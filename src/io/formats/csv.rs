//! CSV export.
//!
//! One header row then one row per theme. Every field is quoted and inner
//! quotes are doubled.

use crate::io::formats::Format;
use crate::io::formats::table::{THEME_HEADERS, theme_rows};
use crate::io::traits::BarilletRenderer;
use crate::models::Barillet;
use crate::{Error, Result};

/// CSV renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvRenderer;

impl CsvRenderer {
    /// Creates a new CSV renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BarilletRenderer for CsvRenderer {
    fn format(&self) -> Format {
        Format::Csv
    }

    fn render(&self, barillet: &Barillet) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record(THEME_HEADERS)
            .map_err(|e| Error::operation("write_csv_header", e))?;
        for row in theme_rows(barillet) {
            writer
                .write_record(row.to_record())
                .map_err(|e| Error::operation("write_csv_row", e))?;
        }

        writer
            .into_inner()
            .map_err(|e| Error::operation("flush_csv", e.error()))
    }
}
