//! XLSX export.
//!
//! A `Metadata` sheet with the barillet header fields and a `Themes` sheet
//! with the same columns as the CSV export.

use rust_xlsxwriter::{Color, Format as CellFormat, Workbook, Worksheet, XlsxError};

use crate::io::formats::Format;
use crate::io::formats::table::{THEME_COLUMN_WIDTHS, THEME_HEADERS, french_date, theme_rows};
use crate::io::traits::BarilletRenderer;
use crate::models::Barillet;
use crate::{Error, Result};

const HEADER_FILL: u32 = 0x00FF_F3CD;

/// XLSX renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxRenderer;

impl XlsxRenderer {
    /// Creates a new XLSX renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn write_metadata(sheet: &mut Worksheet, barillet: &Barillet) -> std::result::Result<(), XlsxError> {
    sheet.set_name("Metadata")?;
    sheet.write_string(0, 0, "Title")?;
    sheet.write_string(0, 1, &barillet.title)?;
    sheet.write_string(1, 0, "Date")?;
    sheet.write_string(1, 1, french_date(barillet))?;
    sheet.write_string(2, 0, "Location")?;
    sheet.write_string(2, 1, &barillet.location)?;
    sheet.write_string(3, 0, "Total Themes")?;
    #[allow(clippy::cast_precision_loss)]
    sheet.write_number(3, 1, barillet.themes.len() as f64)?;
    Ok(())
}

fn write_themes(sheet: &mut Worksheet, barillet: &Barillet) -> std::result::Result<(), XlsxError> {
    sheet.set_name("Themes")?;

    let header = CellFormat::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL));
    for (col, (title, width)) in (0u16..).zip(THEME_HEADERS.iter().zip(THEME_COLUMN_WIDTHS)) {
        sheet.write_string_with_format(0, col, *title, &header)?;
        sheet.set_column_width(col, width)?;
    }

    for (row, theme) in (1u32..).zip(theme_rows(barillet)) {
        #[allow(clippy::cast_precision_loss)]
        sheet.write_number(row, 0, theme.number as f64)?;
        for (col, cell) in (1u16..).zip(theme.cells.iter()) {
            sheet.write_string(row, col, cell)?;
        }
    }
    Ok(())
}

impl BarilletRenderer for XlsxRenderer {
    fn format(&self) -> Format {
        Format::Xlsx
    }

    fn render(&self, barillet: &Barillet) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        write_metadata(workbook.add_worksheet(), barillet)
            .map_err(|e| Error::operation("write_xlsx_metadata", e))?;
        write_themes(workbook.add_worksheet(), barillet)
            .map_err(|e| Error::operation("write_xlsx_themes", e))?;
        workbook
            .save_to_buffer()
            .map_err(|e| Error::operation("save_xlsx", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_produces_zip_container() {
        let mut barillet = Barillet::new_empty("u1");
        barillet.title = "Finale".into();
        let bytes = XlsxRenderer::new().render(&barillet).unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert_eq!(XlsxRenderer::new().format(), Format::Xlsx);
    }
}
