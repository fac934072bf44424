//! printpdf implementation of [`PdfCanvas`].

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect as PdfRect,
};

use super::canvas::{FontWeight, PdfCanvas, Rect, Rgb, TextStyle};
use super::layout::{PAGE_HEIGHT, PAGE_WIDTH, layout_barillet};
use crate::io::formats::Format;
use crate::io::traits::BarilletRenderer;
use crate::models::Barillet;
use crate::{Error, Result};

const LAYER_NAME: &str = "Cards";
const MM_TO_PT: f64 = 72.0 / 25.4;

#[allow(clippy::cast_possible_truncation)]
fn mm(value: f64) -> Mm {
    Mm(value as f32)
}

fn color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    Color::Rgb(printpdf::Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

/// Canvas writing into a printpdf document.
///
/// Flips the top-left coordinates of the layout into PDF user space.
pub struct PrintPdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PrintPdfCanvas {
    /// Creates a document with one landscape A4 page.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in fonts cannot be registered.
    pub fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), LAYER_NAME);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| Error::operation("load_pdf_font", e))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| Error::operation("load_pdf_font", e))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
        })
    }

    /// Serializes the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    pub fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| Error::operation("save_pdf", e))
    }

    fn pdf_rect(rect: Rect) -> PdfRect {
        PdfRect::new(
            mm(rect.x),
            mm(PAGE_HEIGHT - rect.y - rect.height),
            mm(rect.x + rect.width),
            mm(PAGE_HEIGHT - rect.y),
        )
    }
}

impl PdfCanvas for PrintPdfCanvas {
    fn add_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn stroke_rect(&mut self, rect: Rect, line_width: f64, rgb: Rgb) {
        self.layer.set_outline_color(color(rgb));
        self.layer
            .set_outline_thickness((line_width * MM_TO_PT) as f32);
        self.layer
            .add_rect(Self::pdf_rect(rect).with_mode(PaintMode::Stroke));
    }

    fn fill_rect(&mut self, rect: Rect, rgb: Rgb) {
        self.layer.set_fill_color(color(rgb));
        self.layer
            .add_rect(Self::pdf_rect(rect).with_mode(PaintMode::Fill));
    }

    #[allow(clippy::cast_possible_truncation)]
    fn text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        let font = match style.weight {
            FontWeight::Normal => &self.regular,
            FontWeight::Bold => &self.bold,
        };
        self.layer.set_fill_color(color(style.color));
        self.layer
            .use_text(text, style.size_pt as f32, mm(x), mm(PAGE_HEIGHT - y), font);
    }
}

/// PDF renderer: the card grid drawn through printpdf.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRenderer;

impl PdfRenderer {
    /// Creates a new PDF renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BarilletRenderer for PdfRenderer {
    fn format(&self) -> Format {
        Format::Pdf
    }

    fn render(&self, barillet: &Barillet) -> Result<Vec<u8>> {
        let mut canvas = PrintPdfCanvas::new(&barillet.title)?;
        layout_barillet(barillet, &mut canvas);
        canvas.finish()
    }
}
