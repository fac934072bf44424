//! Drawing surface used by the card layout.
//!
//! Coordinates are millimetres from the top-left corner of the page and
//! text is positioned by its baseline. The layout only talks to
//! [`PdfCanvas`]; the printpdf backend and [`RecordingCanvas`] implement it.

/// An sRGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self(0, 0, 0);
}

/// Helvetica face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Helvetica.
    Normal,
    /// Helvetica-Bold.
    Bold,
}

/// How a run of text is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Face.
    pub weight: FontWeight,
    /// Size in points.
    pub size_pt: f64,
    /// Fill colour.
    pub color: Rgb,
}

impl TextStyle {
    /// Creates a black text style.
    #[must_use]
    pub const fn new(weight: FontWeight, size_pt: f64) -> Self {
        Self {
            weight,
            size_pt,
            color: Rgb::BLACK,
        }
    }

    /// Sets the colour.
    #[must_use]
    pub const fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }
}

/// Axis-aligned rectangle, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// Drawing operations the card layout needs.
///
/// A canvas starts on its first page.
pub trait PdfCanvas {
    /// Starts a new page and makes it current.
    fn add_page(&mut self);

    /// Strokes the outline of `rect`.
    fn stroke_rect(&mut self, rect: Rect, line_width: f64, color: Rgb);

    /// Fills `rect`.
    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Draws `text` with its baseline starting at (`x`, `y`).
    fn text(&mut self, text: &str, x: f64, y: f64, style: TextStyle);
}

/// A recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Outline rectangle.
    Stroke {
        /// Area.
        rect: Rect,
        /// Line width in millimetres.
        line_width: f64,
        /// Stroke colour.
        color: Rgb,
    },
    /// Filled rectangle.
    Fill {
        /// Area.
        rect: Rect,
        /// Fill colour.
        color: Rgb,
    },
    /// Text run.
    Text {
        /// Content.
        text: String,
        /// Baseline start, horizontal.
        x: f64,
        /// Baseline.
        y: f64,
        /// Style.
        style: TextStyle,
    },
}

/// Canvas that keeps every operation, grouped by page.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingCanvas {
    pages: Vec<Vec<DrawOp>>,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self {
            pages: vec![Vec::new()],
        }
    }
}

impl RecordingCanvas {
    /// Creates a canvas with one empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Operations drawn on `page` (0-based).
    #[must_use]
    pub fn ops(&self, page: usize) -> &[DrawOp] {
        self.pages.get(page).map_or(&[], Vec::as_slice)
    }

    /// Text runs drawn on `page`, in drawing order.
    pub fn texts(&self, page: usize) -> impl Iterator<Item = (&str, f64, f64, &TextStyle)> {
        self.ops(page).iter().filter_map(|op| match op {
            DrawOp::Text { text, x, y, style } => Some((text.as_str(), *x, *y, style)),
            _ => None,
        })
    }

    /// Finds the first text run equal to `needle` on any page.
    #[must_use]
    pub fn find_text(&self, needle: &str) -> Option<(usize, f64, f64, TextStyle)> {
        (0..self.pages.len()).find_map(|page| {
            self.texts(page)
                .find(|(text, ..)| *text == needle)
                .map(|(_, x, y, style)| (page, x, y, *style))
        })
    }

    fn current(&mut self) -> &mut Vec<DrawOp> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl PdfCanvas for RecordingCanvas {
    fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn stroke_rect(&mut self, rect: Rect, line_width: f64, color: Rgb) {
        self.current().push(DrawOp::Stroke {
            rect,
            line_width,
            color,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.current().push(DrawOp::Fill { rect, color });
    }

    fn text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        self.current().push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            style,
        });
    }
}
