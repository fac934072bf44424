//! Card-grid layout.
//!
//! Themes are laid out as cards on A4 landscape pages, three columns by
//! three rows. All positions are millimetres from the top-left corner.

use super::canvas::{FontWeight, PdfCanvas, Rect, Rgb, TextStyle};
use super::metrics::{text_width, wrap_text};
use crate::models::{Barillet, DurationType, Theme, ThemeType};

/// Page width (A4 landscape).
pub const PAGE_WIDTH: f64 = 297.0;
/// Page height (A4 landscape).
pub const PAGE_HEIGHT: f64 = 210.0;
/// Outer margin and gutter between cards.
pub const MARGIN: f64 = 10.0;
/// Cards per row.
pub const COLUMNS: usize = 3;
/// Rows per page.
pub const ROWS: usize = 3;
/// Cards per page.
pub const CARDS_PER_PAGE: usize = COLUMNS * ROWS;

const PADDING: f64 = 3.0;
const BORDER_WIDTH: f64 = 0.4;
const BORDER_COLOR: Rgb = Rgb(220, 220, 220);
const BADGE_HEIGHT: f64 = 10.0;
const CATEGORY_COLOR: Rgb = Rgb(21, 128, 61);
const NOTES_COLOR: Rgb = Rgb(100, 100, 100);
const NOTES_LINE_HEIGHT: f64 = 3.0;
const NOTES_GAP: f64 = 5.0;
const UNTITLED: &str = "(pas de titre)";
const COMPARED_PREFIX: &str = "2x ";
const EMPTY_FIELD: &str = "-";

#[allow(clippy::cast_precision_loss)]
const fn span(count: usize, extent: f64) -> f64 {
    (extent - (count as f64 + 1.0) * MARGIN) / count as f64
}

/// Width of one card.
pub const CARD_WIDTH: f64 = span(COLUMNS, PAGE_WIDTH);
/// Height of one card.
pub const CARD_HEIGHT: f64 = span(ROWS, PAGE_HEIGHT);

/// Number of pages needed for `theme_count` cards.
#[must_use]
pub const fn page_count(theme_count: usize) -> usize {
    if theme_count == 0 {
        1
    } else {
        theme_count.div_ceil(CARDS_PER_PAGE)
    }
}

/// Top-left corner of the card at `index` on its page.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn card_origin(index: usize) -> (f64, f64) {
    let slot = index % CARDS_PER_PAGE;
    let row = (slot / COLUMNS) as f64;
    let col = (slot % COLUMNS) as f64;
    (
        MARGIN + col * (CARD_WIDTH + MARGIN),
        MARGIN + row * (CARD_HEIGHT + MARGIN),
    )
}

/// Title size in points, by character count.
#[must_use]
pub fn title_font_size(title: &str) -> f64 {
    match title.chars().count() {
        n if n > 33 => 11.0,
        n if n > 25 => 13.0,
        _ => 16.0,
    }
}

fn badge_colors(theme_type: ThemeType) -> (Rgb, Rgb) {
    match theme_type {
        ThemeType::Mixte => (Rgb(219, 234, 254), Rgb(29, 78, 216)),
        ThemeType::Comparee => (Rgb(233, 213, 255), Rgb(107, 33, 168)),
    }
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() { EMPTY_FIELD } else { text }
}

/// Text printed in the duration slot.
#[must_use]
pub fn duration_label(theme: &Theme) -> String {
    let prefix = if theme.theme_type == ThemeType::Comparee
        && theme.duration.kind == DurationType::Fixed
    {
        COMPARED_PREFIX
    } else {
        ""
    };
    format!("{prefix}{}", or_dash(&theme.duration.value))
}

/// Draws every theme of `barillet`, breaking pages every nine cards.
pub fn layout_barillet<C: PdfCanvas + ?Sized>(barillet: &Barillet, canvas: &mut C) {
    for (index, theme) in barillet.themes.iter().enumerate() {
        if index > 0 && index % CARDS_PER_PAGE == 0 {
            canvas.add_page();
        }
        let (x, y) = card_origin(index);
        draw_card(
            canvas,
            theme,
            Rect {
                x,
                y,
                width: CARD_WIDTH,
                height: CARD_HEIGHT,
            },
        );
    }
}

/// Draws one theme card inside `card`.
pub fn draw_card<C: PdfCanvas + ?Sized>(canvas: &mut C, theme: &Theme, card: Rect) {
    let Rect { x, y, width, height } = card;
    let right = x + width - PADDING;

    canvas.stroke_rect(card, BORDER_WIDTH, BORDER_COLOR);

    let (badge_fill, badge_text) = badge_colors(theme.theme_type);
    canvas.fill_rect(
        Rect {
            height: BADGE_HEIGHT,
            ..card
        },
        badge_fill,
    );
    canvas.text(
        theme.theme_type.as_str(),
        x + PADDING,
        y + 6.5,
        TextStyle::new(FontWeight::Bold, 11.0).with_color(badge_text),
    );

    let title = theme
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(UNTITLED);
    let title_style = TextStyle::new(FontWeight::Bold, title_font_size(title));
    let title_lines = wrap_text(
        title,
        title_style.weight,
        title_style.size_pt,
        width - 2.0 * PADDING,
    );
    let title_y = y + BADGE_HEIGHT + 8.0;
    for (offset, line) in [0.0, 5.0].iter().zip(&title_lines) {
        canvas.text(line, x + PADDING, title_y + offset, title_style);
    }

    let row_y = title_y + if title_lines.len() > 1 { 16.0 } else { 12.0 };
    canvas.text(
        or_dash(&theme.participation),
        x + PADDING,
        row_y,
        TextStyle::new(FontWeight::Normal, 12.0),
    );

    let category = or_dash(&theme.category);
    let category_style = TextStyle::new(FontWeight::Bold, 12.0).with_color(if theme.is_libre() {
        Rgb::BLACK
    } else {
        CATEGORY_COLOR
    });
    canvas.text(
        category,
        right - text_width(category, category_style.weight, category_style.size_pt),
        row_y,
        category_style,
    );

    let bottom_y = y + height - 8.0;
    let duration = duration_label(theme);
    let duration_style = TextStyle::new(FontWeight::Bold, 14.0);
    canvas.text(&duration, x + PADDING, bottom_y, duration_style);

    if theme.notes.trim().is_empty() {
        return;
    }
    let notes_style = TextStyle::new(FontWeight::Normal, 8.0).with_color(NOTES_COLOR);
    let duration_width = text_width(&duration, duration_style.weight, duration_style.size_pt);
    let notes_lines = wrap_text(
        &theme.notes,
        notes_style.weight,
        notes_style.size_pt,
        width - 2.0 * PADDING - duration_width - NOTES_GAP,
    );
    #[allow(clippy::cast_precision_loss)]
    let start_y = bottom_y - (notes_lines.len().saturating_sub(1)) as f64 * NOTES_LINE_HEIGHT;
    let line_ys = (0u32..).map(|i| start_y + f64::from(i) * NOTES_LINE_HEIGHT);
    for (line_y, line) in line_ys.zip(&notes_lines) {
        let line_x = right - text_width(line, notes_style.weight, notes_style.size_pt);
        canvas.text(line, line_x, line_y, notes_style);
    }
}
