//! PDF card-grid export.
//!
//! [`layout`] computes the cards against the [`PdfCanvas`] trait. The
//! printpdf backend, compiled with the `pdf-export` feature, writes the
//! file; [`RecordingCanvas`] captures the same drawing for inspection.

#[cfg(feature = "pdf-export")]
mod backend;
pub mod canvas;
pub mod layout;
pub mod metrics;

#[cfg(feature = "pdf-export")]
pub use backend::{PdfRenderer, PrintPdfCanvas};
pub use canvas::{DrawOp, FontWeight, PdfCanvas, RecordingCanvas, Rect, Rgb, TextStyle};
pub use layout::{CARDS_PER_PAGE, layout_barillet, page_count};
