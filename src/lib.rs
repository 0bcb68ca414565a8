//! Lay out the Markdown of a generated plan and write it as a paginated PDF.
//!
//! The supported Markdown is deliberately small: `#`/`##`/`###` headings,
//! paragraphs with inline `**bold**`, numbered and bulleted lists (two spaces
//! per nesting level) and pipe tables. Everything else is rendered as text.
//!
//! ```
//! use plan_pdf::{render_markdown, LayoutOptions};
//!
//! let markdown = "# Q3 Plan\n\n**Goal:** grow revenue\n\n| Week | Task |\n|---|---|\n| 1 | Audit |";
//! let document = render_markdown(markdown, &LayoutOptions::default()).unwrap();
//! assert!(document.bytes.starts_with(b"%PDF"));
//! assert_eq!(document.page_count, 1);
//! ```
//!
//! Layout runs against the [Surface] trait; [PdfSurface] produces a PDF and
//! [Recorder] keeps the drawing calls around for inspection.

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Block classification, inline runs, pagination and tables
pub mod layout;
pub use layout::{render, RenderSummary};

mod options;
pub use options::*;

mod outline;
pub use outline::*;

mod page;
pub use page::*;

pub mod pagesize;

mod pdf_surface;
pub use pdf_surface::*;

mod recording;
pub use recording::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod standard_font;
pub use standard_font::StandardFont;

mod surface;
pub use surface::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

use std::path::Path;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;

/// A finished PDF
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Render `markdown` to PDF bytes using the built-in Helvetica faces
pub fn render_markdown(markdown: &str, options: &LayoutOptions) -> Result<RenderedDocument, PDFError> {
    render_markdown_with_fonts(markdown, options, FontFamily::helvetica())
}

/// Render `markdown` to PDF bytes, setting text in `fonts`
pub fn render_markdown_with_fonts(
    markdown: &str,
    options: &LayoutOptions,
    fonts: FontFamily,
) -> Result<RenderedDocument, PDFError> {
    let mut surface = PdfSurface::with_fonts(options, fonts);
    let summary = render(markdown, &mut surface, options);
    let bytes = surface.finalize()?;
    Ok(RenderedDocument {
        bytes,
        page_count: summary.page_count,
    })
}

/// Render `markdown` and write the PDF to `path`
pub fn render_markdown_to_file<P: AsRef<Path>>(
    markdown: &str,
    path: P,
    options: &LayoutOptions,
) -> Result<RenderSummary, PDFError> {
    let mut surface = PdfSurface::new(options);
    let summary = render(markdown, &mut surface, options);
    let bytes = surface.finalize()?;
    std::fs::write(path.as_ref(), bytes)?;
    log::info!(
        "wrote {} pages to {}",
        summary.page_count,
        path.as_ref().display()
    );
    Ok(summary)
}
