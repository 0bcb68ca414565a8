use crate::colour::{Palette, Role};
use crate::document::Document;
use crate::font::{FontFamily, SpanFont};
use crate::options::{Geometry, LayoutOptions};
use crate::page::{LineLayout, Page, RectLayout, RectPaint, SpanLayout};
use crate::rect::Rect;
use crate::surface::{Paint, Surface};
use crate::units::Pt;
use crate::PDFError;

/// A [Surface] that builds a PDF [Document].
///
/// Layout coordinates (top-down) are flipped into PDF user space here and
/// colour roles are resolved through the [Palette].
pub struct PdfSurface {
    document: Document,
    geometry: Geometry,
    palette: Palette,
    outline: bool,
}

impl PdfSurface {
    /// A surface using the built-in Helvetica faces
    pub fn new(options: &LayoutOptions) -> PdfSurface {
        PdfSurface::with_fonts(options, FontFamily::helvetica())
    }

    pub fn with_fonts(options: &LayoutOptions, fonts: FontFamily) -> PdfSurface {
        let mut document = Document::new(fonts);
        document.compress = options.compress;
        if !options.info.is_empty() || options.info.created.is_some() {
            document.set_info(options.info.clone());
        }

        let mut surface = PdfSurface {
            document,
            geometry: options.geometry,
            palette: options.palette,
            outline: options.outline,
        };
        surface.new_page();
        surface
    }

    /// The document built so far
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn flip(&self, y: Pt) -> Pt {
        self.geometry.page_height - y
    }

    fn flip_point(&self, (x, y): (Pt, Pt)) -> (Pt, Pt) {
        (x, self.flip(y))
    }

    fn page(&mut self) -> Option<&mut Page> {
        let page = self.document.last_page_mut();
        if page.is_none() {
            log::error!("drawing on a document without pages");
        }
        page
    }
}

impl Surface for PdfSurface {
    type Output = Vec<u8>;

    fn measure_text_width(&self, text: &str, font: SpanFont) -> Pt {
        self.document.fonts.width_of_text(text, font)
    }

    fn draw_text(&mut self, text: &str, origin: (Pt, Pt), font: SpanFont, role: Role) {
        let span = SpanLayout {
            text: text.to_string(),
            font,
            colour: self.palette.colour(role),
            coords: self.flip_point(origin),
        };
        if let Some(page) = self.page() {
            page.add_span(span);
        }
    }

    fn draw_rect(&mut self, rect: Rect, paint: Paint) {
        // PDF rectangles are anchored at their lower-left corner
        let rect = Rect {
            x1: rect.x1,
            y1: self.flip(rect.y2),
            x2: rect.x2,
            y2: self.flip(rect.y1),
        };
        let paint = match paint {
            Paint::Fill(role) => RectPaint::Fill(self.palette.colour(role)),
            Paint::Stroke { role, width } => RectPaint::Stroke {
                colour: self.palette.colour(role),
                width,
            },
        };
        if let Some(page) = self.page() {
            page.add_rect(RectLayout { rect, paint });
        }
    }

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), role: Role, thickness: Pt) {
        let line = LineLayout {
            from: self.flip_point(from),
            to: self.flip_point(to),
            colour: self.palette.colour(role),
            width: thickness,
        };
        if let Some(page) = self.page() {
            page.add_line(line);
        }
    }

    fn new_page(&mut self) {
        let Geometry {
            page_width,
            page_height,
            margin,
        } = self.geometry;
        self.document
            .add_page(Page::new(page_width, page_height, margin));
    }

    fn bookmark(&mut self, title: &str, level: u8) {
        if !self.outline {
            return;
        }
        let page_index = self.document.page_count().saturating_sub(1);
        self.document
            .outline
            .add_bookmark(level, title.to_string(), page_index);
    }

    fn page_count(&self) -> usize {
        self.document.page_count()
    }

    fn finalize(self) -> Result<Vec<u8>, PDFError> {
        let mut bytes = Vec::new();
        self.document.write(&mut bytes)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageContents;

    #[test]
    fn flips_layout_space_into_pdf_space() {
        let options = LayoutOptions::default();
        let height = options.geometry.page_height;
        let mut surface = PdfSurface::new(&options);

        surface.draw_text("Hi", (Pt(10.0), Pt(30.0)), SpanFont::regular(Pt(11.0)), Role::Body);
        surface.draw_rect(
            Rect::from_xywh(Pt(10.0), Pt(30.0), Pt(50.0), Pt(20.0)),
            Paint::Fill(Role::TableFill),
        );

        let page = surface.document().page(0).unwrap();
        let span = page.text().next().unwrap();
        assert_eq!(span.coords, (Pt(10.0), height - Pt(30.0)));
        assert_eq!(span.colour, options.palette.body);

        match &page.contents[1] {
            PageContents::Rect(r) => {
                assert_eq!(r.rect.y1, height - Pt(50.0));
                assert_eq!(r.rect.y2, height - Pt(30.0));
            }
            other => panic!("expected a rect, got {other:?}"),
        }
    }

    #[test]
    fn bookmarks_point_at_the_current_page() {
        let mut surface = PdfSurface::new(&LayoutOptions::default());
        surface.bookmark("Intro", 1);
        surface.new_page();
        surface.bookmark("Budget", 2);

        let outline = &surface.document().outline;
        assert_eq!(outline.entries.len(), 1);
        assert_eq!(outline.entries[0].page_index, 0);
        assert_eq!(outline.entries[0].children[0].page_index, 1);
    }

    #[test]
    fn finalizes_to_pdf_bytes() {
        let mut surface = PdfSurface::new(&LayoutOptions::default());
        surface.draw_text("Hi", (Pt(10.0), Pt(30.0)), SpanFont::bold(Pt(11.0)), Role::Strong);
        let bytes = surface.finalize().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
