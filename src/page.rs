use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::{FontFamily, FontStyle, SpanFont};
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::PDFError;
use pdf_writer::{Filter, Finish, Name, Pdf};

/// A run of text placed at a baseline origin, in PDF user space
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// How a rectangle is painted
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum RectPaint {
    Fill(Colour),
    Stroke { colour: Colour, width: Pt },
}

#[derive(Clone, PartialEq, Debug)]
pub struct RectLayout {
    pub rect: Rect,
    pub paint: RectPaint,
}

#[derive(Clone, PartialEq, Debug)]
pub struct LineLayout {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub colour: Colour,
    pub width: Pt,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(SpanLayout),
    Rect(RectLayout),
    Line(LineLayout),
}

/// One page of a [crate::Document]. Coordinates are PDF user space: origin in
/// the bottom-left corner, y growing upwards.
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// Everything drawn on the page, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(width: Pt, height: Pt, margin: Pt) -> Page {
        Page {
            media_box: Rect {
                x1: Pt::ZERO,
                y1: Pt::ZERO,
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margin,
                y1: margin,
                x2: width - margin,
                y2: height - margin,
            },
            contents: Vec::default(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(span));
    }

    pub fn add_rect(&mut self, rect: RectLayout) {
        self.contents.push(PageContents::Rect(rect));
    }

    pub fn add_line(&mut self, line: LineLayout) {
        self.contents.push(PageContents::Line(line));
    }

    /// All text on the page in painting order, mostly useful for tests
    pub fn text(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Text(span) => Some(span),
            _ => None,
        })
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &FontFamily,
        compress: bool,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.get_or_gen(RefType::Page(page_index));
        let page_tree_id = refs.get_or_gen(RefType::PageTree);
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for style in [FontStyle::Regular, FontStyle::Bold] {
            let index = FontFamily::index(style);
            if let Some(font_ref) = refs.get(RefType::Font(index)) {
                resource_fonts.pair(Name(format!("F{index}").as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        if compress {
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
                rendered.as_slice(),
                miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
            );
            writer
                .stream(content_id, compressed.as_slice())
                .filter(Filter::FlateDecode);
        } else {
            writer.stream(content_id, rendered.as_slice());
        }
        Ok(())
    }
}
