//! A [Surface] that remembers what was drawn instead of encoding it. Layout
//! tests inspect the recording; metrics come from a real [FontFamily] so the
//! positions match what a PDF would get.

use crate::colour::Role;
use crate::font::{FontFamily, FontStyle, SpanFont};
use crate::rect::Rect;
use crate::surface::{Paint, Surface};
use crate::units::Pt;
use crate::PDFError;

/// A single drawing call, in layout space
#[derive(Clone, PartialEq, Debug)]
pub enum DrawOp {
    Text {
        text: String,
        x: Pt,
        y: Pt,
        font: SpanFont,
        role: Role,
    },
    Rect {
        rect: Rect,
        paint: Paint,
    },
    Line {
        from: (Pt, Pt),
        to: (Pt, Pt),
        role: Role,
        thickness: Pt,
    },
    Bookmark {
        title: String,
        level: u8,
    },
}

pub struct Recorder {
    fonts: FontFamily,
    pages: Vec<Vec<DrawOp>>,
}

impl Default for Recorder {
    fn default() -> Self {
        Recorder::new(FontFamily::helvetica())
    }
}

impl Recorder {
    pub fn new(fonts: FontFamily) -> Recorder {
        Recorder {
            fonts,
            pages: vec![Vec::new()],
        }
    }

    /// What has been drawn so far, page by page
    pub fn pages(&self) -> &[Vec<DrawOp>] {
        &self.pages
    }

    fn push(&mut self, op: DrawOp) {
        // always at least one page
        if let Some(page) = self.pages.last_mut() {
            page.push(op);
        }
    }
}

impl Surface for Recorder {
    type Output = Recording;

    fn measure_text_width(&self, text: &str, font: SpanFont) -> Pt {
        self.fonts.width_of_text(text, font)
    }

    fn draw_text(&mut self, text: &str, origin: (Pt, Pt), font: SpanFont, role: Role) {
        self.push(DrawOp::Text {
            text: text.to_string(),
            x: origin.0,
            y: origin.1,
            font,
            role,
        });
    }

    fn draw_rect(&mut self, rect: Rect, paint: Paint) {
        self.push(DrawOp::Rect { rect, paint });
    }

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), role: Role, thickness: Pt) {
        self.push(DrawOp::Line {
            from,
            to,
            role,
            thickness,
        });
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn bookmark(&mut self, title: &str, level: u8) {
        self.push(DrawOp::Bookmark {
            title: title.to_string(),
            level,
        });
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn finalize(self) -> Result<Recording, PDFError> {
        Ok(Recording { pages: self.pages })
    }
}

/// The finished output of a [Recorder]
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Recording {
    pub pages: Vec<Vec<DrawOp>>,
}

/// A text op together with the page it landed on
#[derive(Clone, PartialEq, Debug)]
pub struct PlacedText<'a> {
    pub page: usize,
    pub text: &'a str,
    pub x: Pt,
    pub y: Pt,
    pub font: SpanFont,
    pub role: Role,
}

impl PlacedText<'_> {
    pub fn is_bold(&self) -> bool {
        self.font.style == FontStyle::Bold
    }
}

impl Recording {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every op in drawing order, with its page index
    pub fn ops(&self) -> impl Iterator<Item = (usize, &DrawOp)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(page, ops)| ops.iter().map(move |op| (page, op)))
    }

    /// Every text op in drawing order
    pub fn texts(&self) -> impl Iterator<Item = PlacedText<'_>> {
        self.ops().filter_map(|(page, op)| match op {
            DrawOp::Text {
                text,
                x,
                y,
                font,
                role,
            } => Some(PlacedText {
                page,
                text: text.as_str(),
                x: *x,
                y: *y,
                font: *font,
                role: *role,
            }),
            _ => None,
        })
    }

    /// The first text op whose text is exactly `text`
    pub fn find_text(&self, text: &str) -> Option<PlacedText<'_>> {
        self.texts().find(|t| t.text == text)
    }

    /// All drawn text concatenated per line of identical baseline and page
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines: Vec<(usize, Pt, String)> = Vec::new();
        for t in self.texts() {
            match lines.last_mut() {
                Some((page, y, line)) if *page == t.page && *y == t.y => line.push_str(t.text),
                _ => lines.push((t.page, t.y, t.text.to_string())),
            }
        }
        lines.into_iter().map(|(_, _, line)| line).collect()
    }

    pub fn rects(&self) -> impl Iterator<Item = (usize, &Rect, &Paint)> {
        self.ops().filter_map(|(page, op)| match op {
            DrawOp::Rect { rect, paint } => Some((page, rect, paint)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (usize, &DrawOp)> {
        self.ops()
            .filter(|(_, op)| matches!(op, DrawOp::Line { .. }))
    }

    pub fn bookmarks(&self) -> impl Iterator<Item = (usize, &str, u8)> {
        self.ops().filter_map(|(page, op)| match op {
            DrawOp::Bookmark { title, level } => Some((page, title.as_str(), *level)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_page_and_records_in_order() {
        let mut recorder = Recorder::default();
        assert_eq!(recorder.page_count(), 1);

        recorder.draw_text("a", (Pt(1.0), Pt(2.0)), SpanFont::regular(Pt(11.0)), Role::Body);
        recorder.new_page();
        recorder.draw_text("b", (Pt(1.0), Pt(2.0)), SpanFont::bold(Pt(11.0)), Role::Strong);

        let recording = recorder.finalize().unwrap();
        assert_eq!(recording.page_count(), 2);
        let texts: Vec<_> = recording.texts().map(|t| (t.page, t.text, t.is_bold())).collect();
        assert_eq!(texts, vec![(0, "a", false), (1, "b", true)]);
    }

    #[test]
    fn measures_with_the_font_family() {
        let recorder = Recorder::default();
        let regular = recorder.measure_text_width("Plan", SpanFont::regular(Pt(10.0)));
        let bold = recorder.measure_text_width("Plan", SpanFont::bold(Pt(10.0)));
        assert!(regular > Pt::ZERO);
        assert!(bold > regular);
    }
}
