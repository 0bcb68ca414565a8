//! The drawing/metrics collaborator the layout engine renders through.
//!
//! Coordinates handed to a surface are in layout space: origin at the top-left
//! corner of the page, y growing downwards, text positioned by its baseline.

use crate::colour::Role;
use crate::font::SpanFont;
use crate::rect::Rect;
use crate::units::Pt;
use crate::PDFError;

/// How a rectangle is painted. Colours are given as roles and resolved by the surface.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Paint {
    Fill(Role),
    Stroke { role: Role, width: Pt },
}

/// Something that can measure text and put ink on pages.
///
/// A surface starts out with one empty page. Layout never asks for a page
/// without drawing on it afterwards, so [Surface::page_count] after a pass is
/// the number of pages the document needs.
pub trait Surface {
    /// What [Surface::finalize] produces
    type Output;

    /// Rendered width of `text` in `font`
    fn measure_text_width(&self, text: &str, font: SpanFont) -> Pt;

    /// Split `text` into lines that each fit `width` when set in `font`
    fn wrap_text(&self, text: &str, font: SpanFont, width: Pt) -> Vec<String> {
        wrap_words(text, width, |s| self.measure_text_width(s, font))
    }

    /// Draw `text` with its baseline starting at `origin`
    fn draw_text(&mut self, text: &str, origin: (Pt, Pt), font: SpanFont, role: Role);

    fn draw_rect(&mut self, rect: Rect, paint: Paint);

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), role: Role, thickness: Pt);

    /// Start a new page; subsequent drawing lands on it
    fn new_page(&mut self);

    /// Record an outline entry for a heading on the current page
    fn bookmark(&mut self, _title: &str, _level: u8) {}

    fn page_count(&self) -> usize;

    /// Encode everything drawn so far
    fn finalize(self) -> Result<Self::Output, PDFError>
    where
        Self: Sized;
}

/// Greedy word wrap: words separated by single spaces are packed onto a line
/// while the line still fits. A word wider than `width` on its own is broken
/// between characters. Always yields at least one line, possibly empty.
pub fn wrap_words<F>(text: &str, width: Pt, measure: F) -> Vec<String>
where
    F: Fn(&str) -> Pt,
{
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for (i, word) in text.split(' ').enumerate() {
        if i > 0 {
            let candidate = format!("{line} {word}");
            if measure(&candidate) <= width {
                line = candidate;
                continue;
            }
            lines.push(std::mem::take(&mut line));
        }

        if measure(word) <= width {
            line.push_str(word);
            continue;
        }

        // too wide for any line: hard break between characters
        for ch in word.chars() {
            line.push(ch);
            if measure(&line) > width && line.chars().count() > 1 {
                line.pop();
                lines.push(std::mem::take(&mut line));
                line.push(ch);
            }
        }
    }

    lines.push(line);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// every character is 1pt wide
    fn chars(s: &str) -> Pt {
        Pt(s.chars().count() as f32)
    }

    #[test]
    fn packs_words_greedily() {
        let lines = wrap_words("the quick brown fox jumps", Pt(10.0), chars);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn breaks_words_wider_than_the_line() {
        let lines = wrap_words("a abcdefghij b", Pt(4.0), chars);
        assert_eq!(lines, vec!["a", "abcd", "efgh", "ij b"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap_words("", Pt(10.0), chars), vec![String::new()]);
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(wrap_words("Budget", Pt(100.0), chars), vec!["Budget"]);
    }
}
