//! Turns [PageContents] into a raw PDF content stream.

use crate::colour::Colour;
use crate::font::FontFamily;
use crate::page::{LineLayout, PageContents, RectLayout, RectPaint, SpanLayout};
use std::io::Write;

/// Renders page contents to a PDF content stream.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &FontFamily,
) -> Result<Vec<u8>, std::io::Error> {
    if contents.is_empty() {
        return Ok(Vec::default());
    }

    let mut content: Vec<u8> = Vec::default();
    let mut substituted = 0;

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(span) => {
                substituted += render_span(&mut content, span, fonts)?;
            }
            PageContents::Rect(rect) => render_rect(&mut content, rect)?,
            PageContents::Line(line) => render_line(&mut content, line)?,
        }
    }

    if substituted > 0 {
        log::warn!("{substituted} characters have no glyph in the document fonts and were replaced");
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_span(
    content: &mut Vec<u8>,
    span: &SpanLayout,
    fonts: &FontFamily,
) -> Result<usize, std::io::Error> {
    if span.text.is_empty() {
        return Ok(0);
    }

    let (hex, substituted) = fonts.face(span.font.style).encode_hex(&span.text);

    write!(content, "q\n")?;
    write_fill_colour(content, span.colour)?;
    write!(content, "BT\n")?;
    write!(
        content,
        "/F{} {} Tf\n",
        FontFamily::index(span.font.style),
        span.font.size
    )?;
    write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
    write!(content, "<{hex}> Tj\n")?;
    write!(content, "ET\n")?;
    write!(content, "Q\n")?;

    Ok(substituted)
}

#[allow(clippy::write_with_newline)]
fn render_rect(content: &mut Vec<u8>, layout: &RectLayout) -> Result<(), std::io::Error> {
    let r = &layout.rect;
    write!(content, "q\n")?;
    match layout.paint {
        RectPaint::Fill(colour) => {
            write_fill_colour(content, colour)?;
            write!(content, "{} {} {} {} re\nf\n", r.x1, r.y1, r.width(), r.height())?;
        }
        RectPaint::Stroke { colour, width } => {
            write_stroke_colour(content, colour)?;
            write!(content, "{width} w\n")?;
            write!(content, "{} {} {} {} re\nS\n", r.x1, r.y1, r.width(), r.height())?;
        }
    }
    write!(content, "Q\n")
}

#[allow(clippy::write_with_newline)]
fn render_line(content: &mut Vec<u8>, line: &LineLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    write_stroke_colour(content, line.colour)?;
    write!(content, "{} w\n", line.width)?;
    write!(content, "{} {} m\n", line.from.0, line.from.1)?;
    write!(content, "{} {} l\n", line.to.0, line.to.1)?;
    write!(content, "S\n")?;
    write!(content, "Q\n")
}

#[allow(clippy::write_with_newline)]
fn write_fill_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} k\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[allow(clippy::write_with_newline)]
fn write_stroke_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} RG\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} K\n"),
        Colour::Grey { g } => write!(content, "{g} G\n"),
    }
}
