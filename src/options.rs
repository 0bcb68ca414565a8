//! Everything that shapes a rendered document: page geometry, the type scale,
//! vertical rhythm and colours. The defaults reproduce the plan stylesheet:
//! A4 with 20mm margins, Helvetica, line height of half a millimetre per point
//! of font size.

use crate::colour::{Palette, Role};
use crate::info::Info;
use crate::pagesize::{self, PageSize};
use crate::units::{Mm, Pt};
use crate::PDFError;

/// Page size and margin, fixed for a whole rendering pass
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Geometry {
    pub page_width: Pt,
    pub page_height: Pt,
    /// Uniform margin on all four sides
    pub margin: Pt,
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            page_width: pagesize::A4.0,
            page_height: pagesize::A4.1,
            margin: Mm(20.0).into(),
        }
    }
}

impl Geometry {
    /// Build a geometry, refusing margins that leave no content area
    pub fn new(size: PageSize, margin: Pt) -> Result<Geometry, PDFError> {
        let (page_width, page_height) = size;
        if margin < Pt::ZERO || margin * 2.0 >= page_width || margin * 2.0 >= page_height {
            return Err(PDFError::DegenerateGeometry {
                margin: margin.0,
                width: page_width.0,
                height: page_height.0,
            });
        }
        Ok(Geometry {
            page_width,
            page_height,
            margin,
        })
    }

    /// page width − 2 × margin
    pub fn content_width(&self) -> Pt {
        self.page_width - self.margin * 2.0
    }

    /// The first writable y position on a page
    pub fn top(&self) -> Pt {
        self.margin
    }

    /// The last writable y position on a page
    pub fn bottom(&self) -> Pt {
        self.page_height - self.margin
    }

    pub fn left(&self) -> Pt {
        self.margin
    }

    pub fn right(&self) -> Pt {
        self.page_width - self.margin
    }
}

/// A rule drawn under a heading
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RuleStyle {
    pub role: Role,
    pub thickness: Pt,
    /// Gap below the rule, on top of its thickness
    pub space_after: Pt,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct HeadingStyle {
    pub size: Pt,
    pub role: Role,
    /// Space requested from the cursor before the heading is placed
    pub reserve: Pt,
    pub space_before: Pt,
    /// Gap between the heading text and its rule
    pub space_after_text: Pt,
    pub rule: Option<RuleStyle>,
    pub space_after: Pt,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ParagraphStyle {
    pub size: Pt,
    pub reserve: Pt,
    /// Trailing gap after a paragraph with inline bold runs
    pub inline_gap: Pt,
    /// Size of a line that is bold from end to end
    pub strong_size: Pt,
    pub strong_gap: Pt,
    /// Vertical space for an empty input line
    pub blank_gap: Pt,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ListStyle {
    pub size: Pt,
    pub reserve: Pt,
    pub line_height: Pt,
    /// x of the number token, from the left margin
    pub number_inset: Pt,
    /// x of ordered item text, from the left margin
    pub ordered_text_inset: Pt,
    /// x of the bullet glyph, from the item's indent
    pub bullet_inset: Pt,
    /// x of unordered item text, from the item's indent
    pub bullet_text_inset: Pt,
    /// Width kept free right of unordered item text, on top of its indent
    pub bullet_wrap_allowance: Pt,
    /// Horizontal indent per nesting level
    pub indent_step: Pt,
    pub bullet: char,
    pub ordered_inline_gap: Pt,
    pub bullet_inline_gap: Pt,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TableStyle {
    pub header_size: Pt,
    pub body_size: Pt,
    pub min_row_height: Pt,
    pub cell_line_height: Pt,
    /// Extra height on top of a cell's lines
    pub cell_padding: Pt,
    /// Horizontal inset of cell text on each side
    pub cell_inset: Pt,
    /// Distance from the top of a row to the first baseline in its cells
    pub baseline_offset: Pt,
    pub border_width: Pt,
    pub space_after: Pt,
}

/// All knobs of the layout engine and its PDF output
#[derive(Clone, PartialEq, Debug)]
pub struct LayoutOptions {
    pub geometry: Geometry,
    /// Styles for heading levels 1, 2 and 3
    pub headings: [HeadingStyle; 3],
    pub paragraph: ParagraphStyle,
    pub list: ListStyle,
    pub table: TableStyle,
    /// Baseline-to-baseline distance per point of font size
    pub line_height_ratio: f32,
    pub palette: Palette,
    /// Document metadata written to the PDF info dictionary
    pub info: Info,
    /// Emit an outline (bookmarks) for level 1 and 2 headings
    pub outline: bool,
    /// Flate-compress page content streams
    pub compress: bool,
}

fn mm(value: f32) -> Pt {
    Mm(value).into()
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            geometry: Geometry::default(),
            headings: [
                HeadingStyle {
                    size: Pt(20.0),
                    role: Role::Title,
                    reserve: mm(15.0),
                    space_before: mm(8.0),
                    space_after_text: mm(1.0),
                    rule: Some(RuleStyle {
                        role: Role::RuleHeavy,
                        thickness: mm(1.0),
                        space_after: mm(2.0),
                    }),
                    space_after: mm(5.0),
                },
                HeadingStyle {
                    size: Pt(16.0),
                    role: Role::Subtitle,
                    reserve: mm(12.0),
                    space_before: mm(6.0),
                    space_after_text: mm(1.0),
                    rule: Some(RuleStyle {
                        role: Role::RuleLight,
                        thickness: mm(0.5),
                        space_after: mm(2.0),
                    }),
                    space_after: mm(4.0),
                },
                HeadingStyle {
                    size: Pt(13.0),
                    role: Role::Heading,
                    reserve: mm(10.0),
                    space_before: mm(5.0),
                    space_after_text: mm(3.0),
                    rule: None,
                    space_after: Pt::ZERO,
                },
            ],
            paragraph: ParagraphStyle {
                size: Pt(11.0),
                reserve: mm(6.0),
                inline_gap: mm(6.0),
                strong_size: Pt(10.0),
                strong_gap: mm(1.0),
                blank_gap: mm(3.0),
            },
            list: ListStyle {
                size: Pt(11.0),
                reserve: mm(6.0),
                line_height: mm(5.5),
                number_inset: mm(2.0),
                ordered_text_inset: mm(12.0),
                bullet_inset: mm(2.0),
                bullet_text_inset: mm(8.0),
                bullet_wrap_allowance: mm(10.0),
                indent_step: mm(8.0),
                bullet: '•',
                ordered_inline_gap: mm(6.5),
                bullet_inline_gap: mm(6.0),
            },
            table: TableStyle {
                header_size: Pt(11.0),
                body_size: Pt(10.0),
                min_row_height: mm(10.0),
                cell_line_height: mm(5.0),
                cell_padding: mm(4.0),
                cell_inset: mm(2.0),
                baseline_offset: mm(6.0),
                border_width: mm(0.2),
                space_after: mm(5.0),
            },
            line_height_ratio: 0.5 * 72.0 / 25.4,
            palette: Palette::default(),
            info: Info::default(),
            outline: true,
            compress: true,
        }
    }
}

impl LayoutOptions {
    pub fn new() -> LayoutOptions {
        LayoutOptions::default()
    }

    /// Set the page size and margin, modifying `self`
    pub fn geometry(&mut self, geometry: Geometry) -> &mut Self {
        self.geometry = geometry;
        self
    }

    /// Set the palette, modifying `self`
    pub fn palette(&mut self, palette: Palette) -> &mut Self {
        self.palette = palette;
        self
    }

    /// Set the document metadata, modifying `self`
    pub fn info(&mut self, info: Info) -> &mut Self {
        self.info = info;
        self
    }

    /// Turn the bookmarks outline on or off, modifying `self`
    pub fn outline(&mut self, outline: bool) -> &mut Self {
        self.outline = outline;
        self
    }

    /// Turn content stream compression on or off, modifying `self`
    pub fn compress(&mut self, compress: bool) -> &mut Self {
        self.compress = compress;
        self
    }

    /// Baseline-to-baseline distance for running text at `size`
    pub fn line_height(&self, size: Pt) -> Pt {
        size * self.line_height_ratio
    }

    /// Style of a heading level; levels outside 1..=3 clamp to the nearest one
    pub fn heading(&self, level: u8) -> &HeadingStyle {
        let index = (level.clamp(1, 3) - 1) as usize;
        &self.headings[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_geometry_is_a4_with_20mm_margins() {
        let geometry = Geometry::default();
        let content: Mm = geometry.content_width().into();
        assert!((content.0 - 170.0).abs() < 1e-3);
        assert_eq!(geometry.bottom(), geometry.page_height - geometry.margin);
    }

    #[test]
    fn rejects_margins_that_swallow_the_page() {
        assert!(Geometry::new(pagesize::A5, Mm(80.0).into()).is_err());
        assert!(Geometry::new(pagesize::A5, Pt(-1.0)).is_err());
        assert!(Geometry::new(pagesize::A5, Mm(10.0).into()).is_ok());
    }

    #[test]
    fn line_height_is_half_a_millimetre_per_point() {
        let options = LayoutOptions::default();
        let lh: Mm = options.line_height(Pt(11.0)).into();
        assert!((lh.0 - 5.5).abs() < 1e-3);
    }

    #[test]
    fn heading_levels_clamp() {
        let options = LayoutOptions::default();
        assert_eq!(options.heading(0).size, Pt(20.0));
        assert_eq!(options.heading(9).size, Pt(13.0));
    }
}
