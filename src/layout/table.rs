//! Pipe tables. Rows are buffered until the table ends, then measured and
//! drawn row by row with the header repeated at the top of every page the
//! table continues on.

use crate::colour::Role;
use crate::font::SpanFont;
use crate::layout::cursor::Cursor;
use crate::options::TableStyle;
use crate::rect::Rect;
use crate::surface::{Paint, Surface};
use crate::units::Pt;

/// One measured row: every cell wrapped to the column width
#[derive(Clone, PartialEq, Debug)]
pub struct RowLayout {
    pub cells: Vec<Vec<String>>,
    pub height: Pt,
    pub font: SpanFont,
    pub header: bool,
}

/// A fully measured table, ready to be drawn
#[derive(Clone, PartialEq, Debug)]
pub struct TableLayout {
    pub columns: usize,
    pub column_width: Pt,
    pub header: RowLayout,
    pub body: Vec<RowLayout>,
}

impl TableLayout {
    /// Measure `rows`, the first of which is the header. The header decides
    /// the column count. Returns `None` for a table without rows or columns.
    pub fn compute<S: Surface + ?Sized>(
        rows: &[Vec<&str>],
        surface: &S,
        content_width: Pt,
        style: &TableStyle,
    ) -> Option<TableLayout> {
        let (header, body) = rows.split_first()?;
        let columns = header.len();
        if columns == 0 {
            return None;
        }
        let column_width = content_width / columns as f32;

        for (i, row) in body.iter().enumerate() {
            if row.len() != columns {
                log::warn!(
                    "table row {} has {} cells but the header has {}",
                    i + 2,
                    row.len(),
                    columns
                );
            }
        }

        let measure = |row: &[&str], font: SpanFont, header: bool| {
            measure_row(row, columns, font, header, surface, column_width, style)
        };

        Some(TableLayout {
            columns,
            column_width,
            header: measure(header.as_slice(), SpanFont::bold(style.header_size), true),
            body: body
                .iter()
                .map(|row| measure(row.as_slice(), SpanFont::regular(style.body_size), false))
                .collect(),
        })
    }

    pub fn width(&self) -> Pt {
        self.column_width * self.columns as f32
    }

    /// Draw the table at the cursor, starting pages as needed. Returns the
    /// number of times the header was repeated.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        cursor: &mut Cursor,
        left: Pt,
        style: &TableStyle,
    ) -> usize {
        let mut repeats = 0;

        cursor.ensure_space(self.header.height, surface);
        self.draw_row(&self.header, surface, cursor, left, style);

        for row in self.body.iter() {
            if cursor.ensure_space(row.height, surface) {
                self.draw_row(&self.header, surface, cursor, left, style);
                repeats += 1;
            }
            self.draw_row(row, surface, cursor, left, style);
        }

        cursor.advance(style.space_after);
        repeats
    }

    fn draw_row<S: Surface + ?Sized>(
        &self,
        row: &RowLayout,
        surface: &mut S,
        cursor: &mut Cursor,
        left: Pt,
        style: &TableStyle,
    ) {
        let top = cursor.y();

        if row.header {
            surface.draw_rect(
                Rect::from_xywh(left, top, self.width(), row.height),
                Paint::Fill(Role::TableFill),
            );
        }

        for (column, lines) in row.cells.iter().enumerate() {
            let x = left + self.column_width * column as f32;
            surface.draw_rect(
                Rect::from_xywh(x, top, self.column_width, row.height),
                Paint::Stroke {
                    role: Role::TableBorder,
                    width: style.border_width,
                },
            );

            let mut baseline = top + style.baseline_offset;
            for line in lines.iter().filter(|line| !line.is_empty()) {
                surface.draw_text(line, (x + style.cell_inset, baseline), row.font, Role::TableText);
                baseline += style.cell_line_height;
            }
        }

        cursor.advance(row.height);
    }
}

/// Wrap every cell and size the row to its tallest cell. Short rows are
/// padded with empty cells so their borders line up with the header.
fn measure_row<S: Surface + ?Sized>(
    row: &[&str],
    columns: usize,
    font: SpanFont,
    header: bool,
    surface: &S,
    column_width: Pt,
    style: &TableStyle,
) -> RowLayout {
    let wrap_width = column_width - style.cell_inset * 2.0;
    let padding = columns.saturating_sub(row.len());

    let cells: Vec<Vec<String>> = row
        .iter()
        .copied()
        .chain(std::iter::repeat("").take(padding))
        .map(|cell| surface.wrap_text(cell, font, wrap_width))
        .collect();

    let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
    let height = (style.cell_line_height * lines as f32 + style.cell_padding).max(style.min_row_height);

    RowLayout {
        cells,
        height,
        font,
        header,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Geometry, LayoutOptions};
    use crate::recording::{DrawOp, Recorder};
    use pretty_assertions::assert_eq;

    #[test]
    fn three_columns_share_the_content_width() {
        let options = LayoutOptions::default();
        let surface = Recorder::default();
        let width = options.geometry.content_width();
        let rows = vec![vec!["A", "B", "C"], vec!["1", "2", "3"]];

        let table = TableLayout::compute(&rows, &surface, width, &options.table).unwrap();
        assert_eq!(table.columns, 3);
        assert!((table.column_width.0 - width.0 / 3.0).abs() < 1e-3);
        assert_eq!(table.header.height, options.table.min_row_height);
        assert_eq!(table.body[0].height, options.table.min_row_height);
        assert_eq!(table.body[0].font, SpanFont::regular(options.table.body_size));
        assert!(table.header.font.style == crate::font::FontStyle::Bold);
    }

    #[test]
    fn rows_grow_with_their_tallest_cell() {
        let options = LayoutOptions::default();
        let surface = Recorder::default();
        let long = lipsum::lipsum_words(40);
        let rows = vec![vec!["Phase", "Notes"], vec!["1", long.as_str()]];

        let table = TableLayout::compute(&rows, &surface, Pt(300.0), &options.table).unwrap();
        let lines = table.body[0].cells[1].len();
        assert!(lines > 1);
        assert_eq!(
            table.body[0].height,
            options.table.cell_line_height * lines as f32 + options.table.cell_padding
        );
    }

    #[test]
    fn short_rows_are_padded() {
        let options = LayoutOptions::default();
        let surface = Recorder::default();
        let rows = vec![vec!["A", "B", "C"], vec!["only"]];
        let table = TableLayout::compute(&rows, &surface, Pt(300.0), &options.table).unwrap();
        assert_eq!(table.body[0].cells.len(), 3);
    }

    #[test]
    fn repeats_the_header_after_a_page_break() {
        let mut options = LayoutOptions::default();
        options.geometry(Geometry {
            page_width: Pt(400.0),
            page_height: Pt(200.0),
            margin: Pt(20.0),
        });
        let mut surface = Recorder::default();
        let mut cursor = Cursor::new(&options.geometry);
        let rows: Vec<Vec<&str>> = std::iter::once(vec!["Head"])
            .chain(std::iter::repeat(vec!["row"]).take(8))
            .collect();

        let table =
            TableLayout::compute(&rows, &surface, options.geometry.content_width(), &options.table)
                .unwrap();
        let repeats = table.draw(&mut surface, &mut cursor, options.geometry.left(), &options.table);

        assert!(repeats >= 1);
        assert_eq!(surface.page_count(), repeats + 1);
        for page in surface.pages() {
            let first_text = page.iter().find_map(|op| match op {
                DrawOp::Text { text, font, .. } => Some((text.as_str(), *font)),
                _ => None,
            });
            assert_eq!(
                first_text,
                Some(("Head", SpanFont::bold(options.table.header_size)))
            );
        }
    }
}
