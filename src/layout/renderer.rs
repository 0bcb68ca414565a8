use crate::colour::Role;
use crate::font::SpanFont;
use crate::layout::blocks::{blocks, Block, ListItem, ListMarker};
use crate::layout::cursor::Cursor;
use crate::layout::inline::{split_runs, wrap_runs};
use crate::layout::table::TableLayout;
use crate::options::LayoutOptions;
use crate::surface::Surface;
use crate::units::Pt;

/// What a rendering pass produced
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct RenderSummary {
    /// Pages on the surface after the pass
    pub page_count: usize,
    /// Blocks consumed, table rows included
    pub blocks: usize,
    /// Tables drawn
    pub tables: usize,
}

/// Lay out `markdown` onto `surface` in a single forward pass.
///
/// The surface is expected to be fresh, i.e. showing one empty page. Layout
/// never fails; malformed input is rendered as well as it can be.
pub fn render<S: Surface + ?Sized>(
    markdown: &str,
    surface: &mut S,
    options: &LayoutOptions,
) -> RenderSummary {
    let mut renderer = Renderer {
        cursor: Cursor::new(&options.geometry),
        surface,
        options,
        table: Vec::new(),
        summary: RenderSummary::default(),
    };

    for block in blocks(markdown) {
        renderer.block(block);
    }
    renderer.flush_table();

    let mut summary = renderer.summary;
    summary.page_count = renderer.surface.page_count();
    log::debug!(
        "rendered {} blocks and {} tables onto {} pages",
        summary.blocks,
        summary.tables,
        summary.page_count
    );
    summary
}

struct Renderer<'a, 's, S: Surface + ?Sized> {
    surface: &'s mut S,
    options: &'s LayoutOptions,
    cursor: Cursor,
    /// Rows of the table being collected
    table: Vec<Vec<&'a str>>,
    summary: RenderSummary,
}

impl<'a, S: Surface + ?Sized> Renderer<'a, '_, S> {
    fn block(&mut self, block: Block<'a>) {
        log::trace!(
            "{} at y={} on page {}",
            block.kind(),
            self.cursor.y(),
            self.cursor.page_index() + 1
        );
        self.summary.blocks += 1;

        if let Block::TableRow(cells) = block {
            self.table.push(cells);
            return;
        }
        self.flush_table();

        match block {
            Block::Heading { level, text } => self.heading(level, text),
            Block::Paragraph { text, bold: true } => self.strong_paragraph(text),
            Block::Paragraph { text, bold: false } => self.paragraph(text),
            Block::ListItem(item) => self.list_item(item),
            Block::Blank => self.cursor.advance(self.options.paragraph.blank_gap),
            Block::TableRow(_) => {}
        }
    }

    fn left(&self) -> Pt {
        self.options.geometry.left()
    }

    fn content_width(&self) -> Pt {
        self.options.geometry.content_width()
    }

    fn heading(&mut self, level: u8, text: &str) {
        let style = *self.options.heading(level);
        let title = text.replace("**", "");
        let font = SpanFont::bold(style.size);
        let line_height = self.options.line_height(style.size);

        self.cursor.ensure_space(style.reserve, self.surface);
        self.cursor.advance(style.space_before);

        // bookmark the page the title actually starts on
        self.cursor.ensure_space(line_height, self.surface);
        if self.options.outline && level <= 2 {
            self.surface.bookmark(&title, level);
        }
        self.plain_text(&title, font, style.role, Pt::ZERO, self.content_width(), line_height);

        self.cursor.advance(style.space_after_text);
        if let Some(rule) = style.rule {
            self.cursor.ensure_space(rule.thickness, self.surface);
            let y = self.cursor.y();
            let (left, right) = (self.left(), self.options.geometry.right());
            self.surface
                .draw_line((left, y), (right, y), rule.role, rule.thickness);
            self.cursor.advance(rule.thickness + rule.space_after);
        }
        self.cursor.advance(style.space_after);
    }

    fn paragraph(&mut self, text: &str) {
        let style = self.options.paragraph;
        self.cursor.ensure_space(style.reserve, self.surface);

        if text.contains("**") {
            self.inline_text(text, style.size, self.left(), style.inline_gap);
        } else {
            let line_height = self.options.line_height(style.size);
            self.plain_text(
                text,
                SpanFont::regular(style.size),
                Role::Body,
                Pt::ZERO,
                self.content_width(),
                line_height,
            );
        }
    }

    fn strong_paragraph(&mut self, text: &str) {
        let style = self.options.paragraph;
        self.cursor.ensure_space(style.reserve, self.surface);
        let line_height = self.options.line_height(style.strong_size);
        self.plain_text(
            text,
            SpanFont::bold(style.strong_size),
            Role::Strong,
            Pt::ZERO,
            self.content_width(),
            line_height,
        );
        self.cursor.advance(style.strong_gap);
    }

    fn list_item(&mut self, item: ListItem<'_>) {
        let style = self.options.list;
        self.cursor.ensure_space(style.reserve, self.surface);
        let y = self.cursor.y();
        let left = self.left();
        let content_width = self.content_width();

        let (text_inset, wrap_width, inline_gap) = match item.marker {
            ListMarker::Ordered { token, .. } => {
                self.surface.draw_text(
                    token,
                    (left + style.number_inset, y),
                    SpanFont::bold(style.size),
                    Role::Strong,
                );
                (
                    style.ordered_text_inset,
                    content_width - style.ordered_text_inset,
                    style.ordered_inline_gap,
                )
            }
            ListMarker::Unordered => {
                let indent = style.indent_step * item.indent_level as f32;
                let mut bullet = [0u8; 4];
                self.surface.draw_text(
                    style.bullet.encode_utf8(&mut bullet),
                    (left + indent + style.bullet_inset, y),
                    SpanFont::regular(style.size),
                    Role::Body,
                );
                (
                    indent + style.bullet_text_inset,
                    content_width - indent - style.bullet_wrap_allowance,
                    style.bullet_inline_gap,
                )
            }
        };

        if item.text.contains("**") {
            self.inline_text(item.text, style.size, left + text_inset, inline_gap);
        } else {
            self.plain_text(
                item.text,
                SpanFont::regular(style.size),
                Role::Body,
                text_inset,
                wrap_width,
                style.line_height,
            );
        }
    }

    /// Wrap `text` to `width` and draw it line by line at `left + inset`,
    /// leaving the cursor one line below the last line
    fn plain_text(
        &mut self,
        text: &str,
        font: SpanFont,
        role: Role,
        inset: Pt,
        width: Pt,
        line_height: Pt,
    ) {
        let x = self.left() + inset;
        for line in self.surface.wrap_text(text, font, width) {
            self.cursor.ensure_space(line_height, self.surface);
            if !line.is_empty() {
                self.surface.draw_text(&line, (x, self.cursor.y()), font, role);
            }
            self.cursor.advance(line_height);
        }
    }

    /// Draw text with `**bold**` runs starting at `base_x`, then move the
    /// cursor down by `trailing_gap` from the last line
    fn inline_text(&mut self, text: &str, size: Pt, base_x: Pt, trailing_gap: Pt) {
        let runs = split_runs(text);
        let surface = &*self.surface;
        let lines = wrap_runs(
            &runs,
            size,
            base_x,
            self.options.geometry.right(),
            |word, font| surface.measure_text_width(word, font),
        );
        let line_height = self.options.line_height(size);

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.cursor.advance(line_height);
                self.cursor.ensure_space(line_height, self.surface);
            }
            let y = self.cursor.y();
            for word in line.words.iter() {
                let role = if word.bold { Role::Strong } else { Role::Body };
                self.surface
                    .draw_text(&word.text, (word.x, y), line.font_for(word), role);
            }
        }
        self.cursor.advance(trailing_gap);
    }

    fn flush_table(&mut self) {
        if self.table.is_empty() {
            return;
        }
        let rows = std::mem::take(&mut self.table);
        let style = self.options.table;

        match TableLayout::compute(&rows, &*self.surface, self.content_width(), &style) {
            Some(layout) => {
                log::debug!(
                    "drawing a {}x{} table on page {}",
                    layout.columns,
                    rows.len(),
                    self.cursor.page_index() + 1
                );
                let left = self.left();
                let repeats = layout.draw(self.surface, &mut self.cursor, left, &style);
                if repeats > 0 {
                    log::debug!("table header repeated on {repeats} continuation pages");
                }
                self.summary.tables += 1;
            }
            None => log::warn!("skipping a table without columns"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::Recorder;

    #[test]
    fn counts_blocks_and_tables() {
        let mut surface = Recorder::default();
        let summary = render(
            "# Plan\n\n| A | B |\n|---|---|\n| 1 | 2 |\nDone\n",
            &mut surface,
            &LayoutOptions::default(),
        );
        assert_eq!(
            summary,
            RenderSummary {
                page_count: 1,
                blocks: 5,
                tables: 1,
            }
        );
    }

    #[test]
    fn empty_input_renders_one_blank_page() {
        let mut surface = Recorder::default();
        let summary = render("", &mut surface, &LayoutOptions::default());
        assert_eq!(summary.page_count, 1);
        assert_eq!(summary.blocks, 0);
        assert!(surface.pages()[0].is_empty());
    }
}
