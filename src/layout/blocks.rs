//! Line classification: the plan Markdown is consumed one line at a time and
//! every line becomes exactly one [Block], except table alignment rows which
//! are dropped.

use regex::Regex;
use std::iter::FusedIterator;
use std::str::Lines;
use std::sync::OnceLock;

/// How a list item is marked
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ListMarker<'a> {
    /// `12. text`; `token` is the marker as written (`12.`), `index` its number
    /// if it fits a `u32`
    Ordered { token: &'a str, index: Option<u32> },
    /// `- text` or `* text`
    Unordered,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ListItem<'a> {
    pub marker: ListMarker<'a>,
    /// Leading whitespace of the line divided by two
    pub indent_level: usize,
    pub text: &'a str,
}

/// One classified line of input
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Block<'a> {
    Heading { level: u8, text: &'a str },
    /// A line of running text. `bold` is set for a line that is bold from end
    /// to end, in which case `text` has its `**` delimiters removed.
    Paragraph { text: &'a str, bold: bool },
    ListItem(ListItem<'a>),
    /// Trimmed cell texts of a pipe table row
    TableRow(Vec<&'a str>),
    Blank,
}

impl Block<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { bold: true, .. } => "strong paragraph",
            Block::Paragraph { .. } => "paragraph",
            Block::ListItem(_) => "list item",
            Block::TableRow(_) => "table row",
            Block::Blank => "blank",
        }
    }
}

/// Lazily classify `text` line by line
pub fn blocks(text: &str) -> Blocks<'_> {
    Blocks {
        lines: text.lines(),
    }
}

/// Iterator returned by [blocks]
#[derive(Clone, Debug)]
pub struct Blocks<'a> {
    lines: Lines<'a>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        loop {
            let line = self.lines.next()?;
            if let Some(block) = classify(line) {
                return Some(block);
            }
        }
    }
}

impl FusedIterator for Blocks<'_> {}

fn ordered_item() -> &'static Regex {
    static ORDERED_ITEM: OnceLock<Regex> = OnceLock::new();
    ORDERED_ITEM.get_or_init(|| Regex::new(r"^(\d+\.)\s(.+)$").expect("valid ordered list regex"))
}

fn alignment_cell() -> &'static Regex {
    static ALIGNMENT_CELL: OnceLock<Regex> = OnceLock::new();
    ALIGNMENT_CELL.get_or_init(|| Regex::new(r"^[-:]+$").expect("valid alignment regex"))
}

/// Classify a single line. `None` means the line carries nothing to render
/// (a table alignment row).
pub fn classify(line: &str) -> Option<Block<'_>> {
    for (level, prefix) in [(1, "# "), (2, "## "), (3, "### ")] {
        if let Some(text) = line.strip_prefix(prefix) {
            return Some(Block::Heading {
                level,
                text: text.trim(),
            });
        }
    }

    if line.starts_with('|') {
        let cells = table_cells(line);
        if cells.is_empty() || cells.iter().all(|cell| alignment_cell().is_match(cell)) {
            return None;
        }
        return Some(Block::TableRow(cells));
    }

    let trimmed = line.trim();

    if let Some(captures) = ordered_item().captures(trimmed) {
        let token = captures.get(1).map_or("", |m| m.as_str());
        let text = captures.get(2).map_or("", |m| m.as_str());
        return Some(Block::ListItem(ListItem {
            marker: ListMarker::Ordered {
                token,
                index: token.trim_end_matches('.').parse().ok(),
            },
            indent_level: indent_level(line),
            text,
        }));
    }

    if let Some(text) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        return Some(Block::ListItem(ListItem {
            marker: ListMarker::Unordered,
            indent_level: indent_level(line),
            text,
        }));
    }

    if let Some(inner) = standalone_bold(line) {
        return Some(Block::Paragraph {
            text: inner,
            bold: true,
        });
    }

    if trimmed.is_empty() {
        return Some(Block::Blank);
    }

    Some(Block::Paragraph {
        text: line,
        bold: false,
    })
}

/// Everything between a leading and a trailing `**`, verbatim. The two
/// delimiters may overlap (`**`, `***`), leaving nothing inside.
fn standalone_bold(line: &str) -> Option<&str> {
    if !line.starts_with("**") || !line.ends_with("**") {
        return None;
    }
    Some(line.get(2..line.len() - 2).unwrap_or(""))
}

fn indent_level(line: &str) -> usize {
    let leading = line.len() - line.trim_start().len();
    leading / 2
}

/// Split a pipe row into trimmed cells. The empty cells outside the outer
/// pipes are dropped; empty cells between pipes are kept.
fn table_cells(line: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = line.split('|').map(str::trim).collect();
    while cells.first().is_some_and(|cell| cell.is_empty()) {
        cells.remove(0);
    }
    while cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn ordered<'a>(token: &'a str, index: Option<u32>, text: &'a str) -> Block<'a> {
        Block::ListItem(ListItem {
            marker: ListMarker::Ordered { token, index },
            indent_level: 0,
            text,
        })
    }

    fn bullet(indent_level: usize, text: &str) -> Block<'_> {
        Block::ListItem(ListItem {
            marker: ListMarker::Unordered,
            indent_level,
            text,
        })
    }

    #[rstest]
    #[case("# Title", Block::Heading { level: 1, text: "Title" })]
    #[case("## Goals", Block::Heading { level: 2, text: "Goals" })]
    #[case("### Week 1", Block::Heading { level: 3, text: "Week 1" })]
    #[case("#### Deep", Block::Paragraph { text: "#### Deep", bold: false })]
    #[case("#NoSpace", Block::Paragraph { text: "#NoSpace", bold: false })]
    #[case("| A | B |", Block::TableRow(vec!["A", "B"]))]
    #[case("| A |  | C |", Block::TableRow(vec!["A", "", "C"]))]
    #[case("1. First", ordered("1.", Some(1), "First"))]
    #[case("5. Skip", ordered("5.", Some(5), "Skip"))]
    #[case("99999999999. Big", ordered("99999999999.", None, "Big"))]
    #[case("- item", bullet(0, "item"))]
    #[case("* item", bullet(0, "item"))]
    #[case("  - nested", bullet(1, "nested"))]
    #[case("     - deeper", bullet(2, "deeper"))]
    #[case("**Key Metrics**", Block::Paragraph { text: "Key Metrics", bold: true })]
    #[case("**a** and **b**", Block::Paragraph { text: "a** and **b", bold: true })]
    #[case("****", Block::Paragraph { text: "", bold: true })]
    #[case("***", Block::Paragraph { text: "", bold: true })]
    #[case("**", Block::Paragraph { text: "", bold: true })]
    #[case("2.  Padded", ordered("2.", Some(2), " Padded"))]
    #[case("3.", Block::Paragraph { text: "3.", bold: false })]
    #[case("", Block::Blank)]
    #[case("   \t", Block::Blank)]
    #[case("Plain text here.", Block::Paragraph { text: "Plain text here.", bold: false })]
    fn classifies_lines(#[case] line: &str, #[case] expected: Block) {
        assert_eq!(classify(line), Some(expected));
    }

    #[rstest]
    #[case("|---|---|")]
    #[case("| :--- | :---: | ---: |")]
    #[case("||")]
    #[case("|")]
    fn drops_alignment_and_empty_rows(#[case] line: &str) {
        assert_eq!(classify(line), None);
    }

    #[test]
    fn iterates_lazily_over_mixed_line_endings() {
        let text = "# Plan\r\n\r\n| A | B |\n|---|---|\n| 1 | 2 |\nDone";
        let kinds: Vec<_> = blocks(text).map(|b| b.kind()).collect();
        assert_eq!(
            kinds,
            vec!["heading", "blank", "table row", "table row", "paragraph"]
        );
    }

    #[test]
    fn is_fused() {
        let mut it = blocks("one");
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(blocks("").count(), 0);
    }
}
