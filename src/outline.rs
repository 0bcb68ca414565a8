use pdf_writer::{Finish, Pdf, Ref, TextStr};

use crate::refs::{ObjectReferences, RefType};

/// The document outline (bookmarks panel). Two levels deep: top-level entries
/// with optional children.
#[derive(Default, Debug)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub title: String,
    /// 0-based index of the page the entry jumps to
    pub page_index: usize,
    pub children: Vec<OutlineEntry>,
}

impl Outline {
    /// Add a bookmark. Level 1 entries go at the top level; deeper levels nest
    /// under the most recent top-level entry, or become top-level entries
    /// themselves if there is none yet.
    pub fn add_bookmark(&mut self, level: u8, title: String, page_index: usize) {
        let entry = OutlineEntry {
            title,
            page_index,
            children: Vec::new(),
        };
        match self.entries.last_mut() {
            Some(parent) if level > 1 => parent.children.push(entry),
            _ => self.entries.push(entry),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the outline tree, returning the id of its root if there was anything to write
    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) -> Option<Ref> {
        if self.entries.is_empty() {
            return None;
        }

        let outlines_id = refs.gen(RefType::Outlines);
        let mut next_index = 0;
        let (first, last, count) =
            write_level(&self.entries, outlines_id, &mut next_index, refs, writer)?;

        let mut outline = writer.outline(outlines_id);
        outline.first(first).last(last).count(count as i32);
        outline.finish();

        Some(outlines_id)
    }
}

/// Writes one sibling list, children before their parents so that the parent
/// knows its first/last child ids. Returns (first, last, visible descendants).
fn write_level(
    entries: &[OutlineEntry],
    parent: Ref,
    next_index: &mut usize,
    refs: &mut ObjectReferences,
    writer: &mut Pdf,
) -> Option<(Ref, Ref, usize)> {
    let ids: Vec<Ref> = entries
        .iter()
        .map(|_| {
            let id = refs.gen(RefType::OutlineEntry(*next_index));
            *next_index += 1;
            id
        })
        .collect();

    let mut count = entries.len();
    for (i, entry) in entries.iter().enumerate() {
        let children = write_level(&entry.children, ids[i], next_index, refs, writer);

        let mut item = writer.outline_item(ids[i]);
        item.parent(parent);
        item.title(TextStr(entry.title.as_str()));
        if i > 0 {
            item.prev(ids[i - 1]);
        }
        if let Some(next) = ids.get(i + 1) {
            item.next(*next);
        }
        if let Some((first, last, child_count)) = children {
            item.first(first).last(last).count(child_count as i32);
            count += child_count;
        }
        if let Some(page) = refs.get(RefType::Page(entry.page_index)) {
            item.dest().page(page).fit();
        }
        item.finish();
    }

    Some((*ids.first()?, *ids.last()?, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deeper_levels_nest_under_last_top_level_entry() {
        let mut outline = Outline::default();
        outline.add_bookmark(2, "Orphan".into(), 0);
        outline.add_bookmark(1, "Plan".into(), 0);
        outline.add_bookmark(2, "Budget".into(), 1);
        outline.add_bookmark(3, "Channels".into(), 2);

        assert_eq!(outline.entries.len(), 2);
        assert_eq!(outline.entries[0].title, "Orphan");
        let titles: Vec<&str> = outline.entries[1]
            .children
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Budget", "Channels"]);
    }
}
