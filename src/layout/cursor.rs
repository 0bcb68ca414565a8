use crate::options::Geometry;
use crate::surface::Surface;
use crate::units::Pt;

/// The vertical write position of a rendering pass.
///
/// `y` is measured from the top edge of the page; the top margin is the first
/// writable position and `page height − margin` the last.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Cursor {
    y: Pt,
    page_index: usize,
    top: Pt,
    bottom: Pt,
}

impl Cursor {
    /// A cursor at the top margin of the first page
    pub fn new(geometry: &Geometry) -> Cursor {
        Cursor {
            y: geometry.top(),
            page_index: 0,
            top: geometry.top(),
            bottom: geometry.bottom(),
        }
    }

    pub fn y(&self) -> Pt {
        self.y
    }

    /// 0-based index of the page being written
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Move down the page. Overflow is only checked by [Cursor::ensure_space].
    pub fn advance(&mut self, by: Pt) {
        self.y += by;
    }

    /// Room left above the bottom margin
    pub fn remaining(&self) -> Pt {
        self.bottom - self.y
    }

    pub fn at_top(&self) -> bool {
        self.y <= self.top
    }

    /// Make sure `required` fits below the cursor, starting a new page on
    /// `surface` if it doesn't. Returns whether a page was started.
    ///
    /// A cursor already at the top of a page never advances: whatever doesn't
    /// fit there won't fit on a fresh page either. A request taller than the
    /// content area is therefore allowed to run past the bottom margin rather
    /// than starting a page of its own.
    pub fn ensure_space<S: Surface + ?Sized>(&mut self, required: Pt, surface: &mut S) -> bool {
        if self.y + required <= self.bottom || self.at_top() {
            return false;
        }

        surface.new_page();
        self.page_index += 1;
        self.y = self.top;
        log::debug!(
            "page {} started, {} needed at the bottom of the previous one",
            self.page_index + 1,
            required
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::Recorder;

    fn geometry() -> Geometry {
        Geometry {
            page_width: Pt(200.0),
            page_height: Pt(100.0),
            margin: Pt(10.0),
        }
    }

    #[test]
    fn stays_put_when_there_is_room() {
        let mut surface = Recorder::default();
        let mut cursor = Cursor::new(&geometry());
        cursor.advance(Pt(40.0));
        assert!(!cursor.ensure_space(Pt(40.0), &mut surface));
        assert_eq!(cursor.y(), Pt(50.0));
        assert_eq!(surface.page_count(), 1);
    }

    #[test]
    fn advances_exactly_once_when_out_of_room() {
        let mut surface = Recorder::default();
        let mut cursor = Cursor::new(&geometry());
        cursor.advance(Pt(60.0));
        assert_eq!(cursor.remaining(), Pt(20.0));

        assert!(cursor.ensure_space(Pt(30.0), &mut surface));
        assert_eq!(cursor.y(), Pt(10.0));
        assert_eq!(cursor.page_index(), 1);
        assert_eq!(surface.page_count(), 2);

        assert!(!cursor.ensure_space(Pt(30.0), &mut surface));
        assert_eq!(surface.page_count(), 2);
    }

    #[test]
    fn never_leaves_a_blank_page_for_oversized_requests() {
        let mut surface = Recorder::default();
        let mut cursor = Cursor::new(&geometry());
        assert!(!cursor.ensure_space(Pt(500.0), &mut surface));
        assert_eq!(surface.page_count(), 1);
    }
}
