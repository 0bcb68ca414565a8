use crate::units::*;

/// A rectangle, specified by two opposite corners.
///
/// Layout code works top-down: `(x1, y1)` is the top-left corner and `y`
/// grows towards the bottom of the page. The PDF backend flips it when
/// writing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first (typically, top-left) corner.
    pub x1: Pt,
    /// The y-coordinate of the first (typically, top-left) corner.
    pub y1: Pt,
    /// The x-coordinate of the second (typically, bottom-right) corner.
    pub x2: Pt,
    /// The y-coordinate of the second (typically, bottom-right) corner.
    pub y2: Pt,
}

impl Rect {
    /// A rectangle from its top-left corner and its size
    pub fn from_xywh(x: Pt, y: Pt, width: Pt, height: Pt) -> Rect {
        Rect {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

impl From<&Rect> for pdf_writer::Rect {
    fn from(r: &Rect) -> Self {
        (*r).into()
    }
}
