use crate::units::*;

/// A rectangle in PDF page space, specified by its lower-left and upper-right
/// corners
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x1: Pt,
    pub y1: Pt,
    pub x2: Pt,
    pub y2: Pt,
}

impl Rect {
    /// A rectangle anchored at the page origin
    pub fn sized(width: Pt, height: Pt) -> Rect {
        Rect {
            x1: Pt::ZERO,
            y1: Pt::ZERO,
            x2: width,
            y2: height,
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
        pdf_writer::Rect::new(r.x1.0, r.y1.0, r.x2.0, r.y2.0)
    }
}
