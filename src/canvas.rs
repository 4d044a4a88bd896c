use crate::colour::Colour;
use crate::paint::TextPaint;
use crate::units::Pt;

/// A surface that laid-out text can be painted onto. Coordinates grow to the
/// right and downwards, with `(0, 0)` at the top left of the text block.
pub trait Canvas {
    /// Move the origin for all subsequent drawing
    fn translate(&mut self, dx: Pt, dy: Pt);

    /// Paint a run of text with its baseline starting at `(x, baseline)`
    fn fill_text(&mut self, text: &str, paint: &TextPaint, x: Pt, baseline: Pt);
}

/// A single recorded [`Canvas::fill_text`] call, in untranslated coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    pub text: String,
    pub size: Pt,
    pub colour: Colour,
    pub x: Pt,
    pub baseline: Pt,
}

/// A canvas that just remembers what was drawn on it. Useful for inspecting a
/// layout without rendering it.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    origin: (Pt, Pt),
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> RecordingCanvas {
        RecordingCanvas::default()
    }

    /// The current translation of the origin
    pub fn origin(&self) -> (Pt, Pt) {
        self.origin
    }
}

impl Canvas for RecordingCanvas {
    fn translate(&mut self, dx: Pt, dy: Pt) {
        self.origin.0 += dx;
        self.origin.1 += dy;
    }

    fn fill_text(&mut self, text: &str, paint: &TextPaint, x: Pt, baseline: Pt) {
        self.ops.push(DrawOp {
            text: text.to_string(),
            size: paint.size,
            colour: paint.colour,
            x: self.origin.0 + x,
            baseline: self.origin.1 + baseline,
        });
    }
}
