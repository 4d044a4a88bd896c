use crate::units::Pt;
use std::fmt::Debug;

/// Vertical metrics of a font at a given size. `ascent` is measured upwards from
/// the baseline and is positive; `descent` is measured the same way and so is
/// usually negative.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct FontMetrics {
    pub ascent: Pt,
    pub descent: Pt,
    pub leading: Pt,
}

impl FontMetrics {
    /// Snap the metrics outwards to whole device pixels, so that glyphs never
    /// poke out of the box a line reserves for them
    pub fn snapped(self) -> FontMetrics {
        FontMetrics {
            ascent: Pt(self.ascent.0.ceil()),
            descent: Pt(self.descent.0.floor()),
            leading: Pt(self.leading.0.round()),
        }
    }

    /// The natural distance between two baselines, before any extra spacing
    pub fn height(&self) -> Pt {
        (self.ascent - self.descent).abs() + self.leading
    }
}

/// Anything that can report metrics and horizontal advances for laying out text.
/// Implemented by [`Font`](crate::Font) for real font files and by
/// [`MonospaceFace`] for headless measurement.
pub trait Typeface: Debug {
    fn metrics(&self, size: Pt) -> FontMetrics;

    /// Horizontal advance of a single character. Characters the face has no
    /// glyph for should report the advance of its replacement glyph.
    fn advance(&self, ch: char, size: Pt) -> Pt;
}

/// A synthetic face where every character has the same advance. All values are
/// expressed as fractions of the em (the font size).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MonospaceFace {
    pub advance: f32,
    pub ascent: f32,
    pub descent: f32,
    pub leading: f32,
}

impl Default for MonospaceFace {
    fn default() -> Self {
        MonospaceFace {
            advance: 0.5,
            ascent: 0.8,
            descent: -0.2,
            leading: 0.0,
        }
    }
}

impl Typeface for MonospaceFace {
    fn metrics(&self, size: Pt) -> FontMetrics {
        FontMetrics {
            ascent: size * self.ascent,
            descent: size * self.descent,
            leading: size * self.leading,
        }
    }

    fn advance(&self, _ch: char, size: Pt) -> Pt {
        size * self.advance
    }
}
