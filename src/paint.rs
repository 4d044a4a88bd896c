use crate::colour::Colour;
use crate::typeface::{FontMetrics, MonospaceFace, Typeface};
use crate::units::Pt;
use std::sync::Arc;

/// Everything about how text looks that also affects how it lays out
#[derive(Debug, Clone)]
pub struct TextPaint {
    pub typeface: Arc<dyn Typeface>,
    pub size: Pt,
    pub colour: Colour,
    /// Extra space after every character, in ems
    pub letter_spacing: f32,
    /// OpenType feature settings in CSS syntax, e.g. `"smcp, onum"`. Carried along
    /// with the paint; the bundled line breaker does not shape text, so they do
    /// not change advances.
    pub font_feature_settings: Option<String>,
}

impl Default for TextPaint {
    fn default() -> Self {
        TextPaint {
            typeface: Arc::new(MonospaceFace::default()),
            size: Pt(14.0),
            colour: Colour::default(),
            letter_spacing: 0.0,
            font_feature_settings: None,
        }
    }
}

/// Two paints are equal when they share the same typeface instance
impl PartialEq for TextPaint {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.typeface), Arc::as_ptr(&other.typeface))
            && self.size == other.size
            && self.colour == other.colour
            && self.letter_spacing == other.letter_spacing
            && self.font_feature_settings == other.font_feature_settings
    }
}

impl TextPaint {
    pub fn new(typeface: Arc<dyn Typeface>, size: Pt) -> TextPaint {
        TextPaint {
            typeface,
            size,
            ..TextPaint::default()
        }
    }

    /// Pixel-snapped metrics for the current typeface and size
    pub fn metrics(&self) -> FontMetrics {
        self.typeface.metrics(self.size).snapped()
    }

    /// The letter spacing converted into device pixels
    pub fn char_spacing(&self) -> Pt {
        self.size * self.letter_spacing
    }

    pub fn advance(&self, ch: char) -> Pt {
        self.typeface.advance(ch, self.size) + self.char_spacing()
    }

    /// Calculate the width of a given string of text. Newlines have no width
    pub fn measure(&self, text: &str) -> Pt {
        text.chars()
            .filter(|&ch| ch != '\n')
            .map(|ch| self.advance(ch))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_spacing_widens_every_character() {
        let mut paint = TextPaint::new(Arc::new(MonospaceFace::default()), Pt(10.0));
        assert_eq!(paint.measure("abcd"), Pt(20.0));
        paint.letter_spacing = 0.1;
        assert_eq!(paint.measure("abcd"), Pt(24.0));
    }

    #[test]
    fn equality_tracks_typeface_identity() {
        let face: Arc<dyn Typeface> = Arc::new(MonospaceFace::default());
        let a = TextPaint::new(face.clone(), Pt(10.0));
        let b = TextPaint::new(face, Pt(10.0));
        let c = TextPaint::new(Arc::new(MonospaceFace::default()), Pt(10.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
