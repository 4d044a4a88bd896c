use derive_more::{Add, AddAssign, Display, From, Into, Sub, SubAssign, Sum};
use serde::Deserialize;
use std::ops::{Div, Mul, Neg};

/// A device pixel. When a layout is drawn onto a PDF page, one pixel is one
/// PDF point (1/72 in).
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    From,
    Into,
    Display,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

impl Pt {
    pub const ZERO: Pt = Pt(0.0);

    pub fn abs(self) -> Pt {
        Pt(self.0.abs())
    }

    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// Dividing two lengths yields a plain ratio
impl Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

/// Inches, for sizing PDF pages
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Display)]
#[display("{_0}in")]
pub struct In(pub f32);

impl From<In> for Pt {
    fn from(value: In) -> Self {
        Pt(value.0 * 72.0)
    }
}

/// A density-independent pixel
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display)]
#[display("{_0}dp")]
pub struct Dp(pub f32);

/// A scale-independent pixel, which follows the user's font scale on top of the
/// screen density
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display)]
#[display("{_0}sp")]
pub struct Sp(pub f32);

/// Converts density- and scale-independent units into device pixels
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayMetrics {
    /// Device pixels per dp
    pub density: f32,
    /// Device pixels per sp; this is `density` multiplied by the font scale
    pub scaled_density: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        DisplayMetrics {
            density: 1.0,
            scaled_density: 1.0,
        }
    }
}

impl DisplayMetrics {
    pub fn new(density: f32, font_scale: f32) -> DisplayMetrics {
        DisplayMetrics {
            density,
            scaled_density: density * font_scale,
        }
    }

    pub fn dp(&self, value: Dp) -> Pt {
        Pt(value.0 * self.density)
    }

    pub fn sp(&self, value: Sp) -> Pt {
        Pt(value.0 * self.scaled_density)
    }
}
