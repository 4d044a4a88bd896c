//! Which corner of the text block the floating action button covers.
//!
//! A [`Gravity`] is written relative to the reading direction (`start`/`end`)
//! or absolutely (`left`/`right`), and is resolved to a [`Corner`] only when the
//! layout direction is known.

use crate::OverlapTextError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VerticalGravity {
    Top,
    Bottom,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HorizontalGravity {
    Left,
    Right,
    /// The edge where lines begin: left in LTR text, right in RTL text
    Start,
    /// The edge where lines end: right in LTR text, left in RTL text
    End,
}

/// An absolute corner of the text block
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Gravity {
    pub vertical: VerticalGravity,
    pub horizontal: HorizontalGravity,
}

impl Default for Gravity {
    /// The trailing bottom corner, where a FAB usually sits
    fn default() -> Self {
        Gravity::new(VerticalGravity::Bottom, HorizontalGravity::End)
    }
}

impl Gravity {
    pub const fn new(vertical: VerticalGravity, horizontal: HorizontalGravity) -> Gravity {
        Gravity {
            vertical,
            horizontal,
        }
    }

    /// Resolve `start` and `end` against the reading direction
    pub fn resolve(self, direction: LayoutDirection) -> Corner {
        let left = match (self.horizontal, direction) {
            (HorizontalGravity::Left, _) => true,
            (HorizontalGravity::Right, _) => false,
            (HorizontalGravity::Start, LayoutDirection::Ltr) => true,
            (HorizontalGravity::Start, LayoutDirection::Rtl) => false,
            (HorizontalGravity::End, LayoutDirection::Ltr) => false,
            (HorizontalGravity::End, LayoutDirection::Rtl) => true,
        };
        match (self.vertical, left) {
            (VerticalGravity::Top, true) => Corner::TopLeft,
            (VerticalGravity::Top, false) => Corner::TopRight,
            (VerticalGravity::Bottom, true) => Corner::BottomLeft,
            (VerticalGravity::Bottom, false) => Corner::BottomRight,
        }
    }
}

/// Parses `|`-separated edge names in any order, e.g. `"bottom|end"` or
/// `"left | top"`
impl FromStr for Gravity {
    type Err = OverlapTextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OverlapTextError::InvalidGravity(s.to_string());
        let mut vertical = None;
        let mut horizontal = None;
        for token in s.split('|').map(str::trim) {
            let duplicate = match token.to_ascii_lowercase().as_str() {
                "top" => vertical.replace(VerticalGravity::Top).is_some(),
                "bottom" => vertical.replace(VerticalGravity::Bottom).is_some(),
                "left" => horizontal.replace(HorizontalGravity::Left).is_some(),
                "right" => horizontal.replace(HorizontalGravity::Right).is_some(),
                "start" => horizontal.replace(HorizontalGravity::Start).is_some(),
                "end" => horizontal.replace(HorizontalGravity::End).is_some(),
                _ => return Err(invalid()),
            };
            if duplicate {
                return Err(invalid());
            }
        }
        match (vertical, horizontal) {
            (Some(vertical), Some(horizontal)) => Ok(Gravity::new(vertical, horizontal)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Gravity {
    type Error = OverlapTextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Gravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vertical = match self.vertical {
            VerticalGravity::Top => "top",
            VerticalGravity::Bottom => "bottom",
        };
        let horizontal = match self.horizontal {
            HorizontalGravity::Left => "left",
            HorizontalGravity::Right => "right",
            HorizontalGravity::Start => "start",
            HorizontalGravity::End => "end",
        };
        write!(f, "{vertical}|{horizontal}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_flips_with_direction() {
        let gravity = Gravity::default();
        assert_eq!(gravity.resolve(LayoutDirection::Ltr), Corner::BottomRight);
        assert_eq!(gravity.resolve(LayoutDirection::Rtl), Corner::BottomLeft);

        let absolute: Gravity = "top|left".parse().unwrap();
        assert_eq!(absolute.resolve(LayoutDirection::Rtl), Corner::TopLeft);
    }

    #[test]
    fn parses_in_any_order() {
        let gravity: Gravity = " START | top ".parse().unwrap();
        assert_eq!(
            gravity,
            Gravity::new(VerticalGravity::Top, HorizontalGravity::Start)
        );
        assert_eq!(gravity.to_string(), "top|start");
    }

    #[test]
    fn rejects_incomplete_or_conflicting_gravity() {
        for bad in ["top", "left", "top|bottom|left", "top|left|end", "centre|left", ""] {
            assert!(
                matches!(bad.parse::<Gravity>(), Err(OverlapTextError::InvalidGravity(_))),
                "{bad} should not parse"
            );
        }
    }
}
