//! Initial configuration for a [`FabOverlapTextView`](crate::FabOverlapTextView),
//! the equivalent of the attributes a layout file would set on the view.

use crate::colour::Colour;
use crate::gravity::{Gravity, LayoutDirection};
use crate::units::{DisplayMetrics, Dp, Pt, Sp};
use crate::OverlapTextError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A length as written in configuration, before it is converted to device pixels
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum Dimension {
    Px(f32),
    Dp(f32),
    Sp(f32),
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Px(0.0)
    }
}

impl Dimension {
    /// Convert to a whole number of device pixels. Values are rounded, but any
    /// non-zero value is at least one pixel so that it never disappears.
    pub fn to_pixel_size(self, display: &DisplayMetrics) -> Pt {
        let px = match self {
            Dimension::Px(v) => v,
            Dimension::Dp(v) => display.dp(Dp(v)).0,
            Dimension::Sp(v) => display.sp(Sp(v)).0,
        };
        let rounded = px.round();
        if rounded == 0.0 && px != 0.0 {
            Pt(px.signum())
        } else {
            Pt(rounded)
        }
    }
}

/// Parses a number followed by `px`, `dp` or `sp`, e.g. `"56dp"`
impl FromStr for Dimension {
    type Err = OverlapTextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OverlapTextError::InvalidDimension(s.to_string());
        let s = s.trim();
        if s.len() < 2 || !s.is_char_boundary(s.len() - 2) {
            return Err(invalid());
        }
        let (number, unit) = s.split_at(s.len() - 2);
        let value: f32 = number.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        match unit {
            "px" => Ok(Dimension::Px(value)),
            "dp" => Ok(Dimension::Dp(value)),
            "sp" => Ok(Dimension::Sp(value)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Dimension {
    type Error = OverlapTextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Px(v) => write!(f, "{v}px"),
            Dimension::Dp(v) => write!(f, "{v}dp"),
            Dimension::Sp(v) => write!(f, "{v}sp"),
        }
    }
}

/// Text size used when none is configured
pub const DEFAULT_TEXT_SIZE: Sp = Sp(14.0);

/// Configuration read once when a view is constructed. Every field has a
/// default, so a configuration only needs to name what it changes:
///
/// ```
/// use fab_overlap_text::{Attributes, Dimension};
///
/// let attributes = Attributes::from_json(r##"{
///     "fabGravity": "top|start",
///     "fabOverlayWidth": "72dp",
///     "fabOverlayHeight": "28dp",
///     "textColor": "#de000000"
/// }"##).expect("valid attributes");
///
/// assert_eq!(attributes.fab_overlay_width, Dimension::Dp(72.0));
/// assert_eq!(attributes.text_size, None);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Attributes {
    pub fab_gravity: Gravity,
    pub fab_overlay_width: Dimension,
    pub fab_overlay_height: Dimension,
    /// Name of a font for the [`FontResolver`](crate::FontResolver)
    pub font: Option<String>,
    pub text_color: Option<Colour>,
    /// Defaults to [`DEFAULT_TEXT_SIZE`] when unset
    pub text_size: Option<Dimension>,
    pub line_height_hint: Dimension,
    pub top_padding_hint: Dimension,
    /// In ems
    pub letter_spacing: f32,
    pub font_feature_settings: Option<String>,
    pub padding_left: Dimension,
    pub padding_top: Dimension,
    pub padding_right: Dimension,
    pub padding_bottom: Dimension,
    pub layout_direction: LayoutDirection,
}

impl Default for Attributes {
    fn default() -> Self {
        Attributes {
            fab_gravity: Gravity::default(),
            fab_overlay_width: Dimension::default(),
            fab_overlay_height: Dimension::default(),
            font: None,
            text_color: None,
            text_size: None,
            line_height_hint: Dimension::default(),
            top_padding_hint: Dimension::default(),
            letter_spacing: 0.0,
            font_feature_settings: None,
            padding_left: Dimension::default(),
            padding_top: Dimension::default(),
            padding_right: Dimension::default(),
            padding_bottom: Dimension::default(),
            layout_direction: LayoutDirection::default(),
        }
    }
}

impl Attributes {
    pub fn from_json(json: &str) -> Result<Attributes, OverlapTextError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The configured text size in device pixels. A configured size is rounded
    /// like any other dimension; the default is truncated instead.
    pub fn text_size_px(&self, display: &DisplayMetrics) -> Pt {
        match self.text_size {
            Some(size) => size.to_pixel_size(display),
            None => Pt(display.sp(DEFAULT_TEXT_SIZE).0.trunc()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gravity::{HorizontalGravity, VerticalGravity};

    #[test]
    fn empty_json_gives_defaults() {
        assert_eq!(Attributes::from_json("{}").unwrap(), Attributes::default());
    }

    #[test]
    fn reads_every_field() {
        let attributes = Attributes::from_json(
            r##"{
                "fabGravity": "bottom|left",
                "fabOverlayWidth": "64dp",
                "fabOverlayHeight": "20px",
                "font": "nunito-semibold",
                "textColor": "#8a000000",
                "textSize": "16sp",
                "lineHeightHint": "24sp",
                "topPaddingHint": "8dp",
                "letterSpacing": 0.02,
                "fontFeatureSettings": "onum",
                "paddingLeft": "16dp",
                "paddingBottom": "4dp",
                "layoutDirection": "rtl"
            }"##,
        )
        .unwrap();
        assert_eq!(
            attributes.fab_gravity,
            Gravity::new(VerticalGravity::Bottom, HorizontalGravity::Left)
        );
        assert_eq!(attributes.fab_overlay_height, Dimension::Px(20.0));
        assert_eq!(attributes.text_size, Some(Dimension::Sp(16.0)));
        assert_eq!(attributes.font.as_deref(), Some("nunito-semibold"));
        assert_eq!(attributes.text_color, Some(Colour::new_rgb_bytes(0, 0, 0)));
        assert_eq!(attributes.line_height_hint, Dimension::Sp(24.0));
        assert_eq!(attributes.padding_top, Dimension::Px(0.0));
        assert_eq!(attributes.layout_direction, LayoutDirection::Rtl);
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(Attributes::from_json(r#"{"fabGravity": "middle"}"#).is_err());
        assert!(Attributes::from_json(r#"{"textSize": "14pt"}"#).is_err());
        assert!(Attributes::from_json(r#"{"fabSize": "56dp"}"#).is_err());
    }

    #[test]
    fn default_text_size_truncates() {
        let display = DisplayMetrics::new(2.625, 1.0);
        // 14sp is 36.75px
        assert_eq!(Attributes::default().text_size_px(&display), Pt(36.0));

        let explicit = Attributes {
            text_size: Some(Dimension::Sp(14.0)),
            ..Attributes::default()
        };
        assert_eq!(explicit.text_size_px(&display), Pt(37.0));
    }

    #[test]
    fn dimensions_convert_to_whole_pixels() {
        let display = DisplayMetrics::new(2.625, 1.0);
        assert_eq!("56dp".parse::<Dimension>().unwrap().to_pixel_size(&display), Pt(147.0));
        assert_eq!("14sp".parse::<Dimension>().unwrap().to_pixel_size(&display), Pt(37.0));
        assert_eq!(Dimension::Dp(0.1).to_pixel_size(&display), Pt(1.0));
        assert_eq!(Dimension::Px(0.0).to_pixel_size(&display), Pt(0.0));
        assert_eq!(" 1.5 px".parse::<Dimension>().unwrap(), Dimension::Px(1.5));
        assert!("dp".parse::<Dimension>().is_err());
        assert!("12".parse::<Dimension>().is_err());
    }
}
