use crate::typeface::FontMetrics;
use crate::units::{DisplayMetrics, Dp, Pt};

/// The vertical rhythm that baselines snap to
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridMetrics {
    pub unit: Pt,
}

impl Default for GridMetrics {
    fn default() -> Self {
        GridMetrics::from_display(&DisplayMetrics::default())
    }
}

impl GridMetrics {
    /// The 4dp grid at the given screen density
    pub fn from_display(display: &DisplayMetrics) -> GridMetrics {
        GridMetrics {
            unit: display.dp(Dp(4.0)),
        }
    }

    /// The smallest multiple of the grid unit that is at least `value`. A grid
    /// with a non-positive unit does not snap.
    pub fn ceil(&self, value: Pt) -> Pt {
        if self.unit.0 <= 0.0 {
            return value;
        }
        self.unit * (value / self.unit).ceil()
    }
}

/// Line height snapped to the grid, and the extra leading that turns the font's
/// natural line height into it
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct LineSpacing {
    pub line_height: Pt,
    pub extra: Pt,
}

/// Top padding that puts the first baseline on the grid, whatever the font's
/// ascent: `hint + ascent` is rounded up to the grid, then the ascent is taken
/// back out. Truncated to whole device pixels.
pub fn grid_aligned_top_padding(grid: &GridMetrics, hint: Pt, metrics: &FontMetrics) -> Pt {
    let ascent = metrics.ascent.abs();
    let padding = grid.ceil(hint + ascent) - Pt(ascent.0.ceil());
    Pt(padding.0.trunc())
}

/// Round the hinted line height up to the grid, truncated to whole device pixels
pub fn grid_aligned_line_height(grid: &GridMetrics, hint: Pt) -> Pt {
    Pt(grid.ceil(hint).0.trunc())
}

pub fn line_spacing(grid: &GridMetrics, hint: Pt, metrics: &FontMetrics) -> LineSpacing {
    let line_height = grid_aligned_line_height(grid, hint);
    LineSpacing {
        line_height,
        extra: line_height - metrics.height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(ascent: f32, descent: f32, leading: f32) -> FontMetrics {
        FontMetrics {
            ascent: Pt(ascent),
            descent: Pt(descent),
            leading: Pt(leading),
        }
    }

    #[test]
    fn first_baseline_lands_on_the_grid() {
        let grid = GridMetrics { unit: Pt(4.0) };
        for ascent in [1.0, 13.0, 15.0, 16.0, 26.0, 37.0] {
            for hint in [0.0, 3.0, 8.0, 17.0] {
                let padding = grid_aligned_top_padding(&grid, Pt(hint), &metrics(ascent, -4.0, 0.0));
                let baseline = padding.0 + ascent;
                assert_eq!(baseline % 4.0, 0.0, "ascent {ascent}, hint {hint}");
                assert!(padding.0 >= hint, "ascent {ascent}, hint {hint}");
                assert!(padding.0 < hint + 4.0, "ascent {ascent}, hint {hint}");
            }
        }
    }

    #[test]
    fn top_padding_scales_with_density() {
        let grid = GridMetrics::from_display(&DisplayMetrics::new(3.0, 1.0));
        assert_eq!(grid.unit, Pt(12.0));
        let padding = grid_aligned_top_padding(&grid, Pt(0.0), &metrics(26.0, -7.0, 0.0));
        assert_eq!(padding, Pt(10.0));
    }

    #[test]
    fn line_height_rounds_up_to_the_grid() {
        let grid = GridMetrics { unit: Pt(4.0) };
        let natural = metrics(26.0, -7.0, 0.0);
        assert_eq!(
            line_spacing(&grid, Pt(38.0), &natural),
            LineSpacing {
                line_height: Pt(40.0),
                extra: Pt(7.0),
            }
        );
        assert_eq!(
            line_spacing(&grid, Pt(40.0), &natural).line_height,
            Pt(40.0)
        );
    }

    #[test]
    fn zero_hint_collapses_lines() {
        let grid = GridMetrics { unit: Pt(4.0) };
        let spacing = line_spacing(&grid, Pt(0.0), &metrics(16.0, -4.0, 2.0));
        assert_eq!(spacing.line_height, Pt(0.0));
        assert_eq!(spacing.extra, Pt(-22.0));
    }
}
