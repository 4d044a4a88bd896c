//! Flowing a paragraph around the corner of a text block that a floating action
//! button covers.
//!
//! Working out the indents takes two passes through the [`TextLayoutEngine`].
//! How many lines the overlap covers depends on how many lines there are, which
//! is only known after laying the text out:
//!
//! 1. [`grid_aligned_top_padding`] and [`line_spacing`] snap the first baseline
//!    and the line height to a 4dp grid
//! 2. [`dry_run_layout`] lays the text out without indents to count its lines
//! 3. [`compute_indents`] walks those lines away from the covered corner,
//!    indenting each one the overlap region reaches
//! 4. [`final_layout`] lays the text out again with the indents applied
//!
//! [`compute_layout`] runs the whole pipeline.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use fab_overlap_text::{GreedyLineBreaker, MonospaceFace, Pt, TextPaint};
//! use fab_overlap_text::layout::{compute_layout, LayoutInput, OverlapRegion};
//!
//! let paint = TextPaint::new(Arc::new(MonospaceFace::default()), Pt(32.0));
//! let overlap = OverlapRegion::new("bottom|right".parse().unwrap(), Pt(100.0), Pt(80.0));
//! let input = LayoutInput {
//!     line_height_hint: Pt(40.0),
//!     overlap,
//!     ..LayoutInput::new("Hello world, this wraps to three lines", &paint, Pt(300.0))
//! };
//!
//! let result = compute_layout(&GreedyLineBreaker, &input).expect("width is bounded");
//! assert_eq!(result.pre_indent_line_count, 3);
//! assert_eq!(result.indents.right, vec![Pt(0.0), Pt(100.0), Pt(100.0)]);
//! ```

mod grid;
mod indent;

pub use grid::*;
pub use indent::*;

use crate::engine::{Paragraph, ParagraphRequest, TextLayoutEngine};
use crate::gravity::LayoutDirection;
use crate::paint::TextPaint;
use crate::units::Pt;
use crate::OverlapTextError;

/// Everything that determines how a paragraph flows around an overlap region
#[derive(Debug, Clone)]
pub struct LayoutInput<'a> {
    pub text: &'a str,
    pub paint: &'a TextPaint,
    /// Width of the content box; must be finite
    pub available_width: Pt,
    pub grid: GridMetrics,
    pub top_padding_hint: Pt,
    pub line_height_hint: Pt,
    /// Padding between the text and the bottom edge of the block. Overlap pinned
    /// to the bottom edge covers this before it reaches any text
    pub bottom_padding: Pt,
    pub overlap: OverlapRegion,
    pub direction: LayoutDirection,
}

impl<'a> LayoutInput<'a> {
    /// An input with no overlap, no hints, and a 4dp grid at 1x density
    pub fn new(text: &'a str, paint: &'a TextPaint, available_width: Pt) -> LayoutInput<'a> {
        LayoutInput {
            text,
            paint,
            available_width,
            grid: GridMetrics::default(),
            top_padding_hint: Pt::ZERO,
            line_height_hint: Pt::ZERO,
            bottom_padding: Pt::ZERO,
            overlap: OverlapRegion::default(),
            direction: LayoutDirection::default(),
        }
    }
}

/// The output of [`compute_layout`]
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// The paragraph with indents applied
    pub paragraph: Paragraph,
    /// Top padding that puts the first baseline on the grid
    pub top_padding: Pt,
    pub spacing: LineSpacing,
    /// Lines in the dry run. The indent plan always has exactly this many entries
    pub pre_indent_line_count: usize,
    pub indents: IndentPlan,
}

impl LayoutResult {
    pub fn line_count(&self) -> usize {
        self.paragraph.line_count()
    }

    pub fn width(&self) -> Pt {
        self.paragraph.width()
    }

    pub fn height(&self) -> Pt {
        self.paragraph.height()
    }

    /// True when the indents pushed text onto more lines than the dry run had.
    /// The extra lines reuse the indent of the last planned line; nothing
    /// re-plans the indents, so the text may no longer clear the overlap region.
    pub fn overflowed(&self) -> bool {
        self.line_count() > self.pre_indent_line_count
    }
}

/// Lay the text out at the full width with grid spacing and no indents
pub fn dry_run_layout<E: TextLayoutEngine + ?Sized>(
    engine: &E,
    input: &LayoutInput<'_>,
    spacing: &LineSpacing,
) -> Paragraph {
    engine.layout(&ParagraphRequest {
        text: input.text,
        paint: input.paint,
        width: input.available_width,
        spacing_add: spacing.extra,
        direction: input.direction,
        indents: None,
    })
}

/// Lay the text out again, this time with the planned indents
pub fn final_layout<E: TextLayoutEngine + ?Sized>(
    engine: &E,
    input: &LayoutInput<'_>,
    spacing: &LineSpacing,
    plan: &IndentPlan,
) -> Paragraph {
    engine.layout(&ParagraphRequest {
        text: input.text,
        paint: input.paint,
        width: input.available_width,
        spacing_add: spacing.extra,
        direction: input.direction,
        indents: Some(plan.indents()),
    })
}

/// Run the full two-pass pipeline. Fails only if `available_width` is not
/// finite, which means the caller never constrained the width.
pub fn compute_layout<E: TextLayoutEngine + ?Sized>(
    engine: &E,
    input: &LayoutInput<'_>,
) -> Result<LayoutResult, OverlapTextError> {
    if !input.available_width.is_finite() {
        return Err(OverlapTextError::UnconstrainedWidth);
    }

    let metrics = input.paint.metrics();
    let top_padding = grid_aligned_top_padding(&input.grid, input.top_padding_hint, &metrics);
    let spacing = line_spacing(&input.grid, input.line_height_hint, &metrics);

    let dry_run = dry_run_layout(engine, input, &spacing);
    let pre_indent_line_count = dry_run.line_count();

    let corner = input.overlap.corner(input.direction);
    let edge_padding = if corner.is_top() {
        top_padding
    } else {
        input.bottom_padding
    };
    let indents = compute_indents(
        pre_indent_line_count,
        corner,
        input.overlap.width,
        input.overlap.height,
        edge_padding,
        spacing.line_height,
    );
    log::trace!(
        "indents for {corner:?}: left {:?}, right {:?}",
        indents.left,
        indents.right
    );

    let paragraph = final_layout(engine, input, &spacing, &indents);
    let result = LayoutResult {
        paragraph,
        top_padding,
        spacing,
        pre_indent_line_count,
        indents,
    };

    log::debug!(
        "laid out {} lines ({} before indents) at width {}",
        result.line_count(),
        pre_indent_line_count,
        input.available_width
    );
    if result.overflowed() {
        log::warn!(
            "indenting around the overlap region wrapped text onto {} extra line(s)",
            result.line_count() - pre_indent_line_count
        );
    }

    Ok(result)
}
