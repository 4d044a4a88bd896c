use crate::engine::Indents;
use crate::gravity::{Corner, Gravity, LayoutDirection};
use crate::units::Pt;

/// The rectangle a floating action button covers, pinned to one corner of the
/// text block
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct OverlapRegion {
    pub gravity: Gravity,
    pub width: Pt,
    pub height: Pt,
}

impl OverlapRegion {
    pub fn new(gravity: Gravity, width: Pt, height: Pt) -> OverlapRegion {
        OverlapRegion {
            gravity,
            width,
            height,
        }
    }

    pub fn corner(&self, direction: LayoutDirection) -> Corner {
        self.gravity.resolve(direction)
    }
}

/// Left and right indents for each line of a paragraph
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IndentPlan {
    pub left: Vec<Pt>,
    pub right: Vec<Pt>,
}

impl IndentPlan {
    /// A plan with no indents on any of `line_count` lines
    pub fn none(line_count: usize) -> IndentPlan {
        IndentPlan {
            left: vec![Pt::ZERO; line_count],
            right: vec![Pt::ZERO; line_count],
        }
    }

    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn indents(&self) -> Indents<'_> {
        Indents {
            left: &self.left,
            right: &self.right,
        }
    }

    /// Number of lines with an indent on either side
    pub fn indented_lines(&self) -> usize {
        self.left
            .iter()
            .zip(self.right.iter())
            .filter(|(l, r)| l.0 != 0.0 || r.0 != 0.0)
            .count()
    }
}

/// Work out which lines the overlap region covers and indent them on the side
/// the region sits on.
///
/// Lines are visited starting from the edge the region is pinned to. The region
/// height, less the padding between that edge and the text (`edge_padding`), is
/// consumed one `line_height` at a time; every line visited while some height
/// remains is indented by the region's width.
pub fn compute_indents(
    line_count: usize,
    corner: Corner,
    overlap_width: Pt,
    overlap_height: Pt,
    edge_padding: Pt,
    line_height: Pt,
) -> IndentPlan {
    let mut plan = IndentPlan::none(line_count);
    let mut remaining = overlap_height - edge_padding;

    let order: Box<dyn Iterator<Item = usize>> = if corner.is_top() {
        Box::new(0..line_count)
    } else {
        Box::new((0..line_count).rev())
    };

    for line in order {
        if remaining.0 <= 0.0 {
            break;
        }
        if corner.is_left() {
            plan.left[line] = overlap_width;
        } else {
            plan.right[line] = overlap_width;
        }
        remaining -= line_height;
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: Pt = Pt(40.0);

    #[test]
    fn zero_overlap_indents_nothing() {
        for corner in [
            Corner::TopLeft,
            Corner::TopRight,
            Corner::BottomLeft,
            Corner::BottomRight,
        ] {
            let plan = compute_indents(5, corner, Pt(0.0), Pt(0.0), Pt(0.0), LINE);
            assert_eq!(plan, IndentPlan::none(5));
        }
    }

    #[test]
    fn short_overlap_indents_the_edge_line() {
        let plan = compute_indents(4, Corner::TopRight, Pt(56.0), Pt(12.0), Pt(0.0), LINE);
        assert_eq!(plan.right, vec![Pt(56.0), Pt(0.0), Pt(0.0), Pt(0.0)]);
        assert_eq!(plan.left, vec![Pt(0.0); 4]);

        let plan = compute_indents(4, Corner::BottomLeft, Pt(56.0), LINE, Pt(0.0), LINE);
        assert_eq!(plan.left, vec![Pt(0.0), Pt(0.0), Pt(0.0), Pt(56.0)]);
        assert_eq!(plan.indented_lines(), 1);
    }

    #[test]
    fn overlap_of_n_lines_indents_n_lines() {
        for n in 1..=5usize {
            let height = LINE * n as f32;
            let plan = compute_indents(6, Corner::BottomRight, Pt(100.0), height, Pt(0.0), LINE);
            assert_eq!(plan.indented_lines(), n);
            for line in (6 - n)..6 {
                assert_eq!(plan.right[line], Pt(100.0));
                assert_eq!(plan.left[line], Pt(0.0));
            }
        }
    }

    #[test]
    fn padding_on_the_gravity_edge_absorbs_overlap() {
        // 90 high, 20 of which falls in the padding: 70 left covers two lines
        let plan = compute_indents(5, Corner::TopLeft, Pt(50.0), Pt(90.0), Pt(20.0), LINE);
        assert_eq!(plan.indented_lines(), 2);
        assert_eq!(plan.left[0], Pt(50.0));
        assert_eq!(plan.left[1], Pt(50.0));

        // padding taller than the overlap: no line is covered
        let plan = compute_indents(5, Corner::TopLeft, Pt(50.0), Pt(10.0), Pt(20.0), LINE);
        assert_eq!(plan.indented_lines(), 0);
    }

    #[test]
    fn more_overlap_than_lines() {
        let plan = compute_indents(2, Corner::TopRight, Pt(30.0), Pt(400.0), Pt(0.0), LINE);
        assert_eq!(plan.right, vec![Pt(30.0), Pt(30.0)]);
        assert!(compute_indents(0, Corner::TopRight, Pt(30.0), Pt(400.0), Pt(0.0), LINE).is_empty());
    }
}
