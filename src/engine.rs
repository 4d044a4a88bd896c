//! Paragraph layout: breaking text into lines that fit a width, with optional
//! per-line indents, and painting those lines onto a [`Canvas`].

use crate::canvas::Canvas;
use crate::gravity::LayoutDirection;
use crate::paint::TextPaint;
use crate::units::Pt;
use std::ops::Range;

const TABSIZE: usize = 4;

/// Per-line indents. Lines past the end of either array use its last entry, and
/// an empty array means no indent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Indents<'a> {
    pub left: &'a [Pt],
    pub right: &'a [Pt],
}

impl Indents<'_> {
    /// The `(left, right)` indent for a given line
    pub fn at(&self, line: usize) -> (Pt, Pt) {
        (indent_at(self.left, line), indent_at(self.right, line))
    }
}

fn indent_at(indents: &[Pt], line: usize) -> Pt {
    indents
        .get(line)
        .or_else(|| indents.last())
        .copied()
        .unwrap_or_default()
}

/// Everything a [`TextLayoutEngine`] needs to lay out one paragraph
#[derive(Debug, Clone)]
pub struct ParagraphRequest<'a> {
    pub text: &'a str,
    pub paint: &'a TextPaint,
    /// The width lines are wrapped to, before indents
    pub width: Pt,
    /// Added to the font's natural line height; may be negative
    pub spacing_add: Pt,
    pub direction: LayoutDirection,
    pub indents: Option<Indents<'a>>,
}

/// Lays paragraphs out into lines
pub trait TextLayoutEngine {
    fn layout(&self, request: &ParagraphRequest<'_>) -> Paragraph;
}

/// One laid-out line. All positions are relative to the top left of the paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Byte range into [`Paragraph::text`], including any trailing whitespace
    pub range: Range<usize>,
    /// Advance of the line's content, not counting trailing whitespace
    pub width: Pt,
    pub left_indent: Pt,
    pub right_indent: Pt,
    pub top: Pt,
    pub baseline: Pt,
}

/// A laid-out paragraph, ready to be measured and drawn
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    text: String,
    paint: TextPaint,
    width: Pt,
    line_height: Pt,
    spacing_add: Pt,
    direction: LayoutDirection,
    lines: Vec<Line>,
}

impl Paragraph {
    /// The laid-out text, with tabs expanded and line endings normalised
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn paint(&self) -> &TextPaint {
        &self.paint
    }

    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The visible text of a line, without trailing whitespace
    pub fn line_text(&self, line: usize) -> Option<&str> {
        self.lines
            .get(line)
            .map(|l| self.text[l.range.clone()].trim_end())
    }

    /// The width the paragraph was laid out to. Like a text block, this is the
    /// requested width rather than the width of the longest line
    pub fn width(&self) -> Pt {
        self.width
    }

    /// Distance between consecutive baselines
    pub fn line_height(&self) -> Pt {
        self.line_height
    }

    /// Every line is `line_height` tall except the last, which leaves off the
    /// added spacing
    pub fn height(&self) -> Pt {
        if self.lines.is_empty() {
            return Pt::ZERO;
        }
        (self.line_height * self.lines.len() as f32 - self.spacing_add).max(Pt::ZERO)
    }

    /// Paint every line onto the canvas, aligned to the start edge of its indented
    /// box
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for line in self.lines.iter() {
            let text = self.text[line.range.clone()].trim_end();
            if text.is_empty() {
                continue;
            }
            let x = match self.direction {
                LayoutDirection::Ltr => line.left_indent,
                LayoutDirection::Rtl => self.width - line.right_indent - line.width,
            };
            canvas.fill_text(text, &self.paint, x, line.baseline);
        }
    }
}

/// A greedy, word-aware line breaker. Lines break after runs of whitespace,
/// which hang off the end of the line rather than counting towards its width.
/// A word that cannot fit on a line by itself is split between characters.
#[derive(Debug, Default, Copy, Clone)]
pub struct GreedyLineBreaker;

impl TextLayoutEngine for GreedyLineBreaker {
    fn layout(&self, request: &ParagraphRequest<'_>) -> Paragraph {
        // replace tabs with spaces, then normalize newlines
        let text = request
            .text
            .replace('\t', &" ".repeat(TABSIZE))
            .replace("\r\n", "\n")
            .replace('\r', "\n");

        let mut builder = LineBuilder {
            text: &text,
            paint: request.paint,
            width: request.width,
            indents: request.indents,
            lines: Vec::new(),
            line_start: 0,
            line_end: 0,
            content_width: Pt::ZERO,
            pending_whitespace: Pt::ZERO,
            has_content: false,
        };

        let mut start = 0;
        for hard_line in text.split('\n') {
            let end = start + hard_line.len();
            builder.break_hard_line(start, end);
            start = end + 1;
        }
        let broken = builder.lines;

        let metrics = request.paint.metrics();
        let line_height = metrics.height() + request.spacing_add;
        let indents = request.indents.unwrap_or(Indents {
            left: &[],
            right: &[],
        });

        let lines = broken
            .into_iter()
            .enumerate()
            .map(|(i, (range, width))| {
                let (left_indent, right_indent) = indents.at(i);
                let top = line_height * i as f32;
                Line {
                    range,
                    width,
                    left_indent,
                    right_indent,
                    top,
                    baseline: top + metrics.ascent,
                }
            })
            .collect();

        Paragraph {
            text,
            paint: request.paint.clone(),
            width: request.width,
            line_height,
            spacing_add: request.spacing_add,
            direction: request.direction,
            lines,
        }
    }
}

/// Whitespace or non-whitespace characters, measured together
struct Run {
    range: Range<usize>,
    width: Pt,
    whitespace: bool,
}

fn runs(text: &str, start: usize, end: usize, paint: &TextPaint) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for (i, ch) in text[start..end].char_indices() {
        let at = start + i;
        let whitespace = ch.is_whitespace();
        let advance = paint.advance(ch);
        match runs.last_mut() {
            Some(run) if run.whitespace == whitespace => {
                run.range.end = at + ch.len_utf8();
                run.width += advance;
            }
            _ => runs.push(Run {
                range: at..at + ch.len_utf8(),
                width: advance,
                whitespace,
            }),
        }
    }
    runs
}

struct LineBuilder<'a> {
    text: &'a str,
    paint: &'a TextPaint,
    width: Pt,
    indents: Option<Indents<'a>>,
    lines: Vec<(Range<usize>, Pt)>,

    line_start: usize,
    /// end of the current line, including trailing whitespace
    line_end: usize,
    content_width: Pt,
    /// width of the whitespace after the committed content
    pending_whitespace: Pt,
    has_content: bool,
}

impl LineBuilder<'_> {
    /// Width available to the line currently being built
    fn available(&self) -> Pt {
        let (left, right) = self
            .indents
            .map(|indents| indents.at(self.lines.len()))
            .unwrap_or_default();
        self.width - left - right
    }

    fn finish_line(&mut self, next_start: usize) {
        self.lines
            .push((self.line_start..self.line_end, self.content_width));
        self.line_start = next_start;
        self.line_end = next_start;
        self.content_width = Pt::ZERO;
        self.pending_whitespace = Pt::ZERO;
        self.has_content = false;
    }

    /// Break `text[start..end]`, which contains no newlines, into lines. Always
    /// produces at least one line, even for an empty range
    fn break_hard_line(&mut self, start: usize, end: usize) {
        self.line_start = start;
        self.line_end = start;

        for run in runs(self.text, start, end, self.paint) {
            if run.whitespace {
                if self.has_content {
                    // hangs off the end of the line if we break here
                    self.pending_whitespace += run.width;
                } else {
                    // leading whitespace indents the first word
                    self.content_width += run.width;
                    self.has_content = true;
                }
                self.line_end = run.range.end;
                continue;
            }

            if !self.has_content {
                self.place_word(run);
            } else if self.content_width + self.pending_whitespace + run.width
                <= self.available()
            {
                self.content_width += self.pending_whitespace + run.width;
                self.pending_whitespace = Pt::ZERO;
                self.line_end = run.range.end;
            } else {
                self.finish_line(run.range.start);
                self.place_word(run);
            }
        }

        self.finish_line(end);
    }

    /// Place a word at the start of an empty line, splitting it across as many
    /// lines as it takes to fit
    fn place_word(&mut self, run: Run) {
        let mut start = run.range.start;
        let mut width = run.width;
        loop {
            let available = self.available();
            if width <= available {
                self.content_width += width;
                self.line_end = run.range.end;
                self.has_content = true;
                return;
            }

            // no break point - force a character break, keeping at least one
            // character so that we always make progress
            let mut split = start;
            let mut taken = Pt::ZERO;
            for (i, ch) in self.text[start..run.range.end].char_indices() {
                let advance = self.paint.advance(ch);
                if split > start && taken + advance > available {
                    break;
                }
                taken += advance;
                split = start + i + ch.len_utf8();
            }

            self.content_width = taken;
            self.line_end = split;
            if split == run.range.end {
                self.has_content = true;
                return;
            }
            self.finish_line(split);
            start = split;
            width -= taken;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::typeface::MonospaceFace;
    use std::sync::Arc;

    /// 10pt per character, 16pt ascent, 20pt natural line height
    fn paint() -> TextPaint {
        TextPaint::new(Arc::new(MonospaceFace::default()), Pt(20.0))
    }

    fn layout(text: &str, width: f32, indents: Option<Indents<'_>>) -> Paragraph {
        let paint = paint();
        GreedyLineBreaker.layout(&ParagraphRequest {
            text,
            paint: &paint,
            width: Pt(width),
            spacing_add: Pt(4.0),
            direction: LayoutDirection::Ltr,
            indents,
        })
    }

    fn texts(paragraph: &Paragraph) -> Vec<&str> {
        (0..paragraph.line_count())
            .filter_map(|i| paragraph.line_text(i))
            .collect()
    }

    #[test]
    fn wraps_at_whitespace() {
        let paragraph = layout("the quick brown fox", 100.0, None);
        assert_eq!(texts(&paragraph), vec!["the quick", "brown fox"]);
        assert_eq!(paragraph.lines()[0].width, Pt(90.0));
        assert_eq!(paragraph.lines()[0].range, 0..10);
    }

    #[test]
    fn trailing_whitespace_hangs() {
        // exactly fills the line; the trailing spaces do not force a wrap
        let paragraph = layout("abcdefghij   klm", 100.0, None);
        assert_eq!(texts(&paragraph), vec!["abcdefghij", "klm"]);
    }

    #[test]
    fn long_words_break_between_characters() {
        let paragraph = layout("abcdefghijklmnop", 100.0, None);
        assert_eq!(texts(&paragraph), vec!["abcdefghij", "klmnop"]);
    }

    #[test]
    fn hard_breaks_and_empty_lines() {
        let paragraph = layout("one\r\n\ntwo\n", 100.0, None);
        assert_eq!(texts(&paragraph), vec!["one", "", "two", ""]);

        let empty = layout("", 100.0, None);
        assert_eq!(empty.line_count(), 1);
        assert_eq!(empty.height(), Pt(20.0));
    }

    #[test]
    fn tabs_expand_to_spaces() {
        let paragraph = layout("\tab", 100.0, None);
        assert_eq!(paragraph.text(), "    ab");
        assert_eq!(paragraph.lines()[0].width, Pt(60.0));
    }

    #[test]
    fn indents_narrow_lines_and_repeat_their_last_entry() {
        let left = [Pt(20.0)];
        let right = [Pt(30.0)];
        let paragraph = layout(
            "aaaa bbbb cccc",
            100.0,
            Some(Indents {
                left: &left,
                right: &right,
            }),
        );
        assert_eq!(texts(&paragraph), vec!["aaaa", "bbbb", "cccc"]);
        for line in paragraph.lines() {
            assert_eq!(line.left_indent, Pt(20.0));
            assert_eq!(line.right_indent, Pt(30.0));
        }
    }

    #[test]
    fn lines_stack_by_line_height() {
        let paragraph = layout("aaaa bbbb cccc", 50.0, None);
        assert_eq!(paragraph.line_height(), Pt(24.0));
        assert_eq!(paragraph.lines()[1].top, Pt(24.0));
        assert_eq!(paragraph.lines()[1].baseline, Pt(40.0));
        // no spacing after the last line
        assert_eq!(paragraph.height(), Pt(68.0));
        assert_eq!(paragraph.width(), Pt(50.0));
    }

    #[test]
    fn negative_spacing_keeps_the_last_line() {
        let paint = paint();
        let paragraph = GreedyLineBreaker.layout(&ParagraphRequest {
            text: "aaaa bbbb",
            paint: &paint,
            width: Pt(50.0),
            spacing_add: Pt(-20.0),
            direction: LayoutDirection::Ltr,
            indents: None,
        });
        assert_eq!(paragraph.line_count(), 2);
        assert_eq!(paragraph.line_height(), Pt::ZERO);
        assert_eq!(paragraph.height(), Pt(20.0));
    }

    #[test]
    fn draws_from_the_start_edge() {
        let paint = paint();
        let right = [Pt(10.0)];
        let paragraph = GreedyLineBreaker.layout(&ParagraphRequest {
            text: "abc",
            paint: &paint,
            width: Pt(100.0),
            spacing_add: Pt::ZERO,
            direction: LayoutDirection::Rtl,
            indents: Some(Indents {
                left: &[],
                right: &right,
            }),
        });
        let mut canvas = RecordingCanvas::new();
        paragraph.draw(&mut canvas);
        assert_eq!(canvas.ops.len(), 1);
        assert_eq!(canvas.ops[0].text, "abc");
        assert_eq!(canvas.ops[0].x, Pt(60.0));
        assert_eq!(canvas.ops[0].baseline, Pt(16.0));
    }
}
