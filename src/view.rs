use crate::attributes::{Attributes, Dimension};
use crate::canvas::Canvas;
use crate::colour::Colour;
use crate::engine::{GreedyLineBreaker, TextLayoutEngine};
use crate::font_resolver::FontResolver;
use crate::gravity::{Gravity, LayoutDirection};
use crate::layout::{compute_layout, GridMetrics, LayoutInput, LayoutResult, OverlapRegion};
use crate::paint::TextPaint;
use crate::typeface::Typeface;
use crate::units::{DisplayMetrics, Pt};
use crate::OverlapTextError;
use std::sync::Arc;

/// How the parent constrains one axis of the view
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MeasureSpec {
    Exactly(Pt),
    AtMost(Pt),
    Unspecified,
}

impl MeasureSpec {
    /// The size on this axis, if it is bounded
    pub fn size(self) -> Option<Pt> {
        match self {
            MeasureSpec::Exactly(size) | MeasureSpec::AtMost(size) if size.is_finite() => {
                Some(size)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Size {
    pub width: Pt,
    pub height: Pt,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Padding {
    pub left: Pt,
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
}

impl Padding {
    /// Create padding by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Padding {
        Padding {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn all(value: Pt) -> Padding {
        Padding::trbl(value, value, value, value)
    }
}

/// Whether the cached layout still matches the view's inputs
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayoutState {
    Stale,
    Fresh,
}

/// Everything a layout is computed from
#[derive(Debug, Clone, PartialEq)]
struct LayoutKey {
    text: String,
    width: Pt,
    paint: TextPaint,
    overlap: OverlapRegion,
    grid: GridMetrics,
    line_height_hint: Pt,
    top_padding_hint: Pt,
    bottom_padding: Pt,
    direction: LayoutDirection,
}

#[derive(Debug, Clone)]
struct CachedLayout {
    key: LayoutKey,
    result: LayoutResult,
}

/// A block of text that flows around a floating action button covering one of
/// its corners.
///
/// Lines within reach of the button are indented on the side it sits on, and
/// the first baseline and line height snap to a 4dp grid. The view caches its
/// layout and only lays out again when something the layout depends on changes.
///
/// ```
/// use fab_overlap_text::*;
///
/// let attributes = Attributes {
///     fab_overlay_width: Dimension::Dp(64.0),
///     fab_overlay_height: Dimension::Dp(24.0),
///     line_height_hint: Dimension::Sp(20.0),
///     ..Attributes::default()
/// };
/// let mut view = FabOverlapTextView::new(&attributes, DisplayMetrics::default(), &mut NoFonts)
///     .expect("no font to resolve");
/// view.set_text("A paragraph that the button in the bottom corner overlaps.");
///
/// let size = view
///     .measure(MeasureSpec::AtMost(Pt(240.0)), MeasureSpec::Unspecified)
///     .expect("width is bounded");
/// assert_eq!(size.width, Pt(240.0));
/// assert_eq!(view.state(), LayoutState::Fresh);
///
/// let mut canvas = RecordingCanvas::new();
/// view.draw(&mut canvas);
/// assert!(!canvas.ops.is_empty());
/// ```
#[derive(Debug)]
pub struct FabOverlapTextView<E: TextLayoutEngine = GreedyLineBreaker> {
    engine: E,
    grid: GridMetrics,
    gravity: Gravity,
    overlap_width: Pt,
    overlap_height: Pt,
    line_height_hint: Pt,
    top_padding_hint: Pt,
    padding: Padding,
    direction: LayoutDirection,
    paint: TextPaint,
    text: Option<String>,
    cache: Option<CachedLayout>,
}

impl FabOverlapTextView<GreedyLineBreaker> {
    /// Create a view from its attributes, resolving the named font if there is one
    pub fn new(
        attributes: &Attributes,
        display: DisplayMetrics,
        fonts: &mut dyn FontResolver,
    ) -> Result<Self, OverlapTextError> {
        FabOverlapTextView::with_engine(GreedyLineBreaker, attributes, display, fonts)
    }
}

impl<E: TextLayoutEngine> FabOverlapTextView<E> {
    /// Create a view that lays its text out with a custom engine
    pub fn with_engine(
        engine: E,
        attributes: &Attributes,
        display: DisplayMetrics,
        fonts: &mut dyn FontResolver,
    ) -> Result<Self, OverlapTextError> {
        let px = |dimension: Dimension| dimension.to_pixel_size(&display);

        let mut view = FabOverlapTextView {
            engine,
            grid: GridMetrics::from_display(&display),
            gravity: attributes.fab_gravity,
            overlap_width: px(attributes.fab_overlay_width),
            overlap_height: px(attributes.fab_overlay_height),
            line_height_hint: px(attributes.line_height_hint),
            top_padding_hint: px(attributes.top_padding_hint),
            padding: Padding {
                left: px(attributes.padding_left),
                top: px(attributes.padding_top),
                right: px(attributes.padding_right),
                bottom: px(attributes.padding_bottom),
            },
            direction: attributes.layout_direction,
            paint: TextPaint {
                size: attributes.text_size_px(&display),
                colour: attributes.text_color.unwrap_or_default(),
                letter_spacing: attributes.letter_spacing,
                font_feature_settings: attributes.font_feature_settings.clone(),
                ..TextPaint::default()
            },
            text: None,
            cache: None,
        };

        if let Some(font) = attributes.font.as_deref() {
            view.set_font(font, fonts)?;
        }

        Ok(view)
    }

    pub fn set_overlap_gravity(&mut self, gravity: Gravity) {
        self.gravity = gravity;
    }

    pub fn set_overlap_width(&mut self, width: Pt) {
        self.overlap_width = width;
    }

    pub fn set_overlap_height(&mut self, height: Pt) {
        self.overlap_height = height;
    }

    /// Replace the text, throwing away the current layout
    pub fn set_text<S: Into<String>>(&mut self, text: S) {
        self.text = Some(text.into());
        self.cache = None;
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text_size(&mut self, size: Pt) {
        self.paint.size = size;
    }

    pub fn set_text_colour(&mut self, colour: Colour) {
        self.paint.colour = colour;
    }

    pub fn set_typeface(&mut self, typeface: Arc<dyn Typeface>) {
        self.paint.typeface = typeface;
    }

    /// Look a font up by name and use it as the typeface
    pub fn set_font(
        &mut self,
        name: &str,
        fonts: &mut dyn FontResolver,
    ) -> Result<(), OverlapTextError> {
        let font = fonts.resolve(name)?;
        self.set_typeface(Arc::new(font));
        Ok(())
    }

    /// Extra space after every character, in ems
    pub fn set_letter_spacing(&mut self, letter_spacing: f32) {
        self.paint.letter_spacing = letter_spacing;
    }

    pub fn set_font_feature_settings(&mut self, settings: Option<&str>) {
        self.paint.font_feature_settings = settings.map(str::to_string);
    }

    pub fn set_line_height_hint(&mut self, hint: Pt) {
        self.line_height_hint = hint;
    }

    pub fn set_top_padding_hint(&mut self, hint: Pt) {
        self.top_padding_hint = hint;
    }

    /// The top padding is replaced by the grid-aligned top padding whenever a
    /// layout is computed
    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
    }

    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        self.direction = direction;
    }

    pub fn paint(&self) -> &TextPaint {
        &self.paint
    }

    /// Padding as it applies to the current layout
    pub fn padding(&self) -> Padding {
        match &self.cache {
            Some(cache) => Padding {
                top: cache.result.top_padding,
                ..self.padding
            },
            None => self.padding,
        }
    }

    /// The cached layout, if there is one. It may be stale.
    pub fn layout(&self) -> Option<&LayoutResult> {
        self.cache.as_ref().map(|cache| &cache.result)
    }

    fn key(&self, text: &str, width: Pt) -> LayoutKey {
        LayoutKey {
            text: text.to_string(),
            width,
            paint: self.paint.clone(),
            overlap: OverlapRegion::new(self.gravity, self.overlap_width, self.overlap_height),
            grid: self.grid,
            line_height_hint: self.line_height_hint,
            top_padding_hint: self.top_padding_hint,
            bottom_padding: self.padding.bottom,
            direction: self.direction,
        }
    }

    /// Fresh if a layout exists and was computed from the current inputs at
    /// the most recently measured width
    pub fn state(&self) -> LayoutState {
        match (&self.cache, &self.text) {
            (Some(cache), Some(text)) if cache.key == self.key(text, cache.key.width) => {
                LayoutState::Fresh
            }
            _ => LayoutState::Stale,
        }
    }

    /// Work out how big the view wants to be. The width must be bounded; the
    /// height constraint is ignored, as the text is never truncated.
    pub fn measure(
        &mut self,
        width: MeasureSpec,
        _height: MeasureSpec,
    ) -> Result<Size, OverlapTextError> {
        let spec_width = width.size().ok_or(OverlapTextError::UnconstrainedWidth)?;

        let Some(text) = self.text.as_deref() else {
            let padding = self.padding();
            return Ok(Size {
                width: padding.left + padding.right,
                height: padding.top + padding.bottom,
            });
        };

        let layout_width = spec_width - self.padding.left - self.padding.right;
        let key = self.key(text, layout_width);
        let fresh = matches!(&self.cache, Some(cache) if cache.key == key);
        if !fresh {
            let input = LayoutInput {
                text,
                paint: &key.paint,
                available_width: layout_width,
                grid: key.grid,
                top_padding_hint: key.top_padding_hint,
                line_height_hint: key.line_height_hint,
                bottom_padding: key.bottom_padding,
                overlap: key.overlap,
                direction: key.direction,
            };
            let result = compute_layout(&self.engine, &input)?;
            self.cache = Some(CachedLayout { key, result });
        }

        let padding = self.padding();
        let (content_width, content_height) = self
            .layout()
            .map(|layout| (layout.width(), layout.height()))
            .unwrap_or_default();
        Ok(Size {
            width: padding.left + content_width + padding.right,
            height: padding.top + content_height + padding.bottom,
        })
    }

    /// Paint the current layout, offset by the padding. Draws nothing until the
    /// view has been measured.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let Some(layout) = self.layout() else {
            return;
        };
        let padding = self.padding();
        canvas.translate(padding.left, padding.top);
        layout.paragraph.draw(canvas);
        canvas.translate(-padding.left, -padding.top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::engine::{Paragraph, ParagraphRequest};
    use crate::font_resolver::NoFonts;
    use std::cell::Cell;

    /// Counts how many paragraphs it lays out
    #[derive(Debug, Default)]
    struct CountingEngine {
        layouts: Cell<usize>,
    }

    impl TextLayoutEngine for CountingEngine {
        fn layout(&self, request: &ParagraphRequest<'_>) -> Paragraph {
            self.layouts.set(self.layouts.get() + 1);
            GreedyLineBreaker.layout(request)
        }
    }

    const TEXT: &str = "Hello world, this wraps to three lines";

    /// 32px monospace text on a 40px line, with a 100x80 overlap at the bottom
    /// right
    fn view() -> FabOverlapTextView<CountingEngine> {
        let attributes = Attributes {
            fab_gravity: "bottom|right".parse().unwrap(),
            fab_overlay_width: Dimension::Px(100.0),
            fab_overlay_height: Dimension::Px(80.0),
            text_size: Some(Dimension::Px(32.0)),
            line_height_hint: Dimension::Px(40.0),
            padding_left: Dimension::Px(10.0),
            padding_right: Dimension::Px(10.0),
            padding_top: Dimension::Px(30.0),
            ..Attributes::default()
        };
        FabOverlapTextView::with_engine(
            CountingEngine::default(),
            &attributes,
            DisplayMetrics::default(),
            &mut NoFonts,
        )
        .unwrap()
    }

    #[test]
    fn requires_a_bounded_width() {
        let mut view = view();
        view.set_text(TEXT);
        for constraint in [
            MeasureSpec::Unspecified,
            MeasureSpec::AtMost(Pt(f32::INFINITY)),
            MeasureSpec::Exactly(Pt(f32::NAN)),
        ] {
            assert!(matches!(
                view.measure(constraint, MeasureSpec::Unspecified),
                Err(OverlapTextError::UnconstrainedWidth)
            ));
        }
    }

    #[test]
    fn measures_padding_plus_content() {
        let mut view = view();
        view.set_text(TEXT);
        let size = view
            .measure(MeasureSpec::Exactly(Pt(320.0)), MeasureSpec::Unspecified)
            .unwrap();

        // the grid-aligned top padding replaces the configured 30px
        assert_eq!(view.padding().top, Pt(2.0));
        assert_eq!(size.width, Pt(320.0));
        assert_eq!(size.height, Pt(2.0 + 113.0));

        let layout = view.layout().unwrap();
        assert_eq!(layout.width(), Pt(300.0));
        assert_eq!(layout.indents.right, vec![Pt(0.0), Pt(100.0), Pt(100.0)]);
    }

    #[test]
    fn measuring_without_text_reports_padding() {
        let mut view = view();
        let size = view
            .measure(MeasureSpec::AtMost(Pt(320.0)), MeasureSpec::Unspecified)
            .unwrap();
        assert_eq!(
            size,
            Size {
                width: Pt(20.0),
                height: Pt(30.0)
            }
        );
        assert!(view.layout().is_none());
        assert_eq!(view.state(), LayoutState::Stale);
    }

    #[test]
    fn caches_until_an_input_changes() {
        let mut view = view();
        view.set_text(TEXT);
        assert_eq!(view.state(), LayoutState::Stale);

        let width = MeasureSpec::Exactly(Pt(320.0));
        view.measure(width, MeasureSpec::Unspecified).unwrap();
        assert_eq!(view.state(), LayoutState::Fresh);
        assert_eq!(view.engine.layouts.get(), 2);

        view.measure(width, MeasureSpec::Unspecified).unwrap();
        assert_eq!(view.engine.layouts.get(), 2);

        view.measure(MeasureSpec::Exactly(Pt(400.0)), MeasureSpec::Unspecified)
            .unwrap();
        assert_eq!(view.engine.layouts.get(), 4);

        view.set_text_size(Pt(28.0));
        assert_eq!(view.state(), LayoutState::Stale);
        view.measure(MeasureSpec::Exactly(Pt(400.0)), MeasureSpec::Unspecified)
            .unwrap();
        assert_eq!(view.engine.layouts.get(), 6);
        assert_eq!(view.state(), LayoutState::Fresh);
    }

    #[test]
    fn replacing_text_discards_the_layout() {
        let mut view = view();
        view.set_text(TEXT);
        view.measure(MeasureSpec::Exactly(Pt(320.0)), MeasureSpec::Unspecified)
            .unwrap();
        assert!(view.layout().is_some());

        view.set_text("Something else");
        assert!(view.layout().is_none());
        assert_eq!(view.state(), LayoutState::Stale);
        assert_eq!(view.padding().top, Pt(30.0));
    }

    #[test]
    fn draws_inside_the_padding() {
        let mut view = view();
        view.set_text(TEXT);

        let mut canvas = RecordingCanvas::new();
        view.draw(&mut canvas);
        assert!(canvas.ops.is_empty());

        view.measure(MeasureSpec::Exactly(Pt(320.0)), MeasureSpec::Unspecified)
            .unwrap();
        view.draw(&mut canvas);

        let lines: Vec<&str> = canvas.ops.iter().map(|op| op.text.as_str()).collect();
        assert_eq!(lines, vec!["Hello world, this", "wraps to", "three lines"]);
        assert_eq!(canvas.ops[0].x, Pt(10.0));
        // 2px grid-aligned top padding plus a 26px ascent
        assert_eq!(canvas.ops[0].baseline, Pt(28.0));
        assert_eq!(canvas.ops[1].baseline, Pt(68.0));
        assert_eq!(canvas.origin(), (Pt(0.0), Pt(0.0)));
    }
}
