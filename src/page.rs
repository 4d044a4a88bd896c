use crate::canvas::Canvas;
use crate::colour::Colour;
use crate::content::render_spans;
use crate::font::Font;
use crate::paint::TextPaint;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::OverlapTextError;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text positioned on a page. `coords` is the start of the baseline in
/// PDF space, where y grows upwards from the bottom of the page.
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    /// Extra space after every character
    pub char_spacing: Pt,
    pub coords: (Pt, Pt),
}

/// A single page of a [`Document`](crate::Document)
#[derive(Debug, Clone)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    pub spans: Vec<SpanLayout>,
}

impl Page {
    pub fn new(width: Pt, height: Pt) -> Page {
        Page {
            media_box: Rect::sized(width, height),
            spans: Vec::default(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.spans.push(span);
    }

    /// A canvas that draws onto this page with `font`. `top_left` is where the
    /// canvas origin lands on the page, in PDF space.
    pub fn canvas(&mut self, font: Id<Font>, top_left: (Pt, Pt)) -> PageCanvas<'_> {
        PageCanvas {
            page: self,
            font,
            top_left,
            offset: (Pt::ZERO, Pt::ZERO),
        }
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), OverlapTextError> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(OverlapTextError::PageMissing)?;
        let parent = refs
            .get(RefType::PageTree)
            .ok_or(OverlapTextError::PageMissing)?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(parent);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        resources.finish();
        page.finish();

        let rendered = render_spans(&self.spans, fonts)?;
        writer.stream(content_id, rendered.as_slice());
        Ok(())
    }
}

/// Maps the y-down coordinates of a [`Canvas`] onto a PDF page
pub struct PageCanvas<'p> {
    page: &'p mut Page,
    font: Id<Font>,
    top_left: (Pt, Pt),
    offset: (Pt, Pt),
}

impl Canvas for PageCanvas<'_> {
    fn translate(&mut self, dx: Pt, dy: Pt) {
        self.offset.0 += dx;
        self.offset.1 += dy;
    }

    fn fill_text(&mut self, text: &str, paint: &TextPaint, x: Pt, baseline: Pt) {
        let coords = (
            self.top_left.0 + self.offset.0 + x,
            self.top_left.1 - (self.offset.1 + baseline),
        );
        self.page.add_span(SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                id: self.font,
                size: paint.size,
            },
            colour: paint.colour,
            char_spacing: paint.char_spacing(),
            coords,
        });
    }
}
