//! Content stream rendering for page text.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{SpanFont, SpanLayout};
use crate::units::Pt;
use id_arena::Arena;
use std::io::Write;

/// Renders text spans to a PDF content stream, only switching font, colour and
/// character spacing when they change between spans. Spans whose font is not in
/// `fonts` are skipped without touching the text state.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_spans(
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();
    if spans.is_empty() {
        return Ok(content);
    }

    write!(content, "q\n")?;

    let mut current_font: Option<SpanFont> = None;
    let mut current_colour: Option<Colour> = None;
    let mut current_spacing: Option<Pt> = None;

    for span in spans.iter() {
        let Some(font) = fonts.get(span.font.id) else {
            log::warn!("skipping span with unknown font: {:?}", span.text);
            continue;
        };
        if current_font != Some(span.font) {
            current_font = Some(span.font);
            write_font(&mut content, span.font)?;
        }
        if current_colour != Some(span.colour) {
            current_colour = Some(span.colour);
            write_colour(&mut content, span.colour)?;
        }
        if current_spacing != Some(span.char_spacing) {
            current_spacing = Some(span.char_spacing);
            write!(content, "{} Tc\n", span.char_spacing.0)?;
        }

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0 .0, span.coords.1 .0)?;
        write!(content, "<")?;
        for ch in span.text.chars() {
            write!(content, "{:04x}", font.glyph_or_replacement(ch))?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn write_font(content: &mut Vec<u8>, font: SpanFont) -> Result<(), std::io::Error> {
    write!(content, "/F{} {} Tf\n", font.id.index(), font.size.0)
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}
