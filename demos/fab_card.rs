//! Lays four cards of lorem ipsum out on a half-letter page, each with the
//! button pinned to a different corner, and writes them to `fab-card.pdf`.
//!
//! Run with the path to a TTF or OTF font:
//!
//! ```sh
//! cargo run --example fab-card -- /usr/share/fonts/TTF/FiraMono-Regular.ttf
//! ```

use fab_overlap_text::*;
use std::sync::Arc;

fn main() {
    let path = std::env::args()
        .nth(1)
        .expect("usage: fab-card <path to a .ttf or .otf font>");
    let font = Font::load(std::fs::read(&path).expect("can read font")).expect("can load font");

    let mut doc = Document::default();
    let font_id = doc.add_font(font.clone());

    let page_width: Pt = In(5.5).into();
    let page_height: Pt = In(8.5).into();
    let margin: Pt = In(0.5).into();
    let mut page = Page::new(page_width, page_height);

    let mut top = page_height - margin;
    for (i, gravity) in ["bottom|end", "top|start", "bottom|left", "top|right"]
        .iter()
        .enumerate()
    {
        let attributes = Attributes {
            fab_gravity: gravity.parse().expect("valid gravity"),
            fab_overlay_width: Dimension::Dp(56.0),
            fab_overlay_height: Dimension::Dp(28.0),
            text_size: Some(Dimension::Sp(11.0)),
            line_height_hint: Dimension::Sp(16.0),
            top_padding_hint: Dimension::Dp(4.0),
            padding_bottom: Dimension::Dp(8.0),
            ..Attributes::default()
        };
        let mut view = FabOverlapTextView::new(&attributes, DisplayMetrics::default(), &mut NoFonts)
            .expect("no font to resolve");
        view.set_typeface(Arc::new(font.clone()));
        view.set_text(format!("{gravity}: {}", lipsum::lipsum(30 + i * 10)));

        let size = view
            .measure(
                MeasureSpec::Exactly(page_width - margin * 2.0),
                MeasureSpec::Unspecified,
            )
            .expect("width is bounded");
        if let Some(layout) = view.layout() {
            if layout.overflowed() {
                eprintln!("{gravity}: text grew by a line when indented");
            }
        }

        let mut canvas = page.canvas(font_id, (margin, top));
        view.draw(&mut canvas);
        top -= size.height + Pt(18.0);
    }

    doc.add_page(page);
    let mut out = std::fs::File::create("fab-card.pdf").unwrap();
    doc.write(&mut out).unwrap();
}
