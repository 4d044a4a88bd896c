//! A block of text that flows around a floating action button overlapping one
//! of its corners.
//!
//! [`FabOverlapTextView`] lays its text out on a 4dp grid, works out which lines
//! the button reaches, and indents those lines on the side the button sits on.
//! Laid-out text draws onto any [`Canvas`]: [`RecordingCanvas`] keeps the draw
//! calls for inspection, and [`PageCanvas`] places the text on a PDF [`Page`].

mod attributes;
pub use attributes::*;

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

pub(crate) mod content;

mod document;
pub use document::*;

mod engine;
pub use engine::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod font_resolver;
pub use font_resolver::*;

mod gravity;
pub use gravity::*;

/// Two-pass layout of a paragraph around an overlapping corner
pub mod layout;

mod page;
pub use page::*;

mod paint;
pub use paint::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod typeface;
pub use typeface::*;

mod units;
pub use units::*;

mod view;
pub use view::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
