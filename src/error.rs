use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum OverlapTextError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// The attributes could not be deserialised
    Json(#[from] serde_json::Error),

    #[error("a fab overlap text block must be measured with a bounded width")]
    /// Layout was requested without a finite width to wrap the text in
    UnconstrainedWidth,

    #[error("invalid fab gravity `{0}`")]
    /// A gravity string did not name exactly one vertical and one horizontal edge
    InvalidGravity(String),

    #[error("invalid dimension `{0}`")]
    /// A dimension string was not a number followed by `px`, `dp` or `sp`
    InvalidDimension(String),

    #[error("invalid colour `{0}`")]
    /// A colour string was not `#RGB`, `#RRGGBB` or `#AARRGGBB`
    InvalidColour(String),

    #[error("no font named `{0}`")]
    /// The font resolver has no font with this name
    FontNotFound(String),

    #[error("a page referenced by the document is missing")]
    /// The document's page order refers to a page that no longer exists
    PageMissing,
}
