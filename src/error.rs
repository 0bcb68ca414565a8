use thiserror::Error;

/// All errors that the crate can generate. Layout itself never fails; these
/// come from reading fonts, writing the finished document, or bad options.
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error("font has no unicode cmap table")]
    /// An embedded font can't map characters to glyphs
    MissingCmap,

    #[error("page {0} was referenced but is not part of the document")]
    /// A page listed in the page order could not be found in the page arena
    PageMissing(usize),

    #[error("unknown page size `{0}`")]
    /// A page size name that [crate::pagesize::by_name] does not know
    UnknownPageSize(String),

    #[error("margin of {margin} leaves no room on a {width}x{height} page")]
    /// The margins eat the whole page
    DegenerateGeometry { margin: f32, width: f32, height: f32 },
}
