//! # deckgen-pptx
//!
//! PPTX template introspection and deck assembly.
//!
//! This crate loads a presentation template, exposes its layouts and typed
//! placeholder regions, binds content groups into slides, and serializes
//! the result by *template injection*: the template's masters, layouts,
//! theme, and document properties are preserved verbatim while generated
//! slides are appended with their relationships and media parts.
//!
//! ## Example
//!
//! ```rust,ignore
//! use deckgen_core::{scan_content, RuleTable};
//! use deckgen_pptx::{DeckGenerator, DeckTemplate};
//!
//! let template = DeckTemplate::from_file("corporate.potx")?;
//! let groups = scan_content(Path::new("content"))?;
//! let generator = DeckGenerator::new(template, RuleTable::default());
//! let report = generator.generate(&groups, "deck.pptx")?;
//! ```

pub mod archive;
pub mod error;
pub mod generate;
pub mod layout;
pub mod populate;
pub mod relationships;
pub mod slide;
pub mod template;
pub mod test_utils;
pub mod writer;

// Re-exports
pub use archive::PptxArchive;
pub use error::{DeckError, Result};
pub use generate::{DeckGenerator, GenerationReport, GroupReport};
pub use layout::{Capability, LayoutResolver, Placeholder, SlideLayout};
pub use populate::{PlacementOutcome, PlacementStatus, Populator};
pub use relationships::Relationships;
pub use slide::{Frame, Shape, Slide};
pub use template::DeckTemplate;
pub use writer::DeckWriter;

/// PPTX-related constants
pub mod constants {
    /// Default slide width in EMU (914400 EMU = 1 inch, standard 10" width)
    pub const DEFAULT_SLIDE_WIDTH_EMU: i64 = 9_144_000;

    /// Default slide height in EMU (standard 7.5" height for 4:3)
    pub const DEFAULT_SLIDE_HEIGHT_EMU: i64 = 6_858_000;

    /// EMU per inch
    pub const EMU_PER_INCH: i64 = 914_400;

    /// EMU per pixel at 96 DPI
    pub const EMU_PER_PIXEL: i64 = 9_525;

    /// PresentationML namespace
    pub const NS_PRESENTATION: &str =
        "http://schemas.openxmlformats.org/presentationml/2006/main";

    /// DrawingML namespace
    pub const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    /// Relationships namespace
    pub const NS_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// Content Types namespace
    pub const NS_CONTENT_TYPES: &str =
        "http://schemas.openxmlformats.org/package/2006/content-types";

    /// Slide relationship type
    pub const REL_TYPE_SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

    /// Slide layout relationship type
    pub const REL_TYPE_SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

    /// Image relationship type
    pub const REL_TYPE_IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

    /// Video link relationship type
    pub const REL_TYPE_VIDEO: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/video";

    /// Embedded media relationship type (Office 2010 media extension)
    pub const REL_TYPE_MEDIA: &str =
        "http://schemas.microsoft.com/office/2007/relationships/media";

    /// Slide part content type
    pub const CT_SLIDE: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
}
