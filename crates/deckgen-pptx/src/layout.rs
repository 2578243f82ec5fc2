//! Slide layouts, placeholder inventories, and layout resolution.
//!
//! A layout is a named slide arrangement defined in the template; each
//! exposes a fixed inventory of placeholders. Placeholder order is the
//! document order of the layout XML, which is stable across runs for the
//! same template.

use tracing::warn;

use crate::error::{DeckError, Result};

/// The kind of content a placeholder accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Slide title
    Title,

    /// Body text
    Text,

    /// Picture
    Picture,

    /// Movie/audio clip
    Media,

    /// Anything deckgen never populates (footers, slide numbers, charts, ...)
    Other,
}

impl Capability {
    /// Classify an OOXML `p:ph` type attribute.
    ///
    /// A missing type attribute marks a generic content placeholder, which
    /// accepts text.
    pub fn from_ooxml_type(s: Option<&str>) -> Self {
        match s {
            None => Self::Text,
            Some("title") | Some("ctrTitle") => Self::Title,
            Some("body") | Some("subTitle") | Some("obj") => Self::Text,
            Some("pic") => Self::Picture,
            Some("media") => Self::Media,
            Some(_) => Self::Other,
        }
    }

    /// The OOXML type attribute emitted for shapes of this capability
    pub fn ooxml_type(&self) -> Option<&'static str> {
        match self {
            Self::Title => Some("title"),
            Self::Text => Some("body"),
            Self::Picture => Some("pic"),
            Self::Media => Some("media"),
            Self::Other => None,
        }
    }
}

/// A typed, positioned region within one layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Placeholder index (`idx` attribute)
    pub index: u32,

    /// What the region accepts
    pub capability: Capability,

    /// Top-left corner (x, y) in EMU
    pub position: (i64, i64),

    /// Extent (width, height) in EMU
    pub size: (i64, i64),
}

impl Placeholder {
    /// Create a new placeholder descriptor
    pub fn new(index: u32, capability: Capability, position: (i64, i64), size: (i64, i64)) -> Self {
        Self {
            index,
            capability,
            position,
            size,
        }
    }
}

/// A named slide arrangement from the template
#[derive(Debug, Clone)]
pub struct SlideLayout {
    /// Layout index (1-based, matching slideLayoutN.xml)
    pub index: u32,

    /// Layout name (from the template)
    pub name: String,

    /// Placeholders in discovery order
    pub placeholders: Vec<Placeholder>,
}

impl SlideLayout {
    /// Create a new slide layout
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            placeholders: Vec::new(),
        }
    }

    /// Add a placeholder to this layout
    pub fn add_placeholder(&mut self, placeholder: Placeholder) {
        self.placeholders.push(placeholder);
    }

    /// The first title-capable placeholder, if any
    pub fn title_placeholder(&self) -> Option<&Placeholder> {
        self.placeholders
            .iter()
            .find(|p| p.capability == Capability::Title)
    }

    /// Placeholders of one capability, preserving discovery order
    pub fn partition(&self, capability: Capability) -> Vec<&Placeholder> {
        self.placeholders
            .iter()
            .filter(|p| p.capability == capability)
            .collect()
    }

    /// Whether the layout exposes a placeholder of the given capability
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.placeholders
            .iter()
            .any(|p| p.capability == capability)
    }
}

/// Resolves rule-selected layout names against a template's collection.
///
/// A missing layout is a recoverable misconfiguration: generation proceeds
/// on the master's first layout and a warning is recorded. Only a template
/// with zero layouts is unrecoverable.
pub struct LayoutResolver<'a> {
    layouts: &'a [SlideLayout],
}

impl<'a> LayoutResolver<'a> {
    /// Create a resolver over a layout collection
    pub fn new(layouts: &'a [SlideLayout]) -> Self {
        Self { layouts }
    }

    /// Find a layout by exact name, falling back to the first layout
    pub fn resolve(&self, name: &str) -> Result<&'a SlideLayout> {
        let first = self.layouts.first().ok_or(DeckError::NoLayouts)?;

        match self.layouts.iter().find(|l| l.name == name) {
            Some(layout) => Ok(layout),
            None => {
                warn!(
                    requested = name,
                    fallback = %first.name,
                    "layout not found in template, using first layout"
                );
                Ok(first)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_layout() -> SlideLayout {
        let mut layout = SlideLayout::new(1, "layout_two_images");
        layout.add_placeholder(Placeholder::new(
            0,
            Capability::Title,
            (457_200, 274_638),
            (8_229_600, 1_143_000),
        ));
        layout.add_placeholder(Placeholder::new(
            1,
            Capability::Picture,
            (457_200, 1_600_200),
            (3_886_200, 4_525_963),
        ));
        layout.add_placeholder(Placeholder::new(
            2,
            Capability::Picture,
            (4_800_600, 1_600_200),
            (3_886_200, 4_525_963),
        ));
        layout.add_placeholder(Placeholder::new(10, Capability::Other, (0, 0), (1, 1)));
        layout
    }

    #[test]
    fn test_capability_classification() {
        assert_eq!(
            Capability::from_ooxml_type(Some("title")),
            Capability::Title
        );
        assert_eq!(
            Capability::from_ooxml_type(Some("ctrTitle")),
            Capability::Title
        );
        assert_eq!(Capability::from_ooxml_type(Some("body")), Capability::Text);
        assert_eq!(Capability::from_ooxml_type(None), Capability::Text);
        assert_eq!(
            Capability::from_ooxml_type(Some("pic")),
            Capability::Picture
        );
        assert_eq!(
            Capability::from_ooxml_type(Some("media")),
            Capability::Media
        );
        assert_eq!(
            Capability::from_ooxml_type(Some("sldNum")),
            Capability::Other
        );
    }

    #[test]
    fn test_partition_preserves_discovery_order() {
        let layout = sample_layout();

        let pictures = layout.partition(Capability::Picture);
        assert_eq!(pictures.len(), 2);
        assert_eq!(pictures[0].index, 1);
        assert_eq!(pictures[1].index, 2);

        assert!(layout.partition(Capability::Media).is_empty());
        assert!(layout.has_capability(Capability::Title));
        assert!(!layout.has_capability(Capability::Media));
    }

    #[test]
    fn test_title_placeholder() {
        let layout = sample_layout();
        assert_eq!(layout.title_placeholder().unwrap().index, 0);

        let untitled = SlideLayout::new(2, "layout_blank");
        assert!(untitled.title_placeholder().is_none());
    }

    #[test]
    fn test_resolve_exact_match() {
        let layouts = vec![
            SlideLayout::new(1, "layout_text"),
            SlideLayout::new(2, "layout_two_images"),
        ];
        let resolver = LayoutResolver::new(&layouts);

        let layout = resolver.resolve("layout_two_images").unwrap();
        assert_eq!(layout.index, 2);
    }

    #[test]
    fn test_resolve_falls_back_to_first() {
        let layouts = vec![
            SlideLayout::new(1, "layout_text"),
            SlideLayout::new(2, "layout_two_images"),
        ];
        let resolver = LayoutResolver::new(&layouts);

        let layout = resolver.resolve("layout_missing").unwrap();
        assert_eq!(layout.index, 1);
        assert_eq!(layout.name, "layout_text");
    }

    #[test]
    fn test_resolve_no_layouts() {
        let layouts: Vec<SlideLayout> = Vec::new();
        let resolver = LayoutResolver::new(&layouts);

        assert!(matches!(
            resolver.resolve("anything"),
            Err(DeckError::NoLayouts)
        ));
    }
}
