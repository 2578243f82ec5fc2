//! Placeholder population.
//!
//! Binds a content group's items to a resolved layout's placeholders and
//! reports a per-item outcome. Each content kind keeps an independent
//! cursor into its capability partition; an item-level failure never
//! aborts the group.

use std::path::Path;

use tracing::warn;

use deckgen_core::{ContentGroup, ContentItem, ContentKind};

use crate::layout::{Capability, Placeholder, SlideLayout};
use crate::slide::{Frame, Shape, Slide};

/// What happened to one content item during population
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementStatus {
    /// Bound to a placeholder
    Bound,

    /// The layout has no placeholder of the needed capability
    SkippedNoPlaceholder,

    /// Every placeholder of the capability was already used
    SkippedIndexOutOfRange,

    /// The item could not be read
    Failed { reason: String },
}

/// Per-item population record
#[derive(Debug, Clone)]
pub struct PlacementOutcome {
    pub item: ContentItem,
    pub status: PlacementStatus,
}

impl PlacementOutcome {
    /// Whether the item ended up on the slide
    pub fn is_bound(&self) -> bool {
        self.status == PlacementStatus::Bound
    }
}

/// Binds one content group into one layout
pub struct Populator<'a> {
    layout: &'a SlideLayout,
}

impl<'a> Populator<'a> {
    /// Create a populator for a resolved layout
    pub fn new(layout: &'a SlideLayout) -> Self {
        Self { layout }
    }

    /// Populate a slide from the group's items.
    ///
    /// Items are consumed in the group's stored order. The title is bound
    /// once from the group name, outside the cursor scheme.
    pub fn populate(&self, group: &ContentGroup) -> (Slide, Vec<PlacementOutcome>) {
        let mut slide = Slide::new(self.layout.index, self.layout.name.clone());

        match self.layout.title_placeholder() {
            Some(placeholder) => {
                slide.title = Some(group.name.clone());
                slide.shapes.push(Shape::Text {
                    placeholder: placeholder.clone(),
                    text: group.name.clone(),
                });
            }
            None => warn!(
                layout = %self.layout.name,
                group = %group.name,
                "no title placeholder, slide left untitled"
            ),
        }

        let pictures = self.layout.partition(Capability::Picture);
        let texts = self.layout.partition(Capability::Text);
        let media = self.layout.partition(Capability::Media);

        let mut picture_cursor = 0usize;
        let mut text_cursor = 0usize;
        let mut media_cursor = 0usize;

        let mut outcomes = Vec::with_capacity(group.items.len());
        for item in &group.items {
            let status = match item.kind {
                ContentKind::Image => {
                    self.bind_image(item, &pictures, &mut picture_cursor, &mut slide)
                }
                ContentKind::Text => self.bind_text(item, &texts, &mut text_cursor, &mut slide),
                ContentKind::Video => {
                    self.bind_video(item, &media, &mut media_cursor, &mut slide)
                }
            };
            outcomes.push(PlacementOutcome {
                item: item.clone(),
                status,
            });
        }

        // One summary warning per kind whose capability is absent entirely
        for kind in [ContentKind::Image, ContentKind::Text, ContentKind::Video] {
            let skipped = outcomes
                .iter()
                .filter(|o| {
                    o.item.kind == kind && o.status == PlacementStatus::SkippedNoPlaceholder
                })
                .count();
            if skipped > 0 {
                warn!(
                    layout = %self.layout.name,
                    group = %group.name,
                    ?kind,
                    skipped,
                    "no placeholder of needed capability, items skipped"
                );
            }
        }

        (slide, outcomes)
    }

    fn bind_image(
        &self,
        item: &ContentItem,
        partition: &[&Placeholder],
        cursor: &mut usize,
        slide: &mut Slide,
    ) -> PlacementStatus {
        if partition.is_empty() {
            return PlacementStatus::SkippedNoPlaceholder;
        }
        if *cursor >= partition.len() {
            warn!(
                path = %item.path.display(),
                available = partition.len(),
                "picture placeholders exhausted, image skipped"
            );
            return PlacementStatus::SkippedIndexOutOfRange;
        }
        let placeholder = partition[*cursor];

        let (width, height) = match image::image_dimensions(&item.path) {
            Ok(dims) => dims,
            Err(e) => {
                warn!(path = %item.path.display(), "unreadable image: {}", e);
                return PlacementStatus::Failed {
                    reason: e.to_string(),
                };
            }
        };
        let data = match std::fs::read(&item.path) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %item.path.display(), "unreadable image: {}", e);
                return PlacementStatus::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let frame = Frame::from_placeholder(placeholder).center_fit(width, height);
        slide.shapes.push(Shape::Picture {
            source: item.path.clone(),
            data,
            ext: extension_of(&item.path),
            frame,
        });
        *cursor += 1;
        PlacementStatus::Bound
    }

    fn bind_text(
        &self,
        item: &ContentItem,
        partition: &[&Placeholder],
        cursor: &mut usize,
        slide: &mut Slide,
    ) -> PlacementStatus {
        if partition.is_empty() {
            return PlacementStatus::SkippedNoPlaceholder;
        }
        if *cursor >= partition.len() {
            warn!(
                path = %item.path.display(),
                available = partition.len(),
                "text placeholders exhausted, text skipped"
            );
            return PlacementStatus::SkippedIndexOutOfRange;
        }
        let placeholder = partition[*cursor];

        let text = match deckgen_core::load_text(&item.path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %item.path.display(), "unreadable text file: {}", e);
                return PlacementStatus::Failed {
                    reason: e.to_string(),
                };
            }
        };

        slide.shapes.push(Shape::Text {
            placeholder: placeholder.clone(),
            text,
        });
        *cursor += 1;
        PlacementStatus::Bound
    }

    fn bind_video(
        &self,
        item: &ContentItem,
        partition: &[&Placeholder],
        cursor: &mut usize,
        slide: &mut Slide,
    ) -> PlacementStatus {
        if partition.is_empty() {
            return PlacementStatus::SkippedNoPlaceholder;
        }
        if *cursor >= partition.len() {
            warn!(
                path = %item.path.display(),
                available = partition.len(),
                "media placeholders exhausted, video skipped"
            );
            return PlacementStatus::SkippedIndexOutOfRange;
        }
        let placeholder = partition[*cursor];

        let data = match std::fs::read(&item.path) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %item.path.display(), "unreadable video file: {}", e);
                return PlacementStatus::Failed {
                    reason: e.to_string(),
                };
            }
        };

        // The media object occupies the placeholder's whole region
        slide.shapes.push(Shape::Media {
            source: item.path.clone(),
            data,
            ext: extension_of(&item.path),
            frame: Frame::from_placeholder(placeholder),
        });
        *cursor += 1;
        PlacementStatus::Bound
    }
}

/// Lowercased file extension, for media part naming
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}
