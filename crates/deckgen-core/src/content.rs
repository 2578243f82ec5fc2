//! Content discovery.
//!
//! A content directory holds one subdirectory per content group. Files are
//! discovered recursively within each group and classified by extension;
//! anything unrecognized is ignored. Discovery order is deterministic:
//! groups are sorted by name, and a group's items are stored grouped by
//! kind (images, then texts, then videos), each sub-sequence in path order.

use std::path::{Path, PathBuf};

use glob::glob;
use tracing::{debug, warn};

use crate::error::ContentError;

/// Recognized image extensions (lowercase)
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Recognized video extensions (lowercase)
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov"];

/// Recognized plain-text extensions (lowercase)
pub const TEXT_EXTENSIONS: &[&str] = &["txt"];

/// The kind of content a discovered file carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Image,
    Text,
    Video,
}

impl ContentKind {
    /// Classify a path by its extension, if recognized
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else if TEXT_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Text)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else {
            None
        }
    }
}

/// A single discovered content file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// What the file holds
    pub kind: ContentKind,

    /// Path on disk
    pub path: PathBuf,
}

/// One folder's worth of classified content, destined for one slide
#[derive(Debug, Clone)]
pub struct ContentGroup {
    /// Group name (the subfolder name), used as the slide title
    pub name: String,

    /// Discovered items in binding order
    pub items: Vec<ContentItem>,
}

impl ContentGroup {
    /// Count the group's items per kind
    pub fn composition(&self) -> Composition {
        let mut composition = Composition::default();
        for item in &self.items {
            match item.kind {
                ContentKind::Image => composition.images += 1,
                ContentKind::Text => composition.texts += 1,
                ContentKind::Video => composition.videos += 1,
            }
        }
        composition
    }

    /// Iterate the group's items of one kind, in stored order
    pub fn items_of(&self, kind: ContentKind) -> impl Iterator<Item = &ContentItem> {
        self.items.iter().filter(move |item| item.kind == kind)
    }

    /// Whether the group holds no recognized content at all
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Counts of each content kind within a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Composition {
    pub images: usize,
    pub texts: usize,
    pub videos: usize,
}

impl Composition {
    /// Build a composition from explicit counts
    pub fn new(images: usize, texts: usize, videos: usize) -> Self {
        Self {
            images,
            texts,
            videos,
        }
    }
}

/// Scan a content directory: one group per subdirectory, files classified
/// recursively within each. Groups are returned in name order.
pub fn scan_content(content_dir: &Path) -> Result<Vec<ContentGroup>, ContentError> {
    if !content_dir.is_dir() {
        return Err(ContentError::DirNotFound {
            path: content_dir.display().to_string(),
        });
    }

    let mut subdirs: Vec<PathBuf> = std::fs::read_dir(content_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    subdirs.sort();

    let mut groups = Vec::with_capacity(subdirs.len());
    for dir in subdirs {
        let name = match dir.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                warn!("Skipping group with non-UTF-8 name: {}", dir.display());
                continue;
            }
        };

        let group = scan_group(&dir, name)?;
        debug!(
            group = %group.name,
            items = group.items.len(),
            "discovered content group"
        );
        groups.push(group);
    }

    Ok(groups)
}

/// Scan one group directory, classifying every file under it
fn scan_group(dir: &Path, name: String) -> Result<ContentGroup, ContentError> {
    let pattern = dir.join("**/*").display().to_string();

    let mut images = Vec::new();
    let mut texts = Vec::new();
    let mut videos = Vec::new();

    // glob yields paths in alphabetical order, which keeps item order
    // stable across runs for the same tree.
    for entry in glob(&pattern)? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!(group = %name, "Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }

        match ContentKind::from_path(&path) {
            Some(ContentKind::Image) => images.push(ContentItem {
                kind: ContentKind::Image,
                path,
            }),
            Some(ContentKind::Text) => texts.push(ContentItem {
                kind: ContentKind::Text,
                path,
            }),
            Some(ContentKind::Video) => videos.push(ContentItem {
                kind: ContentKind::Video,
                path,
            }),
            None => debug!("Ignoring unrecognized file: {}", path.display()),
        }
    }

    let mut items = images;
    items.append(&mut texts);
    items.append(&mut videos);

    Ok(ContentGroup { name, items })
}

/// Read a text item's content as UTF-8
pub fn load_text(path: &Path) -> Result<String, ContentError> {
    Ok(std::fs::read_to_string(path)?)
}
