//! # deckgen-core
//!
//! Content discovery and layout-selection rules for deckgen.
//!
//! A content directory holds one subdirectory per *content group*; each
//! group becomes one slide in the generated deck. This crate scans and
//! classifies that content and decides, via a declarative rule table, which
//! named layout a group should be rendered with. Actual template handling
//! and slide assembly live in `deckgen-pptx`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use deckgen_core::{scan_content, RuleTable};
//!
//! let groups = scan_content(Path::new("content"))?;
//! let rules = RuleTable::default();
//! for group in &groups {
//!     let layout = rules.select_layout(&group.composition());
//!     println!("{} -> {}", group.name, layout);
//! }
//! ```

pub mod content;
pub mod error;
pub mod rules;

// Re-exports
pub use content::{
    load_text, scan_content, Composition, ContentGroup, ContentItem, ContentKind,
};
pub use error::{ContentError, RuleError};
pub use rules::RuleTable;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_not_empty() {
        assert!(!VERSION.is_empty());
    }
}
