//! Layout-selection rules.
//!
//! A rule table maps a content group's composition to a layout name. The
//! built-in defaults can be shallow-merged with a user override file
//! (TOML): override entries replace same-key defaults, every other default
//! is retained.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::content::Composition;
use crate::error::RuleError;

/// Built-in layout names, matching the layouts a template is expected to
/// carry
pub mod defaults {
    pub const SINGLE_IMAGE: &str = "layout_single_image";
    pub const TWO_IMAGES: &str = "layout_two_images";
    pub const THREE_IMAGES: &str = "layout_three_images";
    pub const VIDEO: &str = "layout_video";
    pub const TEXT: &str = "layout_text";
    pub const TEXT_IMAGE: &str = "layout_text_image";
}

/// Declarative mapping from content composition to layout name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    /// Exact image-count rules
    image_rules: BTreeMap<u32, String>,

    /// Layout for any group containing video
    video_rule: String,

    /// Layout for text-only groups
    text_single: String,

    /// Layout for text coexisting with images that matched no count rule
    text_with_image: String,

    /// Designated fallback when no rule applies
    default_rule: String,
}

impl Default for RuleTable {
    fn default() -> Self {
        let mut image_rules = BTreeMap::new();
        image_rules.insert(1, defaults::SINGLE_IMAGE.to_string());
        image_rules.insert(2, defaults::TWO_IMAGES.to_string());
        image_rules.insert(3, defaults::THREE_IMAGES.to_string());

        Self {
            image_rules,
            video_rule: defaults::VIDEO.to_string(),
            text_single: defaults::TEXT.to_string(),
            text_with_image: defaults::TEXT_IMAGE.to_string(),
            default_rule: defaults::TEXT.to_string(),
        }
    }
}

/// Raw override document, as parsed from TOML.
///
/// Counts arrive as strings (`"1"`, `"2"`, ...); keyword tables accept a
/// fixed keyword set (`any`; `single`, `with_image`).
#[derive(Debug, Default, Deserialize)]
struct RuleOverrides {
    #[serde(default)]
    image_rules: BTreeMap<String, String>,

    #[serde(default)]
    video_rules: BTreeMap<String, String>,

    #[serde(default)]
    text_rules: BTreeMap<String, String>,
}

impl RuleTable {
    /// Built-in defaults merged with an override file
    pub fn with_overrides_file(path: impl AsRef<Path>) -> Result<Self, RuleError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RuleError::NotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::with_overrides(&content)
    }

    /// Built-in defaults merged with an override document
    pub fn with_overrides(toml_content: &str) -> Result<Self, RuleError> {
        let overrides: RuleOverrides = toml::from_str(toml_content)?;
        let mut table = Self::default();
        table.merge(overrides)?;
        Ok(table)
    }

    fn merge(&mut self, overrides: RuleOverrides) -> Result<(), RuleError> {
        for (key, layout) in overrides.image_rules {
            let count: u32 = key
                .parse()
                .map_err(|_| RuleError::InvalidImageCount { key: key.clone() })?;
            debug!(count, layout = %layout, "image rule override");
            self.image_rules.insert(count, layout);
        }

        for (key, layout) in overrides.video_rules {
            match key.as_str() {
                "any" => self.video_rule = layout,
                _ => {
                    return Err(RuleError::UnknownKey {
                        table: "video_rules",
                        key,
                    })
                }
            }
        }

        for (key, layout) in overrides.text_rules {
            match key.as_str() {
                "single" => self.text_single = layout,
                "with_image" => self.text_with_image = layout,
                _ => {
                    return Err(RuleError::UnknownKey {
                        table: "text_rules",
                        key,
                    })
                }
            }
        }

        Ok(())
    }

    /// Select the layout for a content composition.
    ///
    /// Priority order, first match wins:
    /// 1. any video present -> the video rule, regardless of other counts
    /// 2. an exact image-count rule for the group's image count
    /// 3. text present -> `with_image` when unmatched images coexist,
    ///    `single` otherwise
    /// 4. the default layout
    pub fn select_layout(&self, composition: &Composition) -> &str {
        if composition.videos > 0 {
            return &self.video_rule;
        }

        if composition.images > 0 {
            if let Some(layout) = self.image_rules.get(&(composition.images as u32)) {
                return layout;
            }
        }

        if composition.texts > 0 {
            if composition.images > 0 {
                return &self.text_with_image;
            }
            return &self.text_single;
        }

        &self.default_rule
    }

    /// Layout for an exact image count, if a rule exists
    pub fn image_rule(&self, count: u32) -> Option<&str> {
        self.image_rules.get(&count).map(|s| s.as_str())
    }

    /// Layout for any group containing video
    pub fn video_rule(&self) -> &str {
        &self.video_rule
    }

    /// The designated fallback layout
    pub fn default_rule(&self) -> &str {
        &self.default_rule
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = RuleTable::default();

        assert_eq!(table.image_rule(1), Some(defaults::SINGLE_IMAGE));
        assert_eq!(table.image_rule(2), Some(defaults::TWO_IMAGES));
        assert_eq!(table.image_rule(3), Some(defaults::THREE_IMAGES));
        assert_eq!(table.image_rule(4), None);
        assert_eq!(table.video_rule(), defaults::VIDEO);
        assert_eq!(table.default_rule(), defaults::TEXT);
    }

    #[test]
    fn test_video_dominates_everything() {
        let table = RuleTable::default();

        for (images, texts) in [(0, 0), (1, 0), (3, 2), (7, 5)] {
            let composition = Composition::new(images, texts, 1);
            assert_eq!(table.select_layout(&composition), defaults::VIDEO);
        }
    }

    #[test]
    fn test_image_counts() {
        let table = RuleTable::default();

        assert_eq!(
            table.select_layout(&Composition::new(1, 0, 0)),
            defaults::SINGLE_IMAGE
        );
        assert_eq!(
            table.select_layout(&Composition::new(2, 0, 0)),
            defaults::TWO_IMAGES
        );
        assert_eq!(
            table.select_layout(&Composition::new(3, 0, 0)),
            defaults::THREE_IMAGES
        );
    }

    #[test]
    fn test_unmatched_image_count_falls_through() {
        let table = RuleTable::default();

        // No text: straight to the default layout
        assert_eq!(
            table.select_layout(&Composition::new(4, 0, 0)),
            defaults::TEXT
        );
        // Text coexisting with unmatched images: the with-image text rule
        assert_eq!(
            table.select_layout(&Composition::new(4, 1, 0)),
            defaults::TEXT_IMAGE
        );
    }

    #[test]
    fn test_count_rule_outranks_with_image_text() {
        let table = RuleTable::default();

        // 1 image + 1 text: the count rule wins over text_rules.with_image
        assert_eq!(
            table.select_layout(&Composition::new(1, 1, 0)),
            defaults::SINGLE_IMAGE
        );
    }

    #[test]
    fn test_text_only() {
        let table = RuleTable::default();

        assert_eq!(
            table.select_layout(&Composition::new(0, 1, 0)),
            defaults::TEXT
        );
        assert_eq!(
            table.select_layout(&Composition::new(0, 9, 0)),
            defaults::TEXT
        );
    }

    #[test]
    fn test_empty_composition_uses_default() {
        let table = RuleTable::default();
        assert_eq!(
            table.select_layout(&Composition::default()),
            defaults::TEXT
        );
    }

    #[test]
    fn test_override_merge_is_shallow() {
        let toml = r#"
[image_rules]
"2" = "layout_pair_custom"
"#;
        let table = RuleTable::with_overrides(toml).unwrap();

        // Only the overridden key changes
        assert_eq!(
            table.select_layout(&Composition::new(2, 0, 0)),
            "layout_pair_custom"
        );
        assert_eq!(
            table.select_layout(&Composition::new(1, 0, 0)),
            defaults::SINGLE_IMAGE
        );
        assert_eq!(
            table.select_layout(&Composition::new(3, 0, 0)),
            defaults::THREE_IMAGES
        );
        assert_eq!(table.video_rule(), defaults::VIDEO);
    }

    #[test]
    fn test_override_new_count_and_keywords() {
        let toml = r#"
[image_rules]
"5" = "layout_gallery"

[video_rules]
any = "layout_cinema"

[text_rules]
single = "layout_prose"
with_image = "layout_caption"
"#;
        let table = RuleTable::with_overrides(toml).unwrap();

        assert_eq!(
            table.select_layout(&Composition::new(5, 0, 0)),
            "layout_gallery"
        );
        assert_eq!(
            table.select_layout(&Composition::new(0, 0, 1)),
            "layout_cinema"
        );
        assert_eq!(
            table.select_layout(&Composition::new(0, 1, 0)),
            "layout_prose"
        );
        assert_eq!(
            table.select_layout(&Composition::new(4, 1, 0)),
            "layout_caption"
        );
    }

    #[test]
    fn test_invalid_image_count_key() {
        let toml = r#"
[image_rules]
"two" = "layout_pair"
"#;
        let result = RuleTable::with_overrides(toml);
        assert!(matches!(result, Err(RuleError::InvalidImageCount { .. })));
    }

    #[test]
    fn test_unknown_keyword_rejected() {
        let toml = r#"
[text_rules]
plural = "layout_text"
"#;
        let result = RuleTable::with_overrides(toml);
        assert!(matches!(
            result,
            Err(RuleError::UnknownKey {
                table: "text_rules",
                ..
            })
        ));

        let toml = r#"
[video_rules]
one = "layout_video"
"#;
        assert!(RuleTable::with_overrides(toml).is_err());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = RuleTable::with_overrides("image_rules = [not toml");
        assert!(matches!(result, Err(RuleError::Toml(_))));
    }

    #[test]
    fn test_overrides_file_missing() {
        let result = RuleTable::with_overrides_file("/nonexistent/rules.toml");
        assert!(matches!(result, Err(RuleError::NotFound { .. })));
    }

    #[test]
    fn test_overrides_file_roundtrip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("rules.toml");
        std::fs::write(&path, "[image_rules]\n\"2\" = \"layout_duo\"\n").unwrap();

        let table = RuleTable::with_overrides_file(&path).unwrap();
        assert_eq!(table.image_rule(2), Some("layout_duo"));
    }
}
