//! Template loading and introspection.
//!
//! Loads a presentation template (.pptx/.potx), validates that it carries
//! a usable slide master, and extracts the master's layouts together with
//! each layout's placeholder inventory and geometry.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::archive::PptxArchive;
use crate::constants::{DEFAULT_SLIDE_HEIGHT_EMU, DEFAULT_SLIDE_WIDTH_EMU};
use crate::error::{DeckError, Result};
use crate::layout::{Capability, LayoutResolver, Placeholder, SlideLayout};

/// A loaded PPTX/POTX template
#[derive(Debug)]
pub struct DeckTemplate {
    /// Template file path (if loaded from file)
    pub path: Option<String>,

    /// Slide layouts under the active master, ascending by index
    layouts: Vec<SlideLayout>,

    /// Slide dimensions (width, height) in EMU
    pub slide_size: (i64, i64),

    /// Raw template archive (for content injection)
    archive_data: Vec<u8>,
}

impl DeckTemplate {
    /// Load a template from a file path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DeckError::template_not_found(path.display().to_string()));
        }
        let data = std::fs::read(path)?;
        let mut template = Self::from_bytes(&data)?;
        template.path = Some(path.display().to_string());
        Ok(template)
    }

    /// Load a template from bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let archive = PptxArchive::from_bytes(data)?;

        // One usable master is required; layouts hang off it.
        if !archive.contains("ppt/slideMasters/slideMaster1.xml") {
            return Err(DeckError::invalid_template("no slide master found"));
        }

        let slide_size = extract_slide_size(&archive)?;

        let mut layouts = extract_layouts(&archive)?;
        if layouts.is_empty() {
            return Err(DeckError::NoLayouts);
        }

        // Master-inherited geometry is not resolved; a placeholder without
        // explicit extent gets the full slide box.
        for layout in &mut layouts {
            for placeholder in &mut layout.placeholders {
                if placeholder.size == (0, 0) {
                    debug!(
                        layout = %layout.name,
                        index = placeholder.index,
                        "placeholder has no explicit geometry, using full slide box"
                    );
                    placeholder.position = (0, 0);
                    placeholder.size = slide_size;
                }
            }
        }

        Ok(Self {
            path: None,
            layouts,
            slide_size,
            archive_data: data.to_vec(),
        })
    }

    /// Get all layouts, ascending by index
    pub fn layouts(&self) -> &[SlideLayout] {
        &self.layouts
    }

    /// Get a layout by exact name
    pub fn layout_by_name(&self, name: &str) -> Option<&SlideLayout> {
        self.layouts.iter().find(|l| l.name == name)
    }

    /// Get the number of layouts
    pub fn layout_count(&self) -> usize {
        self.layouts.len()
    }

    /// A resolver over this template's layouts
    pub fn resolver(&self) -> LayoutResolver<'_> {
        LayoutResolver::new(&self.layouts)
    }

    /// Get the raw archive data
    pub fn archive_data(&self) -> &[u8] {
        &self.archive_data
    }
}

/// Extract slide size from presentation.xml
fn extract_slide_size(archive: &PptxArchive) -> Result<(i64, i64)> {
    let presentation_xml = match archive.get_string("ppt/presentation.xml") {
        Some(xml) => xml,
        // Bare layout archives (no presentation part) get the default size
        None => return Ok((DEFAULT_SLIDE_WIDTH_EMU, DEFAULT_SLIDE_HEIGHT_EMU)),
    };

    let mut reader = Reader::from_str(&presentation_xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut width = DEFAULT_SLIDE_WIDTH_EMU;
    let mut height = DEFAULT_SLIDE_HEIGHT_EMU;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"p:sldSz" => {
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"cx" => {
                            if let Ok(v) = std::str::from_utf8(&attr.value) {
                                width = v.parse().unwrap_or(width);
                            }
                        }
                        b"cy" => {
                            if let Ok(v) = std::str::from_utf8(&attr.value) {
                                height = v.parse().unwrap_or(height);
                            }
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(DeckError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok((width, height))
}

/// Extract layouts from the slideLayouts directory
fn extract_layouts(archive: &PptxArchive) -> Result<Vec<SlideLayout>> {
    let layout_files: Vec<String> = archive
        .file_list()
        .filter(|name| {
            name.starts_with("ppt/slideLayouts/slideLayout") && name.ends_with(".xml")
        })
        .map(|name| name.to_string())
        .collect();

    let mut layouts = Vec::new();
    for file_name in layout_files {
        // Extract index from filename (e.g., "slideLayout1.xml" -> 1)
        let index = file_name
            .trim_start_matches("ppt/slideLayouts/slideLayout")
            .trim_end_matches(".xml")
            .parse::<u32>()
            .unwrap_or(0);

        if index == 0 {
            continue;
        }

        let xml = match archive.get_string(&file_name) {
            Some(xml) => xml,
            None => continue,
        };

        layouts.push(parse_layout_xml(index, &xml)?);
    }

    // Discovery order is ascending layout index
    layouts.sort_by_key(|l| l.index);

    Ok(layouts)
}

/// Parse a single layout XML file
fn parse_layout_xml(index: u32, xml: &str) -> Result<SlideLayout> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut layout_name = format!("Layout {}", index);
    let mut placeholders = Vec::new();

    // Per-shape parse state; a placeholder is recorded when its p:sp closes
    let mut in_shape = false;
    let mut pending: Option<(u32, Capability)> = None;
    let mut position = (0i64, 0i64);
    let mut size = (0i64, 0i64);

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.name().as_ref() == b"p:cSld" =>
            {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"name" {
                        if let Ok(name) = std::str::from_utf8(&attr.value) {
                            if !name.is_empty() {
                                layout_name = name.to_string();
                            }
                        }
                    }
                }
            }
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"p:sp" => {
                in_shape = true;
                pending = None;
                position = (0, 0);
                size = (0, 0);
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"p:sp" => {
                if let Some((ph_index, capability)) = pending.take() {
                    placeholders.push(Placeholder::new(ph_index, capability, position, size));
                }
                in_shape = false;
            }
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if in_shape && e.name().as_ref() == b"p:ph" =>
            {
                let mut ph_type: Option<String> = None;
                let mut ph_index = 0u32;

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"type" => {
                            if let Ok(t) = std::str::from_utf8(&attr.value) {
                                ph_type = Some(t.to_string());
                            }
                        }
                        b"idx" => {
                            if let Ok(i) = std::str::from_utf8(&attr.value) {
                                ph_index = i.parse().unwrap_or(0);
                            }
                        }
                        _ => {}
                    }
                }

                pending = Some((ph_index, Capability::from_ooxml_type(ph_type.as_deref())));
            }
            Ok(Event::Empty(ref e)) if in_shape && e.name().as_ref() == b"a:off" => {
                position = parse_pair(e, b"x", b"y", position);
            }
            Ok(Event::Empty(ref e)) if in_shape && e.name().as_ref() == b"a:ext" => {
                size = parse_pair(e, b"cx", b"cy", size);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(DeckError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let mut layout = SlideLayout::new(index, layout_name);
    for placeholder in placeholders {
        layout.add_placeholder(placeholder);
    }

    Ok(layout)
}

/// Read a pair of integer attributes from an element
fn parse_pair(
    e: &BytesStart<'_>,
    first_key: &[u8],
    second_key: &[u8],
    current: (i64, i64),
) -> (i64, i64) {
    let (mut first, mut second) = current;
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == first_key {
            if let Ok(v) = std::str::from_utf8(&attr.value) {
                first = v.parse().unwrap_or(first);
            }
        } else if attr.key.as_ref() == second_key {
            if let Ok(v) = std::str::from_utf8(&attr.value) {
                second = v.parse().unwrap_or(second);
            }
        }
    }
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_template, template_with_layouts, TestLayout};

    #[test]
    fn test_load_standard_template() {
        let template = DeckTemplate::from_bytes(&create_test_template()).unwrap();

        assert_eq!(template.layout_count(), 6);
        assert_eq!(template.slide_size, (9_144_000, 6_858_000));

        let names: Vec<_> = template.layouts().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "layout_single_image",
                "layout_two_images",
                "layout_three_images",
                "layout_text",
                "layout_text_image",
                "layout_video",
            ]
        );
    }

    #[test]
    fn test_placeholder_inventory() {
        let template = DeckTemplate::from_bytes(&create_test_template()).unwrap();

        let single = template.layout_by_name("layout_single_image").unwrap();
        assert!(single.title_placeholder().is_some());
        assert_eq!(single.partition(Capability::Picture).len(), 1);
        assert_eq!(single.partition(Capability::Text).len(), 1);

        let pic = single.partition(Capability::Picture)[0];
        assert_eq!(pic.index, 1);
        assert!(pic.size.0 > 0 && pic.size.1 > 0);

        let video = template.layout_by_name("layout_video").unwrap();
        assert_eq!(video.partition(Capability::Media).len(), 1);

        let three = template.layout_by_name("layout_three_images").unwrap();
        let pictures = three.partition(Capability::Picture);
        assert_eq!(pictures.len(), 3);
        // Discovery order follows document order
        assert_eq!(
            pictures.iter().map(|p| p.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_missing_geometry_gets_full_slide_box() {
        let layout_xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld name="layout_inherited">
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="2" name="Picture 1"/>
          <p:cNvSpPr/>
          <p:nvPr><p:ph type="pic" idx="1"/></p:nvPr>
        </p:nvSpPr>
        <p:spPr/>
      </p:sp>
    </p:spTree>
  </p:cSld>
</p:sldLayout>"#;

        let data = template_with_layouts(&[TestLayout::raw(layout_xml)]);
        let template = DeckTemplate::from_bytes(&data).unwrap();

        let layout = template.layout_by_name("layout_inherited").unwrap();
        let pic = layout.partition(Capability::Picture)[0];
        assert_eq!(pic.position, (0, 0));
        assert_eq!(pic.size, template.slide_size);
    }

    #[test]
    fn test_non_placeholder_shapes_ignored() {
        let layout_xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld name="layout_decorated">
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
      <p:sp>
        <p:nvSpPr><p:cNvPr id="2" name="Decoration"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
        <p:spPr><a:xfrm><a:off x="1" y="1"/><a:ext cx="2" cy="2"/></a:xfrm></p:spPr>
      </p:sp>
      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="3" name="Title"/>
          <p:cNvSpPr/>
          <p:nvPr><p:ph type="title"/></p:nvPr>
        </p:nvSpPr>
        <p:spPr><a:xfrm><a:off x="100" y="200"/><a:ext cx="300" cy="400"/></a:xfrm></p:spPr>
      </p:sp>
    </p:spTree>
  </p:cSld>
</p:sldLayout>"#;

        let data = template_with_layouts(&[TestLayout::raw(layout_xml)]);
        let template = DeckTemplate::from_bytes(&data).unwrap();

        let layout = template.layout_by_name("layout_decorated").unwrap();
        assert_eq!(layout.placeholders.len(), 1);

        let title = layout.title_placeholder().unwrap();
        assert_eq!(title.position, (100, 200));
        assert_eq!(title.size, (300, 400));
    }

    #[test]
    fn test_template_without_master_rejected() {
        let mut archive = PptxArchive::new();
        archive.set_string("[Content_Types].xml", "<Types/>");
        let mut buffer = std::io::Cursor::new(Vec::new());
        archive.write_to(&mut buffer).unwrap();

        let result = DeckTemplate::from_bytes(buffer.get_ref());
        assert!(matches!(result, Err(DeckError::InvalidTemplate { .. })));
    }

    #[test]
    fn test_template_without_layouts_rejected() {
        let data = template_with_layouts(&[]);
        let result = DeckTemplate::from_bytes(&data);
        assert!(matches!(result, Err(DeckError::NoLayouts)));
    }

    #[test]
    fn test_from_file_missing() {
        let result = DeckTemplate::from_file("/nonexistent/deck.potx");
        assert!(matches!(result, Err(DeckError::TemplateNotFound { .. })));
    }

    #[test]
    fn test_from_file_roundtrip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("template.pptx");
        std::fs::write(&path, create_test_template()).unwrap();

        let template = DeckTemplate::from_file(&path).unwrap();
        assert_eq!(template.layout_count(), 6);
        assert!(template.path.as_deref().unwrap().ends_with("template.pptx"));
    }
}
