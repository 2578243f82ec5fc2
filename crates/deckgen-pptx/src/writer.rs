//! PPTX assembly by template injection.
//!
//! The writer preserves the template's masters, layouts, theme, and
//! document properties, drops any slides the template carried, and appends
//! the generated slides with their relationships and media parts. The
//! package is mutated in memory and serialized once.

use std::io::Cursor;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::archive::PptxArchive;
use crate::constants::{
    CT_SLIDE, NS_CONTENT_TYPES, NS_DRAWING, NS_PRESENTATION, NS_RELATIONSHIPS, REL_TYPE_IMAGE,
    REL_TYPE_MEDIA, REL_TYPE_SLIDE, REL_TYPE_SLIDE_LAYOUT, REL_TYPE_VIDEO,
};
use crate::error::{DeckError, Result};
use crate::layout::Placeholder;
use crate::relationships::Relationships;
use crate::slide::{Frame, Shape, Slide};
use crate::template::DeckTemplate;

/// Presentation writer
pub struct DeckWriter<'a> {
    /// Template whose parts are carried into the output
    template: &'a DeckTemplate,

    /// Slides to render, in final order
    slides: Vec<Slide>,
}

impl<'a> DeckWriter<'a> {
    /// Create a writer over a template
    pub fn new(template: &'a DeckTemplate) -> Self {
        Self {
            template,
            slides: Vec::new(),
        }
    }

    /// Append a slide
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Append multiple slides
    pub fn add_slides(&mut self, slides: impl IntoIterator<Item = Slide>) {
        self.slides.extend(slides);
    }

    /// Number of slides queued
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Generate the PPTX as bytes
    pub fn generate(&self) -> Result<Vec<u8>> {
        let mut archive = PptxArchive::from_bytes(self.template.archive_data())?;

        // Slides carried by the template are not part of the generation
        // contract; drop them together with their rels and notes.
        let stale: Vec<String> = archive
            .file_list()
            .filter(|name| {
                name.starts_with("ppt/slides/") || name.starts_with("ppt/notesSlides/")
            })
            .map(|name| name.to_string())
            .collect();
        for name in stale {
            archive.remove(&name);
        }

        // Media numbering continues after whatever the template embeds
        let mut media_index = next_media_index(&archive);
        let mut media_extensions: Vec<String> = Vec::new();

        for (i, slide) in self.slides.iter().enumerate() {
            self.write_slide(
                &mut archive,
                i + 1,
                slide,
                &mut media_index,
                &mut media_extensions,
            );
        }

        self.patch_content_types(&mut archive, &media_extensions)?;
        self.patch_presentation(&mut archive)?;

        let mut buffer = Cursor::new(Vec::new());
        archive.write_to(&mut buffer)?;
        Ok(buffer.into_inner())
    }

    /// Generate and write to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.generate()?;
        std::fs::write(path, &bytes).map_err(|source| DeckError::Persistence {
            path: path.display().to_string(),
            source,
        })
    }

    /// Emit one slide part, its relationships, and its media parts
    fn write_slide(
        &self,
        archive: &mut PptxArchive,
        slide_num: usize,
        slide: &Slide,
        media_index: &mut u32,
        media_extensions: &mut Vec<String>,
    ) {
        let mut rels = Relationships::new();
        rels.add(
            format!("../slideLayouts/slideLayout{}.xml", slide.layout_index),
            REL_TYPE_SLIDE_LAYOUT.to_string(),
        );

        let mut shapes = String::new();
        let mut shape_id = 2u32;

        for shape in &slide.shapes {
            match shape {
                Shape::Text { placeholder, text } => {
                    shapes.push_str(&text_shape_xml(shape_id, placeholder, text));
                }
                Shape::Picture {
                    data, ext, frame, ..
                } => {
                    let name = format!("image{}.{}", media_index, ext);
                    *media_index += 1;
                    archive.set(format!("ppt/media/{}", name), data.clone());
                    media_extensions.push(ext.clone());

                    let rel_id =
                        rels.add(format!("../media/{}", name), REL_TYPE_IMAGE.to_string());
                    shapes.push_str(&picture_shape_xml(shape_id, &rel_id, frame));
                }
                Shape::Media {
                    data, ext, frame, ..
                } => {
                    let name = format!("media{}.{}", media_index, ext);
                    *media_index += 1;
                    archive.set(format!("ppt/media/{}", name), data.clone());
                    media_extensions.push(ext.clone());

                    let link_id =
                        rels.add(format!("../media/{}", name), REL_TYPE_VIDEO.to_string());
                    let embed_id =
                        rels.add(format!("../media/{}", name), REL_TYPE_MEDIA.to_string());
                    shapes.push_str(&media_shape_xml(shape_id, &link_id, &embed_id, frame));
                }
            }
            shape_id += 1;
        }

        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
{}    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, shapes
        );

        archive.set_string(format!("ppt/slides/slide{}.xml", slide_num), xml);
        archive.set_string(
            format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
            rels.to_xml(),
        );
    }

    /// Rebuild `[Content_Types].xml`: keep the template's entries minus
    /// stale slide overrides, ensure media extension defaults, and add an
    /// override per generated slide.
    fn patch_content_types(
        &self,
        archive: &mut PptxArchive,
        media_extensions: &[String],
    ) -> Result<()> {
        let xml = archive
            .get_string("[Content_Types].xml")
            .ok_or_else(|| DeckError::invalid_template("missing [Content_Types].xml"))?;

        let mut reader = Reader::from_str(&xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        let mut defaults: Vec<(String, String)> = Vec::new();
        let mut overrides: Vec<(String, String)> = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    match e.local_name().as_ref() {
                        b"Default" => {
                            let mut extension = None;
                            let mut content_type = None;
                            for attr in e.attributes().flatten() {
                                match attr.key.as_ref() {
                                    b"Extension" => {
                                        extension =
                                            attr.unescape_value().ok().map(|s| s.to_string())
                                    }
                                    b"ContentType" => {
                                        content_type =
                                            attr.unescape_value().ok().map(|s| s.to_string())
                                    }
                                    _ => {}
                                }
                            }
                            if let (Some(extension), Some(content_type)) =
                                (extension, content_type)
                            {
                                defaults.push((extension, content_type));
                            }
                        }
                        b"Override" => {
                            let mut part_name = None;
                            let mut content_type = None;
                            for attr in e.attributes().flatten() {
                                match attr.key.as_ref() {
                                    b"PartName" => {
                                        part_name =
                                            attr.unescape_value().ok().map(|s| s.to_string())
                                    }
                                    b"ContentType" => {
                                        content_type =
                                            attr.unescape_value().ok().map(|s| s.to_string())
                                    }
                                    _ => {}
                                }
                            }
                            if let (Some(part_name), Some(content_type)) =
                                (part_name, content_type)
                            {
                                if !part_name.starts_with("/ppt/slides/")
                                    && !part_name.starts_with("/ppt/notesSlides/")
                                {
                                    overrides.push((part_name, content_type));
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(DeckError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        for ext in media_extensions {
            if defaults.iter().any(|(e, _)| e.eq_ignore_ascii_case(ext)) {
                continue;
            }
            if let Some(content_type) = content_type_for_extension(ext) {
                defaults.push((ext.clone(), content_type.to_string()));
            }
        }

        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        out.push_str(&format!(r#"<Types xmlns="{}">"#, NS_CONTENT_TYPES));
        out.push('\n');
        for (extension, content_type) in &defaults {
            out.push_str(&format!(
                "  <Default Extension=\"{}\" ContentType=\"{}\"/>\n",
                escape_xml(extension),
                escape_xml(content_type)
            ));
        }
        for (part_name, content_type) in &overrides {
            out.push_str(&format!(
                "  <Override PartName=\"{}\" ContentType=\"{}\"/>\n",
                escape_xml(part_name),
                escape_xml(content_type)
            ));
        }
        for i in 1..=self.slides.len() {
            out.push_str(&format!(
                "  <Override PartName=\"/ppt/slides/slide{}.xml\" ContentType=\"{}\"/>\n",
                i, CT_SLIDE
            ));
        }
        out.push_str("</Types>");

        archive.set_string("[Content_Types].xml", out);
        Ok(())
    }

    /// Rebuild the slide list in `ppt/presentation.xml` and its
    /// relationships, keeping every non-slide relationship intact.
    fn patch_presentation(&self, archive: &mut PptxArchive) -> Result<()> {
        let rels_xml = archive
            .get_string("ppt/_rels/presentation.xml.rels")
            .ok_or_else(|| {
                DeckError::invalid_template("missing presentation relationships")
            })?;
        let mut rels = Relationships::parse(rels_xml.as_bytes())?;
        rels.retain(|_, rel| rel.rel_type != REL_TYPE_SLIDE);

        let mut slide_rel_ids = Vec::with_capacity(self.slides.len());
        for i in 1..=self.slides.len() {
            slide_rel_ids.push(rels.add(
                format!("slides/slide{}.xml", i),
                REL_TYPE_SLIDE.to_string(),
            ));
        }
        archive.set_string("ppt/_rels/presentation.xml.rels", rels.to_xml());

        let xml = archive
            .get_string("ppt/presentation.xml")
            .ok_or_else(|| DeckError::invalid_template("missing ppt/presentation.xml"))?;

        let mut id_list = String::from("<p:sldIdLst>");
        for (i, rel_id) in slide_rel_ids.iter().enumerate() {
            id_list.push_str(&format!(r#"<p:sldId id="{}" r:id="{}"/>"#, 256 + i, rel_id));
        }
        id_list.push_str("</p:sldIdLst>");

        let patched = replace_slide_id_list(&xml, &id_list)?;
        archive.set_string("ppt/presentation.xml", patched);
        Ok(())
    }
}

/// First media number that cannot collide with template media parts
fn next_media_index(archive: &PptxArchive) -> u32 {
    let mut max = 0u32;
    for name in archive.file_list().filter(|n| n.starts_with("ppt/media/")) {
        let stem = name.trim_start_matches("ppt/media/");
        let digits: String = stem.chars().filter(|c| c.is_ascii_digit()).collect();
        if let Ok(n) = digits.parse::<u32>() {
            max = max.max(n);
        }
    }
    max + 1
}

/// Swap the `p:sldIdLst` element (present, self-closed, or absent) for a
/// rebuilt one
fn replace_slide_id_list(presentation_xml: &str, id_list: &str) -> Result<String> {
    if let Some(start) = presentation_xml.find("<p:sldIdLst") {
        let rest = &presentation_xml[start..];
        let end = if let Some(close) = rest.find("</p:sldIdLst>") {
            start + close + "</p:sldIdLst>".len()
        } else if let Some(self_close) = rest.find("/>") {
            start + self_close + 2
        } else {
            return Err(DeckError::invalid_template(
                "malformed p:sldIdLst in presentation.xml",
            ));
        };

        let mut out = String::with_capacity(presentation_xml.len() + id_list.len());
        out.push_str(&presentation_xml[..start]);
        out.push_str(id_list);
        out.push_str(&presentation_xml[end..]);
        Ok(out)
    } else if let Some(pos) = presentation_xml.find("</p:sldMasterIdLst>") {
        let insert_at = pos + "</p:sldMasterIdLst>".len();
        let mut out = String::with_capacity(presentation_xml.len() + id_list.len());
        out.push_str(&presentation_xml[..insert_at]);
        out.push_str(id_list);
        out.push_str(&presentation_xml[insert_at..]);
        Ok(out)
    } else {
        Err(DeckError::invalid_template(
            "presentation.xml has no master list",
        ))
    }
}

/// Content type for a recognized media extension
fn content_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "mp4" => Some("video/mp4"),
        "avi" => Some("video/x-msvideo"),
        "mov" => Some("video/quicktime"),
        _ => None,
    }
}

/// Generate a placeholder-bound text shape
fn text_shape_xml(id: u32, placeholder: &Placeholder, text: &str) -> String {
    let ph_type = placeholder.capability.ooxml_type().unwrap_or("body");
    let idx_attr = if placeholder.index > 0 {
        format!(" idx=\"{}\"", placeholder.index)
    } else {
        String::new()
    };

    // One paragraph per input line
    let mut paragraphs = String::new();
    if text.is_empty() {
        paragraphs.push_str("          <a:p><a:endParaRPr lang=\"en-US\"/></a:p>\n");
    } else {
        for line in text.lines() {
            paragraphs.push_str(&format!(
                "          <a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r></a:p>\n",
                escape_xml(line)
            ));
        }
    }

    format!(
        r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="{id}" name="Placeholder {id}"/>
          <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
          <p:nvPr><p:ph type="{ph_type}"{idx_attr}/></p:nvPr>
        </p:nvSpPr>
        <p:spPr/>
        <p:txBody>
          <a:bodyPr/>
          <a:lstStyle/>
{paragraphs}        </p:txBody>
      </p:sp>
"#,
        id = id,
        ph_type = ph_type,
        idx_attr = idx_attr,
        paragraphs = paragraphs
    )
}

/// Generate an absolutely positioned picture shape
fn picture_shape_xml(id: u32, rel_id: &str, frame: &Frame) -> String {
    format!(
        r#"      <p:pic>
        <p:nvPicPr>
          <p:cNvPr id="{id}" name="Picture {id}"/>
          <p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>
          <p:nvPr/>
        </p:nvPicPr>
        <p:blipFill>
          <a:blip r:embed="{rel_id}"/>
          <a:stretch><a:fillRect/></a:stretch>
        </p:blipFill>
        <p:spPr>
          <a:xfrm>
            <a:off x="{x}" y="{y}"/>
            <a:ext cx="{cx}" cy="{cy}"/>
          </a:xfrm>
          <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
        </p:spPr>
      </p:pic>
"#,
        id = id,
        rel_id = rel_id,
        x = frame.x,
        y = frame.y,
        cx = frame.width,
        cy = frame.height
    )
}

/// Generate a movie shape anchored at its placeholder's box.
///
/// No poster frame is embedded; the blip fill stays empty.
fn media_shape_xml(id: u32, link_id: &str, embed_id: &str, frame: &Frame) -> String {
    format!(
        r#"      <p:pic>
        <p:nvPicPr>
          <p:cNvPr id="{id}" name="Media {id}">
            <a:hlinkClick r:id="" action="ppaction://media"/>
          </p:cNvPr>
          <p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>
          <p:nvPr>
            <a:videoFile r:link="{link_id}"/>
            <p:extLst>
              <p:ext uri="{{DAA4B4D4-6D71-4841-9C94-3DE7FCFB9230}}">
                <p14:media xmlns:p14="http://schemas.microsoft.com/office/powerpoint/2010/main" r:embed="{embed_id}"/>
              </p:ext>
            </p:extLst>
          </p:nvPr>
        </p:nvPicPr>
        <p:blipFill>
          <a:stretch><a:fillRect/></a:stretch>
        </p:blipFill>
        <p:spPr>
          <a:xfrm>
            <a:off x="{x}" y="{y}"/>
            <a:ext cx="{cx}" cy="{cy}"/>
          </a:xfrm>
          <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
        </p:spPr>
      </p:pic>
"#,
        id = id,
        link_id = link_id,
        embed_id = embed_id,
        x = frame.x,
        y = frame.y,
        cx = frame.width,
        cy = frame.height
    )
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Capability;
    use crate::test_utils::create_test_template;
    use std::path::PathBuf;

    fn template() -> DeckTemplate {
        DeckTemplate::from_bytes(&create_test_template()).unwrap()
    }

    fn title_shape(text: &str) -> Shape {
        Shape::Text {
            placeholder: Placeholder::new(0, Capability::Title, (0, 0), (100, 100)),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_generate_empty_deck_is_valid_zip() {
        let template = template();
        let writer = DeckWriter::new(&template);

        let bytes = writer.generate().unwrap();
        let archive = PptxArchive::from_bytes(&bytes).unwrap();

        // Template structure survives injection
        assert!(archive.contains("ppt/slideMasters/slideMaster1.xml"));
        assert!(archive.contains("ppt/slideLayouts/slideLayout1.xml"));
        assert!(archive.contains("ppt/theme/theme1.xml"));
    }

    #[test]
    fn test_generate_with_slides() {
        let template = template();
        let mut writer = DeckWriter::new(&template);

        let mut slide = Slide::new(4, "layout_text");
        slide.title = Some("Overview".to_string());
        slide.shapes.push(title_shape("Overview"));
        writer.add_slide(slide);

        let mut second = Slide::new(4, "layout_text");
        second.shapes.push(title_shape("Details & More"));
        writer.add_slide(second);

        let bytes = writer.generate().unwrap();
        let archive = PptxArchive::from_bytes(&bytes).unwrap();

        let slide1 = archive.get_string("ppt/slides/slide1.xml").unwrap();
        assert!(slide1.contains("Overview"));
        assert!(slide1.contains("p:ph type=\"title\""));

        // XML escaping applied to content
        let slide2 = archive.get_string("ppt/slides/slide2.xml").unwrap();
        assert!(slide2.contains("Details &amp; More"));

        // Slide rels point at the layout
        let rels = archive
            .get_string("ppt/slides/_rels/slide1.xml.rels")
            .unwrap();
        assert!(rels.contains("../slideLayouts/slideLayout4.xml"));

        // Content types carry both slide overrides
        let content_types = archive.get_string("[Content_Types].xml").unwrap();
        assert!(content_types.contains("/ppt/slides/slide1.xml"));
        assert!(content_types.contains("/ppt/slides/slide2.xml"));

        // Presentation lists both slides after the preserved master list
        let presentation = archive.get_string("ppt/presentation.xml").unwrap();
        assert!(presentation.contains("p:sldMasterIdLst"));
        assert_eq!(presentation.matches("<p:sldId ").count(), 2);
    }

    #[test]
    fn test_picture_embedded_as_media_part() {
        let template = template();
        let mut writer = DeckWriter::new(&template);

        let mut slide = Slide::new(1, "layout_single_image");
        slide.shapes.push(Shape::Picture {
            source: PathBuf::from("photo.png"),
            data: vec![1, 2, 3, 4],
            ext: "png".to_string(),
            frame: Frame {
                x: 10,
                y: 20,
                width: 30,
                height: 40,
            },
        });
        writer.add_slide(slide);

        let bytes = writer.generate().unwrap();
        let archive = PptxArchive::from_bytes(&bytes).unwrap();

        assert_eq!(archive.get("ppt/media/image1.png"), Some(&[1u8, 2, 3, 4][..]));

        let slide_xml = archive.get_string("ppt/slides/slide1.xml").unwrap();
        assert!(slide_xml.contains("<a:off x=\"10\" y=\"20\"/>"));
        assert!(slide_xml.contains("<a:ext cx=\"30\" cy=\"40\"/>"));

        let rels = archive
            .get_string("ppt/slides/_rels/slide1.xml.rels")
            .unwrap();
        assert!(rels.contains("../media/image1.png"));

        let content_types = archive.get_string("[Content_Types].xml").unwrap();
        assert!(content_types.contains("Extension=\"png\""));
    }

    #[test]
    fn test_video_gets_link_and_embed_rels() {
        let template = template();
        let mut writer = DeckWriter::new(&template);

        let mut slide = Slide::new(6, "layout_video");
        slide.shapes.push(Shape::Media {
            source: PathBuf::from("clip.mp4"),
            data: vec![9, 9, 9],
            ext: "mp4".to_string(),
            frame: Frame {
                x: 0,
                y: 0,
                width: 100,
                height: 100,
            },
        });
        writer.add_slide(slide);

        let bytes = writer.generate().unwrap();
        let archive = PptxArchive::from_bytes(&bytes).unwrap();

        let rels = archive
            .get_string("ppt/slides/_rels/slide1.xml.rels")
            .unwrap();
        assert!(rels.contains(REL_TYPE_VIDEO));
        assert!(rels.contains(REL_TYPE_MEDIA));

        let slide_xml = archive.get_string("ppt/slides/slide1.xml").unwrap();
        assert!(slide_xml.contains("a:videoFile"));

        let content_types = archive.get_string("[Content_Types].xml").unwrap();
        assert!(content_types.contains("video/mp4"));
    }

    #[test]
    fn test_multiline_text_becomes_paragraphs() {
        let xml = text_shape_xml(
            3,
            &Placeholder::new(1, Capability::Text, (0, 0), (10, 10)),
            "first\nsecond",
        );

        assert_eq!(xml.matches("<a:p>").count(), 2);
        assert!(xml.contains("first"));
        assert!(xml.contains("second"));
        assert!(xml.contains("idx=\"1\""));
    }

    #[test]
    fn test_replace_slide_id_list_variants() {
        let expanded = r#"<p:presentation><p:sldMasterIdLst/><p:sldIdLst><p:sldId id="256" r:id="rId4"/></p:sldIdLst></p:presentation>"#;
        let out = replace_slide_id_list(expanded, "<p:sldIdLst/>").unwrap();
        assert!(!out.contains("rId4"));
        assert!(out.contains("<p:sldIdLst/>"));

        let self_closed = r#"<p:presentation><p:sldMasterIdLst/><p:sldIdLst/></p:presentation>"#;
        let out = replace_slide_id_list(self_closed, "<p:sldIdLst>X</p:sldIdLst>").unwrap();
        assert!(out.contains("<p:sldIdLst>X</p:sldIdLst>"));

        let absent =
            r#"<p:presentation><p:sldMasterIdLst></p:sldMasterIdLst></p:presentation>"#;
        let out = replace_slide_id_list(absent, "<p:sldIdLst>Y</p:sldIdLst>").unwrap();
        assert!(out.contains("</p:sldMasterIdLst><p:sldIdLst>Y</p:sldIdLst>"));

        assert!(replace_slide_id_list("<p:presentation/>", "x").is_err());
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Hello & World"), "Hello &amp; World");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_save_reports_persistence_error() {
        let template = template();
        let writer = DeckWriter::new(&template);

        let result = writer.save("/nonexistent-dir/deck.pptx");
        assert!(matches!(result, Err(DeckError::Persistence { .. })));
    }

    #[test]
    fn test_save_writes_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("deck.pptx");

        let template = template();
        let writer = DeckWriter::new(&template);
        writer.save(&path).unwrap();

        assert!(path.exists());
        let bytes = std::fs::read(&path).unwrap();
        assert!(PptxArchive::from_bytes(&bytes).is_ok());
    }
}
