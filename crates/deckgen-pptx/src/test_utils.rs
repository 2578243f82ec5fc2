//! Shared test utilities for deckgen-pptx
//!
//! Builds small but structurally complete presentation templates in
//! memory, plus media fixtures for population tests.

use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

use crate::constants::{NS_DRAWING, NS_PRESENTATION, NS_RELATIONSHIPS};

/// One layout inside a test template
pub struct TestLayout {
    xml: String,
}

impl TestLayout {
    /// Use a raw slideLayout XML document verbatim
    pub fn raw(xml: &str) -> Self {
        Self {
            xml: xml.to_string(),
        }
    }

    /// Build a layout from a name and placeholder specs
    /// `(type attribute, idx, position, size)`; the idx attribute is only
    /// emitted when non-zero, matching how templates mark title shapes.
    pub fn named(
        name: &str,
        placeholders: &[(Option<&str>, u32, (i64, i64), (i64, i64))],
    ) -> Self {
        let mut shapes = String::new();
        for (i, (ph_type, idx, position, size)) in placeholders.iter().enumerate() {
            let type_attr = match ph_type {
                Some(t) => format!(" type=\"{}\"", t),
                None => String::new(),
            };
            let idx_attr = if *idx > 0 {
                format!(" idx=\"{}\"", idx)
            } else {
                String::new()
            };
            shapes.push_str(&format!(
                r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="{id}" name="Placeholder {id}"/>
          <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
          <p:nvPr><p:ph{type_attr}{idx_attr}/></p:nvPr>
        </p:nvSpPr>
        <p:spPr>
          <a:xfrm>
            <a:off x="{x}" y="{y}"/>
            <a:ext cx="{cx}" cy="{cy}"/>
          </a:xfrm>
        </p:spPr>
        <p:txBody>
          <a:bodyPr/>
          <a:lstStyle/>
          <a:p><a:endParaRPr lang="en-US"/></a:p>
        </p:txBody>
      </p:sp>
"#,
                id = i + 2,
                type_attr = type_attr,
                idx_attr = idx_attr,
                x = position.0,
                y = position.1,
                cx = size.0,
                cy = size.1,
            ));
        }

        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld name="{}">
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
</p:sldLayout>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, name, shapes
        );

        Self { xml }
    }
}

/// Create an in-memory template carrying the given layouts
pub fn template_with_layouts(layouts: &[TestLayout]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    // [Content_Types].xml
    let mut content_types = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="{}">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
  <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
  <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
"#,
        crate::constants::NS_CONTENT_TYPES
    );
    for i in 1..=layouts.len() {
        content_types.push_str(&format!(
            "  <Override PartName=\"/ppt/slideLayouts/slideLayout{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\n",
            i
        ));
    }
    content_types.push_str("</Types>");

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(content_types.as_bytes()).unwrap();

    // _rels/.rels
    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#,
            "http://schemas.openxmlformats.org/package/2006/relationships"
        )
        .as_bytes(),
    )
    .unwrap();

    // ppt/presentation.xml
    zip.start_file("ppt/presentation.xml", options).unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:sldMasterIdLst>
    <p:sldMasterId id="2147483648" r:id="rId1"/>
  </p:sldMasterIdLst>
  <p:sldIdLst/>
  <p:sldSz cx="9144000" cy="6858000"/>
  <p:notesSz cx="6858000" cy="9144000"/>
</p:presentation>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        )
        .as_bytes(),
    )
    .unwrap();

    // ppt/_rels/presentation.xml.rels
    zip.start_file("ppt/_rels/presentation.xml.rels", options)
        .unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
</Relationships>"#,
            "http://schemas.openxmlformats.org/package/2006/relationships"
        )
        .as_bytes(),
    )
    .unwrap();

    // ppt/slideMasters/slideMaster1.xml
    let mut layout_ids = String::new();
    for i in 1..=layouts.len() {
        layout_ids.push_str(&format!(
            "    <p:sldLayoutId id=\"{}\" r:id=\"rId{}\"/>\n",
            2147483648u64 + i as u64,
            i
        ));
    }
    zip.start_file("ppt/slideMasters/slideMaster1.xml", options)
        .unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
  <p:sldLayoutIdLst>
{}  </p:sldLayoutIdLst>
</p:sldMaster>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, layout_ids
        )
        .as_bytes(),
    )
    .unwrap();

    // ppt/slideMasters/_rels/slideMaster1.xml.rels
    let mut master_rels = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
"#,
        "http://schemas.openxmlformats.org/package/2006/relationships"
    );
    for i in 1..=layouts.len() {
        master_rels.push_str(&format!(
            "  <Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout{}.xml\"/>\n",
            i, i
        ));
    }
    master_rels.push_str(&format!(
        "  <Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme\" Target=\"../theme/theme1.xml\"/>\n",
        layouts.len() + 1
    ));
    master_rels.push_str("</Relationships>");
    zip.start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", options)
        .unwrap();
    zip.write_all(master_rels.as_bytes()).unwrap();

    // ppt/theme/theme1.xml
    zip.start_file("ppt/theme/theme1.xml", options).unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="{}" name="deckgen test"/>"#,
            NS_DRAWING
        )
        .as_bytes(),
    )
    .unwrap();

    // Layouts and their rels
    for (i, layout) in layouts.iter().enumerate() {
        let index = i + 1;
        zip.start_file(format!("ppt/slideLayouts/slideLayout{}.xml", index), options)
            .unwrap();
        zip.write_all(layout.xml.as_bytes()).unwrap();

        zip.start_file(
            format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", index),
            options,
        )
        .unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#,
                "http://schemas.openxmlformats.org/package/2006/relationships"
            )
            .as_bytes(),
        )
        .unwrap();
    }

    zip.finish().unwrap();
    buffer.into_inner()
}

/// Create the standard six-layout test template matching the default rule
/// table's layout names
pub fn create_test_template() -> Vec<u8> {
    template_with_layouts(&[
        TestLayout::named(
            "layout_single_image",
            &[
                (Some("title"), 0, (457_200, 274_638), (8_229_600, 1_143_000)),
                (Some("pic"), 1, (1_143_000, 1_600_200), (6_858_000, 4_114_800)),
                (Some("body"), 2, (457_200, 5_943_600), (8_229_600, 685_800)),
            ],
        ),
        TestLayout::named(
            "layout_two_images",
            &[
                (Some("title"), 0, (457_200, 274_638), (8_229_600, 1_143_000)),
                (Some("pic"), 1, (457_200, 1_600_200), (3_886_200, 4_525_963)),
                (Some("pic"), 2, (4_800_600, 1_600_200), (3_886_200, 4_525_963)),
            ],
        ),
        TestLayout::named(
            "layout_three_images",
            &[
                (Some("title"), 0, (457_200, 274_638), (8_229_600, 1_143_000)),
                (Some("pic"), 1, (457_200, 1_600_200), (2_590_800, 4_525_963)),
                (Some("pic"), 2, (3_276_600, 1_600_200), (2_590_800, 4_525_963)),
                (Some("pic"), 3, (6_096_000, 1_600_200), (2_590_800, 4_525_963)),
            ],
        ),
        TestLayout::named(
            "layout_text",
            &[
                (Some("title"), 0, (457_200, 274_638), (8_229_600, 1_143_000)),
                (Some("body"), 1, (457_200, 1_600_200), (8_229_600, 4_525_963)),
            ],
        ),
        TestLayout::named(
            "layout_text_image",
            &[
                (Some("title"), 0, (457_200, 274_638), (8_229_600, 1_143_000)),
                (Some("body"), 1, (457_200, 1_600_200), (3_886_200, 4_525_963)),
                (Some("pic"), 2, (4_800_600, 1_600_200), (3_886_200, 4_525_963)),
            ],
        ),
        TestLayout::named(
            "layout_video",
            &[
                (Some("title"), 0, (457_200, 274_638), (8_229_600, 1_143_000)),
                (Some("media"), 1, (1_143_000, 1_600_200), (6_858_000, 4_525_963)),
            ],
        ),
    ])
}

/// Write a small solid-color PNG to disk
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([40, 90, 160, 255]));
    img.save(path).unwrap();
}
