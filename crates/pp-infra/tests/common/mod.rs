#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const PACKAGE_RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const THUMBNAIL: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/thumbnail";
const SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const PML_NAMESPACES: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#,
);

/// Minimal `.pptx` writer for fixtures.
#[derive(Default)]
pub struct PptxBuilder {
    slides: Vec<Vec<String>>,
    thumbnail: Option<Vec<u8>>,
    reverse_order: bool,
}

impl PptxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slide whose shapes contain these text runs.
    pub fn slide(mut self, runs: &[&str]) -> Self {
        self.slides.push(runs.iter().map(|r| r.to_string()).collect());
        self
    }

    pub fn thumbnail(mut self, bytes: &[u8]) -> Self {
        self.thumbnail = Some(bytes.to_vec());
        self
    }

    /// List slides in `sldIdLst` in reverse archive order.
    pub fn reverse_slide_order(mut self) -> Self {
        self.reverse_order = true;
        self
    }

    pub fn write(self, path: &Path) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let mut put = |name: &str, content: &[u8]| {
            zip.start_file(name, SimpleFileOptions::default()).unwrap();
            zip.write_all(content).unwrap();
        };

        put(
            "[Content_Types].xml",
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="jpeg" ContentType="image/jpeg"/>
</Types>"#,
        );

        let mut package_rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{PACKAGE_RELS_NS}">
  <Relationship Id="rId1" Type="{OFFICE_DOCUMENT}" Target="ppt/presentation.xml"/>"#
        );
        if self.thumbnail.is_some() {
            package_rels.push_str(&format!(
                r#"
  <Relationship Id="rId2" Type="{THUMBNAIL}" Target="docProps/thumbnail.jpeg"/>"#
            ));
        }
        package_rels.push_str("\n</Relationships>");
        put("_rels/.rels", package_rels.as_bytes());

        let mut order: Vec<usize> = (0..self.slides.len()).collect();
        if self.reverse_order {
            order.reverse();
        }
        let slide_ids: String = order
            .iter()
            .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, 10 + i))
            .collect();
        put(
            "ppt/presentation.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation {PML_NAMESPACES}>
  <p:sldIdLst>{slide_ids}</p:sldIdLst>
  <p:sldSz cx="12192000" cy="6858000"/>
</p:presentation>"#
            )
            .as_bytes(),
        );

        let slide_rels: String = (0..self.slides.len())
            .map(|i| {
                format!(
                    r#"<Relationship Id="rId{}" Type="{SLIDE}" Target="slides/slide{}.xml"/>"#,
                    10 + i,
                    i + 1
                )
            })
            .collect();
        put(
            "ppt/_rels/presentation.xml.rels",
            format!(
                concat!(
                    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                    r#"<Relationships xmlns="{}">{}</Relationships>"#,
                ),
                PACKAGE_RELS_NS,
                slide_rels
            )
            .as_bytes(),
        );

        for (i, runs) in self.slides.iter().enumerate() {
            let shapes: String = runs
                .iter()
                .map(|run| {
                    format!(
                        concat!(
                            r#"<p:sp><p:txBody><a:bodyPr/><a:p><a:r><a:rPr lang="en-US"/>"#,
                            r#"<a:t>{}</a:t></a:r></a:p></p:txBody></p:sp>"#,
                        ),
                        run
                    )
                })
                .collect();
            put(
                &format!("ppt/slides/slide{}.xml", i + 1),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld {PML_NAMESPACES}><p:cSld><p:spTree>{shapes}</p:spTree></p:cSld></p:sld>"#
                )
                .as_bytes(),
            );
        }

        if let Some(thumbnail) = &self.thumbnail {
            put("docProps/thumbnail.jpeg", thumbnail);
        }

        zip.finish().unwrap();
    }
}
