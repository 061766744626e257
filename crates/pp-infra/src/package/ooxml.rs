use std::fs::File;
use std::io::{self, BufReader, Read, Seek, Write};
use std::path::Path;

use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use super::error::PackageError;
use super::xml;

/// Relationship type URIs used to navigate a presentation package.
pub mod rel_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const THUMBNAIL: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/thumbnail";
    pub const SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
}

const DEFAULT_MAIN_DOCUMENT: &str = "ppt/presentation.xml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    /// Target as written, relative to the source part's folder.
    pub target: String,
    pub external: bool,
}

/// A read-only open presentation package.
pub struct PresentationPackage<R> {
    archive: ZipArchive<R>,
}

impl PresentationPackage<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, PackageError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> PresentationPackage<R> {
    pub fn from_reader(reader: R) -> Result<Self, PackageError> {
        Ok(Self {
            archive: ZipArchive::new(reader)?,
        })
    }

    pub fn has_part(&self, part: &str) -> bool {
        self.archive.index_for_name(part).is_some()
    }

    fn read_part_string(&mut self, part: &str) -> Result<Option<String>, PackageError> {
        let mut entry = match self.archive.by_name(part) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let mut content = String::new();
        entry.read_to_string(&mut content)?;
        Ok(Some(content))
    }

    /// Relationships of `source_part`; `""` means the package itself.
    /// A part without a relationships part has none.
    pub fn relationships(&mut self, source_part: &str) -> Result<Vec<Relationship>, PackageError> {
        let rels_part = rels_part_for(source_part);
        let Some(content) = self.read_part_string(&rels_part)? else {
            return Ok(Vec::new());
        };

        Ok(xml::relationships(&rels_part, &content)?
            .into_iter()
            .map(|(id, rel_type, target, mode)| Relationship {
                id,
                rel_type,
                target,
                external: mode.is_some_and(|m| m.eq_ignore_ascii_case("External")),
            })
            .collect())
    }

    /// Part names reachable with relationship type `rel_type` from the
    /// package or from the main document, in that order.
    pub fn parts_of_type(&mut self, rel_type: &str) -> Result<Vec<String>, PackageError> {
        let main = self.main_document_part()?;
        let mut parts = Vec::new();
        for source in ["", main.as_str()] {
            for rel in self.relationships(source)? {
                if rel.rel_type == rel_type && !rel.external {
                    let part = resolve_target(source, &rel.target);
                    if self.has_part(&part) && !parts.contains(&part) {
                        parts.push(part);
                    }
                }
            }
        }
        Ok(parts)
    }

    pub fn main_document_part(&mut self) -> Result<String, PackageError> {
        let from_rels = self
            .relationships("")?
            .into_iter()
            .find(|rel| rel.rel_type == rel_types::OFFICE_DOCUMENT && !rel.external)
            .map(|rel| resolve_target("", &rel.target));
        Ok(from_rels.unwrap_or_else(|| DEFAULT_MAIN_DOCUMENT.to_string()))
    }

    pub fn thumbnail_part(&mut self) -> Result<Option<String>, PackageError> {
        Ok(self.parts_of_type(rel_types::THUMBNAIL)?.into_iter().next())
    }

    /// Stream `part` byte-for-byte into `writer`.
    pub fn copy_part<W: Write>(&mut self, part: &str, writer: &mut W) -> Result<u64, PackageError> {
        let mut entry = match self.archive.by_name(part) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Err(PackageError::MissingPart(part.to_string())),
            Err(err) => return Err(err.into()),
        };
        Ok(io::copy(&mut entry, writer)?)
    }

    /// The first slide in presentation order (`sldIdLst`), not archive order.
    pub fn first_slide_part(&mut self) -> Result<Option<String>, PackageError> {
        let main = self.main_document_part()?;
        let Some(content) = self.read_part_string(&main)? else {
            return Ok(None);
        };
        let Some(first_id) = xml::slide_id_relationships(&main, &content)?.into_iter().next() else {
            return Ok(None);
        };

        let slide = self
            .relationships(&main)?
            .into_iter()
            .find(|rel| rel.id == first_id && !rel.external)
            .map(|rel| resolve_target(&main, &rel.target));
        Ok(slide)
    }

    pub fn slide_text_runs(&mut self, slide_part: &str) -> Result<Vec<String>, PackageError> {
        let content = self
            .read_part_string(slide_part)?
            .ok_or_else(|| PackageError::MissingPart(slide_part.to_string()))?;
        xml::text_runs(slide_part, &content)
    }

    /// First text run of the first slide that is not blank, trimmed.
    pub fn first_slide_title(&mut self) -> Result<Option<String>, PackageError> {
        let Some(slide) = self.first_slide_part()? else {
            debug!("package has no slides");
            return Ok(None);
        };
        let title = self
            .slide_text_runs(&slide)?
            .into_iter()
            .map(|run| run.trim().to_string())
            .find(|run| !run.is_empty());
        Ok(title)
    }
}

/// `ppt/presentation.xml` → `ppt/_rels/presentation.xml.rels`, `""` → `_rels/.rels`.
fn rels_part_for(source_part: &str) -> String {
    match source_part.rsplit_once('/') {
        Some((dir, name)) => format!("{dir}/_rels/{name}.rels"),
        None if source_part.is_empty() => "_rels/.rels".to_string(),
        None => format!("_rels/{source_part}.rels"),
    }
}

/// Resolve a relationship target against the folder of `source_part`.
fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return normalize(absolute.split('/'));
    }
    let base = source_part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
    normalize(base.split('/').chain(target.split('/')))
}

fn normalize<'a>(segments: impl Iterator<Item = &'a str>) -> String {
    let mut out: Vec<&str> = Vec::new();
    for segment in segments {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out.join("/")
}
