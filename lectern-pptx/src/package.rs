//! OPC packaging: collects finished parts and serializes them into a
//! ZIP container with a generated `[Content_Types].xml`.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{Cursor, Write as _};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::constants::content_type;
use crate::xml::{escape_xml, XML_DECL};

#[derive(Debug, thiserror::Error)]
pub enum PptxError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single package part, addressed by its ZIP entry name (no leading
/// slash, e.g. `ppt/slides/slide1.xml`).
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// An ordered collection of parts, serialized in insertion order with
/// the content-types manifest first.
#[derive(Debug, Default)]
pub struct PptxPackage {
    parts: Vec<Part>,
}

impl PptxPackage {
    pub fn new() -> PptxPackage {
        PptxPackage::default()
    }

    pub fn add_part(
        &mut self,
        name: impl Into<String>,
        content_type: &'static str,
        bytes: impl Into<Vec<u8>>,
    ) {
        self.parts.push(Part {
            name: name.into(),
            content_type,
            bytes: bytes.into(),
        });
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Serialize all parts into a deflate-compressed ZIP archive.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PptxError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let manifest = ContentTypesItem::from_parts(&self.parts).to_xml();
        writer.start_file("[Content_Types].xml", options)?;
        writer.write_all(manifest.as_bytes())?;

        for part in &self.parts {
            writer.start_file(part.name.as_str(), options)?;
            writer.write_all(&part.bytes)?;
        }

        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }
}

/// Builder for `[Content_Types].xml`: extension defaults where the
/// mapping is conventional, per-part overrides everywhere else.
struct ContentTypesItem {
    defaults: BTreeMap<String, &'static str>,
    overrides: BTreeMap<String, &'static str>,
}

impl ContentTypesItem {
    fn new() -> ContentTypesItem {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), content_type::OPC_RELATIONSHIPS);
        defaults.insert("xml".to_string(), content_type::XML);
        ContentTypesItem {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn from_parts(parts: &[Part]) -> ContentTypesItem {
        let mut item = ContentTypesItem::new();
        for part in parts {
            item.add(&part.name, part.content_type);
        }
        item
    }

    fn add(&mut self, name: &str, ct: &'static str) {
        let ext = name.rsplit('.').next().unwrap_or_default();
        if is_default_content_type(ext, ct) {
            self.defaults.insert(ext.to_string(), ct);
        } else {
            self.overrides.insert(format!("/{name}"), ct);
        }
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(2048);
        xml.push_str(XML_DECL);
        xml.push_str(
            "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
        );
        for (ext, ct) in &self.defaults {
            let _ = write!(
                xml,
                "<Default Extension=\"{}\" ContentType=\"{}\"/>",
                escape_xml(ext),
                escape_xml(ct)
            );
        }
        for (partname, ct) in &self.overrides {
            let _ = write!(
                xml,
                "<Override PartName=\"{}\" ContentType=\"{}\"/>",
                escape_xml(partname),
                escape_xml(ct)
            );
        }
        xml.push_str("</Types>");
        xml
    }
}

fn is_default_content_type(ext: &str, ct: &str) -> bool {
    matches!(
        (ext, ct),
        ("rels", content_type::OPC_RELATIONSHIPS)
            | ("xml", content_type::XML)
            | ("png", "image/png")
            | ("jpg", "image/jpeg")
            | ("jpeg", "image/jpeg")
            | ("gif", "image/gif")
    )
}

/// Builder for a `.rels` relationships part.
#[derive(Debug, Default)]
pub struct Relationships {
    entries: Vec<(String, &'static str, String)>,
}

impl Relationships {
    pub fn new() -> Relationships {
        Relationships::default()
    }

    pub fn add(&mut self, id: impl Into<String>, rel_type: &'static str, target: impl Into<String>) {
        self.entries.push((id.into(), rel_type, target.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(512);
        xml.push_str(XML_DECL);
        xml.push_str(
            "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
        );
        for (id, rel_type, target) in &self.entries {
            let _ = write!(
                xml,
                "<Relationship Id=\"{}\" Type=\"{rel_type}\" Target=\"{}\"/>",
                escape_xml(id),
                escape_xml(target)
            );
        }
        xml.push_str("</Relationships>");
        xml
    }
}
