//! Assembles finished slides into a complete widescreen presentation
//! package: scaffold parts, one slide part per draft, media parts for
//! downloaded images.

use std::fmt::Write as _;

use chrono::{SecondsFormat, Utc};

use crate::constants::{content_type, emu, relationship_type, SLIDE_CX, SLIDE_CY};
use crate::package::{PptxError, PptxPackage, Relationships};
use crate::theme::THEME_XML;
use crate::xml::{
    escape_xml, picture_xml, slide_xml, textbox_xml, Paragraph, TextBox, NS_DRAWING,
    NS_PRESENTATION, NS_RELATIONSHIPS, XML_DECL,
};

/// The visual content of an image slide, as resolved by the caller.
#[derive(Debug)]
pub enum ImageBlock {
    /// Downloaded image bytes plus an optional caption rendered below.
    Picture {
        bytes: Vec<u8>,
        caption: Option<String>,
    },
    /// The download failed; the slide gets an inline error notice.
    FetchFailed { detail: String },
    /// No fetchable source was ever produced for this slide.
    MissingSource,
}

struct Media {
    bytes: Vec<u8>,
    ext: &'static str,
    content_type: &'static str,
}

struct SlideDraft {
    xml: String,
    media: Option<Media>,
}

/// Accumulates slides in presentation order, then serializes the whole
/// deck with [`DeckBuilder::finish`].
pub struct DeckBuilder {
    title: String,
    slides: Vec<SlideDraft>,
}

impl DeckBuilder {
    pub fn new(title: impl Into<String>) -> DeckBuilder {
        DeckBuilder {
            title: title.into(),
            slides: Vec::new(),
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Opening slide: large centered title with subtitle, presenter and
    /// date stacked beneath it.
    pub fn add_title_slide(&mut self, title: &str, subtitle: &str, presenter: &str, date: &str) {
        let title_box = TextBox {
            x: emu(0.5),
            y: emu(1.8),
            cx: emu(12.33),
            cy: emu(1.6),
            paragraphs: vec![Paragraph::new(title, 44).bold().centered()],
        };
        let detail_box = TextBox {
            x: emu(1.5),
            y: emu(3.6),
            cx: emu(10.33),
            cy: emu(2.6),
            paragraphs: vec![
                Paragraph::new(subtitle, 28).centered(),
                Paragraph::new("", 28).spaced_after(12),
                Paragraph::new(presenter, 20),
                Paragraph::new(date, 20),
            ],
        };
        let shapes = vec![
            textbox_xml(2, "Title", &title_box),
            textbox_xml(3, "Details", &detail_box),
        ];
        self.slides.push(SlideDraft {
            xml: slide_xml(&shapes),
            media: None,
        });
    }

    /// Text slide: heading plus one paragraph per non-empty fragment,
    /// bulleted or plain. Font size shrinks in two tiers when the body
    /// text runs long.
    pub fn add_body_slide(&mut self, heading: &str, fragments: &[String], bulleted: bool) {
        let heading_box = TextBox {
            x: emu(0.5),
            y: emu(0.3),
            cx: emu(12.33),
            cy: emu(1.1),
            paragraphs: vec![Paragraph::new(heading, 36).bold()],
        };

        let cleaned: Vec<&str> = fragments
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .collect();
        let base = if bulleted { 24 } else { 20 };
        // Measured as if joined with newlines, which is how the text
        // effectively flows on the slide.
        let total_chars = cleaned.iter().map(|f| f.chars().count()).sum::<usize>()
            + cleaned.len().saturating_sub(1);
        let size = fitted_size(base, total_chars);

        let mut paragraphs = Vec::with_capacity(cleaned.len());
        for (i, text) in cleaned.iter().enumerate() {
            let mut p = Paragraph::new(*text, size);
            if bulleted {
                p = p.bulleted();
            }
            if i + 1 < cleaned.len() {
                p = p.spaced_after(6);
            }
            paragraphs.push(p);
        }

        let body_box = TextBox {
            x: emu(0.5),
            y: emu(1.5),
            cx: emu(12.33),
            cy: emu(5.7),
            paragraphs,
        };
        let shapes = vec![
            textbox_xml(2, "Heading", &heading_box),
            textbox_xml(3, "Body", &body_box),
        ];
        self.slides.push(SlideDraft {
            xml: slide_xml(&shapes),
            media: None,
        });
    }

    /// Visual slide: centered heading, then either the image (8in wide,
    /// 16:9, horizontally centered) with an optional caption, or a
    /// visible notice explaining why there is no image.
    pub fn add_image_slide(&mut self, heading: &str, block: ImageBlock) {
        let heading_box = TextBox {
            x: emu(0.5),
            y: emu(0.2),
            cx: emu(12.33),
            cy: emu(0.8),
            paragraphs: vec![Paragraph::new(heading, 36).bold().centered()],
        };
        let mut shapes = vec![textbox_xml(2, "Heading", &heading_box)];
        let mut media = None;

        match block {
            ImageBlock::Picture { bytes, caption } => {
                let (ext, ct) = sniff_image(&bytes);
                let width = emu(8.0);
                let left = (SLIDE_CX - width) / 2;
                shapes.push(picture_xml(3, "Picture", "rId2", left, emu(1.2), width, emu(4.5)));
                if let Some(text) = caption {
                    let text = text.trim();
                    if text.starts_with("Error") {
                        // Error-marker captions come from failed content
                        // generation and are not worth showing.
                        log::warn!("suppressing error-marker caption: {text:?}");
                    } else if !text.is_empty() {
                        let caption_box = TextBox {
                            x: left,
                            y: emu(5.8),
                            cx: width,
                            cy: emu(0.5),
                            paragraphs: vec![Paragraph::new(text, 14).centered()],
                        };
                        shapes.push(textbox_xml(4, "Caption", &caption_box));
                    }
                }
                media = Some(Media {
                    bytes,
                    ext,
                    content_type: ct,
                });
            }
            ImageBlock::FetchFailed { detail } => {
                shapes.push(notice_xml(&format!("(Error adding visual: {detail})"), "FF0000"));
            }
            ImageBlock::MissingSource => {
                shapes.push(notice_xml("(Visual source missing for this slide)", "C80000"));
            }
        }

        self.slides.push(SlideDraft {
            xml: slide_xml(&shapes),
            media,
        });
    }

    /// Serialize the accumulated deck into PPTX bytes.
    pub fn finish(self) -> Result<Vec<u8>, PptxError> {
        let DeckBuilder { title, slides } = self;
        let mut pkg = PptxPackage::new();

        let mut root_rels = Relationships::new();
        root_rels.add("rId1", relationship_type::OFFICE_DOCUMENT, "ppt/presentation.xml");
        root_rels.add("rId2", relationship_type::CORE_PROPERTIES, "docProps/core.xml");
        root_rels.add("rId3", relationship_type::EXTENDED_PROPERTIES, "docProps/app.xml");
        pkg.add_part("_rels/.rels", content_type::OPC_RELATIONSHIPS, root_rels.to_xml());

        pkg.add_part(
            "ppt/presentation.xml",
            content_type::PML_PRESENTATION_MAIN,
            presentation_xml(slides.len()),
        );
        let mut pres_rels = Relationships::new();
        pres_rels.add("rId1", relationship_type::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
        for i in 0..slides.len() {
            pres_rels.add(
                format!("rId{}", i + 2),
                relationship_type::SLIDE,
                format!("slides/slide{}.xml", i + 1),
            );
        }
        pkg.add_part(
            "ppt/_rels/presentation.xml.rels",
            content_type::OPC_RELATIONSHIPS,
            pres_rels.to_xml(),
        );

        pkg.add_part(
            "ppt/slideMasters/slideMaster1.xml",
            content_type::PML_SLIDE_MASTER,
            MASTER_XML,
        );
        let mut master_rels = Relationships::new();
        master_rels.add("rId1", relationship_type::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        master_rels.add("rId2", relationship_type::THEME, "../theme/theme1.xml");
        pkg.add_part(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            content_type::OPC_RELATIONSHIPS,
            master_rels.to_xml(),
        );

        pkg.add_part(
            "ppt/slideLayouts/slideLayout1.xml",
            content_type::PML_SLIDE_LAYOUT,
            LAYOUT_XML,
        );
        let mut layout_rels = Relationships::new();
        layout_rels.add("rId1", relationship_type::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
        pkg.add_part(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            content_type::OPC_RELATIONSHIPS,
            layout_rels.to_xml(),
        );

        pkg.add_part("ppt/theme/theme1.xml", content_type::OFC_THEME, THEME_XML);

        let slide_count = slides.len();
        let mut image_index = 0usize;
        for (i, slide) in slides.into_iter().enumerate() {
            let number = i + 1;
            pkg.add_part(
                format!("ppt/slides/slide{number}.xml"),
                content_type::PML_SLIDE,
                slide.xml,
            );

            let mut slide_rels = Relationships::new();
            slide_rels.add("rId1", relationship_type::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
            let mut media_part = None;
            if let Some(media) = slide.media {
                image_index += 1;
                slide_rels.add(
                    "rId2",
                    relationship_type::IMAGE,
                    format!("../media/image{image_index}.{}", media.ext),
                );
                media_part = Some((
                    format!("ppt/media/image{image_index}.{}", media.ext),
                    media.content_type,
                    media.bytes,
                ));
            }
            pkg.add_part(
                format!("ppt/slides/_rels/slide{number}.xml.rels"),
                content_type::OPC_RELATIONSHIPS,
                slide_rels.to_xml(),
            );
            if let Some((name, ct, bytes)) = media_part {
                pkg.add_part(name, ct, bytes);
            }
        }

        pkg.add_part(
            "docProps/core.xml",
            content_type::OPC_CORE_PROPERTIES,
            core_properties_xml(&title),
        );
        pkg.add_part(
            "docProps/app.xml",
            content_type::OFC_EXTENDED_PROPERTIES,
            extended_properties_xml(slide_count),
        );

        pkg.to_bytes()
    }
}

fn notice_xml(text: &str, rgb: &'static str) -> String {
    let notice_box = TextBox {
        x: emu(2.5),
        y: emu(3.5),
        cx: emu(8.0),
        cy: emu(1.0),
        paragraphs: vec![Paragraph::new(text, 18).colored(rgb)],
    };
    textbox_xml(3, "Notice", &notice_box)
}

/// Two-tier shrink-to-fit: drop to 90% past 500 characters and to 80%
/// past 1000, clamped to readable floors.
fn fitted_size(base: u32, total_chars: usize) -> u32 {
    if total_chars > 1000 {
        ((base as f64 * 0.8) as u32).max(12)
    } else if total_chars > 500 {
        ((base as f64 * 0.9) as u32).max(14)
    } else {
        base
    }
}

/// Decide extension and content type from magic bytes. Unknown formats
/// are stored as PNG, which is what the image endpoint serves.
fn sniff_image(bytes: &[u8]) -> (&'static str, &'static str) {
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        ("png", "image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        ("jpg", "image/jpeg")
    } else if bytes.starts_with(b"GIF8") {
        ("gif", "image/gif")
    } else {
        log::warn!("unrecognized image magic bytes, storing as png");
        ("png", "image/png")
    }
}

fn presentation_xml(slide_count: usize) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    let _ = write!(
        xml,
        "<p:presentation xmlns:a=\"{NS_DRAWING}\" xmlns:r=\"{NS_RELATIONSHIPS}\" xmlns:p=\"{NS_PRESENTATION}\">\
<p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst><p:sldIdLst>"
    );
    for i in 0..slide_count {
        let _ = write!(xml, "<p:sldId id=\"{}\" r:id=\"rId{}\"/>", 256 + i, i + 2);
    }
    let _ = write!(
        xml,
        "</p:sldIdLst><p:sldSz cx=\"{SLIDE_CX}\" cy=\"{SLIDE_CY}\"/>\
<p:notesSz cx=\"6858000\" cy=\"9144000\"/></p:presentation>"
    );
    xml
}

fn core_properties_xml(title: &str) -> String {
    let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        "{XML_DECL}<cp:coreProperties \
xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
xmlns:dc=\"http://purl.org/dc/elements/1.1/\" xmlns:dcterms=\"http://purl.org/dc/terms/\" \
xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
<dc:title>{}</dc:title><dc:creator>lectern</dc:creator>\
<dcterms:created xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:created>\
<dcterms:modified xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:modified>\
</cp:coreProperties>",
        escape_xml(title),
    )
}

fn extended_properties_xml(slide_count: usize) -> String {
    format!(
        "{XML_DECL}<Properties \
xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\" \
xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\">\
<Application>lectern</Application><Slides>{slide_count}</Slides>\
<PresentationFormat>Widescreen</PresentationFormat></Properties>"
    )
}

const MASTER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#;

const LAYOUT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let mut out = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        out
    }

    fn part_names(bytes: &[u8]) -> Vec<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn deck_contains_all_scaffold_parts() {
        let mut deck = DeckBuilder::new("Photosynthesis");
        deck.add_title_slide("Photosynthesis", "An Introduction", "Presenter", "May 1, 2025");
        let bytes = deck.finish().unwrap();

        let names = part_names(&bytes);
        for expected in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/_rels/slide1.xml.rels",
            "docProps/core.xml",
            "docProps/app.xml",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
    }

    #[test]
    fn presentation_declares_widescreen_canvas() {
        let mut deck = DeckBuilder::new("t");
        deck.add_body_slide("Heading", &["one".to_string()], false);
        let bytes = deck.finish().unwrap();

        let xml = read_part(&bytes, "ppt/presentation.xml");
        assert!(xml.contains(r#"<p:sldSz cx="12192000" cy="6858000"/>"#));
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
    }

    #[test]
    fn title_slide_stacks_details_under_heading() {
        let mut deck = DeckBuilder::new("t");
        deck.add_title_slide("Big Topic", "A Lecture", "Dr. Who", "May 1, 2025");
        let bytes = deck.finish().unwrap();

        let xml = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(xml.contains("sz=\"4400\""));
        assert!(xml.contains("<a:t>Big Topic</a:t>"));
        assert!(xml.contains("<a:t>A Lecture</a:t>"));
        assert!(xml.contains("<a:t>Dr. Who</a:t>"));
        assert!(xml.contains("<a:t>May 1, 2025</a:t>"));
        assert!(xml.contains("<a:spcPts val=\"1200\"/>"));
    }

    #[test]
    fn bullet_slide_renders_bullets_at_24pt() {
        let mut deck = DeckBuilder::new("t");
        deck.add_body_slide(
            "Key Points",
            &["First".to_string(), " ".to_string(), "Second".to_string()],
            true,
        );
        let bytes = deck.finish().unwrap();

        let xml = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(xml.contains("<a:buChar char=\"\u{2022}\"/>"));
        assert!(xml.contains("sz=\"2400\""));
        assert!(xml.contains("<a:t>First</a:t>"));
        assert!(xml.contains("<a:t>Second</a:t>"));
        // Whitespace-only fragments are dropped before layout.
        assert_eq!(xml.matches("<a:buChar").count(), 2);
        // Spacing applies between items, not after the last one.
        assert_eq!(xml.matches("<a:spcPts val=\"600\"/>").count(), 1);
    }

    #[test]
    fn plain_body_uses_20pt_without_bullets() {
        let mut deck = DeckBuilder::new("t");
        deck.add_body_slide("Prose", &["A paragraph.".to_string()], false);
        let bytes = deck.finish().unwrap();

        let xml = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(xml.contains("sz=\"2000\""));
        assert!(!xml.contains("<a:buChar"));
    }

    #[test]
    fn font_shrinks_in_two_tiers() {
        assert_eq!(fitted_size(24, 400), 24);
        assert_eq!(fitted_size(24, 600), 21);
        assert_eq!(fitted_size(24, 1200), 19);
        assert_eq!(fitted_size(20, 600), 18);
        assert_eq!(fitted_size(20, 1200), 16);
        assert_eq!(fitted_size(14, 1200), 12);
    }

    #[test]
    fn image_bytes_land_in_media_with_relationship() {
        let mut deck = DeckBuilder::new("t");
        deck.add_image_slide(
            "Diagram",
            ImageBlock::Picture {
                bytes: PNG_MAGIC.to_vec(),
                caption: Some("A helpful caption".to_string()),
            },
        );
        let bytes = deck.finish().unwrap();

        let names = part_names(&bytes);
        assert!(names.iter().any(|n| n == "ppt/media/image1.png"));

        let rels = read_part(&bytes, "ppt/slides/_rels/slide1.xml.rels");
        assert!(rels.contains("Target=\"../media/image1.png\""));

        let slide = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(slide.contains("r:embed=\"rId2\""));
        assert!(slide.contains("<a:t>A helpful caption</a:t>"));
        assert!(slide.contains("sz=\"1400\""));

        let manifest = read_part(&bytes, "[Content_Types].xml");
        assert!(manifest.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
    }

    #[test]
    fn error_caption_is_suppressed() {
        let mut deck = DeckBuilder::new("t");
        deck.add_image_slide(
            "Diagram",
            ImageBlock::Picture {
                bytes: PNG_MAGIC.to_vec(),
                caption: Some("Error: Could not generate content.".to_string()),
            },
        );
        let bytes = deck.finish().unwrap();

        // Only the caption is dropped; the picture still renders.
        let slide = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(!slide.contains("Could not generate content"));
        assert!(slide.contains("r:embed=\"rId2\""));
    }

    #[test]
    fn failed_fetch_renders_red_notice() {
        let mut deck = DeckBuilder::new("t");
        deck.add_image_slide(
            "Diagram",
            ImageBlock::FetchFailed {
                detail: "request timed out".to_string(),
            },
        );
        let bytes = deck.finish().unwrap();

        let slide = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(slide.contains("<a:t>(Error adding visual: request timed out)</a:t>"));
        assert!(slide.contains("<a:srgbClr val=\"FF0000\"/>"));
        assert!(!slide.contains("r:embed"));
    }

    #[test]
    fn missing_source_renders_dark_red_notice() {
        let mut deck = DeckBuilder::new("t");
        deck.add_image_slide("Diagram", ImageBlock::MissingSource);
        let bytes = deck.finish().unwrap();

        let slide = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(slide.contains("<a:t>(Visual source missing for this slide)</a:t>"));
        assert!(slide.contains("<a:srgbClr val=\"C80000\"/>"));
    }

    #[test]
    fn jpeg_and_gif_magic_are_sniffed() {
        assert_eq!(sniff_image(&[0xFF, 0xD8, 0xFF, 0xE0]), ("jpg", "image/jpeg"));
        assert_eq!(sniff_image(b"GIF89a"), ("gif", "image/gif"));
        assert_eq!(sniff_image(b"not an image"), ("png", "image/png"));
    }

    #[test]
    fn unrecognized_image_bytes_are_stored_as_png() {
        let mut deck = DeckBuilder::new("t");
        deck.add_image_slide(
            "Diagram",
            ImageBlock::Picture {
                bytes: b"not an image".to_vec(),
                caption: None,
            },
        );
        let bytes = deck.finish().unwrap();

        let names = part_names(&bytes);
        assert!(names.iter().any(|n| n == "ppt/media/image1.png"));
        let manifest = read_part(&bytes, "[Content_Types].xml");
        assert!(manifest.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
    }

    #[test]
    fn app_part_counts_slides() {
        let mut deck = DeckBuilder::new("t");
        deck.add_body_slide("One", &["a".to_string()], false);
        deck.add_body_slide("Two", &["b".to_string()], false);
        let bytes = deck.finish().unwrap();

        let app = read_part(&bytes, "docProps/app.xml");
        assert!(app.contains("<Slides>2</Slides>"));
        let core = read_part(&bytes, "docProps/core.xml");
        assert!(core.contains("<dc:title>t</dc:title>"));
    }
}
