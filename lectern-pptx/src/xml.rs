//! Hand-rolled DrawingML fragments for the handful of shapes a deck
//! needs: plain text boxes and one stretched picture per slide.

use std::fmt::Write as _;

pub const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

pub(crate) const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const NS_PRESENTATION: &str =
    "http://schemas.openxmlformats.org/presentationml/2006/main";

/// Escape XML special characters.
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// One paragraph of a text box. An empty `text` renders as a spacer
/// paragraph carrying only its properties.
#[derive(Debug, Clone)]
pub struct Paragraph {
    pub text: String,
    /// Font size in points.
    pub size: u32,
    pub bold: bool,
    pub center: bool,
    /// Run color as an RRGGBB hex string.
    pub color: Option<&'static str>,
    /// Space after the paragraph, in points.
    pub space_after: Option<u32>,
    pub bulleted: bool,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, size: u32) -> Paragraph {
        Paragraph {
            text: text.into(),
            size,
            bold: false,
            center: false,
            color: None,
            space_after: None,
            bulleted: false,
        }
    }

    pub fn bold(mut self) -> Paragraph {
        self.bold = true;
        self
    }

    pub fn centered(mut self) -> Paragraph {
        self.center = true;
        self
    }

    pub fn colored(mut self, rgb: &'static str) -> Paragraph {
        self.color = Some(rgb);
        self
    }

    pub fn spaced_after(mut self, points: u32) -> Paragraph {
        self.space_after = Some(points);
        self
    }

    pub fn bulleted(mut self) -> Paragraph {
        self.bulleted = true;
        self
    }
}

/// A free-floating text box with explicit geometry in EMU.
#[derive(Debug, Clone)]
pub struct TextBox {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
    pub paragraphs: Vec<Paragraph>,
}

pub fn textbox_xml(shape_id: u32, name: &str, textbox: &TextBox) -> String {
    let mut xml = String::with_capacity(512);
    let _ = write!(
        xml,
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{shape_id}\" name=\"{}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm>\
<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>\
<p:txBody><a:bodyPr wrap=\"square\"/><a:lstStyle/>",
        escape_xml(name),
        textbox.x,
        textbox.y,
        textbox.cx,
        textbox.cy,
    );
    // A text body must carry at least one paragraph to stay schema-valid.
    if textbox.paragraphs.is_empty() {
        xml.push_str("<a:p/>");
    }
    for paragraph in &textbox.paragraphs {
        xml.push_str(&paragraph_xml(paragraph));
    }
    xml.push_str("</p:txBody></p:sp>");
    xml
}

fn paragraph_xml(p: &Paragraph) -> String {
    let mut xml = String::with_capacity(128);
    if p.center {
        xml.push_str("<a:p><a:pPr algn=\"ctr\">");
    } else {
        xml.push_str("<a:p><a:pPr>");
    }
    if let Some(points) = p.space_after {
        let _ = write!(
            xml,
            "<a:spcAft><a:spcPts val=\"{}\"/></a:spcAft>",
            points * 100
        );
    }
    if p.bulleted {
        xml.push_str("<a:buChar char=\"\u{2022}\"/>");
    } else {
        xml.push_str("<a:buNone/>");
    }
    xml.push_str("</a:pPr>");

    if !p.text.is_empty() {
        let bold = if p.bold { 1 } else { 0 };
        let _ = write!(
            xml,
            "<a:r><a:rPr lang=\"en-US\" sz=\"{}\" b=\"{bold}\"",
            p.size * 100
        );
        match p.color {
            Some(rgb) => {
                let _ = write!(
                    xml,
                    "><a:solidFill><a:srgbClr val=\"{rgb}\"/></a:solidFill></a:rPr>"
                );
            }
            None => xml.push_str("/>"),
        }
        let _ = write!(xml, "<a:t>{}</a:t></a:r>", escape_xml(&p.text));
    }
    xml.push_str("</a:p>");
    xml
}

/// A picture shape stretched into the given frame, backed by the slide
/// relationship `rel_id`.
pub fn picture_xml(shape_id: u32, name: &str, rel_id: &str, x: i64, y: i64, cx: i64, cy: i64) -> String {
    format!(
        "<p:pic><p:nvPicPr><p:cNvPr id=\"{shape_id}\" name=\"{}\"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr>\
<p:blipFill><a:blip r:embed=\"{rel_id}\"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>\
<p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr></p:pic>",
        escape_xml(name),
    )
}

/// Wraps finished shapes into a complete slide part.
pub fn slide_xml(shapes: &[String]) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    let _ = write!(
        xml,
        "<p:sld xmlns:a=\"{NS_DRAWING}\" xmlns:r=\"{NS_RELATIONSHIPS}\" xmlns:p=\"{NS_PRESENTATION}\">\
<p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"
    );
    for shape in shapes {
        xml.push_str(shape);
    }
    xml.push_str(
        "</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>",
    );
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_five_specials() {
        assert_eq!(
            escape_xml(r#"<b> & "c" 'd'"#),
            "&lt;b&gt; &amp; &quot;c&quot; &apos;d&apos;"
        );
    }

    #[test]
    fn paragraph_carries_size_in_centipoints() {
        let xml = paragraph_xml(&Paragraph::new("Hello", 24).bold());
        assert!(xml.contains("sz=\"2400\""));
        assert!(xml.contains("b=\"1\""));
        assert!(xml.contains("<a:buNone/>"));
        assert!(xml.contains("<a:t>Hello</a:t>"));
    }

    #[test]
    fn bulleted_centered_paragraph_sets_properties() {
        let xml = paragraph_xml(&Paragraph::new("Point", 24).bulleted().centered().spaced_after(6));
        assert!(xml.contains("algn=\"ctr\""));
        assert!(xml.contains("<a:buChar char=\"\u{2022}\"/>"));
        assert!(xml.contains("<a:spcPts val=\"600\"/>"));
    }

    #[test]
    fn empty_paragraph_is_a_spacer() {
        let xml = paragraph_xml(&Paragraph::new("", 20).spaced_after(12));
        assert!(xml.contains("<a:spcPts val=\"1200\"/>"));
        assert!(!xml.contains("<a:r>"));
    }

    #[test]
    fn colored_run_uses_solid_fill() {
        let xml = paragraph_xml(&Paragraph::new("warning", 18).colored("C80000"));
        assert!(xml.contains("<a:solidFill><a:srgbClr val=\"C80000\"/></a:solidFill>"));
    }

    #[test]
    fn slide_wraps_shapes_into_sp_tree() {
        let textbox = TextBox {
            x: 0,
            y: 0,
            cx: 914_400,
            cy: 914_400,
            paragraphs: vec![Paragraph::new("Hi", 18)],
        };
        let slide = slide_xml(&[textbox_xml(2, "TextBox 2", &textbox)]);
        assert!(slide.starts_with(XML_DECL));
        assert!(slide.contains("<p:spTree>"));
        assert!(slide.contains("name=\"TextBox 2\""));
        assert!(slide.contains("<a:masterClrMapping/>"));
    }

    #[test]
    fn picture_embeds_relationship_id() {
        let xml = picture_xml(3, "Picture 3", "rId2", 10, 20, 30, 40);
        assert!(xml.contains("r:embed=\"rId2\""));
        assert!(xml.contains("<a:off x=\"10\" y=\"20\"/>"));
        assert!(xml.contains("<a:ext cx=\"30\" cy=\"40\"/>"));
    }
}
