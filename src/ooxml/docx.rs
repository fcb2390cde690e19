//! DOCX package writer.
//!
//! A small body-building API in document order: headings, paragraphs,
//! bullets, tables, inline pictures, and explicit page breaks. `build`
//! assembles the full package with a styles part (Arial throughout), a
//! bullet numbering definition, and one media part per picture.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;

use super::{emu, escape_xml, image_content_type, CREATED_AT};

const DEFAULT_SIZE_HALF_POINTS: u32 = 22;

/// One formatted run.
#[derive(Debug, Clone)]
pub(crate) struct DocxRun {
    pub text: String,
    pub bold: bool,
    pub size_half_points: u32,
}

impl DocxRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            size_half_points: DEFAULT_SIZE_HALF_POINTS,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            size_half_points: DEFAULT_SIZE_HALF_POINTS,
        }
    }

    pub fn sized(text: impl Into<String>, size_half_points: u32, bold: bool) -> Self {
        Self {
            text: text.into(),
            bold,
            size_half_points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn jc_xml(self) -> &'static str {
        match self {
            Align::Left => "",
            Align::Center => r#"<w:jc w:val="center"/>"#,
            Align::Right => r#"<w:jc w:val="right"/>"#,
        }
    }
}

#[derive(Debug, Clone)]
struct ParagraphNode {
    runs: Vec<DocxRun>,
    style: Option<String>,
    align: Align,
    bullet: bool,
}

#[derive(Debug, Clone)]
struct PictureNode {
    media_index: usize,
    width_in: f32,
    height_in: f32,
    align: Align,
}

#[derive(Debug, Clone)]
enum Node {
    Paragraph(ParagraphNode),
    Picture(PictureNode),
    Table { rows: Vec<Vec<String>>, header_bold: bool },
    PageBreak,
}

#[derive(Debug, Clone)]
struct MediaImage {
    part_name: String,
    extension: String,
    data: Vec<u8>,
}

/// Accumulates document content, then serializes the package.
#[derive(Debug, Default)]
pub(crate) struct DocxBuilder {
    nodes: Vec<Node>,
    media: Vec<MediaImage>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&mut self, text: &str, level: u8) {
        let level = level.clamp(1, 3);
        self.nodes.push(Node::Paragraph(ParagraphNode {
            runs: vec![DocxRun::plain(text)],
            style: Some(format!("Heading{level}")),
            align: Align::Left,
            bullet: false,
        }));
    }

    pub fn paragraph(&mut self, text: &str) {
        self.runs_paragraph(vec![DocxRun::plain(text)]);
    }

    pub fn runs_paragraph(&mut self, runs: Vec<DocxRun>) {
        self.nodes.push(Node::Paragraph(ParagraphNode {
            runs,
            style: None,
            align: Align::Left,
            bullet: false,
        }));
    }

    pub fn centered(&mut self, runs: Vec<DocxRun>) {
        self.nodes.push(Node::Paragraph(ParagraphNode {
            runs,
            style: None,
            align: Align::Center,
            bullet: false,
        }));
    }

    /// A bold label followed by a plain value on one line.
    pub fn labeled(&mut self, label: &str, value: &str) {
        let mut runs = vec![DocxRun::bold(label)];
        if !value.is_empty() {
            runs.push(DocxRun::plain(format!(" {value}")));
        }
        self.runs_paragraph(runs);
    }

    pub fn bullet(&mut self, text: &str) {
        self.nodes.push(Node::Paragraph(ParagraphNode {
            runs: vec![DocxRun::plain(text)],
            style: None,
            align: Align::Left,
            bullet: true,
        }));
    }

    pub fn empty_line(&mut self) {
        self.runs_paragraph(Vec::new());
    }

    pub fn page_break(&mut self) {
        self.nodes.push(Node::PageBreak);
    }

    pub fn table(&mut self, rows: Vec<Vec<String>>, header_bold: bool) {
        self.nodes.push(Node::Table { rows, header_bold });
    }

    pub fn picture(&mut self, extension: &str, data: Vec<u8>, width_in: f32, height_in: f32) {
        self.picture_aligned(extension, data, width_in, height_in, Align::Left);
    }

    pub fn picture_centered(&mut self, extension: &str, data: Vec<u8>, width_in: f32, height_in: f32) {
        self.picture_aligned(extension, data, width_in, height_in, Align::Center);
    }

    pub fn picture_right(&mut self, extension: &str, data: Vec<u8>, width_in: f32, height_in: f32) {
        self.picture_aligned(extension, data, width_in, height_in, Align::Right);
    }

    fn picture_aligned(
        &mut self,
        extension: &str,
        data: Vec<u8>,
        width_in: f32,
        height_in: f32,
        align: Align,
    ) {
        let media_index = self.media.len();
        self.media.push(MediaImage {
            part_name: format!("image{}.{}", media_index + 1, extension),
            extension: extension.to_string(),
            data,
        });
        self.nodes.push(Node::Picture(PictureNode {
            media_index,
            width_in,
            height_in,
            align,
        }));
    }

    /// Serialize the accumulated document to DOCX bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(&mut buffer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", options.clone())?;
        zip.write_all(self.content_types_xml().as_bytes())?;

        zip.start_file("_rels/.rels", options.clone())?;
        zip.write_all(PACKAGE_RELS.as_bytes())?;

        zip.start_file("docProps/core.xml", options.clone())?;
        zip.write_all(core_props_xml().as_bytes())?;

        zip.start_file("docProps/app.xml", options.clone())?;
        zip.write_all(APP_PROPS.as_bytes())?;

        zip.start_file("word/document.xml", options.clone())?;
        zip.write_all(self.document_xml().as_bytes())?;

        zip.start_file("word/_rels/document.xml.rels", options.clone())?;
        zip.write_all(self.document_rels_xml().as_bytes())?;

        zip.start_file("word/styles.xml", options.clone())?;
        zip.write_all(STYLES_XML.as_bytes())?;

        zip.start_file("word/numbering.xml", options.clone())?;
        zip.write_all(NUMBERING_XML.as_bytes())?;

        for image in &self.media {
            zip.start_file(format!("word/media/{}", image.part_name), options.clone())?;
            zip.write_all(&image.data)?;
        }

        zip.finish()?;
        Ok(buffer.into_inner())
    }

    fn content_types_xml(&self) -> String {
        let mut defaults = String::from(
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>"#,
        );
        let mut seen: Vec<&str> = Vec::new();
        for image in &self.media {
            if !seen.contains(&image.extension.as_str()) {
                seen.push(&image.extension);
                defaults.push_str(&format!(
                    r#"<Default Extension="{}" ContentType="{}"/>"#,
                    image.extension,
                    image_content_type(&image.extension)
                ));
            }
        }
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">{defaults}<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/></Types>"#
        )
    }

    fn document_rels_xml(&self) -> String {
        let mut rels = String::from(
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>"#,
        );
        for (i, image) in self.media.iter().enumerate() {
            rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/{}"/>"#,
                i + 3,
                image.part_name
            ));
        }
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
        )
    }

    fn document_xml(&self) -> String {
        let mut body = String::new();
        for node in &self.nodes {
            match node {
                Node::Paragraph(p) => body.push_str(&paragraph_xml(p)),
                Node::Picture(p) => body.push_str(&picture_paragraph_xml(p)),
                Node::Table { rows, header_bold } => body.push_str(&table_xml(rows, *header_bold)),
                Node::PageBreak => {
                    body.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#)
                }
            }
        }
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture"><w:body>{body}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440"/></w:sectPr></w:body></w:document>"#
        )
    }
}

fn run_xml(run: &DocxRun) -> String {
    let bold = if run.bold { "<w:b/>" } else { "" };
    format!(
        r#"<w:r><w:rPr>{bold}<w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr><w:t xml:space="preserve">{text}</w:t></w:r>"#,
        size = run.size_half_points,
        text = escape_xml(&run.text),
    )
}

fn paragraph_xml(p: &ParagraphNode) -> String {
    let mut props = String::new();
    if let Some(ref style) = p.style {
        props.push_str(&format!(r#"<w:pStyle w:val="{style}"/>"#));
    }
    if p.bullet {
        props.push_str(r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr>"#);
    }
    props.push_str(p.align.jc_xml());
    let ppr = if props.is_empty() {
        String::new()
    } else {
        format!("<w:pPr>{props}</w:pPr>")
    };
    let runs: String = p.runs.iter().map(run_xml).collect();
    format!("<w:p>{ppr}{runs}</w:p>")
}

fn picture_paragraph_xml(p: &PictureNode) -> String {
    let rel_id = format!("rId{}", p.media_index + 3);
    let doc_pr_id = p.media_index + 10;
    let cx = emu(p.width_in);
    let cy = emu(p.height_in);
    let jc_inner = p.align.jc_xml();
    let jc = if jc_inner.is_empty() {
        String::new()
    } else {
        format!("<w:pPr>{jc_inner}</w:pPr>")
    };
    format!(
        r#"<w:p>{jc}<w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="{doc_pr_id}" name="Afbeelding {doc_pr_id}"/><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic><pic:nvPicPr><pic:cNvPr id="{doc_pr_id}" name="Afbeelding {doc_pr_id}"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill><pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#
    )
}

fn table_xml(rows: &[Vec<String>], header_bold: bool) -> String {
    let column_count = rows.iter().map(Vec::len).max().unwrap_or(1);
    let grid: String = (0..column_count)
        .map(|_| r#"<w:gridCol w:w="1500"/>"#)
        .collect();

    let mut body = String::new();
    for (row_idx, row) in rows.iter().enumerate() {
        body.push_str("<w:tr>");
        for col in 0..column_count {
            let text = row.get(col).map(String::as_str).unwrap_or("");
            let run = DocxRun {
                text: text.to_string(),
                bold: header_bold && row_idx == 0,
                size_half_points: DEFAULT_SIZE_HALF_POINTS,
            };
            body.push_str(&format!(
                r#"<w:tc><w:tcPr><w:tcW w:w="1500" w:type="dxa"/></w:tcPr><w:p>{}</w:p></w:tc>"#,
                run_xml(&run)
            ));
        }
        body.push_str("</w:tr>");
    }

    format!(
        r#"<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/><w:tblW w:w="0" w:type="auto"/><w:tblBorders><w:top w:val="single" w:sz="4" w:color="auto"/><w:left w:val="single" w:sz="4" w:color="auto"/><w:bottom w:val="single" w:sz="4" w:color="auto"/><w:right w:val="single" w:sz="4" w:color="auto"/><w:insideH w:val="single" w:sz="4" w:color="auto"/><w:insideV w:val="single" w:sz="4" w:color="auto"/></w:tblBorders></w:tblPr><w:tblGrid>{grid}</w:tblGrid>{body}</w:tbl>"#
    )
}

fn core_props_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:creator>undocx</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{CREATED_AT}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{CREATED_AT}</dcterms:modified></cp:coreProperties>"#
    )
}

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/></Relationships>"#;

const APP_PROPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><Application>undocx</Application></Properties>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:cs="Arial"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/><w:szCs w:val="32"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:before="200" w:after="100"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:sz w:val="28"/><w:szCs w:val="28"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading3"><w:name w:val="heading 3"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:before="160" w:after="80"/><w:outlineLvl w:val="2"/></w:pPr><w:rPr><w:b/><w:sz w:val="26"/><w:szCs w:val="26"/></w:rPr></w:style><w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/></w:style></w:styles>"#;

const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="&#8226;"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_entry(data: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_minimal_document_parts() {
        let mut builder = DocxBuilder::new();
        builder.paragraph("Hallo");
        let bytes = builder.build().unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(&bytes)).unwrap();
        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/styles.xml",
            "word/numbering.xml",
            "word/_rels/document.xml.rels",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing part {}", name);
        }
    }

    #[test]
    fn test_heading_and_labeled_runs() {
        let mut builder = DocxBuilder::new();
        builder.heading("Kabels", 1);
        builder.labeled("Duur van de opdracht:", "2 uur");
        builder.labeled("Naam:", "");
        let bytes = builder.build().unwrap();
        let doc = read_entry(&bytes, "word/document.xml");
        assert!(doc.contains(r#"<w:pStyle w:val="Heading1"/>"#));
        assert!(doc.contains("Duur van de opdracht:"));
        assert!(doc.contains("<w:b/>"));
        // Empty value keeps the label but adds no value run
        assert!(doc.contains("Naam:"));
        assert!(!doc.contains("Naam: </w:t>"));
    }

    #[test]
    fn test_bullet_uses_numbering() {
        let mut builder = DocxBuilder::new();
        builder.bullet("punt");
        let bytes = builder.build().unwrap();
        let doc = read_entry(&bytes, "word/document.xml");
        assert!(doc.contains(r#"<w:numId w:val="1"/>"#));
    }

    #[test]
    fn test_table_pads_short_rows() {
        let mut builder = DocxBuilder::new();
        builder.table(
            vec![
                vec!["A".into(), "B".into(), "C".into()],
                vec!["1".into()],
            ],
            true,
        );
        let bytes = builder.build().unwrap();
        let doc = read_entry(&bytes, "word/document.xml");
        assert_eq!(doc.matches("<w:tc>").count(), 6);
        assert!(doc.contains(r#"<w:tblStyle w:val="TableGrid"/>"#));
    }

    #[test]
    fn test_picture_adds_media_and_rel() {
        let mut builder = DocxBuilder::new();
        builder.picture("png", vec![9, 9, 9], 4.0, 3.0);
        let bytes = builder.build().unwrap();
        let rels = read_entry(&bytes, "word/_rels/document.xml.rels");
        assert!(rels.contains(r#"Target="media/image1.png""#));
        let doc = read_entry(&bytes, "word/document.xml");
        assert!(doc.contains(r#"r:embed="rId3""#));
        let mut archive = zip::ZipArchive::new(Cursor::new(&bytes)).unwrap();
        assert!(archive.by_name("word/media/image1.png").is_ok());
    }

    #[test]
    fn test_page_break() {
        let mut builder = DocxBuilder::new();
        builder.paragraph("een");
        builder.page_break();
        builder.paragraph("twee");
        let bytes = builder.build().unwrap();
        let doc = read_entry(&bytes, "word/document.xml");
        assert!(doc.contains(r#"<w:br w:type="page"/>"#));
    }

    #[test]
    fn test_escaping_in_runs() {
        let mut builder = DocxBuilder::new();
        builder.paragraph("a < b & c");
        let bytes = builder.build().unwrap();
        let doc = read_entry(&bytes, "word/document.xml");
        assert!(doc.contains("a &lt; b &amp; c"));
    }
}
