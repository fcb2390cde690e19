//! OOXML walking internals: styles, relationships, and paragraph extraction.

use std::collections::HashMap;
use std::io::{Read, Seek};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::images::EmbeddedImage;
use crate::model::{SourceParagraph, TextRun};

pub(crate) const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";
const RELS_PART: &str = "word/_rels/document.xml.rels";
const IMAGE_REL_TYPE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// One entry of the document relationships part, in file order.
#[derive(Debug, Clone)]
pub(crate) struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
}

/// Read one package part as a UTF-8 string.
pub(crate) fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut file = archive
        .by_name(name)
        .map_err(|_| Error::MissingPart(name.to_string()))?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(content)
}

fn read_part_bytes<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut file = archive
        .by_name(name)
        .map_err(|_| Error::MissingPart(name.to_string()))?;
    let mut content = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut content)?;
    Ok(content)
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Map style ids to their display names ("Heading1" → "heading 1"). Names
/// are what the classifier matches on; a missing styles part is tolerated.
pub(crate) fn parse_styles<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<HashMap<String, String>> {
    let mut styles = HashMap::new();
    let Ok(xml) = read_part(archive, STYLES_PART) else {
        return Ok(styles);
    };

    let mut reader = Reader::from_str(&xml);
    let mut current_id: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:style" => {
                current_id = attr_value(&e, b"w:styleId");
            }
            Event::End(e) if e.name().as_ref() == b"w:style" => {
                current_id = None;
            }
            Event::Empty(e) if e.name().as_ref() == b"w:name" => {
                if let (Some(id), Some(name)) = (current_id.as_ref(), attr_value(&e, b"w:val")) {
                    styles.insert(id.clone(), name);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(styles)
}

/// Relationships of the main document part, preserving file order.
pub(crate) fn parse_relationships<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<Vec<Relationship>> {
    let mut rels = Vec::new();
    let Ok(xml) = read_part(archive, RELS_PART) else {
        return Ok(rels);
    };

    let mut reader = Reader::from_str(&xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(rel_type), Some(target)) = (
                    attr_value(&e, b"Id"),
                    attr_value(&e, b"Type"),
                    attr_value(&e, b"Target"),
                ) {
                    rels.push(Relationship { id, rel_type, target });
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(rels)
}

/// Load all image parts referenced from the document, in relationship-file
/// order. Targets are relative to the word/ directory.
pub(crate) fn load_images<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    rels: &[Relationship],
) -> Result<Vec<EmbeddedImage>> {
    let mut images = Vec::new();
    for rel in rels.iter().filter(|r| r.rel_type == IMAGE_REL_TYPE) {
        let part = if let Some(stripped) = rel.target.strip_prefix('/') {
            stripped.to_string()
        } else {
            format!("word/{}", rel.target)
        };
        // External image targets have no package part; skip them.
        let Ok(data) = read_part_bytes(archive, &part) else {
            continue;
        };
        let ext = part.rsplit_once('.').map(|(_, e)| e).unwrap_or("png");
        images.push(EmbeddedImage {
            rel_id: rel.id.clone(),
            name: format!("image_{}.{}", images.len() + 1, ext),
            data,
        });
    }
    Ok(images)
}

/// Walk word/document.xml and build the paragraph stream. Style ids are
/// resolved to names; numbering presence and per-run bold flags come from
/// structural elements, never from text scanning.
pub(crate) fn extract_paragraphs(
    xml: &str,
    styles: &HashMap<String, String>,
) -> Result<Vec<SourceParagraph>> {
    let mut paragraphs = Vec::new();
    let mut reader = Reader::from_str(xml);

    let mut current: Option<SourceParagraph> = None;
    let mut in_ppr = false;
    let mut in_run = false;
    let mut in_rpr = false;
    let mut run_bold = false;
    let mut run_text = String::new();

    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(e) | Event::Empty(e) => {
                let is_empty = matches!(&event, Event::Empty(_));
                match e.name().as_ref() {
                    b"w:p" => {
                        current = Some(SourceParagraph::default());
                        if is_empty {
                            paragraphs.push(current.take().unwrap_or_default());
                        }
                    }
                    b"w:pPr" if !is_empty => in_ppr = true,
                    b"w:pStyle" if in_ppr => {
                        if let (Some(para), Some(style_id)) =
                            (current.as_mut(), attr_value(e, b"w:val"))
                        {
                            para.style_name = styles
                                .get(&style_id)
                                .cloned()
                                .unwrap_or(style_id);
                        }
                    }
                    b"w:numPr" if in_ppr => {
                        if let Some(para) = current.as_mut() {
                            para.has_numbering = true;
                        }
                    }
                    b"w:r" if !is_empty => {
                        in_run = true;
                        run_bold = false;
                        run_text.clear();
                    }
                    b"w:rPr" if in_run && !is_empty => in_rpr = true,
                    b"w:b" if in_rpr => {
                        // <w:b/> means bold unless explicitly turned off
                        run_bold = !matches!(
                            attr_value(e, b"w:val").as_deref(),
                            Some("0") | Some("false") | Some("none")
                        );
                    }
                    b"a:blip" => {
                        if let Some(para) = current.as_mut() {
                            if let Some(id) = attr_value(e, b"r:embed")
                                .or_else(|| attr_value(e, b"r:link"))
                            {
                                para.image_refs.push(id);
                            }
                        }
                    }
                    b"v:imagedata" => {
                        // Legacy VML drawings
                        if let Some(para) = current.as_mut() {
                            if let Some(id) = attr_value(e, b"r:id") {
                                para.image_refs.push(id);
                            }
                        }
                    }
                    b"w:tab" if in_run => run_text.push('\t'),
                    b"w:br" if in_run => run_text.push('\n'),
                    _ => {}
                }
            }
            Event::Text(t) => {
                if in_run {
                    run_text.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(para) = current.take() {
                        paragraphs.push(para);
                    }
                }
                b"w:pPr" => in_ppr = false,
                b"w:rPr" => in_rpr = false,
                b"w:r" => {
                    if in_run {
                        if !run_text.is_empty() {
                            if let Some(para) = current.as_mut() {
                                para.runs.push(TextRun {
                                    text: std::mem::take(&mut run_text),
                                    bold: run_bold,
                                });
                            }
                        }
                        in_run = false;
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
