//! PPTX package writer for [`SlideDeck`].
//!
//! Builds a minimal but valid presentation: one slide master, one blank
//! layout, one theme, and one slide part per deck slide. All shapes are
//! absolutely positioned from the inch offsets computed by the slide
//! renderer.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::render::{Slide, SlideDeck, SlideKind, SlideShape};

use super::{emu, escape_xml, image_content_type, CREATED_AT};

const SLIDE_LAYOUT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const IMAGE_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const BODY_LEFT_IN: f32 = 0.8;
const BODY_WIDTH_IN: f32 = 8.4;
const IMAGE_LEFT_IN: f32 = 1.0;
const IMAGE_WIDTH_IN: f32 = 4.5;

/// One media part scheduled for the package, with the slide-local
/// relationship id that references it.
struct MediaPart {
    part_name: String,
    extension: String,
    data: Vec<u8>,
}

/// Serialize the deck to a complete PPTX package.
pub(crate) fn write_deck(deck: &SlideDeck) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    // Assign media part names and per-slide relationship ids up front so
    // content types, slide XML, and rels all agree.
    let mut media: Vec<MediaPart> = Vec::new();
    let mut slide_image_rels: Vec<Vec<(String, String)>> = Vec::new();
    for slide in &deck.slides {
        let mut rels = Vec::new();
        for shape in &slide.shapes {
            if let SlideShape::Picture { image, .. } = shape {
                let extension = image.extension().to_string();
                let part_name = format!("image{}.{}", media.len() + 1, extension);
                let rel_id = format!("rId{}", rels.len() + 2);
                rels.push((rel_id, part_name.clone()));
                media.push(MediaPart {
                    part_name,
                    extension,
                    data: image.data.clone(),
                });
            }
        }
        slide_image_rels.push(rels);
    }

    write_content_types(&mut zip, &options, deck.slides.len(), &media)?;
    write_package_rels(&mut zip, &options)?;
    write_doc_props(&mut zip, &options, deck.slides.len())?;
    write_presentation(&mut zip, &options, deck.slides.len())?;
    write_presentation_rels(&mut zip, &options, deck.slides.len())?;
    write_slide_master(&mut zip, &options)?;
    write_slide_layout(&mut zip, &options)?;
    write_theme(&mut zip, &options)?;

    for (i, slide) in deck.slides.iter().enumerate() {
        let num = i + 1;
        zip.start_file(format!("ppt/slides/slide{num}.xml"), options.clone())?;
        zip.write_all(slide_xml(slide, &slide_image_rels[i]).as_bytes())?;

        zip.start_file(format!("ppt/slides/_rels/slide{num}.xml.rels"), options.clone())?;
        zip.write_all(slide_rels_xml(&slide_image_rels[i]).as_bytes())?;
    }

    for part in &media {
        zip.start_file(format!("ppt/media/{}", part.part_name), options.clone())?;
        zip.write_all(&part.data)?;
    }

    zip.finish()?;
    Ok(buffer.into_inner())
}

fn write_content_types<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: &SimpleFileOptions,
    slide_count: usize,
    media: &[MediaPart],
) -> Result<()> {
    let mut defaults = String::from(
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>"#,
    );
    let mut seen_exts: Vec<&str> = Vec::new();
    for part in media {
        if !seen_exts.contains(&part.extension.as_str()) {
            seen_exts.push(&part.extension);
            defaults.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                part.extension,
                image_content_type(&part.extension)
            ));
        }
    }

    let mut overrides = String::from(
        r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
    );
    for i in 1..=slide_count {
        overrides.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
        ));
    }

    zip.start_file("[Content_Types].xml", options.clone())?;
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">{defaults}{overrides}</Types>"#
        )
        .as_bytes(),
    )?;
    Ok(())
}

fn write_package_rels<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: &SimpleFileOptions,
) -> Result<()> {
    zip.start_file("_rels/.rels", options.clone())?;
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#,
    )?;
    Ok(())
}

fn write_doc_props<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: &SimpleFileOptions,
    slide_count: usize,
) -> Result<()> {
    zip.start_file("docProps/core.xml", options.clone())?;
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>Inhoud uit Word</dc:title><dc:creator>undocx</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{CREATED_AT}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{CREATED_AT}</dcterms:modified></cp:coreProperties>"#
        )
        .as_bytes(),
    )?;

    zip.start_file("docProps/app.xml", options.clone())?;
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><Application>undocx</Application><Slides>{slide_count}</Slides></Properties>"#
        )
        .as_bytes(),
    )?;
    Ok(())
}

fn write_presentation<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: &SimpleFileOptions,
    slide_count: usize,
) -> Result<()> {
    let mut slide_ids = String::new();
    for i in 1..=slide_count {
        slide_ids.push_str(&format!(
            r#"<p:sldId id="{}" r:id="rId{}"/>"#,
            256 + i,
            i + 2
        ));
    }

    zip.start_file("ppt/presentation.xml", options.clone())?;
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst>{slide_ids}</p:sldIdLst><p:sldSz cx="9144000" cy="6858000" type="screen4x3"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#
        )
        .as_bytes(),
    )?;
    Ok(())
}

fn write_presentation_rels<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: &SimpleFileOptions,
    slide_count: usize,
) -> Result<()> {
    let mut rels = String::from(
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>"#,
    );
    for i in 1..=slide_count {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            i + 2,
            i
        ));
    }

    zip.start_file("ppt/_rels/presentation.xml.rels", options.clone())?;
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
        )
        .as_bytes(),
    )?;
    Ok(())
}

fn write_slide_master<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: &SimpleFileOptions,
) -> Result<()> {
    zip.start_file("ppt/slideMasters/slideMaster1.xml", options.clone())?;
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#,
    )?;

    zip.start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", options.clone())?;
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/></Relationships>"#,
    )?;
    Ok(())
}

fn write_slide_layout<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: &SimpleFileOptions,
) -> Result<()> {
    zip.start_file("ppt/slideLayouts/slideLayout1.xml", options.clone())?;
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1"><p:cSld name="Blank"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
    )?;

    zip.start_file("ppt/slideLayouts/_rels/slideLayout1.xml.rels", options.clone())?;
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#,
    )?;
    Ok(())
}

fn write_theme<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: &SimpleFileOptions,
) -> Result<()> {
    zip.start_file("ppt/theme/theme1.xml", options.clone())?;
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="44546A"/></a:dk2><a:lt2><a:srgbClr val="E7E6E6"/></a:lt2><a:accent1><a:srgbClr val="4472C4"/></a:accent1><a:accent2><a:srgbClr val="ED7D31"/></a:accent2><a:accent3><a:srgbClr val="A5A5A5"/></a:accent3><a:accent4><a:srgbClr val="FFC000"/></a:accent4><a:accent5><a:srgbClr val="5B9BD5"/></a:accent5><a:accent6><a:srgbClr val="70AD47"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Arial"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Arial"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#,
    )?;
    Ok(())
}

fn slide_rels_xml(image_rels: &[(String, String)]) -> String {
    let mut rels = format!(
        r#"<Relationship Id="rId1" Type="{SLIDE_LAYOUT_REL}" Target="../slideLayouts/slideLayout1.xml"/>"#
    );
    for (rel_id, part_name) in image_rels {
        rels.push_str(&format!(
            r#"<Relationship Id="{rel_id}" Type="{IMAGE_REL}" Target="../media/{part_name}"/>"#
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
    )
}

/// A positioned rectangular text shape with one or more paragraphs.
fn text_shape_xml(id: usize, name: &str, x: f32, y: f32, w: f32, h: f32, body: &str) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="{ox}" y="{oy}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr><p:txBody><a:bodyPr wrap="square"><a:normAutofit/></a:bodyPr><a:lstStyle/>{body}</p:txBody></p:sp>"#,
        ox = emu(x),
        oy = emu(y),
        cx = emu(w),
        cy = emu(h),
    )
}

fn plain_paragraph(text: &str, size: u32, bold: bool, centered: bool) -> String {
    let align = if centered { r#" algn="ctr""# } else { "" };
    let bold_attr = if bold { r#" b="1""# } else { "" };
    let mut out = String::new();
    for line in text.split('\n') {
        out.push_str(&format!(
            r#"<a:p><a:pPr{align}><a:buNone/></a:pPr><a:r><a:rPr lang="nl-NL" sz="{size}"{bold_attr}><a:latin typeface="Arial"/></a:rPr><a:t>{}</a:t></a:r></a:p>"#,
            escape_xml(line)
        ));
    }
    out
}

fn bullet_paragraphs(lines: &[String], size: u32) -> String {
    lines
        .iter()
        .map(|line| {
            format!(
                r#"<a:p><a:pPr marL="285750" indent="-285750"><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/></a:pPr><a:r><a:rPr lang="nl-NL" sz="{size}"><a:latin typeface="Arial"/></a:rPr><a:t>{}</a:t></a:r></a:p>"#,
                escape_xml(line)
            )
        })
        .collect()
}

fn picture_xml(id: usize, rel_id: &str, x: f32, y: f32, w: f32, h: f32) -> String {
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="Picture {id}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr><a:xfrm><a:off x="{ox}" y="{oy}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#,
        ox = emu(x),
        oy = emu(y),
        cx = emu(w),
        cy = emu(h),
    )
}

fn slide_xml(slide: &Slide, image_rels: &[(String, String)]) -> String {
    let mut shapes = String::new();
    let mut shape_id = 2;
    let mut image_idx = 0;

    match slide.kind {
        SlideKind::Lead => {
            if let Some(ref title) = slide.title {
                shapes.push_str(&text_shape_xml(
                    shape_id,
                    "Title",
                    0.5,
                    2.3,
                    9.0,
                    1.1,
                    &plain_paragraph(title, 4000, true, true),
                ));
                shape_id += 1;
            }
            if let Some(ref subtitle) = slide.subtitle {
                shapes.push_str(&text_shape_xml(
                    shape_id,
                    "Subtitle",
                    0.5,
                    3.6,
                    9.0,
                    0.8,
                    &plain_paragraph(subtitle, 2000, false, true),
                ));
                shape_id += 1;
            }
        }
        SlideKind::TitleOnly => {
            if let Some(ref title) = slide.title {
                shapes.push_str(&text_shape_xml(
                    shape_id,
                    "Title",
                    0.5,
                    0.4,
                    9.0,
                    1.0,
                    &plain_paragraph(title, 3200, true, false),
                ));
                shape_id += 1;
            }
        }
        SlideKind::Blank => {}
    }

    for shape in &slide.shapes {
        match shape {
            SlideShape::TextBox { text, top_in, height_in } => {
                shapes.push_str(&text_shape_xml(
                    shape_id,
                    "TextBox",
                    BODY_LEFT_IN,
                    *top_in,
                    BODY_WIDTH_IN,
                    *height_in,
                    &plain_paragraph(text, 1600, false, false),
                ));
            }
            SlideShape::BulletBox { lines, top_in, height_in } => {
                shapes.push_str(&text_shape_xml(
                    shape_id,
                    "BulletBox",
                    BODY_LEFT_IN,
                    *top_in,
                    BODY_WIDTH_IN,
                    *height_in,
                    &bullet_paragraphs(lines, 1600),
                ));
            }
            SlideShape::Picture { top_in, height_in, .. } => {
                if let Some((rel_id, _)) = image_rels.get(image_idx) {
                    shapes.push_str(&picture_xml(
                        shape_id,
                        rel_id,
                        IMAGE_LEFT_IN,
                        *top_in,
                        IMAGE_WIDTH_IN,
                        *height_in,
                    ));
                    image_idx += 1;
                }
            }
        }
        shape_id += 1;
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResolvedImage;
    use std::io::Read;

    fn read_entry(data: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn deck_with_one_slide() -> SlideDeck {
        let mut deck = SlideDeck::default();
        deck.slides.push(Slide {
            kind: SlideKind::TitleOnly,
            title: Some("Kabels & co".to_string()),
            subtitle: None,
            shapes: vec![SlideShape::TextBox {
                text: "Korte uitleg.".to_string(),
                top_in: 2.0,
                height_in: 0.6,
            }],
        });
        deck
    }

    #[test]
    fn test_package_has_required_parts() {
        let bytes = write_deck(&deck_with_one_slide()).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(&bytes)).unwrap();
        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/_rels/slide1.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "docProps/core.xml",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing part {}", name);
        }
    }

    #[test]
    fn test_slide_count_in_presentation() {
        let mut deck = deck_with_one_slide();
        deck.slides.push(Slide {
            kind: SlideKind::Blank,
            title: None,
            subtitle: None,
            shapes: Vec::new(),
        });
        let bytes = write_deck(&deck).unwrap();
        let presentation = read_entry(&bytes, "ppt/presentation.xml");
        assert!(presentation.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));
        assert!(presentation.contains(r#"<p:sldId id="258" r:id="rId4"/>"#));
    }

    #[test]
    fn test_title_is_escaped() {
        let bytes = write_deck(&deck_with_one_slide()).unwrap();
        let slide = read_entry(&bytes, "ppt/slides/slide1.xml");
        assert!(slide.contains("Kabels &amp; co"));
    }

    #[test]
    fn test_picture_gets_media_part_and_rel() {
        let mut deck = SlideDeck::default();
        deck.slides.push(Slide {
            kind: SlideKind::Blank,
            title: None,
            subtitle: None,
            shapes: vec![SlideShape::Picture {
                image: ResolvedImage {
                    name: "image_1.png".to_string(),
                    data: vec![1, 2, 3, 4],
                    url: None,
                },
                top_in: 1.0,
                height_in: 3.0,
            }],
        });
        let bytes = write_deck(&deck).unwrap();
        let rels = read_entry(&bytes, "ppt/slides/_rels/slide1.xml.rels");
        assert!(rels.contains(r#"Target="../media/image1.png""#));
        let slide = read_entry(&bytes, "ppt/slides/slide1.xml");
        assert!(slide.contains(r#"r:embed="rId2""#));

        let mut archive = zip::ZipArchive::new(Cursor::new(&bytes)).unwrap();
        assert!(archive.by_name("ppt/media/image1.png").is_ok());
    }

    #[test]
    fn test_deterministic_bytes() {
        let a = write_deck(&deck_with_one_slide()).unwrap();
        let b = write_deck(&deck_with_one_slide()).unwrap();
        assert_eq!(a, b);
    }
}
