//! End-to-end segmentation tests: docx bytes in, block structure out.

mod common;

use common::{bold_p, build_docx, build_docx_with_media, heading_p, image_p, list_p, text_p};
use undocx::{parse_bytes, segment_document, Block, BodyItem};

fn segment(body_xml: &str) -> Vec<Block> {
    let doc = parse_bytes(&build_docx(body_xml)).unwrap();
    segment_document(&doc, None)
}

#[test]
fn test_heading_opens_block() {
    let body = format!("{}{}", heading_p("Heading1", "Kabels"), text_p("Korte uitleg."));
    let blocks = segment(&body);

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].title.as_deref(), Some("Kabels"));
    assert_eq!(blocks[0].heading_level, Some(1));
    assert!(matches!(&blocks[0].body[0], BodyItem::TextLine(t) if t == "Korte uitleg."));
}

#[test]
fn test_bold_line_opens_block_without_level() {
    let body = format!(
        "{}{}{}",
        bold_p("GEREEDSCHAP"),
        list_p("hamer"),
        list_p("zaag")
    );
    let blocks = segment(&body);

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].title.as_deref(), Some("GEREEDSCHAP"));
    assert_eq!(blocks[0].heading_level, None);
    assert_eq!(blocks[0].body.len(), 2);
    assert!(matches!(&blocks[0].body[0], BodyItem::ListLine(t) if t == "hamer"));
}

#[test]
fn test_content_before_first_boundary_gets_untitled_block() {
    let body = format!(
        "{}{}{}",
        text_p("Inleiding zonder kop."),
        heading_p("Heading2", "Stap 1"),
        text_p("Doe dit.")
    );
    let blocks = segment(&body);

    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].title.is_none());
    assert_eq!(blocks[1].title.as_deref(), Some("Stap 1"));
    assert_eq!(blocks[1].heading_level, Some(2));
}

#[test]
fn test_empty_document_yields_one_empty_block() {
    let blocks = segment("");
    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].is_empty());
}

#[test]
fn test_empty_paragraphs_are_dropped() {
    let body = format!("{}<w:p/>{}", heading_p("Heading1", "Titel"), text_p("Tekst."));
    let blocks = segment(&body);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].body.len(), 1);
}

#[test]
fn test_every_nonempty_paragraph_lands_in_order() {
    let mut body = String::new();
    body.push_str(&heading_p("Heading1", "Eerste"));
    for i in 0..5 {
        body.push_str(&text_p(&format!("regel {i}")));
    }
    body.push_str(&bold_p("Tweede"));
    for i in 5..10 {
        body.push_str(&list_p(&format!("regel {i}")));
    }
    let blocks = segment(&body);

    let mut lines: Vec<String> = Vec::new();
    for block in &blocks {
        for item in &block.body {
            match item {
                BodyItem::TextLine(t) | BodyItem::ListLine(t) => lines.push(t.clone()),
                BodyItem::ImageItem(_) => {}
            }
        }
    }
    let expected: Vec<String> = (0..10).map(|i| format!("regel {i}")).collect();
    assert_eq!(lines, expected);
}

#[test]
fn test_image_paragraph_resolves_to_bytes() {
    let png = [0x89u8, b'P', b'N', b'G', 1, 2, 3];
    let body = format!(
        "{}{}",
        heading_p("Heading1", "Fotos"),
        image_p("rId7")
    );
    let data = build_docx_with_media(&body, &[("rId7", "media/afbeelding.png", &png)]);
    let doc = parse_bytes(&data).unwrap();
    let blocks = segment_document(&doc, None);

    assert_eq!(blocks.len(), 1);
    match &blocks[0].body[0] {
        BodyItem::ImageItem(image) => {
            assert_eq!(image.data, png.to_vec());
            assert!(image.url.is_none());
            assert_eq!(image.extension(), "png");
        }
        other => panic!("expected image item, got {:?}", other),
    }
}

#[test]
fn test_dangling_image_reference_is_skipped() {
    let body = format!("{}{}", heading_p("Heading1", "Fotos"), image_p("rId99"));
    let blocks = segment(&body);
    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].body.is_empty());
}

#[test]
fn test_parse_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lesstof.docx");
    let body = format!("{}{}", heading_p("Heading1", "Kabels"), text_p("Korte uitleg."));
    std::fs::write(&path, build_docx(&body)).unwrap();

    let doc = undocx::parse_file(&path).unwrap();
    assert_eq!(doc.paragraphs.len(), 2);
    let blocks = segment_document(&doc, None);
    assert_eq!(blocks[0].title.as_deref(), Some("Kabels"));
}

#[test]
fn test_segmentation_is_deterministic() {
    let body = format!(
        "{}{}{}{}",
        heading_p("Heading1", "Kop"),
        text_p("Tekst."),
        bold_p("Vet"),
        list_p("punt")
    );
    let a = undocx::blocks_to_json(&segment(&body), false).unwrap();
    let b = undocx::blocks_to_json(&segment(&body), false).unwrap();
    assert_eq!(a, b);
}
