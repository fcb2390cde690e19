//! End-to-end renderer tests: docx bytes in, HTML/PPTX/DOCX out.

mod common;

use common::{build_docx, build_docx_with_media, heading_p, image_p, list_p, read_part, text_p};
use undocx::render::{render_slides, render_workbook};
use undocx::{
    parse_bytes, segment_document, CoverMeta, Error, HtmlVariant, ImageUploader, MaterialRow,
    SlideOptions, Undocx,
};

struct FailingUploader;

impl ImageUploader for FailingUploader {
    fn upload(&self, _name: &str, _data: &[u8]) -> undocx::Result<String> {
        Err(Error::ImageUpload("host unreachable".into()))
    }
}

#[test]
fn test_html_end_to_end() {
    let body = format!(
        "{}{}{}{}",
        heading_p("Heading1", "Kabels"),
        text_p("Korte uitleg."),
        list_p("Eerste"),
        list_p("Tweede")
    );
    let html = Undocx::new()
        .with_html_variant(HtmlVariant::Styled)
        .parse_bytes(&build_docx(&body))
        .unwrap()
        .to_html()
        .unwrap();

    assert_eq!(
        html,
        "<h1>Kabels</h1>\n<p>Korte uitleg.</p>\n<ul class=\"browser-default\">\n<li>Eerste</li>\n<li>Tweede</li>\n</ul>"
    );
}

#[test]
fn test_slides_paginate_long_blocks() {
    // 20 body lines of ~80 chars estimate to 2 lines each against a budget
    // of 12 per slide, so the deck must paginate.
    let mut body = heading_p("Heading1", "Lange les");
    for i in 0..20 {
        body.push_str(&text_p(&format!("{:<79}x", format!("regel {i}"))));
    }
    let doc = parse_bytes(&build_docx(&body)).unwrap();
    let blocks = segment_document(&doc, None);
    let options = SlideOptions::default();
    let deck = render_slides(&blocks, &options);

    // Lead slide + at least two content slides
    assert!(deck.slides.len() >= 4, "deck has {} slides", deck.slides.len());

    let pptx = deck.to_pptx().unwrap();
    let presentation = read_part(&pptx, "ppt/presentation.xml");
    assert_eq!(
        presentation.matches("<p:sldId ").count(),
        deck.slides.len()
    );
}

#[test]
fn test_slides_open_with_deck_title() {
    let body = heading_p("Heading1", "Kabels");
    let doc = parse_bytes(&build_docx(&body)).unwrap();
    let blocks = segment_document(&doc, None);
    let deck = render_slides(&blocks, &SlideOptions::default());
    assert_eq!(deck.slides[0].title.as_deref(), Some("Inhoud uit Word"));

    let pptx = deck.to_pptx().unwrap();
    let slide1 = read_part(&pptx, "ppt/slides/slide1.xml");
    assert!(slide1.contains("Inhoud uit Word"));
}

#[test]
fn test_workbook_embeds_image_bytes_when_upload_fails() {
    let png = [0x89u8, b'P', b'N', b'G', 9, 9];
    let body = format!(
        "{}{}{}",
        heading_p("Heading1", "Stap 1"),
        text_p("Zaag de plank."),
        image_p("rId5")
    );
    let data = build_docx_with_media(&body, &[("rId5", "media/foto.png", &png)]);
    let doc = parse_bytes(&data).unwrap();
    let blocks = segment_document(&doc, Some(Box::new(FailingUploader)));

    let meta = CoverMeta {
        subject: "BWI".into(),
        assignment_no: "1".into(),
        assignment_title: "Opdracht".into(),
        ..CoverMeta::default()
    };
    let bytes = render_workbook(&meta, None, &blocks).unwrap();

    let document = read_part(&bytes, "word/document.xml");
    assert!(document.contains("Zaag de plank."));
    assert!(document.contains("r:embed"));
    // The image part carries the original bytes, no placeholder text
    assert!(!document.contains("afbeelding niet"));
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(&bytes)).unwrap();
    assert!(archive.by_name("word/media/image1.png").is_ok());
}

#[test]
fn test_workbook_cover_labels_survive_empty_meta() {
    let meta = CoverMeta::default();
    let bytes = render_workbook(&meta, None, &[]).unwrap();
    let document = read_part(&bytes, "word/document.xml");

    assert!(document.contains("Keuze/profieldeel:"));
    assert!(document.contains("Opdracht :"));
    assert!(document.contains("Duur van de opdracht:"));
    assert!(document.contains("Naam:"));
    assert!(document.contains("Klas:"));
}

#[test]
fn test_workbook_materials_table() {
    let meta = CoverMeta::default();
    let rows = vec![MaterialRow {
        number: "1".into(),
        quantity: "2".into(),
        name: "Lat".into(),
        length: "500".into(),
        width: "44".into(),
        thickness: "18".into(),
        material: "Grenen".into(),
    }];
    let bytes = render_workbook(&meta, Some(&rows), &[]).unwrap();
    let document = read_part(&bytes, "word/document.xml");

    for header in ["Nummer", "Aantal", "Naam", "Lengte", "Breedte", "Dikte", "Materiaal"] {
        assert!(document.contains(header), "missing column {}", header);
    }
    assert!(document.contains("Grenen"));
}

#[test]
fn test_lesson_document_fallback() {
    let body = format!(
        "{}{}",
        heading_p("Heading1", "Kabels"),
        text_p("Koper geleidt stroom. Isolatie beschermt de ader.")
    );
    let bytes = Undocx::new()
        .parse_bytes(&build_docx(&body))
        .unwrap()
        .to_lesson()
        .unwrap();
    let document = read_part(&bytes, "word/document.xml");

    assert!(document.contains(r#"<w:pStyle w:val="Heading1"/>"#));
    assert!(document.contains("Kun je dit in je eigen woorden uitleggen?"));
}

#[test]
fn test_rewritten_slides_without_llm_use_local_summary() {
    let body = format!(
        "{}{}",
        heading_p("Heading1", "Kabels"),
        text_p("Koper geleidt stroom. Isolatie beschermt de ader.")
    );
    let bytes = Undocx::new()
        .parse_bytes(&build_docx(&body))
        .unwrap()
        .to_slides_rewritten()
        .unwrap();
    let slide2 = read_part(&bytes, "ppt/slides/slide2.xml");
    // First sentence becomes the slide title, terminal punctuation stripped
    assert!(slide2.contains("Kabels"));
}
