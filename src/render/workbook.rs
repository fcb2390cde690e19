//! Workbook rendering: cover page, optional materials table, and one
//! section per block.

use crate::error::Result;
use crate::model::{Block, BodyItem, CoverMeta, MaterialRow};
use crate::ooxml::docx::{DocxBuilder, DocxRun};

const BODY_IMAGE_WIDTH_IN: f32 = 3.5;
const BODY_IMAGE_HEIGHT_IN: f32 = 2.6;
const COVER_PHOTO_WIDTH_IN: f32 = 4.0;
const COVER_PHOTO_HEIGHT_IN: f32 = 3.0;
const LOGO_SIZE_IN: f32 = 1.0;

pub const MATERIALS_HEADER: [&str; 7] = [
    "Nummer",
    "Aantal",
    "Naam",
    "Lengte",
    "Breedte",
    "Dikte",
    "Materiaal",
];

/// Render the complete workbook document.
pub fn render_workbook(
    meta: &CoverMeta,
    materials: Option<&[MaterialRow]>,
    blocks: &[Block],
) -> Result<Vec<u8>> {
    let mut builder = DocxBuilder::new();

    render_cover(&mut builder, meta);

    if let Some(rows) = materials {
        builder.page_break();
        render_materials(&mut builder, rows);
    }

    for block in blocks {
        builder.page_break();
        render_block(&mut builder, block);
    }

    builder.build()
}

/// Cover layout. Labels are emitted even when their value is empty so the
/// printed page keeps its fill-in structure.
fn render_cover(builder: &mut DocxBuilder, meta: &CoverMeta) {
    if let Some(ref logo) = meta.logo {
        builder.picture_right("png", logo.clone(), LOGO_SIZE_IN, LOGO_SIZE_IN);
    }

    builder.empty_line();
    builder.centered(vec![DocxRun::sized(&meta.subject, 40, true)]);
    builder.centered(vec![DocxRun::sized(
        format!("Keuze/profieldeel: {}", meta.profile).trim_end().to_string(),
        28,
        false,
    )]);
    builder.empty_line();

    builder.runs_paragraph(vec![DocxRun::sized(
        format!("Opdracht {}:", meta.assignment_no),
        28,
        true,
    )]);
    builder.runs_paragraph(vec![DocxRun::sized(&meta.assignment_title, 36, true)]);
    builder.labeled("Duur van de opdracht:", &meta.duration);
    builder.labeled("Docent:", &meta.teacher);
    builder.empty_line();

    if let Some(ref photo) = meta.cover_photo {
        builder.picture_centered("png", photo.clone(), COVER_PHOTO_WIDTH_IN, COVER_PHOTO_HEIGHT_IN);
        builder.empty_line();
    }

    builder.table(
        vec![
            vec!["Naam:".to_string(), String::new()],
            vec!["Klas:".to_string(), meta.class_name.clone()],
        ],
        false,
    );
    builder.empty_line();
    builder.empty_line();
}

fn render_materials(builder: &mut DocxBuilder, rows: &[MaterialRow]) {
    let mut table: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
    table.push(MATERIALS_HEADER.iter().map(|s| s.to_string()).collect());
    for row in rows {
        table.push(vec![
            row.number.clone(),
            row.quantity.clone(),
            row.name.clone(),
            row.length.clone(),
            row.width.clone(),
            row.thickness.clone(),
            row.material.clone(),
        ]);
    }
    builder.table(table, true);
}

fn render_block(builder: &mut DocxBuilder, block: &Block) {
    if let Some(ref title) = block.title {
        builder.heading(title, 1);
    }
    for item in &block.body {
        match item {
            BodyItem::TextLine(text) => builder.paragraph(text),
            BodyItem::ListLine(text) => builder.bullet(text),
            BodyItem::ImageItem(image) => {
                // Always embedded from bytes; a failed upload never becomes
                // a placeholder here.
                builder.picture(
                    image.extension(),
                    image.data.clone(),
                    BODY_IMAGE_WIDTH_IN,
                    BODY_IMAGE_HEIGHT_IN,
                );
                builder.empty_line();
            }
        }
    }
}
