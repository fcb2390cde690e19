//! Block segmentation.
//!
//! Walks the classified paragraph stream in order and groups it into
//! [`Block`]s: a boundary paragraph (heading or bold/ALL-CAPS line) closes
//! the current block and opens a titled one; everything else appends to the
//! current block's body, opening an untitled block when none exists yet.
//! Segmentation never drops a non-empty paragraph.

use crate::classify::classify;
use crate::images::ImageResolver;
use crate::model::{Block, BodyItem, ParagraphKind, SourceParagraph};

/// Segment a paragraph stream into ordered blocks, resolving embedded
/// images inline in order of appearance.
///
/// An input with zero non-empty paragraphs yields exactly one untitled
/// block with an empty body, so renderers always have something valid to
/// consume.
pub fn segment(paragraphs: &[SourceParagraph], resolver: &mut ImageResolver) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut current: Option<Block> = None;

    for para in paragraphs {
        match classify(para) {
            ParagraphKind::Empty => {}
            ParagraphKind::Heading(level) => {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
                current = Some(Block::titled(para.plain_text(), Some(level)));
            }
            ParagraphKind::BoldLine => {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
                current = Some(Block::titled(para.plain_text(), None));
            }
            ParagraphKind::ListItem => {
                current
                    .get_or_insert_with(Block::untitled)
                    .body
                    .push(BodyItem::ListLine(para.plain_text()));
            }
            ParagraphKind::ImageParagraph => {
                let block = current.get_or_insert_with(Block::untitled);
                for rel_id in &para.image_refs {
                    if let Some(image) = resolver.resolve(rel_id) {
                        block.body.push(BodyItem::ImageItem(image));
                    }
                }
            }
            ParagraphKind::PlainText => {
                current
                    .get_or_insert_with(Block::untitled)
                    .body
                    .push(BodyItem::TextLine(para.plain_text()));
            }
        }
    }

    if let Some(block) = current {
        blocks.push(block);
    }

    if blocks.is_empty() {
        blocks.push(Block::untitled());
    }

    blocks
}
