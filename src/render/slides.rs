//! Slide rendering: the pagination engine.
//!
//! Blocks are laid out onto a [`SlideDeck`] intermediate representation
//! using estimated line counts and a vertical cursor; the deck is then
//! serialized to a PPTX package. A slide is opened on every block title,
//! when the line budget would overflow, or when the cursor would pass the
//! bottom margin.

use crate::error::Result;
use crate::model::{Block, BodyItem, ResolvedImage};
use crate::ooxml;
use crate::rewrite::{rewrite_or_fallback, ContentRewriter, MAX_BULLETS};

use super::SlideOptions;

const TEXT_BOX_BASE_HEIGHT_IN: f32 = 0.6;
const TEXT_BOX_LINE_HEIGHT_IN: f32 = 0.25;
const TEXT_BOX_MAX_HEIGHT_IN: f32 = 4.0;
const TEXT_BOX_GAP_IN: f32 = 0.15;
const BULLET_LINE_HEIGHT_IN: f32 = 0.35;
const BULLET_BOX_PADDING_IN: f32 = 0.3;
const IMAGE_GAP_IN: f32 = 0.2;

/// A positioned shape on one slide.
#[derive(Debug, Clone)]
pub enum SlideShape {
    /// A free text box
    TextBox {
        text: String,
        top_in: f32,
        height_in: f32,
    },

    /// One text box holding a growing bullet list, one bullet per line
    BulletBox {
        lines: Vec<String>,
        top_in: f32,
        height_in: f32,
    },

    /// An embedded picture
    Picture {
        image: ResolvedImage,
        top_in: f32,
        height_in: f32,
    },
}

/// Layout role of a slide; selects title styling when serializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    /// Leading deck slide with title and subtitle
    Lead,

    /// Section slide: title at the top, free shapes below
    TitleOnly,

    /// Continuation slide without a title
    Blank,
}

/// One output slide.
#[derive(Debug, Clone)]
pub struct Slide {
    pub kind: SlideKind,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub shapes: Vec<SlideShape>,
}

impl Slide {
    fn new(kind: SlideKind, title: Option<String>) -> Self {
        Self {
            kind,
            title,
            subtitle: None,
            shapes: Vec::new(),
        }
    }
}

/// The rendered deck, ready for serialization.
#[derive(Debug, Clone, Default)]
pub struct SlideDeck {
    pub slides: Vec<Slide>,
}

impl SlideDeck {
    /// Serialize the deck to PPTX bytes.
    pub fn to_pptx(&self) -> Result<Vec<u8>> {
        ooxml::pptx::write_deck(self)
    }
}

/// Convert blocks to a slide deck without rewriting.
pub fn render_slides(blocks: &[Block], options: &SlideOptions) -> SlideDeck {
    SlideRenderer::new(options.clone()).render(blocks)
}

/// Convert blocks to a slide deck, rewriting each block's text through the
/// content rewriter (one call per block). Rewriter failures fall back to
/// the local summarizer; the conversion itself never fails.
pub fn render_slides_rewritten(
    blocks: &[Block],
    options: &SlideOptions,
    rewriter: Option<&dyn ContentRewriter>,
) -> SlideDeck {
    SlideRenderer::new(options.clone()).render_rewritten(blocks, rewriter)
}

/// Mutable per-render cursor. Reset on every slide boundary; never outlives
/// one render pass.
struct RenderCursor {
    y: f32,
    used_lines: usize,
    /// Index of the open bullet box in the current slide's shapes, with its
    /// top offset and accumulated line count
    open_list: Option<(usize, f32, usize)>,
}

pub struct SlideRenderer {
    options: SlideOptions,
}

impl SlideRenderer {
    pub fn new(options: SlideOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, blocks: &[Block]) -> SlideDeck {
        let mut deck = SlideDeck::default();
        let mut cursor = self.start_deck(&mut deck);

        for block in blocks {
            if let Some(ref title) = block.title {
                cursor = self.new_titled_slide(&mut deck, title.clone());
            }
            for item in &block.body {
                match item {
                    BodyItem::TextLine(text) => {
                        self.place_text(&mut deck, &mut cursor, text);
                    }
                    BodyItem::ListLine(text) => {
                        self.place_bullet(&mut deck, &mut cursor, text);
                    }
                    BodyItem::ImageItem(image) => {
                        self.place_image(&mut deck, &mut cursor, image.clone());
                    }
                }
            }
        }

        deck
    }

    pub fn render_rewritten(
        &self,
        blocks: &[Block],
        rewriter: Option<&dyn ContentRewriter>,
    ) -> SlideDeck {
        let mut deck = SlideDeck::default();
        let mut cursor = self.start_deck(&mut deck);

        for block in blocks {
            let raw = block.raw_text();
            if !raw.is_empty() {
                let lesson = rewrite_or_fallback(rewriter, &raw, MAX_BULLETS);
                cursor = self.new_titled_slide(&mut deck, lesson.title);
                for bullet in &lesson.bullets {
                    self.place_bullet(&mut deck, &mut cursor, bullet);
                }
                cursor.open_list = None;
                self.place_text(&mut deck, &mut cursor, &lesson.check);
            }
            for item in &block.body {
                if let BodyItem::ImageItem(image) = item {
                    self.place_image(&mut deck, &mut cursor, image.clone());
                }
            }
        }

        deck
    }

    fn start_deck(&self, deck: &mut SlideDeck) -> RenderCursor {
        let mut lead = Slide::new(SlideKind::Lead, Some(self.options.deck_title.clone()));
        lead.subtitle = Some(self.options.deck_subtitle.clone());
        deck.slides.push(lead);
        RenderCursor {
            y: self.options.body_top_in,
            used_lines: 0,
            open_list: None,
        }
    }

    fn new_titled_slide(&self, deck: &mut SlideDeck, title: String) -> RenderCursor {
        deck.slides.push(Slide::new(SlideKind::TitleOnly, Some(title)));
        RenderCursor {
            y: self.options.body_top_in,
            used_lines: 0,
            open_list: None,
        }
    }

    fn new_continuation_slide(&self, deck: &mut SlideDeck, cursor: &mut RenderCursor) {
        deck.slides.push(Slide::new(SlideKind::Blank, None));
        cursor.y = self.options.continuation_top_in;
        cursor.used_lines = 0;
        cursor.open_list = None;
    }

    fn overflows(&self, cursor: &RenderCursor, lines_needed: usize) -> bool {
        cursor.used_lines + lines_needed > self.options.max_lines_per_slide
            || cursor.y + TEXT_BOX_BASE_HEIGHT_IN > self.options.max_bottom_in
    }

    fn place_text(&self, deck: &mut SlideDeck, cursor: &mut RenderCursor, text: &str) {
        let lines = self.options.estimated_lines(text).max(1);
        // The budget bounds accumulation across items; a single line longer
        // than the whole budget still lands whole on a fresh slide.
        if self.overflows(cursor, lines) {
            self.new_continuation_slide(deck, cursor);
        }
        // Non-list content closes any open bullet box.
        cursor.open_list = None;

        let height = (TEXT_BOX_BASE_HEIGHT_IN + (lines as f32 - 1.0) * TEXT_BOX_LINE_HEIGHT_IN)
            .min(TEXT_BOX_MAX_HEIGHT_IN);
        let Some(slide) = deck.slides.last_mut() else {
            return;
        };
        slide.shapes.push(SlideShape::TextBox {
            text: text.to_string(),
            top_in: cursor.y,
            height_in: height,
        });
        cursor.y += height + TEXT_BOX_GAP_IN;
        cursor.used_lines += lines;
    }

    fn place_bullet(&self, deck: &mut SlideDeck, cursor: &mut RenderCursor, text: &str) {
        let lines = self.options.estimated_lines(text).max(1);
        if self.overflows(cursor, lines) {
            self.new_continuation_slide(deck, cursor);
        }

        match cursor.open_list {
            Some((shape_idx, top, ref mut list_lines)) => {
                *list_lines += lines;
                let total = *list_lines;
                if let Some(SlideShape::BulletBox { lines: box_lines, height_in, .. }) = deck
                    .slides
                    .last_mut()
                    .and_then(|s| s.shapes.get_mut(shape_idx))
                {
                    box_lines.push(text.to_string());
                    *height_in = BULLET_LINE_HEIGHT_IN * total as f32 + BULLET_BOX_PADDING_IN;
                }
                cursor.y = top + BULLET_LINE_HEIGHT_IN * total as f32 + BULLET_BOX_PADDING_IN;
            }
            None => {
                let top = cursor.y;
                let Some(slide) = deck.slides.last_mut() else {
                    return;
                };
                slide.shapes.push(SlideShape::BulletBox {
                    lines: vec![text.to_string()],
                    top_in: top,
                    height_in: BULLET_LINE_HEIGHT_IN * lines as f32 + BULLET_BOX_PADDING_IN,
                });
                cursor.open_list = Some((slide.shapes.len() - 1, top, lines));
                cursor.y = top + BULLET_LINE_HEIGHT_IN * lines as f32 + BULLET_BOX_PADDING_IN;
            }
        }
        cursor.used_lines += lines;
    }

    fn place_image(&self, deck: &mut SlideDeck, cursor: &mut RenderCursor, image: ResolvedImage) {
        cursor.open_list = None;
        let height = self.options.image_height_in;

        if cursor.y + height > self.options.max_bottom_in {
            self.new_continuation_slide(deck, cursor);
        }
        let top = cursor.y;
        let Some(slide) = deck.slides.last_mut() else {
            return;
        };
        slide.shapes.push(SlideShape::Picture {
            image,
            top_in: top,
            height_in: height,
        });
        cursor.y += height + IMAGE_GAP_IN;
    }
}
