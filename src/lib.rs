//! # undocx
//!
//! Segmentation and re-flow of Word documents.
//!
//! This library parses a `.docx` package into a typed paragraph stream,
//! classifies each paragraph, groups the stream into logical blocks, and
//! projects the block sequence onto three outputs: an HTML fragment, a
//! paginated PPTX slide deck, and a workbook-style DOCX.
//!
//! ## Quick Start
//!
//! ```no_run
//! use undocx::{parse_file, render, segment_document, HtmlVariant};
//!
//! fn main() -> undocx::Result<()> {
//!     let doc = parse_file("lesstof.docx")?;
//!     let blocks = segment_document(&doc, None);
//!     let html = render::render_html(&blocks, HtmlVariant::Styled)?;
//!     println!("{}", html);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Structure-driven segmentation**: headings and bold lead lines open
//!   blocks; lists, text, and images flow into them
//! - **Three renderers** over one block model: HTML, slides, workbook
//! - **Best-effort collaborators**: image hosting and LLM rewriting degrade
//!   to local behavior instead of failing the conversion

pub mod classify;
pub mod config;
pub mod error;
pub mod images;
pub mod model;
mod ooxml;
pub mod parser;
pub mod render;
pub mod rewrite;
pub mod segment;

pub use classify::classify;
pub use config::{ConverterConfig, ImageHostConfig, LlmConfig};
pub use error::{Error, Result};
pub use images::{CdnUploader, EmbeddedImage, ImageResolver, ImageUploader};
pub use model::{
    Block, BodyItem, CoverMeta, LessonSlide, MaterialRow, ParagraphKind, ResolvedImage,
    SourceParagraph, TextRun,
};
pub use parser::{DocxDocument, DocxParser};
pub use render::{HtmlVariant, SlideDeck, SlideOptions};
pub use rewrite::{ContentRewriter, LlmRewriter, LocalSummarizer};

use std::io::Read;
use std::path::Path;

/// Parse a docx file into a structured document.
///
/// # Example
///
/// ```no_run
/// use undocx::parse_file;
///
/// let doc = parse_file("lesstof.docx").unwrap();
/// println!("paragraphs: {}", doc.paragraphs.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<DocxDocument> {
    let parser = DocxParser::open(path)?;
    parser.parse()
}

/// Parse a docx package from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<DocxDocument> {
    let parser = DocxParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a docx package from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<DocxDocument> {
    let parser = DocxParser::from_reader(reader)?;
    parser.parse()
}

/// Segment a parsed document into logical blocks, resolving image
/// references through the given uploader (or embedding bytes when `None`).
pub fn segment_document(
    doc: &DocxDocument,
    uploader: Option<Box<dyn ImageUploader>>,
) -> Vec<Block> {
    let mut resolver = ImageResolver::new(doc.images.clone(), uploader);
    segment::segment(&doc.paragraphs, &mut resolver)
}

/// Extract the plain text of a docx file, one line per paragraph.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(doc.plain_text())
}

/// Convert a docx file to an HTML fragment with default settings.
pub fn to_html<P: AsRef<Path>>(path: P, variant: HtmlVariant) -> Result<String> {
    let doc = parse_file(path)?;
    let blocks = segment_document(&doc, None);
    render::render_html(&blocks, variant)
}

/// Convert a docx file to PPTX bytes with default settings.
pub fn to_slides<P: AsRef<Path>>(path: P, options: &SlideOptions) -> Result<Vec<u8>> {
    let doc = parse_file(path)?;
    let blocks = segment_document(&doc, None);
    render::render_slides(&blocks, options).to_pptx()
}

/// Convert a docx file to a workbook DOCX with default settings.
pub fn to_workbook<P: AsRef<Path>>(
    path: P,
    meta: &CoverMeta,
    materials: Option<&[MaterialRow]>,
) -> Result<Vec<u8>> {
    let doc = parse_file(path)?;
    let blocks = segment_document(&doc, None);
    render::render_workbook(meta, materials, &blocks)
}

/// Serialize blocks as JSON, for inspection and debugging.
pub fn blocks_to_json(blocks: &[Block], pretty: bool) -> Result<String> {
    let result = if pretty {
        serde_json::to_string_pretty(blocks)
    } else {
        serde_json::to_string(blocks)
    };
    result.map_err(|e| Error::Render(e.to_string()))
}

/// Builder for converting Word documents.
///
/// # Example
///
/// ```no_run
/// use undocx::{Undocx, HtmlVariant};
///
/// let html = Undocx::new()
///     .with_html_variant(HtmlVariant::Bare)
///     .open("lesstof.docx")?
///     .to_html()?;
/// # Ok::<(), undocx::Error>(())
/// ```
pub struct Undocx {
    uploader: Option<Box<dyn ImageUploader>>,
    rewriter: Option<Box<dyn ContentRewriter>>,
    slide_options: SlideOptions,
    html_variant: HtmlVariant,
}

impl Undocx {
    /// Create a new builder without external collaborators.
    pub fn new() -> Self {
        Self {
            uploader: None,
            rewriter: None,
            slide_options: SlideOptions::default(),
            html_variant: HtmlVariant::default(),
        }
    }

    /// Create a builder wired from environment-derived configuration.
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self {
            uploader: config.uploader(),
            rewriter: config.rewriter(),
            slide_options: SlideOptions::default(),
            html_variant: HtmlVariant::default(),
        }
    }

    /// Set the image uploader.
    pub fn with_uploader(mut self, uploader: Box<dyn ImageUploader>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    /// Set the content rewriter used by the rewritten slide and lesson
    /// outputs.
    pub fn with_rewriter(mut self, rewriter: Box<dyn ContentRewriter>) -> Self {
        self.rewriter = Some(rewriter);
        self
    }

    /// Set slide geometry and budget options.
    pub fn with_slide_options(mut self, options: SlideOptions) -> Self {
        self.slide_options = options;
        self
    }

    /// Set the HTML variant.
    pub fn with_html_variant(mut self, variant: HtmlVariant) -> Self {
        self.html_variant = variant;
        self
    }

    /// Parse and segment a docx file.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<UndocxResult> {
        let doc = DocxParser::open(path)?.parse()?;
        self.into_result(doc)
    }

    /// Parse and segment a docx package from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UndocxResult> {
        let doc = DocxParser::from_bytes(data)?.parse()?;
        self.into_result(doc)
    }

    fn into_result(self, doc: DocxDocument) -> Result<UndocxResult> {
        let mut resolver = ImageResolver::new(doc.images, self.uploader);
        let blocks = segment::segment(&doc.paragraphs, &mut resolver);
        Ok(UndocxResult {
            blocks,
            rewriter: self.rewriter,
            slide_options: self.slide_options,
            html_variant: self.html_variant,
        })
    }
}

impl Default for Undocx {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing and segmenting a document.
pub struct UndocxResult {
    /// The segmented blocks
    pub blocks: Vec<Block>,
    rewriter: Option<Box<dyn ContentRewriter>>,
    slide_options: SlideOptions,
    html_variant: HtmlVariant,
}

impl UndocxResult {
    /// Render an HTML fragment.
    pub fn to_html(&self) -> Result<String> {
        render::render_html(&self.blocks, self.html_variant)
    }

    /// Render the paginated slide deck as PPTX bytes.
    pub fn to_slides(&self) -> Result<Vec<u8>> {
        render::render_slides(&self.blocks, &self.slide_options).to_pptx()
    }

    /// Render rewritten slides as PPTX bytes (one rewriter call per block,
    /// falling back to the local summarizer).
    pub fn to_slides_rewritten(&self) -> Result<Vec<u8>> {
        render::render_slides_rewritten(&self.blocks, &self.slide_options, self.rewriter.as_deref())
            .to_pptx()
    }

    /// Render the workbook DOCX.
    pub fn to_workbook(
        &self,
        meta: &CoverMeta,
        materials: Option<&[MaterialRow]>,
    ) -> Result<Vec<u8>> {
        render::render_workbook(meta, materials, &self.blocks)
    }

    /// Render the rewritten lesson DOCX.
    pub fn to_lesson(&self) -> Result<Vec<u8>> {
        render::render_lesson_docx(&self.blocks, self.rewriter.as_deref())
    }

    /// Serialize the blocks as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        blocks_to_json(&self.blocks, pretty)
    }

    /// Borrow the segmented blocks.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bytes_empty_data() {
        let data: [u8; 0] = [];
        assert!(parse_bytes(&data).is_err());
    }

    #[test]
    fn test_parse_bytes_unknown_magic() {
        assert!(matches!(
            parse_bytes(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_builder_parse_invalid_bytes() {
        let result = Undocx::new().parse_bytes(b"not a docx");
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_defaults() {
        let builder = Undocx::default();
        assert!(builder.uploader.is_none());
        assert!(builder.rewriter.is_none());
        assert_eq!(builder.html_variant, HtmlVariant::Styled);
        assert_eq!(builder.slide_options.max_lines_per_slide, 12);
    }

    #[test]
    fn test_builder_chained() {
        let builder = Undocx::new()
            .with_html_variant(HtmlVariant::Bare)
            .with_slide_options(SlideOptions::new().with_max_lines(8));
        assert_eq!(builder.html_variant, HtmlVariant::Bare);
        assert_eq!(builder.slide_options.max_lines_per_slide, 8);
    }

    #[test]
    fn test_blocks_to_json_roundtrip() {
        let blocks = vec![Block::titled("Kabels", Some(1))];
        let json = blocks_to_json(&blocks, false).unwrap();
        let parsed: Vec<Block> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0].title.as_deref(), Some("Kabels"));
    }
}
