//! Source paragraph types and classification tags.

use serde::{Deserialize, Serialize};

/// A run of text with its bold flag, as extracted from the source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Whether the run carries bold formatting
    pub bold: bool,
}

impl TextRun {
    /// Create a new plain text run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// One paragraph of the source document with all the metadata the classifier
/// needs, extracted once at ingestion. The classifier and segmenter never
/// look back at the underlying XML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceParagraph {
    /// Text runs in document order
    pub runs: Vec<TextRun>,

    /// Resolved style name (e.g. "Heading 1", "Lijstalinea")
    pub style_name: String,

    /// A numbering-properties element is present on the paragraph
    pub has_numbering: bool,

    /// Relationship ids of embedded drawings, in run order
    pub image_refs: Vec<String>,
}

impl SourceParagraph {
    /// Create a paragraph with plain text and a style name.
    pub fn with_text(text: impl Into<String>, style_name: impl Into<String>) -> Self {
        Self {
            runs: vec![TextRun::new(text)],
            style_name: style_name.into(),
            ..Default::default()
        }
    }

    /// Concatenated run text, trimmed.
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .map(|r| r.text.as_str())
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Whether any run in the paragraph is bold.
    pub fn has_bold_run(&self) -> bool {
        self.runs.iter().any(|r| r.bold)
    }

    /// Whether the paragraph embeds at least one drawing.
    pub fn has_image(&self) -> bool {
        !self.image_refs.is_empty()
    }

    /// Whether the trimmed paragraph text is empty.
    pub fn is_empty(&self) -> bool {
        self.plain_text().is_empty() && self.image_refs.is_empty()
    }
}

/// Semantic kind of one source paragraph. Exactly one kind per paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParagraphKind {
    /// A paragraph using a real heading style, with its level (1..=3)
    Heading(u8),

    /// A bold (or ALL-CAPS) line acting as a section title
    BoldLine,

    /// A bulleted or numbered list item
    ListItem,

    /// A paragraph embedding one or more drawings
    ImageParagraph,

    /// Ordinary body text
    PlainText,

    /// Nothing to emit
    Empty,
}

impl ParagraphKind {
    /// Whether this kind starts a new block.
    pub fn is_block_boundary(&self) -> bool {
        matches!(self, ParagraphKind::Heading(_) | ParagraphKind::BoldLine)
    }
}
